//! Fuzzy task name resolution
//!
//! A query matches a name when its characters appear in the name in order,
//! ignoring case. Spaces in the query are matched like any other character.
//! Among matching names the winner has the shortest matching span, then the
//! earliest span start, then sorts first by name. So `wr rep` resolves to
//! `write report` even when `weekly review prep` also matches.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::error::TymeError;

/// Resolves `query` to exactly one of `names`
pub fn find_task<'a, I>(query: &str, names: I) -> Result<&'a str, TymeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = query.trim();
    if needle.is_empty() {
        return Err(TymeError::NoMatch(query.to_string()));
    }

    let atom = Atom::new(
        needle,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut buf = Vec::new();
    let mut indices = Vec::new();

    names
        .into_iter()
        .filter_map(|name| {
            indices.clear();
            atom.indices(Utf32Str::new(name, &mut buf), &mut matcher, &mut indices)?;
            span(&indices).map(|(len, start)| (len, start, name))
        })
        .min()
        .map(|(_, _, name)| name)
        .ok_or_else(|| TymeError::NoMatch(query.to_string()))
}

/// `(length, start)` of the window covering the matched characters
fn span(indices: &[u32]) -> Option<(u32, u32)> {
    let start = *indices.iter().min()?;
    let end = *indices.iter().max()?;
    Some((end - start + 1, start))
}
