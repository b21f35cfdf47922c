//! Field tokenizer for ledger lines
//!
//! A ledger line is a sequence of fields separated by two or more whitespace
//! characters. Inside a field a single space is content, so task names
//! (`write report`), timestamps (`10-17 09:00`) and tag lists
//! (`work, deep focus`) each stay one field.

use std::fmt;

use super::error::ParseError;

/// Named field of a ledger line, used to point errors at what failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Deadline,
    Tags,
    Start,
    End,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Deadline => "deadline",
            Field::Tags => "tags",
            Field::Start => "start",
            Field::End => "end",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Splits a line into its double-space delimited fields
pub fn split_fields(line: &str) -> Vec<&str> {
    let line = line.trim();
    let mut fields = Vec::new();
    if line.is_empty() {
        return fields;
    }

    let mut start = 0;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next_is_space = chars.peek().is_some_and(|&(_, n)| n.is_whitespace());
        if c.is_whitespace() && next_is_space {
            fields.push(&line[start..i]);
            while chars.next_if(|&(_, n)| n.is_whitespace()).is_some() {}
            start = chars.peek().map_or(line.len(), |&(j, _)| j);
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Characters allowed in names and tags
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True for one or more words joined by single spaces (`write report`)
pub fn is_word_run(text: &str) -> bool {
    !text.is_empty()
        && text
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(is_word_char))
}

/// True for a rendered duration such as `(01:05)` or `(123:00)`
pub fn is_duration(text: &str) -> bool {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return false;
    };
    let Some((hours, minutes)) = inner.split_once(':') else {
        return false;
    };
    !hours.is_empty()
        && hours.chars().all(|c| c.is_ascii_digit())
        && minutes.len() == 2
        && minutes.chars().all(|c| c.is_ascii_digit())
}

/// Cursor over the fields of one line
pub struct Fields<'a> {
    line: &'a str,
    fields: Vec<&'a str>,
    pos: usize,
}

impl<'a> Fields<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            fields: split_fields(line),
            pos: 0,
        }
    }

    /// Skips the leading duration column, which is always recomputed
    pub fn skip_duration(&mut self) {
        if self.peek().is_some_and(is_duration) {
            self.pos += 1;
        }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.fields.get(self.pos).copied()
    }

    /// Consumes a required field, converting it with `accept`
    pub fn expect<T>(
        &mut self,
        field: Field,
        accept: impl FnOnce(&'a str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let text = self.peek().ok_or_else(|| ParseError::MissingField {
            field,
            line: self.line.to_string(),
        })?;
        let value = accept(text).ok_or_else(|| ParseError::BadField {
            field,
            text: text.to_string(),
            line: self.line.to_string(),
        })?;
        self.pos += 1;
        Ok(value)
    }

    /// Fails if any field is left over
    pub fn finish(self) -> Result<(), ParseError> {
        match self.peek() {
            Some(text) => Err(ParseError::UnexpectedField {
                text: text.to_string(),
                line: self.line.to_string(),
            }),
            None => Ok(()),
        }
    }
}
