//! Sheet text format
//!
//! ```text
//!                                  Todo
//! ----------------------------------------------------------------------
//! (00:00)   call the bank
//!
//!                                  Time
//! ----------------------------------------------------------------------
//! (00:45)   write report           10-17 09:00   10-17 09:45
//!
//!                                  Done
//! ----------------------------------------------------------------------
//! (00:45)   write report           10-17 10:00   work
//! ```
//!
//! Titles are centered in [`WIDTH`] columns. The reader accepts any title
//! line indented by at least ten spaces and any rule of at least ten dashes.
//! Whitespace-only lines are ignored, whatever their length. Any line with
//! visible text is a record, even one or two characters long.

use crate::domain::{ParseError, Section, Sheet, Task, TimeEntry, Clock};

/// Width of the title field and of written rules
pub const WIDTH: usize = 70;

/// Minimum title indent and rule length accepted when reading
const MIN_MARK: usize = 10;

/// Parses a whole sheet. Any malformed line rejects the document.
pub fn parse(text: &str, clock: Clock) -> Result<Sheet, ParseError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    match lines.next() {
        Some(line) if is_title(line, Section::Todo) => {}
        _ => return Err(ParseError::MissingHeader(Section::Todo)),
    }
    expect_rule(&mut lines, Section::Todo)?;

    let todo = read_section(&mut lines, Some(Section::Time), |l| Task::parse(l, &clock))?;
    let time = read_section(&mut lines, Some(Section::Done), |l| TimeEntry::parse(l, &clock))?;
    let done = read_section(&mut lines, None, |l| Task::parse(l, &clock))?;

    Sheet::from_parts(clock, todo, time, done)
}

/// Reads records until the title of `next`, or to the end for the last section
fn read_section<'a, T>(
    lines: &mut impl Iterator<Item = &'a str>,
    next: Option<Section>,
    parse_line: impl Fn(&str) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    let mut records = Vec::new();
    while let Some(line) = lines.next() {
        if let Some(section) = next.filter(|&s| is_title(line, s)) {
            expect_rule(lines, section)?;
            return Ok(records);
        }
        records.push(parse_line(line)?);
    }

    match next {
        Some(section) => Err(ParseError::MissingSection(section)),
        None => Ok(records),
    }
}

fn expect_rule<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    section: Section,
) -> Result<(), ParseError> {
    match lines.next() {
        Some(line) if is_rule(line) => Ok(()),
        _ => Err(ParseError::MissingRule(section)),
    }
}

fn is_title(line: &str, section: Section) -> bool {
    let text = line.trim_start_matches(' ');
    line.len() - text.len() >= MIN_MARK && text.trim_end() == section.title()
}

fn is_rule(line: &str) -> bool {
    let rule = line.trim_end();
    rule.len() >= MIN_MARK && rule.bytes().all(|b| b == b'-')
}

/// Writes a sheet in section order, each section followed by a blank line
pub fn serialize(sheet: &Sheet) -> String {
    let clock = sheet.clock();
    let mut lines: Vec<String> = Vec::new();

    for section in Section::ALL {
        lines.push(format!("{:^width$}", section.title(), width = WIDTH));
        lines.push("-".repeat(WIDTH));
        match section {
            Section::Todo => lines.extend(sheet.todo().iter().map(|t| t.render(sheet))),
            Section::Time => lines.extend(sheet.time().iter().map(|e| e.render(&clock))),
            Section::Done => lines.extend(sheet.done().iter().map(|t| t.render(sheet))),
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
