//! Shift-plan text parsing.
//!
//! Input is free-form text, one shift per line. A line either carries its
//! own date (`Mi. 30.04 17:00 01:00 Thomas`) or inherits the date of the
//! most recent dated line (`18:00 02:00 Julia *`). Lines matching neither
//! shape are skipped, so headers and stray OCR output do not abort a parse;
//! a line that does match a shape but carries malformed time data does.

use crate::error::{ShiftCalError, ShiftCalResult};
use crate::shift::Shift;
use chrono::{NaiveDate, NaiveTime};

/// Parse shift records from text.
///
/// `year` resolves the year-less `DD.MM` date tokens. Callers inject it so
/// the parser itself never consults the system clock; repeated calls share
/// no state.
pub fn parse_shifts(text: &str, year: i32) -> ShiftCalResult<Vec<Shift>> {
    let mut shifts = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line = sanitize(trimmed);
        if line.is_empty() {
            continue;
        }

        if let Some(shift) = parse_line(&line, year, current_date)? {
            current_date = Some(shift.date);
            shifts.push(shift);
        }
    }

    Ok(shifts)
}

/// Strip characters the shift grammar never uses (OCR noise, separators,
/// mangled umlauts) and collapse whitespace runs to single spaces.
fn sanitize(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '*' | ':' | '.') || c.is_whitespace()
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_error(line: &str, reason: impl Into<String>) -> ShiftCalError {
    ShiftCalError::Parse {
        line: line.to_string(),
        reason: reason.into(),
    }
}

/// Parse one sanitized, non-empty line into a shift, `None` for tolerated
/// non-shift lines.
fn parse_line(
    line: &str,
    year: i32,
    current_date: Option<NaiveDate>,
) -> ShiftCalResult<Option<Shift>> {
    let tokens: Vec<&str> = line.split(' ').collect();

    // Dated line: the first token that reads as a `DD.MM` date starts the
    // record. Anything before it (weekday abbreviations like `Mi.`, OCR
    // fragments fused onto the digits) is advisory and discarded; the
    // stated weekday is never checked against the computed one.
    if let Some((idx, (day, month))) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| date_token(t).map(|dm| (i, dm)))
    {
        let rest = &tokens[idx + 1..];
        if rest.len() < 2 || !time_like(rest[0]) || !time_like(rest[1]) {
            // A date without a time pair is a day header, not a shift.
            return Ok(None);
        }

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            parse_error(line, format!("no such date {:02}.{:02} in {}", day, month, year))
        })?;
        let start_time = parse_time_strict(rest[0], line)?;
        let end_time = parse_time_strict(rest[1], line)?;

        return Ok(match normalize_description(&rest[2..].join(" ")) {
            Some(description) => Some(Shift {
                date,
                start_time,
                end_time,
                description,
            }),
            None => None,
        });
    }

    // Continuation line: a time pair with no date of its own, inheriting
    // the date of the most recent dated line.
    if time_like(tokens[0]) && tokens.len() >= 2 && time_like(tokens[1]) {
        let date = current_date
            .ok_or_else(|| parse_error(line, "time entry before any dated line"))?;
        let start_time = parse_time_strict(tokens[0], line)?;
        let end_time = parse_time_strict(tokens[1], line)?;

        return Ok(match normalize_description(&tokens[2..].join(" ")) {
            Some(description) => Some(Shift {
                date,
                start_time,
                end_time,
                description,
            }),
            None => None,
        });
    }

    Ok(None)
}

/// Try to read a `D[D].M[M]` date token.
///
/// Tolerated around the digits: a fused non-digit prefix (`DF30.04`), a
/// trailing dot (`30.04.`), and an explicit year part (`30.04.2025`) whose
/// digits are ignored because the injected year always wins.
fn date_token(token: &str) -> Option<(u32, u32)> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let mut parts: Vec<&str> = token[start..].split('.').collect();

    if parts.last() == Some(&"") {
        parts.pop();
    }
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let day = date_component(parts[0])?;
    let month = date_component(parts[1])?;
    if let Some(year) = parts.get(2) {
        if year.len() < 2 || year.len() > 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    Some((day, month))
}

fn date_component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether a token is plausibly a time value, deciding the line's shape.
/// Actual validity is checked by [`parse_time`] afterwards.
fn time_like(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
        && token.chars().any(|c| c.is_ascii_digit())
}

fn parse_time_strict(token: &str, line: &str) -> ShiftCalResult<NaiveTime> {
    parse_time(token)
        .ok_or_else(|| parse_error(line, format!("unrecognized time '{}'", token)))
}

/// Parse a 24-hour time token.
///
/// `HH:MM` is the documented form; a `.` separator, a missing separator
/// (`1700`), and a bare hour (`17`) are accepted because OCR output loses
/// colons routinely. Out-of-range values are rejected.
fn parse_time(token: &str) -> Option<NaiveTime> {
    let (hour, minute) = if let Some((h, m)) = token.split_once(&[':', '.'][..]) {
        if m.len() != 2 {
            return None;
        }
        (h.parse().ok()?, m.parse().ok()?)
    } else if token.len() == 3 || token.len() == 4 {
        let (h, m) = token.split_at(token.len() - 2);
        (h.parse().ok()?, m.parse().ok()?)
    } else {
        (token.parse().ok()?, 0)
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Normalize the free-text remainder of a shift line.
///
/// A `*` anywhere marks the shift special and is folded into a single
/// trailing asterisk. Returns `None` for names still containing digits or
/// colons: those are misread time data, and the line is dropped rather
/// than turned into a bogus record.
fn normalize_description(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let special = trimmed.contains('*');

    let name = trimmed.replace('*', "");
    let name = name.trim();
    if name.chars().any(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    Some(if special {
        format!("{}*", name)
    } else {
        name.to_string()
    })
}
