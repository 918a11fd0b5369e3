//! ICS document generation.

use crate::error::{ShiftCalError, ShiftCalResult};
use crate::shift::Shift;
use chrono::{Duration, NaiveDateTime, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Identifier advertised in the calendar's PRODID line.
const PRODID: &str = "-//shiftcal//EN";

/// Lead time for reminder alarms, in minutes before the shift starts.
const REMINDER_LEAD_MINUTES: i64 = 60;

/// Options controlling calendar generation.
#[derive(Debug, Clone, Default)]
pub struct IcsOptions {
    /// Shifts whose stripped name matches one of these get a display alarm.
    pub reminder_names: Vec<String>,
    /// Advisory timezone hint (X-WR-TIMEZONE). Event times stay floating
    /// local date-times either way; no conversion is performed.
    pub timezone: Option<String>,
}

/// Build a calendar from already-filtered shifts.
///
/// `all_shifts` is the full parsed set; it is only consulted to list
/// overlapping coworker shifts in each event's DESCRIPTION. An empty
/// `shifts` slice is refused with [`ShiftCalError::NoShifts`] so callers
/// can tell "nothing left to write" apart from a parse failure.
pub fn build_calendar(
    shifts: &[Shift],
    all_shifts: &[Shift],
    opts: &IcsOptions,
) -> ShiftCalResult<Calendar> {
    if shifts.is_empty() {
        return Err(ShiftCalError::NoShifts);
    }

    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    if let Some(ref tz) = opts.timezone {
        cal.append_property(Property::new("X-WR-TIMEZONE", tz.as_str()));
    }

    for shift in shifts {
        cal.push(build_event(shift, all_shifts, opts));
    }

    Ok(cal.done())
}

/// Render the calendar for `shifts` as ICS text.
pub fn generate_ics(
    shifts: &[Shift],
    all_shifts: &[Shift],
    opts: &IcsOptions,
) -> ShiftCalResult<String> {
    let cal = build_calendar(shifts, all_shifts, opts)?;
    Ok(brand_output(&cal.to_string()))
}

/// Write the rendered calendar to `path` in one sequential write.
///
/// Nothing is written when generation fails.
pub fn write_ics(
    path: &Path,
    shifts: &[Shift],
    all_shifts: &[Shift],
    opts: &IcsOptions,
) -> ShiftCalResult<()> {
    let content = generate_ics(shifts, all_shifts, opts)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn build_event(shift: &Shift, all_shifts: &[Shift], opts: &IcsOptions) -> icalendar::Event {
    let mut event = icalendar::Event::new();

    event.uid(&event_uid(shift));
    // Specials keep their `*` suffix as a visual marker in the title.
    event.summary(&shift.description);

    // Floating local date-times; the end lands on the next calendar day
    // for midnight-spanning shifts.
    event.add_property("DTSTART", format_floating(&shift.start()));
    event.add_property("DTEND", format_floating(&shift.end()));

    let now = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    event.add_property("DTSTAMP", &now);
    event.add_property("CREATED", &now);

    if shift.is_special() {
        event.add_property("CATEGORIES", "WORK,SPECIAL");
    } else {
        event.add_property("CATEGORIES", "WORK");
    }

    let overlaps = overlap_lines(shift, all_shifts);
    if !overlaps.is_empty() {
        event.description(&overlaps.join("\n"));
    }

    if opts.reminder_names.iter().any(|n| n == shift.name()) {
        let trigger = Trigger::before_start(Duration::minutes(REMINDER_LEAD_MINUTES));
        event.alarm(Alarm::display(
            "Reminder: Work shift starting in 1 hour",
            trigger,
        ));
    }

    event.done()
}

/// Deterministic per-record identifier: the start timestamp plus a 32-bit
/// hash of the fields the timestamp does not already pin down.
fn event_uid(shift: &Shift) -> String {
    let mut hasher = DefaultHasher::new();
    shift.description.hash(&mut hasher);
    shift.end().hash(&mut hasher);
    format!(
        "{}-{:08x}@shiftcal",
        shift.start().format("%Y%m%dT%H%M%S"),
        hasher.finish() & 0xffff_ffff
    )
}

fn format_floating(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// One `HH:MM HH:MM name` line per shift overlapping this one.
fn overlap_lines(shift: &Shift, all_shifts: &[Shift]) -> Vec<String> {
    all_shifts
        .iter()
        .filter(|other| *other != shift && shift.overlaps(other))
        .map(|other| {
            format!(
                "{} {} {}",
                other.start_time.format("%H:%M"),
                other.end_time.format("%H:%M"),
                other.description
            )
        })
        .collect()
}

/// Clean up the icalendar crate's rendered output: swap in our PRODID and
/// drop the DTSTAMP/UID lines it places inside VALARM blocks (RFC 5545
/// does not require them there).
pub(crate) fn brand_output(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
