//! Merging of existing ICS documents.

use crate::error::{ShiftCalError, ShiftCalResult};
use icalendar::{Calendar, CalendarComponent, Property};

/// Merge the VEVENT blocks of several ICS documents into one calendar.
///
/// Events are re-emitted wholesale; nothing inside them is inspected or
/// rewritten, so UIDs and alarms survive the merge unchanged.
pub fn merge_ics(contents: &[String]) -> ShiftCalResult<String> {
    let mut merged = Calendar::new();
    merged.append_property(Property::new("METHOD", "PUBLISH"));

    for content in contents {
        let cal: Calendar = content.parse().map_err(ShiftCalError::IcsParse)?;
        for component in cal.components {
            if let CalendarComponent::Event(event) = component {
                merged.push(event);
            }
        }
    }

    Ok(super::generate::brand_output(&merged.done().to_string()))
}
