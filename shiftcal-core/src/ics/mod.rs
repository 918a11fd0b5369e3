//! ICS document generation and merging.
//!
//! Rendered output follows RFC 5545. Event times are emitted as floating
//! local date-times; no timezone conversion happens anywhere.

mod generate;
mod merge;

pub use generate::{build_calendar, generate_ics, write_ics, IcsOptions};
pub use merge::merge_ics;
