//! Core logic for shiftcal: parsing German shift-plan text, filtering the
//! resulting records, and generating iCalendar documents.
//!
//! The pipeline is strictly one-way: text goes through [`parse_shifts`]
//! into a sequence of [`Shift`] records, optionally through
//! [`filter_shifts`], and finally into an ICS document via the [`ics`]
//! module. Every step is synchronous and side-effect-free except for the
//! generator's single file write.

pub mod error;
pub mod filter;
pub mod ics;
pub mod parse;
pub mod shift;

pub use error::{ShiftCalError, ShiftCalResult};
pub use filter::{filter_shifts, FilterOptions};
pub use ics::{build_calendar, generate_ics, merge_ics, write_ics, IcsOptions};
pub use parse::parse_shifts;
pub use shift::Shift;
