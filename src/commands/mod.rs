//! Commands Layer
//!
//! Async handlers that bridge the UI shell to the stores. Arguments arrive
//! as raw form strings; errors go back as display strings.

mod dashboard_cmd;
mod lead_cmd;
mod task_cmd;

#[cfg(test)]
mod tests;

pub use dashboard_cmd::*;
pub use lead_cmd::*;
pub use task_cmd::*;

use crate::domain::CalendarDate;

fn parse_date(raw: &str) -> Result<CalendarDate, String> {
    CalendarDate::parse(raw.trim()).map_err(|e| e.to_string())
}

/// Parse an enum-valued form field
fn parse_field<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| e.to_string())
}
