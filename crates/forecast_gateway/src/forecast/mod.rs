pub mod condition;
pub mod fields;
pub mod mapper;
pub mod query;
pub mod service;

pub use condition::{condition_label, Condition};
pub use fields::{join_fields, parse_fields, ForecastField, UnknownField};
pub use mapper::{map_daily_forecast, DailyEntry, DailyForecast, DailyValues, LocationInfo};
pub use query::*;
pub use service::{Error, ForecastService};

use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// `YYYY-MM-DD`, the date format used both towards TMD and in responses
pub fn calendar_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}
