use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub include_seconds: bool,
    pub use_24_hour: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_seconds: true,
            use_24_hour: true,
        }
    }
}

pub fn format_time(time: &NaiveDateTime, options: FormatOptions) -> String {
    let pattern = match (options.use_24_hour, options.include_seconds) {
        (true, true) => "%H:%M:%S",
        (true, false) => "%H:%M",
        (false, true) => "%-I:%M:%S %p",
        (false, false) => "%-I:%M %p",
    };
    time.format(pattern).to_string()
}

pub fn format_date(date: &NaiveDate, short: bool) -> String {
    let pattern = if short { "%b %-d, %Y" } else { "%A, %B %-d, %Y" };
    date.format(pattern).to_string()
}

pub fn day_of_year(date: &NaiveDate) -> u32 {
    date.ordinal()
}
