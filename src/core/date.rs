//! Date display: everything ends up as `DD/MM/YYYY`, `-` or `Data inválida`.

use crate::domain::model::DisplayValue;
use crate::domain::ports::{DateParser, DisplayPipe};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

pub const EMPTY_DATE: &str = "-";
pub const INVALID_DATE: &str = "Data inválida";
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Digit-range check only; `31/02/2024` passes.
static FORMATTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/\d{4}$").unwrap()
});

static BR_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses `DD/MM/YYYY` strictly: two-digit day and month, four-digit year and
/// a real calendar day.
pub fn parse_br_date(input: &str) -> Option<NaiveDate> {
    if !BR_DATE_SHAPE.is_match(input) {
        return None;
    }
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT).ok()
}

/// Default parser backed by chrono.
///
/// Accepts RFC 3339 / ISO-8601 datetimes (the calendar date is read in the
/// value's own offset, never shifted to local time), naive ISO datetimes,
/// `YYYY-MM-DD`, strict `DD/MM/YYYY`, chrono date values and integers as Unix
/// epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser;

impl ChronoDateParser {
    fn parse_text(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.date_naive());
        }
        for format in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, format) {
                return Some(dt.date_naive());
            }
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt.date());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Some(date);
        }
        parse_br_date(text)
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, value: &DisplayValue) -> Option<NaiveDate> {
        match value {
            DisplayValue::Date(date) => Some(*date),
            DisplayValue::DateTime(dt) => Some(dt.date_naive()),
            DisplayValue::Integer(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.date_naive())
            }
            DisplayValue::Float(millis) if millis.is_finite() => {
                DateTime::from_timestamp_millis(millis.trunc() as i64).map(|dt| dt.date_naive())
            }
            DisplayValue::Text(text) => self.parse_text(text),
            _ => None,
        }
    }
}

fn is_absent(value: &DisplayValue) -> bool {
    value.is_falsy() || matches!(value.as_text(), Some("-") | Some("null"))
}

#[derive(Debug, Clone, Default)]
pub struct DateFormat<P: DateParser = ChronoDateParser> {
    parser: P,
}

impl DateFormat<ChronoDateParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DateParser> DateFormat<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn format(&self, value: &DisplayValue) -> String {
        if is_absent(value) {
            return EMPTY_DATE.to_string();
        }

        let text = value.to_string();
        if FORMATTED_DATE.is_match(&text) {
            return text;
        }

        match self.parser.parse(value) {
            Some(date) => date.format(DISPLAY_FORMAT).to_string(),
            None => {
                tracing::debug!("Could not parse '{}' as a date", text);
                INVALID_DATE.to_string()
            }
        }
    }
}

impl<P: DateParser> DisplayPipe for DateFormat<P> {
    fn transform(&self, value: &DisplayValue) -> String {
        self.format(value)
    }
}

/// Formats any date-like value as `DD/MM/YYYY` with the default parser.
pub fn format_date<V: Into<DisplayValue>>(value: V) -> String {
    DateFormat::new().format(&value.into())
}
