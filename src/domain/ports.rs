use crate::domain::model::DisplayValue;
use chrono::NaiveDate;

/// Turns a display value into a calendar date, or `None` when it is not a date.
pub trait DateParser: Send + Sync {
    fn parse(&self, value: &DisplayValue) -> Option<NaiveDate>;
}

/// A total value-to-string transformation used when rendering cells.
pub trait DisplayPipe: Send + Sync {
    fn transform(&self, value: &DisplayValue) -> String;
}
