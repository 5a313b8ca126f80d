//! Phone mask: `(DD) DDDDD-DDDD`.

use crate::domain::model::DisplayValue;
use crate::domain::ports::DisplayPipe;
use regex::Regex;
use std::sync::LazyLock;

/// Area code, then up to five digits, then up to four. The middle group is
/// lazy so a ten-digit landline splits as 4+4 and an eleven-digit mobile as 5+4.
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{0,5}?)(\d{0,4})$").unwrap());

pub const EMPTY_PHONE: &str = "-";

/// Masks a raw phone number.
///
/// Returns `"-"` for a missing or empty input. When the digits of `raw` do not
/// fit the area-code shape the original `raw` text is returned untouched.
pub fn format_phone(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return EMPTY_PHONE.to_string(),
    };

    let cleaned: String = raw.chars().filter(char::is_ascii_digit).collect();

    match PHONE_SHAPE.captures(&cleaned) {
        Some(caps) => format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneMask;

impl DisplayPipe for PhoneMask {
    fn transform(&self, value: &DisplayValue) -> String {
        if value.is_falsy() {
            return EMPTY_PHONE.to_string();
        }
        format_phone(Some(value.to_string().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_phone_is_dash() {
        assert_eq!(format_phone(None), "-");
        assert_eq!(format_phone(Some("")), "-");
        assert_eq!(PhoneMask.transform(&DisplayValue::Null), "-");
    }

    #[test]
    fn test_mobile_and_landline() {
        assert_eq!(format_phone(Some("11987654321")), "(11) 98765-4321");
        assert_eq!(format_phone(Some("2134567890")), "(21) 3456-7890");
    }

    #[test]
    fn test_separators_are_stripped() {
        assert_eq!(format_phone(Some("+55 (11) 9876-54321")), "+55 (11) 9876-54321");
        assert_eq!(format_phone(Some("(11) 98765-4321")), "(11) 98765-4321");
        assert_eq!(format_phone(Some("21 3456 7890")), "(21) 3456-7890");
    }

    #[test]
    fn test_short_numbers_fill_last_group_first() {
        assert_eq!(format_phone(Some("11")), "(11) -");
        assert_eq!(format_phone(Some("119876")), "(11) -9876");
        assert_eq!(format_phone(Some("1198765")), "(11) 9-8765");
    }

    #[test]
    fn test_unmatched_input_is_returned_as_is() {
        assert_eq!(format_phone(Some("abc")), "abc");
        assert_eq!(format_phone(Some("1")), "1");
        assert_eq!(format_phone(Some("119876543210")), "119876543210");
    }

    #[test]
    fn test_pipe_stringifies_numbers() {
        assert_eq!(PhoneMask.transform(&DisplayValue::Integer(11987654321)), "(11) 98765-4321");
        assert_eq!(PhoneMask.transform(&DisplayValue::Integer(0)), "-");
    }
}
