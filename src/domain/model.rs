use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value handed to a display pipe.
///
/// Formatters never mutate the value; they derive a new string from it.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl DisplayValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DisplayValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DisplayValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `Null`, the empty string, `false`, zero and NaN.
    pub fn is_falsy(&self) -> bool {
        match self {
            DisplayValue::Null => true,
            DisplayValue::Text(s) => s.is_empty(),
            DisplayValue::Integer(n) => *n == 0,
            DisplayValue::Float(f) => *f == 0.0 || f.is_nan(),
            DisplayValue::Bool(b) => !b,
            DisplayValue::Date(_) | DisplayValue::DateTime(_) => false,
        }
    }

    /// Numeric zero, which the pipes treat differently from other falsy values.
    pub fn is_zero(&self) -> bool {
        match self {
            DisplayValue::Integer(n) => *n == 0,
            DisplayValue::Float(f) => *f == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Null => write!(f, "null"),
            DisplayValue::Text(s) => write!(f, "{}", s),
            DisplayValue::Integer(n) => write!(f, "{}", n),
            DisplayValue::Float(v) if v.is_infinite() => {
                write!(f, "{}", if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Negative zero prints as "0".
            DisplayValue::Float(v) if *v == 0.0 => write!(f, "0"),
            DisplayValue::Float(v) => write!(f, "{}", v),
            DisplayValue::Bool(b) => write!(f, "{}", b),
            DisplayValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DisplayValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::Text(value.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        DisplayValue::Text(value)
    }
}

impl From<&String> for DisplayValue {
    fn from(value: &String) -> Self {
        DisplayValue::Text(value.clone())
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        DisplayValue::Integer(value)
    }
}

impl From<i32> for DisplayValue {
    fn from(value: i32) -> Self {
        DisplayValue::Integer(value.into())
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Float(value)
    }
}

impl From<bool> for DisplayValue {
    fn from(value: bool) -> Self {
        DisplayValue::Bool(value)
    }
}

impl From<NaiveDate> for DisplayValue {
    fn from(value: NaiveDate) -> Self {
        DisplayValue::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for DisplayValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DisplayValue::DateTime(value)
    }
}

impl<T: Into<DisplayValue>> From<Option<T>> for DisplayValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DisplayValue::Null)
    }
}

impl From<&serde_json::Value> for DisplayValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DisplayValue::Null,
            serde_json::Value::Bool(b) => DisplayValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => DisplayValue::Integer(i),
                None => DisplayValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => DisplayValue::Text(s.clone()),
            other => DisplayValue::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Value> for DisplayValue {
    fn from(value: serde_json::Value) -> Self {
        DisplayValue::from(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<serde_json::Value>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: String,
}

impl Person {
    /// Looks a field up by its wire name, as table columns reference them.
    pub fn field(&self, name: &str) -> DisplayValue {
        match name {
            "id" => self.id.into(),
            "photo" => self.photo.as_ref().map(DisplayValue::from).into(),
            "name" => (&self.name).into(),
            "email" => self.email.as_ref().into(),
            "phone" => (&self.phone).into(),
            "birthDate" => (&self.birth_date).into(),
            _ => DisplayValue::Null,
        }
    }
}

/// Body sent when creating or editing a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub page: i64,
    pub limit: i64,
    /// Total number of items, not only those on this page.
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_stringify() {
        assert_eq!(DisplayValue::Integer(0).to_string(), "0");
        assert_eq!(DisplayValue::Float(5.5).to_string(), "5.5");
        assert_eq!(DisplayValue::Float(5.0).to_string(), "5");
        assert_eq!(DisplayValue::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(DisplayValue::Float(-0.0).to_string(), "0");
        // Plain decimal notation, never an exponent.
        assert_eq!(DisplayValue::Float(1e21).to_string(), "1000000000000000000000");
        assert_eq!(DisplayValue::Float(1e-7).to_string(), "0.0000001");
        assert_eq!(DisplayValue::Bool(false).to_string(), "false");
        assert_eq!(DisplayValue::Null.to_string(), "null");
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(DisplayValue::Date(date).to_string(), "2024-12-25");
    }

    #[test]
    fn test_display_value_from_json() {
        assert_eq!(DisplayValue::from(serde_json::json!(null)), DisplayValue::Null);
        assert_eq!(DisplayValue::from(serde_json::json!(7)), DisplayValue::Integer(7));
        assert_eq!(DisplayValue::from(serde_json::json!(1.5)), DisplayValue::Float(1.5));
        assert_eq!(
            DisplayValue::from(serde_json::json!([1, 2])),
            DisplayValue::Text("[1,2]".to_string())
        );
        assert_eq!(DisplayValue::from(None::<&str>), DisplayValue::Null);
    }

    #[test]
    fn test_person_wire_format() {
        let person: Person = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Ana Souza",
            "phone": "11987654321",
            "birthDate": "1990-04-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(person.id, Some(3));
        assert_eq!(person.email, None);
        assert_eq!(person.field("birthDate").as_text(), Some("1990-04-01T00:00:00.000Z"));
        assert!(person.field("email").is_null());
        assert!(person.field("unknown").is_null());

        let json = serde_json::to_value(&person).unwrap();
        assert!(json.get("birthDate").is_some());
        assert!(json.get("photo").is_none());
    }

    #[test]
    fn test_paginated_response() {
        let page: PaginatedResponse<Person> = serde_json::from_value(serde_json::json!({
            "results": [{"name": "Rui", "phone": "", "birthDate": ""}],
            "page": 1,
            "limit": 10,
            "count": 1
        }))
        .unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.count, 1);
    }
}
