use crate::domain::model::DisplayValue;
use crate::domain::ports::DisplayPipe;

pub const DEFAULT_FALLBACK: &str = "-";

/// Empty-like: any falsy value or the literal text `"null"`. Numeric zero is
/// never empty.
fn is_empty_like(value: &DisplayValue) -> bool {
    if value.is_zero() {
        return false;
    }
    value.is_falsy() || value.as_text() == Some("null")
}

/// Shows `fallback` in place of empty-like values, otherwise the trimmed text.
pub fn display_or<V: Into<DisplayValue>>(value: V, fallback: &str) -> String {
    DashOnNull::with_fallback(fallback).transform(&value.into())
}

pub fn display_or_dash<V: Into<DisplayValue>>(value: V) -> String {
    display_or(value, DEFAULT_FALLBACK)
}

#[derive(Debug, Clone)]
pub struct DashOnNull {
    fallback: String,
}

impl DashOnNull {
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK)
    }

    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }
}

impl Default for DashOnNull {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPipe for DashOnNull {
    fn transform(&self, value: &DisplayValue) -> String {
        if is_empty_like(value) {
            return self.fallback.clone();
        }
        value.to_string().trim().to_string()
    }
}
