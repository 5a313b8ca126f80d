//! Pagination and sort parameters for the person list endpoint.

use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;
pub const PERSONS_ROUTE: &str = "persons";

/// Query key the person API reads the name filter from.
pub const NAME_FILTER_PARAM: &str = "name";

static SORT_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+:(asc|desc)$").unwrap());

/// Missing, zero and negative limits fall back to [`DEFAULT_LIMIT`].
pub fn validate_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_LIMIT,
    }
}

/// Missing, zero and negative pages fall back to [`DEFAULT_PAGE`].
pub fn validate_page(page: Option<i64>) -> i64 {
    match page {
        Some(page) if page > 0 => page,
        _ => DEFAULT_PAGE,
    }
}

/// Returns the trimmed `field:asc|desc` sort, or `None` when it is blank or
/// malformed. Malformed specs are logged and otherwise ignored.
pub fn validate_sort(sort_by: Option<&str>) -> Option<String> {
    let trimmed = sort_by.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return None;
    }

    if SORT_SPEC.is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    tracing::warn!(
        "Invalid 'sortBy' parameter: '{}'. Expected format 'field:asc' or 'field:desc'",
        trimmed
    );
    None
}

/// Joins a route onto the API base the way the REST client addresses resources.
pub fn resource_url(base: &str, route: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), route))?;
    Ok(url)
}

pub fn person_route(id: i64) -> String {
    format!("{}/{}", PERSONS_ROUTE, id)
}

/// A list request, validated when it is turned into query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `name` and `sortBy` are omitted when blank or invalid; `limit` and
    /// `page` are always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                pairs.push((NAME_FILTER_PARAM, name.to_string()));
            }
        }

        if let Some(sort_by) = validate_sort(self.sort_by.as_deref()) {
            pairs.push(("sortBy", sort_by));
        }

        pairs.push(("limit", validate_limit(self.limit).to_string()));
        pairs.push(("page", validate_page(self.page).to_string()));

        pairs
    }

    pub fn to_url(&self, base: &str) -> Result<Url> {
        let mut url = resource_url(base, PERSONS_ROUTE)?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        tracing::debug!("List query URL: {}", url);
        Ok(url)
    }
}
