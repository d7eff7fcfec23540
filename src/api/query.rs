//! User-selected filters for list endpoints.

use std::collections::BTreeMap;

/// Sentinel a filter control uses for "no filter".
pub const ALL_SENTINEL: &str = "all";

/// Scalar value of a single filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Absent,
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl FilterValue {
    /// Value as it goes on the wire, or `None` when it means "no filter".
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(s) if s.is_empty() || s == ALL_SENTINEL => None,
            Self::Text(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Filter name → value mapping for a list request.
///
/// Entries that mean "no filter" (absent, empty, `"all"`) are kept in the
/// mapping but never serialized. Retained entries serialize in name order.
///
/// ```rust
/// use talentboard::api::ResourceQuery;
///
/// let query = ResourceQuery::new()
///     .filter("category", "all")
///     .filter("location", "")
///     .filter("seniority", "senior");
/// assert_eq!(query.to_query_string(), "seniority=senior");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    filters: BTreeMap<String, FilterValue>,
}

impl ResourceQuery {
    /// Empty query (fetch unfiltered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search query, `search=<text>`.
    pub fn search(text: impl Into<String>) -> Self {
        Self::new().filter("search", text.into())
    }

    /// Set a filter, replacing any previous value for `name`.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a filter in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.insert(name.into(), value.into());
    }

    /// Entries that will be serialized.
    pub fn retained(&self) -> impl Iterator<Item = (&str, String)> {
        self.filters
            .iter()
            .filter_map(|(name, value)| value.to_query_value().map(|v| (name.as_str(), v)))
    }

    /// Whether no entry survives serialization.
    pub fn is_unfiltered(&self) -> bool {
        self.retained().next().is_none()
    }

    /// URL-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.retained())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceQuery
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (name, value) in iter {
            query.set(name, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_dropped() {
        let query = ResourceQuery::new()
            .filter("category", "all")
            .filter("location", "")
            .filter("seniority", "senior");

        let retained: Vec<_> = query.retained().collect();
        assert_eq!(retained, vec![("seniority", "senior".to_string())]);
        assert_eq!(query.to_query_string(), "seniority=senior");
    }

    #[test]
    fn test_absent_values_are_dropped() {
        let query = ResourceQuery::new().filter("type", None::<String>);
        assert!(query.is_unfiltered());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_scalars_and_encoding() {
        let query: ResourceQuery = [
            ("remote", FilterValue::Bool(true)),
            ("minSalary", FilterValue::Integer(50_000)),
            ("location", FilterValue::from("Paris, FR")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            query.to_query_string(),
            "location=Paris%2C+FR&minSalary=50000&remote=true"
        );
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let query = ResourceQuery::new()
            .filter("category", "design")
            .filter("category", "all");
        assert!(query.is_unfiltered());
    }
}
