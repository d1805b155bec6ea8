//! List filter and its query-string encoding.
//!
//! Only the keys in [`LIST_QUERY_KEYS`] ever reach the wire. Anything else a
//! caller hands to [`ListFilter::from_params`] is dropped silently.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::FilterError;
use crate::types::TodoState;

/// Filter keys forwarded to the list endpoint.
pub const LIST_QUERY_KEYS: [&str; 4] = ["state", "page", "page_size", "q"];

// Unreserved characters per RFC 3986 stay readable.
pub(crate) const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Category and paging parameters for a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub state: Option<TodoState>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub q: Option<String>,
}

impl ListFilter {
    pub fn by_state(state: TodoState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// Build a filter from loosely typed key/value pairs, e.g. a router's
    /// query map. Unrecognized keys are ignored; a recognized key whose value
    /// does not parse is an error.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = || FilterError {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "state" => filter.state = Some(value.parse().map_err(|_| invalid())?),
                "page" => filter.page = Some(value.parse().map_err(|_| invalid())?),
                "page_size" => filter.page_size = Some(value.parse().map_err(|_| invalid())?),
                "q" => filter.q = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(filter)
    }

    /// Key/value pairs for every field that is set, in `LIST_QUERY_KEYS` order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state {
            pairs.push(("state", state.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }

    /// `key=value&...` with percent-encoded values, empty when nothing is set.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={}", utf8_percent_encode(&value, URI_COMPONENT)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_empty_query() {
        assert_eq!(ListFilter::default().to_query_string(), "");
    }

    #[test]
    fn from_params_drops_unknown_keys() {
        let filter = ListFilter::from_params([
            ("state", "ongoing"),
            ("router", "/board"),
            ("page", "2"),
            ("sort", "desc"),
        ])
        .unwrap();
        assert_eq!(filter.state, Some(TodoState::Ongoing));
        assert_eq!(filter.page, Some(2));
        assert_eq!(filter.to_query_string(), "state=ongoing&page=2");
    }

    #[test]
    fn from_params_rejects_bad_recognized_value() {
        let err = ListFilter::from_params([("page_size", "lots")]).unwrap_err();
        assert_eq!(err.key, "page_size");
        assert_eq!(err.value, "lots");

        assert!(ListFilter::from_params([("state", "blocked")]).is_err());
    }

    #[test]
    fn search_term_is_percent_encoded() {
        let filter = ListFilter {
            q: Some("buy milk & eggs".to_string()),
            ..ListFilter::default()
        };
        assert_eq!(filter.to_query_string(), "q=buy%20milk%20%26%20eggs");
    }

    #[test]
    fn every_emitted_key_is_recognized() {
        let filter = ListFilter {
            state: Some(TodoState::Archived),
            page: Some(1),
            page_size: Some(50),
            q: Some("x".to_string()),
        };
        for (key, _) in filter.pairs() {
            assert!(LIST_QUERY_KEYS.contains(&key));
        }
        assert_eq!(filter.pairs().len(), LIST_QUERY_KEYS.len());
    }
}
