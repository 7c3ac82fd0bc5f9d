//! URL query-string encoding of search state.

/// Query parameters as ordered key/value pairs. Keys may repeat.
pub type QueryParams = Vec<(String, String)>;

pub const QUERY_KEY: &str = "q";
pub const PAGE_KEY: &str = "page";
pub const SORT_KEY: &str = "sort";
pub const ORDER_KEY: &str = "order";
/// `sort` value selecting relevance ordering.
pub const RELEVANCE: &str = "relevance";

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(error) => {
            tracing::debug!(raw, %error, "dropping undecodable query component");
            None
        }
    }
}

/// Split a query string (with or without a leading `?`) into decoded pairs.
///
/// A key without `=` gets an empty value. Pairs that fail to decode are
/// dropped.
#[must_use]
pub fn parse_query_string(query: &str) -> QueryParams {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

/// Percent-encode pairs into a query string without a leading `?`.
#[must_use]
pub fn to_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
