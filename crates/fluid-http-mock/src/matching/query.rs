//! Query parameter parsing and comparison.

use crate::types::fingerprint::QueryParams;

/// Parse query string into a map with URL decoding.
pub fn parse_query_string(query_str: &str) -> QueryParams {
    let mut result = QueryParams::new();

    for pair in query_str.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key);
        let value = decode(value);

        // Multiple values for the same key
        if let Some(existing) = result.get_mut(&key) {
            existing.push(',');
            existing.push_str(&value);
        } else {
            result.insert(key, value);
        }
    }

    result
}

fn decode(raw: &str) -> String {
    // Form encoding uses '+' for spaces
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}

/// Query parameters must be equal as maps; order never matters.
pub fn query_matches(expected: &QueryParams, actual: &QueryParams) -> bool {
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn q(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[rstest]
    #[case("", &[])]
    #[case("page=1", &[("page", "1")])]
    #[case("page=1&limit=10", &[("page", "1"), ("limit", "10")])]
    #[case("key=value%20with%20spaces", &[("key", "value with spaces")])]
    #[case("key=a+b", &[("key", "a b")])]
    #[case("key%20name=value", &[("key name", "value")])]
    #[case("page=1&page=2", &[("page", "1,2")])]
    #[case("page=1&&limit=10", &[("page", "1"), ("limit", "10")])]
    #[case("&page=1&limit=10&", &[("page", "1"), ("limit", "10")])]
    #[case("page=&limit=10", &[("page", ""), ("limit", "10")])]
    #[case("page&limit=10", &[("page", ""), ("limit", "10")])]
    #[case("expr=a=b", &[("expr", "a=b")])]
    fn test_parse_query_string(#[case] query_str: &str, #[case] expected: &[(&str, &str)]) {
        assert_eq!(parse_query_string(query_str), q(expected));
    }

    #[rstest]
    #[case(&[], &[], true)]
    #[case(&[("page", "1")], &[("page", "1")], true)]
    #[case(&[("a", "1"), ("b", "2")], &[("b", "2"), ("a", "1")], true)]
    #[case(&[("page", "1")], &[("page", "2")], false)]
    #[case(&[("page", "1")], &[("page", "1"), ("limit", "10")], false)]
    #[case(&[], &[("page", "1")], false)]
    fn test_query_matches(
        #[case] expected: &[(&str, &str)],
        #[case] actual: &[(&str, &str)],
        #[case] matches: bool,
    ) {
        assert_eq!(query_matches(&q(expected), &q(actual)), matches);
    }
}
