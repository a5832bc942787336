//! Generators for request parameters and catalog data.

/// Splits a raw query string into key/value pairs.
///
/// `+` is decoded as a space and `%XX` escapes are decoded; a key without
/// `=` gets an empty value.
///
/// # Example
///
/// ```
/// use test_utils::query_pairs;
///
/// let pairs = query_pairs("limit=2&filter_platform_types=mobile,insitu");
/// assert_eq!(pairs[0], ("limit".to_string(), "2".to_string()));
/// assert_eq!(pairs[1].1, "mobile,insitu");
/// ```
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Every subset of `tokens`, joined with commas.
///
/// Useful for exhaustive truth-table tests over filter tokens. The empty
/// subset is the empty string.
pub fn token_combinations(tokens: &[&str]) -> Vec<String> {
    (0..1u32 << tokens.len())
        .map(|mask| {
            tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u32 << *i) != 0)
                .map(|(_, t)| *t)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

/// A synthetic catalog with `count` datasets spread over a lon/lat grid.
///
/// Every third dataset is on a mobile platform, every fifth is remote.
pub fn synthetic_catalog_yaml(count: usize) -> String {
    let mut yaml = String::from("datasets:\n");
    for i in 0..count {
        let id = i as i64 + 1;
        let x = -170.0 + (i % 340) as f64;
        let y = -80.0 + (i % 160) as f64;
        let mobile = i % 3 == 0;
        let insitu = i % 5 != 0;
        yaml.push_str(&format!(
            "  - id: {id}\n    domain_id: ts_{id}\n    dataset_type: measurement\n    \
             phenomenon: {{ id: {p}, domain_id: phen_{p} }}\n    \
             procedure: {{ id: {id}, domain_id: proc_{id} }}\n    \
             offering: {{ id: {id}, domain_id: off_{id} }}\n    \
             feature: {{ id: {id}, domain_id: feat_{id}, location: {{ x: {x}, y: {y} }} }}\n    \
             category: {{ id: {p}, domain_id: cat_{p} }}\n    \
             service: {{ id: 1, domain_id: srv }}\n    \
             platform: {{ id: {id}, domain_id: plat_{id}, mobile: {mobile}, insitu: {insitu} }}\n",
            p = i % 7,
        ));
    }
    yaml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_decoding() {
        let pairs = query_pairs("?q=M%C3%BCnster+Nord&expanded");
        assert_eq!(pairs[0], ("q".to_string(), "Münster Nord".to_string()));
        assert_eq!(pairs[1], ("expanded".to_string(), String::new()));
    }

    #[test]
    fn test_query_pairs_keeps_json_braces() {
        let pairs = query_pairs(r#"bbox={"ll":{"x":0,"y":0},"ur":{"x":10,"y":10}}"#);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].1.starts_with('{'));
    }

    #[test]
    fn test_query_pairs_invalid_escape() {
        let pairs = query_pairs("q=100%&x=%zz");
        assert_eq!(pairs[0].1, "100%");
        assert_eq!(pairs[1].1, "%zz");
    }

    #[test]
    fn test_token_combinations() {
        let combos = token_combinations(&["a", "b"]);
        assert_eq!(combos, vec!["", "a", "b", "a,b"]);
        assert_eq!(token_combinations(&["a", "b", "c", "d", "e"]).len(), 32);
    }

    #[test]
    fn test_synthetic_catalog() {
        let yaml = synthetic_catalog_yaml(4);
        assert_eq!(yaml.matches("- id:").count(), 4);
        assert!(yaml.contains("mobile: true"));
    }
}
