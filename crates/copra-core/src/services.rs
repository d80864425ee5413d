//! Service-name resolution
//!
//! The `service_name` parameter is either the wildcard `all` or a
//! comma-separated list. Lists are trimmed but not deduplicated; every
//! name must exist in at least one of the relevant service lists or the
//! whole request is rejected.

use copra_common::{ALL_SERVICES, split_service_names};

/// Parsed form of a `service_name` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceSelection {
    /// Every service known to the relevant setup(s)
    All,
    /// An explicit, order-preserving, possibly repeating list
    Named(Vec<String>),
}

impl ServiceSelection {
    pub fn parse(param: &str) -> Self {
        if param.trim().eq_ignore_ascii_case(ALL_SERVICES) {
            ServiceSelection::All
        } else {
            ServiceSelection::Named(split_service_names(param))
        }
    }
}

/// Names absent from every one of the given known-service lists
pub fn invalid_names(names: &[String], known: &[&[String]]) -> Vec<String> {
    names
        .iter()
        .filter(|name| !known.iter().any(|list| list.contains(name)))
        .cloned()
        .collect()
}

/// Union of two service lists preserving first-seen order
pub fn union_preserving_order(first: &[String], second: &[String]) -> Vec<String> {
    let mut union: Vec<String> = first.to_vec();
    for name in second {
        if !union.contains(name) {
            union.push(name.clone());
        }
    }
    union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_is_case_insensitive() {
        assert_eq!(ServiceSelection::parse("all"), ServiceSelection::All);
        assert_eq!(ServiceSelection::parse("ALL"), ServiceSelection::All);
        assert_eq!(ServiceSelection::parse(" All "), ServiceSelection::All);
    }

    #[test]
    fn test_parse_list_keeps_order_and_duplicates() {
        assert_eq!(
            ServiceSelection::parse("b, a ,b"),
            ServiceSelection::Named(names(&["b", "a", "b"]))
        );
    }

    #[test]
    fn test_invalid_names_checks_every_list() {
        let source = names(&["auth", "billing"]);
        let dest = names(&["auth", "ledger"]);
        let requested = names(&["auth", "ledger", "ghost"]);
        assert_eq!(
            invalid_names(&requested, &[source.as_slice(), dest.as_slice()]),
            names(&["ghost"])
        );
    }

    #[test]
    fn test_empty_segment_is_invalid() {
        let known = names(&["auth"]);
        let requested = names(&["auth", ""]);
        assert_eq!(invalid_names(&requested, &[known.as_slice()]), names(&[""]));
    }

    #[test]
    fn test_union_preserves_first_seen_order() {
        let a = names(&["auth", "billing"]);
        let b = names(&["ledger", "auth"]);
        assert_eq!(
            union_preserving_order(&a, &b),
            names(&["auth", "billing", "ledger"])
        );
    }
}
