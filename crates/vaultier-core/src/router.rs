//! Path router: pattern-based destination routing for migrations.
//!
//! Migration rules arrive as a JSON plan:
//! `{"schemes": [{"from": .., "to": .., "subschemes": [{"by": [regex, ..], "to": suffix}]}]}`.
//! Routing is a pure function of the secret name and the rule set.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::join_paths;

/// One group of patterns mapping matching secret names to a destination
/// suffix under the scheme's `to` path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscheme {
    /// Regex patterns, combined by alternation and matched at name start.
    #[serde(rename = "by")]
    pub patterns: Vec<String>,

    /// Destination suffix relative to the scheme's `to` path.
    #[serde(rename = "to")]
    pub destination: String,
}

/// One migration rule: everything under `from` is re-routed under `to`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    #[serde(rename = "from")]
    pub from_path: String,

    #[serde(rename = "to")]
    pub to_path: String,

    /// Optional subfolder routing; without it every secret lands at `to`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subschemes: Option<Vec<Subscheme>>,
}

/// A full migration plan, the top-level rule file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub schemes: Vec<Scheme>,
}

/// Decide the destination path for one secret name.
///
/// Subschemes are tried in list order; each one's patterns are joined as an
/// alternation and matched anchored at the start of the name (a prefix match
/// counts). First match wins. `Ok(None)` means the secret is dropped from
/// migration; that is an explicit outcome, not an error.
pub fn route(
    secret_name: &str,
    to_path: &str,
    subschemes: Option<&[Subscheme]>,
) -> Result<Option<String>> {
    let Some(subschemes) = subschemes.filter(|s| !s.is_empty()) else {
        return Ok(Some(to_path.to_string()));
    };
    for subscheme in subschemes {
        let pattern = format!("^(?:{})", subscheme.patterns.join("|"));
        if Regex::new(&pattern)?.is_match(secret_name) {
            return Ok(Some(join_paths(to_path, &subscheme.destination)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultierError;

    fn subscheme(patterns: &[&str], destination: &str) -> Subscheme {
        Subscheme {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_no_subschemes_routes_to_new_path() {
        let routed = route("anything", "new/path", None).expect("route");
        assert_eq!(routed.as_deref(), Some("new/path"));

        let routed = route("anything", "new/path", Some(&[])).expect("route");
        assert_eq!(routed.as_deref(), Some("new/path"));
    }

    #[test]
    fn test_first_matching_subscheme_wins() {
        let subschemes = [
            subscheme(&[".*CLOUDSTACK.*"], "cloudstack"),
            subscheme(&[".*"], "other"),
        ];
        let routed = route("vm-CLOUDSTACK-01", "new", Some(&subschemes)).expect("route");
        assert_eq!(routed.as_deref(), Some("new/cloudstack"));

        let routed = route("vm-OTHER-01", "new", Some(&subschemes)).expect("route");
        assert_eq!(routed.as_deref(), Some("new/other"));
    }

    #[test]
    fn test_unmatched_name_is_dropped() {
        let subschemes = [subscheme(&["^X"], "x")];
        let routed = route("unmatched", "new", Some(&subschemes)).expect("route");
        assert_eq!(routed, None);
    }

    #[test]
    fn test_prefix_match_counts() {
        // Anchored at start only; the pattern need not cover the whole name.
        let subschemes = [subscheme(&["db"], "databases")];
        let routed = route("db-primary", "new", Some(&subschemes)).expect("route");
        assert_eq!(routed.as_deref(), Some("new/databases"));

        let routed = route("mydb", "new", Some(&subschemes)).expect("route");
        assert_eq!(routed, None);
    }

    #[test]
    fn test_patterns_join_as_alternation() {
        let subschemes = [subscheme(&["alpha", "beta"], "greek")];
        for name in ["alpha-1", "beta-2"] {
            let routed = route(name, "new", Some(&subschemes)).expect("route");
            assert_eq!(routed.as_deref(), Some("new/greek"));
        }
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let subschemes = [subscheme(&["("], "broken")];
        let err = route("name", "new", Some(&subschemes)).expect_err("bad regex");
        assert!(matches!(err, VaultierError::Pattern(_)));
    }

    #[test]
    fn test_plan_deserializes_rule_file_format() {
        let raw = r#"{
            "schemes": [
                {
                    "from": "old/path",
                    "to": "new/path",
                    "subschemes": [{"by": [".*CLOUDSTACK.*"], "to": "cloudstack"}]
                },
                {"from": "old/flat", "to": "new/flat"}
            ]
        }"#;
        let plan: MigrationPlan = serde_json::from_str(raw).expect("parse");
        assert_eq!(plan.schemes.len(), 2);
        assert_eq!(plan.schemes[0].from_path, "old/path");
        let subschemes = plan.schemes[0].subschemes.as_ref().expect("subschemes");
        assert_eq!(subschemes[0].patterns, vec![".*CLOUDSTACK.*".to_string()]);
        assert_eq!(subschemes[0].destination, "cloudstack");
        assert!(plan.schemes[1].subschemes.is_none());
    }
}
