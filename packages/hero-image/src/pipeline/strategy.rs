//! Search strategy sequencing.
//!
//! Each subject kind gets a fixed list of query formulations, most specific
//! first. Discovery walks the list until one query yields an acceptable image.

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};
use crate::keywords::{
    CITY_QUERY_EXCLUSIONS, PEOPLE_MARKERS, UNIVERSITY_QUERY_EXCLUSIONS,
};
use crate::types::descriptor::{EntityDescriptor, SubjectKind};

/// One query formulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStrategy {
    label: String,
    query: String,
}

impl SearchStrategy {
    /// Fails when the label or query is blank.
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let query = query.into().trim().to_string();
        if label.trim().is_empty() {
            return Err(DiscoveryError::InvalidStrategy {
                reason: "label must not be empty".to_string(),
            });
        }
        if query.is_empty() {
            return Err(DiscoveryError::InvalidStrategy {
                reason: format!("query for '{}' must not be empty", label),
            });
        }
        Ok(Self { label, query })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// (label, emphasis) pairs for universities, most specific first.
const UNIVERSITY_EMPHASES: &[(&str, &str)] = &[
    (
        "distinctive_building",
        "distinctive campus building exterior daylight real photo",
    ),
    (
        "iconic_landmark",
        "iconic landmark building campus exterior photograph",
    ),
    ("historic_hall", "main historic hall building exterior photo"),
    ("campus_view", "campus grounds buildings exterior view photo"),
    (
        "general_exterior",
        "university building exterior architecture photo",
    ),
];

/// (label, emphasis) pairs for cities, most specific first.
const CITY_EMPHASES: &[(&str, &str)] = &[
    ("skyline", "skyline cityscape many buildings photo"),
    ("aerial_cityscape", "aerial view cityscape panorama"),
    ("waterfront", "waterfront skyline city view"),
    ("city_centre", "city centre panorama buildings"),
    ("downtown", "downtown cityscape"),
];

/// Produces the ordered strategy list for a descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySequencer;

impl StrategySequencer {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic for equal descriptors.
    pub fn strategies(&self, descriptor: &EntityDescriptor) -> Vec<SearchStrategy> {
        match descriptor.subject_kind() {
            SubjectKind::University => university_strategies(descriptor),
            SubjectKind::City => city_strategies(descriptor),
        }
    }
}

fn university_strategies(descriptor: &EntityDescriptor) -> Vec<SearchStrategy> {
    let subject = quoted(descriptor.name());
    // Unquoted location narrows without excluding pages that omit it.
    let location = [descriptor.region(), descriptor.country()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let exclusions = exclusions(UNIVERSITY_QUERY_EXCLUSIONS);

    UNIVERSITY_EMPHASES
        .iter()
        .filter_map(|&(label, emphasis)| {
            let query =
                join_parts(&[subject.as_str(), location.as_str(), emphasis, exclusions.as_str()]);
            SearchStrategy::new(label, query).ok()
        })
        .collect()
}

fn city_strategies(descriptor: &EntityDescriptor) -> Vec<SearchStrategy> {
    let subject = quoted(descriptor.name());
    let country = descriptor.country().map(quoted).unwrap_or_default();
    let exclusions = exclusions(CITY_QUERY_EXCLUSIONS);

    CITY_EMPHASES
        .iter()
        .filter_map(|&(label, emphasis)| {
            let query =
                join_parts(&[subject.as_str(), country.as_str(), emphasis, exclusions.as_str()]);
            SearchStrategy::new(label, query).ok()
        })
        .collect()
}

fn quoted(term: &str) -> String {
    format!("\"{}\"", term.replace('"', ""))
}

/// `-term` for each kind-specific exclusion plus the people markers.
fn exclusions(kind_specific: &[&str]) -> String {
    kind_specific
        .iter()
        .chain(PEOPLE_MARKERS.iter())
        .map(|term| format!("-{}", term))
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_university_strategies() {
        let d = EntityDescriptor::university("University of Porto")
            .unwrap()
            .with_country("Portugal");
        let strategies = StrategySequencer::new().strategies(&d);

        assert_eq!(strategies.len(), 5);
        assert_eq!(strategies[0].label(), "distinctive_building");
        assert_eq!(strategies[4].label(), "general_exterior");
        for s in &strategies {
            assert!(s.query().starts_with("\"University of Porto\" Portugal"));
            assert!(s.query().contains("-logo"));
            assert!(s.query().contains("-crest"));
            assert!(s.query().contains("-crowd"));
            assert!(s.query().contains("-mockup"));
        }
        assert!(strategies[0].query().contains("distinctive campus building"));
    }

    #[test]
    fn test_city_strategies_quote_country() {
        let d = EntityDescriptor::city("Springfield")
            .unwrap()
            .with_country("USA");
        let strategies = StrategySequencer::new().strategies(&d);

        assert_eq!(strategies.len(), 5);
        assert_eq!(strategies[0].label(), "skyline");
        assert_eq!(strategies[4].label(), "downtown");
        for s in &strategies {
            assert!(s.query().starts_with("\"Springfield\" \"USA\""));
            assert!(s.query().contains("-map"));
            assert!(s.query().contains("-weather"));
            assert!(s.query().contains("-people"));
        }
    }

    #[test]
    fn test_city_without_country() {
        let d = EntityDescriptor::city("Lisbon").unwrap();
        let strategies = StrategySequencer::new().strategies(&d);
        assert!(strategies[0]
            .query()
            .starts_with("\"Lisbon\" skyline cityscape"));
    }

    #[test]
    fn test_embedded_quotes_stripped() {
        let d = EntityDescriptor::city("The \"Big\" Apple").unwrap();
        let strategies = StrategySequencer::new().strategies(&d);
        assert!(strategies[0].query().starts_with("\"The Big Apple\""));
    }

    #[test]
    fn test_blank_strategy_rejected() {
        assert!(SearchStrategy::new("label", "  ").is_err());
        assert!(SearchStrategy::new("", "query").is_err());
    }

    fn subject_kind_strategy() -> impl Strategy<Value = SubjectKind> {
        prop_oneof![Just(SubjectKind::University), Just(SubjectKind::City)]
    }

    proptest! {
        #[test]
        fn prop_strategies_deterministic_and_non_blank(
            name in "[A-Za-z][A-Za-z \\-']{0,30}",
            country in proptest::option::of("[A-Za-z ]{0,12}"),
            kind in subject_kind_strategy(),
        ) {
            let d = EntityDescriptor::new(name, kind).unwrap().with_country_opt(country);
            let sequencer = StrategySequencer::new();
            let first = sequencer.strategies(&d);
            let second = sequencer.strategies(&d);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 5);
            for s in &first {
                prop_assert!(!s.query().trim().is_empty());
                let expected = quoted(d.name());
                prop_assert!(s.query().contains(&expected));
            }
        }
    }
}
