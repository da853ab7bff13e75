use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentSentiment {
    pub label: String,
    /// Provider-defined range; treated opaquely.
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub text: String,
    pub relevance: f64,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub text: String,
    pub relevance: f64,
}

/// Externally computed semantic signals for one block of text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticResult {
    #[serde(default)]
    pub sentiment: Option<DocumentSentiment>,
    #[serde(default)]
    pub emotions: BTreeMap<String, f64>,
    /// In provider ranking order.
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub concepts: Vec<ConceptEntry>,
}

impl SemanticResult {
    /// Emotions sorted by score, strongest first.
    pub fn ranked_emotions(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .emotions
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Keywords strictly above `threshold`, provider order preserved.
    pub fn keywords_above(&self, threshold: f64) -> impl Iterator<Item = &KeywordEntry> {
        self.keywords
            .iter()
            .filter(move |keyword| keyword.relevance > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(text: &str, relevance: f64) -> KeywordEntry {
        KeywordEntry {
            text: text.to_string(),
            relevance,
            count: None,
        }
    }

    #[test]
    fn test_ranked_emotions_descending() {
        let result = SemanticResult {
            emotions: BTreeMap::from([
                ("anger".to_string(), 0.1),
                ("joy".to_string(), 0.7),
                ("sadness".to_string(), 0.3),
            ]),
            ..Default::default()
        };
        let names: Vec<&str> = result.ranked_emotions().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["joy", "sadness", "anger"]);
    }

    #[test]
    fn test_keywords_above_threshold_keep_order() {
        let result = SemanticResult {
            keywords: vec![
                keyword("roadmap", 0.9),
                keyword("budget", 0.5),
                keyword("hiring", 0.51),
                keyword("lunch", 0.2),
            ],
            ..Default::default()
        };
        let texts: Vec<&str> = result.keywords_above(0.5).map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["roadmap", "hiring"]);
    }

    #[test]
    fn test_deserializes_with_missing_facets() {
        let result: SemanticResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, SemanticResult::default());
    }
}
