//! Page-classification adapter.
//!
//! Wraps a per-locale user model behind a small surface: score a page's
//! HTML into a per-category vector, and pick the winning category for a
//! vector. The scoring model itself is deliberately simple (keyword term
//! frequency); the engine only depends on the shape of the outputs, so a
//! real statistical model can replace it without touching callers.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The user-model document is not valid JSON.
    #[error("malformed user model JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The user model declares no categories to score against.
    #[error("user model has no categories")]
    NoCategories,
}

/// Per-locale classification model.
///
/// Document shape: `{"locale": "...", "categories": [...], "keywords":
/// {"<category>": ["word", ...], ...}}`. Keywords for categories not in the
/// category list are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UserModel {
    #[allow(dead_code)]
    locale: String,
    categories: Vec<String>,
    keywords: BTreeMap<String, Vec<String>>,
}

impl Default for UserModel {
    fn default() -> Self {
        Self {
            locale: String::new(),
            categories: Vec::new(),
            keywords: BTreeMap::new(),
        }
    }
}

/// Adapter owning the currently loaded user model, if any.
#[derive(Debug, Default)]
pub struct Classifier {
    model: Option<UserModel>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a user-model document, replacing any previous model.
    pub fn init(&mut self, json: &str) -> ClassifierResult<()> {
        let model: UserModel = serde_json::from_str(json)?;
        if model.categories.is_empty() {
            return Err(ClassifierError::NoCategories);
        }

        tracing::info!(categories = model.categories.len(), "user model loaded");
        self.model = Some(model);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.model.is_some()
    }

    pub fn reset(&mut self) {
        self.model = None;
    }

    /// Score a page into one value per model category.
    ///
    /// Empty when no model is loaded.
    pub fn classify(&self, html: &str) -> Vec<f64> {
        let Some(model) = &self.model else {
            return Vec::new();
        };

        let words = tokenize(html);
        model
            .categories
            .iter()
            .map(|category| {
                let Some(keywords) = model.keywords.get(category) else {
                    return 0.0;
                };
                words
                    .iter()
                    .filter(|word| keywords.iter().any(|k| k == *word))
                    .count() as f64
            })
            .collect()
    }

    /// Category with the highest score; ties break to the first index.
    ///
    /// Empty when no model is loaded or the vector does not match the
    /// model's category count.
    pub fn winning_category(&self, scores: &[f64]) -> String {
        let Some(model) = &self.model else {
            return String::new();
        };
        if scores.len() != model.categories.len() {
            return String::new();
        }

        let mut winner = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[winner] {
                winner = index;
            }
        }
        model.categories[winner].clone()
    }
}

/// Lowercased word list of the page text, with markup stripped.
fn tokenize(html: &str) -> Vec<String> {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "locale": "en",
        "categories": ["technology-computing", "travel", "food-drink"],
        "keywords": {
            "technology-computing": ["compiler", "kernel", "software"],
            "travel": ["flight", "hotel"],
            "food-drink": ["recipe", "restaurant"]
        }
    }"#;

    fn classifier() -> Classifier {
        let mut classifier = Classifier::new();
        classifier.init(MODEL).unwrap();
        classifier
    }

    #[test]
    fn test_init_rejects_garbage() {
        let mut classifier = Classifier::new();
        assert!(matches!(
            classifier.init("not json"),
            Err(ClassifierError::Parse(_))
        ));
        assert!(!classifier.is_initialized());
    }

    #[test]
    fn test_init_rejects_empty_categories() {
        let mut classifier = Classifier::new();
        assert!(matches!(
            classifier.init(r#"{"locale": "en", "categories": [], "keywords": {}}"#),
            Err(ClassifierError::NoCategories)
        ));
    }

    #[test]
    fn test_classify_counts_keywords_per_category() {
        let scores = classifier().classify(
            "<html><body>The compiler builds the kernel. Book a flight.</body></html>",
        );
        assert_eq!(scores, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_classify_strips_markup() {
        let scores = classifier().classify("<compiler>recipe</compiler>");
        // Tag names are markup, not page text.
        assert_eq!(scores, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_classify_uninitialized_is_empty() {
        assert!(Classifier::new().classify("compiler").is_empty());
    }

    #[test]
    fn test_winning_category_argmax() {
        let classifier = classifier();
        assert_eq!(
            classifier.winning_category(&[0.0, 5.0, 1.0]),
            "travel"
        );
    }

    #[test]
    fn test_winning_category_tie_breaks_to_first() {
        let classifier = classifier();
        assert_eq!(
            classifier.winning_category(&[2.0, 2.0, 0.0]),
            "technology-computing"
        );
        assert_eq!(
            classifier.winning_category(&[0.0, 0.0, 0.0]),
            "technology-computing"
        );
    }

    #[test]
    fn test_winning_category_dimension_mismatch() {
        let classifier = classifier();
        assert_eq!(classifier.winning_category(&[1.0]), "");
        assert_eq!(classifier.winning_category(&[]), "");
    }

    #[test]
    fn test_reset_clears_model() {
        let mut classifier = classifier();
        classifier.reset();
        assert!(!classifier.is_initialized());
        assert_eq!(classifier.winning_category(&[1.0, 0.0, 0.0]), "");
    }
}
