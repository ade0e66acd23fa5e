//! Expense description classification
//!
//! Two independent categorizers live here:
//!
//! - [`ExpenseClassifier`] runs a cascade over the words of a normalized
//!   description: exact keyword match, then substring match, then fuzzy match,
//!   and finally a statistical model trained at construction time.
//! - [`categorize_simple`] checks a separate keyword table by plain substring
//!   containment.
//!
//! The cascade's substring stage matches words of three or more letters that
//! appear inside a longer keyword, so "tar" resolves to Shopping via "target".

mod fuzzy;
mod model;
mod simple;
mod text;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Category;

pub use fuzzy::{best_match, ratio};
pub use model::{ModelPrediction, NaiveBayes, TextModel, TfidfVectorizer, TRAINING_CORPUS};
pub use simple::{categorize_simple, SimpleCategorization};
pub use text::{Normalizer, ENGLISH_STOP_WORDS};

/// Keyword lists for the cascade, in the order they are checked
///
/// Utilities and Healthcare have no list here and are only reachable through
/// the statistical model.
pub const CASCADE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "drink",
            "drinking",
            "drining",
            "coffee",
            "tea",
            "beer",
            "wine",
            "bar",
            "restaurant",
            "cafe",
            "lunch",
            "dinner",
            "breakfast",
            "meal",
            "grocery",
            "supermarket",
        ],
    ),
    (
        Category::Transportation,
        &[
            "uber", "lyft", "taxi", "bus", "train", "gas", "petrol", "parking", "flight",
        ],
    ),
    (
        Category::Entertainment,
        &["netflix", "movie", "cinema", "concert", "spotify", "music", "game"],
    ),
    (
        Category::Shopping,
        &[
            "amazon", "walmart", "target", "shopping", "clothes", "cloth", "dress", "shirt",
            "shirts", "tshirt", "t-shirt", "jeans", "skirt", "pants", "trousers", "jacket", "coat",
            "shoes", "footwear", "mall", "boutique", "apparel", "store",
        ],
    ),
];

pub const KEYWORD_CONFIDENCE: f64 = 0.85;
pub const FUZZY_CONFIDENCE: f64 = 0.78;
pub const FUZZY_CUTOFF: f64 = 0.75;
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Result of running the cascade on one description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f64,
    /// Keyword stages report only the winning category; the model reports
    /// every class it knows. Empty when classification degraded.
    pub all_probabilities: BTreeMap<Category, f64>,
}

impl Classification {
    fn single(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence,
            all_probabilities: BTreeMap::from([(category, confidence)]),
        }
    }

    fn degraded() -> Self {
        Self {
            category: Category::Other,
            confidence: DEFAULT_CONFIDENCE,
            all_probabilities: BTreeMap::new(),
        }
    }
}

/// Immutable classifier, built once and shared across requests
#[derive(Debug, Clone)]
pub struct ExpenseClassifier {
    normalizer: Normalizer,
    model: Option<TextModel>,
}

impl ExpenseClassifier {
    /// Build the classifier and train the fallback model on [`TRAINING_CORPUS`]
    ///
    /// A training failure is logged and leaves the classifier running in
    /// degraded mode rather than returning an error.
    pub fn new() -> Result<Self> {
        let normalizer = Normalizer::new()?;
        let model = match TextModel::train(&normalizer, TRAINING_CORPUS) {
            Ok(model) => {
                info!(
                    "Trained fallback classifier on {} examples ({} features)",
                    TRAINING_CORPUS.len(),
                    model.vocabulary_size()
                );
                Some(model)
            }
            Err(e) => {
                warn!("Fallback classifier training failed: {}", e);
                None
            }
        };
        Ok(Self { normalizer, model })
    }

    /// Classifier without a fallback model; keyword stages still apply
    pub fn untrained() -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new()?,
            model: None,
        })
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Classify a free-text expense description
    pub fn classify(&self, description: &str) -> Classification {
        let normalized = self.normalizer.normalize(description);
        let words = self.normalizer.words(&normalized);

        if let Some(category) = keyword_match(&words) {
            debug!("Keyword match for {:?}: {}", description, category);
            return Classification::single(category, KEYWORD_CONFIDENCE);
        }

        if let Some(category) = fuzzy_match(&words) {
            debug!("Fuzzy match for {:?}: {}", description, category);
            return Classification::single(category, FUZZY_CONFIDENCE);
        }

        let Some(model) = &self.model else {
            warn!("No trained model; {:?} classified as Other", description);
            return Classification::degraded();
        };

        match model.predict(&self.normalizer, &normalized) {
            Ok(prediction) => {
                debug!(
                    "Model prediction for {:?}: {} ({:.2})",
                    description, prediction.category, prediction.probability
                );
                Classification {
                    category: prediction.category,
                    confidence: prediction.probability,
                    all_probabilities: prediction.probabilities,
                }
            }
            Err(e) => {
                warn!("Model prediction failed for {:?}: {}", description, e);
                Classification::degraded()
            }
        }
    }
}

/// Exact then substring match, word by word, category by category
fn keyword_match(words: &[&str]) -> Option<Category> {
    for word in words {
        for (category, keywords) in CASCADE_KEYWORDS {
            if keywords.contains(word) {
                return Some(*category);
            }
            let substring_hit = keywords
                .iter()
                .any(|kw| word.contains(kw) || (word.chars().count() >= 3 && kw.contains(word)));
            if substring_hit {
                return Some(*category);
            }
        }
    }
    None
}

fn fuzzy_match(words: &[&str]) -> Option<Category> {
    for word in words {
        for (category, keywords) in CASCADE_KEYWORDS {
            if best_match(word, keywords, FUZZY_CUTOFF).is_some() {
                return Some(*category);
            }
        }
    }
    None
}
