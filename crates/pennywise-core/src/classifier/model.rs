//! Statistical fallback model
//!
//! TF-IDF features feeding a multinomial naive Bayes classifier, trained once
//! on a small labeled corpus. Used only when no keyword stage matches.

use std::collections::{BTreeMap, HashMap};

use super::text::Normalizer;
use crate::error::{Error, Result};
use crate::models::Category;

/// Labeled descriptions the fallback model is trained on
pub const TRAINING_CORPUS: &[(&str, Category)] = &[
    ("mcdonalds burger king pizza hut subway", Category::Food),
    ("starbucks coffee cafe restaurant lunch dinner", Category::Food),
    ("grocery supermarket walmart costco", Category::Food),
    ("food delivery uber eats doordash", Category::Food),
    ("uber lyft taxi bus train metro", Category::Transportation),
    ("gas station shell bp exxon", Category::Transportation),
    ("car repair maintenance parking", Category::Transportation),
    ("flight airline airport", Category::Transportation),
    ("netflix spotify movie cinema theater", Category::Entertainment),
    ("concert sports game bowling", Category::Entertainment),
    ("amazon prime video music", Category::Entertainment),
    ("electricity water bill internet wifi", Category::Utilities),
    ("phone mobile verizon at&t", Category::Utilities),
    ("rent mortgage housing", Category::Utilities),
    ("hospital doctor pharmacy drugstore", Category::Healthcare),
    ("medical insurance dental", Category::Healthcare),
    ("gym fitness workout", Category::Healthcare),
    ("amazon walmart target shopping", Category::Shopping),
    ("clothing shoes fashion", Category::Shopping),
    ("electronics apple samsung", Category::Shopping),
];

const MAX_FEATURES: usize = 1000;
const SMOOTHING: f64 = 1.0;

/// Term-frequency times smoothed inverse-document-frequency, L2 normalized
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from tokenized documents
    ///
    /// Keeps the `max_features` most frequent terms (ties broken alphabetically),
    /// indexed in alphabetical order.
    pub fn fit(documents: &[Vec<&str>], max_features: usize) -> Result<Self> {
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let mut seen: Vec<&str> = Vec::new();
            for &token in doc {
                *term_counts.entry(token).or_insert(0) += 1;
                if !seen.contains(&token) {
                    seen.push(token);
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(Error::InvalidData(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        Ok(Self { vocabulary, idf })
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Dense feature vector for one tokenized document
    ///
    /// Out-of-vocabulary tokens are ignored; a document with no known tokens
    /// yields the zero vector.
    pub fn transform(&self, tokens: &[&str]) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(*token) {
                features[index] += 1.0;
            }
        }
        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }
}

/// Multinomial naive Bayes with additive smoothing
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    classes: Vec<Category>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayes {
    pub fn fit(samples: &[Vec<f64>], labels: &[Category], alpha: f64) -> Result<Self> {
        if samples.is_empty() || samples.len() != labels.len() {
            return Err(Error::InvalidData(
                "training samples and labels must be non-empty and aligned".to_string(),
            ));
        }
        let n_features = samples[0].len();

        let mut classes: Vec<Category> = labels.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_log_prior = Vec::with_capacity(classes.len());
        let mut feature_log_prob = Vec::with_capacity(classes.len());

        for class in &classes {
            let mut feature_count = vec![0.0; n_features];
            let mut class_count = 0usize;
            for (sample, label) in samples.iter().zip(labels) {
                if label == class {
                    class_count += 1;
                    for (count, value) in feature_count.iter_mut().zip(sample) {
                        *count += value;
                    }
                }
            }

            let total: f64 = feature_count.iter().sum::<f64>() + alpha * n_features as f64;
            class_log_prior.push((class_count as f64 / samples.len() as f64).ln());
            feature_log_prob.push(
                feature_count
                    .iter()
                    .map(|count| ((count + alpha) / total).ln())
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    /// Posterior probability for every class, in class order
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + log_probs
                        .iter()
                        .zip(features)
                        .map(|(lp, x)| lp * x)
                        .sum::<f64>()
            })
            .collect();

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(Error::InvalidData(
                "naive Bayes produced non-finite likelihoods".to_string(),
            ));
        }
        let exp: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        Ok(exp.into_iter().map(|e| e / sum).collect())
    }
}

/// Prediction from the fallback model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    pub category: Category,
    pub probability: f64,
    pub probabilities: BTreeMap<Category, f64>,
}

/// Vectorizer and classifier trained together
#[derive(Debug, Clone)]
pub struct TextModel {
    vectorizer: TfidfVectorizer,
    classifier: NaiveBayes,
}

impl TextModel {
    /// Train on `corpus`, normalizing and tokenizing each description first
    pub fn train(normalizer: &Normalizer, corpus: &[(&str, Category)]) -> Result<Self> {
        let normalized: Vec<String> = corpus
            .iter()
            .map(|(text, _)| normalizer.normalize(text))
            .collect();
        let documents: Vec<Vec<&str>> = normalized.iter().map(|t| normalizer.tokens(t)).collect();
        let labels: Vec<Category> = corpus.iter().map(|(_, category)| *category).collect();

        let vectorizer = TfidfVectorizer::fit(&documents, MAX_FEATURES)?;
        let samples: Vec<Vec<f64>> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let classifier = NaiveBayes::fit(&samples, &labels, SMOOTHING)?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Predict from already-normalized text
    ///
    /// Ties in probability go to the class that comes first in `Category` order.
    pub fn predict(&self, normalizer: &Normalizer, normalized: &str) -> Result<ModelPrediction> {
        let features = self.vectorizer.transform(&normalizer.tokens(normalized));
        let probabilities = self.classifier.predict_proba(&features)?;

        let mut best: Option<(Category, f64)> = None;
        for (&category, &probability) in self.classifier.classes().iter().zip(&probabilities) {
            if best.map_or(true, |(_, p)| probability > p) {
                best = Some((category, probability));
            }
        }
        let (category, probability) =
            best.ok_or_else(|| Error::InvalidData("model has no classes".to_string()))?;

        Ok(ModelPrediction {
            category,
            probability,
            probabilities: self
                .classifier
                .classes()
                .iter()
                .copied()
                .zip(probabilities)
                .collect(),
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }
}
