//! Description categorization commands

use anyhow::{Context, Result};
use pennywise_core::classifier::{categorize_simple, ExpenseClassifier};

/// Run the plain keyword categorizer
pub fn cmd_categorize(text: &str) -> Result<()> {
    let result = categorize_simple(text);
    println!(
        "🏷️  {} ({:.0}% confidence)",
        result.category,
        result.confidence * 100.0
    );
    Ok(())
}

/// Run the full cascade and show every class probability it reports
pub fn cmd_classify(text: &str) -> Result<()> {
    let classifier = ExpenseClassifier::new().context("Failed to build expense classifier")?;
    if !classifier.is_trained() {
        println!("⚠️  Fallback model unavailable, keyword matching only");
    }

    let result = classifier.classify(text);
    println!(
        "🤖 {} ({:.0}% confidence)",
        result.category,
        result.confidence * 100.0
    );

    if result.all_probabilities.len() > 1 {
        let mut ranked: Vec<_> = result.all_probabilities.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));
        println!();
        for (category, probability) in ranked {
            println!("   {:15} {:>5.1}%", category, probability * 100.0);
        }
    }

    Ok(())
}
