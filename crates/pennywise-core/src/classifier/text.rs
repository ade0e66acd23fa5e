//! Description normalization and tokenization

use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;

/// English stop words removed before vectorizing
///
/// Matches the list scikit-learn ships as `ENGLISH_STOP_WORDS`, which is why
/// words like "bill" and "fire" appear here.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Cleans free-text descriptions before classification
#[derive(Debug, Clone)]
pub struct Normalizer {
    punctuation: Regex,
    digits: Regex,
    token: Regex,
    stop_words: HashSet<&'static str>,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            punctuation: Regex::new(r"[^\w\s]")?,
            digits: Regex::new(r"\d+")?,
            token: Regex::new(r"\b\w\w+\b")?,
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Lowercase, strip punctuation and digits, trim
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let no_punct = self.punctuation.replace_all(&lowered, "");
        let no_digits = self.digits.replace_all(&no_punct, "");
        no_digits.trim().to_string()
    }

    /// Whitespace-separated words of normalized text
    pub fn words<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        normalized.split_whitespace().collect()
    }

    /// Vectorizer tokens: runs of two or more word characters, minus stop words
    pub fn tokens<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        self.token
            .find_iter(normalized)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}
