use std::collections::{HashMap, HashSet};

use anyhow::{ensure, Context, Result};
use itertools::Itertools;
use serde::Deserialize;
use tracing::info;

/// Labeled complaints compiled into the binary. `SOAPBOX_DATASET` points at a
/// replacement csv with the same `text,category` columns.
const DEFAULT_DATASET: &str = include_str!("../dataset/complaints.csv");

/// English stopwords (the NLTK word list). Dropped from the training corpus
/// before anything is counted.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Tokens shorter than this never make it into the vocabulary.
const MIN_TOKEN_LEN: usize = 2;

/// Laplace smoothing applied to the per class term sums.
const SMOOTHING: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct TrainingRow {
    text: String,
    category: String,
}

/// Assigns a category to complaint text. A TF-IDF weighted multinomial naive
/// Bayes model, trained once at startup from the labeled csv and kept in RAM.
///
/// Training lowercases, strips everything that isn't a letter, drops
/// stopwords and keeps tokens of two letters or more. Incoming text at
/// predict time gets the same letters-only cleanup; stopwords in it simply
/// never match the vocabulary.
pub(crate) struct ClassifierService {
    /// Category names, sorted. Ties in scoring resolve to the earliest entry.
    classes: Vec<String>,
    /// Token -> column in the weight tables.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
    class_log_prior: Vec<f64>,
    /// `[class][column]` log likelihoods.
    feature_log_prob: Vec<Vec<f64>>,
}

impl ClassifierService {
    /// Trains from the csv named by `SOAPBOX_DATASET` when set, otherwise
    /// from the dataset compiled into the binary.
    pub(crate) fn train_default() -> Result<Self> {
        match std::env::var("SOAPBOX_DATASET") {
            Ok(path) => {
                let data = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read dataset {path}"))?;
                Self::train_from_csv(&data)
            }
            Err(_) => Self::train_from_csv(DEFAULT_DATASET),
        }
    }

    pub(crate) fn train_from_csv(data: &str) -> Result<Self> {
        let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let mut documents = Vec::new();
        for row in reader.deserialize() {
            let TrainingRow { text, category } = row.context("Malformed dataset row")?;
            if text.trim().is_empty() || category.trim().is_empty() {
                continue;
            }
            documents.push((train_tokens(&text, &stopwords), category));
        }
        ensure!(!documents.is_empty(), "Dataset contains no usable rows");

        let classes: Vec<String> = documents
            .iter()
            .map(|(_, category)| category.clone())
            .unique()
            .sorted()
            .collect();
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(index, class)| (class.as_str(), index))
            .collect();
        let vocabulary: HashMap<String, usize> = documents
            .iter()
            .flat_map(|(tokens, _)| tokens.iter())
            .unique()
            .sorted()
            .enumerate()
            .map(|(column, token)| (token.clone(), column))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for (tokens, _) in &documents {
            for column in tokens.iter().map(|token| vocabulary[token.as_str()]).unique() {
                document_frequency[column] += 1;
            }
        }
        let total_documents = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + total_documents) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        // accumulate normalized tf-idf rows per class
        let mut class_document_counts = vec![0usize; classes.len()];
        let mut feature_sums = vec![vec![0.0f64; vocabulary.len()]; classes.len()];
        for (tokens, category) in &documents {
            let class = class_index[category.as_str()];
            class_document_counts[class] += 1;
            for (column, weight) in weigh(count_columns(tokens, &vocabulary), &idf) {
                feature_sums[class][column] += weight;
            }
        }

        let class_log_prior: Vec<f64> = class_document_counts
            .iter()
            .map(|&count| (count as f64 / total_documents).ln())
            .collect();
        let vocabulary_size = vocabulary.len() as f64;
        let feature_log_prob: Vec<Vec<f64>> = feature_sums
            .iter()
            .map(|sums| {
                let class_total: f64 = sums.iter().sum();
                sums.iter()
                    .map(|&sum| {
                        ((sum + SMOOTHING) / (class_total + SMOOTHING * vocabulary_size)).ln()
                    })
                    .collect()
            })
            .collect();

        info!(
            "Classifier trained. {} documents, {} classes, {} terms",
            documents.len(),
            classes.len(),
            vocabulary.len()
        );
        Ok(Self {
            classes,
            vocabulary,
            idf,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Picks the highest scoring category for the given complaint text. Text
    /// made entirely of unknown words falls back to the commonest class.
    pub(crate) fn classify(&self, text: &str) -> String {
        let tokens = predict_tokens(text);
        let weights = weigh(count_columns(&tokens, &self.vocabulary), &self.idf);
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, prior) in self.class_log_prior.iter().enumerate() {
            let likelihood: f64 = weights
                .iter()
                .map(|&(column, weight)| weight * self.feature_log_prob[class][column])
                .sum();
            let score = prior + likelihood;
            if score > best_score {
                best_score = score;
                best = class;
            }
        }
        self.classes[best].clone()
    }

    pub(crate) fn classes(&self) -> &[String] {
        &self.classes
    }
}

fn strip_non_alphabetic(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

fn train_tokens(text: &str, stopwords: &HashSet<&str>) -> Vec<String> {
    strip_non_alphabetic(text)
        .split_whitespace()
        .filter(|word| !stopwords.contains(word) && word.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn predict_tokens(text: &str) -> Vec<String> {
    strip_non_alphabetic(text)
        .split_whitespace()
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn count_columns(tokens: &[String], vocabulary: &HashMap<String, usize>) -> HashMap<usize, usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        if let Some(&column) = vocabulary.get(token) {
            *counts.entry(column).or_default() += 1;
        }
    }
    counts
}

/// Turns raw counts into an L2 normalized tf-idf vector, sparse form.
fn weigh(counts: HashMap<usize, usize>, idf: &[f64]) -> Vec<(usize, f64)> {
    let mut weights: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(column, count)| (column, count as f64 * idf[column]))
        .collect();
    let norm = weights
        .iter()
        .map(|(_, weight)| weight * weight)
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut weights {
            *weight /= norm;
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY_DATASET: &str = "\
text,category
No water supply in sector four since morning,Water
Dirty water coming from the tap,Water
Water leaking from the main pipeline,Water
Streetlight flickering all night,Electricity
Power cut in our area for six hours,Electricity
Electric pole sparking near the school,Electricity
Garbage not collected for a week,Garbage
Overflowing trash bin at the corner,Garbage
";

    #[test]
    fn classifies_obvious_complaints() {
        let classifier = ClassifierService::train_from_csv(TOY_DATASET).unwrap();
        assert_eq!(
            classifier.classify("water pipeline leaking badly"),
            "Water"
        );
        assert_eq!(
            classifier.classify("power cut again in our area"),
            "Electricity"
        );
        assert_eq!(
            classifier.classify("trash bin overflowing on my street"),
            "Garbage"
        );
    }

    #[test]
    fn punctuation_and_case_do_not_matter() {
        let classifier = ClassifierService::train_from_csv(TOY_DATASET).unwrap();
        assert_eq!(
            classifier.classify("WATER!!! pipeline... LEAKING ###"),
            classifier.classify("water pipeline leaking")
        );
    }

    #[test]
    fn stopwords_are_not_features() {
        let classifier = ClassifierService::train_from_csv(TOY_DATASET).unwrap();
        assert!(!classifier.vocabulary.contains_key("the"));
        assert!(!classifier.vocabulary.contains_key("no"));
        assert!(!classifier.vocabulary.contains_key("not"));
        assert!(classifier.vocabulary.contains_key("water"));
    }

    #[test]
    fn classes_come_out_sorted() {
        let classifier = ClassifierService::train_from_csv(TOY_DATASET).unwrap();
        let classes: Vec<&str> = classifier.classes().iter().map(|c| c.as_str()).collect();
        assert_eq!(classes, vec!["Electricity", "Garbage", "Water"]);
    }

    #[test]
    fn unknown_text_falls_back_to_the_commonest_class() {
        // Electricity and Water both have three documents; the prior tie
        // resolves to the first class in sorted order.
        let classifier = ClassifierService::train_from_csv(TOY_DATASET).unwrap();
        assert_eq!(classifier.classify("zzz qqq xxyzzy"), "Electricity");
    }

    #[test]
    fn rejects_an_empty_dataset() {
        assert!(ClassifierService::train_from_csv("text,category\n").is_err());
        assert!(ClassifierService::train_from_csv("text,category\n ,Water\n").is_err());
    }

    #[test]
    fn embedded_dataset_trains() {
        let classifier = ClassifierService::train_from_csv(DEFAULT_DATASET).unwrap();
        assert!(classifier.classes().len() >= 2);
        assert_eq!(
            classifier.classify("No water supply since yesterday morning"),
            "Water"
        );
    }
}
