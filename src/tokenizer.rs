//! Text normalization and tokenization for word counts

use crate::stopwords::is_stopword;
use regex::Regex;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Tokens of this many characters or fewer are dropped
const MAX_SHORT_TOKEN_LEN: usize = 2;

/// Fused words that standard English tokenization splits in two
const SPLIT_CONTRACTIONS: &[(&str, &str, &str)] = &[
    ("cannot", "can", "not"),
    ("gimme", "gim", "me"),
    ("gonna", "gon", "na"),
    ("gotta", "got", "ta"),
    ("lemme", "lem", "me"),
    ("wanna", "wan", "na"),
];

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Split free text into lowercase content tokens
///
/// Punctuation is removed before segmentation, so `don't` becomes `dont`
/// and `e-mail` becomes `email`. Fused forms such as `cannot` are split
/// into their parts. Stopwords and tokens of two characters or fewer are
/// dropped. Order and duplicates are preserved.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD_REGEX.replace_all(&lowered, "");

    cleaned
        .unicode_words()
        .flat_map(split_contraction)
        .filter(|token| !is_stopword(token))
        .filter(|token| token.chars().count() > MAX_SHORT_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn split_contraction(word: &str) -> Vec<&str> {
    SPLIT_CONTRACTIONS
        .iter()
        .find(|(fused, _, _)| *fused == word)
        .map_or_else(|| vec![word], |&(_, head, tail)| vec![head, tail])
}
