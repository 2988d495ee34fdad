//! Lexical statistics used to enrich the summarization prompt.
//!
//! [`analyze`] produces a [`LexicalSummary`]: the sentence count, the
//! content tokens (lowercased, alphanumeric, Portuguese stopwords removed)
//! and the ten most frequent content tokens.
//!
//! Tokenization is rule-based and tuned for Portuguese prose:
//!
//! - [`split_sentences`] ends a sentence at `.`, `!`, `?` or `…` followed
//!   by whitespace, unless the period closes a known abbreviation, an
//!   initial, or is followed by a lowercase word.
//! - [`tokenize_words`] splits on whitespace, peels punctuation off word
//!   edges, and splits on `,`/`:` (outside numbers), `;` and brackets/quotes.
//!   Hyphens, apostrophes and inner periods stay inside the token, so
//!   `bem-vindo` or `3.5` remain single (non-alphanumeric) tokens.

pub mod stopwords;

use std::collections::HashMap;

use tracing::debug;

pub use stopwords::is_stopword;

/// Number of keywords kept in [`LexicalSummary::top_keywords`].
pub const TOP_KEYWORDS: usize = 10;

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "sr", "sra", "srs", "sras", "srta", "dr", "dra", "drs", "prof", "profa", "profs", "eng",
    "exmo", "exma", "ilmo", "ilma", "av", "pág", "págs", "pag", "cap", "art", "arts", "inc",
    "vol", "ed", "fig", "tel", "obs", "ex", "aprox", "etc", "dept", "depto", "ltda", "cia", "nº",
    "núm", "séc", "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov",
    "dez",
];

/// Derived statistics for one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalSummary {
    pub sentence_count: usize,
    /// Content tokens in order of occurrence.
    pub tokens: Vec<String>,
    /// Up to [`TOP_KEYWORDS`] `(token, count)` pairs, most frequent first;
    /// ties keep first-occurrence order.
    pub top_keywords: Vec<(String, usize)>,
}

impl LexicalSummary {
    /// Keyword tokens without their counts.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.top_keywords.iter().map(|(word, _)| word.as_str())
    }
}

/// Compute the lexical statistics of `text`. Never fails; empty text
/// yields an empty summary.
pub fn analyze(text: &str) -> LexicalSummary {
    let sentence_count = split_sentences(text).len();
    let tokens: Vec<String> = tokenize_words(&text.to_lowercase())
        .into_iter()
        .filter(|t| is_content_token(t))
        .collect();
    let top_keywords = most_common(&tokens, TOP_KEYWORDS);

    debug!(
        "Lexical analysis: {} sentence(s), {} content token(s), {} keyword(s)",
        sentence_count,
        tokens.len(),
        top_keywords.len()
    );

    LexicalSummary {
        sentence_count,
        tokens,
        top_keywords,
    }
}

/// Alphanumeric and not a stopword.
pub fn is_content_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric) && !is_stopword(token)
}

// ── Sentences ──────────────────────────────────────────────────────

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '»' | '”' | '’')
}

/// Whether `word` (lowercased, without its period) is a known abbreviation
/// or a single-letter initial.
fn is_abbreviation(word: &str) -> bool {
    let mut chars = word.chars();
    let is_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
    is_initial || ABBREVIATIONS.contains(&word)
}

/// Whether `sentence` (ending in a period) ends with an abbreviation or a
/// single-letter initial.
fn ends_with_abbreviation(sentence: &str) -> bool {
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    let word = last
        .trim_end_matches(|c: char| c == '.' || is_closer(c))
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    !word.is_empty() && is_abbreviation(&word)
}

/// Split `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        current.push(c);
        i += 1;
        if !is_terminator(c) {
            continue;
        }

        // Absorb the rest of the terminator run and any closing quotes.
        let mut only_periods = c == '.';
        while i < chars.len() && (is_terminator(chars[i]) || is_closer(chars[i])) {
            if is_terminator(chars[i]) && chars[i] != '.' {
                only_periods = false;
            }
            current.push(chars[i]);
            i += 1;
        }

        if i < chars.len() && !chars[i].is_whitespace() {
            continue;
        }
        if only_periods {
            if ends_with_abbreviation(&current) {
                continue;
            }
            let next_word_lowercase = chars[i..]
                .iter()
                .find(|c| !c.is_whitespace())
                .is_some_and(|c| c.is_lowercase());
            if next_word_lowercase {
                continue;
            }
        }

        push_sentence(&mut sentences, &mut current);
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

// ── Words ──────────────────────────────────────────────────────────

/// Characters that always stand as their own token.
fn is_hard_separator(c: char) -> bool {
    matches!(
        c,
        ';' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '“' | '”' | '«' | '»' | '…'
    )
}

/// Split `text` into word and punctuation tokens. Case is preserved.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let chars: Vec<char> = chunk.chars().collect();
        let mut segment = String::new();
        for (idx, &c) in chars.iter().enumerate() {
            let between_digits = idx > 0
                && chars[idx - 1].is_ascii_digit()
                && chars.get(idx + 1).is_some_and(|n| n.is_ascii_digit());
            let splits = is_hard_separator(c) || (matches!(c, ',' | ':') && !between_digits);
            if splits {
                peel_edges(&segment, &mut tokens);
                segment.clear();
                tokens.push(c.to_string());
            } else {
                segment.push(c);
            }
        }
        peel_edges(&segment, &mut tokens);
    }
    tokens
}

/// Push `segment` as tokens, with leading and trailing punctuation runs
/// split off the word core.
fn peel_edges(segment: &str, tokens: &mut Vec<String>) {
    if segment.is_empty() {
        return;
    }
    let core = segment.trim_matches(|c: char| !c.is_alphanumeric());
    if core.is_empty() {
        tokens.push(segment.to_string());
        return;
    }
    let (leading, rest) = segment.split_once(core).unwrap_or((segment, ""));
    if !leading.is_empty() {
        tokens.push(leading.to_string());
    }
    // An abbreviation keeps its period, as the sentence splitter does.
    match rest.strip_prefix('.') {
        Some(after) if is_abbreviation(&core.to_lowercase()) => {
            tokens.push(format!("{core}."));
            if !after.is_empty() {
                tokens.push(after.to_string());
            }
        }
        _ => {
            tokens.push(core.to_string());
            if !rest.is_empty() {
                tokens.push(rest.to_string());
            }
        }
    }
}

// ── Frequencies ────────────────────────────────────────────────────

/// The `n` most frequent tokens with their counts, most frequent first.
/// Ties keep the order in which the tokens first appeared.
pub fn most_common(tokens: &[String], n: usize) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }
    // Stable sort preserves first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(token, count)| (token.to_string(), count))
        .collect()
}
