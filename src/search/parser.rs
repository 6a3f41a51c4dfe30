//! Free-text query parsing.
//!
//! Turns a search string into a partial [`FilterState`] plus the name
//! residue: whatever remains once every recognized filter token and stop
//! word is stripped. The pass order is fixed: multi-word phrases are
//! matched and removed before single-word tokenization so a later pass can
//! never mis-tokenize "new town" or "political science".

use once_cell::sync::Lazy;
use regex::Regex;

use super::filter::FilterState;
use super::vocab;
use crate::models::ClassLevel;

/// Minimum query length (in chars) to attempt parsing at all.
pub const MIN_QUERY_LEN: usize = 2;

/// Ordinal class forms: "10th", "2nd", "1st", "3rd".
static ORDINAL_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(st|nd|rd|th)$").expect("ordinal class regex"));

/// The outcome of parsing a free-text query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    /// Facets recognized in the text; only matched facets are non-empty.
    pub filters: FilterState,
    /// Leftover text treated as a candidate person-name fragment.
    pub residue: Option<String>,
}

impl ParsedQuery {
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}

/// Stateless parser over the static vocabulary tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a free-text query into structured facets and a name residue.
    ///
    /// Queries shorter than [`MIN_QUERY_LEN`] parse to the empty result.
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return ParsedQuery::default();
        }

        let mut filters = FilterState::new();
        let mut working = trimmed.to_lowercase();

        // Pass 1: multi-word area phrases, stripped before anything else.
        for &(phrase, area) in vocab::area_phrases() {
            while strip_word_phrase(&mut working, phrase) {
                filters.areas.insert(area);
            }
        }

        // Pass 2: multi-word subject phrases (direct and composite).
        for &(phrase, subjects) in vocab::subject_phrases() {
            while strip_word_phrase(&mut working, phrase) {
                filters.subjects.extend(subjects.iter().copied());
            }
        }

        // Pass 3: single-token matching in priority order.
        let tokens: Vec<String> = working
            .split_whitespace()
            .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|token| !token.is_empty())
            .collect();

        let mut residue_words: Vec<&str> = Vec::new();
        let mut skip_next = false;

        for (idx, token) in tokens.iter().enumerate() {
            if skip_next {
                skip_next = false;
                continue;
            }

            let token = token.as_str();

            if vocab::is_stop_word(token) {
                continue;
            }

            // "class 5" / "std 7": indicator + numeral consumes both tokens.
            if vocab::is_class_indicator(token) {
                if let Some(next) = tokens.get(idx + 1) {
                    if let Some(class) = parse_bare_numeral(next.as_str()) {
                        filters.classes.insert(class);
                        skip_next = true;
                        continue;
                    }
                }
                // A dangling indicator carries no name information.
                continue;
            }

            // Ordinal forms: "10th", "11th".
            if let Some(captures) = ORDINAL_CLASS.captures(token) {
                if let Some(class) = captures[1].parse::<u8>().ok().and_then(ClassLevel::new) {
                    filters.classes.insert(class);
                }
                continue;
            }

            // Bare numerals: class level unless the previous token says it is
            // an address number ("flat 5", "sector 3"). Either way the
            // numeral is consumed, never a name fragment.
            if token.chars().all(|c| c.is_ascii_digit()) {
                let after_address = idx > 0 && vocab::is_address_indicator(tokens[idx - 1].as_str());
                if !after_address {
                    if let Some(class) = parse_bare_numeral(token) {
                        filters.classes.insert(class);
                    }
                }
                continue;
            }

            if vocab::is_address_indicator(token) {
                continue;
            }

            // Composite expansion runs before single-subject lookup.
            if let Some(subjects) = vocab::expand_composite(token) {
                filters.subjects.extend(subjects.iter().copied());
                continue;
            }

            if let Some(subject) = vocab::lookup_subject(token) {
                filters.subjects.insert(subject);
                continue;
            }

            if let Some(area) = vocab::lookup_area(token) {
                filters.areas.insert(area);
                continue;
            }

            if let Some(board) = vocab::lookup_board(token) {
                filters.boards.insert(board);
                continue;
            }

            if let Some(mode) = vocab::lookup_mode(token) {
                filters.modes.insert(mode);
                continue;
            }

            if let Some(size) = vocab::lookup_class_size(token) {
                filters.class_sizes.insert(size);
                continue;
            }

            residue_words.push(token);
        }

        let residue = if residue_words.is_empty() {
            None
        } else {
            Some(residue_words.join(" "))
        };

        ParsedQuery { filters, residue }
    }
}

fn parse_bare_numeral(token: &str) -> Option<ClassLevel> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<u8>().ok().and_then(ClassLevel::new)
}

/// Remove the first whole-word occurrence of `phrase` from `text`,
/// returning whether anything was removed. Word boundaries are required on
/// both sides so "renew townhouse" never matches "new town".
fn strip_word_phrase(text: &mut String, phrase: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(phrase) {
        let begin = search_from + offset;
        let end = begin + phrase.len();

        let boundary_before = text[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            text.replace_range(begin..end, " ");
            return true;
        }
        search_from = begin + 1;
    }
    false
}
