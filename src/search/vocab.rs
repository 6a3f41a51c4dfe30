//! Vocabulary and normalization tables for the query parser.
//!
//! Raw user tokens (synonyms, misspellings, abbreviations, composite
//! categories) resolve here to canonical facet values. Every canonical value
//! these tables produce is a member of the corresponding closed enum in
//! `models::facets`; the tables store enum values, not strings, so they
//! cannot invent new members.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::models::{Area, Board, ClassSize, Subject, TeachingMode};

/// Subjects implied by "competitive exam(s)".
pub const COMPETITIVE_EXAM_SUBJECTS: &[Subject] = &[Subject::Neet, Subject::Jee];

/// Subjects implied by "2nd/3rd language".
pub const LANGUAGE_SUBJECTS: &[Subject] = &[Subject::Bengali, Subject::Hindi, Subject::Sanskrit];

/// Single-word subject synonyms.
static SUBJECT_SYNONYMS: Lazy<HashMap<&'static str, Subject>> = Lazy::new(|| {
    HashMap::from([
        ("maths", Subject::Maths),
        ("math", Subject::Maths),
        ("mathematics", Subject::Maths),
        ("mathematic", Subject::Maths),
        ("physics", Subject::Physics),
        ("phy", Subject::Physics),
        ("chemistry", Subject::Chemistry),
        ("chem", Subject::Chemistry),
        ("biology", Subject::Biology),
        ("bio", Subject::Biology),
        ("english", Subject::English),
        ("eng", Subject::English),
        ("bengali", Subject::Bengali),
        ("bangla", Subject::Bengali),
        ("beng", Subject::Bengali),
        ("hindi", Subject::Hindi),
        ("sanskrit", Subject::Sanskrit),
        ("history", Subject::HistoryCivics),
        ("hist", Subject::HistoryCivics),
        ("civics", Subject::HistoryCivics),
        ("geography", Subject::Geography),
        ("geo", Subject::Geography),
        ("computer", Subject::ComputerScience),
        ("computers", Subject::ComputerScience),
        ("cs", Subject::ComputerScience),
        ("coding", Subject::ComputerScience),
        ("programming", Subject::ComputerScience),
        ("economics", Subject::Economics),
        ("eco", Subject::Economics),
        ("econ", Subject::Economics),
        ("accountancy", Subject::Accountancy),
        ("accounts", Subject::Accountancy),
        ("accounting", Subject::Accountancy),
        ("acc", Subject::Accountancy),
        ("business", Subject::BusinessStudies),
        ("bst", Subject::BusinessStudies),
        ("psychology", Subject::Psychology),
        ("psych", Subject::Psychology),
        ("sociology", Subject::Sociology),
        ("socio", Subject::Sociology),
        ("neet", Subject::Neet),
        ("jee", Subject::Jee),
        ("iit", Subject::Jee),
    ])
});

/// Single-word composite tokens and the subject set each implies.
///
/// Applied before single-subject matching, never recursively. "commerce"
/// deliberately implies only Commerce, not accounts/economics/business
/// studies.
static COMPOSITE_SUBJECTS: Lazy<HashMap<&'static str, &'static [Subject]>> = Lazy::new(|| {
    HashMap::from([
        (
            "science",
            &[Subject::Physics, Subject::Chemistry, Subject::Biology][..],
        ),
        ("sst", &[Subject::HistoryCivics, Subject::Geography][..]),
        ("commerce", &[Subject::Commerce][..]),
        (
            "humanities",
            &[Subject::Psychology, Subject::Sociology, Subject::PoliticalScience][..],
        ),
        ("literature", &[Subject::English][..]),
        ("language", &[Subject::English][..]),
        ("ca", &[Subject::Ca][..]),
    ])
});

/// Multi-word subject phrases, matched and stripped before tokenization.
///
/// Includes both direct canonical forms ("computer science") and composite
/// categories ("social studies"). Longer phrases are matched first.
static SUBJECT_PHRASES: Lazy<Vec<(&'static str, &'static [Subject])>> = Lazy::new(|| {
    let mut phrases: Vec<(&'static str, &'static [Subject])> = vec![
        ("history & civics", &[Subject::HistoryCivics][..]),
        ("history and civics", &[Subject::HistoryCivics][..]),
        ("computer science", &[Subject::ComputerScience][..]),
        ("political science", &[Subject::PoliticalScience][..]),
        ("business studies", &[Subject::BusinessStudies][..]),
        (
            "social studies",
            &[Subject::HistoryCivics, Subject::Geography][..],
        ),
        (
            "social science",
            &[Subject::HistoryCivics, Subject::Geography][..],
        ),
        ("competitive exams", COMPETITIVE_EXAM_SUBJECTS),
        ("competitive exam", COMPETITIVE_EXAM_SUBJECTS),
        ("second language", LANGUAGE_SUBJECTS),
        ("2nd language", LANGUAGE_SUBJECTS),
        ("third language", LANGUAGE_SUBJECTS),
        ("3rd language", LANGUAGE_SUBJECTS),
        ("chartered accountancy", &[Subject::Ca][..]),
        ("chartered accountant", &[Subject::Ca][..]),
    ];
    // Longest first so "history & civics" wins before any shorter overlap.
    phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.len()));
    phrases
});

/// Multi-word area phrases, matched and stripped before tokenization.
static AREA_PHRASES: Lazy<Vec<(&'static str, Area)>> = Lazy::new(|| {
    let mut phrases = vec![
        ("salt lake", Area::SaltLake),
        ("new town", Area::NewTown),
        ("park street", Area::ParkStreet),
        ("dum dum", Area::DumDum),
        ("lake town", Area::LakeTown),
    ];
    phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.len()));
    phrases
});

/// Single-word area synonyms and common misspellings.
static AREA_SYNONYMS: Lazy<HashMap<&'static str, Area>> = Lazy::new(|| {
    HashMap::from([
        ("saltlake", Area::SaltLake),
        ("newtown", Area::NewTown),
        ("dumdum", Area::DumDum),
        ("laketown", Area::LakeTown),
        ("ballygunj", Area::Ballygunge),
        ("ballygunge", Area::Ballygunge),
        ("gariya", Area::Garia),
        ("howra", Area::Howrah),
        ("tolly", Area::Tollygunge),
        ("tollygunj", Area::Tollygunge),
    ])
});

/// Single-word class-size synonyms.
static CLASS_SIZE_SYNONYMS: Lazy<HashMap<&'static str, ClassSize>> = Lazy::new(|| {
    HashMap::from([
        ("group", ClassSize::Group),
        ("batch", ClassSize::Group),
        ("solo", ClassSize::Solo),
        ("individual", ClassSize::Solo),
        ("personal", ClassSize::Solo),
    ])
});

/// Single-word teaching-mode synonyms.
static MODE_SYNONYMS: Lazy<HashMap<&'static str, TeachingMode>> = Lazy::new(|| {
    HashMap::from([
        ("online", TeachingMode::Online),
        ("virtual", TeachingMode::Online),
        ("offline", TeachingMode::Offline),
    ])
});

/// Words dropped before any facet or name matching.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "an", "the", "for", "in", "at", "near", "me", "my", "of", "and", "to", "with",
        "want", "need", "needed", "looking", "searching", "best", "good", "top", "home",
        "teacher", "teachers", "tutor", "tutors", "tuition", "tuitions", "sir", "madam",
        "maam", "miss", "coaching",
    ])
});

/// Tokens that mark the numeral after them as part of an address, not a class.
static ADDRESS_INDICATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["sector", "block", "flat", "plot", "phase", "lane", "ward"])
});

/// Tokens that mark the numeral after them as a class level.
static CLASS_INDICATORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["class", "classes", "grade", "std", "standard"]));

/// Resolve a lowercase token to a single canonical subject.
pub fn lookup_subject(token: &str) -> Option<Subject> {
    SUBJECT_SYNONYMS.get(token).copied()
}

/// Expand a lowercase composite token into its implied subject set.
pub fn expand_composite(token: &str) -> Option<&'static [Subject]> {
    COMPOSITE_SUBJECTS.get(token).copied()
}

/// Multi-word subject phrases in match order (longest first).
pub fn subject_phrases() -> &'static [(&'static str, &'static [Subject])] {
    &SUBJECT_PHRASES
}

/// Multi-word area phrases in match order (longest first).
pub fn area_phrases() -> &'static [(&'static str, Area)] {
    &AREA_PHRASES
}

/// Resolve a lowercase token to a canonical area: synonym table first, then
/// a direct case-insensitive match against the area enumeration.
pub fn lookup_area(token: &str) -> Option<Area> {
    AREA_SYNONYMS
        .get(token)
        .copied()
        .or_else(|| Area::from_str(token).ok())
}

/// Direct case-insensitive match against the board enumeration.
pub fn lookup_board(token: &str) -> Option<Board> {
    Board::from_str(token).ok()
}

/// Resolve a lowercase token to a teaching mode.
pub fn lookup_mode(token: &str) -> Option<TeachingMode> {
    MODE_SYNONYMS.get(token).copied()
}

/// Resolve a lowercase token to a class-size category.
pub fn lookup_class_size(token: &str) -> Option<ClassSize> {
    CLASS_SIZE_SYNONYMS.get(token).copied()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

pub fn is_address_indicator(token: &str) -> bool {
    ADDRESS_INDICATORS.contains(token)
}

pub fn is_class_indicator(token: &str) -> bool {
    CLASS_INDICATORS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_synonyms_resolve() {
        assert_eq!(lookup_subject("maths"), Some(Subject::Maths));
        assert_eq!(lookup_subject("phy"), Some(Subject::Physics));
        assert_eq!(lookup_subject("accounts"), Some(Subject::Accountancy));
        assert_eq!(lookup_subject("nonsense"), None);
    }

    #[test]
    fn test_science_composite() {
        let expanded = expand_composite("science").unwrap();
        assert_eq!(
            expanded,
            &[Subject::Physics, Subject::Chemistry, Subject::Biology]
        );
    }

    #[test]
    fn test_commerce_composite_is_narrow() {
        // "commerce" must imply only Commerce, never accounts/economics/BST.
        let expanded = expand_composite("commerce").unwrap();
        assert_eq!(expanded, &[Subject::Commerce]);
    }

    #[test]
    fn test_humanities_composite() {
        let expanded = expand_composite("humanities").unwrap();
        assert_eq!(
            expanded,
            &[Subject::Psychology, Subject::Sociology, Subject::PoliticalScience]
        );
    }

    #[test]
    fn test_sst_composite() {
        let expanded = expand_composite("sst").unwrap();
        assert_eq!(expanded, &[Subject::HistoryCivics, Subject::Geography]);
    }

    #[test]
    fn test_composites_expand_to_enum_members_only() {
        // Expansion output is typed; this guards the table contents stay in
        // sync with the documented fixed sets.
        for (token, subjects) in COMPOSITE_SUBJECTS.iter() {
            assert!(!subjects.is_empty(), "empty composite for {}", token);
        }
    }

    #[test]
    fn test_area_lookup_synonym_then_direct() {
        assert_eq!(lookup_area("saltlake"), Some(Area::SaltLake));
        assert_eq!(lookup_area("garia"), Some(Area::Garia));
        assert_eq!(lookup_area("gariya"), Some(Area::Garia));
        assert_eq!(lookup_area("mumbai"), None);
    }

    #[test]
    fn test_board_lookup_case_insensitive() {
        assert_eq!(lookup_board("cbse"), Some(Board::Cbse));
        assert_eq!(lookup_board("WBCHSE"), Some(Board::Wbchse));
        assert_eq!(lookup_board("stateboard"), None);
    }

    #[test]
    fn test_stop_and_indicator_sets_are_disjoint() {
        for word in STOP_WORDS.iter() {
            assert!(
                !is_class_indicator(word) && !is_address_indicator(word),
                "{} is both a stop word and an indicator",
                word
            );
        }
    }

    #[test]
    fn test_phrases_sorted_longest_first() {
        let phrases = subject_phrases();
        for pair in phrases.windows(2) {
            assert!(pair[0].0.len() >= pair[1].0.len());
        }
    }

    #[test]
    fn test_every_synonym_parses_to_its_canonical_value() {
        use super::super::parser::QueryParser;

        let parser = QueryParser::new();

        for (token, subject) in SUBJECT_SYNONYMS.iter() {
            let parsed = parser.parse(token);
            assert!(
                parsed.filters.subjects.contains(subject),
                "{} did not resolve to {}",
                token,
                subject
            );
        }
        for (token, subjects) in COMPOSITE_SUBJECTS.iter() {
            let parsed = parser.parse(token);
            for subject in *subjects {
                assert!(
                    parsed.filters.subjects.contains(subject),
                    "{} did not expand to {}",
                    token,
                    subject
                );
            }
        }
        for (token, area) in AREA_SYNONYMS.iter() {
            let parsed = parser.parse(token);
            assert!(
                parsed.filters.areas.contains(area),
                "{} did not resolve to {}",
                token,
                area
            );
        }
    }

    #[test]
    fn test_canonical_forms_are_idempotent() {
        use super::super::parser::QueryParser;
        use strum::IntoEnumIterator;

        let parser = QueryParser::new();

        for subject in Subject::iter() {
            let parsed = parser.parse(&subject.to_string());
            assert!(
                parsed.filters.subjects.contains(&subject),
                "canonical {} did not re-parse to itself",
                subject
            );
        }
        for area in Area::iter() {
            let parsed = parser.parse(&area.to_string());
            assert!(
                parsed.filters.areas.contains(&area),
                "canonical {} did not re-parse to itself",
                area
            );
        }
        for board in Board::iter() {
            let parsed = parser.parse(&board.to_string());
            assert!(
                parsed.filters.boards.contains(&board),
                "canonical {} did not re-parse to itself",
                board
            );
        }
    }
}
