//! Filter state and its URL-parameter representation.
//!
//! The URL query string is the only durable representation of active
//! filters; `FilterState` is a pure projection of it, recomputed on every
//! navigation. Values held here are always canonical enum members, never raw
//! user tokens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use crate::models::{Area, Board, ClassLevel, ClassSize, Subject, TeachingMode};

/// The six filter facets. Each facet is a set of canonical values;
/// order within a facet is irrelevant (BTreeSet keeps serialization
/// deterministic anyway).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub subjects: BTreeSet<Subject>,
    pub classes: BTreeSet<ClassLevel>,
    pub boards: BTreeSet<Board>,
    pub class_sizes: BTreeSet<ClassSize>,
    pub areas: BTreeSet<Area>,
    pub modes: BTreeSet<TeachingMode>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no facet has any selected value.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.classes.is_empty()
            && self.boards.is_empty()
            && self.class_sizes.is_empty()
            && self.areas.is_empty()
            && self.modes.is_empty()
    }

    /// Parse filter state from the explicit `filter_*` URL parameters.
    ///
    /// Unrecognized entries in a list are dropped, not errored: a stale or
    /// hand-edited URL degrades to the recognizable subset.
    pub fn from_url(query: &BrowseQuery) -> Self {
        Self {
            subjects: parse_list(query.filter_subjects.as_deref()),
            classes: parse_list(query.filter_classes.as_deref()),
            boards: parse_list(query.filter_boards.as_deref()),
            class_sizes: parse_list(query.filter_class_size.as_deref()),
            areas: parse_list(query.filter_areas.as_deref()),
            modes: parse_list(query.filter_mode_of_teaching.as_deref()),
        }
    }

    /// Write this state into the `filter_*` URL parameters, comma-joined,
    /// omitting parameters for empty facets.
    pub fn write_to_url(&self, query: &mut BrowseQuery) {
        query.filter_subjects = join_list(&self.subjects);
        query.filter_classes = join_list(&self.classes);
        query.filter_boards = join_list(&self.boards);
        query.filter_class_size = join_list(&self.class_sizes);
        query.filter_areas = join_list(&self.areas);
        query.filter_mode_of_teaching = join_list(&self.modes);
    }

    /// Merge the single-value `subject`/`class` shortcut parameters into
    /// their facets. A shortcut only lands when its facet has no explicit
    /// `filter_*` selection.
    pub fn apply_shortcuts(&mut self, query: &BrowseQuery) {
        if self.subjects.is_empty() {
            if let Some(raw) = query.subject.as_deref() {
                if let Ok(subject) = Subject::from_str(raw.trim()) {
                    self.subjects.insert(subject);
                }
            }
        }
        if self.classes.is_empty() {
            if let Some(raw) = query.class.as_deref() {
                if let Ok(class) = ClassLevel::from_str(raw) {
                    self.classes.insert(class);
                }
            }
        }
    }
}

fn parse_list<T>(raw: Option<&str>) -> BTreeSet<T>
where
    T: FromStr + Ord,
{
    raw.map(|joined| {
        joined
            .split(',')
            .filter_map(|piece| T::from_str(piece.trim()).ok())
            .collect()
    })
    .unwrap_or_default()
}

fn join_list<T: Display>(values: &BTreeSet<T>) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// The URL query parameters of the browse/search surface.
///
/// This struct is both the axum `Query` extractor for `GET /v1/teachers` and
/// the in-process representation of the URL: the single source of truth the
/// reconciler reads from and writes back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Free-text search input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Single-value subject shortcut (landing-page links)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Single-value class shortcut
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_subjects: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_classes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_boards: Option<String>,

    #[serde(rename = "filter_classSize", skip_serializing_if = "Option::is_none")]
    pub filter_class_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_areas: Option<String>,

    #[serde(
        rename = "filter_modeOfTeaching",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_mode_of_teaching: Option<String>,
}

impl BrowseQuery {
    /// The free-text query, if long enough to attempt parsing (≥ 2 chars).
    pub fn search_text(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|text| text.chars().count() >= 2)
    }
}
