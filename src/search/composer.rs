//! Result composition: join, filter, rank, dedup.
//!
//! The composer is pure: it takes already-fetched rows and produces the
//! single ordered candidate list handed to the pager. Fetching, caching and
//! staleness live in the service layer.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::filter::FilterState;
use super::matcher::NameMatcher;
use crate::models::{
    Area, Board, ClassLevel, ClassSize, EnrichmentRecord, Subject, TeacherListing, TeacherRecord,
    TeachingMode,
};

/// Composes the final result list from roster + enrichment + filters.
#[derive(Debug, Clone, Copy)]
pub struct ResultComposer {
    matcher: NameMatcher,
}

impl ResultComposer {
    pub fn new(matcher: NameMatcher) -> Self {
        Self { matcher }
    }

    /// Join roster rows with their enrichment rows by slug. Roster order is
    /// preserved; a missing enrichment row yields an un-enriched listing.
    pub fn join(
        roster: Vec<TeacherRecord>,
        enrichment: Vec<EnrichmentRecord>,
    ) -> Vec<TeacherListing> {
        let mut by_slug: HashMap<String, EnrichmentRecord> = enrichment
            .into_iter()
            .map(|record| (record.slug.clone(), record))
            .collect();

        roster
            .into_iter()
            .map(|record| {
                let enrichment = by_slug.remove(&record.slug);
                TeacherListing::new(record, enrichment)
            })
            .collect()
    }

    /// Produce the ordered, deduplicated candidate list.
    ///
    /// `enrichment_loaded` is false when the enrichment fetch failed
    /// entirely; a non-empty filter then yields an empty list (fail-closed),
    /// never the unfiltered roster.
    pub fn compose(
        &self,
        listings: Vec<TeacherListing>,
        filters: &FilterState,
        residue: Option<&str>,
        enrichment_loaded: bool,
    ) -> Vec<TeacherListing> {
        let residue = residue.map(str::trim).filter(|r| !r.is_empty());

        let composed = if filters.is_empty() {
            match residue {
                // No filters, no name: the full (capped) roster, enriched.
                None => listings,
                // Pure name search; zero matches stays zero, no fallback.
                Some(fragment) => self
                    .matcher
                    .rank(&listings, fragment)
                    .into_iter()
                    .cloned()
                    .collect(),
            }
        } else {
            if !enrichment_loaded {
                tracing::warn!("enrichment unavailable under an active filter; failing closed");
                return Vec::new();
            }

            let passing: Vec<TeacherListing> = listings
                .into_iter()
                .filter(|listing| passes_filters(listing, filters))
                .collect();

            match residue {
                Some(fragment) => self.matcher.order_combined(passing, fragment),
                None => passing,
            }
        };

        dedup_by_id(composed)
    }
}

impl Default for ResultComposer {
    fn default() -> Self {
        Self::new(NameMatcher::default())
    }
}

/// Conjunction across all non-empty facets. A listing with no enrichment
/// record fails every non-empty facet check.
fn passes_filters(listing: &TeacherListing, filters: &FilterState) -> bool {
    let Some(enrichment) = listing.enrichment.as_ref() else {
        return false;
    };

    facet_passes(&filters.subjects, |s| subject_matches(enrichment, *s))
        && facet_passes(&filters.classes, |c| class_matches(enrichment, *c))
        && facet_passes(&filters.boards, |b| board_matches(enrichment, *b))
        && facet_passes(&filters.class_sizes, |s| class_size_matches(enrichment, *s))
        && facet_passes(&filters.areas, |a| area_matches(enrichment, *a))
        && facet_passes(&filters.modes, |m| mode_matches(enrichment, *m))
}

/// An empty facet constrains nothing; a non-empty facet passes when at
/// least one of its selected values is present.
fn facet_passes<T>(selected: &std::collections::BTreeSet<T>, matches: impl Fn(&T) -> bool) -> bool {
    selected.is_empty() || selected.iter().any(matches)
}

fn subject_matches(enrichment: &EnrichmentRecord, subject: Subject) -> bool {
    if contains_ci(&enrichment.subjects, &subject.to_string()) {
        return true;
    }
    // Backward-compatible naming: older enrichment rows say "Accounts".
    subject == Subject::Accountancy && contains_ci(&enrichment.subjects, "Accounts")
}

fn class_matches(enrichment: &EnrichmentRecord, class: ClassLevel) -> bool {
    // Exact membership against the normalized numeric column first.
    let numeric = class.to_string();
    if enrichment
        .classes_numeric
        .split(',')
        .any(|piece| piece.trim() == numeric)
    {
        return true;
    }
    // Fallback: the human display column ("Class 9, Class 10").
    let label = class.display_label();
    enrichment
        .classes_display
        .split(',')
        .any(|piece| piece.trim().eq_ignore_ascii_case(&label))
}

fn board_matches(enrichment: &EnrichmentRecord, board: Board) -> bool {
    contains_ci(&enrichment.boards, &board.to_string())
}

fn class_size_matches(enrichment: &EnrichmentRecord, size: ClassSize) -> bool {
    contains_ci(&enrichment.class_size, &size.to_string())
}

fn area_matches(enrichment: &EnrichmentRecord, area: Area) -> bool {
    contains_ci(enrichment.area_text(), &area.to_string())
}

fn mode_matches(enrichment: &EnrichmentRecord, mode: TeachingMode) -> bool {
    contains_ci(&enrichment.mode, &mode.to_string())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn dedup_by_id(listings: Vec<TeacherListing>) -> Vec<TeacherListing> {
    let mut seen: HashSet<Uuid> = HashSet::with_capacity(listings.len());
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.id()))
        .collect()
}
