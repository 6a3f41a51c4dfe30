use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::identity::Role;
use crate::models::*;
use crate::search::{
    BrowseQuery, FilterReconciler, FilterState, IncrementalPager, SearchError,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use uuid::Uuid;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Pagination parameters, parsed alongside the filter parameters.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// Requested visible-prefix length; rounded up to whole pages.
    pub visible: Option<usize>,
}

/// Browse/search the directory. The URL query string carries the entire
/// filter state (see [`BrowseQuery`]); this endpoint is stateless across
/// requests, so a shared URL reproduces the same result list.
pub async fn browse_teachers(
    State(state): State<AppState>,
    Query(url): Query<BrowseQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<BrowseResponse>> {
    // Each request reconciles from scratch: mount semantics.
    let reconciler = FilterReconciler::new();
    let reconciliation = reconciler.reconcile(&url);
    let (filters, residue) = reconciler.snapshot();

    let (listings, notice) = match state.service.execute(&filters, residue.as_deref()).await {
        Ok(outcome) => (outcome.listings, None),
        // Transient store failure: an empty result set plus a non-blocking
        // notice, never a hard failure (and never an unfiltered fallback).
        Err(SearchError::Store(msg)) => {
            tracing::warn!(error = %msg, "Store unavailable; returning empty result set");
            (Vec::new(), Some("directory temporarily unavailable".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let page_size = state.service.config().page_size;
    let mut pager = IncrementalPager::new(page_size);
    let total = listings.len();
    pager.set_list(listings);
    pager.reveal_up_to(page.visible.unwrap_or(page_size).max(1));

    let viewer = match state.identity.current_user().await {
        Some(profile) => Some(ViewerContext {
            user_id: profile.id,
            role: profile.role,
        }),
        None => None,
    };

    Ok(Json(BrowseResponse {
        teachers: pager.visible().iter().map(TeacherSummary::from).collect(),
        total_matched: total,
        visible: pager.visible_len(),
        has_more: pager.has_more(),
        filters,
        owner: reconciliation.owner.to_string(),
        residue,
        notice,
        viewer,
    }))
}

/// Summary DTO for result cards.
#[derive(Debug, Serialize)]
pub struct TeacherSummary {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub slug: String,
    pub photo_url: Option<String>,
    pub bio: String,
    pub location: String,
    pub subjects: Option<String>,
    pub featured: bool,
}

impl From<&TeacherListing> for TeacherSummary {
    fn from(listing: &TeacherListing) -> Self {
        let record = &listing.record;
        let enrichment = listing.enrichment.as_ref();
        Self {
            id: record.id,
            name: record.name.clone(),
            title: enrichment.and_then(|e| e.title.clone()),
            slug: record.slug.clone(),
            photo_url: record.photo_url.clone(),
            bio: record.bio.clone(),
            location: record.location.clone(),
            subjects: enrichment
                .map(|e| e.subjects.clone())
                .filter(|s| !s.is_empty())
                .or_else(|| record.primary_subject.as_ref().map(|s| s.name.clone())),
            featured: record.featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewerContext {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub teachers: Vec<TeacherSummary>,
    pub total_matched: usize,
    pub visible: usize,
    pub has_more: bool,
    pub filters: FilterState,
    pub owner: String,
    pub residue: Option<String>,
    pub notice: Option<String>,
    pub viewer: Option<ViewerContext>,
}

/// Joined detail view for a single teacher.
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TeacherDetailResponse>> {
    let record = state
        .store
        .get_teacher(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("teacher {} not found", slug)))?;
    let enrichment = state.store.get_enrichment(&slug).await?;

    Ok(Json(TeacherDetailResponse {
        listing: TeacherListing::new(record, enrichment),
    }))
}

#[derive(Debug, Serialize)]
pub struct TeacherDetailResponse {
    #[serde(flatten)]
    pub listing: TeacherListing,
}

/// Canonical facet values for building pickers.
pub async fn vocabulary() -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        subjects: Subject::iter().map(|v| v.to_string()).collect(),
        classes: ClassLevel::all().map(|v| v.to_string()).collect(),
        boards: Board::iter().map(|v| v.to_string()).collect(),
        areas: Area::iter().map(|v| v.to_string()).collect(),
        class_sizes: ClassSize::iter().map(|v| v.to_string()).collect(),
        modes: TeachingMode::iter().map(|v| v.to_string()).collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub subjects: Vec<String>,
    pub classes: Vec<String>,
    pub boards: Vec<String>,
    pub areas: Vec<String>,
    pub class_sizes: Vec<String>,
    pub modes: Vec<String>,
}
