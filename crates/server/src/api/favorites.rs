//! Favorites API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use verse_core::{FavoritesError, VerseRecord, VerseRef};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub favorites: Vec<VerseRecord>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    /// False when the verse was already saved.
    pub added: bool,
    pub verse: VerseRecord,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub reference: VerseRef,
    pub saved: bool,
}

fn store_error(e: FavoritesError) -> ApiError {
    error!("Favorites store error: {}", e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn parse_reference(surah: i64, verse: i64) -> Result<VerseRef, ApiError> {
    VerseRef::new(surah, verse).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

/// List saved verses, oldest first
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListFavoritesResponse>, ApiError> {
    let favorites = state.favorites().list().map_err(store_error)?;
    Ok(Json(ListFavoritesResponse {
        total: favorites.len(),
        favorites,
    }))
}

/// Save a verse
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(verse): Json<VerseRecord>,
) -> Result<(StatusCode, Json<AddFavoriteResponse>), ApiError> {
    let added = state.favorites().add(&verse).map_err(store_error)?;
    let status = if added {
        info!("Saved favorite {}", verse.reference);
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(AddFavoriteResponse { added, verse })))
}

/// Whether a verse is saved
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path((surah, verse)): Path<(i64, i64)>,
) -> Result<Json<FavoriteStatusResponse>, ApiError> {
    let reference = parse_reference(surah, verse)?;
    let saved = state.favorites().contains(reference).map_err(store_error)?;
    Ok(Json(FavoriteStatusResponse { reference, saved }))
}

/// Remove a saved verse
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((surah, verse)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let reference = parse_reference(surah, verse)?;
    if state.favorites().remove(reference).map_err(store_error)? {
        info!("Removed favorite {}", reference);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Verse {} is not saved", reference),
        ))
    }
}
