//! Facet catalog endpoint.

use axum::Json;
use serde::Serialize;
use verse_core::{FacetCatalog, FacetStep};

#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub steps: &'static [FacetStep],
}

/// List the wizard steps in presentation order.
pub async fn list_facets() -> Json<FacetsResponse> {
    Json(FacetsResponse {
        steps: FacetCatalog::steps(),
    })
}
