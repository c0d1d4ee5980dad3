// HTTP surface for the hierarchy service.
//
// `GET /hierarchy` is the endpoint every agent both serves and calls
// on its peers; the recursion literally runs over this route. Query
// parameters are lenient by contract: anything missing or malformed
// defaults to the safe value, so the only error a caller can see is
// the local agent failing to identify itself.

use crate::application::gather::{GatherRequest, GatherService};
use crate::domain::visited::VisitedSet;
use crate::infrastructure::wire::WireBundle;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

pub struct AppState {
    pub gather: Arc<GatherService>,
}

pub fn router(gather: Arc<GatherService>) -> Router {
    let state = Arc::new(AppState { gather });

    Router::new()
        .route("/hierarchy", get(get_hierarchy))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct HierarchyParams {
    recurse: Option<String>,
    #[serde(rename = "allRelationships")]
    all_relationships: Option<String>,
    #[serde(rename = "visitedOrgs")]
    visited_orgs: Option<String>,
}

/// `recurse` is true when present without a value or set to "true";
/// an absent parameter means a local-only snapshot.
fn recurse_flag(value: Option<&String>) -> bool {
    match value {
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}

fn bool_flag(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

async fn get_hierarchy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HierarchyParams>,
) -> impl IntoResponse {
    let request = GatherRequest {
        recurse: recurse_flag(params.recurse.as_ref()),
        all_relationships: bool_flag(params.all_relationships.as_ref()),
        visited: VisitedSet::decode(params.visited_orgs.as_deref().unwrap_or("")),
    };

    match state.gather.gather(request).await {
        Ok(bundle) => Ok(Json(WireBundle::from_bundle(&bundle))),
        Err(e) => {
            error!(error = %e, "hierarchy request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurse_accepts_bare_and_true_values() {
        assert!(recurse_flag(Some(&String::new())));
        assert!(recurse_flag(Some(&"true".to_string())));
        assert!(recurse_flag(Some(&"TRUE".to_string())));
        assert!(!recurse_flag(Some(&"false".to_string())));
        assert!(!recurse_flag(Some(&"banana".to_string())));
        assert!(!recurse_flag(None));
    }

    #[test]
    fn all_relationships_requires_an_explicit_true() {
        assert!(bool_flag(Some(&"true".to_string())));
        assert!(!bool_flag(Some(&String::new())));
        assert!(!bool_flag(None));
    }
}
