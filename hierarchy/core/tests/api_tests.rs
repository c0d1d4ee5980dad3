// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Router-level tests for the hierarchy HTTP surface.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hierarchy_core::application::gather::GatherService;
use hierarchy_core::domain::fetch::{FetchRequest, HierarchyFetcher};
use hierarchy_core::domain::org::{HierarchyBundle, NodeId, RelationEdge};
use hierarchy_core::domain::relations::{
    LocalIdentity, RelationError, RelationScope, RelationshipSource, TimeWindow,
};
use hierarchy_core::domain::role;
use hierarchy_core::presentation::api::router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct FixedSource {
    identity: Option<LocalIdentity>,
    edges: Vec<RelationEdge>,
}

#[async_trait]
impl RelationshipSource for FixedSource {
    async fn resolve_self(&self) -> Result<LocalIdentity, RelationError> {
        self.identity
            .clone()
            .ok_or_else(|| RelationError::SelfResolution("no self org".into()))
    }

    async fn query_relations(
        &self,
        _window: TimeWindow,
        scope: RelationScope,
    ) -> Result<Vec<RelationEdge>, RelationError> {
        Ok(self
            .edges
            .iter()
            .filter(|e| match scope {
                RelationScope::All => true,
                RelationScope::Subordinates => role::is_subordinate_class(&e.role),
            })
            .cloned()
            .collect())
    }
}

struct NoFetch;

#[async_trait]
impl HierarchyFetcher for NoFetch {
    async fn fetch(&self, _peer: &NodeId, _request: FetchRequest) -> Option<HierarchyBundle> {
        None
    }
}

fn app(identity: Option<LocalIdentity>, edges: Vec<RelationEdge>) -> axum::Router {
    let service = GatherService::new(Arc::new(FixedSource { identity, edges }), Arc::new(NoFetch));
    router(Arc::new(service))
}

fn transcom() -> Option<LocalIdentity> {
    Some(LocalIdentity {
        id: "TRANSCOM".into(),
        display_name: "TRANSCOM".to_string(),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let response = app(transcom(), vec![])
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn hierarchy_without_parameters_is_a_local_snapshot() {
    let edges = vec![
        RelationEdge::new("GlobalAir", "Subordinate"),
        RelationEdge::new("GlobalSea", "AdministrativeSubordinate"),
    ];
    let response = app(transcom(), edges)
        .oneshot(
            Request::builder()
                .uri("/hierarchy")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["schema"], 1);
    assert_eq!(body["rootId"], "TRANSCOM");
    assert_eq!(body["orgs"].as_array().unwrap().len(), 1);
    assert_eq!(body["orgs"][0]["relations"].as_array().unwrap().len(), 2);
    // Reduced mode: numeric role codes on the wire.
    assert_eq!(body["orgs"][0]["relations"][0]["code"], 1);
    assert_eq!(body["orgs"][0]["relations"][1]["code"], 0);
}

#[tokio::test]
async fn garbage_visited_set_is_treated_as_empty() {
    let response = app(transcom(), vec![])
        .oneshot(
            Request::builder()
                .uri("/hierarchy?recurse=banana&visitedOrgs=%2C%2C%20%2C")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["rootId"], "TRANSCOM");
}

#[tokio::test]
async fn bare_recurse_parameter_enables_recursion() {
    // With a fetcher that always fails, recursion still completes with
    // the partial (local-only) bundle.
    let edges = vec![RelationEdge::new("GlobalAir", "Subordinate")];
    let response = app(transcom(), edges)
        .oneshot(
            Request::builder()
                .uri("/hierarchy?recurse")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["orgs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn full_relationship_mode_keeps_role_names() {
    let edges = vec![RelationEdge::new("JointCommand", "RegionSuperior")];
    let response = app(transcom(), edges)
        .oneshot(
            Request::builder()
                .uri("/hierarchy?allRelationships=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["orgs"][0]["relations"][0]["role"], "RegionSuperior");
}

#[tokio::test]
async fn self_resolution_failure_maps_to_internal_error() {
    let response = app(None, vec![])
        .oneshot(
            Request::builder()
                .uri("/hierarchy?recurse=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("identify itself"));
}
