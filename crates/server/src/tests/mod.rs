// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod distribution_route_tests;

use super::{AppState, Attribution, build_router};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use profit_share_persistence::Persistence;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    }
}

fn create_test_attribution() -> Attribution {
    Attribution {
        actor_id: String::from("operator-1"),
        actor_type: String::from("operator"),
        cause_id: String::from("http-test"),
        cause_description: String::from("HTTP test"),
    }
}

/// Seeds the three-participant reference scenario and returns `(a, b, c)`.
async fn seed_reference_participants(app_state: &AppState) -> (i64, i64, i64) {
    let mut persistence = app_state.persistence.lock().await;
    let partner = persistence.create_role("Partner", 50.0).unwrap();
    let associate = persistence.create_role("Associate", 0.0).unwrap();
    let founder = persistence.create_role("Founder", 100.0).unwrap();

    let a = persistence
        .create_participant("A", 1_000_000.0, partner.role_id(), true)
        .unwrap();
    let b = persistence
        .create_participant("B", 2_000_000.0, associate.role_id(), true)
        .unwrap();
    let c = persistence
        .create_participant("C", 0.0, founder.role_id(), true)
        .unwrap();

    (
        a.participant_id().unwrap(),
        b.participant_id().unwrap(),
        c.participant_id().unwrap(),
    )
}

async fn send_json<T: Serialize>(
    app: &Router,
    method: &str,
    uri: &str,
    body: &T,
) -> Response<axum::body::Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send_get(app: &Router, uri: &str) -> Response<axum::body::Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response<axum::body::Body>) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Creates a distribution over HTTP and returns its ID.
async fn create_test_distribution(app: &Router, total_profit: i64) -> i64 {
    let req = super::CreateDistributionApiRequest {
        attribution: create_test_attribution(),
        period: String::from("2026-Q1"),
        distribution_date: String::from("2026-03-31"),
        total_profit,
    };
    let response = send_json(app, "POST", "/distributions", &req).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: profit_share_api::CreateDistributionResponse = read_json(response).await;
    created.distribution.distribution_id
}
