// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_app_state, create_test_attribution, create_test_distribution, read_json,
    send_get, send_json,
};
use crate::{
    CreateDistributionApiRequest, ErrorResponse, UpdateTotalProfitApiRequest, build_router,
};
use axum::{Router, http::StatusCode};
use profit_share_api::{
    AuditTrailResponse, CreateDistributionResponse, DistributionSummaryResponse,
    ListDistributionsResponse, UpdateTotalProfitResponse,
};

fn create_request(period: &str, total_profit: i64) -> CreateDistributionApiRequest {
    CreateDistributionApiRequest {
        attribution: create_test_attribution(),
        period: String::from(period),
        distribution_date: String::from("2026-03-31"),
        total_profit,
    }
}

#[tokio::test]
async fn test_create_distribution_succeeds() {
    let app: Router = build_router(create_test_app_state());

    let response = send_json(&app, "POST", "/distributions", &create_request("2026-Q1", 500)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: CreateDistributionResponse = read_json(response).await;
    assert_eq!(body.distribution.state, "Pending");
    assert_eq!(body.distribution.total_profit, 500);
    assert!(!body.duplicate_period);
}

#[tokio::test]
async fn test_create_distribution_with_reused_period_is_flagged() {
    let app: Router = build_router(create_test_app_state());
    send_json(&app, "POST", "/distributions", &create_request("2026-Q1", 500)).await;

    let response = send_json(&app, "POST", "/distributions", &create_request("2026-Q1", 700)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: CreateDistributionResponse = read_json(response).await;
    assert!(body.duplicate_period);
}

#[tokio::test]
async fn test_create_distribution_with_zero_profit_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let response = send_json(&app, "POST", "/distributions", &create_request("2026-Q1", 0)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = read_json(response).await;
    assert!(body.error);
    assert!(body.message.contains("total_profit"));
}

#[tokio::test]
async fn test_list_distributions_returns_created() {
    let app: Router = build_router(create_test_app_state());
    let first = create_test_distribution(&app, 100).await;
    let second = create_test_distribution(&app, 200).await;

    let response = send_get(&app, "/distributions").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ListDistributionsResponse = read_json(response).await;
    let ids: Vec<i64> = body
        .distributions
        .iter()
        .map(|d| d.distribution_id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_get_unknown_distribution_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let response = send_get(&app, "/distributions/42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_total_profit_succeeds() {
    let app: Router = build_router(create_test_app_state());
    let distribution_id = create_test_distribution(&app, 1_000).await;
    let req = UpdateTotalProfitApiRequest {
        attribution: create_test_attribution(),
        total_profit: 2_500,
    };

    let response = send_json(
        &app,
        "PUT",
        &format!("/distributions/{distribution_id}/total_profit"),
        &req,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: UpdateTotalProfitResponse = read_json(response).await;
    assert_eq!(body.summary.distribution.total_profit, 2_500);

    let summary: DistributionSummaryResponse =
        read_json(send_get(&app, &format!("/distributions/{distribution_id}")).await).await;
    assert_eq!(summary.distribution.total_profit, 2_500);
}

#[tokio::test]
async fn test_audit_trail_lists_operations() {
    let app: Router = build_router(create_test_app_state());
    let distribution_id = create_test_distribution(&app, 1_000).await;
    let req = UpdateTotalProfitApiRequest {
        attribution: create_test_attribution(),
        total_profit: 2_000,
    };
    send_json(
        &app,
        "PUT",
        &format!("/distributions/{distribution_id}/total_profit"),
        &req,
    )
    .await;

    let response = send_get(&app, &format!("/distributions/{distribution_id}/audit")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: AuditTrailResponse = read_json(response).await;
    let actions: Vec<&str> = body.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["CreateDistribution", "UpdateTotalProfit"]);
    assert!(body.events.iter().all(|e| e.actor_id == "operator-1"));
}
