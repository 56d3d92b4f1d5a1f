use super::common::*;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::job_fair::router::ACTING_CANDIDATE_HEADER;
use crate::workflows::job_fair::{job_fair_router, APPLY_SUCCESS_MESSAGE};

fn router() -> axum::Router {
    let (service, _) = build_service();
    job_fair_router(Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn get_as(uri: &str, acting: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(ACTING_CANDIDATE_HEADER, acting)
        .body(Body::empty())
        .expect("request builds")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn login_returns_candidate_or_localized_error() {
    let (status, body) = send(
        router(),
        post_json(
            "/api/v1/login",
            json!({ "candidate_id": FAH, "email": " Fah.Chan@example.com " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Fah");
    assert_eq!(body["role"], "USER");

    let (status, body) = send(
        router(),
        post_json(
            "/api/v1/login",
            json!({ "candidate_id": FAH, "email": "wrong@x.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "อีเมลไม่ถูกต้อง");
}

#[tokio::test]
async fn login_validates_input_before_lookup() {
    let (status, body) = send(
        router(),
        post_json(
            "/api/v1/login",
            json!({ "candidate_id": "03000005", "email": "fah.chan@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "รหัสผู้ใช้ต้องเป็นเลข 8 หลัก และตัวแรกต้องไม่ใช่ 0"
    );

    let (status, _) = send(
        router(),
        post_json(
            "/api/v1/login",
            json!({ "candidate_id": FAH, "email": "fah.chan@localhost" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn jobs_endpoint_lists_open_postings_with_company() {
    let (status, body) = send(router(), get("/api/v1/jobs?sort=company")).await;
    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().expect("array");
    assert_eq!(listings.len(), 5);
    assert_eq!(listings[0]["company_name"], "Alpha Tech Co., Ltd.");
    assert!(listings
        .iter()
        .all(|listing| listing["status"].as_str() != Some("CLOSED")));
}

#[tokio::test]
async fn eligibility_endpoint_reports_outcome() {
    let (status, body) = send(router(), get(&format!("/api/v1/jobs/{OPEN_JOB}/eligibility"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "message": "" }));

    let (status, body) = send(
        router(),
        get(&format!("/api/v1/jobs/{CLOSED_JOB}/eligibility")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": false, "message": "ตำแหน่งนี้ปิดรับสมัครแล้ว" })
    );
}

#[tokio::test]
async fn apply_endpoint_creates_then_conflicts() {
    let (service, store) = build_service();
    let app = job_fair_router(Arc::new(service));
    let uri = format!("/api/v1/jobs/{DUE_TODAY_JOB}/applications");

    let (status, body) = send(app.clone(), post_json(&uri, json!({ "candidate_id": BEN }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], APPLY_SUCCESS_MESSAGE);
    assert_eq!(body["application"]["applied_at"], "2025-06-15 10:30:00");

    let (status, body) = send(app, post_json(&uri, json!({ "candidate_id": BEN }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "คุณสมัครตำแหน่งนี้แล้ว");

    assert_eq!(
        store
            .applications_for_candidate(&crate::domain::CandidateId::from(BEN))
            .expect("reads")
            .len(),
        1
    );
}

#[tokio::test]
async fn apply_endpoint_maps_rejections() {
    let (status, body) = send(
        router(),
        post_json(
            &format!("/api/v1/jobs/{EXPIRED_JOB}/applications"),
            json!({ "candidate_id": BEN }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "วันนี้เกินวันปิดรับสมัครแล้ว");

    let (status, _) = send(
        router(),
        post_json(
            "/api/v1/jobs/29999999/applications",
            json!({ "candidate_id": BEN }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn apply_endpoint_rejects_unknown_candidate() {
    let (service, store) = build_service();
    let app = job_fair_router(Arc::new(service));

    let (status, body) = send(
        app,
        post_json(
            &format!("/api/v1/jobs/{OPEN_JOB}/applications"),
            json!({ "candidate_id": "39999999" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "ไม่พบผู้สมัคร");
    assert!(store
        .applications_for_job(&crate::domain::JobId::from(OPEN_JOB))
        .expect("reads")
        .iter()
        .all(|application| application.candidate_id.as_str() != "39999999"));
}

#[tokio::test]
async fn profile_endpoint_serves_own_profile_sorted() {
    let (status, body) = send(
        router(),
        get_as(&format!("/api/v1/candidates/{ANYA}/profile?sort=applied_at"), ANYA),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["candidate"]["candidate_id"], ANYA);
    assert_eq!(body["applications"][0]["job_id"], OPEN_JOB);
    assert_eq!(body["applications"][0]["company_name"], "Beta Solutions PLC");
}

#[tokio::test]
async fn profile_endpoint_requires_owner_or_admin() {
    let uri = format!("/api/v1/candidates/{ANYA}/profile");

    let (status, _) = send(router(), get(&uri)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(router(), get_as(&uri, BEN)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "ต้องเป็นแอดมินเท่านั้น");

    let (status, body) = send(router(), get_as(&uri, ADMIN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applications"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        router(),
        get_as("/api/v1/candidates/39999999/profile", ADMIN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "ไม่พบผู้สมัคร");
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let (status, _) = send(router(), get("/api/v1/admin/jobs")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(router(), get_as("/api/v1/admin/jobs", ANYA)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "ต้องเป็นแอดมินเท่านั้น");

    let (status, body) = send(router(), get_as("/api/v1/admin/jobs", ADMIN)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["applicant_count"], 1);
}

#[tokio::test]
async fn admin_can_list_candidates_sorted() {
    let (status, body) = send(
        router(),
        get_as("/api/v1/admin/candidates?sort=last_name", ADMIN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["last_name"], "Chan");
}
