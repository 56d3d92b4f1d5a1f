use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::error::FairError;
use super::service::{JobFairService, APPLY_SUCCESS_MESSAGE};
use super::sorting::{ApplicationSortKey, CandidateSortKey, JobSortKey};
use super::validation::{validate_email, ValidationError};
use crate::domain::{CandidateId, JobId};
use crate::store::StoreError;

/// Header naming the acting candidate on profile and admin routes.
pub const ACTING_CANDIDATE_HEADER: &str = "x-candidate-id";

/// Router exposing the candidate and admin workflows as JSON endpoints.
pub fn job_fair_router(service: Arc<JobFairService>) -> Router {
    Router::new()
        .route("/api/v1/login", post(login_handler))
        .route("/api/v1/jobs", get(open_jobs_handler))
        .route("/api/v1/jobs/:job_id/eligibility", get(eligibility_handler))
        .route("/api/v1/jobs/:job_id/applications", post(apply_handler))
        .route(
            "/api/v1/candidates/:candidate_id/profile",
            get(profile_handler),
        )
        .route("/api/v1/admin/jobs", get(admin_jobs_handler))
        .route("/api/v1/admin/candidates", get(admin_candidates_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub candidate_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub candidate_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

impl SortQuery {
    fn name(&self) -> &str {
        self.sort.as_deref().unwrap_or("")
    }
}

/// Success flag plus the message to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

fn status_for(err: &FairError) -> StatusCode {
    match err {
        FairError::UnknownCandidateId | FairError::EmailMismatch => StatusCode::UNAUTHORIZED,
        FairError::JobNotFound | FairError::CandidateNotFound => StatusCode::NOT_FOUND,
        FairError::DuplicateApplication => StatusCode::CONFLICT,
        FairError::JobClosed | FairError::InvalidDeadline | FairError::DeadlinePassed => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FairError::AdminRequired => StatusCode::FORBIDDEN,
        FairError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    let body = Outcome { ok: false, message };
    (status, Json(body)).into_response()
}

fn fair_failure(err: FairError) -> Response {
    if !err.is_rejection() {
        error!(error = %err, "job fair storage failure");
    }
    failure(status_for(&err), err.to_string())
}

fn invalid_input(err: ValidationError) -> Response {
    failure(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

/// Identity named by the acting-candidate header; absent means unknown.
fn acting_id(headers: &HeaderMap) -> Result<CandidateId, Response> {
    let raw = headers
        .get(ACTING_CANDIDATE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| fair_failure(FairError::UnknownCandidateId))?;
    CandidateId::parse(raw).map_err(invalid_input)
}

/// Runs a service call on the blocking pool; the store does synchronous file I/O.
async fn blocking<T, F>(service: &Arc<JobFairService>, work: F) -> Result<T, FairError>
where
    T: Send + 'static,
    F: FnOnce(&JobFairService) -> Result<T, FairError> + Send + 'static,
{
    let service = Arc::clone(service);
    tokio::task::spawn_blocking(move || work(&service))
        .await
        .unwrap_or_else(|err| {
            Err(FairError::Store(StoreError::Unavailable(format!(
                "service task failed: {err}"
            ))))
        })
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, FairError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => fair_failure(err),
    }
}

pub(crate) async fn login_handler(
    State(service): State<Arc<JobFairService>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let candidate_id = match CandidateId::parse(&request.candidate_id) {
        Ok(id) => id,
        Err(err) => return invalid_input(err),
    };
    let email = match validate_email(&request.email) {
        Ok(email) => email,
        Err(err) => return invalid_input(err),
    };

    let result = blocking(&service, move |service| service.login(&candidate_id, &email)).await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn open_jobs_handler(
    State(service): State<Arc<JobFairService>>,
    Query(query): Query<SortQuery>,
) -> Response {
    let key = JobSortKey::from_name(query.name());
    let result = blocking(&service, move |service| service.open_job_listings(key)).await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn eligibility_handler(
    State(service): State<Arc<JobFairService>>,
    Path(job_id): Path<String>,
) -> Response {
    let result = blocking(&service, move |service| service.can_apply(&JobId(job_id))).await;
    let outcome = match result {
        Ok(()) => Outcome {
            ok: true,
            message: String::new(),
        },
        Err(err) if err.is_rejection() => Outcome {
            ok: false,
            message: err.to_string(),
        },
        Err(err) => return fair_failure(err),
    };
    (StatusCode::OK, Json(outcome)).into_response()
}

pub(crate) async fn apply_handler(
    State(service): State<Arc<JobFairService>>,
    Path(job_id): Path<String>,
    Json(request): Json<ApplyRequest>,
) -> Response {
    let candidate_id = match CandidateId::parse(&request.candidate_id) {
        Ok(id) => id,
        Err(err) => return invalid_input(err),
    };

    let result = blocking(&service, move |service| {
        service.apply_job(&JobId(job_id), &candidate_id)
    })
    .await;

    match result {
        Ok(application) => {
            let body = json!({
                "ok": true,
                "message": APPLY_SUCCESS_MESSAGE,
                "application": application,
            });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err) => fair_failure(err),
    }
}

/// Own profile, or any profile for an admin.
pub(crate) async fn profile_handler(
    State(service): State<Arc<JobFairService>>,
    headers: HeaderMap,
    Path(candidate_id): Path<String>,
    Query(query): Query<SortQuery>,
) -> Response {
    let acting = match acting_id(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let key = ApplicationSortKey::from_name(query.name());

    let result = blocking(&service, move |service| {
        let subject = CandidateId(candidate_id);
        service.require_self_or_admin(&acting, &subject)?;
        service.candidate_profile(&subject, key)
    })
    .await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn admin_jobs_handler(
    State(service): State<Arc<JobFairService>>,
    headers: HeaderMap,
) -> Response {
    let acting = match acting_id(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = blocking(&service, move |service| {
        service.require_admin(&acting)?;
        service.admin_counts_by_job()
    })
    .await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn admin_candidates_handler(
    State(service): State<Arc<JobFairService>>,
    headers: HeaderMap,
    Query(query): Query<SortQuery>,
) -> Response {
    let acting = match acting_id(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let key = CandidateSortKey::from_name(query.name());

    let result = blocking(&service, move |service| {
        service.require_admin(&acting)?;
        service.candidates_sorted(key)
    })
    .await;
    respond(StatusCode::OK, result)
}
