use crate::infra::{build_service, parse_date, resolve_data_dir};
use chrono::NaiveDate;
use clap::Args;
use jobfair::domain::{CandidateId, JobId};
use jobfair::error::AppError;
use jobfair::workflows::job_fair::router::Outcome;
use jobfair::workflows::job_fair::{
    ApplicationSortKey, JobFairService, JobSortKey, APPLY_SUCCESS_MESSAGE,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct JobsArgs {
    /// Sort by title, company or deadline
    #[arg(long, default_value = "title")]
    pub(crate) sort: String,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    pub(crate) job_id: String,
    /// Evaluate the deadline against this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    pub(crate) job_id: String,
    pub(crate) candidate_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    pub(crate) candidate_id: String,
    /// Sort applications by title, company or applied_at
    #[arg(long, default_value = "title")]
    pub(crate) sort: String,
}

fn print_json(value: &Value) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn jobs(service: &JobFairService, sort: &str) -> Result<Value, AppError> {
    let listings = service.open_job_listings(JobSortKey::from_name(sort))?;
    to_value(listings)
}

pub(crate) fn eligibility(service: &JobFairService, job_id: &str) -> Result<Value, AppError> {
    let outcome = match service.can_apply(&JobId::from(job_id)) {
        Ok(()) => Outcome {
            ok: true,
            message: String::new(),
        },
        Err(err) if err.is_rejection() => Outcome {
            ok: false,
            message: err.to_string(),
        },
        Err(err) => return Err(err.into()),
    };
    to_value(outcome)
}

pub(crate) fn apply(
    service: &JobFairService,
    job_id: &str,
    candidate_id: &str,
) -> Result<Value, AppError> {
    let candidate_id = match CandidateId::parse(candidate_id) {
        Ok(id) => id,
        Err(err) => {
            return to_value(Outcome {
                ok: false,
                message: err.to_string(),
            })
        }
    };

    match service.apply_job(&JobId::from(job_id), &candidate_id) {
        Ok(application) => Ok(json!({
            "ok": true,
            "message": APPLY_SUCCESS_MESSAGE,
            "application": application,
        })),
        Err(err) if err.is_rejection() => to_value(Outcome {
            ok: false,
            message: err.to_string(),
        }),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn profile(
    service: &JobFairService,
    candidate_id: &str,
    sort: &str,
) -> Result<Value, AppError> {
    let profile = service.candidate_profile(
        &CandidateId::from(candidate_id.trim()),
        ApplicationSortKey::from_name(sort),
    )?;
    to_value(profile)
}

pub(crate) fn applicants(service: &JobFairService) -> Result<Value, AppError> {
    to_value(service.admin_counts_by_job()?)
}

pub(crate) fn run_jobs(args: JobsArgs, data_dir: Option<PathBuf>) -> Result<(), AppError> {
    let service = build_service(resolve_data_dir(data_dir)?, None);
    print_json(&jobs(&service, &args.sort)?)
}

pub(crate) fn run_eligibility(
    args: EligibilityArgs,
    data_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    let service = build_service(resolve_data_dir(data_dir)?, args.today);
    print_json(&eligibility(&service, &args.job_id)?)
}

pub(crate) fn run_apply(args: ApplyArgs, data_dir: Option<PathBuf>) -> Result<(), AppError> {
    let service = build_service(resolve_data_dir(data_dir)?, None);
    print_json(&apply(&service, &args.job_id, &args.candidate_id)?)
}

pub(crate) fn run_profile(args: ProfileArgs, data_dir: Option<PathBuf>) -> Result<(), AppError> {
    let service = build_service(resolve_data_dir(data_dir)?, None);
    print_json(&profile(&service, &args.candidate_id, &args.sort)?)
}

pub(crate) fn run_applicants(data_dir: Option<PathBuf>) -> Result<(), AppError> {
    let service = build_service(resolve_data_dir(data_dir)?, None);
    print_json(&applicants(&service)?)
}
