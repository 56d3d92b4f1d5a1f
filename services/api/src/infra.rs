use chrono::NaiveDate;
use jobfair::config::AppConfig;
use jobfair::error::AppError;
use jobfair::store::FairStore;
use jobfair::workflows::job_fair::{FixedClock, JobFairService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// CLI override first, then `APP_DATA_DIR` / the configured default.
pub(crate) fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => Ok(AppConfig::load()?.storage.data_dir),
    }
}

/// CSV-backed service; `today` pins the clock for deadline checks.
pub(crate) fn build_service(data_dir: PathBuf, today: Option<NaiveDate>) -> JobFairService {
    let store = FairStore::csv(data_dir);
    match today {
        Some(date) => JobFairService::with_clock(store, Arc::new(FixedClock::on(date))),
        None => JobFairService::new(store),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2025-06-15 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"))
        );
        assert!(parse_date("15/06/2025").is_err());
    }

    #[test]
    fn explicit_data_dir_skips_config() {
        let dir = PathBuf::from("/tmp/jobfair-data");
        assert_eq!(resolve_data_dir(Some(dir.clone())).expect("resolves"), dir);
    }
}
