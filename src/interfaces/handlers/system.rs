use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use once_cell::sync::Lazy;
use chrono::Utc;
use std::{
    time::Duration,
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
};
use serde::Serialize;
use crate::{
    constants::START_TIME,
    repositories::{post::PostRepository, project::ProjectRepository},
    use_cases::extractors::AdminClaims,
    AppState,
};

/// Seconds a health snapshot is reused before the store is probed again.
const HEALTH_CACHE_SECONDS: i64 = 5;

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: String,
    version: String,
    posts_total: i64,
    projects_total: i64,
}

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_STATUS: Lazy<RwLock<HealthCheckResponse>> = Lazy::new(||
    RwLock::new(HealthCheckResponse::default())
);

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let (status, db_status) = match state.post_handler.check_connection().await {
        Ok(_) => ("healthy", "OK"),
        Err(e) => {
            tracing::warn!("Health check could not reach the store: {}", e);
            ("degraded", "Unavailable")
        }
    };

    let posts_total = state.post_handler.post_repo.count_posts(false).await.unwrap_or(0);
    let projects_total = state.project_handler.project_repo.count_projects().await.unwrap_or(0);

    HealthCheckResponse {
        status: status.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        database: db_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        posts_total,
        projects_total,
    }
}

#[get("/health")]
pub async fn admin_health_check(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_CHECK.load(Ordering::Relaxed);

    if now - last > HEALTH_CACHE_SECONDS {
        let response = build_health_response(&state).await;

        if let Ok(mut cache) = CACHED_STATUS.write() {
            *cache = response.clone();
            LAST_CHECK.store(now, Ordering::Relaxed);
        }

        HttpResponse::Ok().json(response)
    } else {
        match CACHED_STATUS.read() {
            Ok(response) => HttpResponse::Ok().json(response.clone()),
            Err(e) => {
                tracing::warn!("HealthCheck cache lock poisoned: {}", e);
                let response = build_health_response(&state).await;
                HttpResponse::Ok().json(response)
            }
        }
    }
}
