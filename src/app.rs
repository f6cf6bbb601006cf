use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/items", get(handlers::get_items).post(handlers::create_item))
        .route("/api/items/:id", patch(handlers::update_item))
        .route("/api/vendors", get(handlers::get_vendors).post(handlers::create_vendor))
        .route("/api/logs", post(handlers::create_log))
        .route("/api/logs/today", get(handlers::get_today_logs))
        .route("/api/logs/daily-totals", get(handlers::get_daily_totals))
        .route("/api/logs/:id", delete(handlers::delete_log).patch(handlers::update_log))
        .route("/api/reports/weekly", get(handlers::get_weekly_report))
        .route("/api/reports/summary", get(handlers::get_summary_report))
        .route("/api/reports/csv", get(handlers::export_csv))
        .with_state(state)
}
