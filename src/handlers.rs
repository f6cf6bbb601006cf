use crate::errors::AppError;
use crate::models::{
    DailyTotalRow, ItemCreate, ItemUpdate, ItemView, LogCreate, LogUpdate, LogView, Vendor,
    VendorCreate, WasteLog,
};
use crate::reports::{self, SummaryReport, WeeklyRow};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub async fn index() -> Html<String> {
    Html(render_index())
}

// --- Items ---

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub active_only: Option<bool>,
}

pub async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Vec<ItemView>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.items_view(query.active_only.unwrap_or(true))))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemCreate>,
) -> Result<Json<ItemView>, AppError> {
    let mut data = state.data.lock().await;
    let item = data.create_item(&payload)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<ItemView>, AppError> {
    let mut data = state.data.lock().await;
    let item = data.update_item(item_id, &payload)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(item))
}

// --- Vendors ---

pub async fn get_vendors(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.vendors_sorted()))
}

pub async fn create_vendor(
    State(state): State<AppState>,
    Json(payload): Json<VendorCreate>,
) -> Result<Json<Vendor>, AppError> {
    let mut data = state.data.lock().await;
    let vendor = data.create_vendor(&payload.name)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(vendor))
}

// --- Waste logs ---

pub async fn create_log(
    State(state): State<AppState>,
    Json(payload): Json<LogCreate>,
) -> Result<Json<WasteLog>, AppError> {
    let mut data = state.data.lock().await;
    let log = data.create_log(&payload, now())?;
    persist_data(&state.data_path, &data).await?;
    debug!(
        "logged {}x item {} as {}",
        log.quantity,
        log.item_id,
        log.reason.as_str()
    );
    Ok(Json(log))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut data = state.data.lock().await;
    data.delete_log(log_id)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn update_log(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
    Json(payload): Json<LogUpdate>,
) -> Result<Json<WasteLog>, AppError> {
    let mut data = state.data.lock().await;
    let log = data.update_log(log_id, &payload)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(log))
}

pub async fn get_today_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogView>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.logs_view(today())))
}

#[derive(Debug, Deserialize)]
pub struct DailyTotalsQuery {
    pub target_date: Option<NaiveDate>,
}

pub async fn get_daily_totals(
    State(state): State<AppState>,
    Query(query): Query<DailyTotalsQuery>,
) -> Result<Json<Vec<DailyTotalRow>>, AppError> {
    let data = state.data.lock().await;
    let date = query.target_date.unwrap_or_else(today);
    Ok(Json(data.daily_totals(date)))
}

// --- Reports ---

#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    pub week_start: NaiveDate,
}

pub async fn get_weekly_report(
    State(state): State<AppState>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<Vec<WeeklyRow>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(reports::build_weekly(&data, query.week_start)))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn get_summary_report(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<SummaryReport>, AppError> {
    if query.end_date < query.start_date {
        return Err(AppError::bad_request("end_date is before start_date"));
    }
    let data = state.data.lock().await;
    Ok(Json(reports::build_summary(
        &data,
        query.start_date,
        query.end_date,
    )))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if query.end_date < query.start_date {
        return Err(AppError::bad_request("end_date is before start_date"));
    }
    let data = state.data.lock().await;
    let body = reports::build_csv(&data, query.start_date, query.end_date);
    let disposition = format!(
        "attachment; filename=wastage_{}_to_{}.csv",
        query.start_date, query.end_date
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
