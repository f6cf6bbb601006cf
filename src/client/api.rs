//! Typed access to the wastage backend. All calls go through here.

use chrono::NaiveDate;

use crate::errors::ClientError;
use crate::models::{
    DailyTotalRow, ItemCreate, ItemUpdate, ItemView, LogCreate, LogUpdate, LogView, Vendor,
    WasteLog,
};
use crate::reports::{SummaryReport, WeeklyRow};

/// The slice of the backend the tally store depends on. `ApiClient` is the
/// production implementation; tests substitute in-process doubles.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn create_log(&self, req: &LogCreate) -> Result<WasteLog, ClientError>;
    async fn delete_log(&self, log_id: i64) -> Result<(), ClientError>;
    async fn today_logs(&self) -> Result<Vec<LogView>, ClientError>;
    async fn daily_totals(&self, date: NaiveDate) -> Result<Vec<DailyTotalRow>, ClientError>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Non-2xx responses become `ClientError::Backend` carrying the body as
    /// diagnostic text.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    pub async fn items(&self, active_only: bool) -> Result<Vec<ItemView>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/items"))
            .query(&[("active_only", active_only)])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create_item(&self, req: &ItemCreate) -> Result<ItemView, ClientError> {
        let body = serde_json::json!({ "vendor_id": req.vendor_id, "name": req.name });
        let resp = self.http.post(self.url("/api/items")).json(&body).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn update_item(&self, item_id: i64, req: &ItemUpdate) -> Result<ItemView, ClientError> {
        let body = serde_json::json!({
            "name": req.name,
            "is_active": req.is_active,
            "vendor_id": req.vendor_id,
        });
        let resp = self
            .http
            .patch(self.url(&format!("/api/items/{item_id}")))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>, ClientError> {
        let resp = self.http.get(self.url("/api/vendors")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create_vendor(&self, name: &str) -> Result<Vendor, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/vendors"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn update_log(&self, log_id: i64, req: &LogUpdate) -> Result<WasteLog, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/api/logs/{log_id}")))
            .json(req)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn weekly_report(&self, week_start: NaiveDate) -> Result<Vec<WeeklyRow>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/reports/weekly"))
            .query(&[("week_start", week_start.to_string())])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn summary_report(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SummaryReport, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/reports/summary"))
            .query(&[
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
            ])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// The CSV export is opened directly (browser download), not fetched
    /// through the JSON client, so only the URL is built here.
    pub fn csv_export_url(&self, start_date: NaiveDate, end_date: NaiveDate) -> String {
        self.url(&format!(
            "/api/reports/csv?start_date={start_date}&end_date={end_date}"
        ))
    }
}

impl Backend for ApiClient {
    async fn create_log(&self, req: &LogCreate) -> Result<WasteLog, ClientError> {
        let resp = self.http.post(self.url("/api/logs")).json(req).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete_log(&self, log_id: i64) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/logs/{log_id}")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn today_logs(&self) -> Result<Vec<LogView>, ClientError> {
        let resp = self.http.get(self.url("/api/logs/today")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn daily_totals(&self, date: NaiveDate) -> Result<Vec<DailyTotalRow>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/logs/daily-totals"))
            .query(&[("target_date", date.to_string())])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
