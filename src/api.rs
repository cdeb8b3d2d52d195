use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::types::{
    ApiResult, BatteryStatus, DataResponse, DeviceStatus, DeviceSummary, DuplicatesResponse, MessageResponse,
    MissingResponse, Record, SchedulerStatus, TestEmailResponse,
};

/// Blocking HTTP client for the telemetry backend. One request per user
/// action; there is never more than one in flight.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .or_else(|err| Error::new_transport_error(err, base_url))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    pub fn get_data(&self, device_id: &str, start_date: &str, end_date: &str) -> Result<DataResponse, Error> {
        let endpoint = "/api/get-data";
        self.get_json::<ApiResult<DataResponse>>(
            endpoint,
            &[("device_id", device_id), ("start_date", start_date), ("end_date", end_date)],
        )?
        .into_result(endpoint)
    }

    /// Sends the fetched records back for chart rendering and returns the
    /// PNG bytes. The backend reports rendering failures as 200 text/plain,
    /// so anything that is not a PNG is surfaced as a backend error.
    pub fn render_chart(&self, records: &[Record], start_date: &str, end_date: &str) -> Result<Vec<u8>, Error> {
        let endpoint = "/api/render-chart";
        let body = serde_json::json!({
            "records": records,
            "start_date": start_date,
            "end_date": end_date,
        });

        let started = Instant::now();
        let response = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .json(&body)
            .send()
            .or_else(|err| Error::new_transport_error(err, endpoint))?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let bytes = response
            .bytes()
            .or_else(|err| Error::new_transport_error(err, endpoint))?;
        debug!(endpoint, status = status.as_u16(), elapsed_ms = started.elapsed().as_millis() as u64, "request finished");

        if !status.is_success() {
            return Error::new_api_error(endpoint, Some(status.as_u16()), extract_message(status, &String::from_utf8_lossy(&bytes)));
        }
        if !content_type.starts_with("image/png") {
            return Error::new_api_error(endpoint, Some(status.as_u16()), String::from_utf8_lossy(&bytes).trim().to_owned());
        }
        Ok(bytes.to_vec())
    }

    pub fn find_duplicates(&self, device_id: &str, start: &str, end: &str) -> Result<DuplicatesResponse, Error> {
        let endpoint = "/api/find-duplicates";
        self.get_json::<ApiResult<DuplicatesResponse>>(
            endpoint,
            &[("device_id", device_id), ("start", start), ("end", end)],
        )?
        .into_result(endpoint)
    }

    pub fn missing_intervals(&self, device_id: &str, start: &str, end: &str) -> Result<MissingResponse, Error> {
        self.get_json(
            "/api/missing-intervals",
            &[("device_id", device_id), ("start", start), ("end", end)],
        )
    }

    pub fn device_status(&self, device_id: &str) -> Result<DeviceStatus, Error> {
        self.get_json("/api/device-status", &[("device_id", device_id)])
    }

    pub fn all_device_status(&self) -> Result<Vec<DeviceSummary>, Error> {
        self.get_json("/api/all-device-status", &[])
    }

    pub fn clear_device_status_cache(&self) -> Result<MessageResponse, Error> {
        self.post_json("/api/clear-device-status-cache", &[])
    }

    pub fn battery_status(&self, device_id: &str) -> Result<BatteryStatus, Error> {
        self.get_json("/api/battery-status", &[("device_id", device_id)])
    }

    pub fn email_scheduler_status(&self) -> Result<SchedulerStatus, Error> {
        self.get_json("/api/email-scheduler-status", &[])
    }

    pub fn send_test_email(&self, device_id: Option<&str>) -> Result<TestEmailResponse, Error> {
        match device_id {
            Some(device_id) => self.post_json("/api/send-test-email", &[("device_id", device_id)]),
            None => self.post_json("/api/send-test-email", &[]),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, Error> {
        let request = self.http.get(format!("{}{}", self.base_url, endpoint)).query(query);
        self.execute(endpoint, request)
    }

    fn post_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, Error> {
        let request = self.http.post(format!("{}{}", self.base_url, endpoint)).query(query);
        self.execute(endpoint, request)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, Error> {
        let started = Instant::now();
        let response = request.send().or_else(|err| Error::new_transport_error(err, endpoint))?;
        let status = response.status();
        let body = response.text().or_else(|err| Error::new_transport_error(err, endpoint))?;
        debug!(endpoint, status = status.as_u16(), elapsed_ms = started.elapsed().as_millis() as u64, "request finished");

        if !status.is_success() {
            return Error::new_api_error(endpoint, Some(status.as_u16()), extract_message(status, &body));
        }
        serde_json::from_str(&body).or_else(|err| Error::new_decode_error(err, endpoint))
    }
}

/// Pulls the human-readable message out of an error response. The backend
/// uses `detail` (FastAPI), `error` and `message` depending on the endpoint.
fn extract_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_owned();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_owned()
    }
}
