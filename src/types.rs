use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// One telemetry document as returned by `/api/get-data`.
///
/// Every field the backend projects is optional. The accessor methods below
/// are the single place that walks the nested payload, so rendering and
/// export code never repeat the fallback logic. Fields this client does not
/// know about are kept in `extra` and round-trip through the JSON export
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviceid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evt: Option<EventData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binfo: Option<BatteryInfo>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csm: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bvt: Option<f64>,
    /// Devices report this as either a JSON bool or a 0/1 integer.
    #[serde(default, deserialize_with = "bool_or_int", skip_serializing_if = "Option::is_none")]
    pub bpon: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn bool_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<BoolOrInt>::deserialize(deserializer)?.map(|value| match value {
        BoolOrInt::Bool(v) => v,
        BoolOrInt::Int(v) => v != 0,
        BoolOrInt::Float(v) => v != 0.0,
    }))
}

impl Record {
    pub fn device_id(&self) -> Option<&str> {
        self.deviceid.as_deref()
    }

    pub fn device_time(&self) -> Option<&str> {
        self.devicetime.as_deref()
    }

    pub fn etm(&self) -> Option<f64> {
        self.data.as_ref()?.evt.as_ref()?.etm
    }

    pub fn csm(&self) -> Option<f64> {
        self.data.as_ref()?.evt.as_ref()?.csm
    }

    pub fn battery_voltage(&self) -> Option<f64> {
        self.data.as_ref()?.binfo.as_ref()?.bvt
    }

    pub fn battery_power(&self) -> Option<bool> {
        self.data.as_ref()?.binfo.as_ref()?.bpon
    }
}

/// Response of `/api/get-data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataResponse {
    pub count: u64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Some endpoints report failures as a 200 response carrying an `error`
/// field instead of a status code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiResult<T> {
    Error { error: String },
    Ok(T),
}

impl<T> ApiResult<T> {
    pub fn into_result(self, endpoint: &str) -> Result<T, Error> {
        match self {
            ApiResult::Error { error } => Error::new_api_error(endpoint, None, error),
            ApiResult::Ok(value) => Ok(value),
        }
    }
}

/// One entry of the `/api/find-duplicates` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DuplicateRecord {
    #[serde(default)]
    pub deviceid: Option<String>,
    #[serde(default)]
    pub devicetime: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DuplicatesResponse {
    pub count: u64,
    #[serde(default)]
    pub duplicates: Vec<DuplicateRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissingInterval {
    pub missing_interval_start: String,
    pub missing_interval_end: String,
}

/// Response of `/api/missing-intervals`. `message` is set instead of
/// `missing_intervals` when the range holds no records at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissingResponse {
    pub count: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub missing_intervals: Option<Vec<MissingInterval>>,
}

/// Response of `/api/device-status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceStatus {
    pub device_id: String,
    pub status: String,
    pub last_seen: String,
    #[serde(default)]
    pub inactive_since: Option<String>,
}

/// One entry of the `/api/all-device-status` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceSummary {
    pub device_id: String,
    pub status: String,
    #[serde(default)]
    pub latest_time: Option<String>,
    #[serde(default)]
    pub hours_since_last: f64,
    #[serde(default)]
    pub record_count: Option<u64>,
    #[serde(default)]
    pub inactive_duration: Option<String>,
}

/// Response of `/api/battery-status`. `voltage` is pre-formatted by the
/// backend ("3.75V", or "N/A" when the device never reported one).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatteryStatus {
    pub device_id: String,
    pub battery_status: String,
    pub voltage: String,
    pub power_on: bool,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Response of `/api/email-scheduler-status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchedulerStatus {
    pub scheduler_running: bool,
    #[serde(default)]
    pub next_scheduled_run: Option<String>,
    pub schedule_time: String,
    pub configured_devices: u64,
    #[serde(default)]
    pub device_list: Vec<String>,
}

/// Response of `/api/clear-device-status-cache`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `/api/send-test-email`. `devices_processed` is present for
/// the send-to-all form, `device_id` for the single-device form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestEmailResponse {
    pub message: String,
    #[serde(default)]
    pub devices_processed: Option<u64>,
    #[serde(default)]
    pub device_id: Option<String>,
}

#[test]
fn test_decode_full_record() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "deviceid": "d3b07384-d9a0-4c9a-8f3a-111111111111",
        "devicetime": "2024-01-01T00:00:00",
        "data": { "evt": { "etm": 5, "csm": 2.5 }, "binfo": { "bvt": 3.75, "bpon": 1 } }
    }))
    .unwrap();
    assert_eq!(record.device_id(), Some("d3b07384-d9a0-4c9a-8f3a-111111111111"));
    assert_eq!(record.etm(), Some(5.0));
    assert_eq!(record.csm(), Some(2.5));
    assert_eq!(record.battery_voltage(), Some(3.75));
    assert_eq!(record.battery_power(), Some(true));
}

#[test]
fn test_decode_sparse_record() {
    let record: Record = serde_json::from_value(serde_json::json!({ "devicetime": "2024-01-01T00:00:00" })).unwrap();
    assert_eq!(record.device_id(), None);
    assert_eq!(record.etm(), None);
    assert_eq!(record.battery_voltage(), None);
    assert_eq!(record.battery_power(), None);

    let record: Record =
        serde_json::from_value(serde_json::json!({ "data": { "binfo": { "bpon": false } } })).unwrap();
    assert_eq!(record.battery_power(), Some(false));
    assert_eq!(record.battery_voltage(), None);
}

#[test]
fn test_unknown_fields_round_trip() {
    let raw = serde_json::json!({
        "deviceid": "d1",
        "sequence": 42,
        "data": { "evt": { "etm": 1 }, "rssi": -70 }
    });
    let record: Record = serde_json::from_value(raw).unwrap();
    let encoded = serde_json::to_value(&record).unwrap();
    assert_eq!(encoded["sequence"], 42);
    assert_eq!(encoded["data"]["rssi"], -70);
}

#[test]
fn test_api_result_decodes_both_arms() {
    let ok: ApiResult<DataResponse> = serde_json::from_value(serde_json::json!({
        "count": 1,
        "start_time": "2024-01-01T00:00:00",
        "end_time": "2024-01-02T00:00:00",
        "records": [{ "deviceid": "d1" }]
    }))
    .unwrap();
    assert!(matches!(ok, ApiResult::Ok(DataResponse { count: 1, .. })));

    let err: ApiResult<DataResponse> =
        serde_json::from_value(serde_json::json!({ "error": "badly formed hexadecimal UUID string" })).unwrap();
    assert!(matches!(err, ApiResult::Error { .. }));
    assert!(err.into_result("/api/get-data").is_err());
}
