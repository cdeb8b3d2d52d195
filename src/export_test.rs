use std::io::Read;

use crate::export::{default_artifact_name, export_csv, export_json, export_xlsx};
use crate::types::Record;

fn sample_records() -> Vec<Record> {
    serde_json::from_value(serde_json::json!([
        {
            "deviceid": "D1",
            "devicetime": "2024-01-01T00:00:00",
            "data": { "evt": { "etm": 5, "csm": 2 } }
        },
        {
            "deviceid": "D2",
            "devicetime": "2024-01-01T00:05:00",
            "data": { "evt": { "etm": 7, "csm": 3 }, "binfo": { "bvt": 3.5, "bpon": 1 } }
        }
    ]))
    .unwrap()
}

#[test]
fn test_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv").to_str().unwrap().to_owned();

    export_csv(&sample_records(), Some(path.clone())).unwrap();

    let mut buf = String::new();
    std::fs::File::open(&path).unwrap().read_to_string(&mut buf).unwrap();
    assert_eq!(
        buf,
        "\"Device ID\",\"Device Time\",\"ETM\",\"CSM\",\"Battery Voltage\",\"Battery Power\"\n\
         \"D1\",\"2024-01-01T00:00:00\",\"5\",\"2\",\"\",\"\"\n\
         \"D2\",\"2024-01-01T00:05:00\",\"7\",\"3\",\"3.5\",\"On\"\n"
    );
}

#[test]
fn test_export_csv_overwrites_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv").to_str().unwrap().to_owned();

    export_csv(&sample_records(), Some(path.clone())).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    export_csv(&sample_records()[..1].to_vec(), Some(path.clone())).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();
    assert!(second.len() < first.len());
    assert!(!second.contains("D2"));
}

#[test]
fn test_export_json_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json").to_str().unwrap().to_owned();

    let records = sample_records();
    export_json(&records, Some(path.clone())).unwrap();

    let buf = std::fs::read_to_string(&path).unwrap();
    assert!(buf.starts_with("[\n")); // pretty-printed
    let decoded: Vec<Record> = serde_json::from_str(&buf).unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn test_export_xlsx_writes_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx").to_str().unwrap().to_owned();

    export_xlsx(&sample_records(), Some(path.clone())).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_export_refuses_an_empty_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv").to_str().unwrap().to_owned();

    let err = export_csv(&[], Some(path.clone())).unwrap_err();
    assert!(err.to_string().contains("No data to export"));
    assert!(!std::path::Path::new(&path).exists());

    assert!(export_json(&[], None).is_err());
    assert!(export_xlsx(&[], None).is_err());
}

#[test]
fn test_default_artifact_name() {
    let name = default_artifact_name("csv");
    assert!(name.starts_with("aquesa_data_"));
    assert!(name.ends_with(".csv"));
}
