//! Unit tests for sr-report.

use sr_core::{BillboardId, GeoPoint};
use sr_exposure::Billboard;

use crate::ExposureCsvWriter;

fn sample_billboards() -> Vec<Billboard> {
    vec![
        Billboard::new(BillboardId(0), GeoPoint::new(44.8488, 65.5059), 50.0, 120.0),
        Billboard::new(BillboardId(1), GeoPoint::new(44.8490, 65.5065), 80.0, 360.0),
    ]
}

#[test]
fn writes_header_and_one_row_per_billboard() {
    let dir = tempfile::tempdir().unwrap();
    let billboards = sample_billboards();

    let mut writer = ExposureCsvWriter::new(dir.path()).unwrap();
    writer.write_snapshot(1.5, &billboards).unwrap();
    writer.write_snapshot(2.5, &billboards).unwrap();
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(dir.path().join("billboard_exposure.csv")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1 + 2 * billboards.len());
    assert!(lines[0].starts_with("elapsed_secs,billboard,view_rate"));
    assert!(lines[1].starts_with("1.500,BB-01,"));
    assert!(lines[3].starts_with("2.500,BB-01,"));
}

#[test]
fn fresh_billboards_report_zeroes() {
    let dir = tempfile::tempdir().unwrap();
    let billboards = sample_billboards();

    let mut writer = ExposureCsvWriter::new(dir.path()).unwrap();
    writer.write_snapshot(0.0, &billboards).unwrap();
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(dir.path().join("billboard_exposure.csv")).unwrap();
    let row = contents.lines().nth(1).unwrap();
    assert_eq!(row, "0.000,BB-01,0.0000,0,0.00,0");
}

#[test]
fn finish_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = ExposureCsvWriter::new(dir.path()).unwrap();
    writer.finish().unwrap();
    writer.finish().unwrap();
}
