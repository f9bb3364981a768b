use poiforge_core::capture::{BatchExportOptions, CaptureError, CaptureSession};
use poiforge_core::export::{ExportError, Exporter, GeoJsonExporter, ShapefileExporter};
use poiforge_core::place::{parse_payload, PlaceDetail};
use tempfile::tempdir;

fn shaped(id: &str) -> PlaceDetail {
    PlaceDetail::new(id, format!("Place {id}"))
        .with_rings(vec![vec![(116.0, 39.0), (116.1, 39.0), (116.1, 39.1), (116.0, 39.0)]])
}

fn mixed_batch() -> Vec<PlaceDetail> {
    vec![
        shaped("A1"),
        PlaceDetail::new("B1", "No outline"),
        shaped("A2"),
        PlaceDetail::new("B2", "Empty outline").with_rings(vec![]),
        shaped("A3"),
    ]
}

#[test]
fn test_geojson_skip_accounting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("batch.geojson");
    let report = GeoJsonExporter::new().export_batch(&mixed_batch(), &path).unwrap();

    assert_eq!(report.written, 3);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.skipped, vec!["B1".to_string(), "B2".to_string()]);

    let text = std::fs::read_to_string(&path).unwrap();
    let collection: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(collection["type"], "FeatureCollection");
    assert_eq!(collection["features"].as_array().unwrap().len(), 3);
    assert_eq!(collection["features"][1]["properties"]["poiid"], "A2");
}

#[test]
fn test_malformed_rings_are_skipped_or_closed() {
    let dir = tempdir().unwrap();
    let places = vec![
        PlaceDetail::new("EMPTY", "Empty ring").with_rings(vec![vec![]]),
        PlaceDetail::new("OPEN", "Unclosed ring").with_rings(vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]]),
    ];

    let path = dir.path().join("malformed.geojson");
    let report = GeoJsonExporter::new().export_batch(&places, &path).unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, vec!["EMPTY".to_string()]);

    let text = std::fs::read_to_string(&path).unwrap();
    let collection: serde_json::Value = serde_json::from_str(&text).unwrap();
    let feature = &collection["features"][0];
    assert_eq!(feature["properties"]["poiid"], "OPEN");
    let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.first(), ring.last());

    let report = ShapefileExporter::new()
        .export_batch(&places, &dir.path().join("malformed"))
        .unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, vec!["EMPTY".to_string()]);
    let shp = std::fs::read(dir.path().join("malformed.shp")).unwrap();
    // One record holding a single part with the closing vertex added
    assert_eq!(i32::from_le_bytes(shp[148..152].try_into().unwrap()), 4);

    let result = GeoJsonExporter::new().export_one(&places[0], &dir.path().join("empty.geojson"));
    assert!(matches!(result, Err(ExportError::MissingGeometry(id)) if id == "EMPTY"));
}

#[test]
fn test_shapefile_skip_accounting_and_file_set() {
    let dir = tempdir().unwrap();
    let report = ShapefileExporter::new()
        .export_batch(&mixed_batch(), &dir.path().join("areas"))
        .unwrap();

    assert_eq!(report.written, 3);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.path, dir.path().join("areas.shp"));

    for ext in ["shp", "shx", "dbf", "prj", "cpg"] {
        assert!(dir.path().join(format!("areas.{ext}")).is_file(), "missing .{ext}");
    }
    let prj = std::fs::read_to_string(dir.path().join("areas.prj")).unwrap();
    assert!(prj.contains("WGS_1984"));

    let dbf = std::fs::read(dir.path().join("areas.dbf")).unwrap();
    assert_eq!(u32::from_le_bytes(dbf[4..8].try_into().unwrap()), 3);

    let shx = std::fs::read(dir.path().join("areas.shx")).unwrap();
    assert_eq!(shx.len(), 100 + 3 * 8);
}

#[test]
fn test_nothing_to_export_leaves_no_files() {
    let dir = tempdir().unwrap();
    let places = vec![PlaceDetail::new("B1", "bare")];

    let geojson = GeoJsonExporter::new().export_batch(&places, &dir.path().join("x.geojson"));
    assert!(matches!(geojson, Err(ExportError::NothingToExport)));

    let shp = ShapefileExporter::new().export_batch(&places, &dir.path().join("x.shp"));
    assert!(matches!(shp, Err(ExportError::NothingToExport)));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_export_one_requires_geometry() {
    let dir = tempdir().unwrap();
    let result = GeoJsonExporter::new().export_one(&PlaceDetail::new("B9", "bare"), &dir.path().join("b9.geojson"));
    assert!(matches!(result, Err(ExportError::MissingGeometry(id)) if id == "B9"));

    let path = ShapefileExporter::new().export_one(&shaped("A9"), &dir.path().join("a9")).unwrap();
    assert_eq!(path, dir.path().join("a9.shp"));
}

#[test]
fn test_session_batch_export_unions_skips_and_clears() {
    let dir = tempdir().unwrap();
    let mut session = CaptureSession::new();
    for place in mixed_batch() {
        session.store(place);
    }

    let options = BatchExportOptions::new(dir.path(), session.default_export_name());
    let summary = session.run_batch_export(&options).unwrap();

    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.skipped, vec!["B1".to_string(), "B2".to_string()]);
    assert!(dir.path().join("gaode_5.geojson").is_file());
    assert!(dir.path().join("gaode_5.shp").is_file());
    assert!(session.is_empty());
}

#[test]
fn test_session_keeps_places_when_export_fails() {
    let dir = tempdir().unwrap();
    let mut session = CaptureSession::new();
    session.store(PlaceDetail::new("B1", "bare"));

    let options = BatchExportOptions::new(dir.path(), "fail");
    let result = session.run_batch_export(&options);
    assert!(matches!(result, Err(CaptureError::Export(ExportError::NothingToExport))));
    assert_eq!(session.len(), 1);
}

#[test]
fn test_payload_to_geojson_pipeline() {
    let body = r#"{
        "status": "1",
        "data": {
            "base": {"poiid": "B0PIPE", "name": "公园", "address": "路1号", "telephone": ""},
            "spec": {"mining_shape": {
                "shape": "116.40,39.91;116.40,39.91;116.41,39.91;116.41,39.92@116.5,39.9;116.5,39.9",
                "level": 15
            }}
        }
    }"#;
    let place = parse_payload(body, "B0PIPE").unwrap();
    let rings = place.rings().unwrap();
    // Degenerate second ring dropped, duplicate vertex removed, ring closed
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 4);

    let dir = tempdir().unwrap();
    let path = dir.path().join("pipe.geojson");
    GeoJsonExporter::new().export_one(&place, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("公园"));
    assert!(text.contains("\"Polygon\""));
}
