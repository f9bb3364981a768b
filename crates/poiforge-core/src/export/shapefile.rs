use std::path::{Path, PathBuf};

use super::dbf::{self, DbfField};
use super::{ensure_parent, partition, ExportError, ExportReport, Exporter, Result, WGS84_WKT};
use crate::geometry::{oriented, Bounds, Polygon, Winding};
use crate::place::PlaceDetail;

const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const SHAPE_TYPE_POLYGON: i32 = 5;
const HEADER_BYTES: usize = 100;
const RECORD_HEADER_BYTES: usize = 8;
const INDEX_RECORD_BYTES: usize = 8;

/// Attribute table columns, matching the GeoJSON properties minus `tag`
pub const FIELDS: [DbfField; 4] = [
    DbfField { name: "name", length: 80 },
    DbfField { name: "address", length: 120 },
    DbfField { name: "telephone", length: 40 },
    DbfField { name: "poiid", length: 32 },
];

/// Writes an ESRI Shapefile set: `.shp`, `.shx`, `.dbf`, `.prj` and `.cpg`
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapefileExporter;

impl ShapefileExporter {
    pub fn new() -> Self {
        Self
    }
}

/// Normalize the requested path so it ends in `.shp`
pub fn shp_path(path: &Path) -> PathBuf {
    let is_shp = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));
    if is_shp {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".shp");
        PathBuf::from(name)
    }
}

/// Polygon record content (without the record header)
fn encode_polygon(rings: &Polygon) -> Vec<u8> {
    let rings: Vec<_> = rings.iter().map(|ring| oriented(ring, Winding::Clockwise)).collect();
    let num_points: usize = rings.iter().map(Vec::len).sum();
    let bounds = Bounds::from_points(rings.iter().flatten());

    let mut out = Vec::with_capacity(44 + 4 * rings.len() + 16 * num_points);
    out.extend_from_slice(&SHAPE_TYPE_POLYGON.to_le_bytes());
    write_bounds(&mut out, bounds);
    out.extend_from_slice(&(rings.len() as i32).to_le_bytes());
    out.extend_from_slice(&(num_points as i32).to_le_bytes());

    let mut start = 0i32;
    for ring in &rings {
        out.extend_from_slice(&start.to_le_bytes());
        start += ring.len() as i32;
    }
    for &(x, y) in rings.iter().flatten() {
        out.extend_from_slice(&x.to_le_bytes());
        out.extend_from_slice(&y.to_le_bytes());
    }
    out
}

fn write_bounds(out: &mut Vec<u8>, bounds: Option<Bounds>) {
    let b = bounds.unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 });
    for value in [b.min_x, b.min_y, b.max_x, b.max_y] {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

fn words(bytes: usize) -> Result<i32> {
    i32::try_from(bytes / 2).map_err(|_| ExportError::TooLarge(format!("{bytes} bytes")))
}

/// Shared 100-byte header of `.shp` and `.shx`
fn encode_header(file_bytes: usize, bounds: Option<Bounds>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_BYTES);
    out.extend_from_slice(&FILE_CODE.to_be_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(&words(file_bytes)?.to_be_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&SHAPE_TYPE_POLYGON.to_le_bytes());
    write_bounds(&mut out, bounds);
    // Z and M ranges are unused for 2D polygons
    out.extend_from_slice(&[0u8; 32]);
    Ok(out)
}

/// Encoded `.shp` and `.shx` contents
pub struct ShapeFiles {
    pub shp: Vec<u8>,
    pub shx: Vec<u8>,
}

/// Encode the geometry files for a list of polygons
pub fn encode_shapes(polygons: &[&Polygon]) -> Result<ShapeFiles> {
    let contents: Vec<Vec<u8>> = polygons.iter().map(|rings| encode_polygon(rings)).collect();
    let bounds = polygons
        .iter()
        .filter_map(|rings| Bounds::from_points(rings.iter().flatten()))
        .reduce(|a, b| a.union(&b));

    let shp_len = HEADER_BYTES
        + contents.iter().map(|c| RECORD_HEADER_BYTES + c.len()).sum::<usize>();
    let shx_len = HEADER_BYTES + INDEX_RECORD_BYTES * contents.len();

    let mut shp = encode_header(shp_len, bounds)?;
    let mut shx = encode_header(shx_len, bounds)?;
    shp.reserve(shp_len - HEADER_BYTES);
    shx.reserve(shx_len - HEADER_BYTES);

    for (index, content) in contents.iter().enumerate() {
        let offset = words(shp.len())?;
        let length = words(content.len())?;
        shx.extend_from_slice(&offset.to_be_bytes());
        shx.extend_from_slice(&length.to_be_bytes());

        shp.extend_from_slice(&(index as i32 + 1).to_be_bytes());
        shp.extend_from_slice(&length.to_be_bytes());
        shp.extend_from_slice(content);
    }

    Ok(ShapeFiles { shp, shx })
}

impl Exporter for ShapefileExporter {
    fn format_name(&self) -> &'static str {
        "Shapefile"
    }

    fn extension(&self) -> &'static str {
        "shp"
    }

    fn export_batch(&self, places: &[PlaceDetail], path: &Path) -> Result<ExportReport> {
        let (writable, skipped) = partition(places);
        if writable.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let polygons: Vec<&Polygon> = writable.iter().map(|(_, rings)| rings).collect();
        let shapes = encode_shapes(&polygons)?;
        let records: Vec<Vec<&str>> = writable
            .iter()
            .map(|(place, _)| {
                vec![
                    place.name.as_str(),
                    place.address.as_str(),
                    place.telephone.as_str(),
                    place.poi_id.as_str(),
                ]
            })
            .collect();
        let table = dbf::encode(&FIELDS, &records, chrono::Local::now().date_naive());

        let shp = shp_path(path);
        ensure_parent(&shp)?;
        let outputs: [(PathBuf, &[u8]); 5] = [
            (shp.clone(), shapes.shp.as_slice()),
            (shp.with_extension("shx"), shapes.shx.as_slice()),
            (shp.with_extension("dbf"), table.as_slice()),
            (shp.with_extension("prj"), WGS84_WKT.as_bytes()),
            (shp.with_extension("cpg"), "UTF-8".as_bytes()),
        ];
        write_file_set(&outputs)?;
        log::info!(
            "Wrote {} polygon record(s) to {} ({} skipped)",
            polygons.len(),
            shp.display(),
            skipped.len()
        );

        Ok(ExportReport { path: shp, written: polygons.len(), skipped })
    }
}

/// Write every file of the set; on failure remove the ones already written
fn write_file_set(outputs: &[(PathBuf, &[u8])]) -> Result<()> {
    for (index, (path, contents)) in outputs.iter().enumerate() {
        if let Err(e) = std::fs::write(path, contents) {
            log::warn!("Failed to write {}: {}", path.display(), e);
            for (written, _) in &outputs[..index] {
                if let Err(e) = std::fs::remove_file(written) {
                    log::warn!("Failed to remove partial output {}: {}", written.display(), e);
                }
            }
            return Err(e.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be_i32(bytes: &[u8], at: usize) -> i32 {
        i32::from_be_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn le_i32(bytes: &[u8], at: usize) -> i32 {
        i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn le_f64(bytes: &[u8], at: usize) -> f64 {
        f64::from_le_bytes(bytes[at..at + 8].try_into().unwrap())
    }

    fn triangle() -> Polygon {
        vec![vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 0.0)]]
    }

    #[test]
    fn test_shp_path_appends_extension() {
        assert_eq!(shp_path(Path::new("out/areas")), PathBuf::from("out/areas.shp"));
        assert_eq!(shp_path(Path::new("out/areas.SHP")), PathBuf::from("out/areas.SHP"));
        assert_eq!(shp_path(Path::new("areas.geo")), PathBuf::from("areas.geo.shp"));
    }

    #[test]
    fn test_header_and_record_sizes() {
        let polygon = triangle();
        let shapes = encode_shapes(&[&polygon]).unwrap();

        // 44 fixed bytes + 1 part index + 4 points
        let content_len = 44 + 4 + 4 * 16;
        assert_eq!(shapes.shp.len(), 100 + 8 + content_len);
        assert_eq!(be_i32(&shapes.shp, 0), 9994);
        assert_eq!(be_i32(&shapes.shp, 24) as usize * 2, shapes.shp.len());
        assert_eq!(le_i32(&shapes.shp, 28), 1000);
        assert_eq!(le_i32(&shapes.shp, 32), 5);
        assert_eq!(le_f64(&shapes.shp, 52), 2.0);

        assert_eq!(be_i32(&shapes.shp, 100), 1);
        assert_eq!(be_i32(&shapes.shp, 104) as usize * 2, content_len);
        assert_eq!(le_i32(&shapes.shp, 108), 5);
        assert_eq!(le_i32(&shapes.shp, 144), 1);
        assert_eq!(le_i32(&shapes.shp, 148), 4);

        assert_eq!(shapes.shx.len(), 108);
        assert_eq!(be_i32(&shapes.shx, 24), 54);
        assert_eq!(be_i32(&shapes.shx, 100), 50);
        assert_eq!(be_i32(&shapes.shx, 104) as usize * 2, content_len);
    }

    #[test]
    fn test_outer_ring_written_clockwise() {
        // triangle() is counter-clockwise
        let content = encode_polygon(&triangle());
        let first_point = 44 + 4;
        assert_eq!(le_f64(&content, first_point), 0.0);
        // Second vertex after reversal is (2, 1)
        assert_eq!(le_f64(&content, first_point + 16), 2.0);
        assert_eq!(le_f64(&content, first_point + 24), 1.0);
    }

    #[test]
    fn test_failed_write_leaves_no_partial_set() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the attribute table should go makes its write fail
        std::fs::create_dir(dir.path().join("areas.dbf")).unwrap();

        let place = PlaceDetail::new("A1", "a").with_rings(triangle());
        let result = ShapefileExporter::new().export_batch(&[place], &dir.path().join("areas"));

        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!dir.path().join("areas.shp").exists());
        assert!(!dir.path().join("areas.shx").exists());
        assert!(!dir.path().join("areas.prj").exists());
    }

    #[test]
    fn test_multi_part_offsets() {
        let polygon = vec![
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)],
            vec![(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (6.0, 5.0), (5.0, 5.0)],
        ];
        let content = encode_polygon(&polygon);
        assert_eq!(le_i32(&content, 36), 2);
        assert_eq!(le_i32(&content, 40), 9);
        assert_eq!(le_i32(&content, 44), 0);
        assert_eq!(le_i32(&content, 48), 4);
    }
}
