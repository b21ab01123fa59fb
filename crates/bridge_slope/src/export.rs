use crate::{
    bridge::BridgeReport,
    classify::TileGrid,
    constants::{CSV_ROW_HEADER, FILE_PREFIX},
    error::{Result, SlopeError},
};
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// `<dir>/bridge_<timestamp>.<ext>`, creating `dir` if needed
fn timestamped_path(output_dir: Option<&Path>, ext: &str) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("{FILE_PREFIX}_{timestamp}.{ext}");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| SlopeError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };
    Ok(file_path)
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| SlopeError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Write the tile grid as CSV: header `Row,0,1,...`, then one record per
/// grid row (row 0 first) with tile names or an empty field.
pub fn export_grid_csv(grid: &TileGrid, output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_path = timestamped_path(output_dir, "csv")?;
    let writer = create_file(&file_path)?;

    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }
    let mut wtr = builder.from_writer(writer);

    let mut header = vec![CSV_ROW_HEADER.to_string()];
    header.extend((0..grid.cols()).map(|c| c.to_string()));
    wtr.write_record(&header)?;

    for (r, row) in grid.iter_rows().enumerate() {
        let mut record = vec![r.to_string()];
        record.extend(
            row.iter()
                .map(|tile| tile.map(|b| b.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(file_path)
}

/// Write the full report (parameters, anchors, coefficients, grid) as JSON
pub fn export_report_json(report: &BridgeReport, output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_path = timestamped_path(output_dir, "json")?;
    let writer = create_file(&file_path)?;
    serde_json::to_writer_pretty(writer, report)?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use std::fs;
    use tempfile::TempDir;

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn test_export_grid_csv() {
        let temp_dir = TempDir::new().unwrap();
        let bridge = Bridge::new(4.0, 0.0, 1.0).unwrap();

        let path = export_grid_csv(bridge.grid(), Some(temp_dir.path())).unwrap();
        let name = file_name(&path);
        assert!(name.starts_with("bridge_"));
        assert!(name.ends_with(".csv"));

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ["Row", "0", "1", "2", "3"]);

        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            ["0", "stairs-left", "", "", "stairs-right"]
        );
        assert_eq!(
            records[1].iter().collect::<Vec<_>>(),
            ["1", "", "slab-top", "slab-top", ""]
        );
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let bridge = Bridge::new(1.0, 0.0, 0.0).unwrap();

        let path = export_grid_csv(bridge.grid(), Some(&nested)).unwrap();
        assert!(nested.is_dir());
        assert!(path.exists());
    }

    #[test]
    fn test_export_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let bridge = Bridge::new(4.0, 0.0, 1.0).unwrap();
        let report = bridge.report();

        let path = export_report_json(&report, Some(temp_dir.path())).unwrap();
        assert!(file_name(&path).ends_with(".json"));

        let content = fs::read_to_string(&path).unwrap();
        let parsed: BridgeReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
        assert!(content.contains("\"stairs-right\""));
    }

    #[test]
    fn test_export_to_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("occupied");
        fs::write(&file_path, "x").unwrap();
        let bridge = Bridge::new(1.0, 0.0, 0.0).unwrap();

        let err = export_grid_csv(bridge.grid(), Some(&file_path)).unwrap_err();
        assert!(matches!(err, SlopeError::CreateDir { .. }));
    }
}
