use std::path::Path;

use serde::Serialize;
use worldline_core::BodyId;
use worldline_orbits::OrbitPath;

use crate::{ExportError, writer_for_path};

#[derive(Debug, Serialize)]
struct OrbitRow {
    body: BodyId,
    index: usize,
    x: f64,
    y: f64,
    z: f64,
}

/// Write every ring as `body,index,x,y,z` rows.
pub fn write_orbits_csv(path: &Path, paths: &[OrbitPath]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
    for orbit in paths {
        for (index, point) in orbit.points.iter().enumerate() {
            writer.serialize(OrbitRow {
                body: orbit.body,
                index,
                x: point[0],
                y: point[1],
                z: point[2],
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use worldline_orbits::orbit_paths;

    #[test]
    fn writes_header_and_one_row_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbits.csv");
        let paths = orbit_paths(&fixtures::scene(), 12);
        write_orbits_csv(&path, &paths).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ["body", "index", "x", "y", "z"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), paths.len() * 13);
        assert_eq!(&rows[0][0], "Mercury");
        assert_eq!(&rows[0][1], "0");
    }
}
