//! Whitespace-delimited survey table ingestion.
//!
//! Both survey formats are one record per line: galaxy tables carry
//! `ra dec redshift abs_mag color stellar_mass`, rotation-measure tables
//! `ra dec gal_lon gal_lat rm`. Blank lines and `#` comments are skipped.
//! Comoving distances arrive in a separate single-column file (Gpc), one
//! value per galaxy record in the same order.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use faraday_core::angular_diameter_distance;
use faraday_core::constants::KPC_PER_GPC;

use crate::catalog::{Catalog, CatalogKind};
use crate::record::SourceRecord;

const GALAXY_FIELDS: usize = 6;
const RM_FIELDS: usize = 5;

/// Parses the non-comment lines of a table into per-line float vectors.
fn parse_rows(text: &str, fields: usize, path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut row = Vec::with_capacity(fields);
        for token in line.split_whitespace() {
            let value: f64 = token.parse().with_context(|| {
                format!(
                    "{}:{}: unparseable value {:?}",
                    path.display(),
                    number + 1,
                    token
                )
            })?;
            row.push(value);
        }
        if row.len() != fields {
            bail!(
                "{}:{}: expected {} fields, found {}",
                path.display(),
                number + 1,
                fields,
                row.len()
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

fn read_table(path: &Path, fields: usize) -> Result<Vec<Vec<f64>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    parse_rows(&text, fields, path)
}

/// Loads an optical galaxy table.
pub fn load_galaxy_catalog(path: &Path) -> Result<Catalog> {
    let rows = read_table(path, GALAXY_FIELDS)?;
    let mut catalog = Catalog::with_capacity(CatalogKind::Galaxy, rows.len());
    for row in rows {
        let mut record = SourceRecord::default();
        record.ra = row[0];
        record.dec = row[1];
        record.redshift = row[2];
        record.abs_mag = row[3];
        record.color = row[4];
        record.stellar_mass = row[5];
        catalog.push(record);
    }
    Ok(catalog)
}

/// Loads a rotation-measure table.
pub fn load_rm_catalog(path: &Path) -> Result<Catalog> {
    let rows = read_table(path, RM_FIELDS)?;
    let mut catalog = Catalog::with_capacity(CatalogKind::RotationMeasure, rows.len());
    for row in rows {
        let mut record = SourceRecord::default();
        record.ra = row[0];
        record.dec = row[1];
        record.gal_lon = row[2];
        record.gal_lat = row[3];
        record.rm = row[4];
        catalog.push(record);
    }
    Ok(catalog)
}

/// Attaches comoving distances (Gpc, one per line) to a galaxy catalog and
/// derives angular-diameter distances. The file must carry exactly one
/// value per record.
pub fn attach_distances(catalog: &mut Catalog, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read distance table {}", path.display()))?;
    let mut values = Vec::with_capacity(catalog.len());
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value: f64 = line.parse().with_context(|| {
            format!(
                "{}:{}: unparseable distance {:?}",
                path.display(),
                number + 1,
                line
            )
        })?;
        values.push(value);
    }
    if values.len() != catalog.len() {
        bail!(
            "{}: {} distances for {} catalog records",
            path.display(),
            values.len(),
            catalog.len()
        );
    }
    for (record, gpc) in catalog.records_mut().iter_mut().zip(values) {
        record.comoving_d = gpc * KPC_PER_GPC;
        record.ang_diam_d = angular_diameter_distance(record.redshift, record.comoving_d);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn galaxy_table_loads_all_fields() {
        let file = table(
            "# ra dec z mag color mass\n\
             150.1 2.2 0.05 -21.5 0.9 10.6\n\
             \n\
             150.2 2.3 0.08 -20.1 0.7 10.1\n",
        );
        let catalog = load_galaxy_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let first = &catalog.records()[0];
        assert_eq!(first.ra, 150.1);
        assert_eq!(first.dec, 2.2);
        assert_eq!(first.redshift, 0.05);
        assert_eq!(first.abs_mag, -21.5);
        assert_eq!(first.color, 0.9);
        assert_eq!(first.stellar_mass, 10.6);
    }

    #[test]
    fn rm_table_loads_all_fields() {
        let file = table("10.0 -5.0 120.0 45.0 33.5\n");
        let catalog = load_rm_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let r = &catalog.records()[0];
        assert_eq!(r.gal_lon, 120.0);
        assert_eq!(r.gal_lat, 45.0);
        assert_eq!(r.rm, 33.5);
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let file = table("150.1 2.2 0.05 -21.5 0.9 10.6\n150.2 2.3 0.08\n");
        let err = load_galaxy_catalog(file.path()).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains(":2:"), "{message}");
        assert!(message.contains("expected 6 fields, found 3"), "{message}");
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        let file = table("150.1 north 0.05 -21.5 0.9 10.6\n");
        let err = load_galaxy_catalog(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unparseable value"));
    }

    #[test]
    fn distances_scale_to_kpc_and_derive_angular_diameter() {
        let galaxies = table("150.0 2.0 0.5 -21.0 0.8 10.5\n");
        let mut catalog = load_galaxy_catalog(galaxies.path()).unwrap();
        let distances = table("1.2\n");
        attach_distances(&mut catalog, distances.path()).unwrap();
        let r = &catalog.records()[0];
        assert!((r.comoving_d - 1.2e6).abs() < 1e-6);
        assert!((r.ang_diam_d - 1.2e6 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn distance_count_mismatch_reports_both_counts() {
        let galaxies = table("150.0 2.0 0.5 -21.0 0.8 10.5\n151.0 2.1 0.6 -20.0 0.9 10.2\n");
        let mut catalog = load_galaxy_catalog(galaxies.path()).unwrap();
        let distances = table("1.2\n");
        let err = attach_distances(&mut catalog, distances.path()).unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("1 distances for 2 catalog records"), "{message}");
    }
}
