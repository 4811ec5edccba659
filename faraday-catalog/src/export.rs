//! Single-column text export.
//!
//! Plotting pipelines downstream consume one scalar per line, so export
//! writes exactly one field of every record of a catalog, selected by a
//! one-character field code.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::record::SourceRecord;

/// An exportable record scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ra,
    Dec,
    Redshift,
    StellarMass,
    Color,
    Rm,
    RmMean,
    RmDelta,
    NeighborCount,
    RmMeanNn,
    RmDeltaNn,
    RmSdNn,
    RmMedianDelta,
    MollweideTheta,
    MollweideThetaGal,
    GalLon,
    GalLat,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::Ra,
        Field::Dec,
        Field::Redshift,
        Field::StellarMass,
        Field::Color,
        Field::Rm,
        Field::RmMean,
        Field::RmDelta,
        Field::NeighborCount,
        Field::RmMeanNn,
        Field::RmDeltaNn,
        Field::RmSdNn,
        Field::RmMedianDelta,
        Field::MollweideTheta,
        Field::MollweideThetaGal,
        Field::GalLon,
        Field::GalLat,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        let field = match code {
            'x' => Field::Ra,
            'y' => Field::Dec,
            'z' => Field::Redshift,
            'm' => Field::StellarMass,
            'u' => Field::Color,
            'r' => Field::Rm,
            'c' => Field::RmMean,
            'd' => Field::RmDelta,
            'n' => Field::NeighborCount,
            'g' => Field::RmMeanNn,
            'e' => Field::RmDeltaNn,
            'h' => Field::RmSdNn,
            'f' => Field::RmMedianDelta,
            'a' => Field::MollweideTheta,
            'b' => Field::MollweideThetaGal,
            'k' => Field::GalLon,
            'l' => Field::GalLat,
            _ => return None,
        };
        Some(field)
    }

    pub fn code(self) -> char {
        match self {
            Field::Ra => 'x',
            Field::Dec => 'y',
            Field::Redshift => 'z',
            Field::StellarMass => 'm',
            Field::Color => 'u',
            Field::Rm => 'r',
            Field::RmMean => 'c',
            Field::RmDelta => 'd',
            Field::NeighborCount => 'n',
            Field::RmMeanNn => 'g',
            Field::RmDeltaNn => 'e',
            Field::RmSdNn => 'h',
            Field::RmMedianDelta => 'f',
            Field::MollweideTheta => 'a',
            Field::MollweideThetaGal => 'b',
            Field::GalLon => 'k',
            Field::GalLat => 'l',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Ra => "ra",
            Field::Dec => "dec",
            Field::Redshift => "redshift",
            Field::StellarMass => "stellar_mass",
            Field::Color => "color",
            Field::Rm => "rm",
            Field::RmMean => "rm_mean",
            Field::RmDelta => "rm_delta",
            Field::NeighborCount => "neighbor_count",
            Field::RmMeanNn => "rm_mean_nn",
            Field::RmDeltaNn => "rm_delta_nn",
            Field::RmSdNn => "rm_sd_nn",
            Field::RmMedianDelta => "rm_median_delta",
            Field::MollweideTheta => "mollweide_theta",
            Field::MollweideThetaGal => "mollweide_theta_gal",
            Field::GalLon => "gal_lon",
            Field::GalLat => "gal_lat",
        }
    }

    pub fn extract(self, record: &SourceRecord) -> f64 {
        match self {
            Field::Ra => record.ra,
            Field::Dec => record.dec,
            Field::Redshift => record.redshift,
            Field::StellarMass => record.stellar_mass,
            Field::Color => record.color,
            Field::Rm => record.rm,
            Field::RmMean => record.rm_mean,
            Field::RmDelta => record.rm_delta,
            Field::NeighborCount => record.neighbor_count as f64,
            Field::RmMeanNn => record.rm_mean_nn,
            Field::RmDeltaNn => record.rm_delta_nn,
            Field::RmSdNn => record.rm_sd_nn,
            Field::RmMedianDelta => record.rm_median_delta,
            Field::MollweideTheta => record.mollweide_theta,
            Field::MollweideThetaGal => record.mollweide_theta_gal,
            Field::GalLon => record.gal_lon,
            Field::GalLat => record.gal_lat,
        }
    }
}

/// Extracts one field of every record, in catalog order.
pub fn column(catalog: &Catalog, field: Field) -> Vec<f64> {
    catalog.records().iter().map(|r| field.extract(r)).collect()
}

/// Writes one field of every record to `path`, one value per line.
/// Returns the number of lines written.
pub fn write_column(catalog: &Catalog, field: Field, path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for record in catalog.records() {
        writeln!(out, "{:.6}", field.extract(record))
            .with_context(|| format!("failed to write export file {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("failed to write export file {}", path.display()))?;
    Ok(catalog.len())
}
