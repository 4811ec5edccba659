//! Binary catalog snapshots.
//!
//! The snapshot format has two contiguous sections:
//!
//! 1. **Header** (32 bytes): magic, version, catalog kind, record count,
//!    impact threshold
//! 2. **Record data** (`count * 176` bytes): every scalar of a
//!    [`SourceRecord`] as little-endian f64, then the neighbor count
//!
//! Snapshots store fully derived records, so a `LOAD` skips both text
//! ingestion and geometry finalization.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::catalog::{Catalog, CatalogKind};
use crate::record::SourceRecord;

const SNAPSHOT_MAGIC: &[u8; 4] = b"FCAT";
const SNAPSHOT_VERSION: u32 = 1;
const HEADER_SIZE: usize = 32;
const SCALAR_FIELDS: usize = 21;
const RECORD_SIZE: usize = SCALAR_FIELDS * 8 + 8;

const _: () = assert!(RECORD_SIZE == 176);

/// The record scalars in snapshot order. [`apply_scalars`] must mirror
/// this list exactly.
fn scalars(r: &SourceRecord) -> [f64; SCALAR_FIELDS] {
    [
        r.ra,
        r.dec,
        r.redshift,
        r.abs_mag,
        r.color,
        r.stellar_mass,
        r.gal_lon,
        r.gal_lat,
        r.rm,
        r.rm_mean,
        r.rm_delta,
        r.rm_mean_nn,
        r.rm_delta_nn,
        r.rm_sd_nn,
        r.rm_median,
        r.rm_median_delta,
        r.comoving_d,
        r.ang_diam_d,
        r.mollweide_theta,
        r.mollweide_theta_gal,
        r.cos_dec,
    ]
}

fn apply_scalars(r: &mut SourceRecord, v: &[f64; SCALAR_FIELDS]) {
    r.ra = v[0];
    r.dec = v[1];
    r.redshift = v[2];
    r.abs_mag = v[3];
    r.color = v[4];
    r.stellar_mass = v[5];
    r.gal_lon = v[6];
    r.gal_lat = v[7];
    r.rm = v[8];
    r.rm_mean = v[9];
    r.rm_delta = v[10];
    r.rm_mean_nn = v[11];
    r.rm_delta_nn = v[12];
    r.rm_sd_nn = v[13];
    r.rm_median = v[14];
    r.rm_median_delta = v[15];
    r.comoving_d = v[16];
    r.ang_diam_d = v[17];
    r.mollweide_theta = v[18];
    r.mollweide_theta_gal = v[19];
    r.cos_dec = v[20];
}

fn encode_record(record: &SourceRecord, out: &mut Vec<u8>) {
    for value in scalars(record) {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&record.neighbor_count.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
}

fn decode_record(chunk: &[u8]) -> SourceRecord {
    let mut values = [0.0f64; SCALAR_FIELDS];
    for (i, value) in values.iter_mut().enumerate() {
        let start = i * 8;
        *value = f64::from_le_bytes(chunk[start..start + 8].try_into().unwrap());
    }
    let tail = SCALAR_FIELDS * 8;
    let mut record = SourceRecord::default();
    apply_scalars(&mut record, &values);
    record.neighbor_count = u32::from_le_bytes(chunk[tail..tail + 4].try_into().unwrap());
    record
}

/// Writes a catalog snapshot, replacing any existing file at `path`.
pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + catalog.len() * RECORD_SIZE);
    buf.extend_from_slice(SNAPSHOT_MAGIC);
    buf.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    buf.extend_from_slice(&catalog.kind.code().to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(catalog.len() as u64).to_le_bytes());
    buf.extend_from_slice(&catalog.threshold.to_le_bytes());
    for record in catalog.records() {
        encode_record(record, &mut buf);
    }
    fs::write(path, &buf).with_context(|| format!("failed to write snapshot {}", path.display()))
}

/// Reads a catalog snapshot written by [`save_catalog`].
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let data =
        fs::read(path).with_context(|| format!("failed to read snapshot {}", path.display()))?;

    if data.len() < HEADER_SIZE {
        bail!("snapshot file too small: {} bytes", data.len());
    }
    let magic = &data[0..4];
    if magic != SNAPSHOT_MAGIC {
        bail!(
            "invalid snapshot magic: expected {:?}, got {:?}",
            SNAPSHOT_MAGIC,
            magic
        );
    }
    let version = u32::from_le_bytes(data[4..8].try_into().unwrap());
    if version != SNAPSHOT_VERSION {
        bail!(
            "unsupported snapshot version: expected {}, got {}",
            SNAPSHOT_VERSION,
            version
        );
    }
    let kind_code = u32::from_le_bytes(data[8..12].try_into().unwrap());
    let Some(kind) = CatalogKind::from_code(kind_code) else {
        bail!("unknown catalog kind code {}", kind_code);
    };
    let count = u64::from_le_bytes(data[16..24].try_into().unwrap()) as usize;
    let threshold = f64::from_le_bytes(data[24..32].try_into().unwrap());

    let payload = &data[HEADER_SIZE..];
    if payload.len() != count * RECORD_SIZE {
        bail!(
            "snapshot payload is {} bytes, expected {} for {} records",
            payload.len(),
            count * RECORD_SIZE,
            count
        );
    }

    let mut catalog = Catalog::with_capacity(kind, count);
    catalog.threshold = threshold;
    for chunk in payload.chunks_exact(RECORD_SIZE) {
        catalog.push(decode_record(chunk));
    }
    Ok(catalog)
}
