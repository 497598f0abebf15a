//! Region snapshot loading — enabled with the `json` Cargo feature.
//!
//! The data-loading collaborator queries a live geographic source; when that
//! fails it substitutes a cached JSON snapshot with the same shape.  This
//! module parses that shape.  The simulator never knows which source
//! produced the description it receives.
//!
//! # Usage
//!
//! ```ignore
//! use std::fs::File;
//! use std::io::BufReader;
//! use sr_spatial::snapshot::load_from_reader;
//!
//! let region = load_from_reader(BufReader::new(File::open("district.json")?))?;
//! ```

use std::io::Read;

use crate::region::RegionData;
use crate::SpatialResult;

/// Parse a region description from JSON.
///
/// # Errors
///
/// Returns [`SpatialError::Snapshot`](crate::SpatialError::Snapshot) when
/// the document is malformed or missing required fields.
pub fn load_from_reader<R: Read>(reader: R) -> SpatialResult<RegionData> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a region description from an in-memory JSON string.
pub fn load_from_str(json: &str) -> SpatialResult<RegionData> {
    Ok(serde_json::from_str(json)?)
}
