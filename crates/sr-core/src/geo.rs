//! Geographic coordinate type and geodesic utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Agents move in steps that can
//! be centimetres long and get re-projected onto their path segment every
//! tick; single-precision degree resolution (~0.4 m at mid latitudes) would
//! visibly quantize that motion, so everything here is double-precision.
//!
//! All functions assume city-scale geometry: great-circle math for distances
//! and bearings, a local flat-earth frame for sub-metre displacement and
//! segment projection.

/// Mean Earth radius in metres, used for great-circle distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS-84 equatorial radius in metres, used for metre→degree displacement.
const EARTH_RADIUS_WGS84_M: f64 = 6_378_137.0;

/// Metres per degree of latitude in the local planar frame.
const M_PER_DEG_LAT: f64 = 111_320.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }

    /// Initial true bearing from `self` to `other`, in degrees [0, 360).
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let d_lng = (other.lng - self.lng).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    /// Displace `self` by `meters` along `bearing_deg` using a local
    /// flat-earth approximation.
    ///
    /// Valid for steps that are small relative to the Earth's radius — per-tick
    /// agent movement is at most a few metres.
    pub fn offset_m(self, meters: f64, bearing_deg: f64) -> GeoPoint {
        let theta = bearing_deg.to_radians();
        let d_lat = meters * theta.cos() / EARTH_RADIUS_WGS84_M;
        let d_lng =
            meters * theta.sin() / (EARTH_RADIUS_WGS84_M * self.lat.to_radians().cos());
        GeoPoint {
            lat: self.lat + d_lat.to_degrees(),
            lng: self.lng + d_lng.to_degrees(),
        }
    }

    /// Closest point to `self` on the segment `a`–`b`, computed in a local
    /// planar frame (metres per degree of latitude, longitude scaled by the
    /// cosine of the segment's mid latitude).
    ///
    /// The segment parameter is clamped to [0, 1], so the result always lies
    /// on the segment; a degenerate segment (`a == b`) returns `a`.
    pub fn project_to_segment(self, a: GeoPoint, b: GeoPoint) -> GeoPoint {
        let lng_scale = M_PER_DEG_LAT * ((a.lat + b.lat) * 0.5).to_radians().cos();

        let bx = (b.lng - a.lng) * lng_scale;
        let by = (b.lat - a.lat) * M_PER_DEG_LAT;
        let px = (self.lng - a.lng) * lng_scale;
        let py = (self.lat - a.lat) * M_PER_DEG_LAT;

        let denom = (bx * bx + by * by).max(1e-6);
        let t = ((px * bx + py * by) / denom).clamp(0.0, 1.0);

        GeoPoint {
            lat: a.lat + (b.lat - a.lat) * t,
            lng: a.lng + (b.lng - a.lng) * t,
        }
    }

    /// Linear interpolation between `self` and `other` at parameter `t`.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Fold the signed difference between two bearings into [0, 180] degrees.
///
/// Used by the sighting test: the agent sees the billboard only when this
/// difference is within half the billboard's field of view.
#[inline]
pub fn bearing_diff_deg(a_deg: f64, b_deg: f64) -> f64 {
    (((a_deg - b_deg + 540.0) % 360.0) - 180.0).abs()
}
