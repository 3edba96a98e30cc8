//! Typed record shapes for every backend endpoint.
//!
//! Records are parsed at the fetch boundary; a body that does not match its
//! shape is a parse failure rather than a record with missing fields.
//! Unknown JSON fields are ignored.

use crate::congestion::Congestion;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    /// Finite and inside the WGS84 coordinate ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Per-type vehicle counts. Missing types count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleCounts {
    pub bike: u32,
    pub motorcycle: u32,
    pub car: u32,
    pub auto_rickshaw: u32,
    pub bus: u32,
    pub truck: u32,
    pub ambulance: u32,
    pub police: u32,
    pub fire_truck: u32,
}

impl VehicleCounts {
    /// (type name, count) pairs in a stable display order.
    pub fn entries(&self) -> [(&'static str, u32); 9] {
        [
            ("bike", self.bike),
            ("motorcycle", self.motorcycle),
            ("car", self.car),
            ("auto_rickshaw", self.auto_rickshaw),
            ("bus", self.bus),
            ("truck", self.truck),
            ("ambulance", self.ambulance),
            ("police", self.police),
            ("fire_truck", self.fire_truck),
        ]
    }

    pub fn total(&self) -> u64 {
        self.entries().iter().map(|(_, n)| u64::from(*n)).sum()
    }
}

impl AddAssign<&VehicleCounts> for VehicleCounts {
    fn add_assign(&mut self, rhs: &VehicleCounts) {
        self.bike += rhs.bike;
        self.motorcycle += rhs.motorcycle;
        self.car += rhs.car;
        self.auto_rickshaw += rhs.auto_rickshaw;
        self.bus += rhs.bus;
        self.truck += rhs.truck;
        self.ambulance += rhs.ambulance;
        self.police += rhs.police;
        self.fire_truck += rhs.fire_truck;
    }
}

/// Live readings for one traffic camera (`/api/traffic-data`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub road: String,
    #[serde(default)]
    pub vehicle_counts: VehicleCounts,
    pub total_vehicles: u32,
    /// Occupancy as a percentage, 0-100
    pub density: f64,
    pub congestion: Congestion,
    #[serde(default)]
    pub avg_speed: f64,
    #[serde(default)]
    pub pedestrians: u32,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl CameraRecord {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// A road segment polyline with its current congestion (`/api/road-segments`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: String,
    pub name: String,
    /// Ordered `[lat, lon]` pairs
    pub coords: Vec<[f64; 2]>,
    pub density: f64,
    #[serde(default)]
    pub vehicles: u32,
    pub congestion: Congestion,
}

impl RoadSegment {
    pub fn path(&self) -> Vec<LatLon> {
        self.coords.iter().map(|[lat, lon]| LatLon::new(*lat, *lon)).collect()
    }
}

/// One weighted sample of the traffic intensity field (`/api/heatmap-data`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    pub intensity: f64,
}

/// An adaptive traffic signal (`/api/traffic-signals`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSignal {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub intersection: String,
    /// green, yellow or red
    pub status: String,
    #[serde(default)]
    pub queue: u32,
    /// Seconds
    #[serde(default)]
    pub wait_time: u32,
    #[serde(default)]
    pub adaptive: bool,
    #[serde(default)]
    pub cycle: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub crowd: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub wait_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyService {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// hospital, police or fire_station
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterZone {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// flood, earthquake or hurricane
    #[serde(rename = "type")]
    pub kind: String,
    pub risk: String,
    /// Metres
    pub radius: f64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub alert_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: u32,
    pub available: u32,
    #[serde(default)]
    pub rate: String,
    /// Percentage occupied
    #[serde(default)]
    pub occupancy: f64,
}

/// A community report. Coordinates are optional on the wire; reports
/// without them are kept in the snapshot but never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub upvotes: u32,
}

impl Report {
    pub fn position(&self) -> Option<LatLon> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)).filter(LatLon::is_valid),
            _ => None,
        }
    }

    /// Parse the timestamp, accepting both naive ISO-8601 and RFC 3339.
    pub fn reported_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        raw.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.naive_local()))
    }
}

/// Forecast vehicle count for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub hour: u32,
    pub count: u32,
    #[serde(default)]
    pub confidence: f64,
}

/// Per-camera 24 hour forecast (`/api/predictions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraForecast {
    pub camera_id: String,
    #[serde(default)]
    pub name: String,
    pub predictions: Vec<HourlyForecast>,
}

/// City-wide aggregates (`/api/analytics`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analytics {
    pub total_cameras: u32,
    pub active_cameras: u32,
    pub vehicles_today: u64,
    pub avg_congestion: f64,
    pub incidents: u32,
    pub resolved: u32,
    /// Air quality index
    pub aqi: u32,
    pub carbon_tons: f64,
    pub pedestrians: u64,
    pub emergency_calls: u32,
}

/// Static camera metadata embedded in the detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub road: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTotal {
    /// Display label such as "03:00"
    pub hour: String,
    pub total: u32,
}

/// Expanded record for one camera (`/api/camera/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDetail {
    pub camera: CameraInfo,
    pub vehicle_counts: VehicleCounts,
    pub total: u32,
    #[serde(default)]
    pub hourly: Vec<HourlyTotal>,
    pub congestion: Congestion,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /api/reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}

/// Body of `POST /api/route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub name: String,
    /// Minutes
    pub time: u32,
    /// Miles
    pub dist: f64,
    pub traffic: String,
    #[serde(default)]
    pub carbon_saved: Option<String>,
}

impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} min • {} mi • {} traffic",
            self.name, self.time, self.dist, self.traffic
        )?;
        if let Some(saved) = &self.carbon_saved {
            write!(f, " • 🌱{}", saved)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routes: Vec<RouteOption>,
}

/// Raw body of `POST /api/upload`, both success and failure shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub detections: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the upload form shows after the backend answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Detected {
        detections: u32,
        file: Option<String>,
    },
    Rejected(String),
}

impl From<UploadResponse> for UploadOutcome {
    fn from(response: UploadResponse) -> Self {
        if response.success {
            UploadOutcome::Detected {
                detections: response.detections.unwrap_or_default(),
                file: response.file,
            }
        } else {
            UploadOutcome::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "Upload failed".to_string()),
            )
        }
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Detected { detections, .. } => {
                write!(f, "✅ Detected {} vehicles", detections)
            }
            UploadOutcome::Rejected(error) => write!(f, "❌ {}", error),
        }
    }
}
