//! Read models for the dashboard's widgets: stat counters, the camera list,
//! the next-hour forecast card, the environment card, the camera detail
//! modal, and the theme switcher.

use crate::store::DataStore;
use sct_core::congestion::CongestionLevel;
use sct_core::records::{Analytics, CameraDetail, CameraForecast, CameraRecord, HourlyForecast, LatLon, VehicleCounts};
use sct_core::Category;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// City-wide counters aggregated over the camera snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficStats {
    pub cameras: usize,
    pub vehicles: u64,
    /// Mean camera density, rounded to a whole percentage
    pub avg_congestion: u32,
    pub pedestrians: u64,
    pub by_type: VehicleCounts,
}

impl TrafficStats {
    pub fn from_cameras(cameras: &[CameraRecord]) -> Self {
        let mut stats = TrafficStats {
            cameras: cameras.len(),
            ..Default::default()
        };
        for camera in cameras {
            stats.vehicles += u64::from(camera.total_vehicles);
            stats.pedestrians += u64::from(camera.pedestrians);
            stats.by_type += &camera.vehicle_counts;
        }
        if !cameras.is_empty() {
            let mean = cameras.iter().map(|c| c.density).sum::<f64>() / cameras.len() as f64;
            stats.avg_congestion = mean.round().max(0.0) as u32;
        }
        stats
    }
}

impl fmt::Display for TrafficStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cameras • {} vehicles • {}% congestion • {} pedestrians",
            self.cameras, self.vehicles, self.avg_congestion, self.pedestrians
        )
    }
}

/// One row of the sidebar camera list.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraListEntry {
    pub id: String,
    pub name: String,
    pub location: String,
    pub total_vehicles: u32,
    pub level: CongestionLevel,
    pub label: String,
    pub position: LatLon,
}

pub fn camera_list(cameras: &[CameraRecord]) -> Vec<CameraListEntry> {
    cameras
        .iter()
        .map(|c| CameraListEntry {
            id: c.id.clone(),
            name: c.name.clone(),
            location: c.location.clone(),
            total_vehicles: c.total_vehicles,
            level: c.congestion.level,
            label: c.congestion.label.clone(),
            position: c.position(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastLevel {
    Low,
    Medium,
    High,
}

impl ForecastLevel {
    pub fn from_count(count: u32) -> Self {
        if count > 200 {
            ForecastLevel::High
        } else if count > 100 {
            ForecastLevel::Medium
        } else {
            ForecastLevel::Low
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ForecastLevel::Low => "Low",
            ForecastLevel::Medium => "Medium",
            ForecastLevel::High => "High",
        }
    }
}

/// The prediction card: expected vehicles in the coming hour at the first
/// forecast camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub camera_id: String,
    pub hour: u32,
    pub vehicles: u32,
    pub level: ForecastLevel,
    pub advice: &'static str,
}

impl ForecastSummary {
    /// Pick the first camera's prediction for `(now_hour + 1) % 24`, or its
    /// first prediction when that hour is missing. `None` when there is no
    /// camera or it has no predictions.
    pub fn next_hour(forecasts: &[CameraForecast], now_hour: u32) -> Option<Self> {
        let camera = forecasts.first()?;
        let wanted = (now_hour + 1) % 24;
        let prediction: &HourlyForecast = camera
            .predictions
            .iter()
            .find(|p| p.hour == wanted)
            .or_else(|| camera.predictions.first())?;
        Some(ForecastSummary {
            camera_id: camera.camera_id.clone(),
            hour: prediction.hour,
            vehicles: prediction.count,
            level: ForecastLevel::from_count(prediction.count),
            advice: if prediction.count > 200 {
                "Avoid rush hour"
            } else {
                "Good to travel"
            },
        })
    }
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:00 • {} vehicles • {} congestion • {}",
            self.hour,
            self.vehicles,
            self.level.as_str(),
            self.advice
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSummary {
    pub aqi: u32,
    pub carbon_tons: f64,
}

impl From<&Analytics> for EnvironmentSummary {
    fn from(analytics: &Analytics) -> Self {
        EnvironmentSummary {
            aqi: analytics.aqi,
            carbon_tons: analytics.carbon_tons,
        }
    }
}

/// Labelled values for a single-series bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

/// Model behind the camera detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraDetailView {
    pub name: String,
    pub location: String,
    pub total: u32,
    pub avg_speed: f64,
    pub status: String,
    /// Vehicle type and count, in a stable order
    pub breakdown: Vec<(&'static str, u32)>,
    pub hourly: BarSeries,
}

impl From<&CameraDetail> for CameraDetailView {
    fn from(detail: &CameraDetail) -> Self {
        CameraDetailView {
            name: detail.camera.name.clone(),
            location: detail.camera.location.clone(),
            total: detail.total,
            avg_speed: detail.congestion.speed,
            status: detail.congestion.label.clone(),
            breakdown: detail.vehicle_counts.entries().to_vec(),
            hourly: BarSeries {
                label: "Vehicles",
                color: "#1a73e8",
                labels: detail.hourly.iter().map(|h| h.hour.clone()).collect(),
                values: detail.hourly.iter().map(|h| h.total).collect(),
            },
        }
    }
}

pub const EMERGENCY_ALERT: &str =
    "⚠️ Emergency mode activated - showing evacuation routes and emergency services";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Day,
    Night,
    Emergency,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
            Theme::Emergency => "emergency",
        }
    }

    /// Body class applied by the page for this theme.
    pub fn css_class(self) -> String {
        format!("theme-{} mode-normal", self.as_str())
    }

    /// Banner raised when switching to this theme.
    pub fn alert(self) -> Option<&'static str> {
        match self {
            Theme::Emergency => Some(EMERGENCY_ALERT),
            _ => None,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            "emergency" => Ok(Theme::Emergency),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the widgets show, cloned out of the dashboard in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: TrafficStats,
    pub cameras: Vec<CameraListEntry>,
    pub forecast: Option<ForecastSummary>,
    pub environment: Option<EnvironmentSummary>,
    pub theme: Theme,
    pub alert: Option<String>,
    pub visible: BTreeSet<Category>,
    pub report_draft: Option<LatLon>,
}

impl DashboardView {
    pub fn build(store: &DataStore, now_hour: u32) -> Self {
        DashboardView {
            stats: TrafficStats::from_cameras(store.cameras()),
            cameras: camera_list(store.cameras()),
            forecast: store
                .forecast()
                .and_then(|f| ForecastSummary::next_hour(f, now_hour)),
            environment: store.analytics().map(EnvironmentSummary::from),
            theme: Theme::default(),
            alert: None,
            visible: BTreeSet::new(),
            report_draft: None,
        }
    }
}
