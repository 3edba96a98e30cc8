//! Renderers: pure functions from a snapshot to visual primitives.
//!
//! Renderers never touch the network or the store. The same snapshot and
//! heatmap config always produce the same primitives.

pub mod heat;
pub mod style;

use crate::store::Snapshot;
use heat::{HeatField, HeatmapConfig};
use sct_core::records::{
    CameraRecord, DisasterZone, EmergencyService, HeatPoint, LatLon, ParkingLot, PointOfInterest,
    Report, RoadSegment, TrafficSignal,
};
use style::Availability;

/// Marker icon: a CSS class plus either an emoji or an icon-font class.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub class: String,
    pub glyph: String,
    /// Square size in pixels; anchored at the centre
    pub size: u32,
    /// Border or status colour, where the style table provides one
    pub accent: Option<String>,
}

impl Icon {
    fn new(class: impl Into<String>, glyph: impl Into<String>, size: u32) -> Self {
        Icon {
            class: class.into(),
            glyph: glyph.into(),
            size,
            accent: None,
        }
    }

    fn with_accent(mut self, color: &str) -> Self {
        self.accent = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker {
        at: LatLon,
        icon: Icon,
    },
    Polyline {
        path: Vec<LatLon>,
        color: String,
        weight: u32,
        opacity: f64,
    },
    Circle {
        center: LatLon,
        radius_m: f64,
        color: String,
        fill_opacity: f64,
        weight: u32,
    },
    Heat(HeatField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    /// Open the detail modal for a camera id
    CameraDetail(String),
}

/// Detail payload bound to a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    pub action: Option<PopupAction>,
}

impl Popup {
    fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Popup {
            title: title.into(),
            lines,
            action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub popup: Option<Popup>,
}

impl Primitive {
    fn marker(at: LatLon, icon: Icon, popup: Popup) -> Self {
        Primitive {
            shape: Shape::Marker { at, icon },
            popup: Some(popup),
        }
    }
}

/// Render a snapshot into the primitive set for its layer.
pub fn render(snapshot: &Snapshot, heat: &HeatmapConfig) -> Vec<Primitive> {
    match snapshot {
        Snapshot::Cameras(records) => records.iter().map(render_camera).collect(),
        Snapshot::Roads(records) => records.iter().map(render_road).collect(),
        Snapshot::Signals(records) => records.iter().map(render_signal).collect(),
        Snapshot::Pois(records) => records.iter().map(render_poi).collect(),
        Snapshot::Emergency(records) => records.iter().map(render_emergency).collect(),
        Snapshot::Disaster(records) => records.iter().map(render_disaster).collect(),
        Snapshot::Parking(records) => records.iter().map(render_parking).collect(),
        Snapshot::Reports(records) => records.iter().filter_map(render_report).collect(),
        Snapshot::Heatmap(points) => render_heatmap(points, heat),
    }
}

fn render_camera(camera: &CameraRecord) -> Primitive {
    let icon = Icon::new(
        format!("custom-marker {}", camera.congestion.level.as_str()),
        "fa-video",
        35,
    );
    let counts = &camera.vehicle_counts;
    let mut popup = Popup::new(
        camera.name.clone(),
        vec![
            camera.location.clone(),
            camera.road.clone(),
            format!("Total: {} vehicles", camera.total_vehicles),
            format!("Speed: {} mph", camera.avg_speed),
            format!("Pedestrians: {}", camera.pedestrians),
            format!(
                "Cars {} • Buses {} • Trucks {} • Motorcycles {}",
                counts.car, counts.bus, counts.truck, counts.motorcycle
            ),
        ],
    );
    popup.action = Some(PopupAction::CameraDetail(camera.id.clone()));
    Primitive::marker(camera.position(), icon, popup)
}

fn render_road(road: &RoadSegment) -> Primitive {
    Primitive {
        shape: Shape::Polyline {
            path: road.path(),
            color: road.congestion.color.clone(),
            weight: 6,
            opacity: 0.8,
        },
        popup: Some(Popup::new(
            road.name.clone(),
            vec![
                format!("Density: {}%", road.density),
                format!("Vehicles: {}", road.vehicles),
                format!("Status: {}", road.congestion.label),
            ],
        )),
    }
}

fn render_signal(signal: &TrafficSignal) -> Primitive {
    let color = style::signal_color(&signal.status);
    let icon = Icon::new(
        format!("signal-marker {}", signal.status),
        "fa-traffic-light",
        24,
    )
    .with_accent(color);
    let popup = Popup::new(
        "Traffic Signal",
        vec![
            signal.intersection.clone(),
            format!("Status: {}", signal.status.to_uppercase()),
            format!("Queue: {} vehicles", signal.queue),
            format!("Wait time: ~{}s", signal.wait_time),
            format!(
                "Adaptive Mode: {}",
                if signal.adaptive { "✅ ON" } else { "❌ OFF" }
            ),
        ],
    );
    Primitive::marker(LatLon::new(signal.lat, signal.lon), icon, popup)
}

fn render_poi(poi: &PointOfInterest) -> Primitive {
    let icon = Icon::new("poi-marker", style::poi_glyph(&poi.category), 30);
    let popup = Popup::new(
        poi.name.clone(),
        vec![
            poi.description.clone(),
            format!("⭐ {}/5", poi.rating),
            format!("Crowd: {}", poi.crowd),
            if poi.open { "🟢 Open" } else { "🔴 Closed" }.to_string(),
        ],
    );
    Primitive::marker(LatLon::new(poi.lat, poi.lon), icon, popup)
}

fn render_emergency(service: &EmergencyService) -> Primitive {
    let icon = Icon::new(
        format!("emergency-marker {}", service.kind),
        style::emergency_icon(&service.kind),
        32,
    );
    let popup = Popup::new(
        service.name.clone(),
        vec![
            format!("Type: {}", service.kind.replace('_', " ")),
            format!("📞 {}", service.phone),
        ],
    );
    Primitive::marker(LatLon::new(service.lat, service.lon), icon, popup)
}

fn render_disaster(zone: &DisasterZone) -> Primitive {
    let color = style::disaster_color(&zone.kind);
    Primitive {
        shape: Shape::Circle {
            center: LatLon::new(zone.lat, zone.lon),
            radius_m: zone.radius,
            color: color.to_string(),
            fill_opacity: 0.2,
            weight: 2,
        },
        popup: Some(Popup::new(
            format!("⚠️ {}", zone.name),
            vec![
                format!("Type: {}", zone.kind),
                format!("Risk: {}", zone.risk.to_uppercase()),
                format!(
                    "Status: {}",
                    if zone.active { "🔴 ACTIVE ALERT" } else { "🟢 Monitored" }
                ),
            ],
        )),
    }
}

fn render_parking(lot: &ParkingLot) -> Primitive {
    let color = Availability::from_available(lot.available).color();
    let icon = Icon::new("poi-marker", "🅿️", 30).with_accent(color);
    let popup = Popup::new(
        lot.name.clone(),
        vec![
            format!("Available: {} / {}", lot.available, lot.capacity),
            format!("Rate: {}", lot.rate),
            format!("Occupancy: {}%", lot.occupancy),
        ],
    );
    Primitive::marker(LatLon::new(lot.lat, lot.lon), icon, popup)
}

fn render_report(report: &Report) -> Option<Primitive> {
    let at = report.position()?;
    let icon = Icon::new("poi-marker", style::report_glyph(&report.kind), 30);
    let when = match report.reported_at() {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => report.timestamp.clone().unwrap_or_default(),
    };
    let description = report
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description");
    let popup = Popup::new(
        report.kind.to_uppercase(),
        vec![
            description.to_string(),
            format!("👍 {} upvotes", report.upvotes),
            when,
        ],
    );
    Some(Primitive::marker(at, icon, popup))
}

fn render_heatmap(points: &[HeatPoint], config: &HeatmapConfig) -> Vec<Primitive> {
    if points.is_empty() {
        return Vec::new();
    }
    vec![Primitive {
        shape: Shape::Heat(HeatField::from_points(points, config)),
        popup: None,
    }]
}
