//! In-memory transport and canned backend bodies for tests.

use async_trait::async_trait;
use sct_core::{DashboardError, Result, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16, String),
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Scripted backend. Unconfigured paths fail with a network error.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<String>>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: &str) {
        self.set(path, Reply::Body(body.to_string()));
    }

    pub fn fail_status(&self, path: &str, status: u16, body: &str) {
        self.set(path, Reply::Status(status, body.to_string()));
    }

    pub fn fail(&self, path: &str) {
        self.set(path, Reply::Network);
    }

    /// Hold the next request to `path` until the returned sender supplies
    /// its body. Gates queue up in the order they are created.
    pub fn gate(&self, path: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_gets(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == "GET" && c.path == path)
            .count()
    }

    /// JSON bodies posted to `path`, in order.
    pub fn posts(&self, path: &str) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == "POST" && c.path == path)
            .filter_map(|c| c.body.clone())
            .collect()
    }

    fn set(&self, path: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
    }

    fn record(&self, method: &'static str, path: &str, body: Option<serde_json::Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
    }

    async fn reply(&self, path: &str) -> Result<String> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(|queue| queue.pop_front());
        if let Some(gate) = gate {
            return gate
                .await
                .map_err(|_| DashboardError::network(path, "gate dropped"));
        }
        let reply = self.replies.lock().unwrap().get(path).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status, body)) => Err(DashboardError::Status {
                path: path.to_string(),
                status,
                body,
            }),
            Some(Reply::Network) | None => Err(DashboardError::network(path, "connection refused")),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<String> {
        self.record("GET", path, None);
        self.reply(path).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String> {
        self.record("POST", path, Some(body.clone()));
        self.reply(path).await
    }

    async fn post_file(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        self.record(
            "POST",
            path,
            Some(serde_json::json!({"file": file_name, "size": bytes.len()})),
        );
        self.reply(path).await
    }
}

pub mod fixtures {
    pub const TRAFFIC_DATA: &str = r##"[
        {"id": "cam_001", "name": "Times Square", "lat": 40.758, "lon": -73.9855,
         "location": "Manhattan", "road": "Broadway",
         "vehicle_counts": {"car": 120, "bus": 8, "truck": 12, "motorcycle": 10, "bike": 14},
         "total_vehicles": 164, "density": 45.5,
         "congestion": {"level": "moderate", "color": "#ffff00", "label": "Moderate", "speed": 35},
         "avg_speed": 32.5, "pedestrians": 210, "timestamp": "2024-05-01T08:30:00"},
        {"id": "cam_002", "name": "Brooklyn Bridge", "lat": 40.7061, "lon": -73.9969,
         "location": "Brooklyn", "road": "Brooklyn Bridge",
         "vehicle_counts": {"car": 200, "bus": 4, "truck": 20, "ambulance": 1},
         "total_vehicles": 225, "density": 88.0,
         "congestion": {"level": "severe", "color": "#ff0000", "label": "Severe", "speed": 10},
         "avg_speed": 9.0, "pedestrians": 40}
    ]"##;

    pub const ROAD_SEGMENTS: &str = r##"[
        {"id": "road_001", "name": "Broadway", "coords": [[40.75, -73.98], [40.76, -73.985], [40.77, -73.99]],
         "density": 72.0, "vehicles": 340,
         "congestion": {"level": "heavy", "color": "#ff8c00", "label": "Heavy", "speed": 20}},
        {"id": "road_002", "name": "FDR Drive", "coords": [[40.71, -73.97], [40.73, -73.97]],
         "density": 20.0, "vehicles": 90,
         "congestion": {"level": "free_flow", "color": "#00ff00", "label": "Free Flow", "speed": 55}}
    ]"##;

    pub const HEATMAP: &str = r#"[
        {"lat": 40.758, "lon": -73.9855, "intensity": 0.9},
        {"lat": 40.7061, "lon": -73.9969, "intensity": 0.4},
        {"lat": 40.7527, "lon": -73.9772, "intensity": 0.6}
    ]"#;

    pub const SIGNALS: &str = r#"[
        {"id": "sig_001", "lat": 40.758, "lon": -73.985, "intersection": "7th Ave & 42nd St",
         "status": "green", "queue": 12, "wait_time": 25, "adaptive": true, "cycle": 90},
        {"id": "sig_002", "lat": 40.75, "lon": -73.99, "intersection": "8th Ave & 34th St",
         "status": "yellow", "queue": 4, "wait_time": 10, "adaptive": false}
    ]"#;

    pub const POIS: &str = r#"[
        {"id": "poi_001", "name": "Statue of Liberty", "lat": 40.6892, "lon": -74.0445,
         "category": "monument", "rating": 4.7, "description": "Iconic statue", "crowd": "high", "open": true},
        {"id": "poi_002", "name": "Central Park", "lat": 40.7829, "lon": -73.9654,
         "category": "park", "rating": 4.8, "description": "Urban park", "crowd": "medium", "open": true},
        {"id": "poi_003", "name": "Secret Garden", "lat": 40.7, "lon": -73.9,
         "category": "garden", "rating": 4.1, "crowd": "low", "open": false}
    ]"#;

    pub const EMERGENCY: &str = r#"[
        {"id": "em_001", "name": "Bellevue Hospital", "lat": 40.7392, "lon": -73.9754, "type": "hospital", "phone": "212-562-4141"},
        {"id": "em_002", "name": "Engine 54", "lat": 40.7637, "lon": -73.9872, "type": "fire_station", "phone": "911"}
    ]"#;

    pub const DISASTER: &str = r#"[
        {"id": "dz_001", "name": "Lower Manhattan Flood Zone", "lat": 40.705, "lon": -74.01,
         "type": "flood", "risk": "high", "radius": 800, "active": true, "alert_level": "warning"}
    ]"#;

    pub const PARKING: &str = r#"[
        {"id": "park_001", "name": "Times Square Garage", "lat": 40.757, "lon": -73.986,
         "capacity": 500, "available": 120, "rate": "$25/hr", "occupancy": 76},
        {"id": "park_002", "name": "Midtown Lot", "lat": 40.754, "lon": -73.984,
         "capacity": 200, "available": 30, "rate": "$18/hr", "occupancy": 85},
        {"id": "park_003", "name": "Bryant Park Garage", "lat": 40.7536, "lon": -73.9832,
         "capacity": 150, "available": 5, "rate": "$30/hr", "occupancy": 97},
        {"id": "park_004", "name": "Hudson Yards Parking", "lat": 40.7538, "lon": -74.0008,
         "capacity": 800, "available": 51, "rate": "$20/hr", "occupancy": 94}
    ]"#;

    pub const REPORTS: &str = r#"[
        {"id": "rep_001", "type": "accident", "description": "Two car collision", "lat": 40.75, "lon": -73.99,
         "timestamp": "2024-05-01T08:15:00", "verified": true, "upvotes": 12},
        {"id": "rep_002", "type": "hazard", "description": "Debris on road", "timestamp": "2024-05-01T08:20:00"}
    ]"#;

    pub const REPORTS_LATER: &str = r#"[
        {"id": "rep_003", "type": "construction", "description": "Lane closed", "lat": 40.76, "lon": -73.98,
         "timestamp": "2024-05-01T09:00:00", "upvotes": 3}
    ]"#;

    pub const PREDICTIONS: &str = r#"[
        {"camera_id": "cam_001", "name": "Times Square", "predictions": [
            {"hour": 0, "count": 80, "confidence": 0.9},
            {"hour": 8, "count": 240, "confidence": 0.85},
            {"hour": 9, "count": 150, "confidence": 0.8},
            {"hour": 10, "count": 90, "confidence": 0.8}
        ]},
        {"camera_id": "cam_002", "name": "Brooklyn Bridge", "predictions": [
            {"hour": 9, "count": 300, "confidence": 0.7}
        ]}
    ]"#;

    pub const ANALYTICS: &str = r#"{
        "total_cameras": 2, "active_cameras": 2, "vehicles_today": 45210, "avg_congestion": 62.5,
        "incidents": 4, "resolved": 3, "aqi": 58, "carbon_tons": 12.4,
        "pedestrians": 18230, "emergency_calls": 7
    }"#;

    pub const CAMERA_DETAIL: &str = r##"{
        "camera": {"id": "cam_001", "name": "Times Square", "lat": 40.758, "lon": -73.9855,
                   "location": "Manhattan", "road": "Broadway"},
        "vehicle_counts": {"car": 120, "bus": 8, "truck": 12},
        "total": 140,
        "hourly": [
            {"hour": "06:00", "total": 90},
            {"hour": "07:00", "total": 160},
            {"hour": "08:00", "total": 220}
        ],
        "congestion": {"level": "heavy", "color": "#ff8c00", "label": "Heavy", "speed": 20},
        "timestamp": "2024-05-01T08:30:00"
    }"##;

    pub const ROUTES: &str = r#"{"routes": [
        {"name": "Fastest", "time": 18, "dist": 5.2, "traffic": "moderate"},
        {"name": "Shortest", "time": 22, "dist": 4.1, "traffic": "heavy"},
        {"name": "Eco-Friendly", "time": 25, "dist": 5.8, "traffic": "low", "carbon_saved": "18%"}
    ]}"#;
}
