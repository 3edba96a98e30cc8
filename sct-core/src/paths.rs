//! Backend endpoint paths, relative to the configured base URL.

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const TRAFFIC_DATA: &str = "/api/traffic-data";
pub const ROAD_SEGMENTS: &str = "/api/road-segments";
pub const HEATMAP_DATA: &str = "/api/heatmap-data";
pub const TRAFFIC_SIGNALS: &str = "/api/traffic-signals";
pub const POIS: &str = "/api/pois";
pub const EMERGENCY_SERVICES: &str = "/api/emergency-services";
pub const DISASTER_ZONES: &str = "/api/disaster-zones";
pub const PARKING: &str = "/api/parking";
pub const REPORTS: &str = "/api/reports";
pub const PREDICTIONS: &str = "/api/predictions";
pub const ANALYTICS: &str = "/api/analytics";
pub const ROUTE: &str = "/api/route";
pub const UPLOAD: &str = "/api/upload";

/// Path for the on-demand camera detail request.
pub fn camera_detail(camera_id: &str) -> String {
    format!("/api/camera/{}", camera_id)
}
