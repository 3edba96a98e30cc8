use serde::{Deserialize, Serialize};

/// Congestion tier reported for a camera or road segment.
///
/// Unrecognised level strings deserialize to `Unknown` instead of failing the
/// whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    FreeFlow,
    Moderate,
    Heavy,
    Severe,
    Standstill,
    #[serde(other)]
    Unknown,
}

impl CongestionLevel {
    /// Classify a density percentage: < 30 free flow, < 60 moderate,
    /// < 85 heavy, < 95 severe, anything else standstill.
    pub fn from_density(density: f64) -> Self {
        if density < 30.0 {
            CongestionLevel::FreeFlow
        } else if density < 60.0 {
            CongestionLevel::Moderate
        } else if density < 85.0 {
            CongestionLevel::Heavy
        } else if density < 95.0 {
            CongestionLevel::Severe
        } else {
            CongestionLevel::Standstill
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::FreeFlow => "free_flow",
            CongestionLevel::Moderate => "moderate",
            CongestionLevel::Heavy => "heavy",
            CongestionLevel::Severe => "severe",
            CongestionLevel::Standstill => "standstill",
            CongestionLevel::Unknown => "unknown",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            CongestionLevel::FreeFlow => "#00ff00",
            CongestionLevel::Moderate => "#ffff00",
            CongestionLevel::Heavy => "#ff8c00",
            CongestionLevel::Severe => "#ff0000",
            CongestionLevel::Standstill => "#8b0000",
            CongestionLevel::Unknown => "#808080",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CongestionLevel::FreeFlow => "Free Flow",
            CongestionLevel::Moderate => "Moderate",
            CongestionLevel::Heavy => "Heavy",
            CongestionLevel::Severe => "Severe",
            CongestionLevel::Standstill => "Standstill",
            CongestionLevel::Unknown => "Unknown",
        }
    }

    /// Typical speed in mph for the tier.
    pub const fn speed(self) -> f64 {
        match self {
            CongestionLevel::FreeFlow => 55.0,
            CongestionLevel::Moderate => 35.0,
            CongestionLevel::Heavy => 20.0,
            CongestionLevel::Severe => 10.0,
            CongestionLevel::Standstill => 2.0,
            CongestionLevel::Unknown => 0.0,
        }
    }
}

/// Congestion descriptor as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Congestion {
    pub level: CongestionLevel,
    pub color: String,
    pub label: String,
    #[serde(default)]
    pub speed: f64,
}

impl Congestion {
    pub fn from_density(density: f64) -> Self {
        let level = CongestionLevel::from_density(density);
        Congestion {
            level,
            color: level.color().to_string(),
            label: level.label().to_string(),
            speed: level.speed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_tiers_at_boundaries() {
        assert_eq!(CongestionLevel::from_density(29.9), CongestionLevel::FreeFlow);
        assert_eq!(CongestionLevel::from_density(30.0), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_density(59.9), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_density(60.0), CongestionLevel::Heavy);
        assert_eq!(CongestionLevel::from_density(85.0), CongestionLevel::Severe);
        assert_eq!(CongestionLevel::from_density(95.0), CongestionLevel::Standstill);
        assert_eq!(CongestionLevel::from_density(100.0), CongestionLevel::Standstill);
    }

    #[test]
    fn unknown_level_string_does_not_fail() {
        let json = r##"{"level": "gridlock", "color": "#123456", "label": "Gridlock", "speed": 1}"##;
        let congestion: Congestion = serde_json::from_str(json).unwrap();
        assert_eq!(congestion.level, CongestionLevel::Unknown);
        assert_eq!(congestion.label, "Gridlock");
    }

    #[test]
    fn from_density_fills_descriptor() {
        let congestion = Congestion::from_density(70.0);
        assert_eq!(congestion.level, CongestionLevel::Heavy);
        assert_eq!(congestion.color, "#ff8c00");
        assert_eq!(congestion.speed, 20.0);
    }
}
