//! Continuous traffic intensity field for the heatmap layer.

use sct_core::records::{HeatPoint, LatLon};

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Normalised intensity in [0, 1] where this colour starts
    pub at: f64,
    pub color: String,
}

impl GradientStop {
    pub fn new(at: f64, color: &str) -> Self {
        GradientStop {
            at,
            color: color.to_string(),
        }
    }
}

/// Rendering parameters for the intensity surface.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Point radius in pixels
    pub radius: u32,
    /// Blur radius in pixels
    pub blur: u32,
    /// Zoom level at which points reach full intensity
    pub max_zoom: u8,
    /// Intensity mapped to the top of the gradient
    pub max: f64,
    pub min_opacity: f64,
    /// Sorted by `at`, first stop at 0.0
    pub gradient: Vec<GradientStop>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        HeatmapConfig {
            radius: 35,
            blur: 25,
            max_zoom: 17,
            max: 1.0,
            min_opacity: 0.4,
            gradient: vec![
                GradientStop::new(0.0, "#00ff00"),
                GradientStop::new(0.25, "#7fff00"),
                GradientStop::new(0.5, "#ffff00"),
                GradientStop::new(0.75, "#ff8c00"),
                GradientStop::new(1.0, "#ff0000"),
            ],
        }
    }
}

impl HeatmapConfig {
    /// Scale an intensity against `max`, clamped to [0, 1]. Non-finite
    /// intensities and a non-positive `max` normalise to 0.
    pub fn normalize(&self, intensity: f64) -> f64 {
        if !intensity.is_finite() || self.max <= 0.0 {
            return 0.0;
        }
        (intensity / self.max).clamp(0.0, 1.0)
    }

    /// Colour of the highest gradient stop at or below the normalised intensity.
    pub fn color_for(&self, intensity: f64) -> &str {
        let normalized = self.normalize(intensity);
        self.gradient
            .iter()
            .rev()
            .find(|stop| stop.at <= normalized)
            .or_else(|| self.gradient.first())
            .map(|stop| stop.color.as_str())
            .unwrap_or("#00ff00")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub at: LatLon,
    /// Normalised intensity in [0, 1]
    pub weight: f64,
}

/// The heatmap layer's single primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatField {
    pub points: Vec<WeightedPoint>,
    pub config: HeatmapConfig,
}

impl HeatField {
    /// Build the field, dropping samples with invalid coordinates.
    pub fn from_points(points: &[HeatPoint], config: &HeatmapConfig) -> Self {
        let points = points
            .iter()
            .map(|p| WeightedPoint {
                at: LatLon::new(p.lat, p.lon),
                weight: config.normalize(p.intensity),
            })
            .filter(|p| p.at.is_valid())
            .collect();
        HeatField {
            points,
            config: config.clone(),
        }
    }

    pub fn peak(&self) -> f64 {
        self.points.iter().map(|p| p.weight).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_green_to_red() {
        let config = HeatmapConfig::default();
        assert_eq!(config.color_for(0.0), "#00ff00");
        assert_eq!(config.color_for(0.3), "#7fff00");
        assert_eq!(config.color_for(0.5), "#ffff00");
        assert_eq!(config.color_for(0.99), "#ff8c00");
        assert_eq!(config.color_for(1.0), "#ff0000");
        assert_eq!(config.color_for(7.5), "#ff0000");
        assert_eq!(config.color_for(-1.0), "#00ff00");
        assert_eq!(config.color_for(f64::NAN), "#00ff00");
    }

    #[test]
    fn intensities_normalise_against_max() {
        let config = HeatmapConfig {
            max: 2.0,
            ..Default::default()
        };
        assert_eq!(config.normalize(1.0), 0.5);
        assert_eq!(config.normalize(4.0), 1.0);
    }

    #[test]
    fn field_skips_invalid_coordinates() {
        let points = [
            HeatPoint { lat: 40.7, lon: -73.9, intensity: 0.8 },
            HeatPoint { lat: f64::NAN, lon: -73.9, intensity: 0.9 },
            HeatPoint { lat: 95.0, lon: 0.0, intensity: 0.9 },
        ];
        let field = HeatField::from_points(&points, &HeatmapConfig::default());
        assert_eq!(field.points.len(), 1);
        assert_eq!(field.peak(), 0.8);
    }
}
