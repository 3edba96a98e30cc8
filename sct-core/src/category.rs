use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named class of map data. Each category has exactly one fetcher,
/// one renderer and one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cameras,
    Roads,
    Signals,
    Pois,
    Emergency,
    Disaster,
    Parking,
    Reports,
    Heatmap,
}

impl Category {
    /// Every category, in declaration order. `index()` is the position here.
    pub const ALL: [Category; 9] = [
        Category::Cameras,
        Category::Roads,
        Category::Signals,
        Category::Pois,
        Category::Emergency,
        Category::Disaster,
        Category::Parking,
        Category::Reports,
        Category::Heatmap,
    ];

    /// Categories loaded on every refresh and visible at startup.
    pub const ALWAYS_ON: [Category; 3] = [Category::Cameras, Category::Roads, Category::Heatmap];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn is_always_on(self) -> bool {
        Self::ALWAYS_ON.contains(&self)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Cameras => "cameras",
            Category::Roads => "roads",
            Category::Signals => "signals",
            Category::Pois => "pois",
            Category::Emergency => "emergency",
            Category::Disaster => "disaster",
            Category::Parking => "parking",
            Category::Reports => "reports",
            Category::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{}' (expected one of {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Parking".parse::<Category>(), Ok(Category::Parking));
        assert_eq!(" heatmap ".parse::<Category>(), Ok(Category::Heatmap));
        assert!("traffic".parse::<Category>().is_err());
    }

    #[test]
    fn always_on_set() {
        assert!(Category::Cameras.is_always_on());
        assert!(Category::Heatmap.is_always_on());
        assert!(!Category::Reports.is_always_on());
    }
}
