//! Latest fetched data, one wholesale-replaced snapshot per category.

use sct_core::records::{
    Analytics, CameraForecast, CameraRecord, DisasterZone, EmergencyService, HeatPoint,
    ParkingLot, PointOfInterest, Report, RoadSegment, TrafficSignal,
};
use sct_core::Category;
use serde::de::DeserializeOwned;

/// The records of one category, in response order.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Cameras(Vec<CameraRecord>),
    Roads(Vec<RoadSegment>),
    Signals(Vec<TrafficSignal>),
    Pois(Vec<PointOfInterest>),
    Emergency(Vec<EmergencyService>),
    Disaster(Vec<DisasterZone>),
    Parking(Vec<ParkingLot>),
    Reports(Vec<Report>),
    Heatmap(Vec<HeatPoint>),
}

impl Snapshot {
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Cameras => Snapshot::Cameras(Vec::new()),
            Category::Roads => Snapshot::Roads(Vec::new()),
            Category::Signals => Snapshot::Signals(Vec::new()),
            Category::Pois => Snapshot::Pois(Vec::new()),
            Category::Emergency => Snapshot::Emergency(Vec::new()),
            Category::Disaster => Snapshot::Disaster(Vec::new()),
            Category::Parking => Snapshot::Parking(Vec::new()),
            Category::Reports => Snapshot::Reports(Vec::new()),
            Category::Heatmap => Snapshot::Heatmap(Vec::new()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Snapshot::Cameras(_) => Category::Cameras,
            Snapshot::Roads(_) => Category::Roads,
            Snapshot::Signals(_) => Category::Signals,
            Snapshot::Pois(_) => Category::Pois,
            Snapshot::Emergency(_) => Category::Emergency,
            Snapshot::Disaster(_) => Category::Disaster,
            Snapshot::Parking(_) => Category::Parking,
            Snapshot::Reports(_) => Category::Reports,
            Snapshot::Heatmap(_) => Category::Heatmap,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Cameras(r) => r.len(),
            Snapshot::Roads(r) => r.len(),
            Snapshot::Signals(r) => r.len(),
            Snapshot::Pois(r) => r.len(),
            Snapshot::Emergency(r) => r.len(),
            Snapshot::Disaster(r) => r.len(),
            Snapshot::Parking(r) => r.len(),
            Snapshot::Reports(r) => r.len(),
            Snapshot::Heatmap(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record type that forms the snapshot of exactly one category.
pub trait SnapshotRecord: DeserializeOwned {
    fn into_snapshot(records: Vec<Self>) -> Snapshot;
}

macro_rules! snapshot_records {
    ($($variant:ident => $record:ty),* $(,)?) => {
        $(
            impl SnapshotRecord for $record {
                fn into_snapshot(records: Vec<Self>) -> Snapshot {
                    Snapshot::$variant(records)
                }
            }
        )*
    };
}

snapshot_records! {
    Cameras => CameraRecord,
    Roads => RoadSegment,
    Signals => TrafficSignal,
    Pois => PointOfInterest,
    Emergency => EmergencyService,
    Disaster => DisasterZone,
    Parking => ParkingLot,
    Reports => Report,
    Heatmap => HeatPoint,
}

/// Holds the current snapshot for every category plus the two derived-data
/// slots (forecast, analytics).
///
/// Every category starts with an empty snapshot, so reads never fail.
#[derive(Debug, Clone)]
pub struct DataStore {
    snapshots: Vec<Snapshot>,
    forecast: Option<Vec<CameraForecast>>,
    analytics: Option<Analytics>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        DataStore {
            snapshots: Category::ALL.iter().map(|c| Snapshot::empty(*c)).collect(),
            forecast: None,
            analytics: None,
        }
    }

    /// Replace the snapshot of the category the snapshot belongs to.
    pub fn set(&mut self, snapshot: Snapshot) {
        let index = snapshot.category().index();
        self.snapshots[index] = snapshot;
    }

    /// Current snapshot, or an empty one if the category was never fetched.
    pub fn get(&self, category: Category) -> &Snapshot {
        &self.snapshots[category.index()]
    }

    pub fn cameras(&self) -> &[CameraRecord] {
        match self.get(Category::Cameras) {
            Snapshot::Cameras(cameras) => cameras,
            _ => &[],
        }
    }

    pub fn set_forecast(&mut self, forecast: Vec<CameraForecast>) {
        self.forecast = Some(forecast);
    }

    pub fn forecast(&self) -> Option<&[CameraForecast]> {
        self.forecast.as_deref()
    }

    pub fn set_analytics(&mut self, analytics: Analytics) {
        self.analytics = Some(analytics);
    }

    pub fn analytics(&self) -> Option<&Analytics> {
        self.analytics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sct_core::records::HeatPoint;

    #[test]
    fn unpopulated_category_is_empty() {
        let store = DataStore::new();
        for category in Category::ALL {
            let snapshot = store.get(category);
            assert!(snapshot.is_empty());
            assert_eq!(snapshot.category(), category);
        }
        assert!(store.cameras().is_empty());
        assert!(store.forecast().is_none());
    }

    #[test]
    fn set_replaces_wholesale() {
        let mut store = DataStore::new();
        let first = vec![
            HeatPoint { lat: 1.0, lon: 2.0, intensity: 0.5 },
            HeatPoint { lat: 3.0, lon: 4.0, intensity: 0.7 },
        ];
        store.set(Snapshot::Heatmap(first));
        assert_eq!(store.get(Category::Heatmap).len(), 2);

        let second = vec![HeatPoint { lat: 5.0, lon: 6.0, intensity: 0.1 }];
        store.set(Snapshot::Heatmap(second.clone()));
        assert_eq!(store.get(Category::Heatmap), &Snapshot::Heatmap(second));
        assert!(store.get(Category::Cameras).is_empty());
    }
}
