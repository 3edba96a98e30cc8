//! Per-category layer visibility and the primitive sets attached to the map.

use crate::render::heat::HeatmapConfig;
use crate::render::{self, Primitive};
use crate::store::DataStore;
use crate::surface::{LayerHandle, MapSurface};
use log::debug;
use sct_core::Category;
use std::collections::BTreeSet;

/// Visibility plus the last rendered primitives of one category.
///
/// A hidden layer never holds a handle; a visible one holds the handle of
/// exactly its `rendered` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerState {
    pub visible: bool,
    pub rendered: Vec<Primitive>,
    pub handle: Option<LayerHandle>,
}

#[derive(Debug)]
pub struct LayerRegistry {
    layers: Vec<LayerState>,
    heatmap: HeatmapConfig,
}

impl LayerRegistry {
    /// Every category starts hidden except those in `visible`. Nothing is
    /// attached until `attach_visible` runs against a surface.
    pub fn new(visible: &BTreeSet<Category>, heatmap: HeatmapConfig) -> Self {
        let layers = Category::ALL
            .iter()
            .map(|c| LayerState {
                visible: visible.contains(c),
                ..Default::default()
            })
            .collect();
        LayerRegistry { layers, heatmap }
    }

    pub fn state(&self, category: Category) -> &LayerState {
        &self.layers[category.index()]
    }

    pub fn is_visible(&self, category: Category) -> bool {
        self.state(category).visible
    }

    pub fn visible(&self) -> BTreeSet<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_visible(*c))
            .collect()
    }

    /// Render and attach every visible layer from the current store.
    pub fn attach_visible<S: MapSurface + ?Sized>(&mut self, store: &DataStore, surface: &mut S) {
        for category in Category::ALL {
            if self.is_visible(category) {
                self.rerender(category, store, surface);
            }
        }
    }

    /// Show or hide a layer. Returns whether the visibility changed.
    ///
    /// Showing attaches the render of the current snapshot. Hiding detaches
    /// but keeps the last render.
    pub fn set_visible<S: MapSurface + ?Sized>(
        &mut self,
        category: Category,
        visible: bool,
        store: &DataStore,
        surface: &mut S,
    ) -> bool {
        if self.is_visible(category) == visible {
            return false;
        }
        if visible {
            self.layers[category.index()].visible = true;
            self.rerender(category, store, surface);
        } else {
            let layer = &mut self.layers[category.index()];
            layer.visible = false;
            if let Some(handle) = layer.handle.take() {
                surface.detach(handle);
            }
        }
        debug!("{} layer {}", category, if visible { "shown" } else { "hidden" });
        true
    }

    /// Recompute the category's primitives from the store, swapping them onto
    /// the surface when the layer is visible.
    pub fn rerender<S: MapSurface + ?Sized>(&mut self, category: Category, store: &DataStore, surface: &mut S) {
        let rendered = render::render(store.get(category), &self.heatmap);
        let layer = &mut self.layers[category.index()];
        if let Some(handle) = layer.handle.take() {
            surface.detach(handle);
        }
        if layer.visible {
            layer.handle = Some(surface.attach(category, &rendered));
        }
        layer.rendered = rendered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Snapshot, SnapshotRecord};
    use crate::surface::MemorySurface;
    use crate::testing::fixtures;
    use sct_core::records::{ParkingLot, PointOfInterest};
    use sct_core::transport::decode;

    fn store_with<R: SnapshotRecord>(json: &str) -> DataStore {
        let mut store = DataStore::new();
        store.set(R::into_snapshot(decode::<Vec<R>>("/test", json).unwrap()));
        store
    }

    fn registry() -> LayerRegistry {
        LayerRegistry::new(&Category::ALWAYS_ON.into_iter().collect(), HeatmapConfig::default())
    }

    #[test]
    fn optional_layers_start_hidden() {
        let registry = registry();
        assert!(registry.is_visible(Category::Cameras));
        assert!(!registry.is_visible(Category::Parking));
        assert_eq!(registry.visible().len(), 3);
    }

    #[test]
    fn toggle_off_then_on_reattaches_identical_primitives() {
        let store = store_with::<ParkingLot>(fixtures::PARKING);
        let mut surface = MemorySurface::new();
        let mut registry = registry();

        assert!(registry.set_visible(Category::Parking, true, &store, &mut surface));
        let first: Vec<Primitive> = surface.attached(Category::Parking).into_iter().cloned().collect();
        assert_eq!(first.len(), 4);

        assert!(registry.set_visible(Category::Parking, false, &store, &mut surface));
        assert!(surface.attached(Category::Parking).is_empty());
        assert!(registry.state(Category::Parking).handle.is_none());
        assert_eq!(registry.state(Category::Parking).rendered.len(), 4);

        assert!(registry.set_visible(Category::Parking, true, &store, &mut surface));
        let second: Vec<Primitive> = surface.attached(Category::Parking).into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_toggle_is_a_no_op() {
        let store = DataStore::new();
        let mut surface = MemorySurface::new();
        let mut registry = registry();
        assert!(!registry.set_visible(Category::Cameras, true, &store, &mut surface));
        assert!(!registry.set_visible(Category::Signals, false, &store, &mut surface));
        assert_eq!(surface.detach_count(), 0);
    }

    #[test]
    fn rerender_replaces_rather_than_merges() {
        let mut store = store_with::<PointOfInterest>(fixtures::POIS);
        let mut surface = MemorySurface::new();
        let mut registry = registry();
        registry.set_visible(Category::Pois, true, &store, &mut surface);
        let count = surface.attached(Category::Pois).len();
        assert!(count > 1);

        store.set(Snapshot::Pois(Vec::new()));
        registry.rerender(Category::Pois, &store, &mut surface);
        assert!(surface.attached(Category::Pois).is_empty());
        assert_eq!(surface.handle_count(Category::Pois), 1);

        let store = store_with::<PointOfInterest>(fixtures::POIS);
        registry.rerender(Category::Pois, &store, &mut surface);
        assert_eq!(surface.attached(Category::Pois).len(), count);
        assert_eq!(surface.handle_count(Category::Pois), 1);
    }

    #[test]
    fn hidden_rerender_updates_render_without_attaching() {
        let store = store_with::<ParkingLot>(fixtures::PARKING);
        let mut surface = MemorySurface::new();
        let mut registry = registry();
        registry.rerender(Category::Parking, &store, &mut surface);
        assert_eq!(registry.state(Category::Parking).rendered.len(), 4);
        assert!(registry.state(Category::Parking).handle.is_none());
        assert_eq!(surface.handle_count(Category::Parking), 0);
    }
}
