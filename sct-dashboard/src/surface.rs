//! The map surface the layer registry draws onto.

use crate::render::{Primitive, Shape};
use log::{debug, info};
use sct_core::records::LatLon;
use sct_core::Category;
use std::collections::BTreeMap;

/// Opaque token for a primitive set attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(u64);

impl LayerHandle {
    pub const fn new(id: u64) -> Self {
        LayerHandle(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Something that can show and hide sets of primitives.
///
/// A handle is detached at most once; the layer registry guarantees that.
pub trait MapSurface: Send {
    fn attach(&mut self, category: Category, primitives: &[Primitive]) -> LayerHandle;

    fn detach(&mut self, handle: LayerHandle);

    fn show_popup(&mut self, _at: LatLon, _content: &str) {}
}

/// Keeps attached primitive sets in memory. Backs the tests and any
/// consumer that wants to read back what is on the map.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next: u64,
    attached: BTreeMap<LayerHandle, (Category, Vec<Primitive>)>,
    popups: Vec<(LatLon, String)>,
    detach_count: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives attached for a category, across every live handle.
    pub fn attached(&self, category: Category) -> Vec<&Primitive> {
        self.attached
            .values()
            .filter(|(c, _)| *c == category)
            .flat_map(|(_, primitives)| primitives.iter())
            .collect()
    }

    /// Number of live handles for a category.
    pub fn handle_count(&self, category: Category) -> usize {
        self.attached.values().filter(|(c, _)| *c == category).count()
    }

    pub fn is_attached(&self, handle: LayerHandle) -> bool {
        self.attached.contains_key(&handle)
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    pub fn popups(&self) -> &[(LatLon, String)] {
        &self.popups
    }
}

impl MapSurface for MemorySurface {
    fn attach(&mut self, category: Category, primitives: &[Primitive]) -> LayerHandle {
        self.next += 1;
        let handle = LayerHandle(self.next);
        self.attached.insert(handle, (category, primitives.to_vec()));
        handle
    }

    fn detach(&mut self, handle: LayerHandle) {
        if self.attached.remove(&handle).is_some() {
            self.detach_count += 1;
        }
    }

    fn show_popup(&mut self, at: LatLon, content: &str) {
        self.popups.push((at, content.to_string()));
    }
}

/// A headless surface that only logs what it would draw.
#[derive(Debug, Default)]
pub struct LogSurface {
    next: u64,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for LogSurface {
    fn attach(&mut self, category: Category, primitives: &[Primitive]) -> LayerHandle {
        self.next += 1;
        let markers = primitives
            .iter()
            .filter(|p| matches!(p.shape, Shape::Marker { .. }))
            .count();
        debug!(
            "attach {} layer #{}: {} primitives ({} markers)",
            category,
            self.next,
            primitives.len(),
            markers
        );
        LayerHandle(self.next)
    }

    fn detach(&mut self, handle: LayerHandle) {
        debug!("detach layer #{}", handle.id());
    }

    fn show_popup(&mut self, at: LatLon, content: &str) {
        info!("popup at {}: {}", at, content);
    }
}
