// Sparse 3-D accumulation volume for classified tiles.
//
// A three-level ordered mapping: relative z -> relative y -> relative
// x -> interned command token. Only non-empty classification results
// are ever inserted, so a mostly-empty mountain of rock costs nothing
// per untouched tile. `BTreeMap` at every level gives the ascending
// per-axis iteration order the serializer's row/column/layer emission
// depends on.
//
// Keys are region-relative: the orchestrator subtracts the start corner
// before inserting, with z measured as the absolute distance from the
// start plane so a descending sweep still reads near-to-far.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::rc::Rc;

/// One x-indexed row of tokens.
pub type VolumeRow = BTreeMap<i32, Rc<str>>;
/// One y-indexed layer of rows.
pub type VolumeArea = BTreeMap<i32, VolumeRow>;

/// The accumulated output of one phase over the swept region.
#[derive(Debug, Default)]
pub struct SparseVolume {
    areas: BTreeMap<i32, VolumeArea>,
}

impl SparseVolume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token at a region-relative position. Inserting twice at
    /// the same position keeps the later token.
    pub fn insert(&mut self, z: i32, y: i32, x: i32, token: Rc<str>) {
        self.areas.entry(z).or_default().entry(y).or_default().insert(x, token);
    }

    /// Whether any tile produced output.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// The layer at relative z, if any tile on it produced output.
    pub fn layer(&self, z: i32) -> Option<&VolumeArea> {
        self.areas.get(&z)
    }

    /// Occupied layers in ascending z order.
    pub fn layers(&self) -> btree_map::Iter<'_, i32, VolumeArea> {
        self.areas.iter()
    }
}
