// Core types shared across the blueprint exporter.
//
// Defines the absolute map coordinate (`MapCoord`), the resolved terrain
// shape of a tile (`TileShape`), and the map's bounding extents
// (`MapExtents`). All types derive `Serialize` and `Deserialize` so map
// snapshots and invocation options can round-trip through JSON.
//
// The coordinate system matches the host map: X east, Y south, Z up.
// A blueprint region is a cuboid of these coordinates; after subtracting
// the region's start corner, the same triple doubles as a volume-relative
// index (see `volume.rs`).
//
// See also: `map.rs` for the building model and the `MapSource` query
// trait, `dig.rs` for the shape-to-token classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute tile position on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl MapCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for MapCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// The resolved terrain shape of a single tile.
///
/// This is the classifier's entire input domain for the dig phase.
/// `Void` is the shape of anything outside the map or otherwise
/// unresolvable; it classifies the same as `Wall` (nothing to dig).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileShape {
    Empty,
    Floor,
    Boulder,
    Pebbles,
    BrookTop,
    Fortification,
    StairUp,
    StairDown,
    StairUpDown,
    Ramp,
    RampTop,
    #[default]
    Wall,
    Void,
}

/// Bounding extents of the map, in tiles. Valid coordinates are
/// `0..x_count` on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapExtents {
    pub x_count: i32,
    pub y_count: i32,
    pub z_count: i32,
}

impl MapExtents {
    pub fn contains(&self, pos: MapCoord) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.x_count
            && pos.y < self.y_count
            && pos.z < self.z_count
    }
}
