// Serde-backed in-memory map implementation of `MapSource`.
//
// A `MapSnapshot` is the JSON-loadable description of a map region: its
// extents, an optional cursor, a fill shape for unlisted tiles (walls
// by default, as most of a map is solid rock), explicit tile overrides,
// and a building list. `SnapshotMap` wraps a snapshot with hash indexes
// so per-tile queries during a sweep stay O(1).
//
// This is the concrete map the CLI loads and the integration tests
// drive; an embedding host with live world state implements `MapSource`
// directly and never touches this module.

use crate::map::{Building, MapSource};
use crate::types::{MapCoord, MapExtents, TileShape};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One explicit tile shape in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    pub pos: MapCoord,
    pub shape: TileShape,
}

/// A JSON-serializable description of a map region.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub extents: MapExtents,
    #[serde(default)]
    pub cursor: Option<MapCoord>,
    /// Shape of every tile not listed in `tiles`.
    #[serde(default)]
    pub fill: TileShape,
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
    #[serde(default)]
    pub buildings: Vec<Building>,
}

impl MapSnapshot {
    /// A snapshot with every tile set to `fill` and nothing else.
    pub fn filled(extents: MapExtents, fill: TileShape) -> Self {
        Self { extents, cursor: None, fill, tiles: Vec::new(), buildings: Vec::new() }
    }

    /// Override the shape of one tile.
    pub fn set_tile(&mut self, pos: MapCoord, shape: TileShape) {
        self.tiles.push(TileEntry { pos, shape });
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A snapshot with tile and building indexes, ready to serve sweeps.
#[derive(Debug)]
pub struct SnapshotMap {
    extents: MapExtents,
    cursor: Option<MapCoord>,
    fill: TileShape,
    tiles: FxHashMap<MapCoord, TileShape>,
    buildings: Vec<Building>,
    occupancy: FxHashMap<MapCoord, usize>,
}

impl SnapshotMap {
    pub fn new(snapshot: MapSnapshot) -> Self {
        let tiles: FxHashMap<MapCoord, TileShape> =
            snapshot.tiles.iter().map(|t| (t.pos, t.shape)).collect();

        // Later buildings shadow earlier ones on overlapping tiles, the
        // same precedence a host's spatial index would give.
        let mut occupancy = FxHashMap::default();
        for (index, building) in snapshot.buildings.iter().enumerate() {
            for y in building.y1..=building.y2 {
                for x in building.x1..=building.x2 {
                    occupancy.insert(MapCoord::new(x, y, building.z), index);
                }
            }
        }

        Self {
            extents: snapshot.extents,
            cursor: snapshot.cursor,
            fill: snapshot.fill,
            tiles,
            buildings: snapshot.buildings,
            occupancy,
        }
    }
}

impl From<MapSnapshot> for SnapshotMap {
    fn from(snapshot: MapSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl MapSource for SnapshotMap {
    fn tile_shape(&self, pos: MapCoord) -> TileShape {
        if !self.extents.contains(pos) {
            return TileShape::Void;
        }
        self.tiles.get(&pos).copied().unwrap_or(self.fill)
    }

    fn building_at(&self, pos: MapCoord) -> Option<&Building> {
        self.occupancy.get(&pos).map(|&index| &self.buildings[index])
    }

    fn extents(&self) -> MapExtents {
        self.extents
    }

    fn cursor(&self) -> Option<MapCoord> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::BuildingKind;

    fn extents(x: i32, y: i32, z: i32) -> MapExtents {
        MapExtents { x_count: x, y_count: y, z_count: z }
    }

    #[test]
    fn fill_covers_unlisted_tiles() {
        let mut snapshot = MapSnapshot::filled(extents(4, 4, 2), TileShape::Floor);
        snapshot.set_tile(MapCoord::new(1, 1, 0), TileShape::Ramp);
        let map = SnapshotMap::new(snapshot);

        assert_eq!(map.tile_shape(MapCoord::new(0, 0, 0)), TileShape::Floor);
        assert_eq!(map.tile_shape(MapCoord::new(1, 1, 0)), TileShape::Ramp);
    }

    #[test]
    fn out_of_bounds_is_void() {
        let map = SnapshotMap::new(MapSnapshot::filled(extents(2, 2, 1), TileShape::Floor));
        assert_eq!(map.tile_shape(MapCoord::new(2, 0, 0)), TileShape::Void);
        assert_eq!(map.tile_shape(MapCoord::new(0, 0, -1)), TileShape::Void);
        assert!(!map.is_valid_tile(MapCoord::new(2, 0, 0)));
    }

    #[test]
    fn buildings_are_indexed_by_footprint() {
        let mut snapshot = MapSnapshot::filled(extents(8, 8, 2), TileShape::Floor);
        snapshot.buildings.push(Building {
            x1: 2,
            y1: 2,
            x2: 4,
            y2: 4,
            z: 1,
            is_room: false,
            kind: BuildingKind::TradeDepot,
        });
        let map = SnapshotMap::new(snapshot);

        assert!(map.building_at(MapCoord::new(3, 3, 1)).is_some());
        assert!(map.building_at(MapCoord::new(2, 4, 1)).is_some());
        // Same footprint, wrong layer.
        assert!(map.building_at(MapCoord::new(3, 3, 0)).is_none());
        assert!(map.building_at(MapCoord::new(5, 3, 1)).is_none());
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let mut snapshot = MapSnapshot::filled(extents(4, 4, 1), TileShape::Wall);
        snapshot.cursor = Some(MapCoord::new(1, 2, 0));
        snapshot.set_tile(MapCoord::new(0, 0, 0), TileShape::StairDown);
        snapshot.buildings.push(Building {
            x1: 1,
            y1: 1,
            x2: 1,
            y2: 1,
            z: 0,
            is_room: true,
            kind: BuildingKind::Bed,
        });

        let json = snapshot.to_json().unwrap();
        let restored = MapSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.extents, snapshot.extents);
        assert_eq!(restored.cursor, Some(MapCoord::new(1, 2, 0)));
        assert_eq!(restored.fill, TileShape::Wall);
        assert_eq!(restored.tiles, snapshot.tiles);
        assert_eq!(restored.buildings.len(), 1);
        assert!(restored.buildings[0].is_room);
    }

    #[test]
    fn defaults_keep_sparse_snapshots_small() {
        // Only extents are required in the JSON form.
        let restored =
            MapSnapshot::from_json(r#"{"extents":{"x_count":2,"y_count":2,"z_count":1}}"#).unwrap();
        assert_eq!(restored.fill, TileShape::Wall);
        assert!(restored.tiles.is_empty());
        assert!(restored.buildings.is_empty());
        assert!(restored.cursor.is_none());
    }
}
