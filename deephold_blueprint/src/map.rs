// Building model and the host map query interface.
//
// `Building` is the exporter's view of a structure occupying map tiles:
// a one-z-level bounding box, a room flag, and a `BuildingKind` tagged
// union carrying exactly the sub-variant data each classifier reads
// (direction, workshop kind, trap configuration, stockpile categories).
// The kind discriminant replaces the downcast-per-category dispatch of
// typical host engines with one exhaustive `match` per classifier — see
// `build.rs` and `place.rs`.
//
// `MapSource` is the query seam to the embedding host's live world
// state: tile shapes, building lookup by tile, coordinate validity, map
// extents, and the user cursor. The core never stores world state of
// its own; `snapshot.rs` provides the in-repo implementation used by
// tests and the CLI.
//
// See also: `types.rs` for `MapCoord` / `TileShape` / `MapExtents`,
// `export.rs` for how lookups are primed once per tile and shared
// across phases.

use crate::types::{MapCoord, MapExtents, TileShape};
use serde::{Deserialize, Serialize};

/// Which side a screw pump draws from, or which way rollers push.
/// Rollers reuse the pump vocabulary, as the host engine does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpDirection {
    FromNorth,
    FromEast,
    FromSouth,
    FromWest,
}

/// Bridge articulation. `Raising` is a bridge with no swing direction
/// recorded (the host default).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeDirection {
    Raising,
    Retracting,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiegeEngineKind {
    Catapult,
    Ballista,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkshopKind {
    Leatherworks,
    Quern,
    Millstone,
    Loom,
    Clothiers,
    Bowyers,
    Carpenters,
    MetalsmithsForge,
    MagmaForge,
    Jewelers,
    Masons,
    Butchers,
    Tanners,
    Craftsdwarfs,
    Siege,
    Mechanics,
    Still,
    Farmers,
    Kitchen,
    Fishery,
    Ashery,
    Dyers,
    Kennels,
    Custom,
    Tool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FurnaceKind {
    WoodFurnace,
    Smelter,
    GlassFurnace,
    Kiln,
    MagmaSmelter,
    MagmaGlassFurnace,
    MagmaKiln,
    Custom,
}

/// Which compass arms a track construction connects. At least one arm
/// is set in well-formed data; the all-false value classifies as
/// unsupported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compass {
    #[serde(default)]
    pub north: bool,
    #[serde(default)]
    pub south: bool,
    #[serde(default)]
    pub east: bool,
    #[serde(default)]
    pub west: bool,
}

impl Compass {
    pub const fn new(north: bool, south: bool, east: bool, west: bool) -> Self {
        Self { north, south, east, west }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionKind {
    Fortification,
    Wall,
    Floor,
    UpStair,
    DownStair,
    UpDownStair,
    Ramp,
    Track(Compass),
    TrackRamp(Compass),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapKind {
    StoneFall,
    Weapon,
    Lever,
    PressurePlate,
    Cage,
    /// A track stop. Its token is assembled incrementally from the dump
    /// configuration and the friction value — see `build.rs`.
    TrackStop {
        use_dump: bool,
        dump_x_shift: i32,
        dump_y_shift: i32,
        friction: u32,
    },
}

/// Bitmask of stockpile material categories. Exactly one bit set is the
/// supported configuration; see `place.rs` for the token mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockpileCategories(pub u32);

impl StockpileCategories {
    pub const ANIMALS: u32 = 1 << 0;
    pub const FOOD: u32 = 1 << 1;
    pub const FURNITURE: u32 = 1 << 2;
    pub const CORPSES: u32 = 1 << 3;
    pub const REFUSE: u32 = 1 << 4;
    pub const WOOD: u32 = 1 << 5;
    pub const STONE: u32 = 1 << 6;
    pub const GEMS: u32 = 1 << 7;
    pub const BARS_BLOCKS: u32 = 1 << 8;
    pub const CLOTH: u32 = 1 << 9;
    pub const LEATHER: u32 = 1 << 10;
    pub const AMMO: u32 = 1 << 11;
    pub const COINS: u32 = 1 << 12;
    pub const FINISHED_GOODS: u32 = 1 << 13;
    pub const WEAPONS: u32 = 1 << 14;
    pub const ARMOR: u32 = 1 << 15;
}

/// The concrete category of a building, carrying only the fields its
/// classifier needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Armorstand,
    Bed,
    Chair,
    Door,
    Floodgate,
    Cabinet,
    Box,
    Weaponrack,
    Statue,
    Table,
    Well,
    GlassWindow,
    GemWindow,
    AnimalTrap,
    Chain,
    Cage,
    GearAssembly,
    VerticalAxle,
    Support,
    ArcheryTarget,
    TractionBench,
    Hatch,
    Slab,
    NestBox,
    Hive,
    WallGrate,
    FloorGrate,
    VerticalBars,
    FloorBars,
    FarmPlot,
    PavedRoad,
    DirtRoad,
    Shop,
    TradeDepot,
    Windmill,
    Bridge { direction: BridgeDirection },
    SiegeEngine { kind: SiegeEngineKind },
    Workshop { kind: WorkshopKind },
    Furnace { kind: FurnaceKind },
    Construction { kind: ConstructionKind },
    Trap { kind: TrapKind },
    ScrewPump { direction: PumpDirection },
    WaterWheel { is_vertical: bool },
    HorizontalAxle { is_vertical: bool },
    Rollers { direction: PumpDirection },
    Stockpile { categories: StockpileCategories },
    /// A category this exporter has no token for.
    Other,
}

/// A building occupying a rectangle of tiles on a single z-level.
///
/// `x1/y1` is the north-west corner and `x2/y2` the south-east corner,
/// both inclusive. Single-tile buildings have all four equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub z: i32,
    #[serde(default)]
    pub is_room: bool,
    pub kind: BuildingKind,
}

impl Building {
    /// Footprint width in tiles (at least 1).
    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    /// Footprint height in tiles (at least 1).
    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    /// Center tile of the footprint. For even dimensions this is the
    /// tile just north-west of the geometric center, matching the host
    /// engine's designation point.
    pub fn center(&self) -> (i32, i32) {
        (self.x1 + (self.x2 - self.x1) / 2, self.y1 + (self.y2 - self.y1) / 2)
    }

    /// Whether a position lies within the footprint.
    pub fn contains(&self, pos: MapCoord) -> bool {
        pos.z == self.z && pos.x >= self.x1 && pos.x <= self.x2 && pos.y >= self.y1 && pos.y <= self.y2
    }
}

/// Query interface to the host's live world state.
///
/// Absence of a building at a tile is a normal, frequent outcome, never
/// an error. Out-of-bounds tile shape queries return `TileShape::Void`.
pub trait MapSource {
    /// Resolved terrain shape at an absolute coordinate.
    fn tile_shape(&self, pos: MapCoord) -> TileShape;

    /// The building occupying an absolute coordinate, if any.
    fn building_at(&self, pos: MapCoord) -> Option<&Building>;

    /// Whether the coordinate is a valid map tile.
    fn is_valid_tile(&self, pos: MapCoord) -> bool {
        self.extents().contains(pos)
    }

    /// Current map bounding extents.
    fn extents(&self) -> MapExtents;

    /// The user-specified cursor position, if one is active.
    fn cursor(&self) -> Option<MapCoord>;
}
