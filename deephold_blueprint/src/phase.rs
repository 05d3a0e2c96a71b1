// Phase descriptors and per-tile classification context.
//
// A phase is one named category of blueprint output — dig, build,
// place, or query — pairing a tile classification function with a flag
// saying whether it needs the building occupying the tile. The sweep in
// `export.rs` resolves that building at most once per tile and shares
// it across every phase that asked, which is the dominant lookup cost
// on building-dense maps.
//
// Classifiers return a `Token`: either a fixed literal from a category
// table or a string assembled for this building (expansion suffixes,
// track-stop configurations). `export.rs` interns both through the
// invocation's `StringCache` before storing them in a volume.

use crate::build;
use crate::dig;
use crate::map::{Building, MapSource};
use crate::options::BlueprintOptions;
use crate::place;
use crate::types::MapCoord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One named category of blueprint output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Dig,
    Build,
    Place,
    Query,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Dig, Phase::Build, Phase::Place, Phase::Query];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Dig => "dig",
            Phase::Build => "build",
            Phase::Place => "place",
            Phase::Query => "query",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification result: a command token for one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal from a category table.
    Fixed(&'static str),
    /// A token assembled for this specific building.
    Dynamic(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Fixed(s) => s,
            Token::Dynamic(s) => s,
        }
    }
}

/// Transient per-tile state shared across the phases of one sweep
/// iteration.
pub struct TileContext<'a> {
    /// Whether the serializer will render in pretty mode. Non-anchor
    /// building tiles emit a placeholder in pretty mode and nothing in
    /// minimal mode.
    pub pretty: bool,
    /// The building occupying this tile, resolved lazily at most once.
    pub building: Option<&'a Building>,
    pub(crate) building_resolved: bool,
}

impl<'a> TileContext<'a> {
    pub fn new(pretty: bool) -> Self {
        Self { pretty, building: None, building_resolved: false }
    }
}

/// The non-anchor marker for an occupied tile: a backtick in pretty
/// mode, nothing in minimal mode.
pub(crate) fn placeholder(ctx: &TileContext<'_>) -> Option<Token> {
    if ctx.pretty { Some(Token::Fixed("`")) } else { None }
}

/// Classification entry point shared by all phases.
pub type ClassifyFn = fn(&dyn MapSource, MapCoord, &TileContext<'_>) -> Option<Token>;

/// A phase's unit of work: its name, classifier, and whether the sweep
/// must prime the building lookup before calling it.
#[derive(Clone, Copy)]
pub struct PhaseSpec {
    pub phase: Phase,
    pub classify: ClassifyFn,
    pub needs_building: bool,
}

fn dig_tile(map: &dyn MapSource, pos: MapCoord, _ctx: &TileContext<'_>) -> Option<Token> {
    dig::dig_token(map.tile_shape(pos)).map(Token::Fixed)
}

fn build_tile(_map: &dyn MapSource, pos: MapCoord, ctx: &TileContext<'_>) -> Option<Token> {
    build::build_token(pos, ctx)
}

fn place_tile(_map: &dyn MapSource, pos: MapCoord, ctx: &TileContext<'_>) -> Option<Token> {
    place::place_token(pos, ctx)
}

fn query_tile(_map: &dyn MapSource, _pos: MapCoord, ctx: &TileContext<'_>) -> Option<Token> {
    place::query_token(ctx)
}

/// The phases a set of options activates, in fixed dig, build, place,
/// query order. Auto-detect activates all four. May be empty, which the
/// orchestrator reports as a configuration error.
pub fn phase_specs(opts: &BlueprintOptions) -> Vec<PhaseSpec> {
    let mut specs = Vec::new();
    if opts.auto_phase || opts.dig {
        specs.push(PhaseSpec { phase: Phase::Dig, classify: dig_tile, needs_building: false });
    }
    if opts.auto_phase || opts.build {
        specs.push(PhaseSpec { phase: Phase::Build, classify: build_tile, needs_building: true });
    }
    if opts.auto_phase || opts.place {
        specs.push(PhaseSpec { phase: Phase::Place, classify: place_tile, needs_building: true });
    }
    if opts.auto_phase || opts.query {
        specs.push(PhaseSpec { phase: Phase::Query, classify: query_tile, needs_building: true });
    }
    specs
}
