// deephold_blueprint — map-region to blueprint script translation.
//
// Translates a 3-D region of a colony map into replayable blueprint
// files: every tile and building in the region is classified into a
// compact command token per phase (dig / build / place / query), the
// tokens are accumulated into per-phase sparse volumes, and each volume
// is serialized as minimal or pretty comma-separated text a replay tool
// can apply to a fresh map.
//
// Module overview:
// - `types.rs`:     MapCoord, TileShape, MapExtents.
// - `map.rs`:       Building model (tagged `BuildingKind` union) and the
//                   `MapSource` host query trait.
// - `snapshot.rs`:  Serde-backed in-memory `MapSource` for tests and the
//                   CLI.
// - `dig.rs`:       Tile shape -> dig token classifier.
// - `build.rs`:     Building -> build token classifier (anchor tiles,
//                   expansion suffixes, per-category tables).
// - `place.rs`:     Stockpile -> place token and room -> query token.
// - `phase.rs`:     Phase descriptors, per-tile context, dispatch table.
// - `volume.rs`:    Three-level ordered sparse volume.
// - `serialize.rs`: Minimal / pretty encoders and the modeline.
// - `cache.rs`:     Invocation-scoped string interning.
// - `options.rs`:   BlueprintOptions.
// - `error.rs`:     ExportError.
// - `export.rs`:    Orchestrator, `FilenamePolicy` seam, file table.
//
// The library holds no global state: one invocation of
// `generate_blueprints` owns its cache, volumes, and output streams,
// and drops them on every exit path.
//
// **Critical constraint: determinism.** Identical inputs must produce
// byte-identical files. Volumes and the output-file table use `BTreeMap`
// so iteration order never depends on hashing.

pub mod build;
pub mod cache;
pub mod dig;
pub mod error;
pub mod export;
pub mod map;
pub mod options;
pub mod phase;
pub mod place;
pub mod serialize;
pub mod snapshot;
pub mod types;
pub mod volume;

pub use error::{ExportError, Result};
pub use export::{DefaultNamePolicy, FilenamePolicy, generate_blueprints};
pub use map::{Building, BuildingKind, MapSource};
pub use options::{BlueprintOptions, OutputFormat, SplitStrategy};
pub use phase::Phase;
pub use snapshot::{MapSnapshot, SnapshotMap};
pub use types::{MapCoord, MapExtents, TileShape};
