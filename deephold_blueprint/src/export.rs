// Orchestration of one blueprint export invocation.
//
// Drives the whole pipeline: validate options, resolve the start corner
// (explicit or map cursor), clamp the region to the map, sweep every
// tile through the active phase classifiers into per-phase sparse
// volumes, then serialize each volume to its resolved output file.
//
// The sweep walks z in the direction of the requested depth's sign and
// y/x ascending. Per tile, the building lookup is primed at most once
// and shared by every phase that needs it — the cross-phase per-tile
// cache that keeps building-dense sweeps linear in tiles, not in
// tiles x phases.
//
// File handling: phases resolving to the same filename (via the
// `FilenamePolicy` collaborator) append to one shared stream in phase
// order; a file is truncated only when first opened. Nothing is opened
// at all on the early failure paths. If writing phase N fails, the
// files already written for earlier phases are left as they are.

use crate::cache::StringCache;
use crate::error::{ExportError, Result};
use crate::map::MapSource;
use crate::options::{BlueprintOptions, OutputFormat, SplitStrategy};
use crate::phase::{Phase, PhaseSpec, TileContext, phase_specs};
use crate::serialize::{modeline, write_minimal, write_pretty};
use crate::types::MapCoord;
use crate::volume::SparseVolume;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Resolves the output path for one phase of an invocation.
///
/// This is a collaborator seam: embedding hosts substitute their own
/// naming scheme. A failure aborts the whole invocation.
pub trait FilenamePolicy {
    fn filename(&self, opts: &BlueprintOptions, phase: Phase) -> Result<PathBuf>;
}

/// The stock naming scheme: `<root>/<name>-<phase>.csv` per phase, or
/// `<root>/<name>.csv` when phases are combined into one file.
#[derive(Clone, Debug)]
pub struct DefaultNamePolicy {
    root: PathBuf,
}

impl DefaultNamePolicy {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for DefaultNamePolicy {
    fn default() -> Self {
        Self::new("blueprints")
    }
}

impl FilenamePolicy for DefaultNamePolicy {
    fn filename(&self, opts: &BlueprintOptions, phase: Phase) -> Result<PathBuf> {
        if opts.name.is_empty() {
            return Err(ExportError::Filename("blueprint name is empty".to_string()));
        }
        let mut path = self.root.clone();
        match opts.split_strategy {
            SplitStrategy::SinglePhase => path.push(format!("{}-{phase}.csv", opts.name)),
            SplitStrategy::Combined => path.push(format!("{}.csv", opts.name)),
        }
        Ok(path)
    }
}

/// One active phase and the volume it accumulates.
struct PhaseProcessor {
    spec: PhaseSpec,
    volume: SparseVolume,
}

/// Run one export invocation. Returns the generated file paths in
/// ascending path order.
pub fn generate_blueprints(
    map: &dyn MapSource,
    opts: &BlueprintOptions,
    names: &dyn FilenamePolicy,
) -> Result<Vec<PathBuf>> {
    if !opts.dimensions_valid() {
        return Err(ExportError::InvalidDimensions {
            width: opts.width,
            height: opts.height,
            depth: opts.depth,
        });
    }

    let specs = phase_specs(opts);
    if specs.is_empty() {
        return Err(ExportError::NoPhaseRequested);
    }

    // The start corner comes from the options or from the map cursor.
    let start = match opts.start {
        Some(start) => start,
        None => map.cursor().ok_or(ExportError::MissingCursor)?,
    };
    if !map.is_valid_tile(start) {
        return Err(ExportError::InvalidStart(start));
    }

    let end = clamp_end(map, opts, start);
    tracing::debug!(%start, %end, phases = specs.len(), "sweeping blueprint region");

    let processors = sweep(map, opts, start, end, specs);

    let mut output_files: BTreeMap<PathBuf, BufWriter<File>> = BTreeMap::new();
    for processor in &processors {
        write_blueprint(&mut output_files, opts, names, processor)?;
    }
    for stream in output_files.values_mut() {
        stream.flush()?;
    }

    Ok(output_files.into_keys().collect())
}

/// One-beyond-the-last corner of the sweep, cropped to the map. The
/// start tile is already validated and the dimensions non-zero, so the
/// cropped region is never empty.
fn clamp_end(map: &dyn MapSource, opts: &BlueprintOptions, start: MapCoord) -> MapCoord {
    let extents = map.extents();
    let mut end =
        MapCoord::new(start.x + opts.width, start.y + opts.height, start.z + opts.depth);
    end.x = end.x.min(extents.x_count);
    end.y = end.y.min(extents.y_count);
    end.z = end.z.min(extents.z_count);
    // A downward sweep stops one layer past the bottom of the map.
    end.z = end.z.max(-1);
    end
}

/// Walk every tile of the region through every active phase, storing
/// non-empty classifications at region-relative keys.
fn sweep(
    map: &dyn MapSource,
    opts: &BlueprintOptions,
    start: MapCoord,
    end: MapCoord,
    specs: Vec<PhaseSpec>,
) -> Vec<PhaseProcessor> {
    let pretty = opts.format == OutputFormat::Pretty;
    let mut cache = StringCache::new();
    let mut processors: Vec<PhaseProcessor> = specs
        .into_iter()
        .map(|spec| PhaseProcessor { spec, volume: SparseVolume::new() })
        .collect();

    let z_step = if start.z < end.z { 1 } else { -1 };
    let mut z = start.z;
    while z != end.z {
        for y in start.y..end.y {
            for x in start.x..end.x {
                let pos = MapCoord::new(x, y, z);
                let mut ctx = TileContext::new(pretty);
                for processor in &mut processors {
                    if processor.spec.needs_building && !ctx.building_resolved {
                        ctx.building = map.building_at(pos);
                        ctx.building_resolved = true;
                    }
                    if let Some(token) = (processor.spec.classify)(map, pos, &ctx) {
                        let interned = cache.intern(token.as_str());
                        // The z key is the distance from the start
                        // plane, keeping near-to-far order for both
                        // sweep directions.
                        processor.volume.insert(
                            (z - start.z).abs(),
                            y - start.y,
                            x - start.x,
                            interned,
                        );
                    }
                }
            }
        }
        z += z_step;
    }
    processors
}

/// Serialize one phase's volume to its resolved file, opening the
/// stream on first use and appending when a phase shares a filename
/// with an earlier one.
fn write_blueprint(
    output_files: &mut BTreeMap<PathBuf, BufWriter<File>>,
    opts: &BlueprintOptions,
    names: &dyn FilenamePolicy,
    processor: &PhaseProcessor,
) -> Result<()> {
    let phase = processor.spec.phase;
    let path = names.filename(opts, phase)?;

    let stream = match output_files.entry(path) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            if let Some(parent) = entry.key().parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|source| ExportError::OutputDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            let file = File::create(entry.key())?;
            entry.insert(BufWriter::new(file))
        }
    };

    writeln!(stream, "{}", modeline(phase))?;
    match opts.format {
        OutputFormat::Pretty => write_pretty(stream, opts, &processor.volume)?,
        OutputFormat::Minimal => write_minimal(stream, opts, &processor.volume)?,
    }
    tracing::info!(%phase, "wrote blueprint section");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Building, BuildingKind, WorkshopKind};
    use crate::types::{MapExtents, TileShape};

    /// A tiny fixed map: all floors, optional cursor, optional one
    /// building, and a counter for building lookups.
    struct TestMap {
        extents: MapExtents,
        cursor: Option<MapCoord>,
        building: Option<Building>,
        lookups: std::cell::Cell<usize>,
    }

    impl TestMap {
        fn floors(x: i32, y: i32, z: i32) -> Self {
            Self {
                extents: MapExtents { x_count: x, y_count: y, z_count: z },
                cursor: None,
                building: None,
                lookups: std::cell::Cell::new(0),
            }
        }
    }

    impl MapSource for TestMap {
        fn tile_shape(&self, pos: MapCoord) -> TileShape {
            if self.extents.contains(pos) { TileShape::Floor } else { TileShape::Void }
        }

        fn building_at(&self, pos: MapCoord) -> Option<&Building> {
            self.lookups.set(self.lookups.get() + 1);
            self.building.as_ref().filter(|b| b.contains(pos))
        }

        fn extents(&self) -> MapExtents {
            self.extents
        }

        fn cursor(&self) -> Option<MapCoord> {
            self.cursor
        }
    }

    fn dig_opts(start: MapCoord, width: i32, height: i32, depth: i32) -> BlueprintOptions {
        BlueprintOptions {
            start: Some(start),
            width,
            height,
            depth,
            dig: true,
            ..BlueprintOptions::default()
        }
    }

    struct FailingPolicy;
    impl FilenamePolicy for FailingPolicy {
        fn filename(&self, _opts: &BlueprintOptions, _phase: Phase) -> Result<PathBuf> {
            Err(ExportError::Filename("host refused".to_string()))
        }
    }

    #[test]
    fn no_phases_is_a_configuration_error() {
        let map = TestMap::floors(4, 4, 4);
        let opts = BlueprintOptions {
            start: Some(MapCoord::new(0, 0, 0)),
            ..BlueprintOptions::default()
        };
        let err = generate_blueprints(&map, &opts, &DefaultNamePolicy::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoPhaseRequested));
    }

    #[test]
    fn missing_cursor_is_a_configuration_error() {
        let map = TestMap::floors(4, 4, 4);
        let mut opts = dig_opts(MapCoord::new(0, 0, 0), 1, 1, 1);
        opts.start = None;
        let err = generate_blueprints(&map, &opts, &DefaultNamePolicy::default()).unwrap_err();
        assert!(matches!(err, ExportError::MissingCursor));
    }

    #[test]
    fn cursor_supplies_the_start_corner() {
        let mut map = TestMap::floors(4, 4, 4);
        map.cursor = Some(MapCoord::new(1, 1, 1));
        let mut opts = dig_opts(MapCoord::new(0, 0, 0), 2, 2, 1);
        opts.start = None;
        // The sweep itself is checked through the volume below; here it
        // is enough that the cursor path validates.
        let specs = phase_specs(&opts);
        let end = clamp_end(&map, &opts, map.cursor.unwrap());
        let processors = sweep(&map, &opts, map.cursor.unwrap(), end, specs);
        assert!(!processors[0].volume.is_empty());
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(9, 0, 0), 1, 1, 1);
        let err = generate_blueprints(&map, &opts, &DefaultNamePolicy::default()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidStart(pos) if pos.x == 9));
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(0, 0, 0), 1, 1, 0);
        let err = generate_blueprints(&map, &opts, &DefaultNamePolicy::default()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidDimensions { depth: 0, .. }));
    }

    #[test]
    fn filename_failure_aborts() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(0, 0, 0), 1, 1, 1);
        let err = generate_blueprints(&map, &opts, &FailingPolicy).unwrap_err();
        assert!(matches!(err, ExportError::Filename(_)));
    }

    #[test]
    fn region_is_cropped_to_map_extents() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(2, 2, 0), 100, 100, 100);
        let end = clamp_end(&map, &opts, MapCoord::new(2, 2, 0));
        assert_eq!(end, MapCoord::new(4, 4, 4));
    }

    #[test]
    fn downward_sweep_stops_below_the_map() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(0, 0, 1), 1, 1, -30);
        let end = clamp_end(&map, &opts, MapCoord::new(0, 0, 1));
        assert_eq!(end.z, -1);
    }

    #[test]
    fn volume_keys_are_relative_to_start() {
        let map = TestMap::floors(8, 8, 8);
        let opts = dig_opts(MapCoord::new(5, 6, 2), 2, 1, 1);
        let specs = phase_specs(&opts);
        let end = clamp_end(&map, &opts, MapCoord::new(5, 6, 2));
        let processors = sweep(&map, &opts, MapCoord::new(5, 6, 2), end, specs);

        let volume = &processors[0].volume;
        let row = &volume.layer(0).unwrap()[&0];
        let xs: Vec<i32> = row.keys().copied().collect();
        assert_eq!(xs, vec![0, 1]);
    }

    #[test]
    fn descending_sweep_keys_stay_near_to_far() {
        let map = TestMap::floors(4, 4, 4);
        let opts = dig_opts(MapCoord::new(0, 0, 3), 1, 1, -2);
        let specs = phase_specs(&opts);
        let end = clamp_end(&map, &opts, MapCoord::new(0, 0, 3));
        assert_eq!(end.z, 1);
        let processors = sweep(&map, &opts, MapCoord::new(0, 0, 3), end, specs);

        // Layers z=3 (first processed) and z=2 land at relative 0 and 1.
        let zs: Vec<i32> = processors[0].volume.layers().map(|(&z, _)| z).collect();
        assert_eq!(zs, vec![0, 1]);
    }

    #[test]
    fn building_lookup_is_shared_across_phases() {
        let mut map = TestMap::floors(4, 4, 4);
        map.building = Some(Building {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 0,
            z: 0,
            is_room: true,
            kind: BuildingKind::Workshop { kind: WorkshopKind::Masons },
        });
        let opts = BlueprintOptions {
            start: Some(MapCoord::new(0, 0, 0)),
            width: 1,
            height: 1,
            depth: 1,
            build: true,
            place: true,
            query: true,
            ..BlueprintOptions::default()
        };
        let specs = phase_specs(&opts);
        let end = clamp_end(&map, &opts, MapCoord::new(0, 0, 0));
        let processors = sweep(&map, &opts, MapCoord::new(0, 0, 0), end, specs);

        // Three phases asked for the building, one lookup happened.
        assert_eq!(map.lookups.get(), 1);
        // Build and query both produced output for the single tile.
        assert!(!processors[0].volume.is_empty());
        assert!(!processors[2].volume.is_empty());
    }

    #[test]
    fn default_policy_splits_or_combines() {
        let opts = BlueprintOptions { name: "keep".to_string(), ..BlueprintOptions::default() };
        let policy = DefaultNamePolicy::new("out");
        assert_eq!(
            policy.filename(&opts, Phase::Dig).unwrap(),
            PathBuf::from("out/keep-dig.csv")
        );

        let combined = BlueprintOptions {
            name: "keep".to_string(),
            split_strategy: SplitStrategy::Combined,
            ..BlueprintOptions::default()
        };
        assert_eq!(
            policy.filename(&combined, Phase::Dig).unwrap(),
            policy.filename(&combined, Phase::Build).unwrap()
        );
    }

    #[test]
    fn empty_name_fails_resolution() {
        let opts = BlueprintOptions { name: String::new(), ..BlueprintOptions::default() };
        let err = DefaultNamePolicy::default().filename(&opts, Phase::Dig).unwrap_err();
        assert!(matches!(err, ExportError::Filename(_)));
    }
}
