// Resolved parameters of one blueprint export invocation.
//
// Constructed once by the front-end (CLI flags, host scripting, tests),
// then read-only for the rest of the invocation. Serde-derived so the
// whole invocation can round-trip through JSON, matching how the rest
// of the project treats configuration.

use crate::types::MapCoord;
use serde::{Deserialize, Serialize};

/// Output text encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Full-grid output: every declared cell rendered, blank glyph for
    /// unoccupied tiles. Humanly alignable.
    #[default]
    Pretty,
    /// Sparse output: only populated cells, separator padding for gaps,
    /// nothing past the last populated cell.
    Minimal,
}

/// How phases map onto output files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// One file per phase: `<name>-<phase>`.
    #[default]
    SinglePhase,
    /// All phases appended to one `<name>` file in phase order.
    Combined,
}

/// The resolved parameters of one export invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlueprintOptions {
    /// Start corner of the region. `None` means "use the map cursor".
    pub start: Option<MapCoord>,
    pub format: OutputFormat,
    pub split_strategy: SplitStrategy,
    /// Region width in tiles; must be positive.
    pub width: i32,
    /// Region height in tiles; must be positive.
    pub height: i32,
    /// Region depth in layers; non-zero, negative to sweep downward.
    pub depth: i32,
    /// Base name for generated files.
    pub name: String,
    /// Run every phase regardless of the individual flags.
    pub auto_phase: bool,
    pub dig: bool,
    pub build: bool,
    pub place: bool,
    pub query: bool,
}

impl Default for BlueprintOptions {
    fn default() -> Self {
        Self {
            start: None,
            format: OutputFormat::default(),
            split_strategy: SplitStrategy::default(),
            width: 1,
            height: 1,
            depth: 1,
            name: "blueprint".to_string(),
            auto_phase: false,
            dig: false,
            build: false,
            place: false,
            query: false,
        }
    }
}

impl BlueprintOptions {
    /// Whether the dimensions describe a non-empty region. The
    /// front-end validates before handing options over; the core still
    /// checks and reports rather than sweeping a degenerate box.
    pub fn dimensions_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.depth != 0
    }
}
