// Building classification for the build phase.
//
// Maps a building's category and sub-variant to the command token that
// would construct it, one exhaustive `match` over `BuildingKind` plus a
// fixed table per parameterized category. The intricacy is all in the
// multi-tile rules:
//
// - Anchored categories emit their real token at exactly one tile of
//   the footprint (north-west corner, center, or south-east corner,
//   depending on category) and the non-anchor marker everywhere else.
// - Footprint-communicating categories (farm plots, roads, bridges,
//   horizontal axles, rollers) append the `(WxH)` expansion suffix at
//   their anchor.
// - Track stops assemble their token incrementally from the dump
//   configuration and a cumulative friction table.
//
// Every classifier is total: unknown or unsupported sub-variants
// degrade to the `~` placeholder, never an error.

use crate::map::{
    BridgeDirection, Building, BuildingKind, Compass, ConstructionKind, FurnaceKind,
    PumpDirection, SiegeEngineKind, TrapKind, WorkshopKind,
};
use crate::phase::{TileContext, Token, placeholder};
use crate::types::MapCoord;

/// Token for a building category or sub-variant the replay grammar has
/// no command for.
pub const UNSUPPORTED: &str = "~";

/// Cumulative friction-to-repetition thresholds for track stops. Each
/// satisfied threshold appends one more `a`; the lowest friction value
/// therefore carries the most repetitions.
const FRICTION_RAMP: [u32; 4] = [10_000, 500, 50, 10];

/// The build-phase token for the tile at `pos`, or `None` when the tile
/// carries no building output (no building, a stockpile, or a
/// non-anchor tile in minimal mode).
pub fn build_token(pos: MapCoord, ctx: &TileContext<'_>) -> Option<Token> {
    let b = ctx.building?;
    // Stockpiles belong to the place phase.
    if let BuildingKind::Stockpile { .. } = b.kind {
        return None;
    }

    let at_nw = pos.x == b.x1 && pos.y == b.y1;
    let at_se = pos.x == b.x2 && pos.y == b.y2;
    let (cx, cy) = b.center();
    let at_center = pos.x == cx && pos.y == cy;

    match b.kind {
        BuildingKind::Armorstand => fixed("a"),
        BuildingKind::Bed => fixed("b"),
        BuildingKind::Chair => fixed("c"),
        BuildingKind::Door => fixed("d"),
        BuildingKind::Floodgate => fixed("x"),
        BuildingKind::Cabinet => fixed("f"),
        BuildingKind::Box => fixed("h"),
        BuildingKind::Weaponrack => fixed("r"),
        BuildingKind::Statue => fixed("s"),
        BuildingKind::Table => fixed("t"),
        BuildingKind::Well => fixed("l"),
        BuildingKind::GlassWindow => fixed("y"),
        BuildingKind::GemWindow => fixed("Y"),
        BuildingKind::AnimalTrap => fixed("m"),
        BuildingKind::Chain => fixed("v"),
        BuildingKind::Cage => fixed("j"),
        BuildingKind::GearAssembly => fixed("Mg"),
        BuildingKind::VerticalAxle => fixed("Mv"),
        BuildingKind::Support => fixed("S"),
        BuildingKind::ArcheryTarget => fixed("A"),
        BuildingKind::TractionBench => fixed("R"),
        BuildingKind::Hatch => fixed("H"),
        BuildingKind::NestBox => fixed("N"),
        BuildingKind::WallGrate => fixed("W"),
        BuildingKind::FloorGrate => fixed("G"),
        BuildingKind::VerticalBars => fixed("B"),

        BuildingKind::FarmPlot => anchored_sized(ctx, b, at_nw, "p"),
        BuildingKind::PavedRoad => anchored_sized(ctx, b, at_nw, "o"),
        BuildingKind::DirtRoad => anchored_sized(ctx, b, at_nw, "O"),
        BuildingKind::Bridge { direction } => {
            anchored_sized(ctx, b, at_nw, bridge_token(direction))
        }
        BuildingKind::HorizontalAxle { is_vertical } => {
            anchored_sized(ctx, b, at_nw, if is_vertical { "Mhs" } else { "Mh" })
        }
        BuildingKind::Rollers { direction } => {
            anchored_sized(ctx, b, at_nw, roller_token(direction))
        }

        BuildingKind::SiegeEngine { kind } => anchored(ctx, at_center, siege_token(kind)),
        BuildingKind::Workshop { kind } => anchored(ctx, at_center, workshop_token(kind)),
        BuildingKind::Furnace { kind } => anchored(ctx, at_center, furnace_token(kind)),
        BuildingKind::Shop => anchored(ctx, at_center, "z"),
        BuildingKind::TradeDepot => anchored(ctx, at_center, "D"),
        BuildingKind::WaterWheel { is_vertical } => {
            anchored(ctx, at_center, if is_vertical { "Mw" } else { "Mws" })
        }
        BuildingKind::Windmill => anchored(ctx, at_center, "Mm"),

        BuildingKind::ScrewPump { direction } => anchored(ctx, at_se, screw_pump_token(direction)),

        // Constructions are recorded per tile; no anchor resolution.
        BuildingKind::Construction { kind } => fixed(construction_token(kind)),
        BuildingKind::Trap { kind } => Some(trap_token(kind)),

        // No replay command exists for these.
        BuildingKind::Slab | BuildingKind::Hive | BuildingKind::FloorBars | BuildingKind::Other => {
            fixed(UNSUPPORTED)
        }

        // Filtered above; kept so the match stays exhaustive if the
        // guard ever moves.
        BuildingKind::Stockpile { .. } => None,
    }
}

fn fixed(token: &'static str) -> Option<Token> {
    Some(Token::Fixed(token))
}

/// Real token at the anchor tile, non-anchor marker elsewhere.
fn anchored(ctx: &TileContext<'_>, at_anchor: bool, token: &'static str) -> Option<Token> {
    if at_anchor { fixed(token) } else { placeholder(ctx) }
}

/// Real token plus `(WxH)` expansion suffix at the anchor tile,
/// non-anchor marker elsewhere.
fn anchored_sized(
    ctx: &TileContext<'_>,
    b: &Building,
    at_anchor: bool,
    token: &'static str,
) -> Option<Token> {
    if at_anchor { Some(with_expansion(b, token)) } else { placeholder(ctx) }
}

/// Append the footprint expansion suffix to a token.
pub(crate) fn with_expansion(b: &Building, token: &str) -> Token {
    Token::Dynamic(format!("{token}({}x{})", b.width(), b.height()))
}

fn bridge_token(direction: BridgeDirection) -> &'static str {
    match direction {
        BridgeDirection::Raising => "g",
        BridgeDirection::Retracting => "gs",
        BridgeDirection::Left => "ga",
        BridgeDirection::Right => "gd",
        BridgeDirection::Up => "gw",
        BridgeDirection::Down => "gx",
    }
}

fn siege_token(kind: SiegeEngineKind) -> &'static str {
    match kind {
        SiegeEngineKind::Catapult => "ic",
        SiegeEngineKind::Ballista => "ib",
    }
}

fn workshop_token(kind: WorkshopKind) -> &'static str {
    match kind {
        WorkshopKind::Leatherworks => "we",
        WorkshopKind::Quern => "wq",
        WorkshopKind::Millstone => "wM",
        WorkshopKind::Loom => "wo",
        WorkshopKind::Clothiers => "wk",
        WorkshopKind::Bowyers => "wb",
        WorkshopKind::Carpenters => "wc",
        WorkshopKind::MetalsmithsForge => "wf",
        WorkshopKind::MagmaForge => "wv",
        WorkshopKind::Jewelers => "wj",
        WorkshopKind::Masons => "wm",
        WorkshopKind::Butchers => "wu",
        WorkshopKind::Tanners => "wn",
        WorkshopKind::Craftsdwarfs => "wr",
        WorkshopKind::Siege => "ws",
        WorkshopKind::Mechanics => "wt",
        WorkshopKind::Still => "wl",
        WorkshopKind::Farmers => "ww",
        WorkshopKind::Kitchen => "wz",
        WorkshopKind::Fishery => "wh",
        WorkshopKind::Ashery => "wy",
        WorkshopKind::Dyers => "wd",
        WorkshopKind::Kennels => "k",
        // Custom layouts have no fixed replay command.
        WorkshopKind::Custom | WorkshopKind::Tool => UNSUPPORTED,
    }
}

fn furnace_token(kind: FurnaceKind) -> &'static str {
    match kind {
        FurnaceKind::WoodFurnace => "ew",
        FurnaceKind::Smelter => "es",
        FurnaceKind::GlassFurnace => "eg",
        FurnaceKind::Kiln => "ek",
        FurnaceKind::MagmaSmelter => "el",
        FurnaceKind::MagmaGlassFurnace => "ea",
        FurnaceKind::MagmaKiln => "en",
        FurnaceKind::Custom => UNSUPPORTED,
    }
}

fn screw_pump_token(direction: PumpDirection) -> &'static str {
    match direction {
        PumpDirection::FromNorth => "Msu",
        PumpDirection::FromEast => "Msk",
        PumpDirection::FromSouth => "Msm",
        PumpDirection::FromWest => "Msh",
    }
}

fn roller_token(direction: PumpDirection) -> &'static str {
    match direction {
        PumpDirection::FromNorth => "Mr",
        PumpDirection::FromEast => "Mrs",
        PumpDirection::FromSouth => "Mrss",
        PumpDirection::FromWest => "Mrsss",
    }
}

fn construction_token(kind: ConstructionKind) -> &'static str {
    match kind {
        ConstructionKind::Fortification => "CF",
        ConstructionKind::Wall => "CW",
        ConstructionKind::Floor => "Cf",
        ConstructionKind::UpStair => "Cu",
        ConstructionKind::DownStair => "Cj",
        ConstructionKind::UpDownStair => "Cx",
        ConstructionKind::Ramp => "Cr",
        ConstructionKind::Track(arms) => track_token(arms),
        ConstructionKind::TrackRamp(arms) => track_ramp_token(arms),
    }
}

fn track_token(arms: Compass) -> &'static str {
    match (arms.north, arms.south, arms.east, arms.west) {
        (true, false, false, false) => "trackN",
        (false, true, false, false) => "trackS",
        (false, false, true, false) => "trackE",
        (false, false, false, true) => "trackW",
        (true, true, false, false) => "trackNS",
        (true, false, true, false) => "trackNE",
        (true, false, false, true) => "trackNW",
        (false, true, true, false) => "trackSE",
        (false, true, false, true) => "trackSW",
        (false, false, true, true) => "trackEW",
        (true, true, true, false) => "trackNSE",
        (true, true, false, true) => "trackNSW",
        (true, false, true, true) => "trackNEW",
        (false, true, true, true) => "trackSEW",
        (true, true, true, true) => "trackNSEW",
        (false, false, false, false) => UNSUPPORTED,
    }
}

fn track_ramp_token(arms: Compass) -> &'static str {
    match (arms.north, arms.south, arms.east, arms.west) {
        (true, false, false, false) => "trackrampN",
        (false, true, false, false) => "trackrampS",
        (false, false, true, false) => "trackrampE",
        (false, false, false, true) => "trackrampW",
        (true, true, false, false) => "trackrampNS",
        (true, false, true, false) => "trackrampNE",
        (true, false, false, true) => "trackrampNW",
        (false, true, true, false) => "trackrampSE",
        (false, true, false, true) => "trackrampSW",
        (false, false, true, true) => "trackrampEW",
        (true, true, true, false) => "trackrampNSE",
        (true, true, false, true) => "trackrampNSW",
        (true, false, true, true) => "trackrampNEW",
        (false, true, true, true) => "trackrampSEW",
        (true, true, true, true) => "trackrampNSEW",
        (false, false, false, false) => UNSUPPORTED,
    }
}

fn trap_token(kind: TrapKind) -> Token {
    match kind {
        TrapKind::StoneFall => Token::Fixed("Ts"),
        TrapKind::Weapon => Token::Fixed("Tw"),
        TrapKind::Lever => Token::Fixed("Tl"),
        TrapKind::PressurePlate => Token::Fixed("Tp"),
        TrapKind::Cage => Token::Fixed("Tc"),
        TrapKind::TrackStop { use_dump, dump_x_shift, dump_y_shift, friction } => {
            let mut token = String::from("CS");
            if use_dump {
                if dump_x_shift == 0 {
                    // Dumping north or south: one keypress, a second
                    // one to face south.
                    token.push('d');
                    if dump_y_shift > 0 {
                        token.push('d');
                    }
                } else {
                    // Dumping east or west: three presses past the
                    // vertical directions, a fourth to face west.
                    token.push_str("ddd");
                    if dump_x_shift < 0 {
                        token.push('d');
                    }
                }
            }
            for threshold in FRICTION_RAMP {
                if friction <= threshold {
                    token.push('a');
                }
            }
            Token::Dynamic(token)
        }
    }
}
