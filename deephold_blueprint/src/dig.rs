// Tile shape classification for the dig phase.
//
// A pure, total function from `TileShape` to the one-character dig
// command that would reproduce the tile. Wall and void tiles produce no
// output — there is nothing to dig to get a wall.

use crate::types::TileShape;

/// The dig command for a tile shape, or `None` for shapes that need no
/// digging (wall, void).
pub fn dig_token(shape: TileShape) -> Option<&'static str> {
    match shape {
        // Channeling from above produces open space; a ramp top is the
        // open space over a ramp, so it replays the same way.
        TileShape::Empty | TileShape::RampTop => Some("h"),
        TileShape::Floor | TileShape::Boulder | TileShape::Pebbles | TileShape::BrookTop => {
            Some("d")
        }
        TileShape::Fortification => Some("F"),
        TileShape::StairUp => Some("u"),
        TileShape::StairDown => Some("j"),
        TileShape::StairUpDown => Some("i"),
        TileShape::Ramp => Some("r"),
        TileShape::Wall | TileShape::Void => None,
    }
}
