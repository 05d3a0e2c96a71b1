// Stockpile placement and room query classification.
//
// The place phase records stockpiles: the north-west corner of the pile
// carries a one-character material-category token with the `(WxH)`
// expansion suffix; other occupied tiles carry the non-anchor marker in
// pretty mode and nothing in minimal mode. Only single-category piles
// are supported — a pile with several category bits set produces no
// output, a known gap carried over from the replay grammar rather than
// guessed at.
//
// The query phase is a single rule: any building flagged as a room gets
// the mark-as-room token at every occupied tile.

use crate::build::with_expansion;
use crate::map::{BuildingKind, StockpileCategories};
use crate::phase::{TileContext, Token, placeholder};
use crate::types::MapCoord;

/// The place-phase token for the tile at `pos`, or `None` when the tile
/// carries no stockpile output.
pub fn place_token(pos: MapCoord, ctx: &TileContext<'_>) -> Option<Token> {
    let b = ctx.building?;
    let BuildingKind::Stockpile { categories } = b.kind else {
        return None;
    };

    if pos.x != b.x1 || pos.y != b.y1 {
        return placeholder(ctx);
    }

    stockpile_key(categories).map(|key| with_expansion(b, key))
}

/// The one-character token for a single-category stockpile, or `None`
/// for zero or multiple set category bits.
fn stockpile_key(categories: StockpileCategories) -> Option<&'static str> {
    match categories.0 {
        StockpileCategories::ANIMALS => Some("a"),
        StockpileCategories::FOOD => Some("f"),
        StockpileCategories::FURNITURE => Some("u"),
        StockpileCategories::CORPSES => Some("y"),
        StockpileCategories::REFUSE => Some("r"),
        StockpileCategories::WOOD => Some("w"),
        StockpileCategories::STONE => Some("s"),
        StockpileCategories::GEMS => Some("e"),
        StockpileCategories::BARS_BLOCKS => Some("b"),
        StockpileCategories::CLOTH => Some("h"),
        StockpileCategories::LEATHER => Some("l"),
        StockpileCategories::AMMO => Some("z"),
        StockpileCategories::COINS => Some("n"),
        StockpileCategories::FINISHED_GOODS => Some("g"),
        StockpileCategories::WEAPONS => Some("p"),
        StockpileCategories::ARMOR => Some("d"),
        // TODO: encode piles accepting several categories once the
        // replay grammar grows a syntax for them.
        _ => None,
    }
}

/// The query-phase token: mark-as-room for room-flagged buildings.
pub fn query_token(ctx: &TileContext<'_>) -> Option<Token> {
    let b = ctx.building?;
    if b.is_room { Some(Token::Fixed("r+")) } else { None }
}
