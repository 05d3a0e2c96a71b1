// Rendering accumulated volumes into blueprint text.
//
// Two encodings over the same sparse volume:
//
// - Minimal: one line per occupied row, comma padding per skipped x
//   index, blank lines for skipped y rows, layer-marker lines for
//   skipped z layers. Never pads past the last populated cell; an
//   entirely empty volume produces no body at all.
// - Pretty: the full declared width x height grid for every layer of
//   the requested depth, a space glyph for unoccupied cells and a `#`
//   terminating each row, so the file lines up 1:1 with the region even
//   when almost nothing is in it.
//
// Both are preceded (by `export.rs`) with a one-line modeline built
// from the phase name. The layer transition marker points up (`#<`) for
// ascending sweeps and down (`#>`) for descending ones, from the sign
// of the requested depth.

use crate::options::BlueprintOptions;
use crate::phase::Phase;
use crate::volume::SparseVolume;
use std::io::{self, Write};

/// The modeline identifying a phase's section of a blueprint file.
pub fn modeline(phase: Phase) -> String {
    format!("#{phase} label({phase})")
}

/// The layer transition marker for a sweep of the given signed depth.
fn layer_marker(depth: i32) -> &'static str {
    if depth > 0 { "#<" } else { "#>" }
}

/// Render a volume in the minimal encoding.
pub fn write_minimal<W: Write>(
    out: &mut W,
    opts: &BlueprintOptions,
    volume: &SparseVolume,
) -> io::Result<()> {
    if volume.is_empty() {
        return Ok(());
    }

    let marker = layer_marker(opts.depth);

    let mut z_prev = 0;
    for (&z, area) in volume.layers() {
        while z_prev < z {
            writeln!(out, "{marker}")?;
            z_prev += 1;
        }
        let mut y_prev = 0;
        for (&y, row) in area {
            while y_prev < y {
                writeln!(out)?;
                y_prev += 1;
            }
            let mut x_prev = 0;
            for (&x, token) in row {
                while x_prev < x {
                    write!(out, ",")?;
                    x_prev += 1;
                }
                write!(out, "{token}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render a volume in the pretty encoding.
pub fn write_pretty<W: Write>(
    out: &mut W,
    opts: &BlueprintOptions,
    volume: &SparseVolume,
) -> io::Result<()> {
    let marker = layer_marker(opts.depth);
    let layer_count = opts.depth.abs();

    for z in 0..layer_count {
        let area = volume.layer(z);
        for y in 0..opts.height {
            let row = area.and_then(|a| a.get(&y));
            for x in 0..opts.width {
                let token = row.and_then(|r| r.get(&x));
                match token {
                    Some(t) => write!(out, "{t},")?,
                    None => write!(out, " ,")?,
                }
            }
            writeln!(out, "#")?;
        }
        if z < layer_count - 1 {
            writeln!(out, "{marker}")?;
        }
    }
    Ok(())
}
