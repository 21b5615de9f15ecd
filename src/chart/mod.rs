use std::f32::consts::TAU;
use std::path::Path;

use tiny_skia::{Color, FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, Transform};

use crate::error::{Error, Result};

/// Fixed 6-color sector palette, cycled by option index.
pub const PALETTE: [[u8; 3]; 6] = [
    [0x25, 0x63, 0xeb],
    [0x10, 0xb9, 0x81],
    [0xf5, 0x9e, 0x0b],
    [0xef, 0x44, 0x44],
    [0x8b, 0x5c, 0xf6],
    [0xec, 0x48, 0x99],
];

/// Neutral disc shown when no votes were cast.
pub const EMPTY_DISC: [u8; 3] = [0xe2, 0xe8, 0xf0];

pub const CHART_SIZE: u32 = 200;
const OUTER_RADIUS: f32 = 70.0;
const HOLE_RADIUS: f32 = 45.0;

// Arc segment granularity, in radians.
const ARC_STEP: f32 = 0.02;

/// Paint a donut chart of `counts` onto the pixmap, centered.
///
/// Zero total paints a flat neutral disc with no hole. Otherwise sectors run
/// clockwise from angle 0, proportional to each count's share, and `hole` is
/// the card background color filling the center.
pub fn draw_donut(pixmap: &mut Pixmap, counts: &[u64], hole: [u8; 3]) {
    let cx = pixmap.width() as f32 / 2.0;
    let cy = pixmap.height() as f32 / 2.0;
    let total: u64 = counts.iter().sum();

    if total == 0 {
        if let Some(disc) = circle_path(cx, cy, OUTER_RADIUS) {
            fill(pixmap, &disc, EMPTY_DISC);
        }
        return;
    }

    let mut start = 0.0_f32;
    for (index, count) in counts.iter().enumerate() {
        let sweep = (*count as f32 / total as f32) * TAU;
        if sweep > 0.0 {
            if let Some(sector) = sector_path(cx, cy, OUTER_RADIUS, start, sweep) {
                fill(pixmap, &sector, PALETTE[index % PALETTE.len()]);
            }
        }
        start += sweep;
    }

    if let Some(disc) = circle_path(cx, cy, HOLE_RADIUS) {
        fill(pixmap, &disc, hole);
    }
}

/// Render a `CHART_SIZE`-square donut chart and write it as PNG.
pub fn render_donut_png(path: &Path, counts: &[u64], hole: [u8; 3]) -> Result<()> {
    let mut pixmap = Pixmap::new(CHART_SIZE, CHART_SIZE)
        .ok_or_else(|| Error::Chart("could not allocate pixmap".to_string()))?;
    draw_donut(&mut pixmap, counts, hole);

    let png = pixmap
        .encode_png()
        .map_err(|err| Error::Chart(err.to_string()))?;
    std::fs::write(path, png)?;
    Ok(())
}

fn circle_path(cx: f32, cy: f32, radius: f32) -> Option<SkPath> {
    let mut pb = PathBuilder::new();
    pb.push_circle(cx, cy, radius);
    pb.finish()
}

// Pixmap y grows downward, so increasing angles sweep clockwise on screen.
fn sector_path(cx: f32, cy: f32, radius: f32, start: f32, sweep: f32) -> Option<SkPath> {
    let steps = (sweep / ARC_STEP).ceil().max(1.0) as u32;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for i in 0..=steps {
        let angle = start + sweep * (i as f32 / steps as f32);
        pb.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
    }
    pb.close();
    pb.finish()
}

fn fill(pixmap: &mut Pixmap, path: &SkPath, rgb: [u8; 3]) {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
    paint.anti_alias = true;
    pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
}
