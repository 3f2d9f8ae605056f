//! Stroked vector glyphs for titles and labels.
//!
//! Characters are drawn as polylines on a unit box (x right, y down) and
//! stroked with tiny-skia. No font files are involved, so output is identical
//! on every machine. Lowercase letters are drawn as capitals; characters
//! without a glyph advance the cursor and draw nothing.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::gradient::Color;

/// Glyph box width relative to glyph height
const CHAR_WIDTH: f32 = 0.6;
/// Gap between glyph boxes relative to glyph height
const CHAR_SPACING: f32 = 0.2;
/// Stroke width relative to glyph height
const STROKE_WIDTH: f32 = 0.11;

type Polyline = &'static [(f32, f32)];

const RING: Polyline = &[
    (0.2, 0.0),
    (0.8, 0.0),
    (1.0, 0.2),
    (1.0, 0.8),
    (0.8, 1.0),
    (0.2, 1.0),
    (0.0, 0.8),
    (0.0, 0.2),
    (0.2, 0.0),
];

const P_BOWL: Polyline = &[(0.0, 1.0), (0.0, 0.0), (0.8, 0.0), (1.0, 0.15), (1.0, 0.4), (0.8, 0.55), (0.0, 0.55)];

fn strokes(ch: char) -> &'static [Polyline] {
    match ch.to_ascii_uppercase() {
        'A' => &[&[(0.0, 1.0), (0.5, 0.0), (1.0, 1.0)], &[(0.2, 0.6), (0.8, 0.6)]],
        'B' => &[
            &[(0.0, 0.5), (0.0, 1.0), (0.75, 1.0), (1.0, 0.85), (1.0, 0.65), (0.75, 0.5), (0.0, 0.5)],
            &[(0.0, 0.5), (0.0, 0.0), (0.7, 0.0), (0.95, 0.12), (0.95, 0.38), (0.7, 0.5)],
        ],
        'C' => &[&[(1.0, 0.1), (0.8, 0.0), (0.2, 0.0), (0.0, 0.2), (0.0, 0.8), (0.2, 1.0), (0.8, 1.0), (1.0, 0.9)]],
        'D' => &[&[(0.0, 0.0), (0.0, 1.0), (0.6, 1.0), (1.0, 0.7), (1.0, 0.3), (0.6, 0.0), (0.0, 0.0)]],
        'E' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0)], &[(0.0, 0.5), (0.7, 0.5)]],
        'F' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0)], &[(0.0, 0.5), (0.7, 0.5)]],
        'G' => &[&[
            (1.0, 0.1),
            (0.8, 0.0),
            (0.2, 0.0),
            (0.0, 0.2),
            (0.0, 0.8),
            (0.2, 1.0),
            (0.8, 1.0),
            (1.0, 0.8),
            (1.0, 0.55),
            (0.55, 0.55),
        ]],
        'H' => &[&[(0.0, 0.0), (0.0, 1.0)], &[(1.0, 0.0), (1.0, 1.0)], &[(0.0, 0.5), (1.0, 0.5)]],
        'I' => &[&[(0.5, 0.0), (0.5, 1.0)], &[(0.2, 0.0), (0.8, 0.0)], &[(0.2, 1.0), (0.8, 1.0)]],
        'J' => &[&[(1.0, 0.0), (1.0, 0.8), (0.8, 1.0), (0.2, 1.0), (0.0, 0.8)]],
        'K' => &[&[(0.0, 0.0), (0.0, 1.0)], &[(1.0, 0.0), (0.0, 0.6)], &[(0.3, 0.4), (1.0, 1.0)]],
        'L' => &[&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]],
        'M' => &[&[(0.0, 1.0), (0.0, 0.0), (0.5, 0.55), (1.0, 0.0), (1.0, 1.0)]],
        'N' => &[&[(0.0, 1.0), (0.0, 0.0), (1.0, 1.0), (1.0, 0.0)]],
        'O' => &[RING],
        'P' => &[P_BOWL],
        'Q' => &[RING, &[(0.6, 0.7), (1.0, 1.0)]],
        'R' => &[P_BOWL, &[(0.45, 0.55), (1.0, 1.0)]],
        'S' => &[&[
            (1.0, 0.1),
            (0.8, 0.0),
            (0.2, 0.0),
            (0.0, 0.15),
            (0.0, 0.4),
            (0.2, 0.5),
            (0.8, 0.5),
            (1.0, 0.6),
            (1.0, 0.85),
            (0.8, 1.0),
            (0.2, 1.0),
            (0.0, 0.9),
        ]],
        'T' => &[&[(0.0, 0.0), (1.0, 0.0)], &[(0.5, 0.0), (0.5, 1.0)]],
        'U' => &[&[(0.0, 0.0), (0.0, 0.8), (0.2, 1.0), (0.8, 1.0), (1.0, 0.8), (1.0, 0.0)]],
        'V' => &[&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]],
        'W' => &[&[(0.0, 0.0), (0.25, 1.0), (0.5, 0.45), (0.75, 1.0), (1.0, 0.0)]],
        'X' => &[&[(0.0, 0.0), (1.0, 1.0)], &[(1.0, 0.0), (0.0, 1.0)]],
        'Y' => &[&[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)], &[(0.5, 0.5), (0.5, 1.0)]],
        'Z' => &[&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]],
        '0' => &[RING, &[(0.85, 0.15), (0.15, 0.85)]],
        '1' => &[&[(0.25, 0.2), (0.55, 0.0), (0.55, 1.0)], &[(0.25, 1.0), (0.85, 1.0)]],
        '2' => &[&[(0.0, 0.2), (0.2, 0.0), (0.8, 0.0), (1.0, 0.2), (1.0, 0.4), (0.0, 1.0), (1.0, 1.0)]],
        '3' => &[
            &[(0.0, 0.1), (0.2, 0.0), (0.8, 0.0), (1.0, 0.15), (1.0, 0.35), (0.8, 0.5), (0.35, 0.5)],
            &[(0.8, 0.5), (1.0, 0.65), (1.0, 0.85), (0.8, 1.0), (0.2, 1.0), (0.0, 0.9)],
        ],
        '4' => &[&[(0.75, 1.0), (0.75, 0.0), (0.0, 0.7), (1.0, 0.7)]],
        '5' => &[&[
            (1.0, 0.0),
            (0.0, 0.0),
            (0.0, 0.45),
            (0.75, 0.45),
            (1.0, 0.6),
            (1.0, 0.85),
            (0.8, 1.0),
            (0.2, 1.0),
            (0.0, 0.9),
        ]],
        '6' => &[&[
            (0.9, 0.0),
            (0.3, 0.0),
            (0.0, 0.3),
            (0.0, 0.8),
            (0.2, 1.0),
            (0.8, 1.0),
            (1.0, 0.8),
            (1.0, 0.6),
            (0.8, 0.45),
            (0.0, 0.45),
        ]],
        '7' => &[&[(0.0, 0.0), (1.0, 0.0), (0.35, 1.0)]],
        '8' => &[
            &[(0.2, 0.0), (0.8, 0.0), (1.0, 0.15), (1.0, 0.35), (0.8, 0.5), (0.2, 0.5), (0.0, 0.35), (0.0, 0.15), (0.2, 0.0)],
            &[(0.2, 0.5), (0.0, 0.65), (0.0, 0.85), (0.2, 1.0), (0.8, 1.0), (1.0, 0.85), (1.0, 0.65), (0.8, 0.5)],
        ],
        '9' => &[&[
            (0.1, 1.0),
            (0.7, 1.0),
            (1.0, 0.7),
            (1.0, 0.2),
            (0.8, 0.0),
            (0.2, 0.0),
            (0.0, 0.2),
            (0.0, 0.4),
            (0.2, 0.55),
            (1.0, 0.55),
        ]],
        '-' => &[&[(0.15, 0.5), (0.85, 0.5)]],
        '+' => &[&[(0.15, 0.5), (0.85, 0.5)], &[(0.5, 0.2), (0.5, 0.8)]],
        '.' => &[&[(0.45, 0.95), (0.55, 0.95)]],
        ',' => &[&[(0.55, 0.85), (0.45, 1.0)]],
        ':' => &[&[(0.45, 0.25), (0.55, 0.25)], &[(0.45, 0.8), (0.55, 0.8)]],
        '/' => &[&[(1.0, 0.0), (0.0, 1.0)]],
        '_' => &[&[(0.0, 1.0), (1.0, 1.0)]],
        '(' => &[&[(0.7, 0.0), (0.4, 0.25), (0.4, 0.75), (0.7, 1.0)]],
        ')' => &[&[(0.3, 0.0), (0.6, 0.25), (0.6, 0.75), (0.3, 1.0)]],
        '%' => &[
            &[(1.0, 0.0), (0.0, 1.0)],
            &[(0.1, 0.05), (0.3, 0.05), (0.3, 0.25), (0.1, 0.25), (0.1, 0.05)],
            &[(0.7, 0.75), (0.9, 0.75), (0.9, 0.95), (0.7, 0.95), (0.7, 0.75)],
        ],
        _ => &[],
    }
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Width in pixels of `text` drawn at glyph height `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    n as f32 * size * (CHAR_WIDTH + CHAR_SPACING) - size * CHAR_SPACING
}

/// Draw `text` with its vertical center on `y`.
pub fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    anchor: Anchor,
    color: Color,
) {
    let width = text_width(text, size);
    let start_x = match anchor {
        Anchor::Start => x,
        Anchor::Middle => x - width / 2.0,
        Anchor::End => x - width,
    };
    let top = y - size / 2.0;
    let glyph_w = size * CHAR_WIDTH;
    let advance = size * (CHAR_WIDTH + CHAR_SPACING);

    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let origin_x = start_x + i as f32 * advance;
        for line in strokes(ch) {
            let mut points = line.iter().map(|&(u, v)| (origin_x + u * glyph_w, top + v * size));
            if let Some((x0, y0)) = points.next() {
                pb.move_to(x0, y0);
                for (px, py) in points {
                    pb.line_to(px, py);
                }
            }
        }
    }

    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: (size * STROKE_WIDTH).max(1.0),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
