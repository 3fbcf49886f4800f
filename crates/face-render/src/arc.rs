//! Progress-arc rasterization — a stroked, round-capped arc starting at the
//! top of the circle.
//!
//! `embedded-graphics` ships an `Arc` primitive, but its stroke has no cap
//! styles, so the indicator is scanned directly: a pixel is lit when it lies
//! in the stroke annulus within the swept angular range, or inside one of the
//! two end-cap discs.

use embedded_graphics::pixelcolor::Rgb888;

use crate::framebuffer::Framebuffer;

/// Angle at which every sweep starts: the top of the circle.
const START_DEG: f32 = -90.0;

/// Draw an arc of `sweep_deg` degrees (positive = clockwise, negative =
/// counter-clockwise, |360| = full ring) around `(cx, cy)`.
///
/// Degenerate inputs (zero radius, zero stroke, zero sweep) draw nothing.
pub fn draw_progress_arc(
    frame: &mut Framebuffer,
    cx: f32,
    cy: f32,
    radius: f32,
    stroke_width: f32,
    sweep_deg: f32,
    color: Rgb888,
) {
    if radius <= 0.0 || stroke_width <= 0.0 || sweep_deg == 0.0 {
        return;
    }

    let sweep = sweep_deg.clamp(-360.0, 360.0);
    let full_ring = sweep.abs() >= 360.0;
    let half = stroke_width / 2.0;
    let reach = radius + half;

    let x0 = ((cx - reach).floor().max(0.0)) as u32;
    let y0 = ((cy - reach).floor().max(0.0)) as u32;
    let x1 = ((cx + reach).ceil().min(frame.width() as f32)).max(0.0) as u32;
    let y1 = ((cy + reach).ceil().min(frame.height() as f32)).max(0.0) as u32;

    // End-cap centers sit on the stroke circle at the start and end angles.
    let start_rad = START_DEG.to_radians();
    let end_rad = (START_DEG + sweep).to_radians();
    let cap_start = (cx + radius * start_rad.cos(), cy + radius * start_rad.sin());
    let cap_end = (cx + radius * end_rad.cos(), cy + radius * end_rad.sin());

    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let dx = px - cx;
            let dy = py - cy;
            let dist = (dx * dx + dy * dy).sqrt();

            let in_band = (dist - radius).abs() <= half;
            let hit = if in_band {
                if full_ring {
                    true
                } else {
                    // Clockwise degrees from the top, 0..360.
                    let from_top = (dy.atan2(dx).to_degrees() - START_DEG).rem_euclid(360.0);
                    if sweep > 0.0 {
                        from_top <= sweep
                    } else {
                        (360.0 - from_top).rem_euclid(360.0) <= -sweep
                    }
                }
            } else {
                false
            };

            let in_cap = !full_ring
                && (dist_sq(px, py, cap_start) <= half * half
                    || dist_sq(px, py, cap_end) <= half * half);

            if hit || in_cap {
                frame.set_pixel(x, y, color);
            }
        }
    }
}

fn dist_sq(x: f32, y: f32, p: (f32, f32)) -> f32 {
    let dx = x - p.0;
    let dy = y - p.1;
    dx * dx + dy * dy
}
