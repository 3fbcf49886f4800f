//! Bitmap compositing onto the framebuffer — axis-aligned and rotated blits.
//!
//! The rotated blit walks the destination bounding box and inverse-maps each
//! pixel back into the source, sampling bilinearly with premultiplied alpha,
//! so thin hands stay smooth at arbitrary angles.

use image::RgbaImage;

use crate::framebuffer::Framebuffer;

/// Copy `src` onto `frame` with its top-left corner at `(left, top)`,
/// blending by source alpha. Pixels falling outside the frame are clipped.
pub fn blit(frame: &mut Framebuffer, src: &RgbaImage, left: i32, top: i32) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let x = left + sx as i32;
        let y = top + sy as i32;
        if x >= 0 && y >= 0 {
            frame.blend_pixel(x as u32, y as u32, px.0);
        }
    }
}

/// Draw `src` as if placed with its top-left at `(dest_left, dest_top)` and
/// then rotated by `angle_deg` clockwise about `(pivot_x, pivot_y)`.
///
/// Destination pixels inside the rotated footprint are inverse-mapped into
/// the source and sampled bilinearly; source-over alpha composites the
/// result. An empty source is a no-op.
pub fn blit_rotated(
    frame: &mut Framebuffer,
    src: &RgbaImage,
    dest_left: f32,
    dest_top: f32,
    pivot_x: f32,
    pivot_y: f32,
    angle_deg: f32,
) {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 || frame.width() == 0 || frame.height() == 0 {
        return;
    }

    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();

    // Forward-rotate the unrotated corners to find the destination bounds.
    // Screen coordinates are y-down, so this matrix rotates clockwise.
    let corners = [
        (dest_left, dest_top),
        (dest_left + src_w as f32, dest_top),
        (dest_left, dest_top + src_h as f32),
        (dest_left + src_w as f32, dest_top + src_h as f32),
    ];
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for (x, y) in corners {
        let dx = x - pivot_x;
        let dy = y - pivot_y;
        let rx = pivot_x + dx * cos - dy * sin;
        let ry = pivot_y + dx * sin + dy * cos;
        min_x = min_x.min(rx);
        min_y = min_y.min(ry);
        max_x = max_x.max(rx);
        max_y = max_y.max(ry);
    }

    let x0 = (min_x.floor().max(0.0)) as u32;
    let y0 = (min_y.floor().max(0.0)) as u32;
    let x1 = (max_x.ceil().min(frame.width() as f32)) as u32;
    let y1 = (max_y.ceil().min(frame.height() as f32)) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            // Inverse-rotate the destination pixel center back into the
            // unrotated placement, then into source coordinates.
            let dx = (x as f32 + 0.5) - pivot_x;
            let dy = (y as f32 + 0.5) - pivot_y;
            let ux = pivot_x + dx * cos + dy * sin - dest_left;
            let uy = pivot_y - dx * sin + dy * cos - dest_top;

            let rgba = sample_bilinear(src, ux, uy);
            frame.blend_pixel(x, y, rgba);
        }
    }
}

/// Sample `src` at a continuous position (pixel centers at `n + 0.5`),
/// interpolating the four neighbors with premultiplied alpha. Positions off
/// the image read as fully transparent.
fn sample_bilinear(src: &RgbaImage, x: f32, y: f32) -> [u8; 4] {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let wx = fx - x0;
    let wy = fy - y0;

    let mut acc = [0.0f32; 4]; // premultiplied r, g, b, a
    for (dx, dy, w) in [
        (0.0, 0.0, (1.0 - wx) * (1.0 - wy)),
        (1.0, 0.0, wx * (1.0 - wy)),
        (0.0, 1.0, (1.0 - wx) * wy),
        (1.0, 1.0, wx * wy),
    ] {
        if w == 0.0 {
            continue;
        }
        let sx = x0 + dx;
        let sy = y0 + dy;
        if sx < 0.0 || sy < 0.0 || sx >= src.width() as f32 || sy >= src.height() as f32 {
            continue;
        }
        let px = src.get_pixel(sx as u32, sy as u32).0;
        let a = f32::from(px[3]) / 255.0;
        acc[0] += w * f32::from(px[0]) * a;
        acc[1] += w * f32::from(px[1]) * a;
        acc[2] += w * f32::from(px[2]) * a;
        acc[3] += w * a;
    }

    if acc[3] <= f32::EPSILON {
        return [0, 0, 0, 0];
    }
    [
        (acc[0] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[1] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[2] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[3] * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}
