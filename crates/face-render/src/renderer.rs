//! Face renderer — owns the scaled bitmap set, the derived geometry, and the
//! reusable frame, and composes one frame per redraw.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::RgbaImage;

use face_core::clock::ClockState;
use face_core::geometry::{background_size, hand_scaled_size, FaceGeometry};
use face_core::hands::{hour_hand_angle, minute_hand_angle};

use crate::arc::draw_progress_arc;
use crate::assets::{AssetError, AssetKey, AssetSource};
use crate::blit::{blit, blit_rotated};
use crate::framebuffer::Framebuffer;
use crate::scale;

/// Theme inputs resolved by the host: stroke color, canvas clear color, and
/// the display density used for the px→dp stroke conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    /// Progress indicator stroke color.
    pub progress_color: Rgb888,
    /// Color the frame is cleared to around the dial.
    pub clear_color: Rgb888,
    /// Display density (physical pixels per dp).
    pub density: f32,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            progress_color: Rgb888::new(0x4d, 0xd0, 0xe1),
            clear_color: Rgb888::new(0, 0, 0),
            density: 1.0,
        }
    }
}

/// The three pre-scaled rasters a frame is composed from. Rebuilt as a unit
/// on resize; the previous set is dropped.
struct ScaledBitmapSet {
    background: RgbaImage,
    minute_hand: RgbaImage,
    hour_hand: RgbaImage,
}

/// Composes watch-face frames.
///
/// All bitmap work happens in [`on_resize`](Self::on_resize);
/// [`render_frame`](Self::render_frame) composes without allocating.
pub struct FaceRenderer<A: AssetSource> {
    assets: A,
    style: FaceStyle,
    bitmaps: Option<ScaledBitmapSet>,
    geometry: FaceGeometry,
    frame: Framebuffer,
}

impl<A: AssetSource> FaceRenderer<A> {
    /// Renderer with no layout yet; call [`on_resize`](Self::on_resize)
    /// before the first frame.
    pub fn new(assets: A, style: FaceStyle) -> Self {
        Self {
            assets,
            style,
            bitmaps: None,
            geometry: FaceGeometry::default(),
            frame: Framebuffer::new(0, 0),
        }
    }

    /// The current layout geometry.
    #[must_use]
    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Update the display density. Takes effect on the next resize, which
    /// recomputes the stroke width.
    pub fn set_density(&mut self, density: f32) {
        self.style.density = density;
    }

    /// Rebuild the scaled bitmap set and geometry for a view of
    /// `view_w × view_h` pixels.
    ///
    /// A zero-area view is valid: it clears the bitmap set so rendering
    /// becomes a no-op. Asset read/decode failures propagate; the face
    /// cannot draw without its bitmaps.
    pub fn on_resize(&mut self, view_w: u32, view_h: u32) -> Result<(), AssetError> {
        self.frame = Framebuffer::new(view_w, view_h);

        let bg_size = background_size(view_w, view_h);
        if bg_size == 0 {
            self.bitmaps = None;
            self.geometry = FaceGeometry::default();
            return Ok(());
        }

        let bg_bytes = self.assets.read_asset(AssetKey::Background)?;
        let minute_bytes = self.assets.read_asset(AssetKey::MinuteHand)?;
        let hour_bytes = self.assets.read_asset(AssetKey::HourHand)?;

        let bg_natural = scale::dimensions(&bg_bytes)?;
        let minute_natural = scale::dimensions(&minute_bytes)?;
        let hour_natural = scale::dimensions(&hour_bytes)?;

        let minute_scaled = hand_scaled_size(minute_natural, bg_natural, bg_size);
        let hour_scaled = hand_scaled_size(hour_natural, bg_natural, bg_size);

        let set = ScaledBitmapSet {
            background: scale::load_scaled(&bg_bytes, bg_size, bg_size)?,
            minute_hand: scale::load_scaled(&minute_bytes, minute_scaled.0, minute_scaled.1)?,
            hour_hand: scale::load_scaled(&hour_bytes, hour_scaled.0, hour_scaled.1)?,
        };

        self.geometry = FaceGeometry::layout(
            view_w,
            view_h,
            set.background.dimensions(),
            set.minute_hand.width(),
            self.style.density,
        );
        self.bitmaps = Some(set);

        tracing::debug!(view_w, view_h, bg_size, "rebuilt scaled bitmap set");
        Ok(())
    }

    /// Compose one frame and push it to `target`.
    ///
    /// Draw order: background, minute hand, hour hand, progress arc. The
    /// hands rotate about the face center with their pivot at bottom-center.
    /// `sweep_angle` is the indicator's current angle; `None` (sweep stopped)
    /// skips the arc.
    pub fn render_frame<D>(
        &mut self,
        target: &mut D,
        clock: &ClockState,
        sweep_angle: Option<f32>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.frame.fill(self.style.clear_color);

        if let Some(set) = &self.bitmaps {
            let g = self.geometry;
            blit(
                &mut self.frame,
                &set.background,
                g.left.round() as i32,
                g.top.round() as i32,
            );

            for (hand, angle) in [
                (
                    &set.minute_hand,
                    minute_hand_angle(clock.minute(), clock.second()),
                ),
                (
                    &set.hour_hand,
                    hour_hand_angle(clock.hour(), clock.minute(), clock.second()),
                ),
            ] {
                let w = hand.width() as f32;
                let h = hand.height() as f32;
                // Pivot at the hand's bottom-center: base on the face center,
                // tip toward twelve o'clock before rotation.
                let dest_left = g.center_x - w / 2.0;
                let dest_top = g.center_y - h + w / 2.0;
                blit_rotated(
                    &mut self.frame,
                    hand,
                    dest_left,
                    dest_top,
                    g.center_x,
                    g.center_y,
                    angle,
                );
            }

            if let Some(sweep) = sweep_angle {
                draw_progress_arc(
                    &mut self.frame,
                    g.center_x,
                    g.center_y,
                    g.progress_radius,
                    g.progress_stroke_width,
                    sweep,
                    self.style.progress_color,
                );
            }
        }

        let area = Rectangle::new(
            Point::zero(),
            Size::new(self.frame.width(), self.frame.height()),
        );
        target.fill_contiguous(&area, self.frame.pixels().iter().copied())
    }
}
