//! End-to-end composition: assets in, pixels out.

#![allow(clippy::unwrap_used)]

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use face_core::clock::ClockState;
use face_core::time::CivilTime;
use face_render::{AssetError, FaceRenderer, FaceStyle, MemoryAssets};
use face_testing::TestCanvas;
use image::{Rgba, RgbaImage};
use std::io::Cursor;

const BG: [u8; 4] = [24, 24, 48, 255];
const MINUTE: [u8; 4] = [230, 40, 40, 255];
const HOUR: [u8; 4] = [40, 230, 40, 255];

fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn assets() -> MemoryAssets {
    // Oversized background exercises the power-of-two pre-pass.
    MemoryAssets::new(png(512, 512, BG), png(32, 200, MINUTE), png(32, 140, HOUR))
}

fn clock_at(hour: u8, minute: u8, second: u8) -> ClockState {
    let mut c = ClockState::new();
    c.sync(CivilTime {
        hour,
        minute,
        second,
    });
    c
}

#[test]
fn full_frame_composition_at_noon() {
    let mut renderer = FaceRenderer::new(assets(), FaceStyle::default());
    renderer.on_resize(160, 120).unwrap();

    let mut canvas = TestCanvas::new(160, 120);
    renderer
        .render_frame(&mut canvas, &clock_at(0, 0, 0), Some(180.0))
        .unwrap();

    let bg = Rgb888::new(BG[0], BG[1], BG[2]);
    let clear = FaceStyle::default().clear_color;

    // Background is a 120×120 square centered at x = 80.
    canvas.assert_pixel(25, 60, bg).unwrap();
    canvas.assert_pixel(135, 60, bg).unwrap();
    // Outside the dial the frame shows the clear color.
    canvas
        .assert_region_uniform(Rectangle::new(Point::zero(), Size::new(19, 120)), clear)
        .unwrap();

    // Both hands point up at noon.
    canvas
        .assert_region_contains(
            Rectangle::new(Point::new(70, 10), Size::new(20, 40)),
            Rgb888::new(MINUTE[0], MINUTE[1], MINUTE[2]),
        )
        .unwrap();
    canvas
        .assert_region_contains(
            Rectangle::new(Point::new(70, 25), Size::new(20, 30)),
            Rgb888::new(HOUR[0], HOUR[1], HOUR[2]),
        )
        .unwrap();

    // A +180° sweep covers the right half of the indicator circle.
    let radius = renderer.geometry().progress_radius;
    let arc_x = (80.0 + radius) as u32;
    canvas
        .assert_region_contains(
            Rectangle::new(Point::new(arc_x as i32 - 2, 55), Size::new(8, 10)),
            FaceStyle::default().progress_color,
        )
        .unwrap();
}

#[test]
fn resize_replaces_the_bitmap_set() {
    let mut renderer = FaceRenderer::new(assets(), FaceStyle::default());
    renderer.on_resize(200, 200).unwrap();
    renderer.on_resize(64, 64).unwrap();

    let mut canvas = TestCanvas::new(64, 64);
    renderer
        .render_frame(&mut canvas, &clock_at(6, 0, 0), None)
        .unwrap();

    // The whole 64×64 view is dial; its corner pixel comes from the
    // rebuilt (smaller) background.
    canvas
        .assert_pixel(1, 1, Rgb888::new(BG[0], BG[1], BG[2]))
        .unwrap();
}

#[test]
fn corrupt_asset_fails_resize() {
    let broken = MemoryAssets::new(vec![0xde, 0xad, 0xbe, 0xef], png(8, 8, MINUTE), png(8, 8, HOUR));
    let mut renderer = FaceRenderer::new(broken, FaceStyle::default());
    let err = renderer.on_resize(100, 100).unwrap_err();
    assert!(matches!(err, AssetError::Decode(_)));
}

#[test]
fn growing_from_zero_size_recovers() {
    let mut renderer = FaceRenderer::new(assets(), FaceStyle::default());
    renderer.on_resize(0, 0).unwrap();
    renderer.on_resize(80, 80).unwrap();

    let mut canvas = TestCanvas::new(80, 80);
    renderer
        .render_frame(&mut canvas, &clock_at(9, 15, 30), Some(-90.0))
        .unwrap();
    canvas
        .assert_pixel(2, 2, Rgb888::new(BG[0], BG[1], BG[2]))
        .unwrap();
}
