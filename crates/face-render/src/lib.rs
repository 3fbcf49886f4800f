//! Watch-face frame composition.
//!
//! Turns raw image assets plus the core's clock/sweep state into one composed
//! RGB frame per redraw:
//!
//! - [`assets`]: stable keys over raw image bytes ([`AssetKey`],
//!   [`AssetSource`]) with directory- and memory-backed sources
//! - [`scale`]: metadata-only bounds queries and two-pass bitmap scaling
//!   with a power-of-two pre-pass that bounds the intermediate working set
//! - [`renderer`]: [`FaceRenderer`] rebuilds the scaled bitmap set and
//!   geometry on resize, composes background + rotated hands + progress arc
//!   into an internal framebuffer, and pushes it through any
//!   `embedded_graphics::DrawTarget<Color = Rgb888>`
//!
//! Composition is pure CPU work; nothing here touches a window or a clock.

pub mod arc;
pub mod assets;
pub mod blit;
pub mod framebuffer;
pub mod renderer;
pub mod scale;

pub use assets::{AssetError, AssetKey, AssetSource, DirAssets, MemoryAssets};
pub use framebuffer::Framebuffer;
pub use renderer::{FaceRenderer, FaceStyle};
