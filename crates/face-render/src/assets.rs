//! Face asset access — stable keys over raw image bytes.
//!
//! The renderer never touches the filesystem directly; it reads bytes through
//! [`AssetSource`], so the host decides where assets live (a directory on
//! desktop, embedded byte slices in tests).

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Catalogue of well-known face assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// The dial image, scaled to a square filling the view's smaller axis.
    Background,
    /// The minute hand, pivot at its bottom-center.
    MinuteHand,
    /// The hour hand, pivot at its bottom-center.
    HourHand,
}

impl AssetKey {
    /// Conventional file name for directory-backed sources.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKey::Background => "background.png",
            AssetKey::MinuteHand => "minute_hand.png",
            AssetKey::HourHand => "hour_hand.png",
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKey::Background => "background",
            AssetKey::MinuteHand => "minute hand",
            AssetKey::HourHand => "hour hand",
        })
    }
}

/// Errors raised while reading or decoding a face asset.
///
/// A failure here is fatal to the frame being sized: the face cannot draw
/// without its bitmaps, so the error propagates to the host instead of being
/// swallowed.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset bytes could not be read from the source.
    #[error("failed to read {key} asset: {source}")]
    Read {
        /// Which asset failed.
        key: AssetKey,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The asset bytes are not a decodable image.
    #[error("failed to decode image asset: {0}")]
    Decode(#[from] image::ImageError),
}

/// Read-only source of face asset bytes.
pub trait AssetSource {
    /// Return the raw encoded bytes of `key`.
    fn read_asset(&self, key: AssetKey) -> Result<Cow<'_, [u8]>, AssetError>;
}

/// Assets read from `<root>/<file_name>` on demand.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn read_asset(&self, key: AssetKey) -> Result<Cow<'_, [u8]>, AssetError> {
        let path = self.root.join(key.file_name());
        std::fs::read(&path)
            .map(Cow::Owned)
            .map_err(|source| AssetError::Read { key, source })
    }
}

/// Assets held in memory, for tests and embedded defaults.
#[derive(Debug, Clone)]
pub struct MemoryAssets {
    background: Vec<u8>,
    minute_hand: Vec<u8>,
    hour_hand: Vec<u8>,
}

impl MemoryAssets {
    /// Source over three encoded images.
    pub fn new(background: Vec<u8>, minute_hand: Vec<u8>, hour_hand: Vec<u8>) -> Self {
        Self {
            background,
            minute_hand,
            hour_hand,
        }
    }
}

impl AssetSource for MemoryAssets {
    fn read_asset(&self, key: AssetKey) -> Result<Cow<'_, [u8]>, AssetError> {
        Ok(Cow::Borrowed(match key {
            AssetKey::Background => &self.background,
            AssetKey::MinuteHand => &self.minute_hand,
            AssetKey::HourHand => &self.hour_hand,
        }))
    }
}
