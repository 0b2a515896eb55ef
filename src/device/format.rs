//! Frame format selection for the still-capture sink.

use tracing::debug;

/// Pixel encoding of a negotiated capture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// JPEG-compressed frames.
    Jpeg,
    /// Uncompressed YUV frames (preview streams).
    Yuv,
}

/// A negotiated capture size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameFormat {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel encoding.
    pub encoding: Encoding,
}

impl FrameFormat {
    /// Creates a JPEG format with the given dimensions.
    pub const fn jpeg(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            encoding: Encoding::Jpeg,
        }
    }

    /// Creates a YUV format with the given dimensions.
    pub const fn yuv(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            encoding: Encoding::Yuv,
        }
    }
}

/// Chooses the still-capture format from the device's advertised list.
///
/// Devices list their largest JPEG size first, so the first JPEG entry
/// wins. When no list is available, or the list carries no JPEG entry,
/// the fallback format is used instead.
pub fn choose_still_format(
    advertised: Option<&[FrameFormat]>,
    fallback: FrameFormat,
) -> FrameFormat {
    let chosen = advertised
        .and_then(|formats| {
            formats
                .iter()
                .find(|f| f.encoding == Encoding::Jpeg)
                .copied()
        })
        .unwrap_or(fallback);
    debug!(width = chosen.width, height = chosen.height, "still format chosen");
    chosen
}
