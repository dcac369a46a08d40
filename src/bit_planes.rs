//! Splits a raster into per-channel and per-bit views.
//!
//! Looking at one bit of one channel at a time, rendered as black and white,
//! makes LSB steganography jump out: the low planes of a natural photo look
//! like noise, while an embedded message usually shows up as a block of
//! different looking noise (or as plain visible text and shapes).
//!
//! Every function here builds a brand new [`RgbaBitmap`] from the source
//! raster, nothing is modified in place.

use crate::{Channel, RgbaBitmap, RgbaBitmapRef, RGBA8};

/// Inverts the color channels, alpha is left alone.
#[must_use]
pub fn invert(source: RgbaBitmapRef<'_>) -> RgbaBitmap {
  source.map_pixels(|p| RGBA8::new(255 - p.r, 255 - p.g, 255 - p.b, p.a))
}

/// Keeps only one channel.
///
/// For R, G, or B the other two color channels are zeroed and alpha is kept.
/// For A the result is [`alpha_as_grayscale`].
#[must_use]
pub fn isolate_channel(source: RgbaBitmapRef<'_>, channel: Channel) -> RgbaBitmap {
  match channel {
    Channel::R => source.map_pixels(|p| RGBA8::new(p.r, 0, 0, p.a)),
    Channel::G => source.map_pixels(|p| RGBA8::new(0, p.g, 0, p.a)),
    Channel::B => source.map_pixels(|p| RGBA8::new(0, 0, p.b, p.a)),
    Channel::A => alpha_as_grayscale(source),
  }
}

/// Shows the alpha channel as an opaque grayscale image.
#[must_use]
pub fn alpha_as_grayscale(source: RgbaBitmapRef<'_>) -> RgbaBitmap {
  source.map_pixels(|p| RGBA8::opaque_gray(p.a))
}

/// Renders one bit of one channel: opaque white where the bit is 1, opaque
/// black where it's 0.
///
/// `bit` counts from 0 (the least significant bit).
///
/// ## Panics
/// * If `bit` is 8 or more.
#[must_use]
pub fn bit_plane(source: RgbaBitmapRef<'_>, channel: Channel, bit: u32) -> RgbaBitmap {
  assert!(bit < 8, "bit index out of range");
  source.map_pixels(|p| if p.channel_bit(channel, bit) { RGBA8::WHITE } else { RGBA8::BLACK })
}

/// All the views of a single channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelViews {
  pub channel: Channel,
  /// The full 0-255 channel, see [`isolate_channel`].
  pub full: RgbaBitmap,
  /// Single bit planes. Index 0 is the *most* significant bit, and index 7 is
  /// the least significant bit, which is the order that bit plane viewers
  /// conventionally list them in.
  pub planes: [RgbaBitmap; 8],
}
impl ChannelViews {
  #[must_use]
  pub fn new(source: RgbaBitmapRef<'_>, channel: Channel) -> Self {
    Self {
      channel,
      full: isolate_channel(source, channel),
      planes: core::array::from_fn(|i| bit_plane(source, channel, 7 - i as u32)),
    }
  }

  /// The plane for a bit position counted from the least significant bit.
  #[inline]
  #[must_use]
  pub fn plane_for_bit(&self, bit: u32) -> Option<&RgbaBitmap> {
    let bit = usize::try_from(bit).ok()?;
    self.planes.get(7_usize.checked_sub(bit)?)
  }
}

/// Every derived view of a raster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitPlaneSet {
  /// An unmodified copy of the source.
  pub normal: RgbaBitmap,
  pub inverted: RgbaBitmap,
  /// In R, G, B, A order.
  pub channels: [ChannelViews; 4],
}
impl BitPlaneSet {
  /// Builds all 38 views of the source.
  #[must_use]
  pub fn decompose(source: RgbaBitmapRef<'_>) -> Self {
    log::debug!("bit planes: decomposing {}x{}", source.width(), source.height());
    Self {
      normal: source.to_bitmap(),
      inverted: invert(source),
      channels: Channel::ALL.map(|c| ChannelViews::new(source, c)),
    }
  }

  #[inline]
  #[must_use]
  pub fn channel(&self, channel: Channel) -> &ChannelViews {
    &self.channels[channel.index()]
  }
}
