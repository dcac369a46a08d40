//! Module for the pixel format that the raster analysis works with.
//!
//! Every raster passed into this crate is assumed to already be decoded into
//! 8-bits per channel RGBA, which is what basically every platform image
//! decoder will give you if you ask. Palette, 16-bit, and interlaced source
//! data all have to be converted by the decoder before we ever see it.
//!
//! The pixel type is `Pod`, so a `&[u8]` from a decoder can be viewed as a
//! `&[RGBA8]` (and back) with [`bytemuck`] without any copying.

use bytemuck::{Pod, Zeroable};

use crate::Channel;

/// An 8-bits per channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8 {
  /// Opaque black.
  pub const BLACK: Self = Self::new(0, 0, 0, 255);
  /// Opaque white.
  pub const WHITE: Self = Self::new(255, 255, 255, 255);

  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// An opaque gray with all three color channels set to `y`.
  #[inline]
  #[must_use]
  pub const fn opaque_gray(y: u8) -> Self {
    Self::new(y, y, y, 255)
  }

  /// Gets the sample for the channel given.
  #[inline]
  #[must_use]
  pub const fn channel(self, channel: Channel) -> u8 {
    match channel {
      Channel::R => self.r,
      Channel::G => self.g,
      Channel::B => self.b,
      Channel::A => self.a,
    }
  }

  /// Gets a single bit of a channel's sample (`0` is the lowest bit).
  ///
  /// ## Panics
  /// * If `bit` is 8 or more.
  #[inline]
  #[must_use]
  pub const fn channel_bit(self, channel: Channel, bit: u32) -> bool {
    assert!(bit < 8, "bit index out of range");
    (self.channel(channel) >> bit) & 1 != 0
  }
}

#[test]
fn test_rgba8_channel_bit() {
  let p = RGBA8::new(0b1010_1010, 1, 0, 0xFF);
  let red_bits: [bool; 8] = core::array::from_fn(|b| p.channel_bit(Channel::R, b as u32));
  assert_eq!(red_bits, [false, true, false, true, false, true, false, true]);
  assert!(p.channel_bit(Channel::G, 0));
  assert!(!p.channel_bit(Channel::B, 7));
  assert!(p.channel_bit(Channel::A, 7));
}

#[test]
fn test_rgba8_cast_from_bytes() {
  let bytes = [1_u8, 2, 3, 4, 5, 6, 7, 8];
  let pixels: &[RGBA8] = bytemuck::cast_slice(&bytes);
  assert_eq!(pixels, &[RGBA8::new(1, 2, 3, 4), RGBA8::new(5, 6, 7, 8)]);
}
