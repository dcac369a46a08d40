//! Least significant bit sampling.
//!
//! The simplest form of image steganography overwrites the lowest bit of each
//! channel sample with one bit of a message. The change to each sample is at
//! most 1, which nobody can see, but pulling the bits back out is trivial if
//! you know which channels were used.

use alloc::{string::String, vec::Vec};

use crate::{Channel, RgbaBitmapRef, SleuthResult};

/// One bit stream per channel, each holding the lowest bit of that channel's
/// sample for every pixel, in scan order.
///
/// Each element is `0` or `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelBitStreams {
  pub r: Vec<u8>,
  pub g: Vec<u8>,
  pub b: Vec<u8>,
  pub a: Vec<u8>,
}
impl ChannelBitStreams {
  /// Samples the lowest bit of every channel of every pixel.
  #[must_use]
  pub fn from_bitmap(bitmap: RgbaBitmapRef<'_>) -> Self {
    let count = bitmap.pixels().len();
    let mut out = Self {
      r: Vec::with_capacity(count),
      g: Vec::with_capacity(count),
      b: Vec::with_capacity(count),
      a: Vec::with_capacity(count),
    };
    for p in bitmap.pixels() {
      out.r.push(p.r & 1);
      out.g.push(p.g & 1);
      out.b.push(p.b & 1);
      out.a.push(p.a & 1);
    }
    out
  }

  /// As [`from_bitmap`](Self::from_bitmap), from interleaved `r,g,b,a` bytes.
  ///
  /// ## Failure
  /// * If `bytes.len()` isn't exactly `width * height * 4`.
  #[inline]
  pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> SleuthResult<Self> {
    RgbaBitmapRef::from_rgba_bytes(width, height, bytes).map(Self::from_bitmap)
  }

  /// The length of the longest stream.
  ///
  /// Streams built by this module all have one entry per pixel, but the
  /// fields are public, so a hand built value might not.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.r.len().max(self.g.len()).max(self.b.len()).max(self.a.len())
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  #[inline]
  #[must_use]
  pub fn channel(&self, channel: Channel) -> &[u8] {
    match channel {
      Channel::R => &self.r,
      Channel::G => &self.g,
      Channel::B => &self.b,
      Channel::A => &self.a,
    }
  }

  /// A channel's bits as a string of `'0'` and `'1'` characters.
  #[must_use]
  pub fn bit_string(&self, channel: Channel) -> String {
    self.channel(channel).iter().map(|&bit| if bit != 0 { '1' } else { '0' }).collect()
  }

  /// Reassembles a hidden message from the selected channels.
  ///
  /// For each pixel, the bits of each selected channel are taken in R, G, B, A
  /// order, making one long bit stream. That stream is cut into bytes (high bit
  /// first), and each byte becomes one Latin-1 character. Reading stops at the
  /// first zero byte, or when fewer than 8 bits remain.
  ///
  /// If the selected streams differ in length, a stream that has run out is
  /// skipped and the others keep going until the longest one ends.
  #[must_use]
  pub fn extract_message(&self, selection: ChannelSelection) -> String {
    let selected: Vec<&[u8]> =
      Channel::ALL.into_iter().filter(|&c| selection.contains(c)).map(|c| self.channel(c)).collect();
    let longest = selected.iter().map(|stream| stream.len()).max().unwrap_or(0);
    let mut bits =
      (0..longest).flat_map(|i| selected.iter().filter_map(move |stream| stream.get(i).copied()));
    let mut out = String::new();
    loop {
      let mut byte = 0_u8;
      for _ in 0..8 {
        match bits.next() {
          Some(bit) => byte = (byte << 1) | (bit & 1),
          None => return out,
        }
      }
      if byte == 0 {
        return out;
      }
      out.push(char::from(byte));
    }
  }
}

/// Which channels to read when extracting an LSB message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelSelection {
  pub r: bool,
  pub g: bool,
  pub b: bool,
  pub a: bool,
}
impl ChannelSelection {
  pub const RGB: Self = Self { r: true, g: true, b: true, a: false };
  pub const RGBA: Self = Self { r: true, g: true, b: true, a: true };
  pub const NONE: Self = Self { r: false, g: false, b: false, a: false };

  #[inline]
  #[must_use]
  pub const fn only(channel: Channel) -> Self {
    Self::NONE.with(channel, true)
  }

  #[inline]
  #[must_use]
  pub const fn with(mut self, channel: Channel, enabled: bool) -> Self {
    match channel {
      Channel::R => self.r = enabled,
      Channel::G => self.g = enabled,
      Channel::B => self.b = enabled,
      Channel::A => self.a = enabled,
    }
    self
  }

  #[inline]
  #[must_use]
  pub const fn contains(self, channel: Channel) -> bool {
    match channel {
      Channel::R => self.r,
      Channel::G => self.g,
      Channel::B => self.b,
      Channel::A => self.a,
    }
  }

  /// Parses a set of channel letters such as `"rgb"` or `"A"`.
  ///
  /// Gives `None` on any other character.
  #[must_use]
  pub fn from_letters(letters: &str) -> Option<Self> {
    let mut out = Self::NONE;
    for ch in letters.chars() {
      let channel = match ch.to_ascii_uppercase() {
        'R' => Channel::R,
        'G' => Channel::G,
        'B' => Channel::B,
        'A' => Channel::A,
        _ => return None,
      };
      out = out.with(channel, true);
    }
    Some(out)
  }
}
impl Default for ChannelSelection {
  /// Red, green, and blue, but not alpha.
  #[inline]
  fn default() -> Self {
    Self::RGB
  }
}
