#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! A crate for finding things hidden inside of PNG files.
//!
//! There's two kinds of input that the crate works with:
//!
//! * **The raw file bytes.** These go to the [`png`] module, which walks the
//!   chunk stream (without decoding any pixels) to pull out the header info,
//!   any text payloads, and anything that's been tacked on after the end of the
//!   PNG data.
//! * **A decoded RGBA8 raster.** Decoding pixels is *not* done by this crate.
//!   Once you've decoded the image with whatever decoder you like, the [`lsb`]
//!   and [`bit_planes`] modules split the channels apart into least significant
//!   bit streams and per-bit plane images.
//!
//! The [`analysis`] module glues all of that together for a single file, or a
//! whole batch of files.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod image;
pub use image::*;

pub mod png;

pub mod lsb;

pub mod bit_planes;

pub mod analysis;

/// The four channels of an RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Channel {
  /// Red
  R,
  /// Green
  G,
  /// Blue
  B,
  /// Alpha
  A,
}
impl Channel {
  /// All channels, in pixel memory order.
  pub const ALL: [Self; 4] = [Self::R, Self::G, Self::B, Self::A];

  /// The index of this channel within an RGBA8 pixel.
  #[inline]
  #[must_use]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// The single letter name of the channel.
  #[inline]
  #[must_use]
  pub const fn letter(self) -> char {
    match self {
      Self::R => 'R',
      Self::G => 'G',
      Self::B => 'B',
      Self::A => 'A',
    }
  }
}
