//! Holds all the tools for picking apart PNG data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! A PNG is an 8 byte signature followed by a series of "chunks". Every chunk
//! is laid out the same way:
//!
//! ```text
//! length: u32 (big-endian), count of data bytes only
//! type:   [u8; 4]
//! data:   [u8; length]
//! crc:    u32 (big-endian), over type and data
//! ```
//!
//! The first chunk must be the header (`IHDR`) and the last chunk must be the
//! end marker (`IEND`). A normal decoder stops reading at `IEND`, so anything
//! placed after it is invisible when the image is displayed. Likewise,
//! ancillary chunks (such as the three text chunk types) are skipped by any
//! decoder that doesn't care about them. Both are common places to hide data.
//!
//! ## What's Here
//!
//! * [`PngRawChunkIter`] walks the chunks of a PNG without interpreting them.
//! * [`png_get_metadata`] reads the header and tallies up the chunk stream.
//! * [`png_get_text_payloads`] decodes every `tEXt`, `iTXt`, and `zTXt`
//!   chunk, inflating the compressed ones.
//! * [`png_find_trailing_data`] finds bytes placed after the `IEND` chunk.
//!
//! ## Parsing Errors
//!
//! Quoting [section 13.2 of the PNG
//! spec](https://www.w3.org/TR/2003/REC-PNG-20031110/#13Decoders.Errors):
//!
//! > Errors that have little or no effect on the processing of the image may be
//! > ignored, while those that affect critical data shall be dealt with in a
//! > manner appropriate to the application.
//!
//! For a forensics tool, "appropriate" means reporting as much as possible. The
//! only hard errors are a missing PNG signature and (for the metadata) a
//! missing header chunk. Otherwise we ignore:
//!
//! * All the chunk ordering rules, and rules against duplicate chunks.
//! * The CRC32 value of each chunk. It's read, but never checked.
//! * A chunk stream that runs off the end of the data. The walk just stops, and
//!   the iterator can tell you that it stopped early.

use core::fmt::{Debug, Display, Write};

use alloc::{
  string::{String, ToString},
  vec::Vec,
};

use crate::{SleuthError, SleuthResult};

mod chunk_type;
pub use chunk_type::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod metadata;
pub use metadata::*;

mod text;
pub use text::*;

mod trailing;
pub use trailing::*;

/// The 8 bytes that every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub fn is_png_header_correct(bytes: &[u8]) -> bool {
  bytes.starts_with(&PNG_SIGNATURE)
}

/// Fails with [`SleuthError::InvalidFormat`] unless the bytes start with the
/// PNG signature.
#[inline]
pub fn require_png_signature(bytes: &[u8]) -> SleuthResult<()> {
  if is_png_header_correct(bytes) {
    Ok(())
  } else {
    Err(SleuthError::InvalidFormat)
  }
}

/// Decodes bytes as text the way a browser's `TextDecoder` would: UTF-8, with
/// any invalid sequences replaced.
#[inline]
#[must_use]
pub(crate) fn decode_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
pub(crate) mod test_png {
  //! Helpers for building PNG byte streams in tests.
  use super::*;

  /// A 13 byte `IHDR` body.
  pub fn ihdr_data(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
    v
  }

  /// Appends a chunk (with a zeroed CRC, nothing checks it).
  pub fn push_chunk(png: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(ty);
    png.extend_from_slice(data);
    png.extend_from_slice(&[0, 0, 0, 0]);
  }

  /// Signature + the chunks given, in order.
  pub fn build_png(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut png = PNG_SIGNATURE.to_vec();
    for (ty, data) in chunks {
      push_chunk(&mut png, ty, data);
    }
    png
  }

  /// A 2x3 RGBA PNG skeleton: `IHDR`, one `IDAT`, `IEND`.
  pub fn minimal_png() -> Vec<u8> {
    build_png(&[(b"IHDR", &ihdr_data(2, 3, 8, 6)), (b"IDAT", &[1, 2, 3]), (b"IEND", &[])])
  }
}
