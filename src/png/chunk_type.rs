use super::*;

/// The four byte tag naming a chunk's type.
///
/// Each letter of the tag is an ASCII letter, and bit 5 of each letter (the
/// "lowercase bit") is a property flag:
///
/// | letter | uppercase         | lowercase       |
/// |:------:|:------------------|:----------------|
/// | 0      | critical          | ancillary       |
/// | 1      | public            | private         |
/// | 2      | (reserved, valid) | (reserved, bad) |
/// | 3      | unsafe to copy    | safe to copy    |
///
/// Nothing stops a hostile file from putting non-letter bytes in a tag, so the
/// `Debug` and `Display` impls just `as` cast each byte into a `char`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const zTXt: Self = Self(*b"zTXt");

  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// If the first letter is a lowercase ASCII letter.
  ///
  /// Ancillary chunks can be skipped by a decoder and the image still shows,
  /// which makes them the natural place to stash extra data.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    self.0[0].is_ascii_lowercase()
  }

  #[inline]
  #[must_use]
  pub const fn is_private(self) -> bool {
    (self.0[1] & 32) != 0
  }

  /// Tags with the third letter lowercase aren't defined by any PNG version.
  #[inline]
  #[must_use]
  pub const fn is_reserved_bit_set(self) -> bool {
    (self.0[2] & 32) != 0
  }

  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 32) != 0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}
#[cfg(feature = "serde")]
impl serde::Serialize for PngChunkType {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

#[test]
fn test_chunk_type_naming_bits() {
  assert!(!PngChunkType::IHDR.is_ancillary());
  assert!(!PngChunkType::IDAT.is_ancillary());
  assert!(PngChunkType::tEXt.is_ancillary());
  assert!(PngChunkType::zTXt.is_ancillary());
  assert!(PngChunkType(*b"prVt").is_private());
  assert!(!PngChunkType(*b"prVt").is_reserved_bit_set());
  assert!(PngChunkType(*b"prVt").is_safe_to_copy());
  // non-letters are never "lowercase", even with bit 5 set
  assert!(!PngChunkType(*b"{abc").is_ancillary());
  assert!(!PngChunkType([0xE9, b'a', b'b', b'c']).is_ancillary());
}

#[test]
fn test_chunk_type_formatting() {
  use alloc::format;
  assert_eq!(format!("{}", PngChunkType::iTXt), "iTXt");
  assert_eq!(format!("{:?}", PngChunkType::IEND), "\"IEND\"");
}
