use super::*;

/// The types of color that PNG supports.
///
/// Unlike a decoder, a forensics tool wants to see *whatever* is in the file,
/// so any value outside the five defined ones is kept as `Unknown` rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngColorType {
  /// Greyscale
  Y,
  /// Red, Green, Blue
  RGB,
  /// Index into a palette.
  Index,
  /// Greyscale + Alpha
  YA,
  /// Red, Green, Blue, Alpha
  RGBA,
  /// Any other color type value.
  Unknown(u8),
}
impl PngColorType {
  /// The name the tool shows for this color type.
  #[inline]
  #[must_use]
  pub const fn description(self) -> &'static str {
    match self {
      Self::Y => "Grayscale",
      Self::RGB => "RGB",
      Self::Index => "Palette",
      Self::YA => "Grayscale with Alpha",
      Self::RGBA => "RGB with Alpha",
      Self::Unknown(_) => "Unknown",
    }
  }

  /// The byte value stored in the header.
  #[inline]
  #[must_use]
  pub const fn to_u8(self) -> u8 {
    match self {
      Self::Y => 0,
      Self::RGB => 2,
      Self::Index => 3,
      Self::YA => 4,
      Self::RGBA => 6,
      Self::Unknown(u) => u,
    }
  }
}
impl From<u8> for PngColorType {
  #[inline]
  fn from(value: u8) -> Self {
    match value {
      0 => Self::Y,
      2 => Self::RGB,
      3 => Self::Index,
      4 => Self::YA,
      6 => Self::RGBA,
      other => Self::Unknown(other),
    }
  }
}
impl Display for PngColorType {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.description())
  }
}
#[cfg(feature = "serde")]
impl serde::Serialize for PngColorType {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.description())
  }
}

/// Image Header
///
/// All fields are kept exactly as stored, even values that no decoder would
/// accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// only 0 (zlib) is defined
  pub compression_method: u8,
  /// only 0 (adaptive) is defined
  pub filter_method: u8,
  /// 0 is none, 1 is Adam7
  pub interlace_method: u8,
}
impl IHDR {
  /// The number of data bytes an `IHDR` chunk holds.
  pub const DATA_LEN: usize = 13;

  /// Any non-zero interlace method is treated as interlaced.
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method != 0
  }

  /// The name of the interlace method, as the tool shows it.
  #[inline]
  #[must_use]
  pub const fn interlace_description(&self) -> &'static str {
    interlace_method_name(self.interlace_method)
  }
}

/// `"Adam7"` for any non-zero interlace method, otherwise `"None"`.
#[inline]
#[must_use]
pub const fn interlace_method_name(interlace_method: u8) -> &'static str {
  if interlace_method != 0 {
    "Adam7"
  } else {
    "None"
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = SleuthError;
  /// Reads the first 13 bytes, any extra bytes are ignored.
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method, ..] => {
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type: PngColorType::from(*color_type),
          compression_method: *compression_method,
          filter_method: *filter_method,
          interlace_method: *interlace_method,
        })
      }
      _ => Err(SleuthError::InvalidHeader),
    }
  }
}
impl<'b> TryFrom<PngRawChunk<'b>> for IHDR {
  type Error = SleuthError;
  #[inline]
  fn try_from(raw: PngRawChunk<'b>) -> Result<Self, Self::Error> {
    if raw.chunk_type() == PngChunkType::IHDR {
      Self::try_from(raw.data())
    } else {
      Err(SleuthError::InvalidHeader)
    }
  }
}

/// Gets the [IHDR] out of the PNG bytes.
///
/// The header must be the very first chunk.
pub fn png_get_header(bytes: &[u8]) -> SleuthResult<IHDR> {
  png_chunks(bytes)?.next().ok_or(SleuthError::InvalidHeader).and_then(IHDR::try_from)
}

#[cfg(test)]
mod tests {
  use super::{test_png::*, *};

  #[test]
  fn test_ihdr_fields_in_order() {
    let data = [0, 0, 1, 0, 0, 0, 0, 200, 16, 4, 7, 8, 1];
    let ihdr = IHDR::try_from(&data[..]).unwrap();
    assert_eq!(ihdr.width, 256);
    assert_eq!(ihdr.height, 200);
    assert_eq!(ihdr.bit_depth, 16);
    assert_eq!(ihdr.color_type, PngColorType::YA);
    assert_eq!(ihdr.compression_method, 7);
    assert_eq!(ihdr.filter_method, 8);
    assert!(ihdr.is_interlaced());
    assert_eq!(ihdr.interlace_description(), "Adam7");
  }

  #[test]
  fn test_ihdr_too_short() {
    assert_eq!(IHDR::try_from(&[0_u8; 12][..]), Err(SleuthError::InvalidHeader));
  }

  #[test]
  fn test_color_type_names() {
    let names: Vec<&str> = [0_u8, 1, 2, 3, 4, 5, 6, 7, 255]
      .into_iter()
      .map(|u| PngColorType::from(u).description())
      .collect();
    assert_eq!(
      names,
      [
        "Grayscale",
        "Unknown",
        "RGB",
        "Palette",
        "Grayscale with Alpha",
        "Unknown",
        "RGB with Alpha",
        "Unknown",
        "Unknown"
      ]
    );
    assert_eq!(PngColorType::from(9).to_u8(), 9);
  }

  #[test]
  fn test_png_get_header() {
    let png = minimal_png();
    let ihdr = png_get_header(&png).unwrap();
    assert_eq!((ihdr.width, ihdr.height), (2, 3));
    assert_eq!(ihdr.color_type, PngColorType::RGBA);
    assert!(!ihdr.is_interlaced());

    let not_first = build_png(&[(b"tEXt", b"a\0b"), (b"IHDR", &ihdr_data(1, 1, 8, 6))]);
    assert_eq!(png_get_header(&not_first), Err(SleuthError::InvalidHeader));
    assert_eq!(png_get_header(&PNG_SIGNATURE), Err(SleuthError::InvalidHeader));
    assert_eq!(png_get_header(b"not a png at all"), Err(SleuthError::InvalidFormat));
  }
}
