use super::*;

/// Bytes found after the `IEND` chunk's CRC.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrailingData<'b> {
  /// Offset of the `IEND` type tag within the file.
  pub iend_offset: usize,
  /// Offset of the first byte after the `IEND` CRC.
  pub data_offset: usize,
  #[cfg_attr(feature = "serde", serde(rename = "text", serialize_with = "serialize_lossy_text"))]
  pub bytes: &'b [u8],
}
#[cfg(feature = "serde")]
fn serialize_lossy_text<S: serde::Serializer>(bytes: &&[u8], serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_str(&String::from_utf8_lossy(bytes))
}
impl TrailingData<'_> {
  /// The trailing bytes, decoded as (lossy) UTF-8.
  #[inline]
  #[must_use]
  pub fn text(&self) -> String {
    decode_text(self.bytes)
  }
}
impl Debug for TrailingData<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("TrailingData")
      .field("iend_offset", &self.iend_offset)
      .field("data_offset", &self.data_offset)
      .field("bytes", &(&self.bytes[..self.bytes.len().min(12)], self.bytes.len()))
      .finish()
  }
}

/// Searches backward from the end of the file for the last `IEND` tag that
/// has room for a CRC after it, and gives whatever follows that CRC.
///
/// This is a plain byte search, it doesn't walk the chunks. A chunk stream
/// that's been damaged (on purpose or otherwise) can't hide the trailing data.
///
/// ## Failure
/// * [`SleuthError::InvalidFormat`] if the PNG signature is wrong.
///
/// `Ok(None)` means there's no `IEND` tag, or nothing at all after its CRC.
pub fn png_find_trailing_data(bytes: &[u8]) -> SleuthResult<Option<TrailingData<'_>>> {
  const CRC_LEN: usize = 4;
  require_png_signature(bytes)?;
  let Some(searchable) = bytes.len().checked_sub(CRC_LEN).map(|end| &bytes[..end]) else {
    return Ok(None);
  };
  let Some(iend_offset) = searchable.windows(4).rposition(|w| w == PngChunkType::IEND.as_bytes())
  else {
    log::debug!("png: no IEND tag found");
    return Ok(None);
  };
  let data_offset = iend_offset + 4 + CRC_LEN;
  let trailing = &bytes[data_offset..];
  if trailing.is_empty() {
    Ok(None)
  } else {
    log::debug!("png: {} bytes of trailing data at offset {}", trailing.len(), data_offset);
    Ok(Some(TrailingData { iend_offset, data_offset, bytes: trailing }))
  }
}

#[cfg(test)]
mod tests {
  use super::{test_png::*, *};

  #[test]
  fn test_no_trailing_data() {
    let png = minimal_png();
    assert_eq!(png_find_trailing_data(&png), Ok(None));
  }

  #[test]
  fn test_trailing_data_found() {
    let mut png = minimal_png();
    let end = png.len();
    png.extend_from_slice(b"flag{after_the_end}");
    let found = png_find_trailing_data(&png).unwrap().unwrap();
    assert_eq!(found.data_offset, end);
    assert_eq!(found.iend_offset, end - 8);
    assert_eq!(found.bytes, b"flag{after_the_end}");
    assert_eq!(found.text(), "flag{after_the_end}");
  }

  #[test]
  fn test_trailing_single_byte() {
    let mut png = minimal_png();
    png.push(0xFF);
    let found = png_find_trailing_data(&png).unwrap().unwrap();
    assert_eq!(found.bytes, &[0xFF]);
    assert_eq!(found.text(), "\u{FFFD}");
  }

  #[test]
  fn test_last_iend_wins() {
    let mut png = minimal_png();
    // a second IEND chunk after the real one
    png.extend_from_slice(b"junk");
    push_chunk(&mut png, b"IEND", &[]);
    png.extend_from_slice(b"tail");
    let found = png_find_trailing_data(&png).unwrap().unwrap();
    assert_eq!(found.bytes, b"tail");
  }

  #[test]
  fn test_iend_without_room_for_crc_is_ignored() {
    let mut png = minimal_png();
    let real_end = png.len();
    png.extend_from_slice(b"xIEND");
    let found = png_find_trailing_data(&png).unwrap().unwrap();
    assert_eq!(found.data_offset, real_end);
    assert_eq!(found.bytes, b"xIEND");
  }

  #[test]
  fn test_no_iend_at_all() {
    let png = build_png(&[(b"IHDR", &ihdr_data(1, 1, 8, 6)), (b"IDAT", &[0; 4])]);
    assert_eq!(png_find_trailing_data(&png), Ok(None));
  }

  #[test]
  fn test_works_on_broken_chunk_stream() {
    let mut png = PNG_SIGNATURE.to_vec();
    // a length that runs way past the end, so no chunk walk gets anywhere
    png.extend_from_slice(&0xFFFF_FFF0_u32.to_be_bytes());
    png.extend_from_slice(b"IDAT");
    png.extend_from_slice(b"IEND\0\0\0\0hidden");
    assert_eq!(PngRawChunkIter::new(&png).count(), 0);
    let found = png_find_trailing_data(&png).unwrap().unwrap();
    assert_eq!(found.text(), "hidden");
  }

  #[test]
  fn test_short_and_invalid_inputs() {
    assert_eq!(png_find_trailing_data(&PNG_SIGNATURE), Ok(None));
    assert_eq!(png_find_trailing_data(b"IEND\0\0\0\0data"), Err(SleuthError::InvalidFormat));
    assert_eq!(png_find_trailing_data(&[]), Err(SleuthError::InvalidFormat));
  }
}
