use super::*;

/// An unparsed chunk from a PNG.
///
/// The offsets are relative to the start of the whole file (signature
/// included), so they can be shown to a user who's poking at the file with a
/// hex editor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) type_: PngChunkType,
  pub(crate) data_offset: usize,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl<'b> PngRawChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngChunkType {
    self.type_
  }

  /// The length field, which is the number of data bytes.
  #[inline]
  #[must_use]
  pub const fn length(&self) -> u32 {
    // the walker only produces chunks whose length came from a u32
    self.data.len() as u32
  }

  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }

  /// Offset of the first data byte within the file.
  #[inline]
  #[must_use]
  pub const fn data_offset(&self) -> usize {
    self.data_offset
  }

  /// Offset of the CRC within the file.
  #[inline]
  #[must_use]
  pub const fn crc_offset(&self) -> usize {
    self.data_offset + self.data.len()
  }

  /// The CRC value stored in the file (it is not checked against the data).
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data_offset", &self.data_offset)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Iteration stops at the end of the data, or as soon as a chunk would run
/// past the end of the data. In the second case the partial chunk is *not*
/// produced, and [`is_truncated`](Self::is_truncated) will return `true` once
/// the iterator is exhausted.
///
/// The iterator doesn't stop at `IEND`, so chunk-shaped data placed after the
/// end of the image will also be walked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngRawChunkIter<'b> {
  bytes: &'b [u8],
  offset: usize,
}
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, the walk begins just past the PNG signature.
  ///
  /// The signature itself is not checked, see [`png_chunks`] for that.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, offset: PNG_SIGNATURE.len() }
  }

  /// The file offset of the next chunk that would be read.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }

  /// If bytes remain that couldn't be read as a complete chunk.
  ///
  /// This is only meaningful after the iterator has returned `None`.
  #[inline]
  #[must_use]
  pub const fn is_truncated(&self) -> bool {
    self.offset < self.bytes.len()
  }

  #[inline]
  fn remaining(&self) -> &'b [u8] {
    self.bytes.get(self.offset..).unwrap_or(&[])
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let rest = self.remaining();
    if rest.is_empty() {
      return None;
    }
    let (len_bytes, rest) = split_array::<4>(rest)?;
    let chunk_len = u32::from_be_bytes(len_bytes) as usize;
    let (type_bytes, rest) = split_array::<4>(rest)?;
    if rest.len() < chunk_len {
      log::debug!(
        "png: {:?} chunk at offset {} declares {} bytes but only {} remain",
        PngChunkType(type_bytes),
        self.offset,
        chunk_len,
        rest.len()
      );
      return None;
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, _) = split_array::<4>(rest)?;
    let chunk = PngRawChunk {
      type_: PngChunkType(type_bytes),
      data_offset: self.offset + 8,
      data,
      declared_crc: u32::from_be_bytes(crc_bytes),
    };
    self.offset += 8 + chunk_len + 4;
    log::trace!("png: {chunk:?}");
    Some(chunk)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some(self.remaining().len() / 12))
  }
}
impl core::iter::FusedIterator for PngRawChunkIter<'_> {}

#[inline]
fn split_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    Some((head.try_into().ok()?, tail))
  } else {
    None
  }
}

/// Checks the PNG signature and then gives a chunk iterator.
#[inline]
pub fn png_chunks(bytes: &[u8]) -> SleuthResult<PngRawChunkIter<'_>> {
  require_png_signature(bytes)?;
  Ok(PngRawChunkIter::new(bytes))
}
