use super::*;

/// Shown in place of an `iTXt` payload that failed to inflate.
pub const ITXT_INFLATE_ERROR: &str = "[Error decompressing iTXt]";
/// Shown in place of a `zTXt` payload that failed to inflate.
pub const ZTXT_INFLATE_ERROR: &str = "[Error decompressing zTXt chunk]";
/// Shown in place of a `zTXt` payload with a compression method other than 0.
pub const UNSUPPORTED_COMPRESSION: &str = "[Unsupported compression method]";

/// The three chunk types that carry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(nonstandard_style)]
pub enum TextChunkKind {
  /// Uncompressed text.
  ///
  /// Spec: [tEXt](https://www.w3.org/TR/png/#11tEXt)
  tEXt,
  /// International text, optionally compressed.
  ///
  /// Spec: [iTXt](https://www.w3.org/TR/png/#11iTXt)
  iTXt,
  /// Compressed text.
  ///
  /// Spec: [zTXt](https://www.w3.org/TR/png/#11zTXt)
  zTXt,
}
impl TextChunkKind {
  #[inline]
  #[must_use]
  pub const fn from_chunk_type(ty: PngChunkType) -> Option<Self> {
    match ty.0 {
      [b't', b'E', b'X', b't'] => Some(Self::tEXt),
      [b'i', b'T', b'X', b't'] => Some(Self::iTXt),
      [b'z', b'T', b'X', b't'] => Some(Self::zTXt),
      _ => None,
    }
  }

  #[inline]
  #[must_use]
  pub const fn chunk_type(self) -> PngChunkType {
    match self {
      Self::tEXt => PngChunkType::tEXt,
      Self::iTXt => PngChunkType::iTXt,
      Self::zTXt => PngChunkType::zTXt,
    }
  }
}
impl Display for TextChunkKind {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    Display::fmt(&self.chunk_type(), f)
  }
}

/// The decoded payload of one text chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextChunkEntry {
  pub kind: TextChunkKind,
  /// `None` for `tEXt`, where the whole data (keyword, separator, and text)
  /// is decoded as a single string.
  pub keyword: Option<String>,
  /// `iTXt` only.
  pub language_tag: Option<String>,
  /// `iTXt` only.
  pub translated_keyword: Option<String>,
  /// The decoded text, or one of the placeholder strings if that wasn't
  /// possible.
  pub text: String,
}
impl Display for TextChunkEntry {
  /// `tEXt` shows the raw text, the others show `Keyword: k, Text: t`.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match &self.keyword {
      Some(keyword) => write!(f, "Keyword: {keyword}, Text: {}", self.text),
      None => f.write_str(&self.text),
    }
  }
}

/// The result of scanning a PNG for text chunks.
///
/// "Nothing found" is its own variant so that it can't be confused with an
/// empty list that simply hasn't been filled in yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextPayloads {
  /// The file has no `tEXt`, `iTXt`, or `zTXt` chunks.
  NoneFound,
  /// Entries in the order that the chunks appear in the file.
  Found(Vec<TextChunkEntry>),
}
impl TextPayloads {
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[TextChunkEntry] {
    match self {
      Self::NoneFound => &[],
      Self::Found(entries) => entries,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_none_found(&self) -> bool {
    matches!(self, Self::NoneFound)
  }
}
impl From<Vec<TextChunkEntry>> for TextPayloads {
  #[inline]
  fn from(entries: Vec<TextChunkEntry>) -> Self {
    if entries.is_empty() {
      Self::NoneFound
    } else {
      Self::Found(entries)
    }
  }
}

/// Knobs for text chunk decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextDecodeOptions {
  /// The most bytes that a single compressed payload may inflate to.
  ///
  /// A payload that would go over is treated as a failed decompression. This
  /// keeps a tiny hostile chunk from inflating into gigabytes.
  pub max_inflated_len: usize,
}
impl TextDecodeOptions {
  pub const DEFAULT_MAX_INFLATED_LEN: usize = 8 * 1024 * 1024;
}
impl Default for TextDecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { max_inflated_len: Self::DEFAULT_MAX_INFLATED_LEN }
  }
}

/// Splits at the first null byte, dropping the null. `None` if there isn't one.
#[inline]
fn split_nul(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let i = bytes.iter().position(|&b| b == 0)?;
  Some((&bytes[..i], &bytes[i + 1..]))
}

/// Like [`split_nul`], but a missing null takes the rest of the bytes.
#[inline]
fn split_nul_or_end(bytes: &[u8]) -> (&[u8], &[u8]) {
  split_nul(bytes).unwrap_or((bytes, &[]))
}

#[inline]
fn inflate_text(compressed: &[u8], options: &TextDecodeOptions) -> Option<String> {
  match miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(
    compressed,
    options.max_inflated_len,
  ) {
    Ok(inflated) => Some(decode_text(&inflated)),
    Err(e) => {
      log::warn!("png: text payload failed to inflate: {:?}", e.status);
      None
    }
  }
}

/// Decodes a single text chunk's data.
///
/// Gives `None` if the data is too short to even hold the chunk's fixed fields.
/// Decompression problems are *not* `None`, they give an entry with one of the
/// placeholder strings as the text.
#[must_use]
pub fn decode_text_chunk(
  kind: TextChunkKind, data: &[u8], options: &TextDecodeOptions,
) -> Option<TextChunkEntry> {
  match kind {
    TextChunkKind::tEXt => Some(TextChunkEntry {
      kind,
      keyword: None,
      language_tag: None,
      translated_keyword: None,
      text: decode_text(data),
    }),
    TextChunkKind::iTXt => {
      let (keyword, rest) = split_nul(data)?;
      let (&[compression_flag, compression_method], rest) = rest.split_first_chunk::<2>()?;
      let (language_tag, rest) = split_nul_or_end(rest);
      let (translated_keyword, payload) = split_nul_or_end(rest);
      let text = if compression_flag == 1 && compression_method == 0 {
        inflate_text(payload, options).unwrap_or_else(|| ITXT_INFLATE_ERROR.to_string())
      } else {
        decode_text(payload)
      };
      Some(TextChunkEntry {
        kind,
        keyword: Some(decode_text(keyword)),
        language_tag: Some(decode_text(language_tag)),
        translated_keyword: Some(decode_text(translated_keyword)),
        text,
      })
    }
    TextChunkKind::zTXt => {
      let (keyword, rest) = split_nul(data)?;
      let (&compression_method, compressed) = rest.split_first()?;
      let text = if compression_method == 0 {
        inflate_text(compressed, options).unwrap_or_else(|| ZTXT_INFLATE_ERROR.to_string())
      } else {
        UNSUPPORTED_COMPRESSION.to_string()
      };
      Some(TextChunkEntry {
        kind,
        keyword: Some(decode_text(keyword)),
        language_tag: None,
        translated_keyword: None,
        text,
      })
    }
  }
}

/// Decodes every text chunk in the PNG, with the default options.
#[inline]
pub fn png_get_text_payloads(bytes: &[u8]) -> SleuthResult<TextPayloads> {
  png_get_text_payloads_with(bytes, &TextDecodeOptions::default())
}

/// Decodes every text chunk in the PNG.
///
/// ## Failure
/// * [`SleuthError::InvalidFormat`] if the PNG signature is wrong.
///
/// Nothing else fails. Chunks too malformed to decode are skipped (with a
/// warning logged), and compressed payloads that won't inflate get a
/// placeholder text.
pub fn png_get_text_payloads_with(
  bytes: &[u8], options: &TextDecodeOptions,
) -> SleuthResult<TextPayloads> {
  let mut entries = Vec::new();
  for chunk in png_chunks(bytes)? {
    let Some(kind) = TextChunkKind::from_chunk_type(chunk.chunk_type()) else {
      continue;
    };
    match decode_text_chunk(kind, chunk.data(), options) {
      Some(entry) => entries.push(entry),
      None => log::warn!(
        "png: skipping malformed {} chunk at offset {}",
        kind,
        chunk.data_offset()
      ),
    }
  }
  log::debug!("png: found {} text chunks", entries.len());
  Ok(TextPayloads::from(entries))
}
