use core::{fmt, num::TryFromIntError};

/// An error from the `pngsleuth` crate.
///
/// Only the structural problems that make a whole analysis impossible are
/// errors. Everything else (a truncated chunk stream, a text chunk that won't
/// inflate, no trailing data) gets reported as data within the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleuthError {
  /// The bytes don't start with the 8 byte PNG signature.
  InvalidFormat,

  /// The first chunk isn't a complete `IHDR` chunk.
  InvalidHeader,

  /// A pixel buffer's length doesn't match the width and height given for it.
  DimensionsMismatch,
}

/// Shorthand for a `Result` with a [`SleuthError`].
pub type SleuthResult<T> = Result<T, SleuthError>;

impl fmt::Display for SleuthError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::InvalidFormat => "not a valid PNG file",
      Self::InvalidHeader => "invalid PNG: IHDR chunk not found where expected",
      Self::DimensionsMismatch => "pixel buffer length does not match the image dimensions",
    })
  }
}

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
impl std::error::Error for SleuthError {}

impl From<TryFromIntError> for SleuthError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::DimensionsMismatch
  }
}
impl From<bytemuck::PodCastError> for SleuthError {
  #[inline]
  fn from(_: bytemuck::PodCastError) -> Self {
    Self::DimensionsMismatch
  }
}
