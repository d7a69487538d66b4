/*!
# Plancha: Errors
*/

use argyle::ArgyleError;
use fyi_msg::ProglessError;
use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Coding Errors.
///
/// Fatal failures raised while parsing a compressed stream. There is no
/// partial recovery; a corrupt bitstream carries no redundancy to fall back
/// on, so decoding aborts at the point of detection.
///
/// Each variant carries the offending value or bit position for reporting.
pub(crate) enum CodingError {
	/// # Wrong Magic Number.
	///
	/// `None` means the stream was too short to hold one at all.
	BadMagic(Option<u32>),

	/// # Unterminatable Tree.
	CorruptTree(u64),

	/// # Tree Header Ended Early.
	MalformedHeader(u64),

	/// # Body Ended Before the EOF Code.
	TruncatedStream(u64),
}

impl Error for CodingError {}

impl fmt::Display for CodingError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::BadMagic(Some(n)) => write!(f, "invalid magic number 0x{n:08x}"),
			Self::BadMagic(None) => f.write_str("stream too short to hold a magic number"),
			Self::CorruptTree(pos) => write!(f, "tree cannot terminate decoding (bit {pos})"),
			Self::MalformedHeader(pos) => write!(f, "tree header ended early (bit {pos})"),
			Self::TruncatedStream(pos) => write!(f, "stream ended before the EOF code (bit {pos})"),
		}
	}
}



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Per-File Errors.
///
/// Individual files can fail without sinking the rest of the run; these get
/// counted and warned about, nothing more.
pub(crate) enum FileError {
	/// # Decoding Failure.
	Coding(CodingError),

	/// # Read Error.
	Read,

	/// # Missing Suffix.
	Suffix,

	/// # Vanished.
	Vanished,

	/// # Write Error.
	Write,
}

impl Error for FileError {}

impl fmt::Display for FileError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Coding(e) => e.fmt(f),
			Self::Read => f.write_str("read error"),
			Self::Suffix => f.write_str("missing .huf suffix"),
			Self::Vanished => f.write_str("vanished!"),
			Self::Write => f.write_str("write error"),
		}
	}
}

impl From<CodingError> for FileError {
	#[inline]
	fn from(err: CodingError) -> Self { Self::Coding(err) }
}



#[derive(Debug, Copy, Clone)]
/// # General/Deal-Breaking Errors.
pub(crate) enum PlanchaError {
	/// # Argyle Passthrough.
	Argue(ArgyleError),

	/// # Killed Early.
	Killed,

	/// # No Files.
	NoFiles,

	/// # Progress Passthrough.
	Progress(ProglessError),

	/// # Invalid Thread Count.
	Threads,
}

impl AsRef<str> for PlanchaError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl Error for PlanchaError {}

impl fmt::Display for PlanchaError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<ArgyleError> for PlanchaError {
	#[inline]
	fn from(err: ArgyleError) -> Self { Self::Argue(err) }
}

impl From<ProglessError> for PlanchaError {
	#[inline]
	fn from(err: ProglessError) -> Self { Self::Progress(err) }
}

impl PlanchaError {
	#[must_use]
	/// # As Str.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Argue(e) => e.as_str(),
			Self::Killed => "The process was aborted early.",
			Self::NoFiles => "No files were found.",
			Self::Progress(e) => e.as_str(),
			Self::Threads => "Thread counts must be at least one.",
		}
	}
}
