/*!
# Plancha: Huffman Coding!
*/

pub(super) mod bits;
pub(super) mod code;
pub(super) mod freq;
pub(super) mod tree;



use bits::{
	BitReader,
	BitWriter,
};
use code::CodeTable;
use crate::error::{
	CodingError,
	FileError,
};
use freq::Frequencies;
use std::path::{
	Path,
	PathBuf,
};
use tree::Node;



/// # Magic Number.
///
/// The first thirty-two bits of every compressed stream. Anything else gets
/// rejected before a single tree bit is read.
pub(crate) const MAGIC: u32 = 0xFACE_8201;

/// # Total Symbol Space.
///
/// The 256 byte values plus the end-of-file marker.
pub(crate) const NUM_SYMBOLS: usize = 257;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Crunch Direction.
pub(crate) enum Mode {
	/// # Compress.
	Compress,

	/// # Decompress.
	Decompress,
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Coding Symbol.
///
/// A literal byte value or the synthetic end-of-file marker whose code
/// terminates every encoded stream (and lets the trailing pad bits go
/// unread).
pub(crate) enum Symbol {
	/// # Literal Byte.
	Byte(u8),

	/// # End of File.
	Eof,
}

impl Symbol {
	/// # Table Index.
	pub(crate) const fn idx(self) -> usize {
		match self {
			Self::Byte(b) => b as usize,
			Self::Eof => 256,
		}
	}

	/// # Nine-Bit Wire Value.
	pub(crate) const fn bits(self) -> u32 { self.idx() as u32 }

	/// # From Nine-Bit Wire Value.
	///
	/// Nine bits can hold 257–511 too; those have no symbol and come back
	/// `None`.
	pub(crate) const fn from_bits(raw: u32) -> Option<Self> {
		match raw {
			0..=255 => Some(Self::Byte(raw as u8)),
			256 => Some(Self::Eof),
			_ => None,
		}
	}
}



#[inline(never)]
/// # Crunch a File.
///
/// Read the file, compress or decompress it per `mode`, and atomically write
/// the result: `<path>.huf` when compressing, the `.huf`-stripped original
/// path when expanding.
///
/// The before and after sizes are returned unless there's an error.
pub(crate) fn crunch(file: &Path, mode: Mode) -> Result<(u64, u64), FileError> {
	let raw = std::fs::read(file).map_err(|_|
		if file.is_file() { FileError::Read }
		else { FileError::Vanished }
	)?;

	let (dst, out) = match mode {
		Mode::Compress => (suffixed(file), encode(&raw)),
		Mode::Decompress => (
			unsuffixed(file).ok_or(FileError::Suffix)?,
			decode(&raw)?,
		),
	};

	write_atomic::write_file(&dst, &out)
		.map(|()| (raw.len() as u64, out.len() as u64))
		.map_err(|_| FileError::Write)
}

/// # Encode.
///
/// Compress `raw` into a standalone stream: magic number, serialized tree,
/// then each byte's code in input order, the EOF code, and zero-padding to
/// the byte boundary.
pub(crate) fn encode(raw: &[u8]) -> Vec<u8> {
	let freq = Frequencies::count(raw);
	let root = Node::build(&freq);
	let codes = CodeTable::from_tree(&root);

	let mut out = BitWriter::with_capacity(64 + (raw.len() >> 1));
	out.write_bits(32, MAGIC);
	root.serialize(&mut out);
	for &b in raw { out.write_code(codes.get(Symbol::Byte(b))); }
	out.write_code(codes.get(Symbol::Eof));
	out.finish()
}

/// # Decode.
///
/// The inverse of [`encode`]: verify the magic number, rebuild the tree,
/// then walk it bit by bit (left on `0`, right on `1`), emitting a byte at
/// each leaf until the EOF leaf turns up.
///
/// ## Errors
///
/// Every corruption class aborts immediately without emitting anything past
/// the point of detection: `BadMagic` for a foreign stream, `MalformedHeader`
/// for an incomplete tree, `CorruptTree` for a tree that cannot terminate,
/// and `TruncatedStream` for a body that dries up before EOF.
pub(crate) fn decode(raw: &[u8]) -> Result<Vec<u8>, CodingError> {
	let mut bits = BitReader::new(raw);
	match bits.read_bits(32) {
		Some(MAGIC) => {},
		Some(n) => return Err(CodingError::BadMagic(Some(n))),
		None => return Err(CodingError::BadMagic(None)),
	}

	let root = Node::deserialize(&mut bits)?;

	// The grammar admits a bare-leaf header even though the encoder never
	// writes one. A lone EOF decodes to nothing; a lone byte could never
	// terminate.
	if let Node::Leaf(sym) = &root {
		return
			if matches!(sym, Symbol::Eof) { Ok(Vec::new()) }
			else { Err(CodingError::CorruptTree(bits.bit_pos())) };
	}

	let mut out: Vec<u8> = Vec::with_capacity(raw.len() << 1);
	let mut curr = &root;
	loop {
		match curr {
			Node::Leaf(Symbol::Eof) => break,
			Node::Leaf(Symbol::Byte(b)) => {
				out.push(*b);
				curr = &root;
			},
			Node::Branch(left, right) => match bits.read_bit() {
				Some(false) => { curr = left; },
				Some(true) => { curr = right; },
				None => return Err(CodingError::TruncatedStream(bits.bit_pos())),
			},
		}
	}

	Ok(out)
}



/// # Compressed Destination.
///
/// Tack `.huf` onto the source path.
fn suffixed(src: &Path) -> PathBuf {
	let mut raw = src.as_os_str().to_owned();
	raw.push(".huf");
	PathBuf::from(raw)
}

/// # Decompressed Destination.
///
/// Strip the trailing `.huf`, or `None` if there wasn't one.
fn unsuffixed(src: &Path) -> Option<PathBuf> {
	let ext = src.extension()?;
	if ext.eq_ignore_ascii_case("huf") { Some(src.with_extension("")) }
	else { None }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_round_trip() {
		// A 64KiB spread hitting every byte value unevenly.
		let mut noisy: Vec<u8> = Vec::with_capacity(65_536);
		let mut x: u32 = 1;
		for _ in 0..65_536 {
			x = x.wrapping_mul(75).wrapping_add(74) % 65_537;
			noisy.push(x as u8);
		}

		for raw in [
			&b""[..],
			b"A",
			b"AAAB",
			b"abracadabra",
			b"it was the best of times, it was the worst of times",
			&[0, 0, 255, 255, 128, 7],
			&noisy,
		] {
			let packed = encode(raw);
			assert_eq!(decode(&packed).as_deref(), Ok(raw), "round trip failed");

			// Same input, same bytes.
			assert_eq!(packed, encode(raw));
		}
	}

	#[test]
	fn t_empty() {
		// Zero bytes in, zero bytes out, but the stream still has a valid
		// tree: magic (32) + header (21) + the EOF code (1) = 54 bits.
		let packed = encode(&[]);
		assert_eq!(packed.len(), 7);
		assert_eq!(decode(&packed), Ok(Vec::new()));
	}

	#[test]
	fn t_single_symbol() {
		let raw = [b'A'; 1000];
		let packed = encode(&raw);

		// Two-leaf tree, one bit per byte: the result had better be a lot
		// smaller than the original.
		assert!(packed.len() < 1000, "{} bytes?!", packed.len());
		assert_eq!(decode(&packed).as_deref(), Ok(&raw[..]));
	}

	#[test]
	fn t_aaab() {
		// Magic (32) + header (2 branch bits, 3 ten-bit leaves) + body
		// (1+1+1+2 data bits, 2 EOF bits) = 71 bits, padded to 9 bytes. The
		// seven-bit body is well under the 32 bits a literal encoding of
		// four bytes would need, even though the total (with header) isn't.
		let packed = encode(b"AAAB");
		assert_eq!(packed.len(), 9);
		assert_eq!(decode(&packed).as_deref(), Ok(&b"AAAB"[..]));
	}

	#[test]
	fn t_bad_magic() {
		let mut packed = encode(b"AAAB");
		packed[0] ^= 0b0100_0000;
		assert!(matches!(
			decode(&packed),
			Err(CodingError::BadMagic(Some(_))),
		));

		// Too short to even hold a magic number.
		assert_eq!(decode(&[]), Err(CodingError::BadMagic(None)));
		assert_eq!(decode(&[0xFA, 0xCE]), Err(CodingError::BadMagic(None)));
	}

	#[test]
	fn t_corrupt_tree() {
		// A header that is a bare byte leaf can never reach EOF.
		let mut w = BitWriter::with_capacity(8);
		w.write_bits(32, MAGIC);
		w.write_bits(1, 1);
		w.write_bits(9, u32::from(b'A'));
		assert!(matches!(
			decode(&w.finish()),
			Err(CodingError::CorruptTree(_)),
		));

		// A bare EOF leaf is pointless but harmless: the empty stream.
		let mut w = BitWriter::with_capacity(8);
		w.write_bits(32, MAGIC);
		w.write_bits(1, 1);
		w.write_bits(9, 256);
		assert_eq!(decode(&w.finish()), Ok(Vec::new()));
	}

	#[test]
	fn t_truncated_header() {
		// Five bytes leaves eight bits of tree: a branch, a leaf marker,
		// and not enough room for its nine-bit symbol.
		let packed = encode(b"AAAB");
		assert!(matches!(
			decode(&packed[..5]),
			Err(CodingError::MalformedHeader(_)),
		));
	}

	#[test]
	fn t_truncated_stream() {
		// 1000 A's encode to one-bit codes; chopping tail bytes leaves the
		// decoder mid-walk with no EOF in sight.
		let packed = encode(&[b'A'; 1000]);
		assert!(100 < packed.len());
		assert!(matches!(
			decode(&packed[..100]),
			Err(CodingError::TruncatedStream(_)),
		));
	}

	#[test]
	fn t_crunch() {
		let dir = std::env::temp_dir();
		let src = dir.join("plancha-t-crunch.bin");
		let packed = dir.join("plancha-t-crunch.bin.huf");
		let raw = b"hello hello hello hello";

		std::fs::write(&src, raw).unwrap();
		let (before, after) = crunch(&src, Mode::Compress).unwrap();
		assert_eq!(before, raw.len() as u64);
		assert!(packed.is_file());

		// Expand it back over the original.
		std::fs::remove_file(&src).unwrap();
		let (b2, a2) = crunch(&packed, Mode::Decompress).unwrap();
		assert_eq!(b2, after);
		assert_eq!(a2, before);
		assert_eq!(std::fs::read(&src).unwrap(), raw);

		let _res = std::fs::remove_file(&src);
		let _res = std::fs::remove_file(&packed);
	}

	#[test]
	fn t_suffixes() {
		assert_eq!(
			suffixed(Path::new("/foo/bar.txt")),
			PathBuf::from("/foo/bar.txt.huf"),
		);
		assert_eq!(
			unsuffixed(Path::new("/foo/bar.txt.huf")),
			Some(PathBuf::from("/foo/bar.txt")),
		);
		assert_eq!(unsuffixed(Path::new("/foo/bar.txt")), None);
		assert_eq!(unsuffixed(Path::new("/foo/bar")), None);
	}
}
