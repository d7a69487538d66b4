/*!
# Plancha: Bit I/O
*/

#[derive(Debug, Clone, Copy)]
/// # Bit Reader.
///
/// An MSB-first bit cursor over a byte slice. Reads return `None` once fewer
/// than the requested bits remain, distinguishing "no more data" from a valid
/// zero. The cursor never advances past a failed read, so `bit_pos` always
/// points at the spot the trouble started.
pub(crate) struct BitReader<'a> {
	/// # Source Bytes.
	raw: &'a [u8],

	/// # Bit Cursor.
	pos: u64,
}

impl<'a> BitReader<'a> {
	/// # New.
	pub(crate) const fn new(raw: &'a [u8]) -> Self {
		Self { raw, pos: 0 }
	}

	/// # Current Bit Position.
	pub(crate) const fn bit_pos(&self) -> u64 { self.pos }

	/// # Read One Bit.
	pub(crate) fn read_bit(&mut self) -> Option<bool> {
		let idx = (self.pos >> 3) as usize;
		if idx < self.raw.len() {
			let bit = self.raw[idx] >> (7 - (self.pos & 7)) & 1;
			self.pos += 1;
			Some(bit == 1)
		}
		else { None }
	}

	/// # Read Bits.
	///
	/// Read `count` (1..=32) bits into the low end of a `u32`, most
	/// significant first.
	pub(crate) fn read_bits(&mut self, count: u32) -> Option<u32> {
		debug_assert!(1 <= count && count <= 32, "BUG: bit reads must be 1..=32.");
		if self.pos + u64::from(count) <= (self.raw.len() as u64) * 8 {
			let mut out: u32 = 0;
			for _ in 0..count {
				let idx = (self.pos >> 3) as usize;
				out = (out << 1) | u32::from(self.raw[idx] >> (7 - (self.pos & 7)) & 1);
				self.pos += 1;
			}
			Some(out)
		}
		else { None }
	}
}



#[derive(Debug, Clone, Default)]
/// # Bit Writer.
///
/// An append-only MSB-first bit sink backed by a `Vec`. The final partial
/// byte, if any, is padded with zero bits; decoding stops at the EOF code so
/// the padding never gets read back.
pub(crate) struct BitWriter {
	/// # Packed Bytes.
	raw: Vec<u8>,

	/// # Bits Written.
	len: u64,
}

impl BitWriter {
	/// # New (w/ Byte Capacity).
	pub(crate) fn with_capacity(cap: usize) -> Self {
		Self { raw: Vec::with_capacity(cap), len: 0 }
	}

	#[cfg(test)]
	/// # Bits Written.
	pub(crate) const fn bit_len(&self) -> u64 { self.len }

	/// # Write One Bit.
	pub(crate) fn write_bit(&mut self, bit: bool) {
		if self.len & 7 == 0 { self.raw.push(0); }
		if bit {
			let idx = (self.len >> 3) as usize;
			self.raw[idx] |= 1 << (7 - (self.len & 7));
		}
		self.len += 1;
	}

	/// # Write Bits.
	///
	/// Append the low `count` (1..=32) bits of `value`, most significant
	/// first.
	pub(crate) fn write_bits(&mut self, count: u32, value: u32) {
		debug_assert!(1 <= count && count <= 32, "BUG: bit writes must be 1..=32.");
		for shift in (0..count).rev() {
			self.write_bit(value >> shift & 1 == 1);
		}
	}

	/// # Write a Derived Code.
	///
	/// Codes come out of the table as one `0`/`1` byte per bit.
	pub(crate) fn write_code(&mut self, code: &[u8]) {
		for &b in code { self.write_bit(b == 1); }
	}

	/// # Finish.
	///
	/// Consume the writer, returning the packed (zero-padded) bytes.
	pub(crate) fn finish(self) -> Vec<u8> { self.raw }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_round_trip() {
		let mut w = BitWriter::with_capacity(8);
		w.write_bits(32, 0xFACE_8201);
		w.write_bits(9, 256);
		w.write_bit(true);
		assert_eq!(w.bit_len(), 42);

		let raw = w.finish();
		assert_eq!(raw.len(), 6, "42 bits should pack into 6 bytes.");

		let mut r = BitReader::new(&raw);
		assert_eq!(r.read_bits(32), Some(0xFACE_8201));
		assert_eq!(r.read_bits(9), Some(256));
		assert_eq!(r.read_bit(), Some(true));
		assert_eq!(r.bit_pos(), 42);

		// Six remaining pad bits, all zero.
		assert_eq!(r.read_bits(6), Some(0));

		// And now nothing.
		assert_eq!(r.read_bit(), None);
		assert_eq!(r.bit_pos(), 48);
	}

	#[test]
	fn t_sentinel() {
		let raw = [0b1010_1010];
		let mut r = BitReader::new(&raw);

		// Too big a bite leaves the cursor alone.
		assert_eq!(r.read_bits(9), None);
		assert_eq!(r.bit_pos(), 0);

		assert_eq!(r.read_bits(8), Some(0b1010_1010));
		assert_eq!(r.read_bits(1), None);
		assert_eq!(r.read_bit(), None);
	}

	#[test]
	fn t_write_code() {
		let mut w = BitWriter::with_capacity(1);
		w.write_code(&[1, 0, 1, 1]);
		assert_eq!(w.bit_len(), 4);
		assert_eq!(w.finish(), vec![0b1011_0000]);
	}

	#[test]
	fn t_msb_order() {
		let mut w = BitWriter::with_capacity(1);
		w.write_bits(3, 0b110);
		let raw = w.finish();
		assert_eq!(raw, vec![0b1100_0000]);

		let mut r = BitReader::new(&raw);
		assert_eq!(r.read_bit(), Some(true));
		assert_eq!(r.read_bit(), Some(true));
		assert_eq!(r.read_bit(), Some(false));
	}
}
