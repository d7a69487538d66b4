/*!
# Plancha: Frequency Counting
*/

#[derive(Debug, Clone)]
/// # Byte Frequency Table.
///
/// Occurrence counts for each of the 256 byte values, tallied in a single
/// pass. The end-of-file symbol is never counted here; the tree builder
/// weights it separately (always one) so it is guaranteed a code.
pub(crate) struct Frequencies {
	/// # Counts (Indexed by Byte).
	counts: [u64; 256],
}

impl Frequencies {
	/// # Count 'Em Up.
	pub(crate) fn count(raw: &[u8]) -> Self {
		let mut counts = [0_u64; 256];
		for &b in raw { counts[b as usize] += 1; }
		Self { counts }
	}

	/// # Present Bytes.
	///
	/// Yield each byte with a non-zero count, in ascending byte order.
	pub(crate) fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
		self.counts.iter()
			.copied()
			.enumerate()
			.filter_map(|(b, count)|
				if count == 0 { None }
				else { Some((b as u8, count)) }
			)
	}

	#[cfg(test)]
	/// # Count For Byte.
	pub(crate) const fn get(&self, byte: u8) -> u64 { self.counts[byte as usize] }
}
