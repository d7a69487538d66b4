/*!
# Plancha: Huffman Tree
*/

use crate::error::CodingError;
use std::{
	cmp::{
		Ordering,
		Reverse,
	},
	collections::BinaryHeap,
};
use super::{
	bits::{
		BitReader,
		BitWriter,
	},
	freq::Frequencies,
	Symbol,
};



/// # Deepest Legal Leaf.
///
/// A 257-symbol alphabet cannot place a leaf lower than this; anything deeper
/// in a header is corruption (and would otherwise let hostile input recurse
/// forever).
const MAX_DEPTH: u16 = 256;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Huffman Tree Node.
///
/// Every branch owns exactly two children, so a half-built "null child" tree
/// cannot even be represented, much less traversed.
pub(crate) enum Node {
	/// # Leaf w/ Symbol.
	Leaf(Symbol),

	/// # Internal Branch.
	Branch(Box<Node>, Box<Node>),
}

impl Node {
	/// # Build From Frequencies.
	///
	/// Standard bottom-up construction: queue a leaf per counted byte plus
	/// the EOF marker, then pop the two lightest nodes, merge them (first
	/// popped on the left), and requeue, until a single root remains.
	///
	/// Ties pop in insertion order: bytes ascending, EOF after, merged
	/// branches after that. This keeps the shape identical run after run so
	/// headers and bodies always agree.
	pub(crate) fn build(freq: &Frequencies) -> Self {
		let mut seq: u16 = 0;
		let mut heap: BinaryHeap<Reverse<Weighted>> = BinaryHeap::with_capacity(257);
		for (byte, weight) in freq.present() {
			heap.push(Reverse(Weighted { weight, seq, node: Self::Leaf(Symbol::Byte(byte)) }));
			seq += 1;
		}

		// The EOF marker always rides along with weight one.
		heap.push(Reverse(Weighted { weight: 1, seq, node: Self::Leaf(Symbol::Eof) }));
		seq += 1;

		// Empty inputs leave EOF all alone; pad with an unreachable filler
		// leaf so the tree stays strictly binary and EOF costs one bit.
		if heap.len() == 1 {
			heap.push(Reverse(Weighted { weight: 0, seq, node: Self::Leaf(Symbol::Byte(0)) }));
			seq += 1;
		}

		while let Some(Reverse(a)) = heap.pop() {
			match heap.pop() {
				Some(Reverse(b)) => {
					heap.push(Reverse(Weighted {
						weight: a.weight + b.weight,
						seq,
						node: Self::Branch(Box::new(a.node), Box::new(b.node)),
					}));
					seq += 1;
				},
				None => return a.node,
			}
		}

		// Unreachable; the heap always starts with at least two entries.
		Self::Leaf(Symbol::Eof)
	}

	/// # Serialize (Pre-Order).
	///
	/// Branches write a `0` followed by their left then right subtrees;
	/// leaves write a `1` and the symbol's nine-bit value.
	pub(crate) fn serialize(&self, out: &mut BitWriter) {
		match self {
			Self::Branch(left, right) => {
				out.write_bits(1, 0);
				left.serialize(out);
				right.serialize(out);
			},
			Self::Leaf(sym) => {
				out.write_bits(1, 1);
				out.write_bits(9, sym.bits());
			},
		}
	}

	/// # Deserialize.
	///
	/// Rebuild a tree from its pre-order header, the exact inverse of
	/// [`Node::serialize`].
	///
	/// ## Errors
	///
	/// Exhausting the bit source mid-tree, a nine-bit symbol above 256, and
	/// nesting beyond [`MAX_DEPTH`] are all `MalformedHeader`.
	pub(crate) fn deserialize(bits: &mut BitReader) -> Result<Self, CodingError> {
		Self::deserialize_at(bits, 0)
	}

	/// # Deserialize (One Level).
	fn deserialize_at(bits: &mut BitReader, depth: u16) -> Result<Self, CodingError> {
		if MAX_DEPTH < depth {
			return Err(CodingError::MalformedHeader(bits.bit_pos()));
		}
		match bits.read_bit() {
			Some(false) => {
				let left = Self::deserialize_at(bits, depth + 1)?;
				let right = Self::deserialize_at(bits, depth + 1)?;
				Ok(Self::Branch(Box::new(left), Box::new(right)))
			},
			Some(true) => {
				let raw = bits.read_bits(9)
					.ok_or(CodingError::MalformedHeader(bits.bit_pos()))?;
				Symbol::from_bits(raw)
					.map(Self::Leaf)
					.ok_or(CodingError::MalformedHeader(bits.bit_pos()))
			},
			None => Err(CodingError::MalformedHeader(bits.bit_pos())),
		}
	}
}



/// # Queued Node.
///
/// A heap entry: weight first, insertion sequence second, so equal weights
/// pop first-in-first-out.
struct Weighted {
	/// # Combined Weight.
	weight: u64,

	/// # Insertion Sequence.
	seq: u16,

	/// # The Node Itself.
	node: Node,
}

impl Eq for Weighted {}

impl Ord for Weighted {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.weight, self.seq).cmp(&(other.weight, other.seq))
	}
}

impl PartialEq for Weighted {
	fn eq(&self, other: &Self) -> bool {
		self.weight == other.weight && self.seq == other.seq
	}
}

impl PartialOrd for Weighted {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
