/*!
# Plancha: Code Derivation
*/

use super::{
	NUM_SYMBOLS,
	Symbol,
	tree::Node,
};



#[derive(Debug)]
/// # Code Table.
///
/// The bit-string code for every symbol reachable in a tree, stored as one
/// `0`/`1` byte per bit and indexed by symbol. Codes land on distinct leaves
/// so no code can prefix another.
pub(crate) struct CodeTable {
	/// # Codes (Indexed by Symbol).
	codes: [Option<Box<[u8]>>; NUM_SYMBOLS],
}

impl CodeTable {
	/// # Derive From a Tree.
	///
	/// Walk depth-first, appending a `0` on the way left and a `1` on the
	/// way right; each leaf's accumulated trail becomes its code.
	///
	/// A bare-leaf root would come out with an empty code, but the builder
	/// never produces one; EOF always shares the tree with something else.
	pub(crate) fn from_tree(root: &Node) -> Self {
		let mut out = Self { codes: [const { None }; NUM_SYMBOLS] };
		let mut trail: Vec<u8> = Vec::with_capacity(64);
		out.walk(root, &mut trail);
		out
	}

	/// # Walk One Node.
	fn walk(&mut self, node: &Node, trail: &mut Vec<u8>) {
		match node {
			Node::Leaf(sym) => {
				self.codes[sym.idx()].replace(trail.clone().into_boxed_slice());
			},
			Node::Branch(left, right) => {
				trail.push(0);
				self.walk(left, trail);
				trail.pop();

				trail.push(1);
				self.walk(right, trail);
				trail.pop();
			},
		}
	}

	/// # Code For Symbol.
	///
	/// Symbols missing from the tree yield an empty slice; the encoder only
	/// ever asks about symbols it counted.
	pub(crate) fn get(&self, sym: Symbol) -> &[u8] {
		self.codes[sym.idx()].as_deref().unwrap_or(&[])
	}
}



#[cfg(test)]
mod test {
	use crate::huffman::freq::Frequencies;
	use super::*;

	/// # All Derived Codes.
	fn all_codes(table: &CodeTable) -> Vec<&[u8]> {
		table.codes.iter().filter_map(Option::as_deref).collect()
	}

	#[test]
	fn t_aaab_lengths() {
		let tree = Node::build(&Frequencies::count(b"AAAB"));
		let table = CodeTable::from_tree(&tree);

		// The common byte gets the short code.
		assert_eq!(table.get(Symbol::Byte(b'A')), &[1]);
		assert_eq!(table.get(Symbol::Byte(b'B')), &[0, 0]);
		assert_eq!(table.get(Symbol::Eof), &[0, 1]);

		// Uncounted bytes have no code.
		assert!(table.get(Symbol::Byte(b'C')).is_empty());
	}

	#[test]
	fn t_prefix_free() {
		let raw = b"it was the best of times, it was the worst of times";
		let tree = Node::build(&Frequencies::count(raw));
		let table = CodeTable::from_tree(&tree);

		let codes = all_codes(&table);
		for (i, a) in codes.iter().enumerate() {
			assert!(! a.is_empty());
			for (j, b) in codes.iter().enumerate() {
				if i != j {
					assert!(! b.starts_with(a), "code {a:?} prefixes {b:?}");
				}
			}
		}
	}

	#[test]
	fn t_optimality() {
		// "abracadabra": a=5, b=2, r=2, c=1, d=1, EOF=1. The minimal
		// weighted length for those weights is the sum of the internal node
		// weights, 2+3+4+7+12, i.e. 28 bits.
		let raw = b"abracadabra";
		let freq = Frequencies::count(raw);
		let table = CodeTable::from_tree(&Node::build(&freq));

		let mut total: u64 = table.get(Symbol::Eof).len() as u64;
		for (byte, count) in freq.present() {
			total += count * table.get(Symbol::Byte(byte)).len() as u64;
		}
		assert_eq!(total, 28);
	}
}
