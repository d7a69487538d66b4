/*!
# Plancha

Plancha is a simple CLI tool for Huffman-coding arbitrary files, squeezing
them flat or puffing them back up again.
*/

#![forbid(unsafe_code)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_pub_crate)]



mod error;
mod huffman;
mod jobs;

pub(crate) use error::{
	FileError,
	PlanchaError,
};
pub(crate) use huffman::Mode;

use argyle::{
	Argue,
	ArgyleError,
	FLAG_HELP,
	FLAG_REQUIRED,
	FLAG_VERSION,
};
use dactyl::traits::BytesToUnsigned;
use dowser::{
	Dowser,
	Extension,
};
use fyi_msg::Msg;
use std::{
	num::NonZeroUsize,
	path::{
		Path,
		PathBuf,
	},
};



/// # Extension: HUF.
const E_HUF: Extension = Extension::new3(*b"huf");



/// # Main.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(PlanchaError::Argue(ArgyleError::WantsVersion)) => {
			println!(concat!("Plancha v", env!("CARGO_PKG_VERSION")));
		},
		Err(PlanchaError::Argue(ArgyleError::WantsHelp)) => { helper(); },
		Err(e) => { Msg::error(e.as_str()).die(1); },
	}
}

#[inline(never)]
/// # Actual Main.
fn _main() -> Result<(), PlanchaError> {
	// Parse CLI arguments.
	let args = Argue::new(FLAG_HELP | FLAG_REQUIRED | FLAG_VERSION)?
		.with_list();

	// Which way are we going?
	let mode =
		if args.switch2(b"-d", b"--decompress") { Mode::Decompress }
		else { Mode::Compress };

	// How many threads?
	let threads = match args.option(b"-j") {
		Some(n) => usize::btou(n)
			.and_then(NonZeroUsize::new)
			.ok_or(PlanchaError::Threads)?,
		None => std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
	};

	// Put it all together!
	let mut paths: Vec<PathBuf> = Dowser::default()
		.with_paths(args.args_os())
		.filter(|p| wanted(mode, p))
		.collect();
	if paths.is_empty() { return Err(PlanchaError::NoFiles); }
	paths.sort();

	// Crunch!
	if args.switch2(b"-p", b"--progress") {
		jobs::exec_pretty(threads, mode, &paths)
	}
	else {
		jobs::exec(threads, mode, &paths)
	}
}

/// # Wanted Path?
///
/// Compression takes any file that doesn't already end in `.huf`;
/// decompression takes only the ones that do.
fn wanted(mode: Mode, path: &Path) -> bool {
	let huf = Some(E_HUF) == Extension::try_from3(path);
	match mode {
		Mode::Compress => ! huf,
		Mode::Decompress => huf,
	}
}

#[cold]
/// # Print Help.
fn helper() {
	println!(concat!(
		r"
      _______
     /  ___  \
    /  /   \__\     ", "\x1b[38;5;199mPlancha\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r"
   /  /_________    Huffman-code the mierda
  /  __________  \  out of your files.
 /__/          \__\
 '--------------'

USAGE:
    plancha [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -d, --decompress  Expand .huf file(s) back to their original form
                      (instead of compressing).
    -h, --help        Print help information and exit.
    -p, --progress    Show pretty progress while crunching.
    -V, --version     Print version information and exit.

OPTIONS:
    -j <NUM>          Limit parallelization to this many threads (at
                      least one). Defaults to the number of logical
                      cores.
    -l, --list <FILE> Read (absolute) file and/or directory paths from
                      this text file, one entry per line, instead of
                      or in addition to the trailing <PATH(S)>.

ARGS:
    <PATH(S)>...      One or more file and/or directory paths to
                      crunch, recursively.

EARLY EXIT:
    Press CTRL+C once to stop processing new files (while letting any
    in-progress operations finish). Press it twice to abort everything
    immediately.
"
	));
}
