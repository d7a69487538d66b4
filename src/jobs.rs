/*!
# Plancha Job Server
*/

use crate::{
	FileError,
	Mode,
	PlanchaError,
};
use crossbeam_channel::Receiver;
use dactyl::{
	NiceElapsed,
	NiceU64,
	traits::NiceInflection,
};
use fyi_msg::{
	BeforeAfter,
	Msg,
	MsgKind,
	Progless,
};
use std::{
	num::NonZeroUsize,
	path::{
		Path,
		PathBuf,
	},
	sync::{
		Arc,
		atomic::{
			AtomicBool,
			AtomicU64,
			Ordering::{
				Acquire,
				Relaxed,
				SeqCst,
			},
		},
	},
	thread,
};



/// # Progress Counters.
static FAILED: AtomicU64 = AtomicU64::new(0);
static BEFORE: AtomicU64 = AtomicU64::new(0);
static AFTER: AtomicU64 = AtomicU64::new(0);



#[inline(never)]
/// # Crunch Everything!
///
/// This processes each file in `files` in parallel using up to `threads`
/// threads.
pub(super) fn exec(mut threads: NonZeroUsize, mode: Mode, files: &[PathBuf])
-> Result<(), PlanchaError> {
	// Sort out the threads and job server.
	let total = NonZeroUsize::new(files.len()).ok_or(PlanchaError::NoFiles)?;
	if total < threads { threads = total; }

	// Set up the killswitch.
	let killed = Arc::new(AtomicBool::new(false));
	sigint(Arc::clone(&killed), None);

	// Thread business!
	let (tx, rx) = crossbeam_channel::bounded::<&Path>(threads.get());
	thread::scope(#[inline(always)] |s| {
		// Set up the worker threads.
		let mut workers = Vec::with_capacity(threads.get());
		for _ in 0..threads.get() {
			workers.push(s.spawn(#[inline(always)] ||
				while let Ok(p) = rx.recv() {
					if let Err(e) = crate::huffman::crunch(p, mode) {
						Msg::custom("Failed", 208, &format!(
							"{} \x1b[2m({e})\x1b[0m",
							p.to_string_lossy(),
						)).eprint();
					}
				}
			));
		}

		// Push all the files to it, then drop the sender to disconnect.
		for file in files {
			if killed.load(Acquire) || tx.send(file).is_err() { break; }
		}
		drop(tx);

		// Wait for the threads to finish!
		for worker in workers { let _res = worker.join(); }
	});
	drop(rx);

	// Early abort?
	if killed.load(Acquire) { Err(PlanchaError::Killed) }
	else { Ok(()) }
}

#[inline(never)]
/// # Crunch Everything (with Progress)!
///
/// This is the same as `exec`, but includes a progress bar and summary.
pub(super) fn exec_pretty(mut threads: NonZeroUsize, mode: Mode, files: &[PathBuf])
-> Result<(), PlanchaError> {
	#[inline(never)]
	/// # Worker Business.
	///
	/// This is the worker callback; it listens for file paths, crunching them
	/// as they come in.
	fn work(rx: &Receiver::<&Path>, progress: &Progless, mode: Mode) {
		while let Ok(p) = rx.recv() {
			let name = p.to_string_lossy();
			progress.add(&name);

			match crate::huffman::crunch(p, mode) {
				// Happy.
				Ok((b, a)) => {
					BEFORE.fetch_add(b, Relaxed);
					AFTER.fetch_add(a, Relaxed);
				},
				// Sad.
				Err(e) => {
					FAILED.fetch_add(1, Relaxed);
					fail_warn(p, e, progress);
				},
			}

			progress.remove(&name);
		}
	}

	let total = NonZeroUsize::new(files.len()).ok_or(PlanchaError::NoFiles)?;
	if total < threads { threads = total; }

	// Boot up a progress bar.
	let progress = Progless::try_from(total.get())?.with_reticulating_splines("Plancha");

	// Set up the killswitch.
	let killed = Arc::new(AtomicBool::new(false));
	sigint(Arc::clone(&killed), Some(progress.clone()));

	// Thread business!
	let (tx, rx) = crossbeam_channel::bounded::<&Path>(threads.get());
	thread::scope(#[inline(always)] |s| {
		// Set up the worker threads.
		let mut workers = Vec::with_capacity(threads.get());
		for _ in 0..threads.get() {
			workers.push(s.spawn(#[inline(always)] ||
				work(&rx, &progress, mode)
			));
		}

		// Push all the files to it, then drop the sender to disconnect.
		for file in files {
			if killed.load(Acquire) || tx.send(file).is_err() { break; }
		}
		drop(tx);

		// Wait for the threads to finish!
		for worker in workers { let _res = worker.join(); }
	});
	drop(rx);

	// Summarize!
	let elapsed = progress.finish();
	let failed = FAILED.load(Acquire);
	let mut summary =
		if failed == 0 {
			progress.summary(MsgKind::Crunched, "file", "files")
		}
		else {
			// And summarize what we did do.
			Msg::crunched(format!(
				"{}\x1b[2m/\x1b[0m{} in {}.",
				NiceU64::from(total.get() as u64 - failed),
				total.nice_inflect("file", "files"),
				NiceElapsed::from(elapsed),
			))
		};

	// Byte savings only mean something in the compression direction;
	// decompression is supposed to grow things.
	if matches!(mode, Mode::Compress) {
		summary = summary.with_bytes_saved(BeforeAfter::from((
			BEFORE.load(Acquire),
			AFTER.load(Acquire),
		)));
	}
	summary.eprint();

	// Early abort?
	if killed.load(Acquire) { Err(PlanchaError::Killed) }
	else { Ok(()) }
}



#[inline(never)]
/// # Hook Up CTRL+C.
///
/// Once stops processing new items, twice forces immediate shutdown.
fn sigint(killed: Arc<AtomicBool>, progress: Option<Progless>) {
	let _res = ctrlc::set_handler(move ||
		if killed.compare_exchange(false, true, SeqCst, Relaxed).is_ok() {
			if let Some(p) = &progress { p.sigint(); }
		}
		else { std::process::exit(1); }
	);
}

#[cold]
#[inline(never)]
/// # Warn About a Failed File.
fn fail_warn(file: &Path, err: FileError, progress: &Progless) {
	progress.push_msg(Msg::custom("Failed", 208, &format!(
		"{} \x1b[2m({err})\x1b[0m",
		file.to_string_lossy(),
	)), true);
}
