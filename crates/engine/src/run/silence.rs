//! File-descriptor level output silencing.
//!
//! Analyses are free to print to stdout or stderr while they work; left
//! alone, that chatter would interleave with the engine's own report.
//! [`SilenceGuard`] swaps both descriptors onto `/dev/null` for the
//! lifetime of a batch and restores the originals when dropped, on every
//! exit path including panics unwinding through the runner. A process-wide
//! lock serializes guards so two batches can never fight over the saved
//! descriptors.

use std::io::{self, Write};

use parking_lot::{Mutex, MutexGuard};

static SILENCE_LOCK: Mutex<()> = Mutex::new(());

/// Scoped stdout/stderr redirection to `/dev/null`.
pub struct SilenceGuard {
    saved_stdout: i32,
    saved_stderr: i32,
    _batch: MutexGuard<'static, ()>,
}

impl SilenceGuard {
    /// Silences both streams until the returned guard is dropped.
    ///
    /// Blocks if another guard is alive. Fails without touching the
    /// streams when the descriptors cannot be duplicated.
    pub fn acquire() -> io::Result<Self> {
        let batch = SILENCE_LOCK.lock();

        io::stdout().flush()?;
        io::stderr().flush()?;

        let saved_stdout = unsafe { libc::dup(libc::STDOUT_FILENO) };
        if saved_stdout < 0 {
            return Err(io::Error::last_os_error());
        }
        let saved_stderr = unsafe { libc::dup(libc::STDERR_FILENO) };
        if saved_stderr < 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(saved_stdout) };
            return Err(err);
        }

        let devnull = unsafe { libc::open(b"/dev/null\0".as_ptr().cast(), libc::O_WRONLY) };
        if devnull < 0 {
            let err = io::Error::last_os_error();
            unsafe {
                libc::close(saved_stdout);
                libc::close(saved_stderr);
            }
            return Err(err);
        }

        let redirected_out = unsafe { libc::dup2(devnull, libc::STDOUT_FILENO) };
        let redirected_err = unsafe { libc::dup2(devnull, libc::STDERR_FILENO) };
        unsafe { libc::close(devnull) };
        if redirected_out < 0 || redirected_err < 0 {
            let err = io::Error::last_os_error();
            unsafe {
                libc::dup2(saved_stdout, libc::STDOUT_FILENO);
                libc::dup2(saved_stderr, libc::STDERR_FILENO);
                libc::close(saved_stdout);
                libc::close(saved_stderr);
            }
            return Err(err);
        }

        Ok(Self {
            saved_stdout,
            saved_stderr,
            _batch: batch,
        })
    }
}

impl Drop for SilenceGuard {
    fn drop(&mut self) {
        // Flush anything buffered into /dev/null before the real streams
        // come back; the batch lock is released only after restoration.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        unsafe {
            libc::dup2(self.saved_stdout, libc::STDOUT_FILENO);
            libc::dup2(self.saved_stderr, libc::STDERR_FILENO);
            libc::close(self.saved_stdout);
            libc::close(self.saved_stderr);
        }
    }
}
