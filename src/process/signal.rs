//! SIGALRM plumbing for the command deadline.
//!
//! The handler runs at an unpredictable point relative to the main loop, so
//! everything it touches lives here as atomics and it only calls
//! async-signal-safe functions (`write(2)`, `kill(2)`).
//!
//! Ordering contract with the supervisor: record the command name, spawn,
//! record the pid, then arm the alarm; once `wait` returns, disarm before
//! clearing the pid so a stale deadline can never target a later child.

use crate::process::ProcessError;

use signal_hook::consts::SIGALRM;
use signal_hook::low_level;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, AtomicUsize, Ordering};
use std::sync::Once;

const NAME_MAX: usize = 64;
const TIMED_OUT_SUFFIX: &[u8] = b" is timed out\n";

static ACTIVE_PID: AtomicI32 = AtomicI32::new(0);
static ACTIVE_NAME: [AtomicU8; NAME_MAX] = [const { AtomicU8::new(0) }; NAME_MAX];
static ACTIVE_NAME_LEN: AtomicUsize = AtomicUsize::new(0);

static INSTALL: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the deadline handler. Safe to call before every spawn; the
/// registration itself happens once per process.
pub fn install_deadline_handler() -> Result<(), ProcessError> {
    INSTALL.call_once(|| {
        // The handler only performs async-signal-safe work (see on_deadline).
        let registered = unsafe { low_level::register(SIGALRM, on_deadline) };
        INSTALLED.store(registered.is_ok(), Ordering::SeqCst);
    });

    if INSTALLED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(ProcessError::SignalError(
            "failed to install SIGALRM handler".to_string(),
        ))
    }
}

/// Record the program name used in the timeout diagnostic. Must happen
/// before the deadline is armed; names longer than the buffer are truncated.
pub fn set_active_name(name: &str) {
    let bytes = name.as_bytes();
    let len = bytes.len().min(NAME_MAX);
    for (slot, byte) in ACTIVE_NAME.iter().zip(bytes) {
        slot.store(*byte, Ordering::Relaxed);
    }
    ACTIVE_NAME_LEN.store(len, Ordering::SeqCst);
}

pub fn set_active_pid(pid: i32) {
    ACTIVE_PID.store(pid, Ordering::SeqCst);
}

/// Arm a one-shot deadline for the active child.
pub fn arm(secs: u32) {
    unsafe {
        libc::alarm(secs);
    }
}

/// Cancel any pending deadline and forget the active child, in that order.
pub fn disarm_and_clear() {
    unsafe {
        libc::alarm(0);
    }
    ACTIVE_PID.store(0, Ordering::SeqCst);
}

fn on_deadline() {
    let pid = ACTIVE_PID.load(Ordering::SeqCst);
    if pid <= 0 {
        return;
    }

    let len = ACTIVE_NAME_LEN.load(Ordering::SeqCst).min(NAME_MAX);
    let mut message = [0u8; NAME_MAX + TIMED_OUT_SUFFIX.len()];
    for (dst, src) in message.iter_mut().zip(ACTIVE_NAME.iter().take(len)) {
        *dst = src.load(Ordering::Relaxed);
    }
    message[len..len + TIMED_OUT_SUFFIX.len()].copy_from_slice(TIMED_OUT_SUFFIX);

    unsafe {
        let _ = libc::write(
            libc::STDERR_FILENO,
            message.as_ptr() as *const libc::c_void,
            len + TIMED_OUT_SUFFIX.len(),
        );
        libc::kill(pid, libc::SIGKILL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::supervisor::tests::lock_supervisor;

    #[test]
    fn install_is_idempotent() {
        install_deadline_handler().expect("first install");
        install_deadline_handler().expect("repeated install");
    }

    #[test]
    fn long_names_are_truncated_not_overflowed() {
        let _lock = lock_supervisor();
        let long = "x".repeat(NAME_MAX * 2);
        set_active_name(&long);
        assert_eq!(ACTIVE_NAME_LEN.load(Ordering::SeqCst), NAME_MAX);
        set_active_name("ls");
        assert_eq!(ACTIVE_NAME_LEN.load(Ordering::SeqCst), 2);
    }
}
