use nix::sys::signal::{Signal, raise};

/// Terminates the current process by raising `signo` against it.
///
/// The engine supervising the harness classifies findings by the signal
/// that killed this process, not by its exit code. This is the only
/// function in the crate that induces self-termination.
///
/// Falls through to `abort()` when `signo` is not a representable signal,
/// the raise fails, or the raised signal's disposition leaves the process
/// alive. A finding never degrades into a normal exit.
pub fn propagate(signo: i32) -> ! {
    if let Ok(signal) = Signal::try_from(signo) {
        let _ = raise(signal);
    }
    std::process::abort();
}
