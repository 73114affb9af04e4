use crate::executor::TerminationOutcome;
use crate::input::InputBuffer;
use nix::sys::signal::Signal;
use std::fmt;

/// Signal used to surface a nonzero target exit as a crash of our own.
///
/// The engine watching this process classifies findings by the signal that
/// killed the harness, so an exit code must be translated into a fault; a
/// memory-fault signal is what its crash detector is tuned for.
pub const FAULT_SIGNAL: i32 = Signal::SIGSEGV as i32;

/// A target termination that counts as evidence of a defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingReport {
    /// Human-readable description of how the target terminated.
    pub description: String,
    /// MD5 digest of the payload that triggered the finding, for
    /// deduplication across a campaign's archived diagnostics.
    pub input_hash: String,
    /// Signal the harness must raise against itself to propagate the
    /// finding: the target's own termination signal, or [`FAULT_SIGNAL`]
    /// when the target merely exited nonzero.
    pub signal: i32,
}

impl fmt::Display for FindingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (input {}), propagating crash via signal {}",
            self.description, self.input_hash, self.signal
        )
    }
}

/// What the harness should do with a resolved [`TerminationOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Target exited 0: no finding, the harness exits cleanly.
    Clean,
    /// Target exited nonzero or died on a signal: the harness must
    /// propagate the crash.
    Finding(FindingReport),
    /// Termination could not be classified: an operational error, not a
    /// finding.
    Abnormal,
}

/// Maps a target's termination outcome onto the harness's exit behavior.
///
/// Classification is pure: no verdict here raises anything. The raising
/// side effect lives in [`crate::fault`], so every mapping below is
/// testable in-process.
#[derive(Debug, Default)]
pub struct CrashOracle;

impl CrashOracle {
    pub fn new() -> Self {
        CrashOracle
    }

    pub fn examine(&self, input: &InputBuffer, outcome: TerminationOutcome) -> Verdict {
        match outcome {
            TerminationOutcome::Exited(0) => Verdict::Clean,
            TerminationOutcome::Exited(code) => Verdict::Finding(FindingReport {
                description: format!("target exited with code {code}"),
                input_hash: payload_hash(input),
                signal: FAULT_SIGNAL,
            }),
            TerminationOutcome::Signaled(signal) => Verdict::Finding(FindingReport {
                description: format!("target terminated by signal {signal}"),
                input_hash: payload_hash(input),
                signal,
            }),
            TerminationOutcome::Abnormal => Verdict::Abnormal,
        }
    }
}

fn payload_hash(input: &InputBuffer) -> String {
    format!("{:x}", md5::compute(input.payload()))
}
