pub mod executor;
pub mod fault;
pub mod input;
pub mod oracle;

pub use executor::{ExecError, TargetConfig, TargetExecutor, TerminationOutcome};
pub use input::{InputBuffer, MAX_INPUT_SIZE};
pub use oracle::{CrashOracle, FAULT_SIGNAL, FindingReport, Verdict};
