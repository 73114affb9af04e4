use crashgate_core::executor::{TargetConfig, TargetExecutor};
use crashgate_core::input::InputBuffer;
use crashgate_core::oracle::{CrashOracle, Verdict};

use anyhow::anyhow;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

/// Fuzzing-harness adapter: forwards one engine-generated input to the
/// analysis target and propagates any target crash as its own.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// File holding the raw input bytes to hand to the target.
    input_file: PathBuf,
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        // Usage errors exit 1, not clap's default 2: the engine treats 1
        // as "operational error, discard this input".
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = parse_args();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let input = InputBuffer::load(&cli.input_file);
    if input.is_empty() {
        return Err(anyhow!("no input read from {:?}", cli.input_file));
    }

    let executor = TargetExecutor::new(TargetConfig::default());
    let outcome = executor.execute(&input)?;

    match CrashOracle::new().examine(&input, outcome) {
        Verdict::Clean => Ok(()),
        Verdict::Finding(report) => {
            log::error!("{report}");
            crashgate_core::fault::propagate(report.signal);
        }
        Verdict::Abnormal => Err(anyhow!("target terminated abnormally")),
    }
}
