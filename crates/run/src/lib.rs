//! # lumpr-run
//!
//! Runs LUMPREM, LUMPREP and `lr2series` as blocking subprocesses inside a
//! workspace directory, answering their prompts through standard input.

mod error;
mod process;

pub use error::RunError;
pub use process::{ProcessOutput, run_lr2series, run_lumprem, run_lumprep, run_process};
