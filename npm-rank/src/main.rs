//! Rank npm packages by their recent downloads.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use npm_rank_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Host for the `npm-rank` binary.
///
/// Rankings and reports go to stdout, while errors and the progress bar share stderr.
/// A failed ranking ends the process with status 1.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
