//! tkn-graph - Inspect Tekton YAML resources and pipeline task graphs

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tkn_graph::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
