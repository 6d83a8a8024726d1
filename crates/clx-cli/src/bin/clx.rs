#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use clx_cli::args::{CliArgs, Emit};
use clx_cli::driver::{self, RunResult};
use clx_cli::reporter::Reporter;

const EXIT_SUCCESS: u8 = 0;
const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    // Active only when CLX_LOG or RUST_LOG is set.
    clx_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    let result = driver::run(args)?;
    let stdout = std::io::stdout();
    let color = !args.no_color && stdout.is_terminal();
    let rendered = render_diagnostics(&result, color);

    let mut out = stdout.lock();
    match args.emit {
        Emit::Ast => {
            let ast = driver::ast_output(&result);
            let text = if args.pretty {
                serde_json::to_string_pretty(&ast)?
            } else {
                serde_json::to_string(&ast)?
            };
            writeln!(out, "{text}")?;
            if !rendered.is_empty() {
                eprintln!("{rendered}");
            }
        }
        Emit::Diagnostics => {
            if !rendered.is_empty() {
                writeln!(out, "{rendered}")?;
            }
        }
    }

    let count = result.diagnostic_count();
    if count > 0 {
        eprintln!("\nFound {count} error{}.", if count == 1 { "" } else { "s" });
        Ok(EXIT_DIAGNOSTICS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn render_diagnostics(result: &RunResult, color: bool) -> String {
    let mut reporter = Reporter::new(color);
    for file in &result.files {
        reporter.add_source(file.file_name.clone(), file.source.clone());
    }
    let diagnostics: Vec<_> = result.diagnostics().cloned().collect();
    reporter.render(&diagnostics)
}
