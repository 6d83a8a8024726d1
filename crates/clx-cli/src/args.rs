use clap::{Parser, ValueEnum};
use clx_classes::SyntaxOptions;
use clx_parser::NodeConvention;
use std::path::PathBuf;

/// CLI arguments for the clx binary.
#[derive(Parser, Debug)]
#[command(
    name = "clx",
    version,
    about = "Parse JavaScript with configurable class-syntax extensions"
)]
pub struct CliArgs {
    /// Built-in syntax profile: default, minimal, my or internal.
    #[arg(long)]
    pub profile: Option<String>,

    /// Override the hidden member access operator (e.g. `->`, `::`).
    #[arg(long, allow_hyphen_values = true)]
    pub operator: Option<String>,

    /// Override the keyword that introduces instance variables.
    #[arg(long = "instance-keyword")]
    pub instance_keyword: Option<String>,

    /// Override the keyword that marks hidden methods.
    #[arg(long = "hidden-keyword")]
    pub hidden_keyword: Option<String>,

    /// Reject initializers on instance variable declarations.
    #[arg(long = "no-instance-initializer")]
    pub no_instance_initializer: bool,

    /// JSON file with syntax options; command-line flags take precedence.
    #[arg(long = "options", value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// AST node convention.
    #[arg(long, value_enum, default_value_t = Convention::Default)]
    pub convention: Convention,

    /// What to print.
    #[arg(long, value_enum, default_value_t = Emit::Ast)]
    pub emit: Emit,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Files or directories to parse. Directories are searched for .js, .mjs and .cjs files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Convention {
    Default,
    Flat,
}

impl From<Convention> for NodeConvention {
    fn from(value: Convention) -> Self {
        match value {
            Convention::Default => NodeConvention::Default,
            Convention::Flat => NodeConvention::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    Ast,
    Diagnostics,
}

impl CliArgs {
    /// Syntax overrides given directly on the command line.
    pub fn flag_options(&self) -> SyntaxOptions {
        SyntaxOptions {
            profile: self.profile.clone(),
            operator: self.operator.clone(),
            instance_variables_keyword: self.instance_keyword.clone(),
            instance_variables_initializer: self.no_instance_initializer.then_some(false),
            hidden_methods_keyword: self.hidden_keyword.clone(),
            ..SyntaxOptions::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
