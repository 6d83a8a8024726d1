//! File discovery, profile resolution and parallel parsing.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use clx_classes::{ProfileTable, ResolvedProfile, SyntaxOptions, new_parser, resolve};
use clx_common::Diagnostic;
use clx_parser::ast_json::to_json;
use clx_parser::{NodeConvention, ParserOptions};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Outcome of parsing one file.
#[derive(Debug)]
pub struct FileResult {
    pub file_name: String,
    pub source: String,
    /// Present when the AST was requested.
    pub ast: Option<Value>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files: Vec<FileResult>,
}

impl RunResult {
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(|file| file.diagnostics.len()).sum()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand `paths` into the list of files to parse. Explicit files are taken
/// as given; directories are walked for `.js`, `.mjs` and `.cjs` files in
/// sorted order.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_source_file(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("no such file or directory: {}", path.display());
        }
    }
    Ok(files)
}

/// Merge the options file (if any) under the command-line flags and resolve
/// against the built-in profiles.
pub fn resolve_profile(args: &CliArgs) -> Result<Arc<ResolvedProfile>> {
    let file_options = match &args.options_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            SyntaxOptions::from_json(&text)
                .with_context(|| format!("invalid options file {}", path.display()))?
        }
        None => SyntaxOptions::default(),
    };
    let options = file_options.merged_with(args.flag_options());
    let resolved = resolve(&ProfileTable::builtin(), &options)?;
    Ok(resolved.into_shared())
}

/// Parse one source text with the extension installed.
pub fn parse_source(
    file_name: String,
    source: String,
    convention: NodeConvention,
    profile: Arc<ResolvedProfile>,
    emit_ast: bool,
) -> FileResult {
    let mut parser = new_parser(
        file_name.clone(),
        source.clone(),
        ParserOptions::default().with_convention(convention),
        profile,
    );
    let root = parser.parse_source_file();
    let ast = emit_ast.then(|| to_json(parser.get_arena(), root, convention));
    FileResult {
        file_name,
        source,
        ast,
        diagnostics: parser.to_diagnostics(),
    }
}

fn parse_file(
    path: &Path,
    convention: NodeConvention,
    profile: &Arc<ResolvedProfile>,
    emit_ast: bool,
) -> Result<FileResult> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path.display().to_string();
    debug!(file = %file_name, bytes = source.len(), "parsing");
    Ok(parse_source(
        file_name,
        source,
        convention,
        Arc::clone(profile),
        emit_ast,
    ))
}

/// Resolve the profile once and parse every input file in parallel, one
/// parser per file. Results keep the input order.
pub fn run(args: &CliArgs) -> Result<RunResult> {
    let profile = resolve_profile(args)?;
    let files = collect_files(&args.paths)?;
    let convention = NodeConvention::from(args.convention);
    let emit_ast = args.emit == crate::args::Emit::Ast;
    info!(
        files = files.len(),
        profile = %profile.name,
        convention = convention.name(),
        "parsing files"
    );

    let files = files
        .par_iter()
        .map(|path| parse_file(path, convention, &profile, emit_ast))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunResult { files })
}

/// JSON for the AST output: the single program for one file, otherwise an
/// object keyed by file name.
pub fn ast_output(result: &RunResult) -> Value {
    if let [file] = result.files.as_slice() {
        return file.ast.clone().unwrap_or(Value::Null);
    }
    let mut map = serde_json::Map::new();
    for file in &result.files {
        map.insert(
            file.file_name.clone(),
            file.ast.clone().unwrap_or(Value::Null),
        );
    }
    Value::Object(map)
}
