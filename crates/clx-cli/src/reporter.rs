use clx_common::{Diagnostic, DiagnosticCategory, LineMap};
use colored::Colorize;
use rustc_hash::FxHashMap;
use std::path::Path;

/// Renders diagnostics as `file:line:col - error CLX1012: message` followed
/// by the offending source line with the span underlined.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Register source text for `file` so it is not re-read from disk.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = self
            .format_location(&diagnostic.file, diagnostic.start)
            .unwrap_or_else(|| {
                if diagnostic.file.is_empty() {
                    "<unknown>".to_string()
                } else {
                    diagnostic.file.clone()
                }
            });

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line with the span underlined:
    ///   3   class A { var x = 1; }
    ///                     ~~~~~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let line_text = line_map.line_text((line - 1) as usize, source)?;

        let first = (column - 1) as usize;
        let remaining = line_text.chars().count().saturating_sub(first);
        let span = (length as usize).min(remaining).max(1);

        let mut underline: String = line_text
            .chars()
            .take(first)
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let tildes = "~".repeat(span);
        if self.color {
            underline.push_str(&tildes.red().to_string());
        } else {
            underline.push_str(&tildes);
        }

        Some(format!("\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        let location = format!("{file}:{line}:{column}");
        if self.color {
            Some(location.cyan().to_string())
        } else {
            Some(location)
        }
    }

    /// 1-based line and column of `offset`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let source = self.sources.get(file)?;
            let map = LineMap::build(source);
            self.line_maps.insert(file.to_string(), map);
        }
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.name();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("CLX{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
