//! Compile cardq queries and render the result

use clap::ValueEnum;

use super::CliError;
use crate::{Diagnostic, compile_with_diagnostics, output, parse_tree};

/// How a compiled query is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Query tree as JSON
    #[default]
    Json,
    /// Canonical query text with every AND spelled out
    Text,
    /// Parse tree outline, before reduction
    Tree,
    /// Parse tree as JSON
    TreeJson,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to compile
    pub query: String,
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't reduce
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled; `output` is rendered in the requested format
    Success {
        output: String,
        diagnostics: Vec<Diagnostic>,
    },
}

/// Execute a cardq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = options.query.trim();

    if options.syntax_only {
        parse_tree(query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    if matches!(options.format, OutputFormat::Tree | OutputFormat::TreeJson) {
        let tree = parse_tree(query)?;
        let output = match options.format {
            OutputFormat::TreeJson if options.pretty => serde_json::to_string_pretty(&tree)?,
            OutputFormat::TreeJson => serde_json::to_string(&tree)?,
            _ => tree.to_string().trim_end().to_string(),
        };
        return Ok(CheckResult::Success {
            output,
            diagnostics: Vec::new(),
        });
    }

    let compilation = compile_with_diagnostics(query)?;
    let output = match options.format {
        OutputFormat::Json if options.pretty => output::to_json_pretty(&compilation.item)?,
        OutputFormat::Json => output::to_json(&compilation.item)?,
        OutputFormat::Text | OutputFormat::Tree | OutputFormat::TreeJson => {
            compilation.item.to_string()
        }
    };

    Ok(CheckResult::Success {
        output,
        diagnostics: compilation.diagnostics,
    })
}
