//! File processing API for grammar descriptions
//!
//! This module provides an extensible API for processing grammar files with different
//! stages (token, grammar) and formats (simple, json, report, bnf, yaml). A format
//! string names both, e.g. `grammar-report` or `token-json`.
//!
//! Every file is converted in its own [`Session`], so a batch of files never shares
//! grammar state, and a syntax error in one file does not affect the others.

use crate::ebnf::config::ConverterConfig;
use crate::ebnf::error::SyntaxError;
use crate::ebnf::grammar::{printer, Grammar};
use crate::ebnf::lexer::{tokenize, LocatedToken};
use crate::ebnf::session::Session;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Grammar,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Report,
    Bnf,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "grammar-report" or "token-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "grammar" => ProcessingStage::Grammar,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "report" => OutputFormat::Report,
            "bnf" => OutputFormat::Bnf,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Token, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{:?}' not supported for token stage (only 'simple' and 'json' are supported)",
                    format
                )))
            }
            (ProcessingStage::Grammar, OutputFormat::Simple) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with token stage".to_string(),
                ))
            }
            (ProcessingStage::Grammar, _) => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Grammar,
                format: OutputFormat::Report,
            },
            ProcessingSpec {
                stage: ProcessingStage::Grammar,
                format: OutputFormat::Bnf,
            },
            ProcessingSpec {
                stage: ProcessingStage::Grammar,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Grammar,
                format: OutputFormat::Yaml,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
        ]
    }

    /// The format string this specification is parsed from
    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Grammar => "grammar",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Report => "report",
            OutputFormat::Bnf => "bnf",
        };
        format!("{}-{}", stage, format)
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    /// The input had a syntax error; no grammar was produced for it
    Syntax { path: String, error: SyntaxError },
    IoError(String),
    Serialization(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::Syntax { path, error } => write!(f, "{}: {}", path, error),
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

/// Process source text according to the given specification.
///
/// `origin` names the input in error messages.
pub fn process_source(
    source: &str,
    origin: &str,
    spec: &ProcessingSpec,
    config: &ConverterConfig,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let dump = tokenize(source);
            format_tokens(&dump.tokens, spec.format)
        }
        ProcessingStage::Grammar => {
            let mut session = Session::with_prefix(config.naming.fresh_prefix.as_str());
            let conversion = session
                .feed_lines(source.lines())
                .and_then(|()| session.finish())
                .map_err(|error| ProcessingError::Syntax {
                    path: origin.to_string(),
                    error,
                })?;

            for name in conversion.grammar.undefined_non_terminals() {
                log::warn!("{}: non-terminal {} has no rule", origin, name);
            }
            format_grammar(&conversion.grammar, spec.format)
        }
    }
}

/// Process a grammar file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &ConverterConfig,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;

    log::info!(
        "CFG: processing file \"{}\" as {}",
        file_path.display(),
        spec.name()
    );
    process_source(&content, &file_path.display().to_string(), spec, config)
}

/// Where `--write` puts the result for `input`: next to it, with the extension
/// configured for the stage.
pub fn output_path(input: &Path, spec: &ProcessingSpec, config: &ConverterConfig) -> PathBuf {
    let extension = match spec.stage {
        ProcessingStage::Token => &config.tokens.extension,
        ProcessingStage::Grammar => &config.output.extension,
    };
    input.with_extension(extension)
}

/// Format a grammar according to the specified format
fn format_grammar(grammar: &Grammar, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Report => Ok(printer::to_report_string(grammar)),
        OutputFormat::Bnf => Ok(printer::to_bnf_string(grammar)),
        OutputFormat::Json => serde_json::to_string_pretty(grammar)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(grammar)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "simple format only works with token stage".to_string(),
        )),
    }
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[LocatedToken], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&format!("{}\n", token));
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml | OutputFormat::Report | OutputFormat::Bnf => Err(
            ProcessingError::InvalidFormatType(format!(
                "{:?} format only works with grammar stage",
                format
            )),
        ),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::config::load_defaults;

    fn spec(name: &str) -> ProcessingSpec {
        ProcessingSpec::from_string(name).expect("valid format")
    }

    #[test]
    fn test_parse_format_strings() {
        assert_eq!(
            spec("grammar-report"),
            ProcessingSpec {
                stage: ProcessingStage::Grammar,
                format: OutputFormat::Report
            }
        );
        assert_eq!(
            spec("token-json"),
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json
            }
        );
    }

    #[test]
    fn test_invalid_format_strings() {
        assert_eq!(
            ProcessingSpec::from_string("report"),
            Err(ProcessingError::InvalidFormat("report".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-report"),
            Err(ProcessingError::InvalidStage("ast".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("grammar-xml"),
            Err(ProcessingError::InvalidFormatType("xml".to_string()))
        );
        assert!(ProcessingSpec::from_string("token-bnf").is_err());
        assert!(ProcessingSpec::from_string("grammar-simple").is_err());
    }

    #[test]
    fn test_available_formats_round_trip() {
        let formats = available_formats();
        assert_eq!(formats[0], "grammar-report");
        for format in formats {
            assert_eq!(spec(&format).name(), format);
        }
    }

    #[test]
    fn test_process_source_bnf() {
        let config = load_defaults().expect("defaults");
        let output = process_source(
            "START = A ;\nA = \"x\" + [ \"y\" ] ;",
            "inline",
            &spec("grammar-bnf"),
            &config,
        )
        .expect("to process");
        assert_eq!(
            output,
            "START = A;\nA = \"x\" + __NT1;\n__NT0 = \"y\";\n__NT1 = EPS | __NT0;\n"
        );
    }

    #[test]
    fn test_process_source_reports_syntax_errors() {
        let config = load_defaults().expect("defaults");
        let result = process_source("A = \"x\"", "bad.ebnf", &spec("grammar-report"), &config);
        assert_eq!(
            result,
            Err(ProcessingError::Syntax {
                path: "bad.ebnf".to_string(),
                error: SyntaxError::MissingTerminator { line: 1 }
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "bad.ebnf: Syntax error: No semicolon at the end of rule: line 1"
        );
    }

    #[test]
    fn test_token_simple_dump() {
        let config = load_defaults().expect("defaults");
        let output = process_source("A = B ;", "inline", &spec("token-simple"), &config)
            .expect("to process");
        assert_eq!(
            output,
            "NON_TERMINAL(A) at 1:1\nEQ(=) at 1:3\nNON_TERMINAL(B) at 1:5\nEND_OF_LINE(;) at 1:7\n"
        );
    }

    #[test]
    fn test_token_dump_ignores_syntax() {
        let config = load_defaults().expect("defaults");
        let output = process_source("= = ;", "inline", &spec("token-simple"), &config)
            .expect("token stage does not parse");
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_grammar_json() {
        let config = load_defaults().expect("defaults");
        let output = process_source("A = \"x\" | EPS ;", "inline", &spec("grammar-json"), &config)
            .expect("to process");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["symbols"], serde_json::json!(["x"]));
        assert_eq!(value["start"], serde_json::Value::Null);
        assert_eq!(
            value["rules"][0]["body"],
            serde_json::json!([[{ "Symbol": "x" }], ["Epsilon"]])
        );
    }

    #[test]
    fn test_output_path() {
        let config = load_defaults().expect("defaults");
        assert_eq!(
            output_path(Path::new("dir/expr.ebnf"), &spec("grammar-report"), &config),
            PathBuf::from("dir/expr.prsout")
        );
        assert_eq!(
            output_path(Path::new("dir/expr.ebnf"), &spec("token-json"), &config),
            PathBuf::from("dir/expr.out")
        );
    }
}
