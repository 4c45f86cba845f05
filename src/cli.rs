//! Command line front end.
//!
//! `proclang tokenize <source> <output>` writes the token array as JSON,
//! `proclang parse <source> <output>` writes the program tree. Nothing is
//! written when the source has any diagnostic.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use thiserror::Error;
use tracing::info;

use crate::{lexer::lexer::tokenize, parser::parser::parse, Diagnostics};

pub const USAGE: &str = "usage: proclang <tokenize|parse> <source> <output>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tokenize { source: PathBuf, output: PathBuf },
    Parse { source: PathBuf, output: PathBuf },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("expected a command, a source file and an output file")]
    Usage,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{count} error(s) in {file}, no output written")]
    Diagnostics { count: usize, file: String },
}

impl CliError {
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage | CliError::UnknownCommand(_))
    }

    /// 1 when the source itself had problems, 2 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Diagnostics { .. } => 1,
            _ => 2,
        }
    }
}

impl Command {
    /// Reads the command from an argument vector in `env::args` form, the
    /// program name first.
    pub fn from_args(args: &[String]) -> Result<Command, CliError> {
        let [_, command, source, output] = args else {
            return Err(CliError::Usage);
        };

        let source = PathBuf::from(source);
        let output = PathBuf::from(output);

        match command.as_str() {
            "tokenize" => Ok(Command::Tokenize { source, output }),
            "parse" => Ok(Command::Parse { source, output }),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            Command::Tokenize { source, .. } | Command::Parse { source, .. } => source,
        }
    }

    pub fn output(&self) -> &Path {
        match self {
            Command::Tokenize { output, .. } | Command::Parse { output, .. } => output,
        }
    }
}

/// Tokenizes `source` and serializes the tokens.
pub fn tokenize_to_json(source: &str, diagnostics: &mut Diagnostics) -> Result<String, CliError> {
    let start = Instant::now();
    let tokens = tokenize(source, diagnostics);
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    Ok(serde_json::to_string_pretty(&tokens)?)
}

/// Tokenizes and parses `source` and serializes the program.
///
/// The parser runs even when the lexer reported problems so both stages'
/// diagnostics end up in `diagnostics`.
pub fn parse_to_json(source: &str, diagnostics: &mut Diagnostics) -> Result<String, CliError> {
    let start = Instant::now();
    let tokens = tokenize(source, diagnostics);
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let program = parse(tokens, diagnostics);
    info!(
        statements = program.body.len(),
        elapsed = ?parse_start.elapsed(),
        "parsed"
    );

    Ok(serde_json::to_string_pretty(&program)?)
}

pub fn run(command: &Command) -> Result<(), CliError> {
    let path = command.source();
    let file = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: file.clone(),
        source,
    })?;

    let mut diagnostics = Diagnostics::new();
    let json = match command {
        Command::Tokenize { .. } => tokenize_to_json(&source, &mut diagnostics)?,
        Command::Parse { .. } => parse_to_json(&source, &mut diagnostics)?,
    };

    if diagnostics.has_errors() {
        diagnostics.print(&source, &file);
        return Err(CliError::Diagnostics {
            count: diagnostics.len(),
            file,
        });
    }

    fs::write(command.output(), json)?;
    info!(output = %command.output().display(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("proclang-cli-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_from_args() {
        assert_eq!(
            Command::from_args(&args(&["proclang", "tokenize", "a.proc", "a.json"])).ok(),
            Some(Command::Tokenize {
                source: PathBuf::from("a.proc"),
                output: PathBuf::from("a.json"),
            })
        );
        assert_eq!(
            Command::from_args(&args(&["proclang", "parse", "a.proc", "a.json"])).ok(),
            Some(Command::Parse {
                source: PathBuf::from("a.proc"),
                output: PathBuf::from("a.json"),
            })
        );
    }

    #[test]
    fn test_from_args_rejects_bad_usage() {
        let missing = Command::from_args(&args(&["proclang", "parse", "a.proc"]));
        assert!(matches!(missing, Err(CliError::Usage)));

        let unknown = Command::from_args(&args(&["proclang", "compile", "a.proc", "a.json"]));
        match unknown {
            Err(error) => {
                assert!(matches!(error, CliError::UnknownCommand(ref c) if c == "compile"));
                assert_eq!(error.exit_code(), 2);
            }
            Ok(command) => panic!("expected an error, got {:?}", command),
        }
    }

    #[test]
    fn test_tokenize_to_json() {
        let mut diagnostics = Diagnostics::new();
        let json = tokenize_to_json("x >= 1", &mut diagnostics).unwrap();

        assert!(!diagnostics.has_errors());
        assert!(json.contains("\"GreaterEquals\""));
        assert!(json.contains("\"Valued\""));
    }

    #[test]
    fn test_run_writes_program() {
        let source = scratch("ok.proc");
        let output = scratch("ok.json");
        fs::write(&source, "enum Color { Red }").unwrap();

        run(&Command::Parse {
            source: source.clone(),
            output: output.clone(),
        })
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"EnumDeclaration\""));
        assert!(written.contains("\"Red\""));

        fs::remove_file(source).ok();
        fs::remove_file(output).ok();
    }

    #[test]
    fn test_run_aborts_on_diagnostics() {
        let source = scratch("bad.proc");
        let output = scratch("bad.json");
        fs::write(&source, "temp x: Number = $;").unwrap();

        let result = run(&Command::Tokenize {
            source: source.clone(),
            output: output.clone(),
        });

        match result {
            Err(error) => {
                assert!(matches!(error, CliError::Diagnostics { count: 1, .. }));
                assert_eq!(error.exit_code(), 1);
            }
            Ok(()) => panic!("expected diagnostics"),
        }
        assert!(!output.exists());

        fs::remove_file(source).ok();
    }

    #[test]
    fn test_run_missing_source() {
        let result = run(&Command::Parse {
            source: scratch("does-not-exist.proc"),
            output: scratch("never.json"),
        });

        match result {
            Err(error) => {
                assert!(matches!(error, CliError::Read { .. }));
                assert_eq!(error.exit_code(), 2);
            }
            Ok(()) => panic!("expected a read error"),
        }
    }
}
