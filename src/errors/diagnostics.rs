//! Diagnostic reporter shared by the lexer and the parser.
//!
//! Both stages append to one `Diagnostics` per source file. Nothing here
//! ever fails: recording a diagnostic is an infallible append, and
//! rendering falls back to a bare header when the source line is missing.

use tracing::debug;

use crate::get_line_at_position;

use super::errors::{Error, ErrorTip, Stage};

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn add(&mut self, error: Error) {
        debug!(
            stage = %error.get_stage(),
            line = error.get_position().line,
            column = error.get_position().column,
            "{}",
            error.get_error()
        );
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = Error>) {
        for error in errors {
            self.add(error);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Diagnostics reported by a single stage, in report order.
    pub fn from_stage(&self, stage: Stage) -> impl Iterator<Item = &Error> {
        self.errors.iter().filter(move |e| e.get_stage() == stage)
    }

    /// Renders every diagnostic with the offending source line underneath.
    pub fn render(&self, source: &str, file: &str) -> String {
        self.errors
            .iter()
            .map(|error| render_error(error, source, file))
            .collect()
    }

    pub fn print(&self, source: &str, file: &str) {
        eprint!("{}", self.render(source, file));
    }
}

fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error[parser]: expected ';' after expression, found "}"
        -> main.proc:20:9
           |
        20 | let a = #;
           |         ^
    */

    let position = error.get_position();
    let mut rendered = String::new();

    rendered.push_str(&format!(
        "Error[{}]: {}\n",
        error.get_stage(),
        error.get_error()
    ));
    rendered.push_str(&format!(
        "-> {}:{}:{}\n",
        file, position.line, position.column
    ));

    if let Some(line_text) = get_line_at_position(source, position.line) {
        let line_string = position.line.to_string();
        let padding = line_string.len() + 2;
        let indent = (position.column as usize).saturating_sub(1);

        rendered.push_str(&format!("{:>padding$}\n", "|"));
        rendered.push_str(&format!("{} | {}\n", line_string, line_text));
        rendered.push_str(&format!(
            "{:>padding$} {}{}\n",
            "|",
            " ".repeat(indent),
            "^".repeat(error.get_length())
        ));
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        rendered.push_str(&format!("= {}\n", tip));
    }

    rendered
}
