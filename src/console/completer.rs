//! Verb completion for the line editor

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::VERBS;

/// rustyline helper offering prefix completion over the fixed verb table
pub struct ConsoleHelper;

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // only the verb position completes; the argument is free text
        let head = &line[..pos];
        if head.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = head.len() - head.trim_start().len();
        let prefix = &head[start..];

        let candidates = VERBS
            .iter()
            .filter(|(verb, _)| verb.starts_with(prefix))
            .map(|(verb, description)| Pair {
                display: format!("{verb}  ({description})"),
                replacement: verb.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

impl Helper for ConsoleHelper {}
