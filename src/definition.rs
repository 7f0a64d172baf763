use std::{io::BufRead, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::automaton::{Automaton, ValidationError};

mod comments;
/// Turning lines of text into a [`Definition`](crate::automaton::Definition).
pub mod input;
mod output;

use input::{DefinitionParser, ParseError};

/// Everything that can go wrong when loading an [`Automaton`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("could not read definition: {0}")]
    Io(#[from] std::io::Error),
    /// The text is not structured like a definition.
    #[error("malformed definition: {0}")]
    Parse(#[from] ParseError),
    /// The definition was read, but it does not describe a well-formed automaton.
    #[error("invalid automaton: {0}")]
    Invalid(#[from] ValidationError),
}

/// Reads and validates an automaton from its textual definition, which looks like this:
/// ```text
/// [States]
/// q0
/// q1
/// End
///
/// [Sigma]
/// 0
/// 1
/// End
///
/// [Rules]
/// q0, 0, q0
/// q0, 1, q1
/// q1, epsilon, q0
/// End
///
/// [Start]
/// q0
/// End
///
/// [Accept]
/// q1
/// End
/// ```
/// Sections may come in any order. Blank lines, line comments starting with `#` and block
/// comments between `/*` and `*/` are allowed anywhere.
pub fn load(text: &str) -> Result<Automaton, LoadError> {
    text.parse()
}

impl Automaton {
    /// Reads the definition line by line from `read` and validates it.
    pub fn from_reader<R: BufRead>(read: R) -> Result<Self, LoadError> {
        let mut parser = DefinitionParser::new();
        for line in read.lines() {
            parser.feed(&line?)?;
        }
        let automaton = Automaton::try_from(parser.finish())?;
        debug!(
            "loaded automaton with {} states and {} rules",
            automaton.size(),
            automaton.transitions().len()
        );
        Ok(automaton)
    }
}

impl FromStr for Automaton {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}
