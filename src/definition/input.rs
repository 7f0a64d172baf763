use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{automaton::Definition, symbol::repair_encoding, symbol::Symbol};

use super::comments::CommentFilter;

/// Marks the end of a section.
const SECTION_END: &str = "End";

/// Structural errors that can occur while reading a definition.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    /// A line in the `Rules` section that is not of the form `source, symbol, destination`.
    #[error("line {line}: rule `{text}` does not consist of exactly three comma separated fields")]
    MalformedRule {
        /// The 1-based number of the offending line.
        line: usize,
        /// The line, with comments removed.
        text: String,
    },
}

/// The sections of a definition. Lines are interpreted depending on the section they appear in.
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq)]
pub enum Section {
    /// Outside of any section, lines are skipped.
    #[default]
    None,
    /// One state per line.
    States,
    /// One letter of the alphabet per line.
    Sigma,
    /// One rule `source, symbol, destination` per line.
    Rules,
    /// The start state, if multiple lines are given the last one counts.
    Start,
    /// One accepting state per line.
    Accept,
}

impl Section {
    /// The name of the section as it appears in the header, `None` for [`Section::None`].
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Section::None => None,
            Section::States => Some("States"),
            Section::Sigma => Some("Sigma"),
            Section::Rules => Some("Rules"),
            Section::Start => Some("Start"),
            Section::Accept => Some("Accept"),
        }
    }

    /// Looks up the section with the given header name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "States" => Some(Section::States),
            "Sigma" => Some(Section::Sigma),
            "Rules" => Some(Section::Rules),
            "Start" => Some(Section::Start),
            "Accept" => Some(Section::Accept),
            _ => None,
        }
    }
}

/// Reads a [`Definition`] line by line. Each line is stripped of comments and then either
/// switches the current [`Section`] (lines `[Name]` and `End`) or adds to the part of the
/// definition that the current section describes.
#[derive(Debug, Clone, Default)]
pub struct DefinitionParser {
    definition: Definition,
    section: Section,
    comments: CommentFilter,
    line: usize,
}

impl DefinitionParser {
    /// Creates a parser that has not seen any line yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The section that the next line is interpreted in.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Processes the next line of input.
    pub fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        self.line += 1;
        let Some(line) = self.comments.clean(line) else {
            return Ok(());
        };

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').unwrap_or(header).trim();
            self.section = Section::from_name(name).unwrap_or_else(|| {
                warn!("line {}: skipping unknown section `{name}`", self.line);
                Section::None
            });
            trace!("line {}: entering section {:?}", self.line, self.section);
            return Ok(());
        }
        if line == SECTION_END {
            trace!("line {}: leaving section {:?}", self.line, self.section);
            self.section = Section::None;
            return Ok(());
        }

        match self.section {
            Section::None => {}
            Section::States => {
                if !self.definition.add_state(line.as_str()) {
                    debug!("line {}: state `{line}` declared twice", self.line);
                }
            }
            Section::Sigma => {
                let letter = repair_encoding(&line);
                if !self.definition.add_letter(&*letter) {
                    debug!("line {}: letter `{letter}` declared twice", self.line);
                }
            }
            Section::Rules => self.rule(&line)?,
            Section::Start => {
                if let Some(previous) = self.definition.set_start(line.as_str()) {
                    debug!(
                        "line {}: start state `{line}` replaces `{previous}`",
                        self.line
                    );
                }
            }
            Section::Accept => {
                if !self.definition.add_accept(line.as_str()) {
                    debug!("line {}: accepting state `{line}` declared twice", self.line);
                }
            }
        }
        Ok(())
    }

    fn rule(&mut self, line: &str) -> Result<(), ParseError> {
        let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
        let &[from, symbol, to] = fields.as_slice() else {
            return Err(ParseError::MalformedRule {
                line: self.line,
                text: line.to_string(),
            });
        };
        let symbol = Symbol::parse(symbol);
        trace!("line {}: rule {from}, {symbol}, {to}", self.line);
        if !self.definition.add_rule(from, symbol, to) {
            debug!("line {}: duplicate rule `{line}`", self.line);
        }
        Ok(())
    }

    /// Finishes reading and gives back the definition that was read.
    pub fn finish(self) -> Definition {
        if self.comments.in_block() {
            warn!("definition ends inside of a block comment");
        }
        if let Some(name) = self.section.name() {
            debug!("section {name} is not closed by `{SECTION_END}`");
        }
        self.definition
    }
}

impl Definition {
    /// Reads a definition from the given lines. This does not validate the result.
    pub fn try_from_lines<S, I>(lines: I) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut parser = DefinitionParser::new();
        for line in lines {
            parser.feed(line.as_ref())?;
        }
        Ok(parser.finish())
    }

    /// Reads a definition from a string, see [`Definition::try_from_lines`].
    pub fn try_from_str(input: &str) -> Result<Self, ParseError> {
        Self::try_from_lines(input.lines())
    }
}

impl FromStr for Definition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}
