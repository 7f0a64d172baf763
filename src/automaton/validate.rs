use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    math::IndexedSet,
    symbol::{is_epsilon, repair_encoding, Symbol},
};

use super::{Definition, State};

/// The place at which a state is referenced.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum StateRole {
    /// The start state.
    Start,
    /// An accepting state.
    Accept,
    /// The source of a rule.
    Source,
    /// The destination of a rule.
    Destination,
}

impl Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            StateRole::Start => "start",
            StateRole::Accept => "accept",
            StateRole::Source => "source",
            StateRole::Destination => "destination",
        };
        write!(f, "{role}")
    }
}

/// The kinds of [`ValidationError`], without the details.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    UndefinedAlphabet,
    UndefinedStartState,
    UndefinedAcceptStates,
    InvalidState,
    InvalidSymbol,
    EpsilonTransition,
    UnwritableLabel,
}

/// Ways in which a [`Definition`] can fail to describe a well-formed automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    /// The alphabet is empty.
    #[error("alphabet is not defined")]
    UndefinedAlphabet,
    /// No start state was given.
    #[error("start state is not defined")]
    UndefinedStartState,
    /// There is not a single accepting state.
    #[error("no accept state is defined")]
    UndefinedAcceptStates,
    /// A state is used somewhere without being declared.
    #[error("{role} state `{state}` is not declared")]
    InvalidState {
        /// Where the state is used.
        role: StateRole,
        /// The offending state.
        state: State,
    },
    /// A rule reads a symbol that is neither epsilon nor in the alphabet.
    #[error("symbol `{symbol}` of a rule leaving `{from}` is not in the alphabet")]
    InvalidSymbol {
        /// Source of the rule.
        from: State,
        /// The offending symbol.
        symbol: String,
    },
    /// Epsilon was declared as a letter of the alphabet.
    #[error("`{0}` must not be declared in the alphabet, epsilon transitions are always available")]
    EpsilonTransition(String),
    /// A state or letter that would read back differently from a written definition, for
    /// example because it contains a comma or a comment marker.
    #[error("label `{0}` can not be written in a definition")]
    UnwritableLabel(String),
}

impl ValidationError {
    /// Gives the kind of the error.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::UndefinedAlphabet => ValidationErrorKind::UndefinedAlphabet,
            ValidationError::UndefinedStartState => ValidationErrorKind::UndefinedStartState,
            ValidationError::UndefinedAcceptStates => ValidationErrorKind::UndefinedAcceptStates,
            ValidationError::InvalidState { .. } => ValidationErrorKind::InvalidState,
            ValidationError::InvalidSymbol { .. } => ValidationErrorKind::InvalidSymbol,
            ValidationError::EpsilonTransition(_) => ValidationErrorKind::EpsilonTransition,
            ValidationError::UnwritableLabel(_) => ValidationErrorKind::UnwritableLabel,
        }
    }
}

/// Returns `true` if `label` survives being written on a line of its own (or as a field of a
/// rule) and read back. Trimming, comment removal, section headers and the comma separating
/// rule fields all get in the way of labels that look like them. A lone `*/` is harmless
/// since written definitions never open a block comment.
fn is_writable(label: &str) -> bool {
    !label.is_empty()
        && label.trim() == label
        && label != "End"
        && !label.starts_with('[')
        && !label.contains([',', '#', '\n', '\r'])
        && !label.contains("/*")
}

impl Definition {
    /// Collects every way in which `self` violates well-formedness. The violations are ordered
    /// by the following precedence:
    /// 1. the alphabet is empty,
    /// 2. the start state is missing or undeclared,
    /// 3. there are no accepting states or some of them are undeclared,
    /// 4. a rule leaves an undeclared state,
    /// 5. epsilon is declared in the alphabet, or a rule reads a symbol outside the alphabet,
    /// 6. a rule leads to an undeclared state,
    /// 7. a state or letter can not be written out and read back unchanged.
    ///
    /// The list is empty precisely if `self` is valid.
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut violations = vec![];
        let undeclared = |role: StateRole, state: &State| ValidationError::InvalidState {
            role,
            state: state.clone(),
        };

        if self.alphabet.is_empty() {
            violations.push(ValidationError::UndefinedAlphabet);
        }

        match &self.start {
            None => violations.push(ValidationError::UndefinedStartState),
            Some(start) if !self.states.contains(start) => {
                violations.push(undeclared(StateRole::Start, start))
            }
            Some(_) => {}
        }

        if self.accept.is_empty() {
            violations.push(ValidationError::UndefinedAcceptStates);
        }
        violations.extend(
            self.accept
                .iter()
                .filter(|q| !self.states.contains(*q))
                .map(|q| undeclared(StateRole::Accept, q)),
        );

        violations.extend(
            self.transitions
                .sources()
                .filter(|q| !self.states.contains(*q))
                .map(|q| undeclared(StateRole::Source, q)),
        );

        violations.extend(
            self.alphabet
                .iter()
                .filter(|letter| is_epsilon(letter))
                .map(|letter| ValidationError::EpsilonTransition(letter.clone())),
        );
        for (from, moves) in self.transitions.iter() {
            for symbol in moves.symbols() {
                if let Symbol::Letter(letter) = symbol {
                    if !self.alphabet.contains(letter) {
                        violations.push(ValidationError::InvalidSymbol {
                            from: from.clone(),
                            symbol: letter.to_string(),
                        });
                    }
                }
            }
        }

        let unknown_destinations: IndexedSet<&State> = self
            .transitions
            .iter()
            .flat_map(|(_, moves)| moves.iter())
            .flat_map(|(_, destinations)| destinations.iter())
            .filter(|q| !self.states.contains(*q))
            .collect();
        violations.extend(
            unknown_destinations
                .into_iter()
                .map(|q| undeclared(StateRole::Destination, q)),
        );

        // letters are repaired when read, so they have to be repaired already
        violations.extend(
            self.states
                .iter()
                .filter(|q| !is_writable(q))
                .chain(self.alphabet.iter().filter(|letter| {
                    !is_writable(letter) || repair_encoding(letter) != letter.as_str()
                }))
                .map(|label| ValidationError::UnwritableLabel(label.clone())),
        );

        for violation in &violations {
            trace!("definition violates well-formedness: {violation}");
        }
        violations
    }

    /// Checks whether `self` describes a well-formed automaton. If it does not, the first
    /// violation in the order given by [`Definition::violations`] is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.violations().into_iter().next() {
            Some(violation) => {
                debug!("validation failed: {violation}");
                Err(violation)
            }
            None => Ok(()),
        }
    }

    /// Returns `true` if `self` passes [`Definition::validate`].
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}
