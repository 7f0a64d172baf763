use std::fmt::Debug;

use crate::{math::IndexedSet, symbol::Symbol};

mod transitions;
pub use transitions::{Moves, Rule, State, Transitions};

mod validate;
pub use validate::{StateRole, ValidationError, ValidationErrorKind};

mod table;

/// The five parts of an NFA exactly as they were declared, that is before anything has been
/// checked. A definition may be malformed, for example its start state may be missing or a
/// rule may mention a state that was never declared. It only becomes usable for running
/// words once it has been turned into an [`Automaton`], which validates it.
///
/// Besides being read from text, a definition can be put together directly:
/// ```
/// use nfa::prelude::*;
///
/// let nfa = Definition::default()
///     .with_states(["q0", "q1"])
///     .with_alphabet(["0", "1"])
///     .with_rules([("q0", "0", "q0"), ("q0", "1", "q1"), ("q1", "1", "q1")])
///     .with_start("q0")
///     .with_accept(["q1"])
///     .into_automaton()
///     .unwrap();
/// assert!(nfa.accepts("11", &Separator::Characters).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    states: IndexedSet<State>,
    alphabet: IndexedSet<String>,
    transitions: Transitions,
    start: Option<State>,
    accept: IndexedSet<State>,
}

impl Definition {
    /// Declares a state, returns `false` if it was declared before.
    pub fn add_state<Q: Into<State>>(&mut self, state: Q) -> bool {
        self.states.insert(state.into())
    }

    /// Declares a letter of the alphabet, returns `false` if it was declared before.
    pub fn add_letter<S: Into<String>>(&mut self, letter: S) -> bool {
        self.alphabet.insert(letter.into())
    }

    /// Adds the rule `from, symbol, to`, returns `false` if it existed already.
    pub fn add_rule<F, T>(&mut self, from: F, symbol: Symbol, to: T) -> bool
    where
        F: Into<State>,
        T: Into<State>,
    {
        self.transitions.insert(from, symbol, to)
    }

    /// Sets the start state and gives back the one that was set before.
    pub fn set_start<Q: Into<State>>(&mut self, state: Q) -> Option<State> {
        self.start.replace(state.into())
    }

    /// Declares an accepting state, returns `false` if it was declared before.
    pub fn add_accept<Q: Into<State>>(&mut self, state: Q) -> bool {
        self.accept.insert(state.into())
    }

    /// Declares all given states.
    pub fn with_states<Q: Into<State>, I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Declares all given letters.
    pub fn with_alphabet<S: Into<String>, I: IntoIterator<Item = S>>(mut self, letters: I) -> Self {
        self.alphabet.extend(letters.into_iter().map(Into::into));
        self
    }

    /// Adds all given rules. Symbols are converted with [`Symbol::from`], so any spelling of
    /// epsilon yields an epsilon transition.
    pub fn with_rules<F, S, T, I>(mut self, rules: I) -> Self
    where
        F: Into<State>,
        S: Into<Symbol>,
        T: Into<State>,
        I: IntoIterator<Item = (F, S, T)>,
    {
        for (from, symbol, to) in rules {
            self.transitions.insert(from, symbol.into(), to);
        }
        self
    }

    /// Sets the start state.
    pub fn with_start<Q: Into<State>>(mut self, state: Q) -> Self {
        self.set_start(state);
        self
    }

    /// Declares all given states as accepting.
    pub fn with_accept<Q: Into<State>, I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.accept.extend(states.into_iter().map(Into::into));
        self
    }

    /// The declared states.
    pub fn states(&self) -> &IndexedSet<State> {
        &self.states
    }

    /// The declared alphabet.
    pub fn alphabet(&self) -> &IndexedSet<String> {
        &self.alphabet
    }

    /// The transition relation.
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// The start state, if one was given.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// The declared accepting states.
    pub fn accept(&self) -> &IndexedSet<State> {
        &self.accept
    }

    /// Validates `self` and turns it into an [`Automaton`].
    pub fn into_automaton(self) -> Result<Automaton, ValidationError> {
        Automaton::try_from(self)
    }
}

/// A nondeterministic finite automaton with epsilon transitions, whose definition has passed
/// validation. This means
/// - the alphabet is not empty and does not contain epsilon,
/// - the start state and all accepting states are declared and there is at least one
///   accepting state,
/// - every rule connects declared states and reads a letter of the alphabet or epsilon.
/// - every state and letter reads back unchanged from a written definition.
///
/// The only way to obtain an automaton is through [`TryFrom<Definition>`] (or one of the
/// loading functions built on top of it), and it can not be changed afterwards. Running words
/// is done with [`Automaton::accepts`] and friends.
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton {
    states: IndexedSet<State>,
    alphabet: IndexedSet<String>,
    transitions: Transitions,
    start: State,
    accept: IndexedSet<State>,
}

impl Automaton {
    /// The states of the automaton, in order of declaration.
    pub fn states(&self) -> &IndexedSet<State> {
        &self.states
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The alphabet, in order of declaration.
    pub fn alphabet(&self) -> &IndexedSet<String> {
        &self.alphabet
    }

    /// The transition relation.
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// The start state.
    pub fn start(&self) -> &State {
        &self.start
    }

    /// The accepting states.
    pub fn accept(&self) -> &IndexedSet<State> {
        &self.accept
    }

    /// Returns `true` if `state` is accepting.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept.contains(state)
    }

    /// Gives back a copy of the underlying definition.
    pub fn to_definition(&self) -> Definition {
        self.clone().into()
    }
}

impl TryFrom<Definition> for Automaton {
    type Error = ValidationError;

    fn try_from(value: Definition) -> Result<Self, Self::Error> {
        value.validate()?;
        let Definition {
            states,
            alphabet,
            transitions,
            start,
            accept,
        } = value;
        // validation guarantees the start state to be present
        let start = start.ok_or(ValidationError::UndefinedStartState)?;
        Ok(Self {
            states,
            alphabet,
            transitions,
            start,
            accept,
        })
    }
}

impl From<Automaton> for Definition {
    fn from(value: Automaton) -> Self {
        Self {
            states: value.states,
            alphabet: value.alphabet,
            transitions: value.transitions,
            start: Some(value.start),
            accept: value.accept,
        }
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NFA with {} states starting in {}\n{}",
            self.size(),
            self.start,
            self.transition_table()
        )
    }
}
