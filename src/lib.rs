//! Library for loading, validating and simulating nondeterministic finite automata with
//! epsilon transitions.
//!
//! An automaton is described in a small text format made up of the sections `[States]`,
//! `[Sigma]`, `[Rules]`, `[Start]` and `[Accept]` (see [`definition::load`]). Reading such a text
//! yields a [`Definition`](automaton::Definition), which is just a record of what was written
//! down. Only after it has been validated, it becomes an [`Automaton`](automaton::Automaton),
//! and only automata can run words. A well-formed automaton therefore never has to be checked
//! again before a run.
//!
//! A run keeps track of the set of active states, its [`Configuration`](run::Configuration).
//! Before each letter is read, the configuration is extended by its epsilon closure and after
//! the last letter the closure is taken once more. A state that has no rule for a letter stays
//! where it is. A word is accepted if the final configuration contains an accepting state.
//!
//! ```
//! use nfa::prelude::*;
//!
//! let nfa = load(
//!     "[States]\nq0\nq1\nEnd\n[Sigma]\n0\n1\nEnd\n[Rules]\nq0, 1, q1\nEnd\n\
//!      [Start]\nq0\nEnd\n[Accept]\nq1\nEnd",
//! )
//! .unwrap();
//! assert_eq!(nfa.accepts("01", &Separator::Characters), Ok(true));
//! assert_eq!(nfa.accepts("0", &Separator::Characters), Ok(false));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use nfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{
            Automaton, Definition, Moves, Rule, State, StateRole, Transitions, ValidationError,
            ValidationErrorKind,
        },
        definition::{
            input::{DefinitionParser, ParseError, Section},
            load, LoadError,
        },
        math,
        run::{Configuration, InputAlphabetError, Observer, Separator, Trace},
        symbol::Symbol,
    };
}

/// Type aliases for the collections used throughout the crate.
pub mod math;

/// Symbols of the alphabet and the reserved epsilon symbol.
pub mod symbol;

/// Defines definitions as they are read and the validated automata they turn into.
pub mod automaton;

/// Reading and writing automata in the section based definition format.
pub mod definition;

/// Running words on automata.
pub mod run;

/// Generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;
