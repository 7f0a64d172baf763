use std::fmt::{Debug, Display};

use itertools::{Either, Itertools};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{automaton::Automaton, math::OrderedSet, symbol::Symbol};

mod observer;
pub use observer::{Observer, Trace};

mod separator;
pub use separator::Separator;

/// Raised when a word contains a symbol that does not belong to the alphabet of the
/// automaton it is run on. This is a problem of the input, the automaton itself is fine.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("input symbol `{symbol}` at position {position} is not in the alphabet")]
pub struct InputAlphabetError {
    /// The offending symbol.
    pub symbol: String,
    /// Its (0-based) position in the word.
    pub position: usize,
}

/// The set of states that a run is in at some point. States are kept in lexicographic order.
#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct Configuration<'a>(OrderedSet<&'a str>);

impl<'a> Configuration<'a> {
    /// The configuration consisting of `state` only.
    pub fn singleton(state: &'a str) -> Self {
        Self(OrderedSet::from([state]))
    }

    /// Returns `true` if `state` is active.
    pub fn contains(&self, state: &str) -> bool {
        self.0.contains(state)
    }

    /// Iterates over the active states in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.iter().copied()
    }

    /// The number of active states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no state is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Configuration<'a> {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> Extend<&'a str> for Configuration<'a> {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for Configuration<'a> {
    type Item = &'a str;
    type IntoIter = std::collections::btree_set::IntoIter<&'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Configuration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.0.iter().join(", "))
        }
    }
}

impl Debug for Configuration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Automaton {
    /// Computes the epsilon closure of `seed`, that is the smallest set of states containing
    /// `seed` which can not be left through an epsilon transition.
    ///
    /// Every state enters a worklist at most once, so the work is linear in the number of
    /// states plus epsilon transitions.
    pub fn epsilon_closure<'a, I>(&'a self, seed: I) -> Configuration<'a>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut closure = OrderedSet::new();
        let mut queue = vec![];
        for state in seed {
            if closure.insert(state) {
                queue.push(state);
            }
        }
        while let Some(state) = queue.pop() {
            for reached in self.transitions().epsilon_successors(state) {
                if closure.insert(reached.as_str()) {
                    queue.push(reached.as_str());
                }
            }
        }
        Configuration(closure)
    }

    /// The states that `state` moves to on `letter`. If there is no rule for it, the state
    /// stays where it is.
    fn successors<'a>(&'a self, state: &'a str, letter: &str) -> impl Iterator<Item = &'a str> {
        match self
            .transitions()
            .destinations(state, Symbol::Letter(letter))
        {
            Some(destinations) => Either::Left(destinations.iter().map(String::as_str)),
            None => Either::Right(std::iter::once(state)),
        }
    }

    /// Reads a single letter: the configuration is first extended by its epsilon closure,
    /// then every active state moves along its rules for `letter`.
    pub fn step<'a>(&'a self, configuration: &Configuration<'a>, letter: &str) -> Configuration<'a> {
        self.epsilon_closure(configuration.iter())
            .into_iter()
            .flat_map(|state| self.successors(state, letter))
            .collect()
    }

    /// Runs the word given as a sequence of `tokens`, reporting every configuration to
    /// `observer`. Before anything else, all tokens are checked to belong to the alphabet.
    ///
    /// The run starts in the start state and applies [`Automaton::step`] for each token. At the
    /// end, the epsilon closure is taken once more and the word is accepted if the resulting
    /// configuration contains an accepting state.
    pub fn run_with<'a, S, O>(
        &'a self,
        tokens: &[S],
        observer: &mut O,
    ) -> Result<bool, InputAlphabetError>
    where
        S: AsRef<str>,
        O: Observer<'a>,
    {
        if let Some((position, symbol)) = tokens
            .iter()
            .map(AsRef::as_ref)
            .find_position(|token| !self.alphabet().contains(*token))
        {
            debug!("rejecting input, `{symbol}` is not in the alphabet");
            return Err(InputAlphabetError {
                symbol: symbol.to_string(),
                position,
            });
        }

        let mut current = Configuration::singleton(self.start());
        trace!("run starts in {current}");
        observer.begin(&current);
        for token in tokens {
            let token = token.as_ref();
            current = self.step(&current, token);
            trace!("read {token}, reached {current}");
            observer.step(token, &current);
        }

        let last = self.epsilon_closure(current);
        observer.finish(&last);
        let accepted = last.iter().any(|state| self.is_accepting(state));
        debug!(
            "run on {} symbols ends in {last}, {}",
            tokens.len(),
            if accepted { "accepted" } else { "rejected" }
        );
        Ok(accepted)
    }

    /// Decides whether the word given by `tokens` is accepted.
    pub fn accepts_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<bool, InputAlphabetError> {
        self.run_with(tokens, &mut ())
    }

    /// Splits `input` with `separator` and decides whether the resulting word is accepted.
    pub fn accepts(&self, input: &str, separator: &Separator) -> Result<bool, InputAlphabetError> {
        self.accepts_tokens(&separator.tokenize(input))
    }

    /// Works like [`Automaton::accepts`] but also gives back the [`Trace`] of the run.
    pub fn trace_accepts(
        &self,
        input: &str,
        separator: &Separator,
    ) -> Result<(bool, Trace<'_>), InputAlphabetError> {
        let mut trace = Trace::default();
        let accepted = self.run_with(&separator.tokenize(input), &mut trace)?;
        Ok((accepted, trace))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Accepts binary words that contain a `1`.
    fn binary() -> Automaton {
        Definition::default()
            .with_states(["q0", "q1"])
            .with_alphabet(["0", "1"])
            .with_rules([("q0", "0", "q0"), ("q0", "1", "q1"), ("q1", "1", "q1")])
            .with_start("q0")
            .with_accept(["q1"])
            .into_automaton()
            .unwrap()
    }

    fn epsilon_chain() -> Automaton {
        Definition::default()
            .with_states(["q0", "q1", "q2", "q3"])
            .with_alphabet(["a"])
            .with_rules([
                ("q0", "epsilon", "q1"),
                ("q1", "ε", "q2"),
                ("q3", "a", "q0"),
            ])
            .with_start("q0")
            .with_accept(["q2"])
            .into_automaton()
            .unwrap()
    }

    #[test_log::test]
    fn binary_words() {
        let nfa = binary();
        let chars = Separator::Characters;
        assert_eq!(nfa.accepts("11", &chars), Ok(true));
        assert_eq!(nfa.accepts("0", &chars), Ok(false));
        assert_eq!(nfa.accepts("", &chars), Ok(false));
        assert_eq!(nfa.accepts("0001000", &chars), Ok(true));
        assert_eq!(nfa.accepts("1 0 1", &Separator::new(" ")), Ok(true));
        assert_eq!(nfa.accepts_tokens(&["0", "0"]), Ok(false));
    }

    #[test_log::test]
    fn foreign_symbols_are_rejected_before_running() {
        let nfa = binary();
        let mut trace = Trace::default();
        assert_eq!(
            nfa.run_with(&["1", "2", "x"], &mut trace),
            Err(InputAlphabetError {
                symbol: "2".to_string(),
                position: 1
            })
        );
        assert!(trace.initial().is_empty());
        assert!(trace.steps().is_empty());
        assert!(nfa.accepts("0,1", &Separator::Characters).is_err());
    }

    #[test_log::test]
    fn missing_rules_keep_the_state() {
        // q1 has no rule for 0, so it stays in q1
        let nfa = binary();
        assert_eq!(nfa.accepts("10", &Separator::Characters), Ok(true));
        let after = nfa.step(&Configuration::singleton("q1"), "0");
        assert_eq!(after, Configuration::singleton("q1"));
    }

    #[test_log::test]
    fn epsilon_is_transitive() {
        let nfa = epsilon_chain();
        assert_eq!(nfa.accepts("", &Separator::Characters), Ok(true));
        assert_eq!(
            nfa.epsilon_closure(["q0"]).iter().collect::<Vec<_>>(),
            ["q0", "q1", "q2"]
        );
        assert_eq!(nfa.epsilon_closure(["q3"]), Configuration::singleton("q3"));
    }

    #[test_log::test]
    fn closure_is_idempotent() {
        let nfa = epsilon_chain();
        for seed in [vec![], vec!["q0"], vec!["q1", "q3"], vec!["q2"]] {
            let once = nfa.epsilon_closure(seed.clone());
            let twice = nfa.epsilon_closure(once.clone());
            assert_eq!(once, twice);
            assert!(seed.iter().all(|q| once.contains(q)));
        }
    }

    #[test_log::test]
    fn closure_handles_cycles() {
        let nfa = Definition::default()
            .with_states(["a", "b", "c"])
            .with_alphabet(["x"])
            .with_rules([("a", "ε", "b"), ("b", "ε", "a"), ("b", "ε", "c"), ("c", "ε", "c")])
            .with_start("a")
            .with_accept(["c"])
            .into_automaton()
            .unwrap();
        assert_eq!(nfa.epsilon_closure(["b"]).len(), 3);
        assert_eq!(nfa.accepts("xx", &Separator::Characters), Ok(true));
    }

    #[test_log::test]
    fn epsilon_moves_before_and_after_reading() {
        // only after taking the epsilon transition into p, the 1 leads to the accepting state
        let nfa = Definition::default()
            .with_states(["s", "p", "f", "g"])
            .with_alphabet(["0", "1"])
            .with_rules([
                ("s", "epsilon", "p"),
                ("s", "1", "s"),
                ("p", "1", "f"),
                ("f", "0", "f"),
                ("f", "Epsilon", "g"),
            ])
            .with_start("s")
            .with_accept(["g"])
            .into_automaton()
            .unwrap();
        let chars = Separator::Characters;
        assert_eq!(nfa.accepts("1", &chars), Ok(true));
        assert_eq!(nfa.accepts("", &chars), Ok(false));
        // p has no rule for 0 and stays, so a later 1 still reaches f
        assert_eq!(nfa.accepts("01", &chars), Ok(true));
        assert_eq!(nfa.accepts("0", &chars), Ok(false));
    }

    #[test_log::test]
    fn unreferenced_states_do_not_matter() {
        let with_unused = binary().to_definition().with_states(["q9"]).into_automaton().unwrap();
        for word in ["", "0", "1", "10", "0110", "000"] {
            assert_eq!(
                with_unused.accepts(word, &Separator::Characters),
                binary().accepts(word, &Separator::Characters)
            );
        }
    }

    #[test_log::test]
    fn trace_records_every_configuration() {
        let nfa = Definition::default()
            .with_states(["q0", "q1", "q2"])
            .with_alphabet(["a", "b"])
            .with_rules([("q0", "a", "q0"), ("q0", "a", "q1"), ("q1", "b", "q2"), ("q2", "ε", "q0")])
            .with_start("q0")
            .with_accept(["q2"])
            .into_automaton()
            .unwrap();
        let (accepted, trace) = nfa.trace_accepts("ab", &Separator::Characters).unwrap();
        assert!(accepted);
        assert_eq!(trace.initial(), &Configuration::singleton("q0"));
        let steps = trace
            .steps()
            .iter()
            .map(|(token, configuration)| format!("{token} {configuration}"))
            .collect::<Vec<_>>();
        // q0 has no rule for b, so it stays
        assert_eq!(steps, ["a {q0, q1}", "b {q0, q2}"]);
        assert_eq!(trace.last().to_string(), "{q0, q2}");
        assert_eq!(
            trace.to_string(),
            "{q0}\na\n{q0, q1}\nb\n{q0, q2}\n{q0, q2} <- after final epsilon closure"
        );
        assert_eq!(nfa.accepts("ab", &Separator::Characters), Ok(accepted));
    }

    #[test]
    fn configuration_display() {
        assert_eq!(Configuration::default().to_string(), "∅");
        let configuration: Configuration = ["q2", "q0", "q1", "q0"].into_iter().collect();
        assert_eq!(format!("{configuration:?}"), "{q0, q1, q2}");
        assert_eq!(configuration.len(), 3);
    }
}
