use tracing::debug;

use crate::{
    automaton::{Automaton, Definition},
    symbol::Symbol,
};

/// Draws a random definition with `size` states named `q0`, `q1`, ... over an alphabet of the
/// first `symbols` lowercase latin letters. For every pair of states and every letter, a rule
/// is inserted with probability `density`. Epsilon rules are inserted with half that
/// probability. The start state is `q0` and every state is accepting with probability one
/// half, where `q{size - 1}` is always accepting.
///
/// Panics if `size` is zero or if `symbols` is not in `1..=26`.
pub fn generate_random_definition(size: usize, symbols: usize, density: f64) -> Definition {
    assert!(size > 0, "an automaton needs at least one state");
    assert!((1..=26).contains(&symbols));

    let states: Vec<String> = (0..size).map(|i| format!("q{i}")).collect();
    let letters: Vec<String> = ('a'..='z').take(symbols).map(String::from).collect();

    let mut definition = Definition::default()
        .with_states(states.iter().cloned())
        .with_alphabet(letters.iter().cloned())
        .with_start(states[0].clone());

    for from in &states {
        for to in &states {
            for letter in &letters {
                if fastrand::f64() < density {
                    definition.add_rule(from.clone(), Symbol::Letter(letter.clone()), to.clone());
                }
            }
            if fastrand::f64() < density / 2.0 {
                definition.add_rule(from.clone(), Symbol::Epsilon, to.clone());
            }
        }
    }

    for (i, state) in states.iter().enumerate() {
        if i + 1 == size || fastrand::bool() {
            definition.add_accept(state.clone());
        }
    }

    debug!(
        "generated random definition with {size} states and {} rules",
        definition.transitions().len()
    );
    definition
}

/// Works as [`generate_random_definition`], but gives back the validated [`Automaton`].
pub fn generate_random_nfa(size: usize, symbols: usize, density: f64) -> Automaton {
    Automaton::try_from(generate_random_definition(size, symbols, density))
        .unwrap_or_else(|error| unreachable!("generated definition is malformed: {error}"))
}

/// Draws a word over the alphabet of `nfa` whose length is drawn uniformly from
/// `min_len..=max_len`. The letters are returned as separate tokens.
pub fn generate_random_word(nfa: &Automaton, min_len: usize, max_len: usize) -> Vec<String> {
    let letters = nfa.alphabet();
    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .filter_map(|_| letters.get_index(fastrand::usize(..letters.len())))
        .cloned()
        .collect()
}
