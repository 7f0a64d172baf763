use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::symbol::{Symbol, EPSILON_GLYPH};

use super::Automaton;

impl Automaton {
    /// Renders the transition relation as a table with one row per state and one column per
    /// letter, followed by a column for epsilon if the automaton has epsilon transitions.
    /// The start state is marked with `→` and accepting states with `*`. Cells without a
    /// rule show `-`, meaning the state stays where it is when reading that letter.
    pub fn transition_table(&self) -> String {
        let has_epsilon = self
            .transitions
            .iter()
            .any(|(_, moves)| !moves.epsilon().is_empty());
        let columns = self
            .alphabet
            .iter()
            .map(|letter| Symbol::Letter(letter.as_str()))
            .chain(has_epsilon.then_some(Symbol::Epsilon))
            .collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(columns.iter().map(|symbol| match symbol {
                Symbol::Epsilon => EPSILON_GLYPH.to_string(),
                Symbol::Letter(letter) => letter.to_string(),
            })),
        );

        for state in &self.states {
            let marker = if state == &self.start { "→ " } else { "" };
            let label = if self.is_accepting(state) {
                format!("{marker}*{}", state.green())
            } else {
                format!("{marker}{state}")
            };
            let row = std::iter::once(label).chain(columns.iter().map(|symbol| {
                match self.transitions.destinations(state, *symbol) {
                    Some(destinations) => format!("{{{}}}", destinations.iter().join(", ")),
                    None => "-".to_string(),
                }
            }));
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn table_lists_rules() {
        let nfa = Definition::default()
            .with_states(["q0", "q1", "q2"])
            .with_alphabet(["a", "b"])
            .with_rules([
                ("q0", "a", "q1"),
                ("q0", "a", "q2"),
                ("q1", "epsilon", "q2"),
            ])
            .with_start("q0")
            .with_accept(["q2"])
            .into_automaton()
            .unwrap();
        let table = nfa.transition_table();

        assert!(table.contains("State"));
        assert!(table.contains("ε"));
        assert!(table.contains("→ q0"));
        assert!(table.contains("{q1, q2}"));
        assert!(table.contains("{q2}"));
        assert!(format!("{nfa:?}").starts_with("NFA with 3 states starting in q0"));
    }
}
