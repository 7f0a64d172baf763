use std::fmt::Display;

use crate::{
    math::{IndexedMap, OrderedSet},
    symbol::Symbol,
};

/// States are identified by their label.
pub type State = String;

/// All transitions leaving a single state. Epsilon transitions are kept apart from the
/// ones that consume a letter, so both can be looked up without allocating a [`Symbol`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Moves {
    epsilon: OrderedSet<State>,
    on: IndexedMap<String, OrderedSet<State>>,
}

impl Moves {
    /// The states that can be reached by taking a single epsilon transition.
    pub fn epsilon(&self) -> &OrderedSet<State> {
        &self.epsilon
    }

    /// The destinations for the given letter, `None` if there is no rule for it.
    pub fn on(&self, letter: &str) -> Option<&OrderedSet<State>> {
        self.on.get(letter)
    }

    /// The destinations for a symbol, `None` if no rule for it exists.
    pub fn destinations(&self, symbol: Symbol<&str>) -> Option<&OrderedSet<State>> {
        match symbol {
            Symbol::Epsilon if self.epsilon.is_empty() => None,
            Symbol::Epsilon => Some(&self.epsilon),
            Symbol::Letter(letter) => self.on(letter),
        }
    }

    /// Iterates over the distinct symbols that have at least one rule. Letters come in the
    /// order in which they were first used, epsilon comes last.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol<&'_ str>> + '_ {
        self.on
            .keys()
            .map(|letter| Symbol::Letter(letter.as_str()))
            .chain((!self.epsilon.is_empty()).then_some(Symbol::Epsilon))
    }

    /// Iterates over pairs of symbol and the corresponding set of destinations.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol<&'_ str>, &'_ OrderedSet<State>)> + '_ {
        self.symbols()
            .filter_map(|symbol| self.destinations(symbol).map(|to| (symbol, to)))
    }
}

/// A single rule `from, symbol, to` of the transition relation.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Rule<'a> {
    /// Source state.
    pub from: &'a str,
    /// The symbol that is read, or epsilon.
    pub symbol: Symbol<&'a str>,
    /// Destination state.
    pub to: &'a str,
}

impl Display for Rule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.from, self.symbol, self.to)
    }
}

/// The transition relation, which maps a source state and a symbol to a set of
/// destinations. Lookups go through two hash maps, one keyed by the source and one keyed
/// by the letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions(IndexedMap<State, Moves>);

impl Transitions {
    /// Adds the rule `from, symbol, to`. Returns `false` if it was present already.
    pub fn insert<F, T>(&mut self, from: F, symbol: Symbol, to: T) -> bool
    where
        F: Into<State>,
        T: Into<State>,
    {
        let moves = self.0.entry(from.into()).or_default();
        let destinations = match symbol {
            Symbol::Epsilon => &mut moves.epsilon,
            Symbol::Letter(letter) => moves.on.entry(letter).or_default(),
        };
        destinations.insert(to.into())
    }

    /// Gives the outgoing moves of `from`, `None` if it is not the source of any rule.
    pub fn moves_from(&self, from: &str) -> Option<&Moves> {
        self.0.get(from)
    }

    /// The destinations of `from` under `symbol`.
    pub fn destinations(&self, from: &str, symbol: Symbol<&str>) -> Option<&OrderedSet<State>> {
        self.moves_from(from).and_then(|moves| moves.destinations(symbol))
    }

    /// States reachable from `from` by one epsilon transition.
    pub fn epsilon_successors<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a State> + 'a {
        self.moves_from(from).into_iter().flat_map(|moves| moves.epsilon.iter())
    }

    /// Iterates over all states that are the source of some rule.
    pub fn sources(&self) -> impl Iterator<Item = &'_ State> + '_ {
        self.0.keys()
    }

    /// Iterates over the sources together with their outgoing moves.
    pub fn iter(&self) -> impl Iterator<Item = (&'_ State, &'_ Moves)> + '_ {
        self.0.iter()
    }

    /// Iterates over every single rule.
    pub fn rules(&self) -> impl Iterator<Item = Rule<'_>> + '_ {
        self.0.iter().flat_map(|(from, moves)| {
            moves.iter().flat_map(move |(symbol, destinations)| {
                destinations.iter().map(move |to| Rule {
                    from: from.as_str(),
                    symbol,
                    to: to.as_str(),
                })
            })
        })
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|moves| moves.iter())
            .map(|(_, destinations)| destinations.len())
            .sum()
    }

    /// Returns `true` if there are no rules at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F, S, T> FromIterator<(F, S, T)> for Transitions
where
    F: Into<State>,
    S: Into<Symbol>,
    T: Into<State>,
{
    fn from_iter<I: IntoIterator<Item = (F, S, T)>>(iter: I) -> Self {
        let mut transitions = Transitions::default();
        for (from, symbol, to) in iter {
            transitions.insert(from, symbol.into(), to);
        }
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_accumulate() {
        let mut transitions = Transitions::default();
        assert!(transitions.insert("q0", Symbol::from("a"), "q0"));
        assert!(transitions.insert("q0", Symbol::from("a"), "q1"));
        assert!(!transitions.insert("q0", Symbol::from("a"), "q1"));
        assert!(transitions.insert("q0", Symbol::Epsilon, "q2"));

        let on_a = transitions
            .destinations("q0", Symbol::Letter("a"))
            .expect("rule for a exists");
        assert_eq!(on_a.iter().collect::<Vec<_>>(), ["q0", "q1"]);
        assert_eq!(transitions.len(), 3);
        assert_eq!(
            transitions.epsilon_successors("q0").collect::<Vec<_>>(),
            ["q2"]
        );
        assert_eq!(transitions.epsilon_successors("q1").count(), 0);
        assert!(transitions.destinations("q0", Symbol::Letter("b")).is_none());
        assert!(transitions.destinations("q2", Symbol::Epsilon).is_none());
    }

    #[test]
    fn rules_are_listed_per_source() {
        let transitions: Transitions = [
            ("q0", "0", "q0"),
            ("q0", "1", "q1"),
            ("q1", "epsilon", "q0"),
            ("q1", "1", "q1"),
        ]
        .into_iter()
        .collect();

        let rules = transitions.rules().map(|r| r.to_string()).collect::<Vec<_>>();
        assert_eq!(
            rules,
            ["q0, 0, q0", "q0, 1, q1", "q1, 1, q1", "q1, epsilon, q0"]
        );
        assert_eq!(transitions.sources().collect::<Vec<_>>(), ["q0", "q1"]);
        let symbols = transitions
            .moves_from("q1")
            .map(|moves| moves.symbols().collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(symbols, [Symbol::Letter("1"), Symbol::Epsilon]);
    }
}
