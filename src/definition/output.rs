use std::fmt::{Display, Formatter, Result, Write};

use crate::automaton::{Automaton, Definition, Transitions};

use super::input::Section;

fn write_section<W, I, T>(w: &mut W, section: Section, lines: I) -> Result
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Display,
{
    writeln!(w, "[{}]", section.name().unwrap_or_default())?;
    for line in lines {
        writeln!(w, "{line}")?;
    }
    w.write_str("End\n")
}

/// Writes the five sections in the order states, alphabet, rules, start, accept, separated by
/// blank lines. Epsilon rules use the keyword spelling.
fn write_definition<W: Write>(
    w: &mut W,
    states: impl IntoIterator<Item = impl Display>,
    alphabet: impl IntoIterator<Item = impl Display>,
    transitions: &Transitions,
    start: Option<&str>,
    accept: impl IntoIterator<Item = impl Display>,
) -> Result {
    write_section(w, Section::States, states)?;
    w.write_char('\n')?;
    write_section(w, Section::Sigma, alphabet)?;
    w.write_char('\n')?;
    write_section(w, Section::Rules, transitions.rules())?;
    w.write_char('\n')?;
    write_section(w, Section::Start, start)?;
    w.write_char('\n')?;
    write_section(w, Section::Accept, accept)
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_definition(
            f,
            self.states(),
            self.alphabet(),
            self.transitions(),
            self.start(),
            self.accept(),
        )
    }
}

/// Writes the automaton in the definition format, reading the output back in yields an equal
/// automaton.
impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_definition(
            f,
            self.states(),
            self.alphabet(),
            self.transitions(),
            Some(self.start().as_str()),
            self.accept(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const WRITTEN: &str = "[States]
q0
q1
End

[Sigma]
0
1
End

[Rules]
q0, 0, q0
q0, 1, q1
q1, epsilon, q0
End

[Start]
q0
End

[Accept]
q1
End
";

    #[test_log::test]
    fn writes_sections() {
        let nfa = Definition::default()
            .with_states(["q0", "q1"])
            .with_alphabet(["0", "1"])
            .with_rules([("q0", "0", "q0"), ("q0", "1", "q1"), ("q1", "ε", "q0")])
            .with_start("q0")
            .with_accept(["q1"])
            .into_automaton()
            .unwrap();
        assert_eq!(nfa.to_string(), WRITTEN);
        assert_eq!(nfa.to_definition().to_string(), WRITTEN);
    }

    #[test_log::test]
    fn reading_back_yields_equal_automaton() {
        let nfa = load(WRITTEN).unwrap();
        let reread = load(&nfa.to_string()).unwrap();
        assert_eq!(nfa, reread);
    }

    #[test_log::test]
    fn incomplete_definition_is_written() {
        let written = Definition::default().with_states(["q0"]).to_string();
        assert!(written.contains("[Start]\nEnd\n"));
        assert!(written.starts_with("[States]\nq0\nEnd\n\n[Sigma]\nEnd\n"));
    }
}
