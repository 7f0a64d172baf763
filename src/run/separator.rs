/// Determines how an input text is cut into symbols.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq)]
pub enum Separator {
    /// Every character is a symbol of its own.
    #[default]
    Characters,
    /// Symbols are separated by the given (non-empty) string.
    Literal(String),
}

impl Separator {
    /// Creates a separator from its textual form, where the empty string means that every
    /// character is a separate symbol.
    pub fn new(separator: &str) -> Self {
        if separator.is_empty() {
            Separator::Characters
        } else {
            Separator::Literal(separator.to_string())
        }
    }

    /// Splits `input` into symbols. Whitespace around the input is ignored and an input that
    /// is empty after trimming yields no symbols at all, whichever separator is used.
    pub fn tokenize<'s>(&self, input: &'s str) -> Vec<&'s str> {
        let input = input.trim();
        if input.is_empty() {
            return vec![];
        }
        match self {
            Separator::Characters => input
                .char_indices()
                .map(|(i, c)| &input[i..i + c.len_utf8()])
                .collect(),
            Separator::Literal(separator) => input.split(separator.as_str()).collect(),
        }
    }
}

impl From<&str> for Separator {
    fn from(value: &str) -> Self {
        Separator::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Separator;

    #[test]
    fn characters() {
        let tokens = Separator::Characters.tokenize("0110");
        assert_eq!(tokens, ["0", "1", "1", "0"]);
        let tokens = Separator::new("").tokenize(" aεb\n");
        assert_eq!(tokens, ["a", "ε", "b"]);
    }

    #[test]
    fn literal() {
        let tokens = Separator::from(" ").tokenize("ab c  d");
        assert_eq!(tokens, ["ab", "c", "", "d"]);
        let tokens = Separator::new(";").tokenize("q;r;");
        assert_eq!(tokens, ["q", "r", ""]);
    }

    #[test]
    fn empty_input_is_the_empty_word() {
        assert_eq!(Separator::Characters.tokenize(""), Vec::<&str>::new());
        assert_eq!(Separator::new(",").tokenize("  \n"), Vec::<&str>::new());
    }
}
