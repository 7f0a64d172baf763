use std::{borrow::Cow, fmt::Display};

/// Keyword spelling of the empty word in definitions. It is matched case-insensitively.
pub const EPSILON_KEYWORD: &str = "epsilon";
/// The glyph spelling of the empty word.
pub const EPSILON_GLYPH: &str = "ε";

/// Returns `true` if `text` is one of the spellings of epsilon, that is either the glyph `ε`
/// or the word `epsilon` in any capitalization.
pub fn is_epsilon(text: &str) -> bool {
    text == EPSILON_GLYPH || text.eq_ignore_ascii_case(EPSILON_KEYWORD)
}

/// Undoes the damage done by reading UTF-8 encoded text as if it were Latin-1, which turns
/// for example `ε` into `Îµ`.
///
/// If every character of `text` fits into a single byte, these bytes are decoded as UTF-8
/// and the result is returned. In all other cases, i.e. when `text` contains a character
/// outside of Latin-1 or the bytes are not valid UTF-8, `text` is handed back unchanged.
/// Text that was never corrupted therefore passes through untouched.
pub fn repair_encoding(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let bytes: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(c).ok()).collect();
    match bytes.map(String::from_utf8) {
        Some(Ok(repaired)) => Cow::Owned(repaired),
        _ => Cow::Borrowed(text),
    }
}

/// A symbol on a transition. This is either the empty word [`Symbol::Epsilon`], which is
/// taken without consuming input, or a letter of the alphabet.
///
/// The type parameter determines how the letter is stored, owned symbols (the default)
/// are kept in transition tables, `Symbol<&str>` is handed out when iterating over them.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Symbol<S = String> {
    /// The empty word.
    Epsilon,
    /// A letter from the alphabet.
    Letter(S),
}

impl Symbol {
    /// Reads a symbol field of a definition: the text is run through [`repair_encoding`] and
    /// afterwards all spellings of epsilon are mapped to [`Symbol::Epsilon`].
    pub fn parse(text: &str) -> Self {
        Self::from(&*repair_encoding(text))
    }
}

impl<S> Symbol<S> {
    /// Returns `true` if `self` is the empty word.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Gives the letter if `self` is not epsilon.
    pub fn letter(&self) -> Option<&S> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Letter(s) => Some(s),
        }
    }
}

impl<S: AsRef<str>> Symbol<S> {
    /// Borrows the letter, if any.
    pub fn as_deref(&self) -> Symbol<&str> {
        match self {
            Symbol::Epsilon => Symbol::Epsilon,
            Symbol::Letter(s) => Symbol::Letter(s.as_ref()),
        }
    }
}

impl Symbol<&str> {
    /// Creates an owned copy of `self`.
    pub fn into_owned(self) -> Symbol {
        match self {
            Symbol::Epsilon => Symbol::Epsilon,
            Symbol::Letter(s) => Symbol::Letter(s.to_string()),
        }
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        if is_epsilon(value) {
            Symbol::Epsilon
        } else {
            Symbol::Letter(value.to_string())
        }
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        if is_epsilon(&value) {
            Symbol::Epsilon
        } else {
            Symbol::Letter(value)
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::from(value.to_string())
    }
}

impl<S: Display> Display for Symbol<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "{EPSILON_KEYWORD}"),
            Symbol::Letter(s) => write!(f, "{s}"),
        }
    }
}
