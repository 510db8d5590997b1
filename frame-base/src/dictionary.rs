//! Symbol dictionary: outer text tokens to inner atoms.
//!
//! Tokens are case-sensitive. Several tokens may alias the same atom. Tokens
//! that are not in the dictionary may still be numerals, see
//! [`parse_numeral`].

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};

use crate::{atom::Atom, frame::Base, stack::Cell};

/// Mapping of symbols to atoms. Iteration is in ascending token order.
///
/// # Example
/// ```
/// # use frame_base::{atom::Atom, dictionary::SymbolDictionary};
/// #
/// let local = SymbolDictionary::new().populate([("plus", Atom::Plus), ("plus!", Atom::Plus)]);
/// let dict = SymbolDictionary::default().merge(local);
///
/// assert_eq!(dict.lookup("+"), Some(Atom::Plus));
/// assert_eq!(dict.lookup("plus!"), Some(Atom::Plus));
/// assert_eq!(dict.lookup("PLUS"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolDictionary {
    entries: BTreeMap<String, Atom>,
}

impl SymbolDictionary {
    /// Creates empty dictionary.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Populates dictionary. It using builder pattern; a later entry for the
    /// same symbol replaces the earlier one.
    pub fn populate<'a, I>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Atom)>,
    {
        for (symbol, atom) in v {
            self.entries.insert(symbol.to_string(), atom);
        }

        self
    }

    /// Merges `other` into self; entries of `other` win.
    pub fn merge(mut self, other: SymbolDictionary) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn lookup(&self, symbol: &str) -> Option<Atom> {
        self.entries.get(symbol).copied()
    }

    /// All symbols bound to `atom`.
    pub fn aliases(&self, atom: Atom) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(_, a)| **a == atom)
            .map(|(s, _)| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Atom)> {
        self.entries.iter().map(|(s, a)| (s.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outer vocabulary of the console.
#[rustfmt::skip]
pub const DEFAULT_SYMBOLS: &[(&str, Atom)] = &[
    ("zero",  Atom::Zero),  ("0",      Atom::Zero),
    ("one",   Atom::One),   ("1",      Atom::One),
    ("two",   Atom::Two),   ("2",      Atom::Two),
    ("three", Atom::Three), ("3",      Atom::Three),
    ("dup",   Atom::Dup),   ("2dup",   Atom::TwoDup),
    ("drop",  Atom::Drop),  ("2drop",  Atom::TwoDrop),
    ("over",  Atom::Over),  ("2over",  Atom::TwoOver),
    ("swap",  Atom::Swap),  ("depth?", Atom::Depth),
    ("plus",  Atom::Plus),  ("+",      Atom::Plus),
    ("minus", Atom::Minus), ("-",      Atom::Minus),
    ("mult",  Atom::Mult),  ("*",      Atom::Mult),
    ("div",   Atom::Div),   ("/",      Atom::Div),
    ("dec",   Atom::Dec),   ("hex",    Atom::Hex),   ("oct", Atom::Oct),
    ("dot",   Atom::Dot),   (".",      Atom::Dot),
    ("set",   Atom::FlagSet), ("reset", Atom::FlagReset), ("query?", Atom::FlagQuery), ("store!", Atom::FlagStore),
    ("hello", Atom::Hello),
    ("exit",  Atom::Exit),  ("quit",   Atom::Quit),  ("abort", Atom::Abort), ("help", Atom::Help),
    ("symbols", Atom::Symbols),
    ("3hello",  Atom::ThreeHello),
];

impl SymbolDictionary {
    /// Dictionary with [`DEFAULT_SYMBOLS`].
    pub fn builtin() -> Self {
        Self::new().populate(DEFAULT_SYMBOLS.iter().copied())
    }
}

impl Default for SymbolDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parses a numeral in `base`.
///
/// A numeral starts with a decimal digit and the whole token must be valid
/// in the base, otherwise it is not a numeral.
///
/// ```
/// # use frame_base::{dictionary::parse_numeral, frame::Base};
/// assert_eq!(parse_numeral("10", Base::Hex), Some(16));
/// assert_eq!(parse_numeral("10", Base::Dec), Some(10));
/// assert_eq!(parse_numeral("9", Base::Oct), None);
/// assert_eq!(parse_numeral("ff", Base::Hex), None); // letter first
/// ```
pub fn parse_numeral(token: &str, base: Base) -> Option<Cell> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Cell::from_str_radix(token, base.radix()).ok()
}
