//! Composite table: atoms whose behavior is a fixed sequence of other atoms.
//!
//! Bodies are flat. A body may only contain atoms that are not composites
//! themselves, which is checked when the table is built, so expanding a
//! composite never recurses and always terminates after the body length.

use core::fmt;
use alloc::{vec, vec::Vec};
use hashbrown::HashMap;

use crate::atom::Atom;

/// Owned composite bodies, keyed by the composite atom.
///
/// # Example
/// ```
/// # use frame_base::{atom::Atom, composite::{CompositeTable, CompositeError}};
/// #
/// let table = CompositeTable::new()
///     .define(Atom::TwoDup, [Atom::Dup, Atom::Dup])
///     .unwrap();
/// assert_eq!(table.body(Atom::TwoDup), Some(&[Atom::Dup, Atom::Dup][..]));
///
/// // nested composites are rejected
/// let res = CompositeTable::new().define(Atom::TwoDup, [Atom::TwoDrop]);
/// assert_eq!(res.err(), Some(CompositeError::Nested { composite: Atom::TwoDup, member: Atom::TwoDrop }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeTable {
    bodies: HashMap<Atom, Vec<Atom>>,
}

impl CompositeTable {
    /// Creates empty table.
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    /// Binds `body` to the composite `atom`, replacing an older body. It using
    /// builder pattern.
    pub fn define<I>(mut self, atom: Atom, body: I) -> Result<Self, CompositeError>
    where
        I: IntoIterator<Item = Atom>,
    {
        if !atom.is_composite() {
            return Err(CompositeError::NotComposite(atom));
        }
        let body: Vec<Atom> = body.into_iter().collect();
        if let Some(member) = body.iter().copied().find(|m| m.is_composite()) {
            return Err(CompositeError::Nested {
                composite: atom,
                member,
            });
        }

        self.bodies.insert(atom, body);
        Ok(self)
    }

    pub fn body(&self, atom: Atom) -> Option<&[Atom]> {
        self.bodies.get(&atom).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, &[Atom])> {
        self.bodies.iter().map(|(a, b)| (*a, b.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for CompositeTable {
    /// Built-in composites: `2dup`, `2drop`, `2over` and `3hello`.
    fn default() -> Self {
        let bodies = [
            (Atom::TwoDup, vec![Atom::Dup, Atom::Dup]),
            (Atom::TwoDrop, vec![Atom::Drop, Atom::Drop]),
            (Atom::TwoOver, vec![Atom::Over, Atom::Over]),
            (Atom::ThreeHello, vec![Atom::Hello, Atom::Hello, Atom::Hello]),
        ];

        Self {
            bodies: bodies.into_iter().collect(),
        }
    }
}

/// Represents error that may occur while building a [`CompositeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeError {
    /// Atom is bound to a primitive, it cannot carry a body
    NotComposite(Atom),
    /// Body contains a composite atom
    Nested { composite: Atom, member: Atom },
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotComposite(atom) => write!(f, "atom `{}` is not a composite", atom.name()),
            Self::Nested { composite, member } => write!(
                f,
                "composite `{}` contains composite `{}`",
                composite.name(),
                member.name()
            ),
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for CompositeError {}
