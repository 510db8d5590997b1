//! Atoms and the primitive table.
//!
//! An [`Atom`] is the opcode of the frame machine: one member of a closed set,
//! fixed at compile time. Every atom is bound to exactly one [`Primitive`] by
//! [`Atom::primitive`], which is an exhaustive `match`, so there is no atom
//! without a behavior. Composite atoms are bound to the [`Primitive::Composite`]
//! proxy; their bodies live in the
//! [composite table](crate::composite::CompositeTable).
use frame_base_proc_snake::snake;

use crate::{frame::Base, stack::Cell};

/// Generates the atom enum together with its name/doc tables.
///
/// ```ignore
/// impl_atoms! {
///     pub enum Foo {
///         /// Does nothing
///         Bar = 0,
///         BazQux = 1, // name() == "baz_qux"
///     }
/// }
/// ```
macro_rules! impl_atoms {
    ($(#[$m:meta])* $v:vis enum $name:ident { $($(#[doc = $doc:literal])* $var:ident = $code:literal),* $(,)? }) => {
        $(#[$m])*
        $v enum $name {$(
            $(#[doc = $doc])* $var = $code,
        )*}

        impl $name {
            /// Array of all variants, in numeric order.
            pub const VARIANTS: &[$name] = &[$(Self::$var, )*];

            /// Get snake_case name of variant.
            pub const fn name(self) -> &'static str {
                match self {$(
                    Self::$var => snake!($var),
                )*}
            }

            /// Get documentation for variant.
            ///
            /// *Note*: provided documentation is IN-CODE documentation, like that
            /// you type in `///`. Leading spaces are kept.
            pub const fn incode_doc(self) -> &'static str {
                match self {$(
                    Self::$var => concat!($($doc,)*),
                )*}
            }
        }
    };
}

impl_atoms! {
    /// Opcode of the frame machine.
    ///
    /// Raw values are stable and are what `symbols` prints.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
    #[repr(u16)]
    pub enum Atom {
        /// Does nothing. Safe closure for anything without a meaning
        Undefined = 0,

        /// Print a greeting
        Hello = 1,
        /// Pop exit status and terminate
        Exit = 2,
        /// Terminate abnormally, no cleanup
        Abort = 3,
        /// Print this help
        Help = 4,
        /// Terminate with status 0
        Quit = 5,

        /// Push 0
        Zero = 6,
        /// Push 1
        One = 7,
        /// Push 2
        Two = 8,
        /// Push 3
        Three = 9,

        /// Discard top
        Drop = 10,
        /// Duplicate top
        Dup = 11,
        /// Exchange top two
        Swap = 12,
        /// Copy second to top
        Over = 13,
        /// Push stack depth
        Depth = 14,
        /// dup dup
        TwoDup = 15,
        /// drop drop
        TwoDrop = 16,
        /// over over
        TwoOver = 17,

        /// Push `b + a`
        Plus = 18,
        /// Push `b - a` (top is subtrahend)
        Minus = 19,
        /// Push `b * a`
        Mult = 20,
        /// Push `b / a` (top is divisor)
        Div = 21,

        /// Pop and print top in current base
        Dot = 22,
        /// Use base 10
        Dec = 23,
        /// Use base 16
        Hex = 24,
        /// Use base 8
        Oct = 25,

        /// List symbol dictionary
        Symbols = 26,

        /// Raise frame flag
        FlagSet = 27,
        /// Lower frame flag
        FlagReset = 28,
        /// Push frame flag as 1 or 0
        FlagQuery = 29,
        /// Pop value into frame flag
        FlagStore = 30,

        /// hello hello hello
        ThreeHello = 31,
    }
}

/// Executable behavior bound to an atom.
///
/// Parameterized behaviors carry their parameter instead of having one
/// variant per instantiation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Primitive {
    NoOp,

    Hello,
    Help,
    Abort,
    Exit,
    Quit,

    Constant(Cell),

    Drop,
    Dup,
    Swap,
    Over,
    Depth,

    Plus,
    Minus,
    Mult,
    Div,

    Dot,
    SetBase(Base),

    FlagSet,
    FlagReset,
    FlagQuery,
    FlagStore,

    Symbols,

    /// Controlling proxy: the behavior is the atom's body in the composite table.
    Composite,
}

impl Atom {
    /// The primitive table.
    pub const fn primitive(self) -> Primitive {
        match self {
            Atom::Undefined => Primitive::NoOp,

            Atom::Hello => Primitive::Hello,
            Atom::Exit => Primitive::Exit,
            Atom::Abort => Primitive::Abort,
            Atom::Help => Primitive::Help,
            Atom::Quit => Primitive::Quit,

            Atom::Zero => Primitive::Constant(0),
            Atom::One => Primitive::Constant(1),
            Atom::Two => Primitive::Constant(2),
            Atom::Three => Primitive::Constant(3),

            Atom::Drop => Primitive::Drop,
            Atom::Dup => Primitive::Dup,
            Atom::Swap => Primitive::Swap,
            Atom::Over => Primitive::Over,
            Atom::Depth => Primitive::Depth,

            Atom::Plus => Primitive::Plus,
            Atom::Minus => Primitive::Minus,
            Atom::Mult => Primitive::Mult,
            Atom::Div => Primitive::Div,

            Atom::Dot => Primitive::Dot,
            Atom::Dec => Primitive::SetBase(Base::Dec),
            Atom::Hex => Primitive::SetBase(Base::Hex),
            Atom::Oct => Primitive::SetBase(Base::Oct),

            Atom::Symbols => Primitive::Symbols,

            Atom::FlagSet => Primitive::FlagSet,
            Atom::FlagReset => Primitive::FlagReset,
            Atom::FlagQuery => Primitive::FlagQuery,
            Atom::FlagStore => Primitive::FlagStore,

            Atom::TwoDup | Atom::TwoDrop | Atom::TwoOver | Atom::ThreeHello => {
                Primitive::Composite
            }
        }
    }

    /// Returns `true` if the atom's behavior is a composite body.
    #[inline(always)]
    pub const fn is_composite(self) -> bool {
        matches!(self.primitive(), Primitive::Composite)
    }

    /// Try get atom by raw id.
    #[inline(always)]
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::VARIANTS.iter().find(|a| a.as_raw() == raw).copied()
    }

    /// Returns raw atom id.
    #[inline(always)]
    pub const fn as_raw(self) -> u16 {
        self as u16
    }
}
