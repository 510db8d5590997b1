//! Host frame: the object the machine is augmenting.

use core::fmt;

use crate::stack::{Cell, StackUnderflow, ValueStack};

/// Numeric display base of the frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
#[repr(u32)]
pub enum Base {
    #[default]
    Dec = 10,
    Hex = 16,
    Oct = 8,
}

impl Base {
    /// Gets base by radix. Anything except 16 and 8 is base 10.
    ///
    /// ```
    /// # use frame_base::frame::Base;
    /// assert_eq!(Base::from_radix(16), Base::Hex);
    /// assert_eq!(Base::from_radix(2), Base::Dec);
    /// ```
    pub const fn from_radix(radix: u32) -> Self {
        match radix {
            16 => Self::Hex,
            8 => Self::Oct,
            _ => Self::Dec,
        }
    }
    pub const fn radix(self) -> u32 {
        self as u32
    }

    /// Renders a value in this base. Hex and octal show negative values as
    /// two's complement.
    pub fn render(self, v: Cell) -> Rendered {
        Rendered(self, v)
    }
}

/// See [`Base::render`].
#[derive(Clone, Copy, Debug)]
pub struct Rendered(Base, Cell);

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Base::Dec => write!(f, "{}", self.1),
            Base::Hex => write!(f, "{:x}", self.1),
            Base::Oct => write!(f, "{:o}", self.1),
        }
    }
}

/// The frame: data stack, display base and a hidden indicator.
///
/// The indicator is private and can be reached only through the four
/// `flag_*` accessors.
///
/// # Example
/// ```
/// # use frame_base::frame::Frame;
/// let mut frame = Frame::new();
/// frame.flag_set();
/// frame.flag_query();
///
/// assert_eq!(frame.stack.pop(), Ok(1));
/// ```
#[derive(Clone, Default, Debug)]
pub struct Frame {
    pub stack: ValueStack,
    base: Base,
    flag: bool,
}

impl Frame {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base(&self) -> Base {
        self.base
    }
    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }
    /// Sets base by radix; unsupported radixes silently become 10.
    pub fn request_base(&mut self, radix: u32) {
        self.base = Base::from_radix(radix);
    }

    pub fn flag_set(&mut self) {
        self.flag = true;
    }
    pub fn flag_reset(&mut self) {
        self.flag = false;
    }
    /// Pushes the indicator as `1` or `0`.
    pub fn flag_query(&mut self) {
        self.stack.push(self.flag as Cell);
    }
    /// Pops a value into the indicator, non-zero is `true`. On underflow the
    /// indicator is left unchanged.
    pub fn flag_store(&mut self) -> Result<(), StackUnderflow> {
        self.flag = self.stack.pop()? != 0;
        Ok(())
    }
}
