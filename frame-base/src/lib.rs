//! # Frame Machine
//!
//! This crate contains base things of the frame machine: a small symbolic
//! command engine that augments a host object (the frame) with a closed,
//! auditable vocabulary. There is no flow control, no recursion and no
//! user-defined procedures: a line goes through 4 stages to be executed:
//!
//! 1. [`lex`] -- tokenizer stage. Cuts a line into whitespace-delimited symbols.
//! 2. [`dictionary`] -- symbols are resolved to [`Atom`]s, or pushed as numerals
//!    in the frame's current base.
//! 3. [`atom`] -- every atom is bound to a primitive; composite atoms are bound to
//!    a flat body in the [`composite`] table.
//! 4. [`runner`] -- execute primitives against the [`frame`].
//!
//! # Example
//! Atom list can be found in [`Atom`] enum, the outer vocabulary in
//! [`DEFAULT_SYMBOLS`].
//!
//! ```
//! # use frame_base::runner::*;
//! #
//! let mut console = BufferConsole::new();
//! let mut machine = FrameRunner::new();
//!
//! for line in ["1 2 +", ".", "set query? .", "5 3 - .", "foo", "hex 10 dec ."] {
//!     match machine.interpret_line(line, &mut console) {
//!         Signal::Continue => continue,
//!         Signal::Exit(_) | Signal::Abort => panic!("runtime-error: terminated"),
//!     }
//! }
//!
//! assert_eq!(console.out, ["3", "1", "2", "16"]);
//! assert_eq!(console.err, ["warning: undefined symbol \"foo\""]);
//! assert_eq!(machine.interpret_line("1 2 3 quit", &mut console), Signal::Exit(0));
//! ```
//!
//! # Semantics
//!
//! Binary operators pop `a` (top) then `b` and push:
//!
//! | Atom    | Symbols        | Result  |
//! |---------|----------------|---------|
//! | `plus`  | `plus`, `+`    | `a + b` |
//! | `minus` | `minus`, `-`   | `b - a` |
//! | `mult`  | `mult`, `*`    | `a * b` |
//! | `div`   | `div`, `/`     | `b / a` |
//!
//! Division by zero is not guarded and panics. Missing operands are reported to
//! the [`Console`](runner::Console) and replaced by `0`; `dup`, `drop` and
//! `store!` skip themselves instead.
//!
//! Termination atoms (`quit`, `exit`, `abort`) do not touch the process, they
//! return a [`Signal`](runner::Signal) to the host.
//!

#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

// doc imports
#[allow(unused_imports)]
use {atom::*, dictionary::*};

pub mod atom;
pub mod composite;
pub mod dictionary;
pub mod frame;
pub mod lex;
pub mod runner;
pub mod stack;
