//! Frame machine runner.
//!
//! [`FrameRunner`] is the context object of the machine: it owns the
//! [`Frame`] and the immutable tables, and every dispatch goes through it.
//! Output is written to a [`Console`]; process termination is returned to the
//! caller as a [`Signal`].

use core::fmt;
use alloc::{format, string::String, vec::Vec};
use tracing::{debug, trace, warn};

use crate::{
    atom::{Atom, Primitive},
    composite::CompositeTable,
    dictionary::{parse_numeral, SymbolDictionary},
    frame::Frame,
    lex::Lex,
    stack::{Cell, StackUnderflow},
};

/// Output of the machine: normal lines and diagnostic lines go to separate
/// streams.
pub trait Console {
    /// Writes one line of normal output.
    fn print(&mut self, line: fmt::Arguments<'_>);
    /// Writes one diagnostic line.
    fn diagnose(&mut self, diag: &Diagnostic<'_>);
}

/// Console that keeps everything in memory.
///
/// # Example
/// ```
/// # use frame_base::runner::{BufferConsole, FrameRunner};
/// let mut console = BufferConsole::new();
/// let mut machine = FrameRunner::new();
///
/// machine.interpret_line("1 2 + . nope", &mut console);
///
/// assert_eq!(console.out, ["3"]);
/// assert_eq!(console.err, ["warning: undefined symbol \"nope\""]);
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct BufferConsole {
    pub out: Vec<String>,
    pub err: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Console for BufferConsole {
    fn print(&mut self, line: fmt::Arguments<'_>) {
        self.out.push(format!("{line}"));
    }
    fn diagnose(&mut self, diag: &Diagnostic<'_>) {
        self.err.push(format!("{diag}"));
    }
}

/// Recoverable condition reported while interpreting. Never stops the
/// interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    /// Operand missing on the data stack
    Underflow { atom: Atom, recovery: Recovery },
    /// Token is neither a symbol nor a numeral in the current base
    UndefinedSymbol(&'a str),
}

/// What an operation did instead of its missing operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Zero was used for the missing operand
    SubstituteZero,
    /// Operation was skipped
    Ignored,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow {
                atom,
                recovery: Recovery::SubstituteZero,
            } => write!(f, "error: {} in `{}`, zero enforced", StackUnderflow, atom.name()),
            Self::Underflow {
                atom,
                recovery: Recovery::Ignored,
            } => write!(f, "error: {} in `{}`, operation ignored", StackUnderflow, atom.name()),
            Self::UndefinedSymbol(token) => write!(f, "warning: undefined symbol \"{token}\""),
        }
    }
}

/// Type of returned signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// All ok, go on
    Continue,
    /// Terminate process with exit status
    Exit(i32),
    /// Terminate process abnormally, no cleanup
    Abort,
}

/// What a token means to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Symbol bound in dictionary
    Atom(Atom),
    /// Numeral in current base, pushed without dispatch
    Literal(Cell),
    /// Nothing
    Undefined,
}

/// Greeting of `hello`.
pub const GREETING: &str = "Hello, world!";

/// Fixed part of `help`.
pub const GUIDANCE: &str = "Type symbols separated by spaces. Numerals are pushed in the current base. \
Say 'symbols' to list dictionary, 'quit' to terminate. Atoms:";

/// Frame machine runner.
///
/// # Example
/// ```
/// # use frame_base::runner::{BufferConsole, FrameRunner, Signal};
/// let mut console = BufferConsole::new();
/// let mut machine = FrameRunner::new();
///
/// assert_eq!(machine.interpret_line("hex 10 dup", &mut console), Signal::Continue);
/// assert_eq!(machine.frame.stack.as_slice(), &[16, 16]);
///
/// assert_eq!(machine.interpret_line("7 exit 42", &mut console), Signal::Exit(7));
/// ```
#[derive(Clone, Default, Debug)]
pub struct FrameRunner {
    pub frame: Frame,
    pub composites: CompositeTable,
    pub symbols: SymbolDictionary,
}

impl FrameRunner {
    /// Creates new runner with fresh frame and built-in tables.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates new runner with fresh frame and given tables.
    pub fn with_tables(composites: CompositeTable, symbols: SymbolDictionary) -> Self {
        Self {
            frame: Frame::new(),
            composites,
            symbols,
        }
    }

    /// Executes the primitive bound to `atom`. Total: every atom does
    /// something defined, [`Atom::Undefined`] does nothing.
    pub fn dispatch<C: Console + ?Sized>(&mut self, atom: Atom, console: &mut C) -> Signal {
        trace!(atom = atom.name(), raw = atom.as_raw(), "dispatch");

        match atom.primitive() {
            Primitive::NoOp => {}

            Primitive::Hello => console.print(format_args!("{GREETING}")),
            Primitive::Help => {
                console.print(format_args!("{GUIDANCE}"));
                for variant in Atom::VARIANTS {
                    console.print(format_args!("  {:<12} {}", variant.name(), variant.incode_doc().trim()));
                }
            }
            Primitive::Abort => return Signal::Abort,
            Primitive::Exit => {
                // platform defined: status is truncated to i32
                let code = self.take(atom, console);
                return Signal::Exit(code as i32);
            }
            Primitive::Quit => return Signal::Exit(0),

            Primitive::Constant(v) => self.frame.stack.push(v),

            Primitive::Drop => {
                if self.frame.stack.pop().is_err() {
                    Self::underflow(atom, Recovery::Ignored, console);
                }
            }
            Primitive::Dup => match self.frame.stack.peek() {
                Ok(v) => self.frame.stack.push(v),
                Err(_) => Self::underflow(atom, Recovery::Ignored, console),
            },
            Primitive::Swap => {
                let (a, b) = (self.take(atom, console), self.take(atom, console));
                self.frame.stack.push(a);
                self.frame.stack.push(b);
            }
            Primitive::Over => {
                let (a, b) = (self.take(atom, console), self.take(atom, console));
                self.frame.stack.push(b);
                self.frame.stack.push(a);
                self.frame.stack.push(b);
            }
            Primitive::Depth => {
                let depth = self.frame.stack.depth() as Cell;
                self.frame.stack.push(depth);
            }

            Primitive::Plus => self.binary(atom, console, |a, b| a.wrapping_add(b)),
            Primitive::Minus => self.binary(atom, console, |a, b| b.wrapping_sub(a)),
            Primitive::Mult => self.binary(atom, console, |a, b| a.wrapping_mul(b)),
            // division by zero traps, not guarded
            Primitive::Div => self.binary(atom, console, |a, b| b / a),

            Primitive::Dot => {
                let a = self.take(atom, console);
                console.print(format_args!("{}", self.frame.base().render(a)));
            }
            Primitive::SetBase(base) => self.frame.set_base(base),

            Primitive::FlagSet => self.frame.flag_set(),
            Primitive::FlagReset => self.frame.flag_reset(),
            Primitive::FlagQuery => self.frame.flag_query(),
            Primitive::FlagStore => {
                if self.frame.flag_store().is_err() {
                    Self::underflow(atom, Recovery::Ignored, console);
                }
            }

            Primitive::Symbols => {
                console.print(format_args!("Symbols to Atoms mapping:"));
                for (symbol, atom) in self.symbols.iter() {
                    console.print(format_args!("\"{symbol}\" -> {}", atom.as_raw()));
                }
            }

            Primitive::Composite => return self.expand(atom, console),
        }

        Signal::Continue
    }

    /// Dispatches each atom of the composite body, left to right. Stops early
    /// only on a termination signal.
    pub fn expand<C: Console + ?Sized>(&mut self, atom: Atom, console: &mut C) -> Signal {
        let Some(body) = self.composites.body(atom) else {
            warn!(atom = atom.name(), "composite has no body");
            return Signal::Continue;
        };
        // bodies are flat, members never expand further
        let body = body.to_vec();
        debug!(atom = atom.name(), len = body.len(), "expand");

        for member in body {
            match self.dispatch(member, console) {
                Signal::Continue => {}
                sig => return sig,
            }
        }

        Signal::Continue
    }

    /// Resolves a token: dictionary first, numeral in current base second.
    pub fn resolve(&self, token: &str) -> Resolution {
        if let Some(atom) = self.symbols.lookup(token) {
            return Resolution::Atom(atom);
        }
        match parse_numeral(token, self.frame.base()) {
            Some(v) => Resolution::Literal(v),
            None => Resolution::Undefined,
        }
    }

    /// Interprets tokens in order. Undefined tokens are reported and skipped.
    /// Returns on the first termination signal, remaining tokens are not
    /// evaluated.
    pub fn interpret<'t, I, C>(&mut self, tokens: I, console: &mut C) -> Signal
    where
        I: IntoIterator<Item = &'t str>,
        C: Console + ?Sized,
    {
        for token in tokens {
            let sig = match self.resolve(token) {
                Resolution::Atom(atom) => self.dispatch(atom, console),
                Resolution::Literal(v) => {
                    debug!(token, value = v, "literal");
                    self.frame.stack.push(v);
                    Signal::Continue
                }
                Resolution::Undefined => {
                    console.diagnose(&Diagnostic::UndefinedSymbol(token));
                    Signal::Continue
                }
            };
            if sig != Signal::Continue {
                return sig;
            }
        }

        Signal::Continue
    }

    /// Tokenizes and interprets one line.
    pub fn interpret_line<C: Console + ?Sized>(&mut self, line: &str, console: &mut C) -> Signal {
        self.interpret(Lex::new(line), console)
    }

    fn underflow<C: Console + ?Sized>(atom: Atom, recovery: Recovery, console: &mut C) {
        console.diagnose(&Diagnostic::Underflow { atom, recovery });
    }

    /// Pops an operand, zero if there is none.
    fn take<C: Console + ?Sized>(&mut self, atom: Atom, console: &mut C) -> Cell {
        self.frame.stack.pop().unwrap_or_else(|_| {
            Self::underflow(atom, Recovery::SubstituteZero, console);
            0
        })
    }

    /// Pops `a` (top) then `b`, pushes `op(a, b)`.
    fn binary<C, F>(&mut self, atom: Atom, console: &mut C, op: F)
    where
        C: Console + ?Sized,
        F: FnOnce(Cell, Cell) -> Cell,
    {
        let a = self.take(atom, console);
        let b = self.take(atom, console);
        self.frame.stack.push(op(a, b));
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};
    use super::*;
    use crate::stack::ValueStack;

    fn stack(cells: &[Cell]) -> ValueStack {
        cells.to_vec().into()
    }

    fn run(line: &str) -> (FrameRunner, BufferConsole, Signal) {
        let mut machine = FrameRunner::new();
        let mut console = BufferConsole::new();
        let sig = machine.interpret_line(line, &mut console);

        (machine, console, sig)
    }

    #[test]
    fn scenarios() {
        #[rustfmt::skip]
        let scenarios: &[(&str, &[&str])] = &[
            ("1 2 + .",          &["3"]),
            ("5 3 - .",          &["2"]),
            ("3 2 * .",          &["6"]),
            ("7 2 / .",          &["3"]),
            ("set query? .",     &["1"]),
            ("set reset query? .", &["0"]),
            ("1 2 swap . .",     &["1", "2"]),
            ("1 2 over . . .",   &["1", "2", "1"]),
            ("hex 255 .",        &["255"]),
            ("255 hex .",        &["ff"]),
            ("8 oct . ",         &["10"]),
            ("hex ff",           &[]),
            ("hex 1f dec .",     &["31"]),
            ("one two three depth? .", &["3"]),
            ("0 1 - .",          &["-1"]),
        ];

        for (line, expected) in scenarios {
            let (_, console, sig) = run(line);

            assert_eq!(sig, Signal::Continue, "line: `{line}`");
            assert_eq!(&console.out, expected, "line: `{line}`");
            assert!(console.err.is_empty() || *line == "hex ff", "line: `{line}`: {:?}", console.err);
        }
    }

    #[test]
    fn input_split_across_lines() {
        let mut machine = FrameRunner::new();
        let mut console = BufferConsole::new();

        machine.interpret_line("1 2 +", &mut console);
        machine.interpret_line(".", &mut console);

        assert_eq!(console.out, ["3"]);
    }

    #[test]
    fn undefined_symbol_is_skipped() {
        let mut machine = FrameRunner::new();
        let mut console = BufferConsole::new();

        machine.interpret_line("1", &mut console);
        assert_eq!(machine.interpret_line("foo", &mut console), Signal::Continue);

        assert_eq!(machine.frame.stack.as_slice(), &[1]);
        assert_eq!(console.err, ["warning: undefined symbol \"foo\""]);

        // still accepting input
        machine.interpret_line("2 + foo .", &mut console);
        assert_eq!(console.out, ["3"]);
        assert_eq!(console.err.len(), 2);
    }

    #[test]
    fn numerals_follow_base() {
        let (machine, _, _) = run("hex 10");
        assert_eq!(machine.frame.stack.as_slice(), &[16]);

        let (machine, _, _) = run("dec 10");
        assert_eq!(machine.frame.stack.as_slice(), &[10]);

        let (machine, console, _) = run("oct 17 9");
        assert_eq!(machine.frame.stack.as_slice(), &[15]);
        assert_eq!(console.err, ["warning: undefined symbol \"9\""]);
    }

    #[test]
    fn dictionary_precedes_numerals() {
        let mut machine = FrameRunner::with_tables(
            CompositeTable::default(),
            SymbolDictionary::builtin().populate([("42", Atom::Hello)]),
        );
        let mut console = BufferConsole::new();

        machine.interpret_line("42 2dup", &mut console);

        assert_eq!(console.out, [GREETING]);
        assert!(machine.frame.stack.is_empty());
        assert_eq!(console.err.len(), 2); // dup on empty stack, twice
    }

    #[test]
    fn resolve() {
        let mut machine = FrameRunner::new();

        assert_eq!(machine.resolve("+"), Resolution::Atom(Atom::Plus));
        assert_eq!(machine.resolve("3"), Resolution::Atom(Atom::Three));
        assert_eq!(machine.resolve("12"), Resolution::Literal(12));
        assert_eq!(machine.resolve("c"), Resolution::Undefined);

        machine.frame.request_base(16);
        assert_eq!(machine.resolve("1c"), Resolution::Literal(28));
    }

    #[test]
    fn dup_increases_depth_by_one() {
        let stacks: [&[Cell]; 3] = [&[1], &[1, 2], &[5, 6, -7]];
        for cells in stacks {
            let mut machine = FrameRunner::new();
            machine.frame.stack = stack(cells);
            machine.dispatch(Atom::Dup, &mut BufferConsole::new());

            assert_eq!(machine.frame.stack.depth(), cells.len() + 1);
            assert_eq!(machine.frame.stack.peek().ok(), cells.last().copied());
        }
    }

    #[test]
    fn swap_is_involution() {
        let mut machine = FrameRunner::new();
        machine.frame.stack = stack(&[9, 1, 2]);

        machine.dispatch(Atom::Swap, &mut BufferConsole::new());
        assert_eq!(machine.frame.stack.as_slice(), &[9, 2, 1]);

        machine.dispatch(Atom::Swap, &mut BufferConsole::new());
        assert_eq!(machine.frame.stack.as_slice(), &[9, 1, 2]);
    }

    #[test]
    fn stack_shape() {
        #[rustfmt::skip]
        let cases: &[(Atom, &[Cell], &[Cell])] = &[
            (Atom::Over,    &[7, 1, 2],    &[7, 1, 2, 1]),
            (Atom::Drop,    &[1, 2],       &[1]),
            (Atom::Depth,   &[4, 4, 4],    &[4, 4, 4, 3]),
            (Atom::Depth,   &[],           &[0]),
            (Atom::TwoDrop, &[1, 2, 3],    &[1]),
            (Atom::TwoOver, &[1, 2],       &[1, 2, 1, 2]),
            (Atom::TwoDup,  &[5],          &[5, 5, 5]),
        ];

        for (atom, before, after) in cases {
            let mut machine = FrameRunner::new();
            machine.frame.stack = stack(before);
            machine.dispatch(*atom, &mut BufferConsole::new());

            assert_eq!(machine.frame.stack.as_slice(), *after, "{atom:?} on {before:?}");
        }
    }

    #[test]
    fn composite_matches_sequence() {
        let (mut a, mut b) = (FrameRunner::new(), FrameRunner::new());
        let (mut ca, mut cb) = (BufferConsole::new(), BufferConsole::new());

        let stacks: [&[Cell]; 3] = [&[], &[3], &[1, 2]];
        for cells in stacks {
            a.frame.stack = stack(cells);
            b.frame.stack = stack(cells);

            a.interpret_line("2dup 3hello", &mut ca);
            b.interpret_line("dup dup hello hello hello", &mut cb);

            assert_eq!(a.frame.stack, b.frame.stack);
            assert_eq!(ca, cb);
        }
    }

    #[test]
    fn undefined_atom_changes_nothing() {
        let mut machine = FrameRunner::new();
        let mut console = BufferConsole::new();
        machine.interpret_line("1 2 hex set", &mut console);

        let before = machine.frame.clone();
        assert_eq!(machine.dispatch(Atom::Undefined, &mut console), Signal::Continue);

        assert_eq!(machine.frame.stack, before.stack);
        assert_eq!(machine.frame.base(), before.base());
        machine.interpret_line("query?", &mut console);
        assert_eq!(machine.frame.stack.peek(), Ok(1));
        assert_eq!(console, BufferConsole::new());
    }

    #[test]
    fn underflow_substitutes_zero() {
        let (machine, console, sig) = run("+");

        assert_eq!(sig, Signal::Continue);
        assert_eq!(machine.frame.stack.as_slice(), &[0]);
        assert_eq!(
            console.err,
            [
                "error: frame data stack underflow in `plus`, zero enforced",
                "error: frame data stack underflow in `plus`, zero enforced",
            ]
        );

        let (machine, console, _) = run("5 -");
        assert_eq!(machine.frame.stack.as_slice(), &[-5]);
        assert_eq!(console.err.len(), 1);

        let (_, console, _) = run(".");
        assert_eq!(console.out, ["0"]);
        assert_eq!(console.err.len(), 1);
    }

    #[test]
    fn underflow_ignored() {
        for line in ["dup", "drop", "store!"] {
            let (machine, console, sig) = run(line);

            assert_eq!(sig, Signal::Continue);
            assert!(machine.frame.stack.is_empty(), "{line}");
            assert_eq!(console.err.len(), 1, "{line}");
            assert!(console.err[0].ends_with("operation ignored"), "{line}");
        }

        // flag is left as is, not defaulted
        let (_, console, _) = run("set store! query? .");
        assert_eq!(console.out, ["1"]);
    }

    #[test]
    fn flag_store() {
        let (_, console, _) = run("5 store! query? . 0 store! query? .");

        assert_eq!(console.out, ["1", "0"]);
    }

    #[test]
    #[should_panic]
    fn division_by_zero_traps() {
        run("1 0 /");
    }

    #[test]
    fn wrapping_arithmetic() {
        let mut machine = FrameRunner::new();
        machine.frame.stack = stack(&[Cell::MAX, 1]);
        machine.dispatch(Atom::Plus, &mut BufferConsole::new());

        assert_eq!(machine.frame.stack.as_slice(), &[Cell::MIN]);
    }

    #[test]
    fn termination() {
        #[rustfmt::skip]
        let lines = [
            ("quit",           Signal::Exit(0)),
            ("1 2 3 quit",     Signal::Exit(0)),
            ("exit",           Signal::Exit(0)),
            ("3 exit",         Signal::Exit(3)),
            ("hex 0ff exit",   Signal::Exit(255)),
            ("abort",          Signal::Abort),
            ("1 abort quit",   Signal::Abort),
        ];

        for (line, expected) in lines {
            let (_, _, sig) = run(line);
            assert_eq!(sig, expected, "line: `{line}`");
        }
    }

    #[test]
    fn termination_stops_interpreting() {
        let (machine, console, sig) = run("1 quit hello 2");

        assert_eq!(sig, Signal::Exit(0));
        assert_eq!(machine.frame.stack.as_slice(), &[1]);
        assert!(console.out.is_empty());
    }

    #[test]
    fn termination_inside_composite() {
        let composites = CompositeTable::default()
            .define(Atom::ThreeHello, [Atom::Hello, Atom::Quit, Atom::Hello])
            .unwrap();
        let mut machine = FrameRunner::with_tables(composites, SymbolDictionary::builtin());
        let mut console = BufferConsole::new();

        assert_eq!(machine.interpret_line("3hello", &mut console), Signal::Exit(0));
        assert_eq!(console.out, [GREETING]);
    }

    #[test]
    fn missing_composite_body_is_noop() {
        let mut machine = FrameRunner::with_tables(CompositeTable::new(), SymbolDictionary::builtin());
        let mut console = BufferConsole::new();

        assert_eq!(machine.interpret_line("1 2dup", &mut console), Signal::Continue);
        assert_eq!(machine.frame.stack.as_slice(), &[1]);
        assert_eq!(console, BufferConsole::new());
    }

    #[test]
    fn hello_and_help() {
        let (_, console, _) = run("hello 3hello");
        assert_eq!(console.out, [GREETING; 4]);

        let (machine, console, _) = run("help");
        assert_eq!(console.out.len(), Atom::VARIANTS.len() + 1);
        assert_eq!(console.out[0], GUIDANCE);
        assert!(console.out[12].contains("dup") && console.out[12].contains("Duplicate top"));
        assert!(machine.frame.stack.is_empty());
    }

    #[test]
    fn symbols_listing() {
        let (machine, console, _) = run("symbols");

        assert_eq!(console.out.len(), machine.symbols.len() + 1);
        assert_eq!(console.out[0], "Symbols to Atoms mapping:");
        assert_eq!(console.out[1], "\"*\" -> 20");

        let dup = format!("\"dup\" -> {}", Atom::Dup.as_raw());
        assert!(console.out.contains(&dup));
        assert!(console.out.contains(&"\"3hello\" -> 31".to_string()));
    }

    #[test]
    fn stack_trace_of_tokens_is_in_order() {
        let mut machine = FrameRunner::new();
        let mut console = BufferConsole::new();
        let mut depths = Vec::new();

        for token in Lex::new("1 2 3 + drop depth?") {
            machine.interpret([token], &mut console);
            depths.push(machine.frame.stack.depth());
        }

        assert_eq!(depths, [1, 2, 3, 2, 1, 2]);
        assert_eq!(machine.frame.stack.as_slice(), &[1, 1]);
    }
}
