use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::{self, ExitCode},
};

use clap::Parser;
use frame_base::runner::{Console, Diagnostic, FrameRunner, Signal};
use thiserror::Error;
use tracing::debug;

/// Frame machine console. Symbols are read line by line and executed against
/// one frame.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
struct Args {
    /// Script to interpret line by line before the shell starts
    script: Option<PathBuf>,

    /// Interpret TEXT and exit, can be repeated (shell is not started)
    #[arg(short, long = "command", value_name = "TEXT")]
    commands: Vec<String>,

    /// Shell prompt
    #[arg(short, long, default_value = "FT:> ")]
    prompt: String,

    /// Do not print banner
    #[arg(short, long)]
    quiet: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read script {}: {source}", .path.display())]
    Script { path: PathBuf, source: io::Error },
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}

/// Normal output to stdout, diagnostics to stderr.
struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, line: std::fmt::Arguments<'_>) {
        println!("{line}");
    }
    fn diagnose(&mut self, diag: &Diagnostic<'_>) {
        eprintln!("{diag}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("framec: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "framec=warn,frame_base=warn",
        1 => "framec=debug,frame_base=debug",
        _ => "framec=trace,frame_base=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let mut machine = FrameRunner::new();
    let mut console = StdConsole;

    if let Some(path) = args.script {
        let source = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(source) => return Err(CliError::Script { path, source }),
        };
        debug!(path = %path.display(), "running script");
        terminate_on(run_source(&mut machine, &source, &mut console));
    }

    if !args.commands.is_empty() {
        for command in &args.commands {
            terminate_on(machine.interpret_line(command, &mut console));
        }
        return Ok(());
    }

    if !args.quiet {
        println!("Frame Toy, version {}", env!("CARGO_PKG_VERSION"));
        println!("Say 'help' to get help, 'symbols' to list dictionary, 'quit' to terminate.");
    }
    microshell(&mut machine, &args.prompt, &mut console)
}

/// Interprets `source` line by line, stops on the first termination signal.
fn run_source<C: Console>(machine: &mut FrameRunner, source: &str, console: &mut C) -> Signal {
    for line in source.lines() {
        match machine.interpret_line(line, console) {
            Signal::Continue => {}
            sig => return sig,
        }
    }

    Signal::Continue
}

/// Minimalist shell. End of input is a normal termination.
fn microshell<C: Console>(machine: &mut FrameRunner, prompt: &str, console: &mut C) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("{prompt}");
        _ = io::stdout().flush();

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(());
        }
        terminate_on(machine.interpret_line(&line, console));
    }
}

/// Ends the process if the machine said so.
fn terminate_on(sig: Signal) {
    match sig {
        Signal::Continue => {}
        Signal::Exit(code) => {
            debug!(code, "exit");
            _ = io::stdout().flush();
            process::exit(code);
        }
        Signal::Abort => process::abort(),
    }
}
