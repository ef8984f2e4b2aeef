use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bf::loop_stack::DEFAULT_LOOP_CAPACITY;
use bf::opcode::instruction_count;
use bf::{Engine, EngineConfig, EofBehavior};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use tracing::Level;

/// Command-line names for [`EofBehavior`].
#[derive(Clone, Copy, ValueEnum)]
enum EofArg {
    Unchanged,
    Zero,
    MinusOne,
}

impl From<EofArg> for EofBehavior {
    fn from(arg: EofArg) -> Self {
        match arg {
            EofArg::Unchanged => EofBehavior::Unchanged,
            EofArg::Zero => EofBehavior::Zero,
            EofArg::MinusOne => EofBehavior::MinusOne,
        }
    }
}

#[derive(Parser)]
#[command(name = "bf", about = "Run a brainfuck program on an unbounded tape")]
struct Cli {
    /// Print diagnostics to stderr. Repeat for per-instruction tracing.
    #[arg(short = 'd', long = "debug", action = ArgAction::Count)]
    debug: u8,

    /// What `,` does to the current cell at end of input.
    #[arg(short = 'e', long = "eof", value_enum, default_value_t = EofArg::Unchanged)]
    eof: EofArg,

    /// Maximum loop nesting depth.
    #[arg(long, default_value_t = DEFAULT_LOOP_CAPACITY)]
    loop_capacity: usize,

    /// The program to run.
    program: PathBuf,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

fn load_program(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Couldn't open file {}", path.display()))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let program = match load_program(&cli.program) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    };
    tracing::debug!(
        length = program.len(),
        instructions = instruction_count(&program),
        "read program"
    );

    let config = EngineConfig {
        loop_capacity: cli.loop_capacity,
        eof: cli.eof.into(),
    };
    let mut engine = Engine::with_config(&program, io::stdin().lock(), io::stdout().lock(), config);
    if let Err(e) = engine.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
