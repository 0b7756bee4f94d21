use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dumper_core::{Dump, ROW_WIDTH, Schedule, SeededEntropy};
use tracing::info;

use crate::config::{DumpArgs, DumpConfig};
use crate::error::{CliError, Result};
use crate::page::PageExporter;
use crate::screen::Screen;
use crate::terminal::{PlayOptions, play};

#[derive(Debug, Parser)]
#[command(
    name = "dumper",
    about = "Hex dumps with hyperlinks hidden in the bytes",
    version
)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a static HTML page of the dump.
    Html(HtmlArgs),

    /// Animate the dump in the terminal.
    Play(PlayArgs),
}

#[derive(Debug, Clone, Args)]
pub struct HtmlArgs {
    #[command(flatten)]
    pub dump: DumpArgs,

    /// Columns of the cursor row to type before exporting (0-16).
    #[arg(long, default_value_t = 0)]
    pub ticks: usize,

    /// Page title.
    #[arg(long, default_value = "dumper")]
    pub title: String,

    /// Write the page here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub dump: DumpArgs,

    /// Cursor rows to type out before exiting.
    #[arg(long, default_value_t = 4)]
    pub cycles: usize,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 200)]
    pub delay_ms: u64,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Html(args) => run_html(&args),
        Commands::Play(args) => run_play(&args),
    }
}

fn launch(config: &DumpConfig) -> Screen<SeededEntropy> {
    let mut entropy = config.entropy();
    let schedule = Schedule::new(config.rows, config.links.iter().cloned(), &mut entropy);
    Screen::launch(Dump::new(entropy), schedule)
}

fn run_html(args: &HtmlArgs) -> Result<()> {
    if args.ticks > ROW_WIDTH {
        return Err(CliError::invalid(format!(
            "--ticks must be at most {ROW_WIDTH}, got {}",
            args.ticks
        )));
    }
    let config = DumpConfig::from_args(&args.dump)?;
    let mut screen = launch(&config);
    for _ in 0..args.ticks {
        screen.tick();
    }

    let exporter = PageExporter {
        title: args.title.clone(),
        ..PageExporter::default()
    };
    let html = exporter.export(&screen);

    match &args.output {
        Some(path) => {
            fs::write(path, html)?;
            info!(path = %path.display(), "page written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_play(args: &PlayArgs) -> Result<()> {
    let config = DumpConfig::from_args(&args.dump)?;
    let mut screen = launch(&config);
    let options = PlayOptions {
        cycles: args.cycles,
        delay: Duration::from_millis(args.delay_ms),
    };
    let mut stdout = io::stdout().lock();
    play(&mut screen, options, &mut stdout)?;
    Ok(())
}
