// heaptty: Step-by-Step Heap-Sort Visualizer

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use heaptty::config::{Config, OutputMode};
use heaptty::heap::{ItemFactory, sample};
use heaptty::player::Player;
use heaptty::snapshot::Snapshot;
use heaptty::steps::full_trace;
use heaptty::ui::App;

/// Environment variable naming the log file. The terminal belongs to the UI,
/// so nothing is logged unless it is set.
const LOG_ENV: &str = "HEAPTTY_LOG";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("heaptty");

    let config = match Config::from_args(args.iter().skip(1).cloned()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Usage: {} [--speed <ms>] [--data <file>] [--json]", program_name);
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {}                       # Sort the built-in sample", program_name);
            eprintln!("  {} --speed 200           # Play five steps a second", program_name);
            eprintln!("  {} --data people.txt     # Load 'person_id,weight' lines", program_name);
            eprintln!("  {} --json > trace.jsonl  # Dump every step as JSON", program_name);
            std::process::exit(1);
        }
    };

    init_logging()?;

    let people = match config.people() {
        Ok(people) => people,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(people = people.len(), speed_ms = config.speed_ms, "starting");

    if config.output == OutputMode::Json {
        return dump_trace(&people);
    }

    let player = Player::new(people, config.speed_ms);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(player);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Send tracing output to the file named by `HEAPTTY_LOG`, if any
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };

    let file = File::create(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heaptty=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Print the build and sort of `people` as one JSON object per step
fn dump_trace(people: &[(u32, f64)]) -> Result<(), Box<dyn std::error::Error>> {
    let mut items = ItemFactory::new(0);
    let start = Snapshot::from_input(sample::load(people, &mut items));
    let steps = full_trace(&start);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for step in &steps {
        serde_json::to_writer(&mut out, step)?;
        writeln!(out)?;
    }
    out.flush()?;

    eprintln!("Wrote {} steps.", steps.len());
    Ok(())
}
