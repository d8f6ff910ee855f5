// vconfig: nested-section configuration reader and tree browser

use std::io::{self, Write};
use std::path::PathBuf;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::level_filters::LevelFilter;

use vconfig::config::{Config, Section, Value};
use vconfig::loader::Source;
use vconfig::report::StderrReporter;
use vconfig::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Query,
    Tree,
    Browse,
}

struct Options {
    verbosity: u8,
    mode: Mode,
    file: PathBuf,
    paths: Vec<String>,
}

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} [-v|-vv] [--tree|--browse] <file> [path ...]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/server.cfg server.port        # Print one option",
        program_name
    );
    eprintln!(
        "  {} --tree demos/server.cfg             # Print the whole tree",
        program_name
    );
    eprintln!(
        "  {} --browse demos/server.cfg           # Browse interactively",
        program_name
    );
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("vconfig");
    let mut verbosity = 0;
    let mut mode = Mode::Query;
    let mut positional = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            "--tree" => mode = Mode::Tree,
            "--browse" => mode = Mode::Browse,
            "-h" | "--help" => usage(program_name),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                eprintln!("Error: Unknown option '{}'", flag);
                usage(program_name);
            }
            _ => positional.push(arg.clone()),
        }
    }

    if positional.is_empty() {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
    }

    let file = PathBuf::from(positional.remove(0));
    Options {
        verbosity,
        mode,
        file,
        paths: positional,
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// `path = value`, or `path = <null>` when nothing resolves
fn write_query(out: &mut impl Write, config: &Config, path: &str) -> io::Result<()> {
    match config.get_value(path) {
        Some(value) => writeln!(out, "{} = {}", path, value),
        None => writeln!(out, "{} = <null>", path),
    }
}

fn write_tree(out: &mut impl Write, section: &Section, depth: usize) -> io::Result<()> {
    let indent = "    ".repeat(depth);
    for (name, value) in section.sorted_options() {
        match value {
            Value::Section(child) => {
                writeln!(out, "{}[{}]", indent, name)?;
                write_tree(out, child, depth + 1)?;
                writeln!(out, "{}[/{}]", indent, name)?;
            }
            other => writeln!(out, "{}{} = {}", indent, name, other)?,
        }
    }
    Ok(())
}

fn browse(config: &Config, label: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(config.root(), label);
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    // Log lines would corrupt the alternate screen
    if options.mode != Mode::Browse {
        init_logging(options.verbosity);
    }

    let label = options.file.display().to_string();
    let Some(config) = Config::load(Source::File(options.file), &mut StderrReporter) else {
        std::process::exit(1);
    };

    match options.mode {
        Mode::Browse => browse(&config, label)?,
        Mode::Tree => write_tree(&mut io::stdout().lock(), config.root(), 0)?,
        Mode::Query => {
            let mut out = io::stdout().lock();
            for path in &options.paths {
                write_query(&mut out, &config, path)?;
            }
        }
    }

    let stats = config.close();
    tracing::debug!(
        released = stats.released,
        buckets_visited = stats.buckets_visited,
        "configuration closed"
    );
    Ok(())
}
