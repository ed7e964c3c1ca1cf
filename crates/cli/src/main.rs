// SymGrid CLI - load a square matrix and report which rows are symmetric

mod exit_codes;
mod report;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use symgrid_config::{OutputFormat, RowLayout, Settings};
use symgrid_engine::{analyze, Grid};
use symgrid_io::file::{self, Format};
use symgrid_io::loader::parse_size;
use symgrid_io::{json, text, Layout, LoadError, LoadOptions};

use exit_codes::{
    load_exit_code, LoadErrorOutput, EXIT_ERROR, EXIT_LOAD_UNAVAILABLE, EXIT_SUCCESS, EXIT_USAGE,
};
use report::ReportOutput;

#[derive(Parser)]
#[command(name = "symgrid")]
#[command(about = "Check which rows of a square matrix read the same in both directions")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (defaults to the user config directory)
    #[arg(long, env = "SYMGRID_CONFIG", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a matrix and report its symmetric rows
    #[command(after_help = "\
Input format (text):
  <size>              integer, 1..=20
  <row 1>             <size> numbers separated by whitespace
  ...
  <row size>

Examples:
  symgrid check matrix.txt
  symgrid check matrix.json --json
  cat matrix.txt | symgrid check
  symgrid check wrapped.txt --layout tokens")]
    Check {
        /// Input file (omit or - to read from stdin)
        input: Option<PathBuf>,

        /// Input format (inferred from extension if not specified)
        #[arg(long, short = 'f')]
        from: Option<GridFormat>,

        /// How matrix text is split into rows (overrides settings)
        #[arg(long)]
        layout: Option<LayoutArg>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a zero-filled matrix, apply cell edits, and write or check it
    #[command(after_help = "\
Examples:
  symgrid new 3 > blank.txt
  symgrid new 3 --set 1,1=4 --set 1,3=4 --check
  symgrid new 2 --set 2,2=-1.5 -t json -o grid.json")]
    New {
        /// Matrix size (1..=20)
        #[arg(allow_hyphen_values = true)]
        size: String,

        /// Set a cell, 1-based: ROW,COL=VALUE. Repeatable.
        #[arg(long = "set", value_name = "ROW,COL=VALUE")]
        set: Vec<String>,

        /// Output format (inferred from --output extension if not specified)
        #[arg(long, short = 't')]
        to: Option<GridFormat>,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Analyze the matrix instead of writing it
        #[arg(long, conflicts_with_all = ["output", "to"])]
        check: bool,

        /// Emit the report as JSON (with --check)
        #[arg(long, requires = "check")]
        json: bool,
    },

    /// Show the settings file location and effective settings
    #[command(after_help = "\
Examples:
  symgrid config --init
  symgrid config --layout tokens --format json")]
    Config {
        /// Write a commented default settings file if none exists
        #[arg(long, conflicts_with_all = ["layout", "format"])]
        init: bool,

        /// Store the default row layout
        #[arg(long)]
        layout: Option<LayoutArg>,

        /// Store the default report format
        #[arg(long)]
        format: Option<GridFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GridFormat {
    Text,
    Json,
}

impl From<GridFormat> for Format {
    fn from(f: GridFormat) -> Self {
        match f {
            GridFormat::Text => Format::Text,
            GridFormat::Json => Format::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// One row per line
    Rows,
    /// Ignore line breaks; read size*size numbers
    Tokens,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  symgrid-engine ", env!("CARGO_PKG_VERSION"),
        "\nbuild:   ", env!("SYMGRID_BUILD_PROFILE"),
        "\ntarget:  ", env!("SYMGRID_BUILD_TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path);
    log::debug!("settings from {}: {:?}", config_path.display(), settings);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: symgrid <command> [options]");
            eprintln!("       symgrid --help for more information");
            Ok(())
        }
        Some(Commands::Check { input, from, layout, json }) => {
            cmd_check(&settings, input, from, layout, json)
        }
        Some(Commands::New { size, set, to, output, check, json }) => {
            cmd_new(&settings, size, set, to, output, check, json)
        }
        Some(Commands::Config { init, layout, format }) => {
            cmd_config(settings, &config_path, init, layout, format)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_LOAD_UNAVAILABLE, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a load error with proper exit code.
    pub fn load(err: &LoadError, layout: Layout) -> Self {
        let hint = match err {
            LoadError::MalformedRow { .. } if layout == Layout::Rows => {
                Some("each row must be on its own line; use --layout tokens to ignore line breaks".to_string())
            }
            LoadError::OutOfRangeSize { .. } => {
                Some("the first number in the input is the matrix size".to_string())
            }
            LoadError::ResourceUnavailable { .. } => {
                Some("check that the file exists and is readable".to_string())
            }
            _ => None,
        };
        Self { code: load_exit_code(err), message: err.to_string(), hint }
    }

    /// Report a load error as JSON on stdout; the exit code still reflects it.
    pub fn load_json(err: &LoadError) -> Self {
        let out = LoadErrorOutput::from_load_error(err);
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{}", s),
            Err(e) => return Self::other(e.to_string()),
        }
        Self { code: out.exit_code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// check
// ============================================================================

fn cmd_check(
    settings: &Settings,
    input: Option<PathBuf>,
    from: Option<GridFormat>,
    layout: Option<LayoutArg>,
    json: bool,
) -> Result<(), CliError> {
    let options = load_options(settings, layout);
    let json = json || settings.output_format == OutputFormat::Json;

    let path = input.filter(|p| p.as_os_str() != "-");

    let loaded = match (&path, from) {
        (Some(p), Some(f)) => file::load_as(p, f.into(), &options),
        (Some(p), None) => file::load(p, &options),
        (None, f) => {
            let content = read_stdin()?;
            let format = f.map(Format::from).unwrap_or(Format::Text);
            file::parse_content(&content, format, &options)
        }
    };

    let grid = match loaded {
        Ok(grid) => grid,
        Err(e) if json => return Err(CliError::load_json(&e)),
        Err(e) => return Err(CliError::load(&e, options.layout)),
    };

    let source = path.as_ref().map(|p| p.display().to_string());
    print_report(source, &grid, json)
}

fn load_options(settings: &Settings, layout: Option<LayoutArg>) -> LoadOptions {
    let layout = match layout {
        Some(LayoutArg::Rows) => Layout::Rows,
        Some(LayoutArg::Tokens) => Layout::Tokens,
        None => match settings.layout {
            RowLayout::Rows => Layout::Rows,
            RowLayout::Tokens => Layout::Tokens,
        },
    };
    LoadOptions::with_layout(layout)
}

fn read_stdin() -> Result<String, CliError> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|e| CliError::io(format!("cannot read stdin: {}", e)))?;
    Ok(file::decode(bytes))
}

fn print_report(source: Option<String>, grid: &Grid, json: bool) -> Result<(), CliError> {
    let report = analyze(grid);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let written = if json {
        let output = ReportOutput::new(source, grid, &report);
        let s = serde_json::to_string_pretty(&output).map_err(|e| CliError::other(e.to_string()))?;
        writeln!(handle, "{}", s)
    } else {
        write!(handle, "{}", report)
    };

    written.map_err(|e| CliError::other(format!("cannot write output: {}", e)))
}

// ============================================================================
// new
// ============================================================================

fn cmd_new(
    settings: &Settings,
    size: String,
    edits: Vec<String>,
    to: Option<GridFormat>,
    output: Option<PathBuf>,
    check: bool,
    json_report: bool,
) -> Result<(), CliError> {
    let size = parse_size(size.trim()).map_err(|e| CliError {
        code: load_exit_code(&e),
        message: e.to_string(),
        hint: None,
    })?;
    let mut grid = Grid::new(size).map_err(|e| CliError::args(e.to_string()))?;

    for edit in &edits {
        let (row, col, value) = parse_cell_edit(edit)?;
        grid.set(row, col, value)
            .map_err(|e| CliError::args(format!("--set {}: {}", edit, e)))?;
    }
    log::info!("built {}x{} grid with {} edit(s)", size, size, edits.len());

    if check {
        let as_json = json_report || settings.output_format == OutputFormat::Json;
        return print_report(None, &grid, as_json);
    }

    let format = match (to, &output) {
        (Some(f), _) => f.into(),
        (None, Some(p)) => Format::from_path(p),
        (None, None) => Format::Text,
    };

    match output {
        Some(path) => write_grid(&grid, format, &path),
        None => {
            let content = match format {
                Format::Text => text::to_text(&grid),
                Format::Json => json::to_json(&grid)
                    .map(|s| s + "\n")
                    .map_err(|e| CliError::other(e.to_string()))?,
            };
            io::stdout()
                .write_all(content.as_bytes())
                .map_err(|e| CliError::other(format!("cannot write output: {}", e)))
        }
    }
}

fn write_grid(grid: &Grid, format: Format, path: &Path) -> Result<(), CliError> {
    let result = match format {
        Format::Text => text::export(grid, path),
        Format::Json => json::export(grid, path),
    };
    result.map_err(|e| CliError::io(e.to_string()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

/// Parse `ROW,COL=VALUE` (1-based) into 0-based coordinates and a value.
fn parse_cell_edit(edit: &str) -> Result<(usize, usize, f64), CliError> {
    let usage = || {
        CliError::args(format!("invalid --set value: \"{}\"", edit))
            .with_hint("expected ROW,COL=VALUE with 1-based ROW and COL, e.g. --set 2,3=1.5")
    };

    let (coords, value) = edit.split_once('=').ok_or_else(usage)?;
    let (row, col) = coords.split_once(',').ok_or_else(usage)?;

    let row: usize = row.trim().parse().map_err(|_| usage())?;
    let col: usize = col.trim().parse().map_err(|_| usage())?;
    let value: f64 = value.trim().parse().map_err(|_| usage())?;

    if row == 0 || col == 0 {
        return Err(usage());
    }
    Ok((row - 1, col - 1, value))
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(
    mut settings: Settings,
    path: &Path,
    init: bool,
    layout: Option<LayoutArg>,
    format: Option<GridFormat>,
) -> Result<(), CliError> {
    if layout.is_some() || format.is_some() {
        if let Some(layout) = layout {
            settings.layout = match layout {
                LayoutArg::Rows => RowLayout::Rows,
                LayoutArg::Tokens => RowLayout::Tokens,
            };
        }
        if let Some(format) = format {
            settings.output_format = match format {
                GridFormat::Text => OutputFormat::Text,
                GridFormat::Json => OutputFormat::Json,
            };
        }
        settings
            .save_to(path)
            .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))?;
        eprintln!("Saved {}", path.display());
    }

    if init {
        let created = Settings::create_default_file(path)
            .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))?;
        if created {
            eprintln!("Created {}", path.display());
        } else {
            eprintln!("{} already exists; left unchanged", path.display());
        }
    }

    let output = serde_json::json!({
        "path": path.display().to_string(),
        "exists": path.exists(),
        "settings": settings,
    });
    let s = serde_json::to_string_pretty(&output).map_err(|e| CliError::other(e.to_string()))?;
    println!("{}", s);
    Ok(())
}
