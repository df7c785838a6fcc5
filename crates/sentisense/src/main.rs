mod repl;

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use sentisense_core::config::{Config, CONFIG_FILE_NAME};
use sentisense_core::error::ScoreError;
use sentisense_core::scorer::{LexiconScorer, Scorer};
use sentisense_core::session::{Outcome, Session};
use sentisense_report::{export, json, text, timeline, OutputFormat};

#[derive(Parser)]
#[command(name = "sentisense")]
#[command(about = "Score the sentiment of text and explore the results in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one piece of text and print its scores and charts
    Analyze {
        /// Text to analyze (reads --file or stdin when omitted)
        text: Vec<String>,
        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Output format: text, json, or csv
        #[arg(long, default_value = "text")]
        format: String,
        /// Compact single-line JSON
        #[arg(long)]
        compact: bool,
        /// Config file path (defaults to .sentisense.toml in the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start an interactive session with a running history
    Session {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the history as CSV to this path when the session ends
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Analyze every non-empty line of a file (or stdin) as one session
    Batch {
        /// Input file, one text per line (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Write the CSV export to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format: text, json, or csv
        #[arg(long, default_value = "text")]
        format: String,
        /// Compact single-line JSON
        #[arg(long)]
        compact: bool,
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Create a default .sentisense.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Analyze {
            text,
            file,
            format,
            compact,
            config,
        } => cmd_analyze(
            &text,
            file.as_deref(),
            &format,
            compact,
            config.as_deref(),
            cli.no_color,
        ),
        Commands::Session { config, export } => {
            cmd_session(config.as_deref(), export.as_deref(), cli.no_color)
        }
        Commands::Batch {
            file,
            output,
            format,
            compact,
            config,
        } => cmd_batch(
            file.as_deref(),
            output.as_deref(),
            &format,
            compact,
            config.as_deref(),
            cli.no_color,
        ),
        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

fn cmd_analyze(
    words: &[String],
    file: Option<&Path>,
    format_str: &str,
    compact: bool,
    config_path: Option<&Path>,
    no_color: bool,
) -> Result<()> {
    let format: OutputFormat = format_str.parse()?;
    let config = load_config(config_path)?;
    apply_color(&config, no_color);
    let scorer = LexiconScorer::from_config(&config.scorer)?;

    let input = if !words.is_empty() {
        words.join(" ")
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        read_stdin()?
    };

    let mut session = Session::new(&config.session);
    let record = match session.analyze_text(&input, &scorer)? {
        Outcome::Analyzed(record) => record,
        _ => {
            eprintln!("{}: {}", "Warning".yellow().bold(), ScoreError::EmptyInput);
            process::exit(1);
        }
    };

    match format {
        OutputFormat::Text => print!("{}", text::format_result(&record, config.display.precision)),
        OutputFormat::Json => println!("{}", json::format_result(&record, compact)),
        OutputFormat::Csv => print_csv(std::slice::from_ref(&record))?,
    }
    Ok(())
}

fn cmd_session(config_path: Option<&Path>, export_to: Option<&Path>, no_color: bool) -> Result<()> {
    let config = load_config(config_path)?;
    apply_color(&config, no_color);
    let scorer = LexiconScorer::from_config(&config.scorer)?;
    tracing::debug!(
        scorer = scorer.name(),
        entries = scorer.lexicon().len(),
        "starting session"
    );

    let mut session = Session::new(&config.session);
    let options = repl::ReplOptions {
        precision: config.display.precision,
        export_path: config
            .session
            .export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(export::EXPORT_FILE_NAME)),
        prompt: std::io::stdin().is_terminal(),
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::run(stdin.lock(), &mut stdout, &mut session, &scorer, &options)?;

    if let Some(path) = export_to {
        repl::export_history(&mut stdout, &session, path)?;
    }
    Ok(())
}

fn cmd_batch(
    file: Option<&Path>,
    output: Option<&Path>,
    format_str: &str,
    compact: bool,
    config_path: Option<&Path>,
    no_color: bool,
) -> Result<()> {
    let format: OutputFormat = format_str.parse()?;
    let config = load_config(config_path)?;
    apply_color(&config, no_color);
    let scorer = LexiconScorer::from_config(&config.scorer)?;

    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => read_stdin()?,
    };

    let mut session = Session::new(&config.session);
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        session.analyze_text(line, &scorer)?;
    }
    let records = session.history().snapshot();

    match format {
        OutputFormat::Text => {
            let tl = timeline::project(records);
            print!("{}", text::format_timeline(&tl, config.display.precision));
            print!("\n{}", text::format_summary(session.history()));
        }
        OutputFormat::Json => println!("{}", json::format_history(records, compact)),
        OutputFormat::Csv => print_csv(records)?,
    }

    if let Some(path) = output {
        let written = export::write_file(path, records)?;
        eprintln!(
            "Exported {} rows to {} ({})",
            records.len(),
            written.display(),
            export::EXPORT_MIME
        );
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(CONFIG_FILE_NAME);
    if target.exists() && !force {
        anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())?;
    println!("Created {CONFIG_FILE_NAME} with default configuration.");
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => {
            let cwd = std::env::current_dir().context("failed to resolve working directory")?;
            Ok(Config::load_or_default(&cwd))
        }
    }
}

fn apply_color(config: &Config, no_color: bool) {
    if no_color || !config.display.color {
        colored::control::set_override(false);
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn print_csv(records: &[sentisense_core::types::AnalysisRecord]) -> Result<()> {
    let data = export::to_csv(records)?;
    print!("{}", String::from_utf8(data).context("export is not valid UTF-8")?);
    Ok(())
}
