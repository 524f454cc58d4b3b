use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use smart_indent_config::Config;
use smart_indent_engine::{
    Action, Command, IndentConfig, IndentError, IndentMarker, LineRange, Session, Target,
    TextBuffer, classify, io,
};
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "smart-indent",
    version,
    about = "Add or remove first-line indentation on Markdown prose"
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Indent plain lines
    Add(IndentArgs),
    /// Remove indentation from plain lines
    Remove(IndentArgs),
    /// Add or remove on a selection or paragraph, judged by its first line.
    ///
    /// Needs --selection or --cursor: a single run cannot know whether the
    /// whole document was indented by an earlier one.
    Toggle(IndentArgs),
    /// Print how each line is classified
    Classify {
        /// Markdown file to read (stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Inspect or reset the persisted settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
struct IndentArgs {
    /// Markdown file to read (stdin if omitted)
    file: Option<PathBuf>,

    /// Only touch these lines, 1-based and inclusive
    #[arg(long, value_name = "START:END", value_parser = parse_selection, conflicts_with = "cursor")]
    selection: Option<LineRange>,

    /// Only touch the paragraph around this 1-based line
    #[arg(long, value_name = "LINE", value_parser = parse_line)]
    cursor: Option<usize>,

    /// Rewrite FILE instead of printing to stdout
    #[arg(short, long, requires = "file")]
    in_place: bool,

    /// Override the indent marker (full-width, four-spaces, two-spaces, tab)
    #[arg(long, value_name = "MARKER", value_parser = parse_marker)]
    marker: Option<IndentMarker>,
}

impl IndentArgs {
    fn target(&self) -> Target {
        if self.selection.is_some() {
            Target::Selection
        } else if self.cursor.is_some() {
            Target::Paragraph
        } else {
            Target::Document
        }
    }
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective settings as TOML
    Show,
    /// Print where the settings file lives
    Path,
    /// Restore the default settings
    Reset,
}

fn parse_line(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("line numbers start at 1".to_string()),
        Ok(n) => Ok(n - 1),
        Err(e) => Err(format!("invalid line number '{s}': {e}")),
    }
}

fn parse_selection(s: &str) -> Result<LineRange, String> {
    let (start, end) = s.split_once(':').unwrap_or((s, s));
    Ok(LineRange::new(parse_line(start)?, parse_line(end)?))
}

fn parse_marker(s: &str) -> Result<IndentMarker, String> {
    IndentMarker::parse(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    match cli.command {
        CliCommand::Add(args) => indent(Action::Add, &args, &config_path),
        CliCommand::Remove(args) => indent(Action::Remove, &args, &config_path),
        CliCommand::Toggle(args) => indent(Action::Toggle, &args, &config_path),
        CliCommand::Classify { file } => {
            let config = load_config(&config_path)?;
            let text = read_input(file.as_deref())?;
            write_classification(&text, &config.indent, &mut stdout().lock())
        }
        CliCommand::Config(command) => run_config(command, &config_path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.init();
}

fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_from_path(config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
    Ok(config.unwrap_or_default())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => io::read_markdown(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn indent(action: Action, args: &IndentArgs, config_path: &Path) -> Result<()> {
    let mut cfg = load_config(config_path)?.indent;
    if let Some(marker) = &args.marker {
        cfg = cfg.with_marker(marker.clone());
    }
    let text = read_input(args.file.as_deref())?;
    let output = apply(action, args, cfg, &text)?;

    match (&args.file, args.in_place) {
        (Some(path), true) => {
            if output != text {
                io::write_markdown(path, &output)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        _ => {
            let mut out = stdout().lock();
            out.write_all(output.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Runs one indent command over `text` and returns the resulting text.
///
/// Skips leave the text as it was and are reported on stderr; only transform
/// failures are errors.
fn apply(action: Action, args: &IndentArgs, cfg: IndentConfig, text: &str) -> Result<String> {
    if action == Action::Toggle && args.target() == Target::Document {
        bail!("toggle needs --selection or --cursor; use add or remove for the whole document");
    }

    let mut buffer = TextBuffer::new(text);
    if let Some(range) = args.selection {
        buffer = buffer.with_selection(range);
    }
    if let Some(line) = args.cursor {
        buffer = buffer.with_cursor(line);
    }

    let mut session = Session::new(cfg);
    match session.run_on(&mut buffer, Command::new(action, args.target())) {
        Ok(applied) => {
            eprintln!("{}", applied.message());
            Ok(buffer.text())
        }
        Err(e @ IndentError::TransformFailure(_)) => bail!(e),
        Err(e) => {
            eprintln!("{e}");
            Ok(text.to_string())
        }
    }
}

fn write_classification(text: &str, cfg: &IndentConfig, out: &mut impl Write) -> Result<()> {
    for (i, line) in text.split('\n').enumerate() {
        let class = classify(line, cfg).to_string();
        writeln!(out, "{:>4} {:<30} {}", i + 1, class, line)?;
    }
    Ok(())
}

fn run_config(command: ConfigCommand, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = load_config(config_path)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigCommand::Path => println!("{}", config_path.display()),
        ConfigCommand::Reset => {
            Config::reset_at(config_path)?;
            eprintln!("Settings reset to defaults at {}", config_path.display());
        }
    }
    Ok(())
}
