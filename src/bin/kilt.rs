//! kilt - terminal text editor
//!
//! Run with: `kilt [OPTIONS] [FILE]`

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kilt::editor::HELP_MESSAGE;
use kilt::{Editor, EditorConfig, Terminal};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "kilt - small terminal text editor

USAGE:
    kilt [OPTIONS] [FILE]

OPTIONS:
    -h, --help              Print this help message and exit
    --tab-stop <N>          Tab width in columns, 1..=64 (default: 8)
    --quit-times <N>        Extra Ctrl-Q presses to quit with unsaved
                            changes (default: 3)
    --log <FILE>            Write diagnostics to FILE (level from KILT_LOG,
                            default: info)

ENVIRONMENT:
    KILT_TAB_STOP           Default for --tab-stop
    KILT_QUIT_TIMES         Default for --quit-times
    KILT_LOG                Log filter, e.g. kilt=debug

KEYS:
    Ctrl-S save    Ctrl-Q quit    Ctrl-F find (arrows step, Esc cancels)
";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KILT_LOG";

/// Command-line configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub editor: EditorConfig,
    pub log_file: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse arguments on top of `editor` (usually the environment defaults).
    pub fn from_args<I>(args: I, editor: EditorConfig) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self {
            editor,
            ..Self::default()
        };
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();

            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "--tab-stop" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error("--tab-stop requires a value".to_string());
                    };
                    if let Err(e) = config.editor.set_tab_stop(&value.to_string_lossy()) {
                        return ParseResult::Error(e.to_string());
                    }
                }

                "--quit-times" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error("--quit-times requires a value".to_string());
                    };
                    if let Err(e) = config.editor.set_quit_times(&value.to_string_lossy()) {
                        return ParseResult::Error(e.to_string());
                    }
                }

                "--log" => match args.next() {
                    Some(path) => config.log_file = Some(PathBuf::from(path)),
                    None => return ParseResult::Error("--log requires a value".to_string()),
                },

                other if other.starts_with('-') && other != "-" => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }

                _ => {
                    if config.file.is_some() {
                        return ParseResult::Error("Only one file can be edited".to_string());
                    }
                    config.file = Some(PathBuf::from(arg));
                }
            }
        }

        ParseResult::Config(config)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() {
    let editor = match EditorConfig::from_env() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match Config::from_args(std::env::args_os(), editor) {
        ParseResult::Config(config) => {
            if let Err(e) = run(&config) {
                eprintln!("kilt: {e}");
                std::process::exit(1);
            }
        }
        ParseResult::Help => print!("{HELP_TEXT}"),
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install a file subscriber; stdout belongs to the editor screen.
fn init_logging(path: &Path) -> kilt::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(config: &Config) -> kilt::Result<()> {
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    let mut term = Terminal::stdio();
    term.enter_raw_mode(config.editor.read_timeout_ds)?;

    let result = edit(&mut term, config);
    if result.is_err() {
        // Leave a clean screen behind before the error is printed.
        let _ = term.clear();
    }
    term.exit_raw_mode();
    result
}

fn edit<S, W>(term: &mut Terminal<S, W>, config: &Config) -> kilt::Result<()>
where
    S: kilt::ByteSource,
    W: std::io::Write,
{
    let (rows, cols) = term.window_size()?;
    tracing::info!(rows, cols, "starting editor");

    let mut editor = Editor::new(config.editor.clone(), rows, cols);
    if let Some(file) = &config.file {
        editor.open(file)?;
    }
    editor.set_status_message(HELP_MESSAGE);
    editor.run(term)
}
