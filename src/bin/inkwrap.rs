use clap::Parser;
use crossterm::tty::IsTty;
use inkwrap::{InkwrapError, MeasureMode, RenderOptions, render_markup};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "inkwrap", version)]
#[command(about = "Word-wrap bracket markup to the terminal width")]
struct Args {
    /// Markup file to read; reads stdin when omitted
    file: Option<PathBuf>,

    /// Line width (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Extra indent for wrapped lines
    #[arg(long, default_value_t = 0)]
    hanging_indent: usize,

    /// Print without colors or text attributes
    #[arg(long)]
    plain: bool,

    /// Count one column per character instead of terminal cells
    #[arg(long)]
    chars: bool,

    /// Print the input escaped as markup literal text
    #[arg(long, conflicts_with = "check")]
    escape: bool,

    /// Only check that the input parses
    #[arg(long)]
    check: bool,

    /// Append debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("inkwrap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), InkwrapError> {
    if let Some(path) = &args.log_file {
        inkwrap::init_logger(path)?;
    }

    let input = read_input(args.file.as_ref())?;
    let mut stdout = io::stdout().lock();

    if args.escape {
        write!(stdout, "{}", inkwrap::inkmark::escape(&input))?;
        stdout.flush()?;
        return Ok(());
    }

    if args.check {
        return check(&input);
    }

    let mut options = match args.width {
        Some(width) => RenderOptions::new(width),
        None => RenderOptions::for_terminal(),
    };
    options = options.with_hanging_indent(args.hanging_indent);
    if args.chars {
        options = options.with_measure(MeasureMode::Chars);
    }

    let text = render_markup(&input, &options)?;
    if args.plain || !io::stdout().is_tty() {
        text.write_plain(&mut stdout)
    } else {
        text.write_to(&mut stdout)
    }
}

fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Report where parsing fails, with a caret under the offending position.
fn check(input: &str) -> Result<(), InkwrapError> {
    let err = match inkwrap::inkmark::parse(input) {
        Ok(doc) => {
            println!("ok: {} nodes", doc.node_count());
            return Ok(());
        }
        Err(err) => err,
    };

    let (line, column) = err.line_col(input);
    let source_line = input.lines().nth(line - 1).unwrap_or("");
    eprintln!("{line}:{column}: {err}");
    eprintln!("  {source_line}");
    eprintln!("  {}^", " ".repeat(column - 1));
    Err(err.into())
}
