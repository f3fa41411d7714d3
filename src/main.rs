use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, NamedSource, Report, WrapErr};
use plang::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use std::{
    fs,
    io::{self, Write},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Accept any token as a literal and ignore input after the expression
    #[arg(long, global = true)]
    permissive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    Tokenize { filename: PathBuf },
    /// Print the syntax tree of a source file as JSON
    Parse { filename: PathBuf },
    /// Print the syntax tree of a source file, then its value
    Run { filename: PathBuf },
    /// Evaluate expressions read from stdin
    Calc,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // PLANG_LOG, then RUST_LOG, then warn.
    let filter = EnvFilter::try_from_env("PLANG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let options = if cli.permissive {
        ParseOptions::permissive()
    } else {
        ParseOptions::strict()
    };
    debug!(?options, "parse options");

    match cli.command {
        Commands::Tokenize { filename } => {
            let file_contents = read_source(&filename)?;

            for token in Lexer::new(&file_contents) {
                println!("{:?}", token);
            }
        }
        Commands::Parse { filename } => {
            let file_contents = read_source(&filename)?;

            let tokens = lex(&file_contents);
            let expr = parser::Parser::with_options(&tokens, options)
                .parse()
                .map_err(|err| with_source(err.into(), &filename, &file_contents))?;
            println!("{}", to_json(&expr)?);
        }
        Commands::Run { filename } => {
            let file_contents = read_source(&filename)?;

            let tokens = lex(&file_contents);
            let expr = parser::Parser::with_options(&tokens, options)
                .parse()
                .map_err(|err| with_source(err.into(), &filename, &file_contents))?;
            println!("{}", to_json(&expr)?);

            let value =
                evaluate(&expr).map_err(|err| with_source(err.into(), &filename, &file_contents))?;
            println!("{value}");
        }
        Commands::Calc => loop {
            print!("calc> ");
            io::stdout().flush().into_diagnostic()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input).into_diagnostic()? == 0 {
                break;
            }
            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") {
                break;
            }

            match run(input, options) {
                Ok((_, value)) => println!("{value}"),
                Err(err) => eprintln!("{:?}", Report::new(err).with_source_code(input.to_string())),
            }
        },
    }

    Ok(())
}

fn read_source(filename: &Path) -> miette::Result<String> {
    fs::read_to_string(filename)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading '{}' failed", filename.display()))
}

fn with_source(err: Error, filename: &Path, source: &str) -> Report {
    Report::new(err).with_source_code(NamedSource::new(
        filename.display().to_string(),
        source.to_string(),
    ))
}

/// JSON indented by four spaces.
fn to_json(expr: &Expr<'_>) -> miette::Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    expr.serialize(&mut serializer).into_diagnostic()?;
    String::from_utf8(buf).into_diagnostic()
}
