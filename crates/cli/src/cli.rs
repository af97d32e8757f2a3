// crates/cli/src/cli.rs

use anyhow::Context;
use clap::{builder::ValueHint, Args, Parser, Subcommand};
use query::{parse_filter, Expr, ExprFlavour, Pagination, SearchRequest};
use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, error, info};

use crate::error::CliError;
use crate::settings::Settings;

pub type Result<T> = std::result::Result<T, CliError>;

/// Page size used when `--from` is given and neither `--size` nor the
/// settings name one.
const FALLBACK_PAGE_SIZE: u32 = 10;

/// queryc: compile filter documents into query bodies
#[tracing::instrument(skip_all)]
pub fn start() -> ExitCode {
    let cli = Cli::parse();
    let stdout = io::stdout();

    run(cli, &mut stdout.lock()).map_or_else(
        |e| {
            error!("queryc failed: {:#}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("queryc finished");
            ExitCode::SUCCESS
        },
    )
}

#[derive(Parser, Debug)]
#[command(name = "queryc", version, about = "Compile filter documents into query bodies")]
pub struct Cli {
    /// Path to settings.toml (or set QUERYC_CONFIG)
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "QUERYC_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a filter and print the fragment for one flavour
    Compile(CompileCmd),
    /// Print a complete search request body
    Search(SearchCmd),
    /// Print the fields a filter references, one per line
    Idents(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Filter JSON file; stdin when omitted or `-`
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompileCmd {
    /// Target flavour (defaults to query.default_flavour)
    #[arg(long, short, value_name = "FLAVOUR")]
    pub flavour: Option<ExprFlavour>,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Sort field; prefix with `-` for descending
    #[arg(long, value_name = "FIELD", allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Offset of the first hit
    #[arg(long, value_name = "N")]
    pub from: Option<u32>,

    /// Page size (defaults to search.default_page_size)
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `cli`, writing command output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    debug!(?settings, "settings ready");

    match cli.command {
        Commands::Compile(cmd) => {
            let expr = read_expr(cmd.input.file.as_deref())?;
            let flavour = cmd.flavour.unwrap_or(settings.query.default_flavour);
            let compiled = expr
                .compile(flavour)
                .map_err(CliError::from)
                .with_context(|| format!("compiling filter for {}", flavour))?;
            out.write_all(&compiled.render())?;
        }
        Commands::Search(cmd) => {
            let expr = read_expr(cmd.input.file.as_deref())?;
            let mut request = SearchRequest::new(expr);
            if let Some(sort) = &cmd.sort {
                request = request.sort(sort);
            }
            if let Some(p) = pagination(&cmd, &settings) {
                request = request.paginate(p);
            }
            let body = request
                .render()
                .map_err(CliError::from)
                .context("building search body")?;
            out.write_all(&body)?;
        }
        Commands::Idents(input) => {
            let expr = read_expr(input.file.as_deref())?;
            for ident in expr.idents() {
                writeln!(out, "{}", ident)?;
            }
            return Ok(());
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Explicit flags win; the configured page size only applies when no
/// `--size` is given.
fn pagination(cmd: &SearchCmd, settings: &Settings) -> Option<Pagination> {
    let size = cmd.size.or(settings.search.default_page_size);
    if cmd.from.is_none() && size.is_none() {
        return None;
    }
    Some(Pagination {
        from: cmd.from.unwrap_or(0),
        size: size.unwrap_or(FALLBACK_PAGE_SIZE),
    })
}

fn read_expr(file: Option<&Path>) -> anyhow::Result<Expr> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(CliError::from)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::from)
                .context("reading stdin")?;
            text
        }
    };
    parse_expr(&text)
}

fn parse_expr(text: &str) -> anyhow::Result<Expr> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(CliError::from)?;
    let expr = parse_filter(&json).map_err(CliError::from)?;
    debug!(idents = ?expr.idents(), "filter parsed");
    Ok(expr)
}
