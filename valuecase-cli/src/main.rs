use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use valuecase_core::Catalog;
use valuecase_finance::{ExportSummary, Session, ValueCase};

mod args;
mod catalog_file;
mod config;
mod render;
mod session_cmd;
mod state;

use args::SelectionArgs;

#[derive(Parser, Debug)]
#[command(
    name = "valuecase",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VALUECASE_BUILD_SHA"), ")"),
    about = "AI value-case calculator: KPI projections, ROI and payback for customer-operations capabilities"
)]
struct Cli {
    /// Debug-level logs on stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Config file (default: ~/.valuecase/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML catalog replacing the built-in reference data
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List industries, sizes, horizons, KPIs, features and outcomes
    Catalog {
        #[arg(long, conflicts_with = "toml")]
        json: bool,

        /// Print the catalog as an editable TOML file
        #[arg(long)]
        toml: bool,
    },

    /// Project KPIs and ROI for a selection
    Project {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long)]
        json: bool,
    },

    /// Cumulative cost/benefit per month as CSV
    Chart {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Executive value-case summary
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long)]
        json: bool,
    },

    /// Interactive what-if session on stdin
    Session,

    /// Manage ~/.valuecase/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (no-op if it exists)
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let command = match cli.command {
        Command::Config { command } => return run_config(&command, cli.config.as_deref()),
        other => other,
    };

    let cfg = config::load_config(cli.config.as_deref())?;
    let catalog_path = cli.catalog.as_deref().or(cfg.catalog.path.as_deref());
    let catalog = catalog_file::load_catalog(catalog_path)?;

    match command {
        Command::Catalog { json, toml } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else if toml {
                print!("{}", catalog_file::catalog_to_toml(&catalog)?);
            } else {
                print!("{}", render::render_catalog(&catalog));
            }
        }

        Command::Project { selection, json } => {
            let case = derive_case(&catalog, &cfg, &selection)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&case)?);
            } else {
                print!("{}", render::render_dashboard(&case));
            }
        }

        Command::Chart { selection, out } => {
            let case = derive_case(&catalog, &cfg, &selection)?;
            let sink: Box<dyn Write> = match &out {
                Some(p) => {
                    let f = File::create(p).with_context(|| format!("create {}", p.display()))?;
                    Box::new(f)
                }
                None => Box::new(io::stdout().lock()),
            };
            write_chart_csv(&case, sink)?;
            if let Some(p) = out {
                tracing::info!(path = %p.display(), points = case.timeline.len(), "wrote chart");
            }
        }

        Command::Export { selection, json } => {
            let case = derive_case(&catalog, &cfg, &selection)?;
            let summary = ExportSummary::from_case(&catalog, &case, chrono::Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render_markdown());
            }
        }

        Command::Session => {
            let start = cfg.defaults.selection(&catalog)?;
            let mut session = Session::with_selection(&catalog, start)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session_cmd::run_session(&mut session, stdin.lock(), &mut stdout)?;
        }

        Command::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_config(command: &ConfigCommand, path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(path),
        ConfigCommand::Show => {
            let p = match path {
                Some(p) => p.to_path_buf(),
                None => config::config_path()?,
            };
            let cfg = config::load_config(Some(&p))?;
            let note = if p.exists() { "" } else { " (not found; defaults)" };
            println!("# {}{}", p.display(), note);
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            Ok(())
        }
    }
}

/// Config defaults, then command-line overrides, then the full pipeline.
fn derive_case(
    catalog: &Catalog,
    cfg: &config::Config,
    args: &SelectionArgs,
) -> Result<ValueCase> {
    let base = cfg.defaults.selection(catalog)?;
    let selection = args.apply(catalog, base)?;
    tracing::debug!(
        industry = %selection.industry,
        size = %selection.size,
        horizon = %selection.horizon,
        "derive value case"
    );
    Ok(ValueCase::derive(catalog, &selection)?)
}

fn write_chart_csv<W: Write>(case: &ValueCase, sink: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(sink);
    for point in &case.timeline {
        w.serialize(point).context("write chart row")?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuecase_core::SelectionState;

    #[test]
    fn test_chart_csv_shape() {
        let c = Catalog::builtin().unwrap();
        let case = ValueCase::derive(&c, &SelectionState::default()).unwrap();
        let mut buf = Vec::new();
        write_chart_csv(&case, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month,cost,benefit,roi");
        assert_eq!(lines.len(), 1 + 25);
        assert!(lines[1].starts_with("0,550000"));
        assert!(lines[25].starts_with("24,"));
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "valuecase",
            "project",
            "--industry",
            "telecom",
            "--json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Project { selection, json } => {
                assert!(json);
                assert_eq!(selection.industry, Some(valuecase_core::Industry::Telecom));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["valuecase", "-v", "-q", "session"]).is_err());
    }
}
