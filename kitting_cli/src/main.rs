//! # Kitting Estimator CLI
//!
//! Terminal front end for the kitting estimator: runs an estimate, prints
//! the bill of quantities, and exports it to CSV or PDF.
//!
//! ```text
//! kitting_cli estimate --area 64 --height 2.4 --sort save --desc
//! kitting_cli estimate --area 64 --height 2.4 --sort opt --sort opt
//! kitting_cli export-pdf --area 64 --height 2.4 --out report.pdf
//! kitting_cli timeline
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod render;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kitting_core::export::csv::render_csv;
use kitting_core::export::pdf::render_report_pdf;
use kitting_core::export::write_atomic;
use kitting_core::readiness::{build_timeline, standard_events};
use kitting_core::visualizer::PanelDiagram;
use kitting_core::{
    BoqTable, KitError, KittingReport, KittingSettings, LayoutRequest, SortDirection, SortKey,
    SortState,
};

/// Layers drawn by `--visualize` before the diagram is cut off
const MAX_DIAGRAM_ROWS: usize = 12;

#[derive(Parser)]
#[command(name = "kitting_cli")]
#[command(about = "Formwork kitting estimator - greedy panel layout vs manual ordering")]
#[command(version)]
struct Cli {
    /// JSON settings file overriding the panel catalog and heuristics
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Floor geometry; anything missing is prompted for.
#[derive(Args)]
struct Geometry {
    /// Floor area in square meters
    #[arg(long, allow_hyphen_values = true)]
    area: Option<f64>,

    /// Wall height in meters
    #[arg(long, allow_hyphen_values = true)]
    height: Option<f64>,

    /// Label printed on the report
    #[arg(long, default_value = "")]
    label: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run an estimate and print the bill of quantities
    Estimate {
        #[command(flatten)]
        geometry: Geometry,

        /// Sort column: id, desc, size, manual, opt, save. Repeat to sort
        /// again; each sort flips the direction, like clicking a header
        #[arg(long, action = clap::ArgAction::Append)]
        sort: Vec<String>,

        /// Run the first sort descending
        #[arg(long)]
        desc: bool,

        /// Only show lines whose code or description contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Draw the panel layout
        #[arg(long)]
        visualize: bool,
    },

    /// Export the bill of quantities as CSV
    ExportCsv {
        #[command(flatten)]
        geometry: Geometry,

        /// Output file
        #[arg(long, default_value = "kitting_datagrid.csv")]
        out: PathBuf,
    },

    /// Export the executive report as PDF
    ExportPdf {
        #[command(flatten)]
        geometry: Geometry,

        /// Output file
        #[arg(long, default_value = "kitting_executive_report.pdf")]
        out: PathBuf,

        /// Company name on the report header
        #[arg(long)]
        company: Option<String>,
    },

    /// Print the curing readiness timeline
    Timeline {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(kit_error) = e.downcast_ref::<KitError>() {
                if let Ok(json) = serde_json::to_string_pretty(kit_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Estimate {
            geometry,
            sort,
            desc,
            filter,
            json,
            visualize,
        } => {
            let report = generate(geometry, &settings)?;

            if json {
                println!("{}", report.to_json()?);
                return Ok(());
            }

            let mut table = match &filter {
                Some(term) => report.boq.filter(term),
                None => report.boq.clone(),
            };
            apply_sorts(&mut table, &sort, desc)?;

            print!("{}", render::render_summary(&report));
            println!();
            print!("{}", render::render_boq_table(&table));

            if visualize {
                let diagram =
                    PanelDiagram::from_layout(&report.quantities.layout, &settings, MAX_DIAGRAM_ROWS);
                println!();
                print!("{}", diagram.render_text());
            }
        }

        Command::ExportCsv { geometry, out } => {
            let report = generate(geometry, &settings)?;
            let bytes = render_csv(&report.boq)?;
            write_atomic(&out, &bytes)
                .with_context(|| format!("writing CSV to {}", out.display()))?;
            println!("Wrote {} ({} lines)", out.display(), report.boq.len());
        }

        Command::ExportPdf {
            geometry,
            out,
            company,
        } => {
            if let Some(company) = company {
                settings.report.company_name = company;
            }
            let report = generate(geometry, &settings)?;
            let bytes = render_report_pdf(&report, &settings)?;
            write_atomic(&out, &bytes)
                .with_context(|| format!("writing PDF to {}", out.display()))?;
            println!("Wrote {} ({} bytes)", out.display(), bytes.len());
        }

        Command::Timeline { json } => {
            let timeline = build_timeline(&standard_events());
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                print!("{}", render::render_timeline(&timeline));
            }
        }
    }

    Ok(())
}

/// Apply each `--sort` in order, toggling the direction between sorts.
fn apply_sorts(table: &mut BoqTable, keys: &[String], desc: bool) -> Result<()> {
    let first = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let mut state = SortState::starting(first);

    for key in keys {
        let key: SortKey = key.parse()?;
        let used = state.apply(table, key);
        tracing::debug!(key = %key, direction = ?used, "sorted bill of quantities");
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<KittingSettings> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using settings file");
            KittingSettings::from_json_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))
        }
        None => Ok(KittingSettings::default()),
    }
}

fn generate(geometry: Geometry, settings: &KittingSettings) -> Result<KittingReport> {
    let area = match geometry.area {
        Some(area) => area,
        None => prompt_f64("Enter floor area (m²): ")?,
    };
    let height = match geometry.height {
        Some(height) => height,
        None => prompt_f64("Enter wall height (m): ")?,
    };

    let request = LayoutRequest::new(area, height).with_label(geometry.label);
    Ok(KittingReport::generate(request, settings)?)
}

fn prompt_f64(prompt: &str) -> Result<f64> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    parse_number(&input)
}

fn parse_number(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .with_context(|| format!("'{}' is not a number", trimmed))
}
