use crate::cli::args::{Cli, Commands};
use crate::settings::Settings;
use crate::models::{ConversionOutcome, RowDiagnostic, ZoneSpec};
use crate::processors::RecordConverter;
use crate::readers::{read_input_table, ColumnMap, Table};
use crate::utils::constants::SUPPORTED_ZONES;
use crate::utils::filename::default_output_path;
use crate::utils::progress::ProgressReporter;
use crate::writers::GpxWriter;
use anyhow::{anyhow, Context};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Convert {
            input,
            output_file,
            zone,
            name_column,
            delimiter,
            sheet,
            summary_json,
            quiet,
        } => {
            let settings = Settings::load(cli.config.as_deref())?
                .apply_overrides(zone, name_column, delimiter, sheet)?;
            let zone = settings.zone_spec()?;

            println!("Converting UTM coordinates to GPX...");
            println!("Input file: {}", input.display());
            println!("UTM zone: {} ({})", zone, zone.epsg_id());

            let table = read_input(&input, &settings)?;
            println!("Loaded {} rows", table.row_count());
            println!("Columns: {}", table.headers.join(", "));

            let progress =
                ProgressReporter::new(table.row_count() as u64, "Converting points...", quiet);
            let converter =
                RecordConverter::new(zone).with_name_column(settings.name_column.clone());
            let outcome = converter.convert_with_progress(&table, Some(&progress))?;
            progress.finish_with_message(&format!(
                "Converted {} points",
                outcome.stats.converted
            ));

            let output_file = output_file.unwrap_or_else(|| default_output_path(&input));
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }

            GpxWriter::new()
                .with_creator(&settings.creator)
                .write_to_path(&outcome.document, &output_file)
                .with_context(|| format!("Failed to write {}", output_file.display()))?;
            info!(path = %output_file.display(), "GPX written");

            println!("\n{}", outcome.summary());
            if outcome.stats.has_skipped() {
                println!(
                    "⚠️  {} points skipped for missing data or errors",
                    outcome.stats.skipped
                );
                for (reason, count) in outcome.skip_breakdown() {
                    println!("   {}: {}", reason.display_name(), count);
                }
            }

            if let Some(summary_path) = summary_json {
                write_summary_json(&outcome, &zone, &input, &output_file, &summary_path)?;
                println!("Summary written to {}", summary_path.display());
            }

            println!("GPX file: {}", output_file.display());
        }

        Commands::Inspect {
            input,
            zone,
            name_column,
            delimiter,
            sheet,
            sample,
        } => {
            let settings = Settings::load(cli.config.as_deref())?
                .apply_overrides(zone, name_column, delimiter, sheet)?;
            let zone = settings.zone_spec()?;

            println!("Inspecting: {}", input.display());
            let table = read_input(&input, &settings)?;

            println!("Rows: {}", table.row_count());
            println!("Columns: {}", table.headers.join(", "));

            let columns = ColumnMap::resolve(&table.headers, settings.name_column.as_deref())?;
            match columns.name_header() {
                Some(header) => println!("✅ Using column '{}' for point names", header),
                None => println!("⚠️  No name column found, points will be numbered automatically"),
            }

            let outcome = RecordConverter::new(zone)
                .with_name_column(settings.name_column.clone())
                .convert(&table)?;

            if outcome.document.is_empty() {
                println!("⚠️  No valid points to preview");
            } else {
                println!(
                    "\nPreview ({} of {} points, {}):",
                    sample.min(outcome.document.len()),
                    outcome.document.len(),
                    zone.epsg_id()
                );
                for (i, wpt) in outcome.document.waypoints.iter().take(sample).enumerate() {
                    let elevation = wpt
                        .elevation
                        .map(|e| format!(", {:.0} m", e))
                        .unwrap_or_default();
                    println!(
                        "{}. {}: {:.6}, {:.6}{}",
                        i + 1,
                        wpt.name,
                        wpt.latitude,
                        wpt.longitude,
                        elevation
                    );
                }
            }

            if outcome.stats.has_skipped() {
                println!("\n{} rows would be skipped", outcome.stats.skipped);
            }
        }

        Commands::Zones => {
            println!("Preset UTM zones:");
            for zone in SUPPORTED_ZONES {
                let spec = ZoneSpec::parse(zone)?;
                println!(
                    "  {:<4} {}  central meridian {:+.0}°",
                    spec.to_string(),
                    spec.epsg_id(),
                    spec.central_meridian()
                );
            }
            println!("Any zone 1-60 with hemisphere N or S is accepted.");
        }
    }

    Ok(())
}

/// Install the `tracing` subscriber; `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("utm2gpx={}", default_level)));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };

    result.map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

fn read_input(input: &Path, settings: &Settings) -> anyhow::Result<Table> {
    read_input_table(input, settings.delimiter_byte()?, settings.sheet.as_deref())
        .with_context(|| format!("Failed to read {}", input.display()))
}

#[derive(Serialize)]
struct ConversionSummary<'a> {
    input: &'a Path,
    output: &'a Path,
    zone: String,
    crs: String,
    converted: usize,
    skipped: usize,
    name_column: Option<&'a str>,
    diagnostics: &'a [RowDiagnostic],
}

fn write_summary_json(
    outcome: &ConversionOutcome,
    zone: &ZoneSpec,
    input: &Path,
    output: &Path,
    summary_path: &Path,
) -> anyhow::Result<()> {
    let summary = ConversionSummary {
        input,
        output,
        zone: zone.to_string(),
        crs: zone.epsg_id(),
        converted: outcome.stats.converted,
        skipped: outcome.stats.skipped,
        name_column: outcome.name_column.as_deref(),
        diagnostics: &outcome.diagnostics,
    };

    let file = File::create(summary_path)
        .with_context(|| format!("Failed to create {}", summary_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
    Ok(())
}
