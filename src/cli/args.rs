use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "utm2gpx")]
#[command(about = "Convert UTM coordinate tables (Est/Nord) into GPX waypoint files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: ./utm2gpx.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a spreadsheet or CSV/TSV file of UTM coordinates to GPX
    Convert {
        #[arg(short, long, help = "Input spreadsheet (.xlsx, .xls, .ods) or CSV/TSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output GPX file path [default: <input stem>.gpx]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "UTM zone, e.g. 32N or 33S [default: 32N]")]
        zone: Option<String>,

        #[arg(long, help = "Column holding point names [default: auto-detect]")]
        name_column: Option<String>,

        #[arg(long, help = "Field delimiter (one character or 'tab') [default: auto-detect]")]
        delimiter: Option<String>,

        #[arg(long, help = "Worksheet to read from spreadsheet input [default: first sheet]")]
        sheet: Option<String>,

        #[arg(long, help = "Write a JSON conversion summary to this path")]
        summary_json: Option<PathBuf>,

        #[arg(short, long, help = "Suppress the progress bar")]
        quiet: bool,
    },

    /// Show columns, detected name column and a preview of converted points
    Inspect {
        #[arg(short, long, help = "Input spreadsheet (.xlsx, .xls, .ods) or CSV/TSV file")]
        input: PathBuf,

        #[arg(short, long, help = "UTM zone, e.g. 32N or 33S [default: 32N]")]
        zone: Option<String>,

        #[arg(long, help = "Column holding point names [default: auto-detect]")]
        name_column: Option<String>,

        #[arg(long, help = "Field delimiter (one character or 'tab') [default: auto-detect]")]
        delimiter: Option<String>,

        #[arg(long, help = "Worksheet to read from spreadsheet input [default: first sheet]")]
        sheet: Option<String>,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },

    /// List the preset UTM zones and their EPSG codes
    Zones,
}
