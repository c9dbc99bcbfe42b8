/// Required column names (exact match)
pub const COLUMN_EST: &str = "Est";
pub const COLUMN_NORD: &str = "Nord";

/// Optional column names (exact match)
pub const COLUMN_QUOTA: &str = "Quota";
pub const COLUMN_CP: &str = "CP";
pub const COLUMN_AREA: &str = "Area";
pub const COLUMN_COMUNE: &str = "Comune";

/// Candidate name headers, highest priority first (matched trimmed, lower-case)
pub const NAME_COLUMN_CANDIDATES: [&str; 6] = [
    "nome grotta",
    "nome",
    "grotta",
    "denominazione",
    "nome_grotta",
    "name",
];

/// Cell values treated as missing, as spreadsheet readers do
pub const NA_MARKERS: [&str; 12] = [
    "NA", "N/A", "n/a", "#N/A", "#NA", "NaN", "nan", "-NaN", "null", "NULL", "None", "<NA>",
];

/// Input extensions read as workbooks; anything else is delimited text
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Zones offered by default (Italy and neighbours)
pub const SUPPORTED_ZONES: [&str; 5] = ["32N", "33N", "34N", "32S", "33S"];
pub const DEFAULT_ZONE: &str = "32N";

/// UTM constraints
pub const MIN_UTM_ZONE: u8 = 1;
pub const MAX_UTM_ZONE: u8 = 60;
pub const EPSG_UTM_NORTH_PREFIX: u32 = 326;
pub const EPSG_UTM_SOUTH_PREFIX: u32 = 327;
pub const EPSG_WGS84: u32 = 4326;

/// Output defaults
pub const DEFAULT_CREATOR: &str = "utm2gpx";
pub const DEFAULT_OUTPUT_FILE: &str = "coordinate_convertite.gpx";
pub const GPX_EXTENSION: &str = "gpx";
pub const DESCRIPTION_SEPARATOR: &str = " | ";
pub const GENERATED_NAME_PREFIX: &str = "Punto_";

/// Configuration
pub const CONFIG_FILE: &str = "utm2gpx.toml";
pub const ENV_PREFIX: &str = "UTM2GPX";

/// Delimiters tried when sniffing a header line
pub const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];
