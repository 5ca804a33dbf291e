//! Grammar fragments and default settings shared across the decoder.
//!
//! Pattern fragments are plain alternations without capture groups so that
//! each chunk decoder can wrap them in its own named groups.

/// Default upper bound for a single chunk pattern match
pub const DEFAULT_MATCH_BUDGET_MS: u64 = 500;

/// Compiled size limit for chunk patterns (bytes)
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Report terminator stripped during normalization
pub const REPORT_TERMINATOR: char = '=';

/// Status literal that ends decoding early
pub const NIL_STATUS: &str = "NIL";

/// Status literal for automated stations
pub const AUTO_STATUS: &str = "AUTO";

/// Missing-data sentinel for a present weather repetition
pub const MISSING_WEATHER_SENTINEL: &str = "//";

// =============================================================================
// Weather phenomena
// =============================================================================

/// Characteristics (descriptor) codes
pub const CHARACTERISTICS_PATTERN: &str = "TS|FZ|SH|BL|DR|MI|BC|PR";

/// Phenomenon type codes, including the `//` missing sentinel
pub const WEATHER_TYPE_PATTERN: &str =
    "DZ|RA|SN|SG|PL|DS|GR|GS|UP|IC|FG|BR|SA|DU|HZ|FU|VA|PY|PO|SQ|FC|SS|//";

/// Intensity or proximity marker
pub const INTENSITY_PATTERN: &str = "[-+]|VC";

// =============================================================================
// Clouds
// =============================================================================

/// Clear-sky sentinels replacing cloud layers
pub const NO_CLOUD_PATTERN: &str = "NSC|NCD|CLR|SKC";

/// Cloud amount codes
pub const CLOUD_AMOUNT_PATTERN: &str = "VV|FEW|SCT|BKN|OVC|///";

/// Cloud base height in hundreds of feet
pub const CLOUD_HEIGHT_PATTERN: &str = "[0-9]{3}|///";

/// Convective cloud modifiers
pub const CLOUD_TYPE_PATTERN: &str = "CB|TCU|///";

/// Maximum number of cloud layers in one cloud group
pub const MAX_CLOUD_LAYERS: usize = 4;

/// Feet per reported cloud height unit
pub const CLOUD_HEIGHT_FACTOR: u32 = 100;

// =============================================================================
// Wind
// =============================================================================

pub const WIND_DIRECTION_PATTERN: &str = "[0-9]{3}|VRB|///";

pub const WIND_SPEED_PATTERN: &str = "[/0-9]{2,3}|//";

pub const WIND_UNIT_PATTERN: &str = "KT|MPS|KPH";

/// Upper bound for wind directions and direction variations (degrees)
pub const MAX_WIND_DIRECTION: u32 = 360;

// =============================================================================
// Visibility
// =============================================================================

/// Compass directions for the minimum visibility sector
pub const COMPASS_DIRECTION_PATTERN: &str = "N|NE|E|SE|S|SW|W|NW";

/// Metric prevailing visibility treated as unlimited (meters)
pub const DEFAULT_METRIC_UNLIMITED_VISIBILITY_M: f64 = 9999.0;

/// Imperial prevailing visibility treated as unlimited (statute miles)
pub const DEFAULT_IMPERIAL_UNLIMITED_VISIBILITY_SM: f64 = 10.0;

// =============================================================================
// Runways
// =============================================================================

/// Runway designator: two-digit QFU with optional parallel suffix
pub const RUNWAY_PATTERN: &str = "[0-9]{2}[LCR]?";

/// Valid runway QFU range
pub const MIN_RUNWAY_QFU: u32 = 1;
pub const MAX_RUNWAY_QFU: u32 = 36;

// =============================================================================
// Trend
// =============================================================================

pub const TREND_KIND_PATTERN: &str = "NOSIG|BECMG|TEMPO";

/// Logging target used in `RUST_LOG` filters
pub const LOG_TARGET: &str = "metar_decoder";

/// Default application name for configuration discovery
pub const APP_NAME: &str = "metar-decoder";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Extensions scanned by the batch command when given a directory
pub const REPORT_FILE_EXTENSIONS: &[&str] = &["txt", "metar"];

/// Upper bound on batch workers
pub const MAX_WORKERS: usize = 64;
