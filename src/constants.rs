//! Game constants: grid shape, sampling ranges, region names, file paths.

/// Rows and columns in the grid.
pub const GRID_SIZE: usize = 3;

/// Predicates drawn per session: [`GRID_SIZE`] rows followed by [`GRID_SIZE`] columns.
pub const SELECTION_SIZE: usize = 2 * GRID_SIZE;

/// Half-open sampling range for the `tourists` threshold.
pub const TOURISTS_RANGE: std::ops::Range<i64> = 10_000..60_000;

/// Half-open sampling range for the `gdp_per_capita` threshold.
pub const GDP_PER_CAPITA_RANGE: std::ops::Range<i64> = 5_000..35_000;

/// Half-open sampling range for the `population` threshold.
pub const POPULATION_RANGE: std::ops::Range<i64> = 10_000..60_000;

/// Half-open sampling range for the `co2_emissions` threshold.
pub const CO2_EMISSIONS_RANGE: std::ops::Range<i64> = 500..5_500;

/// Regions a `region` predicate can ask for. "North America" is deliberately
/// absent even though the normalizer produces it.
pub const SAMPLED_REGIONS: [&str; 6] = [
    "Asia",
    "Europe",
    "Africa",
    "Northern America",
    "South America",
    "Oceania",
];

/// Substring → canonical region, scanned in order; first hit wins.
pub const REGION_MAPPINGS: [(&str, &str); 22] = [
    ("northern europe", "Europe"),
    ("western europe", "Europe"),
    ("eastern europe", "Europe"),
    ("southern europe", "Europe"),
    ("central europe", "Europe"),
    ("europe", "Europe"),
    ("northern asia", "Asia"),
    ("western asia", "Asia"),
    ("eastern asia", "Asia"),
    ("southern asia", "Asia"),
    ("central asia", "Asia"),
    ("asia", "Asia"),
    ("northern africa", "Africa"),
    ("western africa", "Africa"),
    ("eastern africa", "Africa"),
    ("southern africa", "Africa"),
    ("central africa", "Africa"),
    ("africa", "Africa"),
    ("micronesia", "Oceania"),
    ("polynesia", "Oceania"),
    ("central america", "North America"),
    ("caribbean", "North America"),
];

/// Games the HTTP server keeps before evicting the oldest.
pub const MAX_GAMES: usize = 1024;

/// Default dataset file, relative to the base path.
pub const DEFAULT_DATA_PATH: &str = "lightweight_countries_data.json";

/// Directory holding `{iso2}.svg` flag images.
pub const FLAGS_DIR: &str = "flags_svg";
