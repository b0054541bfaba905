// src/params.rs
use std::path::PathBuf;

use crate::core::csv::Delim;

pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_OUT_STEM: &str = "capitals_scored";

/// Fixed key columns of the capitals table.
pub const ENTITY_COL: &str = "city_name";
pub const COUNTRY_COL: &str = "country_name";
pub const MONTH_COL: &str = "month";
pub const LAT_COL: &str = "latitude";
pub const LON_COL: &str = "longitude";

/// Derived-column prefixes. Two different statistics, two names — never
/// exported under a shared one.
pub const ANOMALY_PREFIX: &str = "anomaly_";
pub const PEER_PREFIX: &str = "peer_";
pub const SHIFTED_PREFIX: &str = "shifted_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn ext(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
    /// Delimiter for tabular formats; None for JSON.
    pub fn delim(self) -> Option<Delim> {
        match self {
            OutputFormat::Csv => Some(Delim::Csv),
            OutputFormat::Tsv => Some(Delim::Tsv),
            OutputFormat::Json => None,
        }
    }
}

#[derive(Clone)]
pub struct Params {
    pub input: Option<PathBuf>,      // source CSV/TSV
    pub variables: Vec<String>,      // variables to derive
    pub all_vars: bool,              // catalog ∩ header instead of --var list
    pub peer: bool,                  // also derive peer_<var>
    pub shifted: bool,               // also derive shifted_<var> (signed vars)
    pub cities: Option<Vec<String>>, // restrict rows to these capitals
    pub out: Option<PathBuf>,        // output file, or directory hint
    pub format: OutputFormat,
    pub include_headers: bool,       // header row in csv/tsv output
    pub list_vars: bool,             // print catalog then exit
}

impl Params {
    pub fn new() -> Self {
        Self {
            input: None,
            variables: Vec::new(),
            all_vars: false,
            peer: false,
            shifted: false,
            cities: None,
            out: None,
            format: OutputFormat::Csv,
            include_headers: true,
            list_vars: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
