// src/runner.rs
use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    anomaly::{self, Observation},
    file::{resolve_out_path, write_records_json, write_table},
    params::{
        Params, ANOMALY_PREFIX, COUNTRY_COL, DEFAULT_OUT_DIR, DEFAULT_OUT_STEM, ENTITY_COL,
        LAT_COL, LON_COL, MONTH_COL, OutputFormat, PEER_PREFIX, SHIFTED_PREFIX,
    },
    specs::variables,
    store::{self, DataSet},
};

/// Optional progress sink for the frontend (CLI: print lines).
pub trait Progress {
    fn begin(&mut self, _total: usize) {}
    fn log(&mut self, _msg: &str) {}
    fn item_done(&mut self, _variable: &str) {}
    fn update_status(&mut self, _msg: &str) {}
}

/// A no-op progress sink you can pass when you don't care.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub variables: Vec<String>,
}

/// One scored observation in long form, for JSON consumers. `peer` and
/// `shifted` appear only when their derivations were requested; `anomaly`
/// is always present and null when the seasonal group was degenerate —
/// consumers must handle that without failing.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub month: Option<NaiveDate>,
    pub variable: String,
    pub value: Option<f64>,
    pub anomaly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifted: Option<f64>,
}

/// Top-level runner: load, derive, export.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let input = params
        .input
        .as_deref()
        .ok_or("no input file (-i/--input)")?;

    let mut ds = store::load_dataset(input)?;
    logf!("loaded {} ({} rows)", input.display(), ds.rows.len());

    if let Some(cities) = &params.cities {
        ds.retain_entities(ENTITY_COL, cities);
        logd!("city filter kept {} rows", ds.rows.len());
    }

    let vars = select_variables(params, &ds)?;

    // Surface configuration errors before any scoring happens.
    for col in [ENTITY_COL, MONTH_COL] {
        if ds.column(col).is_none() {
            return Err(anomaly::ScoreError::InvalidVariable(col.to_string()).into());
        }
    }
    for v in &vars {
        if ds.column(v).is_none() {
            return Err(anomaly::ScoreError::InvalidVariable(v.clone()).into());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(vars.len());
    }

    let mut records: Vec<ScoredRecord> = Vec::new();
    let json = params.format == OutputFormat::Json;

    for var in &vars {
        let obs = ds.observations(ENTITY_COL, MONTH_COL, var)?;
        let scores = anomaly::seasonal_scores(&obs)?;
        let peers = if params.peer {
            Some(anomaly::peer_scores(&obs)?)
        } else {
            None
        };
        let shifted = if params.shifted && variables::is_signed(var) {
            Some(anomaly::shifted_values(&obs))
        } else {
            None
        };

        if json {
            collect_records(&ds, var, &obs, &scores, peers.as_deref(), shifted.as_deref(), &mut records);
        } else {
            ds.push_column(&join!(ANOMALY_PREFIX, var), fmt_scores(&scores));
            if let Some(peers) = peers {
                ds.push_column(&join!(PEER_PREFIX, var), fmt_scores(&peers));
            }
            if let Some(shifted) = shifted {
                ds.push_column(&join!(SHIFTED_PREFIX, var), fmt_scores(&shifted));
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(var);
        }
    }

    let out = resolve_out_path(
        params.out.as_deref(),
        DEFAULT_OUT_DIR,
        DEFAULT_OUT_STEM,
        params.format.ext(),
    )?;

    let written = if json {
        write_records_json(&out, &records)?
    } else {
        let delim = params.format.delim().unwrap();
        let headers = Some(ds.headers.clone());
        write_table(&out, &headers, &ds.rows, params.include_headers, delim)?
    };
    logf!("wrote {} ({} variables)", written.display(), vars.len());

    Ok(RunSummary {
        files_written: vec![written],
        variables: vars,
    })
}

/// Resolve the variable selection. `--all-vars` intersects the catalog with
/// the file's header; an explicit list passes through untouched (schema
/// validation happens in the caller).
fn select_variables(params: &Params, ds: &DataSet) -> Result<Vec<String>, Box<dyn Error>> {
    if params.all_vars {
        let present: Vec<String> = variables::VARIABLES
            .iter()
            .filter(|v| ds.column(v.name).is_some())
            .map(|v| v.name.to_string())
            .collect();
        if present.is_empty() {
            return Err("no catalog variable present in input".into());
        }
        return Ok(present);
    }
    if params.variables.is_empty() {
        return Err("no variable selected (--var or --all-vars)".into());
    }
    Ok(params.variables.clone())
}

fn collect_records(
    ds: &DataSet,
    variable: &str,
    obs: &[Observation],
    scores: &[Option<f64>],
    peers: Option<&[Option<f64>]>,
    shifted: Option<&[Option<f64>]>,
    out: &mut Vec<ScoredRecord>,
) {
    let country = ds.column(COUNTRY_COL);
    let lat = ds.column(LAT_COL);
    let lon = ds.column(LON_COL);

    for (i, o) in obs.iter().enumerate() {
        out.push(ScoredRecord {
            city: o.entity.clone(),
            country: country.and_then(|c| ds.cell(i, c)).map(str::to_string),
            latitude: lat.and_then(|c| ds.cell(i, c)).and_then(|s| s.trim().parse().ok()),
            longitude: lon.and_then(|c| ds.cell(i, c)).and_then(|s| s.trim().parse().ok()),
            month: (o.month != NaiveDate::MIN).then_some(o.month),
            variable: variable.to_string(),
            value: o.value,
            anomaly: scores[i],
            peer: peers.and_then(|p| p[i]),
            shifted: shifted.and_then(|s| s[i]),
        });
    }
}

/// Render scores as cells: fixed precision, missing → empty, so consumers
/// can detect the missing case without failing.
fn fmt_scores(scores: &[Option<f64>]) -> Vec<String> {
    scores
        .iter()
        .map(|s| match s {
            Some(v) => format!("{v:.4}"),
            None => s!(),
        })
        .collect()
}
