// src/anomaly.rs
//
// The anomaly normalizer. Pure: takes a slice of observations, hands back
// scores positionally aligned with it. Two derivations, deliberately kept
// under distinct names because they answer different questions:
//
// - seasonal_scores: how unusual is this value against the SAME city's
//   history for the SAME calendar month, across all years. This is the
//   climate-anomaly statistic proper.
// - peer_scores: how does this value rank against ALL cities in the SAME
//   year-month. A relative-ranking statistic, not an anomaly.
//
// Both use sample std and a two-pass grouped aggregation: partition into
// groups, accumulate once per group, then score every row by lookup.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::core::stats::{Accumulator, GroupStats};

/// One (city, month, value) row. `value` is None when the source cell was
/// empty or unparseable; such rows never touch group statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub entity: String,
    /// Truncated to the first of the month.
    pub month: NaiveDate,
    pub value: Option<f64>,
}

/// Caller configuration errors. Degenerate groups are not errors — their
/// members simply score as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Requested column absent from the input schema.
    InvalidVariable(String),
    /// No observations at all.
    EmptyInput,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidVariable(name) => {
                write!(f, "variable not present in input: {name}")
            }
            ScoreError::EmptyInput => write!(f, "no observations in input"),
        }
    }
}

impl Error for ScoreError {}

/// Standardized deviation of each observation from its own city's history
/// for the same calendar month (all years, self included).
///
/// Missing input value → missing score. Group with fewer than two values
/// or zero spread → missing score for every member.
pub fn seasonal_scores(obs: &[Observation]) -> Result<Vec<Option<f64>>, ScoreError> {
    grouped_scores(obs, |o| (o.entity.as_str(), o.month.month()))
}

/// Standardized deviation of each observation from all entities' values in
/// the same year-month. Relative ranking among capitals; same missing-value
/// and degeneracy policies as [`seasonal_scores`].
pub fn peer_scores(obs: &[Observation]) -> Result<Vec<Option<f64>>, ScoreError> {
    grouped_scores(obs, |o| o.month)
}

fn grouped_scores<'a, K, F>(obs: &'a [Observation], key: F) -> Result<Vec<Option<f64>>, ScoreError>
where
    K: std::hash::Hash + Eq,
    F: Fn(&'a Observation) -> K,
{
    if obs.is_empty() {
        return Err(ScoreError::EmptyInput);
    }

    // Pass 1: accumulate per group.
    let mut groups: HashMap<K, Accumulator> = HashMap::new();
    for o in obs {
        if let Some(v) = o.value {
            if v.is_finite() {
                groups.entry(key(o)).or_default().add(v);
            }
        }
    }

    // Freeze stats; degenerate groups drop out here.
    let stats: HashMap<K, GroupStats> = groups
        .into_iter()
        .filter_map(|(k, acc)| acc.finish().map(|st| (k, st)))
        .collect();

    // Pass 2: score by lookup.
    Ok(obs
        .iter()
        .map(|o| match (o.value, stats.get(&key(o))) {
            (Some(v), Some(st)) if v.is_finite() => Some((v - st.mean) / st.std),
            _ => None,
        })
        .collect())
}

/// Shift values so the column minimum lands at zero. Used by display layers
/// that need a non-negative magnitude for signed variables (temperatures).
/// Missing in, missing out; an all-missing column stays all missing.
pub fn shifted_values(obs: &[Observation]) -> Vec<Option<f64>> {
    let min = obs
        .iter()
        .filter_map(|o| o.value.filter(|v| v.is_finite()))
        .fold(f64::INFINITY, f64::min);

    obs.iter()
        .map(|o| match o.value {
            Some(v) if v.is_finite() && min.is_finite() => Some(v - min),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entity: &str, ym: (i32, u32), value: Option<f64>) -> Observation {
        Observation {
            entity: entity.to_string(),
            month: NaiveDate::from_ymd_opt(ym.0, ym.1, 1).unwrap(),
            value,
        }
    }

    #[test]
    fn paris_january_across_years() {
        let vals = [5.0, 6.0, 5.5, 7.0, 4.5];
        let rows: Vec<Observation> = vals
            .iter()
            .enumerate()
            .map(|(i, &v)| obs("Paris", (1950 + i as i32, 1), Some(v)))
            .collect();

        let scores = seasonal_scores(&rows).unwrap();
        // mean 5.6, sample std sqrt(0.925) ≈ 0.9618
        assert!((scores[3].unwrap() - 1.4556).abs() < 1e-3);
        assert!((scores[4].unwrap() - (-1.1437)).abs() < 1e-3);
    }

    #[test]
    fn single_row_group_scores_missing() {
        let rows = vec![obs("Lima", (2020, 6), Some(20.0))];
        let scores = seasonal_scores(&rows).unwrap();
        assert_eq!(scores, vec![None]);
    }

    #[test]
    fn zero_spread_group_scores_missing() {
        let rows = vec![
            obs("Quito", (2019, 3), Some(12.0)),
            obs("Quito", (2020, 3), Some(12.0)),
            obs("Quito", (2021, 3), Some(12.0)),
        ];
        let scores = seasonal_scores(&rows).unwrap();
        assert!(scores.iter().all(Option::is_none));
    }

    #[test]
    fn calendar_months_do_not_mix() {
        // January history is tight; the June outlier must not widen it.
        let rows = vec![
            obs("Oslo", (2019, 1), Some(-3.0)),
            obs("Oslo", (2020, 1), Some(-2.0)),
            obs("Oslo", (2021, 6), Some(18.0)),
            obs("Oslo", (2022, 6), Some(19.0)),
        ];
        let scores = seasonal_scores(&rows).unwrap();
        // Each month-group has 2 values; all defined, none cross-contaminated.
        assert!((scores[0].unwrap() + scores[1].unwrap()).abs() < 1e-12);
        assert!((scores[2].unwrap() + scores[3].unwrap()).abs() < 1e-12);
    }

    #[test]
    fn missing_values_do_not_contaminate() {
        let with_gap = vec![
            obs("Cairo", (2019, 7), Some(30.0)),
            obs("Cairo", (2020, 7), None),
            obs("Cairo", (2021, 7), Some(34.0)),
        ];
        let without = vec![
            obs("Cairo", (2019, 7), Some(30.0)),
            obs("Cairo", (2021, 7), Some(34.0)),
        ];
        let a = seasonal_scores(&with_gap).unwrap();
        let b = seasonal_scores(&without).unwrap();
        assert_eq!(a[1], None);
        assert_eq!(a[0], b[0]);
        assert_eq!(a[2], b[1]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(seasonal_scores(&[]), Err(ScoreError::EmptyInput));
        assert_eq!(peer_scores(&[]), Err(ScoreError::EmptyInput));
    }

    #[test]
    fn peer_scores_group_by_year_month_across_cities() {
        // Same year-month, three cities: population is the trio.
        let rows = vec![
            obs("Paris", (2020, 1), Some(5.0)),
            obs("Oslo", (2020, 1), Some(-5.0)),
            obs("Cairo", (2020, 1), Some(18.0)),
            // Different year, same calendar month: its own (singleton) population.
            obs("Paris", (2021, 1), Some(6.0)),
        ];
        let scores = peer_scores(&rows).unwrap();
        assert!(scores[0].is_some() && scores[1].is_some() && scores[2].is_some());
        assert_eq!(scores[3], None); // alone in 2021-01
        assert!(scores[2].unwrap() > 0.0);
        assert!(scores[1].unwrap() < 0.0);
    }

    #[test]
    fn shifted_values_floor_at_zero() {
        let rows = vec![
            obs("Oslo", (2020, 1), Some(-7.5)),
            obs("Oslo", (2020, 2), Some(-2.5)),
            obs("Oslo", (2020, 3), None),
        ];
        let shifted = shifted_values(&rows);
        assert_eq!(shifted, vec![Some(0.0), Some(5.0), None]);
    }

    #[test]
    fn shifted_values_all_missing_column() {
        let rows = vec![obs("Oslo", (2020, 1), None)];
        assert_eq!(shifted_values(&rows), vec![None]);
    }
}
