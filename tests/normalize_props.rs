// tests/normalize_props.rs
//
// Statistical contract of the normalizer, checked through the public API.

use chrono::NaiveDate;
use clim_anomaly::anomaly::{seasonal_scores, peer_scores, Observation, ScoreError};

fn obs(entity: &str, year: i32, month: u32, value: Option<f64>) -> Observation {
    Observation {
        entity: entity.to_string(),
        month: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
        value,
    }
}

fn mean_and_sample_std(vals: &[f64]) -> (f64, f64) {
    let n = vals.len() as f64;
    let mean = vals.iter().sum::<f64>() / n;
    let var = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

#[test]
fn valid_group_scores_have_zero_mean_unit_variance() {
    let vals = [3.2, 7.9, -1.4, 5.5, 0.0, 12.3, 4.4];
    let rows: Vec<Observation> = vals
        .iter()
        .enumerate()
        .map(|(i, &v)| obs("Madrid", 1950 + i as i32, 4, Some(v)))
        .collect();

    let scores: Vec<f64> = seasonal_scores(&rows)
        .unwrap()
        .into_iter()
        .map(|s| s.unwrap())
        .collect();

    let (m, s) = mean_and_sample_std(&scores);
    assert!(m.abs() < 1e-12, "score mean should be 0, got {m}");
    assert!((s - 1.0).abs() < 1e-12, "score std should be 1, got {s}");
}

#[test]
fn paris_january_scenario() {
    let vals = [5.0, 6.0, 5.5, 7.0, 4.5];
    let rows: Vec<Observation> = vals
        .iter()
        .enumerate()
        .map(|(i, &v)| obs("Paris", 1950 + i as i32, 1, Some(v)))
        .collect();

    let scores = seasonal_scores(&rows).unwrap();
    assert!((scores[3].unwrap() - 1.4556).abs() < 1e-3); // value 7.0
    assert!((scores[4].unwrap() + 1.1437).abs() < 1e-3); // value 4.5
}

#[test]
fn lima_single_row_scores_missing() {
    let rows = vec![obs("Lima", 2020, 6, Some(20.0))];
    assert_eq!(seasonal_scores(&rows).unwrap(), vec![None]);
}

#[test]
fn constant_history_scores_missing_not_zero() {
    let rows: Vec<Observation> = (0..4).map(|i| obs("Quito", 2018 + i, 9, Some(21.5))).collect();
    let scores = seasonal_scores(&rows).unwrap();
    assert!(scores.iter().all(Option::is_none));
}

#[test]
fn missing_values_get_no_score_and_contaminate_nothing() {
    let rows = vec![
        obs("Cairo", 2019, 7, Some(30.0)),
        obs("Cairo", 2020, 7, None),
        obs("Cairo", 2021, 7, Some(34.0)),
        obs("Cairo", 2022, 7, Some(32.0)),
    ];
    let scores = seasonal_scores(&rows).unwrap();
    assert_eq!(scores[1], None);

    let without_gap: Vec<Observation> =
        rows.iter().filter(|o| o.value.is_some()).cloned().collect();
    let reference = seasonal_scores(&without_gap).unwrap();
    assert_eq!(scores[0], reference[0]);
    assert_eq!(scores[2], reference[1]);
    assert_eq!(scores[3], reference[2]);
}

#[test]
fn scores_are_idempotent_over_raw_values() {
    let rows: Vec<Observation> = [5.0, 6.0, 5.5, 7.0, 4.5]
        .iter()
        .enumerate()
        .map(|(i, &v)| obs("Paris", 1950 + i as i32, 1, Some(v)))
        .collect();

    let first = seasonal_scores(&rows).unwrap();
    let second = seasonal_scores(&rows).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_input_fails_eagerly() {
    assert_eq!(seasonal_scores(&[]), Err(ScoreError::EmptyInput));
}

#[test]
fn seasonal_and_peer_are_different_statistics() {
    // Warm city, cold city, two years. Seasonal compares within a city's
    // month history; peer compares across cities in one year-month.
    let rows = vec![
        obs("Cairo", 2020, 1, Some(18.0)),
        obs("Oslo", 2020, 1, Some(-4.0)),
        obs("Cairo", 2021, 1, Some(20.0)),
        obs("Oslo", 2021, 1, Some(-2.0)),
    ];
    let seasonal = seasonal_scores(&rows).unwrap();
    let peer = peer_scores(&rows).unwrap();

    // Seasonal: each city's 2021 value sits above its own history.
    assert!(seasonal[2].unwrap() > 0.0);
    assert!(seasonal[3].unwrap() > 0.0);
    // Peer: Oslo is below the capitals of its year-month either year.
    assert!(peer[1].unwrap() < 0.0);
    assert!(peer[3].unwrap() < 0.0);
    // And the two must not agree in general.
    assert_ne!(seasonal[3], peer[3]);
}
