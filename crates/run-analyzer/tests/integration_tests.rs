//! Integration tests for the activity analyzer.
//!
//! These tests run the full analysis over CSV exports and check the report as a
//! calling service would see it.

use pretty_assertions::assert_eq;
use run_analyzer::{
    AnalysisConfig, AnalysisError, Analyzer, Value, analyze, contains_non_finite, load_table,
};
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_report() -> Value {
    Analyzer::default()
        .analyze_file(fixtures_path().join("activities.csv"))
        .expect("fixture should analyze")
        .into_value()
}

fn section<'a>(report: &'a Value, path: &[&str]) -> &'a Value {
    path.iter().fold(report, |value, key| {
        value
            .get(key)
            .unwrap_or_else(|| panic!("missing key {key} in path {path:?}"))
    })
}

fn seq<'a>(report: &'a Value, path: &[&str]) -> &'a [Value] {
    section(report, path).as_seq().expect("expected a sequence")
}

/// Columns every view needs, without the optional cadence/stride ones.
fn minimal_config() -> AnalysisConfig {
    AnalysisConfig::builder()
        .desc_matrix_columns(["Distance", "Avg_pace_secs"])
        .yearly_stats_columns(["Distance"])
        .histogram_columns(["Distance"])
        .build()
        .unwrap()
}

// ============================================================================
// Full Report Tests
// ============================================================================

#[test]
fn test_report_has_all_sections() {
    let report = fixture_report();
    assert_eq!(
        report.keys(),
        vec![
            "desc_matrix",
            "avg_pace_day_week",
            "totals",
            "yearly_statistics",
            "histogram_data",
            "time_series_data",
            "best_perf",
        ]
    );
}

#[test]
fn test_sanitized_report_has_no_non_finite_values() {
    let analyzer = Analyzer::default();
    let report = analyzer
        .analyze_file(fixtures_path().join("activities.csv"))
        .unwrap();

    // fewer than 30 rows: every moving average is unknown
    assert!(contains_non_finite(&report.to_value()));
    assert!(!contains_non_finite(&report.clone().into_value()));

    let json = report.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("best_perf").is_some());
}

#[test]
fn test_descriptive_matrix_section() {
    let report = fixture_report();

    let index = seq(&report, &["desc_matrix", "index"]);
    assert_eq!(index.len(), 13);
    assert_eq!(index[0].as_str(), Some("Distance"));
    assert_eq!(index[12].as_str(), Some("Average Pace (HH:MM:SS.ss)"));

    // one Avg HR cell is "--"
    let count = seq(&report, &["desc_matrix", "count"]);
    assert_eq!(count[0].as_i64(), Some(8));
    assert_eq!(count[1].as_i64(), Some(7));
    assert_eq!(count[12].as_str(), Some(""));

    let mean = seq(&report, &["desc_matrix", "mean"]);
    assert_eq!(mean[12].as_str(), Some("05:13.00"));

    let max = seq(&report, &["desc_matrix", "max"]);
    assert_eq!(max[0].as_f64(), Some(21.1));
    assert_eq!(max[12].as_str(), Some(""));
}

#[test]
fn test_weekday_section_skips_days_without_runs() {
    let report = fixture_report();
    let weekdays = section(&report, &["avg_pace_day_week"]);

    assert_eq!(
        weekdays.keys(),
        vec!["Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
    assert_eq!(weekdays.get("Saturday").and_then(Value::as_str), Some("05:25.00"));
    assert_eq!(weekdays.get("Sunday").and_then(Value::as_str), Some("04:48.33"));
}

#[test]
fn test_totals_section() {
    let report = fixture_report();
    assert_eq!(
        section(&report, &["totals", "total_calories"]).as_i64(),
        Some(4477)
    );
    assert_eq!(
        section(&report, &["totals", "total_distance"]).as_f64(),
        Some(64.2)
    );
}

#[test]
fn test_yearly_section() {
    let report = fixture_report();

    let years: Vec<i64> = seq(&report, &["yearly_statistics", "Distance", "Year"])
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    assert_eq!(years, vec![2023, 2024]);

    let min: Vec<f64> = seq(&report, &["yearly_statistics", "Distance", "min"])
        .iter()
        .filter_map(Value::as_f64)
        .collect();
    assert_eq!(min, vec![4.99, 5.0]);

    let max: Vec<f64> = seq(&report, &["yearly_statistics", "Distance", "max"])
        .iter()
        .filter_map(Value::as_f64)
        .collect();
    assert_eq!(max, vec![10.01, 21.1]);
}

#[test]
fn test_histogram_section_counts_known_values() {
    let report = fixture_report();

    let distance: u64 = seq(&report, &["histogram_data", "Distance", "counts"])
        .iter()
        .filter_map(Value::as_i64)
        .map(|c| c as u64)
        .sum();
    assert_eq!(distance, 8);

    let heart_rate: i64 = seq(&report, &["histogram_data", "Avg HR", "counts"])
        .iter()
        .filter_map(Value::as_i64)
        .sum();
    assert_eq!(heart_rate, 7);
    assert_eq!(seq(&report, &["histogram_data", "Avg HR", "bins"]).len(), 10);
}

#[test]
fn test_time_series_unknowns_become_zero() {
    let report = fixture_report();

    let dates = seq(&report, &["time_series_data", "Avg HR", "dates"]);
    assert_eq!(dates[0].as_str(), Some("2023-11-04 08:12:45"));

    let values = seq(&report, &["time_series_data", "Avg HR", "values"]);
    assert_eq!(values[3], Value::Int(0));
    assert_eq!(values[0].as_f64(), Some(148.0));

    let moving = seq(&report, &["time_series_data", "Avg Pace", "moving_average"]);
    assert_eq!(moving.len(), 8);
    assert!(moving.iter().all(|v| *v == Value::Int(0)));
}

#[test]
fn test_best_performances_section() {
    let report = fixture_report();
    let best = section(&report, &["best_perf"]);

    assert_eq!(
        best.keys(),
        vec!["1", "3.22", "4.83", "5", "6.44", "8.05", "10", "21.1"]
    );

    // 5.03 lies outside the 0.02 window; 4.99 and 5.01 inside
    let five_k = seq(&report, &["best_perf", "5"]);
    let dates: Vec<&str> = five_k
        .iter()
        .filter_map(|r| r.get("Date").and_then(Value::as_str))
        .collect();
    assert_eq!(
        dates,
        vec![
            "2023-12-17T09:00:00",
            "2024-03-10T07:15:32",
            "2024-01-06T07:45:10"
        ]
    );
    assert_eq!(
        five_k[0].get("Avg Pace").and_then(Value::as_str),
        Some("4:30")
    );
    assert_eq!(
        five_k[0].get("Time").and_then(Value::as_str),
        Some("00:22:27")
    );

    assert!(seq(&report, &["best_perf", "1"]).is_empty());
    assert_eq!(seq(&report, &["best_perf", "21.1"]).len(), 1);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

#[test]
fn test_totals_with_quoted_and_unknown_cells() {
    let csv = "\
Date,Distance,Calories,Time,Avg HR,Avg Pace
2024-01-01 07:00:00,5.0,300,00:25:00,150,5:00
2024-01-02 07:00:00,3.1,\"450\",00:16:00,150,5:10
2024-01-03 07:00:00,--,200,00:10:00,150,5:20
";
    let report = Analyzer::new(minimal_config())
        .unwrap()
        .analyze(csv)
        .unwrap();

    assert_eq!(report.totals.total_calories, 950);
    assert_eq!(report.totals.total_distance, 8.1);
}

#[test]
fn test_no_tuesday_rows_means_no_tuesday_key() {
    // 2024-01-01 Monday, 2024-01-03 Wednesday
    let csv = "\
Date,Distance,Calories,Time,Avg HR,Avg Pace
2024-01-01 07:00:00,5.0,300,00:25:00,150,5:00
2024-01-03 07:00:00,5.0,300,00:25:00,150,5:00
";
    let value = analyze(csv, &minimal_config()).unwrap();
    assert_eq!(
        section(&value, &["avg_pace_day_week"]).keys(),
        vec!["Monday", "Wednesday"]
    );
}

#[test]
fn test_yearly_absent_label_marks_only_that_label() {
    let config = AnalysisConfig::builder()
        .desc_matrix_columns(["Distance"])
        .yearly_stats_columns(["Distance", "Avg Power"])
        .histogram_columns(["Distance"])
        .build()
        .unwrap();
    let csv = "\
Date,Distance,Calories,Time,Avg HR,Avg Pace
2024-01-01 07:00:00,5.0,300,00:25:00,150,5:00
";
    let value = analyze(csv, &config).unwrap();

    assert!(section(&value, &["yearly_statistics", "Distance", "mean"]).as_seq().is_some());
    assert_eq!(
        section(&value, &["yearly_statistics", "Avg Power", "error"]).as_str(),
        Some("Avg Power not found in dataset")
    );
}

#[test]
fn test_bad_timestamp_rejects_dataset() {
    let csv = "\
Date,Distance,Calories,Time,Avg HR,Avg Pace
2024-01-01 07:00:00,5.0,300,00:25:00,150,5:00
yesterday,5.0,300,00:25:00,150,5:00
";
    let err = Analyzer::new(minimal_config())
        .unwrap()
        .analyze(csv)
        .unwrap_err();
    assert_eq!(err.error_code(), "DATA_FORMAT_ERROR");
    assert!(err.is_data_error());
}

#[test]
fn test_missing_required_source_column() {
    let csv = "Date,Distance,Time\n2024-01-01 07:00:00,5.0,00:25:00\n";
    let err = load_table(csv).unwrap_err();
    assert_eq!(err.error_code(), "DATA_FORMAT_ERROR");
    assert!(err.to_string().contains("Avg Pace"));
}

#[test]
fn test_missing_calories_column_is_missing_field() {
    let csv = "\
Date,Distance,Time,Avg HR,Avg Pace
2024-01-01 07:00:00,5.0,00:25:00,150,5:00
";
    let err = Analyzer::new(minimal_config())
        .unwrap()
        .analyze(csv)
        .unwrap_err();
    assert_eq!(err.error_code(), "MISSING_FIELD");

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "MISSING_FIELD");
    assert_eq!(
        json["message"],
        "Error computing totals: Missing required columns: Calories"
    );
}

#[test]
fn test_moving_average_over_forty_rows() {
    let mut csv = String::from("Date,Distance,Calories,Time,Avg HR,Avg Pace\n");
    for i in 0..40 {
        csv.push_str(&format!(
            "2024-{:02}-{:02} 07:00:00,5.0,300,00:25:00,150,5:00\n",
            i / 28 + 1,
            i % 28 + 1
        ));
    }
    let report = Analyzer::new(minimal_config())
        .unwrap()
        .analyze(&csv)
        .unwrap();

    let pace = &report.time_series_data.avg_pace.moving_average;
    assert_eq!(pace.len(), 40);
    assert!(pace[..29].iter().all(Option::is_none));
    assert!(pace[29..].iter().all(|v| *v == Some(300.0)));

    let hr = &report.time_series_data.avg_hr.moving_average;
    assert!(hr[29..].iter().all(|v| *v == Some(150.0)));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_partial_json_config_takes_defaults() {
    let config = AnalysisConfig::from_json(r#"{"histogram_bins": 5, "target_distances": [5.0]}"#)
        .unwrap();
    assert_eq!(config.histogram_bins, 5);
    assert_eq!(config.target_distances, vec![5.0]);
    assert_eq!(config.distance_tolerance, 0.02);

    let report = Analyzer::new(config)
        .unwrap()
        .analyze_file(fixtures_path().join("activities.csv"))
        .unwrap();
    assert_eq!(report.best_perf.len(), 1);
    assert!(
        report
            .histogram_data
            .iter()
            .filter_map(|(_, outcome)| outcome.computed())
            .all(|h| h.counts.len() == 5)
    );
}

#[test]
fn test_invalid_json_config_rejected() {
    let err = AnalysisConfig::from_json(r#"{"distance_tolerance": -1.0}"#).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");
    assert!(matches!(err, AnalysisError::InvalidConfig(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Analyzer::default()
        .analyze_file(fixtures_path().join("does_not_exist.csv"))
        .unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}

#[test]
fn test_independent_analyses_on_threads() {
    let analyzer = std::sync::Arc::new(Analyzer::default());
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let analyzer = analyzer.clone();
            std::thread::spawn(move || {
                analyzer
                    .analyze_file(fixtures_path().join("activities.csv"))
                    .map(|r| r.totals.total_calories)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 4477);
    }
}
