use super::*;

fn synthetic(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| Record {
            eruption_time: 1.6 + (i % 30) as f64 * 0.1,
            waiting_time: 43.0 + (i % 50) as f64,
        })
        .collect();
    Dataset::from_records(records)
}

#[test]
fn loads_well_formed_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("faithful.csv");
    fs::write(
        &path,
        "eruption_time,waiting_time\n3.600,79\n1.800,54\n3.333,74\n",
    )
    .expect("write");

    let dataset = Dataset::load(&path).expect("load");
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.records()[0].eruption_time, 3.6);
    assert_eq!(dataset.records()[0].waiting_time, 79.0);
}

#[test]
fn tolerates_padded_header_and_blank_lines() {
    let parsed = Dataset::parse("eruption_time, waiting_time\n3.600, 79\n\n1.800,54\n").expect("parse");
    assert_eq!(parsed.len(), 2);
}

#[test]
fn rejects_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Dataset::load(dir.path().join("absent.csv")).expect_err("should fail");
    assert!(err.to_string().contains("failed to read dataset file"));
}

#[test]
fn rejects_unexpected_header() {
    let err = Dataset::parse("eruptions,waiting\n3.6,79\n").expect_err("should fail");
    assert!(err.to_string().contains("unexpected header"));
}

#[test]
fn rejects_wrong_column_count() {
    let err = Dataset::parse("eruption_time,waiting_time\n3.6,79,1\n").expect_err("should fail");
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn rejects_non_numeric_cell() {
    let err = Dataset::parse("eruption_time,waiting_time\n3.6,soon\n").expect_err("should fail");
    assert!(err.to_string().contains("bad waiting_time"));
}

#[test]
fn full_fraction_returns_every_row() {
    let dataset = synthetic(272);
    let drawn = sample(&dataset, 1.0).expect("sample");
    assert_eq!(drawn.len(), 272);
}

#[test]
fn sample_size_rounds_to_nearest() {
    let dataset = synthetic(272);
    assert_eq!(sample(&dataset, 0.125).expect("sample").len(), 34);
    assert_eq!(sample(&dataset, 1.0 / 128.0).expect("sample").len(), 2);
}

#[test]
fn sampled_rows_all_come_from_the_dataset() {
    let dataset = synthetic(100);
    let drawn = sample(&dataset, 0.25).expect("sample");
    assert_eq!(drawn.len(), 25);
    for record in drawn {
        assert!(dataset.records().contains(&record));
    }
}

#[test]
fn tiny_fraction_of_tiny_dataset_is_empty_not_an_error() {
    let dataset = synthetic(3);
    let drawn = sample(&dataset, 1.0 / 128.0).expect("sample");
    assert!(drawn.is_empty());
}

#[test]
fn out_of_range_fractions_are_rejected() {
    let dataset = synthetic(10);
    for fraction in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
        let err = sample(&dataset, fraction).expect_err("should fail");
        assert_eq!(err.code, ErrorCode::InvalidParameter);
    }
}

#[test]
fn successive_draws_are_independent_subsets() {
    let dataset = synthetic(64);
    let first = sample(&dataset, 0.5).expect("sample");
    let second = sample(&dataset, 0.5).expect("sample");
    assert_eq!(first.len(), 32);
    assert_eq!(second.len(), 32);
    // Identical draws are possible but astronomically unlikely to repeat
    // across every row; only the sizes are guaranteed.
}
