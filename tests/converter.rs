use std::path::PathBuf;

use assert_approx_eq::assert_approx_eq;
use rtd_converter::{ClampStatus, ParseError, Quantity, QueryError, RtdConverter};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn pt100() -> RtdConverter {
    let mut converter = RtdConverter::new();
    converter.load_table(fixture("pt100.tsv")).unwrap();
    converter
}

#[test]
fn loads_fixture() {
    let table = pt100().table().unwrap();
    assert_eq!(table.len(), 17);
    assert_eq!(table.resistance_range(), Some((18.5201, 175.856)));
    assert_eq!(table.temperature_range(), Some((73.15, 473.15)));
    assert!(table.is_ascending(Quantity::Resistance));
    assert!(table.is_ascending(Quantity::Temperature));
}

#[test]
fn exact_rows_map_to_their_temperature() {
    let converter = pt100();
    let table = converter.table().unwrap();

    for (k, (r, t)) in table.rows().enumerate().skip(1) {
        let conversion = converter.temperature_for(r).unwrap();
        assert_eq!(conversion.status, ClampStatus::Interpolated, "row {k}");
        assert_approx_eq!(conversion.value, t, 1e-9);

        let conversion = converter.resistance_for(t).unwrap();
        assert_eq!(conversion.status, ClampStatus::Interpolated, "row {k}");
        assert_approx_eq!(conversion.value, r, 1e-9);
    }
}

#[test]
fn first_row_is_clamped_low() {
    let converter = pt100();
    let conversion = converter.temperature_for(18.5201).unwrap();
    assert_eq!(conversion.status, ClampStatus::ClampedLow);
    assert_eq!(conversion.value, 73.15);
}

#[test]
fn round_trip_inside_range() {
    let converter = pt100();

    for r in [20.0, 42.42, 99.999, 100.0, 100.001, 123.4, 150.0, 175.0] {
        let t = converter.temperature_for(r).unwrap();
        assert_eq!(t.status, ClampStatus::Interpolated);

        let back = converter.resistance_for(t.value).unwrap();
        assert_eq!(back.status, ClampStatus::Interpolated);
        assert_approx_eq!(back.value, r, 1e-9);
    }
}

#[test]
fn room_temperature() {
    // 293.15 K lies in the 273.15 K .. 298.15 K segment.
    let converter = pt100();
    let expected = 100.0 + (109.7347 - 100.0) * 20.0 / 25.0;
    assert_approx_eq!(converter.resistance_for(293.15).unwrap().value, expected, 1e-9);
}

#[test]
fn clamps_outside_range() {
    let converter = pt100();
    let eps = 1e-6;

    let high = converter.temperature_for(175.856 + eps).unwrap();
    assert_eq!(high.status, ClampStatus::ClampedHigh);
    assert_eq!(high.value, 473.15);

    let low = converter.temperature_for(18.5201 - eps).unwrap();
    assert_eq!(low.status, ClampStatus::ClampedLow);
    assert_eq!(low.value, 73.15);

    let high = converter.resistance_for(1000.0).unwrap();
    assert_eq!(high.status, ClampStatus::ClampedHigh);
    assert_eq!(high.value, 175.856);

    let low = converter.resistance_for(0.0).unwrap();
    assert_eq!(low.status, ClampStatus::ClampedLow);
    assert_eq!(low.value, 18.5201);
}

#[test]
fn two_rows_are_a_straight_line() {
    let mut converter = RtdConverter::new();
    converter.load_str("R\tT\n80\t250\n120\t350\n").unwrap();

    for x in [80.5, 90.0, 100.0, 111.1, 119.99] {
        let expected = 250.0 + (x - 80.0) * 2.5;
        let conversion = converter.temperature_for(x).unwrap();
        assert_eq!(conversion.status, ClampStatus::Interpolated);
        assert_approx_eq!(conversion.value, expected, 1e-9);
    }
}

#[test]
fn worked_example() {
    let mut converter = RtdConverter::new();
    converter.load_str("R\tT\n90\t280\n100\t290\n110\t300\n").unwrap();

    assert_approx_eq!(converter.temperature_for(95.0).unwrap().value, 285.0);
    assert_approx_eq!(converter.resistance_for(293.0).unwrap().value, 103.0);

    let low = converter.temperature_for(0.001).unwrap();
    assert_eq!(low.status, ClampStatus::ClampedLow);
    assert_eq!(low.value, 280.0);
}

#[test]
fn missing_file() {
    let mut converter = RtdConverter::new();
    let err = converter
        .load_table(fixture("does-not-exist.tsv"))
        .unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(converter.temperature_for(100.0), Err(QueryError::Unpopulated));
}

#[test]
fn malformed_file_keeps_previous_table() {
    let mut converter = pt100();

    let err = converter.load_table(fixture("malformed.tsv")).unwrap_err();
    match err {
        ParseError::InvalidNumber {
            line,
            column,
            field,
        } => {
            assert_eq!(line, 4);
            assert_eq!(column, "R");
            assert_eq!(field, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(converter.table().unwrap().len(), 17);
}

#[test]
fn concurrent_readers() {
    let converter = pt100();

    std::thread::scope(|s| {
        for i in 0..4 {
            let converter = &converter;
            s.spawn(move || {
                let r = 100.0 + i as f64;
                let t = converter.temperature_for(r).unwrap();
                let back = converter.resistance_for(t.value).unwrap();
                assert_approx_eq!(back.value, r, 1e-9);
            });
        }
    });
}

#[test]
fn non_finite_rows_are_rejected() {
    let mut converter = RtdConverter::new();

    let err = converter
        .load_str("R\tT\n90\t280\nNaN\t290\n110\t300\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { line: 3, .. }));

    let err = converter
        .load_str("R\tT\n90\t280\n100\tinf\n110\t300\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { line: 3, .. }));

    assert_eq!(converter.temperature_for(105.0), Err(QueryError::Unpopulated));
}

#[test]
fn error_lines_count_blank_lines() {
    let mut converter = RtdConverter::new();
    let err = converter
        .load_str("R\tT\n\n90\t280\n\n100\tx\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { line: 5, .. }));
}
