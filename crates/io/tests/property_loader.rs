// Property-based tests for the matrix text loader.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use symgrid_engine::{Grid, MAX_SIZE};
use symgrid_io::text::to_text;
use symgrid_io::{parse, parse_with, Layout, LoadError, LoadOptions};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_cell() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => (-1000i32..1000).prop_map(f64::from),
        1 => -1.0e9..1.0e9f64,
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=MAX_SIZE).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(arb_cell(), n), n)
    })
}

/// Render rows as matrix text with a caller-chosen separator between cells.
fn render(rows: &[Vec<f64>], sep: &str) -> String {
    let mut out = format!("{}\n", rows.len());
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
        out.push_str(&cells.join(sep));
        out.push('\n');
    }
    out
}

/// Sizes outside 1..=20, including negatives and large values.
fn arb_bad_size() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(0i64),
        (MAX_SIZE as i64 + 1)..10_000i64,
        -10_000i64..0,
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn well_formed_input_parses_to_square_grid(rows in arb_rows(), wide in any::<bool>()) {
        let sep = if wide { " \t  " } else { " " };
        let grid = parse(&render(&rows, sep)).unwrap();
        prop_assert_eq!(grid.size(), rows.len());
        prop_assert_eq!(grid.rows().len(), rows.len());
        for row in grid.rows() {
            prop_assert_eq!(row.len(), rows.len());
        }
        prop_assert_eq!(grid.into_rows(), rows);
    }

    #[test]
    fn layouts_agree_on_one_row_per_line(rows in arb_rows()) {
        let text = render(&rows, " ");
        let by_rows = parse(&text).unwrap();
        let by_tokens = parse_with(&text, &LoadOptions::with_layout(Layout::Tokens)).unwrap();
        prop_assert_eq!(by_rows, by_tokens);
    }

    #[test]
    fn out_of_range_size_always_rejected(size in arb_bad_size(), tail in "[0-9 .\\n-]{0,64}") {
        let text = format!("{size}\n{tail}");
        prop_assert_eq!(parse(&text), Err(LoadError::OutOfRangeSize { size }));
        prop_assert_eq!(
            parse_with(&text, &LoadOptions::with_layout(Layout::Tokens)),
            Err(LoadError::OutOfRangeSize { size })
        );
    }

    #[test]
    fn exported_text_parses_back(rows in arb_rows()) {
        let grid = Grid::from_rows(rows).unwrap();
        prop_assert_eq!(parse(&to_text(&grid)).unwrap(), grid);
    }

    #[test]
    fn dropping_the_last_row_is_incomplete(rows in arb_rows()) {
        let n = rows.len();
        let text = render(&rows[..n - 1], " ").replacen(&(n - 1).to_string(), &n.to_string(), 1);
        prop_assert_eq!(
            parse(&text),
            Err(LoadError::IncompleteMatrix { expected: n, found: n - 1 })
        );
    }
}
