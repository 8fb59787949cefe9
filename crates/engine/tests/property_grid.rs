// Property-based tests for grid geometry and command inversion.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use gridcanvas_engine::{Axis, Command, CommandHistory, Grid, Side};

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

/// Cell value: mostly numeric, sometimes text, sometimes empty.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"-?[0-9]{1,6}(\.[0-9]{1,2})?",
        1 => r"[a-zA-Z ]{0,15}",
        1 => Just("".to_string()),
    ]
}

#[derive(Debug, Clone)]
enum Edit {
    SetCell { row: usize, col: usize, value: String },
    ResizeRow { index: usize, size: f64 },
    ResizeCol { index: usize, size: f64 },
    InsertRow { index: usize, side: Side },
    InsertCol { index: usize, side: Side },
    DeleteRow { index: usize },
    DeleteCol { index: usize },
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Before), Just(Side::After)]
}

fn arb_edit(rows: usize, cols: usize) -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (0..rows, 0..cols, arb_value())
            .prop_map(|(row, col, value)| Edit::SetCell { row, col, value }),
        2 => (0..rows, 15.0f64..200.0)
            .prop_map(|(index, size)| Edit::ResizeRow { index, size }),
        2 => (0..cols, 20.0f64..300.0)
            .prop_map(|(index, size)| Edit::ResizeCol { index, size }),
        1 => (0..rows, arb_side()).prop_map(|(index, side)| Edit::InsertRow { index, side }),
        1 => (0..cols, arb_side()).prop_map(|(index, side)| Edit::InsertCol { index, side }),
        1 => (0..rows).prop_map(|index| Edit::DeleteRow { index }),
        1 => (0..cols).prop_map(|index| Edit::DeleteCol { index }),
    ]
}

fn build_command(grid: &Grid, edit: &Edit) -> Option<Command> {
    match edit {
        Edit::SetCell { row, col, value } => {
            Command::set_cell_value(grid, *row, *col, value.clone()).ok()
        }
        Edit::ResizeRow { index, size } => Command::resize_row(grid, *index, *size).ok(),
        Edit::ResizeCol { index, size } => Command::resize_column(grid, *index, *size).ok(),
        Edit::InsertRow { index, side } => Some(Command::insert_row(*index, *side)),
        Edit::InsertCol { index, side } => Some(Command::insert_column(*index, *side)),
        Edit::DeleteRow { index } => Command::delete_row(grid, *index).ok(),
        Edit::DeleteCol { index } => Command::delete_column(grid, *index).ok(),
    }
}

fn snapshot(grid: &Grid) -> (usize, usize, Vec<((usize, usize), String)>, usize, usize) {
    let mut cells: Vec<_> = (0..grid.row_count())
        .flat_map(|r| (0..grid.col_count()).map(move |c| (r, c)))
        .filter_map(|(r, c)| {
            let v = grid.cell_text(r, c).ok()?;
            (!v.is_empty()).then(|| ((r, c), v.to_string()))
        })
        .collect();
    cells.sort();
    (
        grid.row_count(),
        grid.col_count(),
        cells,
        grid.rows().override_count(),
        grid.cols().override_count(),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// set followed by get returns the written value; empty writes leave
    /// no entry behind.
    #[test]
    fn set_get_round_trip(row in 0usize..30, col in 0usize..30, value in arb_value()) {
        let mut grid = Grid::new(30, 30);
        let before = grid.occupied_cells();
        grid.set_cell_text(row, col, value.clone()).unwrap();
        prop_assert_eq!(grid.cell_text(row, col).unwrap(), value.as_str());
        if value.is_empty() {
            prop_assert_eq!(grid.occupied_cells(), before);
        }
    }

    /// offset and index_at_offset are inverse over any override pattern.
    #[test]
    fn offset_inverts(overrides in proptest::collection::btree_map(0usize..500, (5u32..100).prop_map(f64::from), 0..20)) {
        let mut axis = Axis::rows(500, 24.0);
        for (&i, &s) in &overrides {
            axis.set_size(i, s).unwrap();
        }
        for i in (0..500).step_by(17) {
            prop_assert_eq!(axis.index_at_offset(axis.offset(i)), i);
            prop_assert_eq!(axis.index_at_offset(axis.offset(i + 1) - 0.25), i);
        }
    }

    /// Undoing a whole random command sequence restores the exact starting
    /// state: counts, cells, and size overrides.
    #[test]
    fn undo_all_restores_initial_state(edits in proptest::collection::vec(arb_edit(12, 12), 1..25)) {
        let mut grid = Grid::new(12, 12);
        grid.set_cell_text(3, 3, "seed").unwrap();
        grid.set_row_size(2, 44.0).unwrap();
        let initial = snapshot(&grid);

        let mut history = CommandHistory::new();
        for edit in &edits {
            // skip edits made out-of-bounds by earlier deletes
            if let Some(cmd) = build_command(&grid, edit) {
                if history.execute(&mut grid, cmd).is_err() {
                    break;
                }
            }
        }
        while history.undo(&mut grid).unwrap() {}
        prop_assert_eq!(snapshot(&grid), initial);
    }

    /// redo replays exactly what undo reverted.
    #[test]
    fn undo_redo_is_identity(edits in proptest::collection::vec(arb_edit(10, 10), 1..15)) {
        let mut grid = Grid::new(10, 10);
        let mut history = CommandHistory::new();
        for edit in &edits {
            if let Some(cmd) = build_command(&grid, edit) {
                let _ = history.execute(&mut grid, cmd);
            }
        }
        let end_state = snapshot(&grid);
        let mut undone = 0;
        while history.undo(&mut grid).unwrap() {
            undone += 1;
        }
        for _ in 0..undone {
            prop_assert!(history.redo(&mut grid).unwrap());
        }
        prop_assert_eq!(snapshot(&grid), end_state);
    }
}
