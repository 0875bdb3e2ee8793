//! Table-to-choice matching properties.

use unexam::parser::{
    match_by_symbols, match_tables_to_choices, sort_tables_by_position, ChoiceSymbolPositions,
};
use unexam::{BoundingBox, Point, TableRegion};

fn region(index: u32, x: f32, y: f32) -> TableRegion {
    TableRegion::new(
        1,
        index,
        BoundingBox::new(x, y, x + 80.0, y + 40.0),
        vec![vec![Some(index.to_string())]],
    )
}

fn symbols(points: &[(usize, f32, f32)]) -> ChoiceSymbolPositions {
    let mut positions = ChoiceSymbolPositions::new();
    for &(slot, x, y) in points {
        positions.record_first(slot, Point::new(x, y));
    }
    positions
}

#[test]
fn test_fallback_orders_two_by_two_grid() {
    let regions = [
        region(1, 50.0, 100.0),
        region(2, 300.0, 100.0),
        region(3, 50.0, 300.0),
        region(4, 300.0, 300.0),
    ];
    let tables: Vec<&TableRegion> = regions.iter().collect();

    let ordered = match_tables_to_choices(&tables, &ChoiceSymbolPositions::new());
    let coords: Vec<(f32, f32)> = ordered.iter().flatten().map(|t| (t.y, t.x)).collect();
    assert_eq!(
        coords,
        vec![(100.0, 50.0), (100.0, 300.0), (300.0, 50.0), (300.0, 300.0)]
    );
}

#[test]
fn test_fallback_ignores_input_order() {
    let regions = [
        region(1, 50.0, 100.0),
        region(2, 300.0, 100.0),
        region(3, 50.0, 300.0),
        region(4, 300.0, 300.0),
    ];
    let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]];

    for order in orders {
        let tables: Vec<&TableRegion> = order.iter().map(|&i| &regions[i]).collect();
        let sorted = sort_tables_by_position(&tables);
        let indices: Vec<u32> = sorted.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4], "input order {:?}", order);
    }
}

#[test]
fn test_fallback_tolerates_uneven_rows() {
    // Top-right sits a little lower than top-left, bottom-left a little higher.
    let regions = [
        region(1, 60.0, 98.0),
        region(2, 310.0, 112.0),
        region(3, 55.0, 290.0),
        region(4, 305.0, 301.0),
    ];
    let tables: Vec<&TableRegion> = regions.iter().rev().collect();

    let sorted = sort_tables_by_position(&tables);
    assert_eq!(
        sorted.iter().map(|t| t.index).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn test_fallback_keeps_extra_tables() {
    let regions = [
        region(1, 50.0, 100.0),
        region(2, 300.0, 100.0),
        region(3, 50.0, 300.0),
        region(4, 300.0, 300.0),
        region(5, 400.0, 500.0),
    ];
    let tables: Vec<&TableRegion> = regions.iter().collect();

    let sorted = sort_tables_by_position(&tables);
    assert_eq!(sorted.len(), 5);
    assert_eq!(sorted[4].index, 5);
}

#[test]
fn test_symbol_matching_is_deterministic() {
    let regions = [
        region(1, 60.0, 120.0),
        region(2, 310.0, 120.0),
        region(3, 60.0, 320.0),
        region(4, 310.0, 320.0),
    ];
    let tables: Vec<&TableRegion> = regions.iter().collect();
    let positions = symbols(&[
        (0, 50.0, 100.0),
        (1, 300.0, 100.0),
        (2, 50.0, 300.0),
        (3, 300.0, 300.0),
    ]);

    let first = match_by_symbols(&tables, &positions);
    for _ in 0..10 {
        let again = match_by_symbols(&tables, &positions);
        assert_eq!(
            again.map(|t| t.map(|t| t.index)),
            first.map(|t| t.map(|t| t.index))
        );
    }
    assert_eq!(first.map(|t| t.map(|t| t.index)), [Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn test_equal_distance_prefers_symbol_found_first() {
    // Equidistant from ① and ②; whichever was found first on the page wins.
    let regions = [region(1, 175.0, 100.0)];
    let tables: Vec<&TableRegion> = regions.iter().collect();
    let positions = symbols(&[(0, 100.0, 100.0), (1, 250.0, 100.0)]);

    let matched = match_by_symbols(&tables, &positions);
    assert_eq!(matched.map(|t| t.map(|t| t.index)), [Some(1), None, None, None]);

    let reversed = symbols(&[(1, 250.0, 100.0), (0, 100.0, 100.0)]);
    let matched = match_by_symbols(&tables, &reversed);
    assert_eq!(matched.map(|t| t.map(|t| t.index)), [None, Some(1), None, None]);
}

#[test]
fn test_equal_distance_keeps_first_table() {
    // Both tables are 20 units from ①; the later one does not replace the first.
    let regions = [region(1, 30.0, 100.0), region(2, 70.0, 100.0)];
    let tables: Vec<&TableRegion> = regions.iter().collect();
    let positions = symbols(&[(0, 50.0, 100.0)]);

    let matched = match_by_symbols(&tables, &positions);
    assert_eq!(matched.map(|t| t.map(|t| t.index)), [Some(1), None, None, None]);
}

#[test]
fn test_greedy_matching_can_drop_a_table() {
    // Both tables are nearest to ②, so ① stays empty even though table 1 could
    // have taken it. The pass is greedy per table, not a global assignment.
    let regions = [region(1, 210.0, 100.0), region(2, 205.0, 100.0)];
    let tables: Vec<&TableRegion> = regions.iter().collect();
    let positions = symbols(&[(0, 50.0, 100.0), (1, 200.0, 100.0)]);

    let matched = match_by_symbols(&tables, &positions);
    assert_eq!(matched.map(|t| t.map(|t| t.index)), [None, Some(2), None, None]);
}
