use navmesh::block::{BlockGrid, BlockPos, CLIMB_PENALTY, Transition};
use navmesh::errors::NavError;
use navmesh::float_types::{Real, SQRT_2};
use navmesh::search::find_path;

fn approx(a: Real, b: Real) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn straight_walk_on_flat_floor() {
    let grid = BlockGrid::floor(64, (0, 0), (5, 0));
    let start = BlockPos::new(0, 64, 0);
    let goal = BlockPos::new(5, 64, 0);

    let path = find_path(&grid, start, goal, BlockGrid::heuristic).unwrap();
    assert_eq!(path.hop_count(), 5);
    assert!(approx(path.cost(), 5.0));
    assert!(path.steps()[1..]
        .iter()
        .all(|s| s.transition == Some(Transition::Walk)));
}

#[test]
fn open_floor_prefers_diagonals() {
    let grid = BlockGrid::floor(0, (0, 0), (3, 3));
    let path = find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(3, 0, 3), BlockGrid::heuristic)
        .unwrap();
    assert_eq!(path.hop_count(), 3);
    assert!(approx(path.cost(), 3.0 * SQRT_2));
}

#[test]
fn diagonals_do_not_cut_corners() {
    // an L: (0,0) (1,0) (1,1), missing (0,1)
    let mut grid = BlockGrid::new();
    for (x, z) in [(0, 0), (1, 0), (1, 1)] {
        grid.set_walkable(BlockPos::new(x, 0, z));
    }
    let path = find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 1), BlockGrid::heuristic)
        .unwrap();
    assert_eq!(path.nodes(), vec![
        BlockPos::new(0, 0, 0),
        BlockPos::new(1, 0, 0),
        BlockPos::new(1, 0, 1),
    ]);
    assert!(approx(path.cost(), 2.0));
}

#[test]
fn climbing_costs_more_than_descending() {
    let mut grid = BlockGrid::new();
    grid.set_walkable(BlockPos::new(0, 0, 0));
    grid.set_walkable(BlockPos::new(1, 1, 0));
    grid.set_walkable(BlockPos::new(2, 0, 0));

    let up = find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 0), BlockGrid::heuristic)
        .unwrap();
    assert_eq!(up.steps()[1].transition, Some(Transition::Ascend));
    assert!(approx(up.cost(), SQRT_2 + CLIMB_PENALTY));

    let over = find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(2, 0, 0), BlockGrid::heuristic)
        .unwrap();
    let transitions: Vec<_> = over.steps().iter().map(|s| s.transition).collect();
    assert_eq!(transitions, vec![
        None,
        Some(Transition::Ascend),
        Some(Transition::Descend)
    ]);
    assert!(approx(over.cost(), 2.0 * SQRT_2 + CLIMB_PENALTY));
}

#[test]
fn expensive_terrain_is_avoided() {
    // 3 wide, 3 deep; the middle column is swamp
    let mut grid = BlockGrid::floor(0, (0, 0), (2, 2));
    for z in 0..=2 {
        grid.set_cost(BlockPos::new(1, 0, z), 10.0);
    }
    grid.remove(BlockPos::new(1, 0, 2));
    grid.remove(BlockPos::new(1, 0, 0));

    // the only way across is the swamp block (1,0,1)
    let path = find_path(&grid, BlockPos::new(0, 0, 1), BlockPos::new(2, 0, 1), BlockGrid::heuristic)
        .unwrap();
    assert!(path.nodes().contains(&BlockPos::new(1, 0, 1)));
    assert!(approx(path.cost(), 10.0 + 1.0));

    // a bridge around it wins once it exists
    grid.set_walkable(BlockPos::new(1, 0, 2));
    let detour = find_path(&grid, BlockPos::new(0, 0, 1), BlockPos::new(2, 0, 1), BlockGrid::heuristic)
        .unwrap();
    assert!(!detour.nodes().contains(&BlockPos::new(1, 0, 1)));
    assert!(detour.cost() < path.cost());
}

#[test]
fn cost_multiplier_is_clamped() {
    let mut grid = BlockGrid::new();
    let p = BlockPos::new(0, 0, 0);
    grid.set_cost(p, 0.1);
    assert_eq!(grid.cost_multiplier(p), Some(1.0));
    grid.set_cost(p, Real::NAN);
    assert_eq!(grid.cost_multiplier(p), Some(1.0));
    assert_eq!(grid.cost_multiplier(BlockPos::new(9, 9, 9)), None);
}

#[test]
fn unreachable_and_missing_blocks() {
    let mut grid = BlockGrid::floor(0, (0, 0), (1, 0));
    grid.set_walkable(BlockPos::new(5, 0, 0));

    assert_eq!(
        find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(5, 0, 0), BlockGrid::heuristic)
            .unwrap_err(),
        NavError::NoPath
    );
    assert_eq!(
        find_path(&grid, BlockPos::new(0, 0, 0), BlockPos::new(0, 3, 0), BlockGrid::heuristic)
            .unwrap_err(),
        NavError::NoPath
    );
    assert_eq!(grid.len(), 3);
}

#[test]
fn search_at_the_coordinate_limit() {
    let mut grid = BlockGrid::new();
    let edge = BlockPos::new(i32::MAX, 0, i32::MAX);
    let inner = BlockPos::new(i32::MAX - 1, 0, i32::MAX);
    grid.set_walkable(edge);
    grid.set_walkable(inner);

    let path = find_path(&grid, edge, inner, BlockGrid::heuristic).unwrap();
    assert_eq!(path.nodes(), vec![edge, inner]);
    assert!(approx(path.cost(), 1.0));

    let back = find_path(&grid, inner, edge, BlockGrid::heuristic).unwrap();
    assert_eq!(back.hop_count(), 1);
}
