use grid_frontier::io::{read_grid_csv, write_path, write_trace};
use grid_frontier::{
    coord, path_cost, search, BestFirstSolver, GridModel, Outcome, PathfindingError, TraceOrder,
};

fn grid(codes: &[&[i64]]) -> GridModel {
    let rows = codes.iter().map(|r| r.to_vec()).collect::<Vec<_>>();
    GridModel::from_codes(&rows).unwrap()
}

#[test]
fn single_obstacle_grid() {
    // The cell between start and goal is free, so the direct route wins.
    let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[3, 0, 2]]);
    let run = search(&g, coord(2, 0), coord(2, 2), false).unwrap();
    assert_eq!(
        run.path().unwrap(),
        &[coord(2, 0), coord(2, 1), coord(2, 2)]
    );
}

#[test]
fn detour_around_walls() {
    let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[3, 1, 2]]);
    let run = search(&g, coord(2, 0), coord(2, 2), false).unwrap();
    let path = run.path().unwrap();
    assert_eq!(
        path,
        &[
            coord(2, 0),
            coord(1, 0),
            coord(0, 0),
            coord(0, 1),
            coord(0, 2),
            coord(1, 2),
            coord(2, 2)
        ]
    );
    assert_eq!(path_cost(path), 6);
    assert_eq!(run.trace.expansion_order(), path.to_vec());
}

#[test]
fn straight_line_is_manhattan_distance() {
    let mut codes = vec![vec![0i64; 9]; 4];
    codes[2][1] = 3;
    codes[2][7] = 2;
    codes[1][4] = 1;
    codes[3][4] = 1;
    let g = GridModel::from_codes(&codes).unwrap();
    for heuristic in [false, true] {
        let path = search(&g, g.start(), g.goal(), heuristic)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|p| p.y == 2));
    }
}

#[test]
fn wall_exhausts_frontier() {
    let g = grid(&[
        &[3, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 2],
    ]);
    for heuristic in [false, true] {
        let run = search(&g, g.start(), g.goal(), heuristic).unwrap();
        assert_eq!(run.outcome, Outcome::NoPathExists);
        assert!(run.path().is_none());
        // Every cell left of the wall is expanded exactly once.
        assert_eq!(run.trace.len(), 6);
        assert!(matches!(
            run.into_path(),
            Err(PathfindingError::NoPathExists)
        ));
    }
}

#[test]
fn blocked_start_produces_no_trace() {
    let g = grid(&[&[3, 1, 2]]);
    let err = search(&g, coord(0, 1), g.goal(), false).unwrap_err();
    assert!(matches!(err, PathfindingError::InvalidEndpoint { .. }));
    let err = search(&g, g.start(), coord(0, 1), true).unwrap_err();
    assert!(matches!(err, PathfindingError::InvalidEndpoint { .. }));
}

#[test]
fn first_snapshot_after_start_pop() {
    let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[3, 1, 2]]);
    let run = search(&g, g.start(), g.goal(), false).unwrap();
    let first = &run.trace.snapshots()[0];
    assert_eq!(first.popped, coord(2, 0));
    assert!(first.frontier.is_empty());
    let second = &run.trace.snapshots()[1];
    assert_eq!(second.popped, coord(1, 0));
    assert!(second.frontier.is_empty());
}

#[test]
fn stale_entries_stay_visible_in_trace() {
    // S#....
    // ...#.#
    // .#...G
    let g = grid(&[
        &[3, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 1],
        &[0, 1, 0, 0, 0, 2],
    ]);
    let run = search(&g, g.start(), g.goal(), true).unwrap();
    assert_eq!(
        run.trace.expansion_order(),
        vec![
            coord(0, 0),
            coord(1, 0),
            coord(1, 1),
            coord(1, 2),
            coord(0, 2),
            coord(0, 3),
            coord(0, 4),
            coord(1, 4),
            coord(2, 2),
            coord(2, 3),
            coord(2, 4),
            coord(2, 5)
        ]
    );
    // (2,4) is first pushed from (1,4) and again, cheaper, from (2,3). The outdated entry is
    // still listed after the cheaper one has been popped.
    let snapshot = &run.trace.snapshots()[10];
    assert_eq!(snapshot.popped, coord(2, 4));
    assert_eq!(
        snapshot.frontier_points().collect::<Vec<_>>(),
        vec![coord(2, 4), coord(0, 5), coord(2, 0)]
    );
    assert_eq!(run.path().unwrap().len(), 8);
    assert_eq!(run.path().unwrap()[5], coord(2, 3));
}

#[test]
fn guided_path_may_be_longer() {
    // S#....
    // ...#..
    // ##...G
    let g = grid(&[
        &[3, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0],
        &[1, 1, 0, 0, 0, 2],
    ]);
    let uniform = search(&g, g.start(), g.goal(), false).unwrap();
    let guided = search(&g, g.start(), g.goal(), true).unwrap();
    assert_eq!(uniform.path().unwrap().len(), 8);
    assert_eq!(guided.path().unwrap().len(), 10);
}

#[test]
fn heap_layout_lists_same_entries() {
    let g = grid(&[&[3, 0, 0, 0], &[0, 1, 1, 0], &[0, 0, 0, 2]]);
    let popped = search(&g, g.start(), g.goal(), false).unwrap();
    let heap = BestFirstSolver::dijkstra()
        .with_trace_order(TraceOrder::HeapLayout)
        .solve(&g, g.start(), g.goal())
        .unwrap();
    assert_eq!(popped.outcome, heap.outcome);
    assert_eq!(popped.trace.len(), heap.trace.len());
    for (a, b) in popped.trace.iter().zip(heap.trace.iter()) {
        assert_eq!(a.popped, b.popped);
        let mut x = a.frontier.clone();
        let mut y = b.frontier.clone();
        x.sort();
        y.sort();
        assert_eq!(x, y);
    }
}

#[test]
fn serialized_outputs() {
    let g = read_grid_csv("0,0,0\n0,1,0\n3,1,2\n".as_bytes()).unwrap();
    let run = search(&g, g.start(), g.goal(), false).unwrap();

    let mut path_out = Vec::new();
    write_path(&mut path_out, run.path().unwrap()).unwrap();
    assert_eq!(
        String::from_utf8(path_out).unwrap(),
        "2,0\n1,0\n0,0\n0,1\n0,2\n1,2\n2,2\n"
    );

    let mut trace_out = Vec::new();
    write_trace(&mut trace_out, &run.trace).unwrap();
    let text = String::from_utf8(trace_out).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.lines().all(|l| l.split(',').count() % 2 == 0));
    assert_eq!(text.lines().next(), Some("2,0"));
}

#[test]
fn grid_shared_between_threads() {
    let g = grid(&[&[3, 0, 0], &[1, 1, 0], &[2, 0, 0]]);
    let shared = &g;
    let paths = std::thread::scope(|s| {
        let handles = [false, true].map(|heuristic| {
            s.spawn(move || search(shared, shared.start(), shared.goal(), heuristic))
        });
        handles.map(|h| h.join().unwrap().unwrap().into_path().unwrap())
    });
    assert_eq!(paths[0].len(), 7);
    assert_eq!(paths[0], paths[1]);
}
