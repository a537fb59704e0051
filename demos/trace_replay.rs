use grid_frontier::io::write_trace;
use grid_frontier::{search, GridModel};
use std::collections::HashSet;

// Replays the frontier trace of a small search, drawing the expanded points (x), the points
// still on the frontier (o) and the point being expanded (*) at every step. The same trace is
// then printed in the CSV format written to priority_queue.csv.

fn main() {
    let grid = GridModel::from_codes(&[
        vec![3, 0, 0, 0, 0],
        vec![0, 1, 1, 1, 0],
        vec![0, 0, 0, 1, 0],
        vec![1, 1, 0, 0, 2],
    ])
    .expect("grid has one start and one goal");
    let run = search(&grid, grid.start(), grid.goal(), true).expect("endpoints are free");

    let mut expanded = HashSet::new();
    for (step, snapshot) in run.trace.iter().enumerate() {
        expanded.insert(snapshot.popped);
        let open: HashSet<_> = snapshot.frontier_points().collect();
        println!("Step {}:", step);
        for row in 0..grid.rows() as i32 {
            let line = (0..grid.cols() as i32)
                .map(|col| {
                    let p = grid_frontier::coord(row, col);
                    if p == snapshot.popped {
                        '*'
                    } else if expanded.contains(&p) {
                        'x'
                    } else if open.contains(&p) {
                        'o'
                    } else if !grid.passable(p) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            println!("{}", line);
        }
        println!();
    }

    let mut out = Vec::new();
    write_trace(&mut out, &run.trace).expect("writing to memory");
    print!("{}", String::from_utf8_lossy(&out));
}
