use grid_frontier::{BestFirstSolver, GridModel};

// The heuristic weight scales the Euclidean estimate, causing points that are closer to the goal
// (ignoring obstacles) to be expanded sooner than in uniform-cost search. This is called
// Weighted A* and it trades path length for fewer expansions.

fn main() {
    const N: usize = 30;
    let mut codes = vec![vec![0i64; N]; N];
    for i in 8..16 {
        for j in 8..16 {
            codes[i][j] = 1;
        }
    }
    for row in codes.iter_mut().take(9).skip(3) {
        row[..6].fill(1);
    }
    codes[1][1] = 3;
    codes[N - 3][N - 3] = 2;
    let grid = GridModel::from_codes(&codes).expect("grid has one start and one goal");
    println!("{}", grid);
    for weight in [0, 1, 2, 4] {
        let solver = BestFirstSolver::new(weight > 0).with_heuristic_weight(weight);
        let run = solver
            .solve(&grid, grid.start(), grid.goal())
            .expect("endpoints are free");
        let length = run.path().map_or(0, |p| p.len());
        println!(
            "weight {}: {} expansions, path of {} points",
            weight, run.expanded, length
        );
    }
}
