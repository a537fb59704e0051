use grid_frontier::{search, GridModel};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |   |
// | # |
// |S#G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = GridModel::from_codes(&[vec![0, 0, 0], vec![0, 1, 0], vec![3, 1, 2]])
        .expect("grid has one start and one goal");
    println!("{}", grid);
    let run = search(&grid, grid.start(), grid.goal(), false).expect("endpoints are free");
    match run.path() {
        Some(path) => {
            println!("Path:");
            for p in path {
                println!("{},{}", p.y, p.x);
            }
        }
        None => println!("No path found!"),
    }
}
