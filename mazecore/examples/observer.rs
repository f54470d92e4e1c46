use std::env;

use mazecore::{
    dims::Dims,
    gameboard::{CellPoint, ChangeKind},
    GeneratorKind, Maze, SolverKind,
};

/// Prints every cell change of a small maze, one line per notification.
fn main() {
    let mut args = env::args().skip(1);
    let generator = args
        .next()
        .map(|s| s.parse::<GeneratorKind>())
        .transpose()
        .expect("Unknown generator")
        .unwrap_or_default();
    let solver = args
        .next()
        .map(|s| s.parse::<SolverKind>())
        .transpose()
        .expect("Unknown solver")
        .unwrap_or_default();

    let mut maze = Maze::new(4, 4, Some(0)).unwrap();
    maze.subscribe(|change| match change.kind {
        ChangeKind::Point(CellPoint::Path) => println!("{:?} is on the path", change.pos),
        kind => println!("{:?} {:?}", change.pos, kind),
    });

    maze.generate(generator).unwrap().finish().unwrap();
    maze.set_start(Dims(0, 0)).unwrap();
    maze.set_end(Dims(3, 3)).unwrap();
    let steps = maze.solve(solver).unwrap().finish().unwrap();

    println!("{solver} took {steps} steps");
}
