use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazecore::{dims::Dims, GeneratorKind, Maze, SolverKind};

const ROWS: usize = 60;
const COLUMNS: usize = 60;

pub fn generators(c: &mut Criterion) {
    for kind in GeneratorKind::ALL {
        c.bench_function(&format!("generate_{kind}"), |b| {
            b.iter(|| {
                let mut maze = Maze::new(black_box(ROWS), black_box(COLUMNS), Some(0)).unwrap();
                maze.generate(kind).unwrap().finish().unwrap()
            })
        });
    }
}

pub fn solvers(c: &mut Criterion) {
    for kind in SolverKind::ALL {
        c.bench_function(&format!("solve_{kind}"), |b| {
            b.iter(|| {
                let mut maze = Maze::new(ROWS, COLUMNS, Some(0)).unwrap();
                maze.generate(GeneratorKind::RndKruskals)
                    .unwrap()
                    .finish()
                    .unwrap();
                maze.set_start(Dims(0, 0)).unwrap();
                maze.set_end(Dims(ROWS as i32 - 1, COLUMNS as i32 - 1))
                    .unwrap();
                maze.solve(black_box(kind)).unwrap().finish().unwrap()
            })
        });
    }
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = generators, solvers}
criterion_main!(benches);
