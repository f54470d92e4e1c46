use std::{thread, time::Duration};

use log::{debug, info};
use mazecore::{algorithms::Step, dims::Dims, GeneratorKind, Maze, Run, SolverKind};

use crate::{error::Error, settings::Settings};

/// One generate and solve session, resolved from settings and command line.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub rows: usize,
    pub columns: usize,
    pub generator: GeneratorKind,
    pub solver: SolverKind,
    pub seed: Option<u64>,
    pub delay: Duration,
    pub start: Option<Dims>,
    pub end: Option<Dims>,
}

#[derive(Debug)]
pub struct Outcome {
    pub maze: Maze,
    pub generate_steps: usize,
    pub solve_steps: usize,
    pub path_length: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub solver: SolverKind,
    pub steps: usize,
    pub path_length: Option<usize>,
}

impl Simulation {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rows: settings.get_rows(),
            columns: settings.get_columns(),
            generator: settings.get_generator(),
            solver: settings.get_solver(),
            seed: settings.get_seed(),
            delay: settings.get_delay(),
            start: None,
            end: None,
        }
    }

    /// Start, top-left corner unless set.
    pub fn start(&self) -> Dims {
        self.start.unwrap_or(Dims::ZERO)
    }

    /// End, bottom-right corner unless set.
    pub fn end(&self) -> Dims {
        self.end
            .unwrap_or(Dims(self.rows as i32 - 1, self.columns as i32 - 1))
    }

    pub fn run(&self) -> Result<Outcome, Error> {
        let mut maze = Maze::new(self.rows, self.columns, self.seed)?;
        maze.set_delay(self.delay);
        info!("seed {}", maze.seed());

        let generate_steps = drive(maze.generate(self.generator)?, self.delay)?;

        maze.set_start(self.start())?;
        maze.set_end(self.end())?;
        let solve_steps = drive(maze.solve(self.solver)?, self.delay)?;
        let path_length = maze.board().path_length();

        Ok(Outcome {
            maze,
            generate_steps,
            solve_steps,
            path_length,
        })
    }

    /// Solves the maze again with every solver, leaving it solved by the last one.
    pub fn compare_solvers(&self, maze: &mut Maze) -> Result<Vec<Comparison>, Error> {
        SolverKind::ALL
            .into_iter()
            .map(|solver| -> Result<Comparison, Error> {
                maze.refresh()?;
                let steps = maze.solve(solver)?.finish()?;
                Ok(Comparison {
                    solver,
                    steps,
                    path_length: maze.board().path_length(),
                })
            })
            .collect()
    }
}

/// Steps a run to its end, logging every quarter of progress and sleeping `delay` in between.
fn drive(mut run: Run<'_>, delay: Duration) -> Result<usize, Error> {
    let mut reported = 0;

    while run.step()? == Step::Continue {
        let percent = (run.progress().percent() * 100.0) as u32;
        if percent >= reported + 25 {
            reported = percent / 25 * 25;
            debug!("{} {}%", run.name(), reported);
        }

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    Ok(run.steps())
}
