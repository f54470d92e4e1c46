use clap::{ArgAction, Parser};
use mazecore::{dims::Dims, GeneratorKind, SolverKind};

use mazesim::{
    app::Simulation,
    error::Error,
    logging,
    render::Renderer,
    settings::{LogLevel, Settings},
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazesim")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of columns")]
    columns: Option<usize>,
    #[clap(short, long, help = "dfs, growing-tree, kruskal or weighted")]
    generator: Option<GeneratorKind>,
    #[clap(short, long, help = "dfs, bfs, dijkstra or astar")]
    solver: Option<SolverKind>,
    #[clap(long, help = "Seed of the random source, random if not set")]
    seed: Option<u64>,
    #[clap(short, long, help = "Pause after every step, in milliseconds")]
    delay_ms: Option<u64>,
    #[clap(long, value_parser = parse_pos, help = "Start as row,column [default: 0,0]")]
    start: Option<Dims>,
    #[clap(long, value_parser = parse_pos, help = "End as row,column [default: last cell]")]
    end: Option<Dims>,
    #[clap(long, action, help = "Solve again with every solver and print their results")]
    compare_solvers: bool,
    #[clap(long, action, help = "Don't color cells by their depth")]
    no_depth_colors: bool,
    #[clap(long, action, help = "Print without any colors")]
    plain: bool,
    #[clap(short, long, action = ArgAction::Count, help = "More logging, can be repeated")]
    verbose: u8,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Show config in debug format and quit")]
    debug_config: bool,
}

impl Args {
    /// Command line values win over the settings file.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(rows) = self.rows {
            settings = settings.set_rows(rows);
        }
        if let Some(columns) = self.columns {
            settings = settings.set_columns(columns);
        }
        if let Some(generator) = self.generator {
            settings = settings.set_generator(generator);
        }
        if let Some(solver) = self.solver {
            settings = settings.set_solver(solver);
        }
        if let Some(seed) = self.seed {
            settings = settings.set_seed(seed);
        }
        if let Some(delay) = self.delay_ms {
            settings = settings.set_delay_ms(delay);
        }
        if self.no_depth_colors {
            settings = settings.set_color_by_depth(false);
        }
        match self.verbose {
            0 => {}
            1 => settings = settings.set_log_level(LogLevel::Info),
            2 => settings = settings.set_log_level(LogLevel::Debug),
            _ => settings = settings.set_log_level(LogLevel::Trace),
        }

        settings
    }
}

fn parse_pos(text: &str) -> Result<Dims, String> {
    let (row, column) = text
        .split_once(',')
        .ok_or_else(|| format!("expected row,column, got `{text}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|err| format!("`{s}`: {err}"))
    };

    Ok(Dims(parse(row)?, parse(column)?))
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init(log::LevelFilter::Warn)?;

    let settings_path = Settings::default_path()?;

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    let settings = args.apply(Settings::load(&settings_path)?);

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    logging::get_logger().set_min_level(settings.get_log_level());
    better_panic::install();

    let sim = Simulation {
        start: args.start,
        end: args.end,
        ..Simulation::from_settings(&settings)
    };
    let mut outcome = sim.run()?;

    let renderer = Renderer {
        colored: !args.plain,
        depth_colors: settings.get_color_by_depth(),
    };
    print!("{}", renderer.render(outcome.maze.board()));

    println!("seed: {}", outcome.maze.seed());
    println!(
        "{}: {} steps, {}: {} steps",
        sim.generator, outcome.generate_steps, sim.solver, outcome.solve_steps
    );
    match outcome.path_length {
        Some(length) => println!("path length: {}", length),
        None => println!("no path"),
    }

    if args.compare_solvers {
        for comparison in sim.compare_solvers(&mut outcome.maze)? {
            let length = comparison
                .path_length
                .map_or_else(|| "-".to_string(), |l| l.to_string());
            println!(
                "{:>10}: path {:>5}, {:>6} steps",
                comparison.solver, length, comparison.steps
            );
        }
    }

    Ok(())
}
