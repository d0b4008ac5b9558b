mod logging;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use mazecore::{
    core::Pos,
    rng::Seed,
    solver::Solver,
    MazeConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazegen")]
struct Args {
    #[clap(short = 'W', long, help = "Number of columns")]
    width: Option<usize>,
    #[clap(short = 'H', long, help = "Number of rows")]
    height: Option<usize>,
    #[clap(short, long, allow_hyphen_values = true, help = "Seed, integers and text both work")]
    seed: Option<Seed>,
    #[clap(short, long, help = "depthFirst or huntAndKill")]
    algorithm: Option<String>,
    #[clap(short, long, help = "TOML file with width, height, seed and algorithm")]
    config: Option<PathBuf>,
    #[clap(long, value_name = "ROW,COL", requires = "goal", help = "Cell to solve from")]
    start: Option<Pos>,
    #[clap(long, value_name = "ROW,COL", requires = "start", help = "Cell to solve to")]
    goal: Option<Pos>,
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More output on stderr, repeatable")]
    verbose: u8,
}

impl Args {
    fn maze_config(&self) -> anyhow::Result<MazeConfig> {
        let file = match &self.config {
            Some(path) => MazeConfig::load(path)
                .with_context(|| format!("Cannot load config from {}", path.display()))?,
            None => MazeConfig::default(),
        };

        Ok(file.merge(MazeConfig {
            width: self.width,
            height: self.height,
            seed: self.seed.clone(),
            algorithm: self.algorithm.clone(),
        }))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose).context("Cannot install logger")?;

    let config = args.maze_config()?;
    let generated = mazecore::generate(&config)?;
    let maze = &generated.maze;

    let solver = match (args.start, args.goal) {
        (Some(start), Some(goal)) => Some(maze.generate_solution(start, goal)?),
        (None, None) => None,
        _ => bail!("--start and --goal must be given together"),
    };

    if let Some(solver) = solver.as_ref().filter(|s| s.is_empty()) {
        log::warn!("{} is not reachable from {}", solver.goal(), solver.start());
    }

    match args.format {
        Format::Text => {
            println!("{maze}");
            if let Some(solver) = solver.as_ref().filter(|s| !s.is_empty()) {
                println!();
                println!("{solver}");
            }
        }
        Format::Json => {
            let output = serde_json::json!({
                "seed": generated.seed,
                "algorithm": generated.algorithm,
                "maze": maze.to_json(),
                "solution": solver.as_ref().map(Solver::to_json),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
