use anyhow::Context;
use clap::Parser;
use crossfill::{render_grid, Crossword, FillConfig, FillFailure, Solver, Vocabulary};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Fill a crossword structure with words from a word list.
#[derive(Parser, Debug)]
#[command(name = "crossfill", version, about)]
struct Args {
    /// Structure file: `_` marks a fillable cell, anything else a block.
    structure: PathBuf,

    /// Word list, one word per line.
    words: PathBuf,

    /// Also write the filled grid to this file.
    output: Option<PathBuf>,

    /// Give up after visiting this many search states.
    #[arg(long)]
    max_states: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let crossword = Crossword::load(&args.structure)
        .with_context(|| format!("loading structure {}", args.structure.display()))?;
    let vocabulary = Vocabulary::load(&args.words)
        .with_context(|| format!("loading word list {}", args.words.display()))?;

    let config = FillConfig { max_states: args.max_states };
    let mut solver = Solver::with_config(&crossword, &vocabulary, config);

    match solver.solve() {
        Ok(result) => {
            info!("{:?}", result.statistics);

            let display_grid = render_grid(&crossword, &vocabulary, &result.assignment);
            println!("{}", display_grid);

            if let Some(output) = &args.output {
                fs::write(output, format!("{}\n", display_grid))
                    .with_context(|| format!("writing {}", output.display()))?;
                info!("written grid to {}", output.display());
            }
        }
        Err(FillFailure::NoSolution) => println!("No solution."),
        Err(FillFailure::StateLimitExceeded) => {
            println!("No solution found within {} states.", args.max_states.unwrap_or_default());
        }
    }

    Ok(())
}
