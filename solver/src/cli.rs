use std::path::PathBuf;

use clap::Parser;
use lemin::SolverConfig;

const APP_NAME: &str = "lem-in";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Moves every ant of a colony from ##start to ##end in as few turns as possible", long_about = None)]
pub struct Args {
    /// The map file describing the colony
    pub map_file: PathBuf,

    /// Print only the turns, without echoing the map first
    #[arg(long)]
    pub no_echo: bool,

    /// Color moves which reach the end room
    #[arg(long)]
    pub highlight: bool,

    /// Give up once more than this many paths connect start and end
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Ignore paths visiting more rooms than this, start and end included
    #[arg(long)]
    pub max_path_rooms: Option<usize>,

    /// Give up once more than this many disjoint path groups exist
    #[arg(long)]
    pub max_groups: Option<usize>,
}

impl Args {
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_paths: self.max_paths,
            max_path_rooms: self.max_path_rooms,
            max_groups: self.max_groups,
        }
    }
}
