use crate::algorithms::a_star::AStar;
use crate::algorithms::common::PathSearch;
use crate::algorithms::library_a_star::LibraryAStar;
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Built-in A* with deterministic tie-breaking
    AStar,
    /// A* from the `pathfinding` crate
    LibraryAStar,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Algorithm::AStar)]
    pub algorithm: Algorithm,

    /// Node expansions before a path search gives up (0 = unbounded)
    #[arg(long, default_value_t = 200_000)]
    pub max_nodes: usize,

    /// Random obstacles to place before the session starts
    #[arg(long, default_value_t = 0)]
    pub random_obstacles: usize,

    /// Random obstacles are anchored within this distance of the origin on each axis
    #[arg(long, default_value_t = 10)]
    pub spread: i32,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter passed to env_logger, e.g. "debug" or "safe_path=trace"
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn search_budget(&self) -> Option<usize> {
        (self.max_nodes > 0).then_some(self.max_nodes)
    }

    pub fn build_engine(&self) -> Box<dyn PathSearch> {
        match (self.algorithm, self.search_budget()) {
            (Algorithm::AStar, Some(limit)) => Box::new(AStar::with_max_expansions(limit)),
            (Algorithm::AStar, None) => Box::new(AStar::new()),
            (Algorithm::LibraryAStar, Some(limit)) => {
                Box::new(LibraryAStar::with_max_expansions(limit))
            }
            (Algorithm::LibraryAStar, None) => Box::new(LibraryAStar::new()),
        }
    }
}
