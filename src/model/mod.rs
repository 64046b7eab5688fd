mod agent;
mod config;
mod grid;
mod network;
mod sim;
mod stats;
mod survey;
mod util;
mod validate;

pub use self::agent::{Agent, AgentId, Narrative, State};
pub use self::config::SimulationConfig;
pub use self::grid::{Grid, Patch};
pub use self::sim::Simulation;
pub use self::stats::{DetailedStats, Stats, TimeSeriesEntry};
pub use self::survey::{load_responses, RespondentRecord};
pub use self::validate::{validate, Validation};
