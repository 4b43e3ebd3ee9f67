//! Bracket Core - Monte Carlo advancement odds for a 64-team, four-region bracket.
//!
//! Win probabilities come from historical seed matchups, team ratings (Elo,
//! Barthag or efficiency margin), or a blend of the two. First-round odds are
//! computed exactly; later rounds are estimated by simulating the whole bracket.
//!
//! Python bindings are available behind the `python` feature.

pub mod bracket;
pub mod constants;
pub mod error;
pub mod model;
pub mod ratings;
pub mod simulate;
pub mod tally;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use bracket::{Bracket, RegionBracket};
pub use error::{BracketError, Result};
pub use model::{ModelConfig, Predictor, RatingModel, WinModel};
pub use ratings::Ratings;
pub use tally::{Advancement, Stage, Tally};
pub use team::{Game, Team};
pub use tournament::{simulate, simulate_json, SimOptions, SimulationRequest, SimulationResult};
pub use win_prob::{logistic, seed_prob};
