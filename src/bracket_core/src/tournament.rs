use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::bracket::Bracket;
use crate::constants::round_prob;
use crate::error::Result;
use crate::model::{ModelConfig, Predictor};
use crate::ratings::Ratings;
use crate::simulate::play_tournament;
use crate::tally::{Advancement, Tally};
use crate::team::Game;

/// Simulation request: first-round games, optional ratings and model, trial count.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub sims: u64,

    #[serde(default)]
    pub round1: Vec<Game>,

    /// Raw ratings by team name. Numeric strings are accepted and `null` means unrated.
    #[serde(default)]
    pub ratings: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub model: Option<ModelConfig>,

    /// Fixed seed for reproducible output. Seeded from OS entropy when absent.
    #[serde(default)]
    pub rng_seed: Option<i64>,
}

impl SimulationRequest {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Deterministic first-round probability for one input game.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round1Prob {
    pub region: Option<String>,
    pub team_a: String,
    pub seed_a: u32,
    pub team_b: String,
    pub seed_b: u32,
    pub p_a: f64,
    pub p_b: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub round1_probs: Vec<Round1Prob>,
    pub champion_probs: BTreeMap<String, f64>,
    pub advancement: BTreeMap<String, Advancement>,
    pub sims: u64,
    pub used_model: ModelConfig,
}

impl SimulationResult {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Execution options that aren't part of the request payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimOptions {
    /// Run trials on the rayon pool, each with its own seeded stream
    pub parallel: bool,
}

/// First-round win probabilities in input order.
pub fn round1_probs(games: &[Game], predictor: &Predictor) -> Vec<Round1Prob> {
    games
        .iter()
        .map(|game| {
            let p_a = predictor.win_prob(&game.team_a(), &game.team_b());
            Round1Prob {
                region: game.region.clone(),
                team_a: game.team_a.clone(),
                seed_a: game.seed_a,
                team_b: game.team_b.clone(),
                seed_b: game.seed_b,
                p_a: round_prob(p_a),
                p_b: round_prob(1.0 - p_a),
            }
        })
        .collect()
}

/// Run `sims` trials sharing one random stream.
pub fn run_trials<R: Rng>(
    bracket: &Bracket,
    predictor: &Predictor,
    sims: u64,
    rng: &mut R,
) -> Tally {
    let mut tally = Tally::new();
    for _ in 0..sims {
        play_tournament(bracket, predictor, rng, &mut tally);
    }
    tally
}

/// Run `sims` trials in parallel.
///
/// One ChaCha key is drawn from `rng` and trial `i` plays on stream `i` of that key.
/// Streams never overlap, and a fixed master seed reproduces the same counts no
/// matter how rayon schedules the work.
pub fn run_trials_parallel<R: Rng>(
    bracket: &Bracket,
    predictor: &Predictor,
    sims: u64,
    rng: &mut R,
) -> Tally {
    let key: <ChaCha8Rng as SeedableRng>::Seed = rng.gen();

    (0..sims)
        .into_par_iter()
        .fold(Tally::new, |mut tally, stream| {
            let mut trial_rng = ChaCha8Rng::from_seed(key);
            trial_rng.set_stream(stream);
            play_tournament(bracket, predictor, &mut trial_rng, &mut tally);
            tally
        })
        .reduce(Tally::new, Tally::merge)
}

/// Evaluate a request: first-round probabilities plus, when `sims > 0`, Monte Carlo
/// advancement and championship frequencies.
pub fn simulate(request: &SimulationRequest, options: &SimOptions) -> Result<SimulationResult> {
    let ratings = match &request.ratings {
        Some(values) => Ratings::from_values(values)?,
        None => Ratings::new(),
    };
    let model = request.model.clone().unwrap_or_default();
    let predictor = Predictor::from_config(&model, ratings);

    let round1 = round1_probs(&request.round1, &predictor);

    let tally = if request.sims > 0 {
        let bracket = Bracket::from_games(&request.round1)?;
        if bracket.national_pairings().is_none() {
            tracing::warn!(
                regions = bracket.regions.len(),
                "national stage needs exactly 4 regions, reporting regional advancement only"
            );
        }

        let mut rng = match request.rng_seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            sims = request.sims,
            regions = ?bracket.region_names(),
            parallel = options.parallel,
            seeded = request.rng_seed.is_some(),
            "simulating bracket"
        );

        if options.parallel {
            run_trials_parallel(&bracket, &predictor, request.sims, &mut rng)
        } else {
            run_trials(&bracket, &predictor, request.sims, &mut rng)
        }
    } else {
        Tally::new()
    };

    let (champion_probs, advancement) = tally.normalize(request.sims);

    Ok(SimulationResult {
        round1_probs: round1,
        champion_probs,
        advancement,
        sims: request.sims,
        used_model: model,
    })
}

/// Parse a JSON request, simulate it, and serialize the result.
pub fn simulate_json(payload: &str, options: &SimOptions) -> Result<String> {
    let request = SimulationRequest::from_json(payload)?;
    simulate(&request, options)?.to_json(false)
}
