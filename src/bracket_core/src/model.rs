use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_ALPHA, ELO_SCALE, MARGIN_SCALE};
use crate::ratings::Ratings;
use crate::team::Team;
use crate::win_prob::{barthag_prob, elo_prob, margin_prob, seed_prob};

/// Model options as supplied in the request, echoed back verbatim as `used_model`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// `seed` (default), `rating` or `blend`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    /// `elo` (default), `barthag`/`pythag`/`pyth`, or anything else for a margin rating
    #[serde(rename = "ratingType", default, skip_serializing_if = "Option::is_none")]
    pub rating_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Weight on the rating probability when blending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,

    /// Keys we don't interpret, kept so the echo matches the request
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModelConfig {
    pub fn seed() -> Self {
        ModelConfig {
            model_type: Some("seed".to_string()),
            ..Default::default()
        }
    }

    pub fn rating(rating_type: &str, scale: Option<f64>) -> Self {
        ModelConfig {
            model_type: Some("rating".to_string()),
            rating_type: Some(rating_type.to_string()),
            scale,
            ..Default::default()
        }
    }

    pub fn blend(rating_type: &str, scale: Option<f64>, alpha: Option<f64>) -> Self {
        ModelConfig {
            model_type: Some("blend".to_string()),
            rating_type: Some(rating_type.to_string()),
            scale,
            alpha,
            ..Default::default()
        }
    }
}

/// How ratings turn into a win probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RatingModel {
    Elo { scale: f64 },
    /// Ratings are themselves win probabilities
    Barthag,
    /// Ratings are point-margin-like scalars
    Margin { scale: f64 },
}

impl RatingModel {
    pub fn from_config(config: &ModelConfig) -> Self {
        // Zero or missing scale means "use the default"
        let scale = config.scale.filter(|s| *s != 0.0);

        match normalized(&config.rating_type).unwrap_or_else(|| "elo".to_string()).as_str() {
            "elo" => RatingModel::Elo {
                scale: scale.unwrap_or(ELO_SCALE),
            },
            "barthag" | "pythag" | "pyth" => RatingModel::Barthag,
            _ => RatingModel::Margin {
                scale: scale.unwrap_or(MARGIN_SCALE),
            },
        }
    }

    /// Probability that a team rated `rating1` beats one rated `rating2`.
    pub fn prob(&self, rating1: f64, rating2: f64) -> f64 {
        match *self {
            RatingModel::Elo { scale } => elo_prob(rating1, rating2, scale),
            RatingModel::Barthag => barthag_prob(rating1, rating2),
            RatingModel::Margin { scale } => margin_prob(rating1, rating2, scale),
        }
    }
}

/// Strategy chosen once per request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WinModel {
    Seed,
    Rating(RatingModel),
    Blend { rating: RatingModel, alpha: f64 },
}

impl WinModel {
    /// Resolve the configured strategy. Unknown model types fall back to seeds.
    pub fn from_config(config: &ModelConfig) -> Self {
        match normalized(&config.model_type).as_deref() {
            Some("rating") => WinModel::Rating(RatingModel::from_config(config)),
            Some("blend") => WinModel::Blend {
                rating: RatingModel::from_config(config),
                alpha: config.alpha.unwrap_or(DEFAULT_ALPHA),
            },
            _ => WinModel::Seed,
        }
    }

    /// Probability that `team1` beats `team2`.
    ///
    /// Rating-based strategies fall back to seeds whenever either team is unrated.
    pub fn win_prob(&self, team1: &Team, team2: &Team, ratings: &Ratings) -> f64 {
        let by_seed = || seed_prob(team1.seed, team2.seed);
        let by_rating = |model: &RatingModel| {
            ratings
                .pair(&team1.name, &team2.name)
                .map(|(r1, r2)| model.prob(r1, r2))
        };

        match self {
            WinModel::Seed => by_seed(),
            WinModel::Rating(model) => by_rating(model).unwrap_or_else(by_seed),
            WinModel::Blend { rating, alpha } => match by_rating(rating) {
                Some(p) => alpha * p + (1.0 - alpha) * by_seed(),
                None => by_seed(),
            },
        }
    }
}

/// A resolved model together with the ratings it reads.
#[derive(Clone, Debug)]
pub struct Predictor {
    pub model: WinModel,
    pub ratings: Ratings,
}

impl Predictor {
    pub fn new(model: WinModel, ratings: Ratings) -> Self {
        Predictor { model, ratings }
    }

    pub fn from_config(config: &ModelConfig, ratings: Ratings) -> Self {
        let model = WinModel::from_config(config);
        tracing::debug!(?model, rated_teams = ratings.len(), "resolved win model");
        Predictor::new(model, ratings)
    }

    /// Probability that `team1` beats `team2`.
    pub fn win_prob(&self, team1: &Team, team2: &Team) -> f64 {
        self.model.win_prob(team1, team2, &self.ratings)
    }
}

/// Lowercased option value, with empty strings treated as unset.
fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}
