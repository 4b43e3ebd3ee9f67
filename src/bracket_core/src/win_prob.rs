use crate::constants::{DEFAULT_SEED_PROB, RATING_PROB_EPS, SEED_MATCHUPS};

/// Probability that a team seeded `seed1` beats a team seeded `seed2`.
///
/// Uses the historical first-round rates in `SEED_MATCHUPS`. Any other pairing
/// gives the better seed `DEFAULT_SEED_PROB`. Equal seeds are a coin flip.
///
/// # Arguments
/// * `seed1` - Seed of the team whose win probability is returned (1-16)
/// * `seed2` - Opponent's seed (1-16)
pub fn seed_prob(seed1: u32, seed2: u32) -> f64 {
    if seed1 == seed2 {
        return 0.5;
    }

    let key = (seed1.min(seed2), seed1.max(seed2));
    let base = SEED_MATCHUPS
        .iter()
        .find(|(pair, _)| *pair == key)
        .map(|&(_, prob)| prob)
        .unwrap_or(DEFAULT_SEED_PROB);

    if seed1 < seed2 {
        base
    } else {
        1.0 - base
    }
}

/// Logistic function, branched on sign so `exp` never overflows.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Elo expectation: base-10 logistic of the rating difference over `scale`.
pub fn elo_prob(rating1: f64, rating2: f64, scale: f64) -> f64 {
    let diff = rating1 - rating2;
    1.0 / (1.0 + 10f64.powf(-diff / scale))
}

/// Win probability from probability-valued ratings (Barthag / Pythagorean).
///
/// Each rating is clamped into (0, 1) and mapped to log-odds. The result is the
/// logistic of the log-odds difference.
pub fn barthag_prob(rating1: f64, rating2: f64) -> f64 {
    logistic(log_odds(rating1) - log_odds(rating2))
}

/// Win probability from efficiency-margin ratings (AdjEM and similar).
pub fn margin_prob(rating1: f64, rating2: f64, scale: f64) -> f64 {
    logistic((rating1 - rating2) / scale)
}

fn log_odds(p: f64) -> f64 {
    let p = p.clamp(RATING_PROB_EPS, 1.0 - RATING_PROB_EPS);
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_values() {
        assert_eq!(seed_prob(1, 16), 0.99);
        assert_eq!(seed_prob(8, 9), 0.52);
        assert_eq!(seed_prob(5, 12), 0.64);
        assert!((seed_prob(16, 1) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_later_round_default() {
        assert_eq!(seed_prob(1, 8), DEFAULT_SEED_PROB);
        assert!((seed_prob(8, 1) - 0.45).abs() < 1e-12);
        assert_eq!(seed_prob(3, 2), 1.0 - DEFAULT_SEED_PROB);
    }

    #[test]
    fn test_equal_seeds_50_50() {
        for s in 1..=16 {
            assert_eq!(seed_prob(s, s), 0.5);
        }
    }

    #[test]
    fn test_elo() {
        assert_eq!(elo_prob(1500.0, 1500.0, 400.0), 0.5);
        assert!((elo_prob(1900.0, 1500.0, 400.0) - 10.0 / 11.0).abs() < 1e-12);
        assert!((elo_prob(1500.0, 1900.0, 400.0) - 1.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_extremes() {
        assert_eq!(logistic(0.0), 0.5);
        assert_eq!(logistic(1000.0), 1.0);
        assert_eq!(logistic(-1000.0), 0.0);
        assert!(logistic(-1000.0).is_finite());
        assert!((logistic(2.0) + logistic(-2.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_barthag() {
        assert!((barthag_prob(0.9, 0.9) - 0.5).abs() < 1e-12);
        // Log-odds 9 vs 1 gives odds ratio 9
        assert!((barthag_prob(0.9, 0.5) - 0.9).abs() < 1e-12);

        // Degenerate ratings are clamped rather than producing NaN
        let p = barthag_prob(1.0, 0.0);
        assert!(p.is_finite() && p > 0.999 && p <= 1.0);
    }

    #[test]
    fn test_margin() {
        assert_eq!(margin_prob(20.0, 20.0, 25.0), 0.5);
        assert!((margin_prob(25.0, 0.0, 25.0) - logistic(1.0)).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn prop_seed_prob_symmetric(a in 1u32..=16, b in 1u32..=16) {
            prop_assert!((seed_prob(a, b) + seed_prob(b, a) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn prop_better_seed_favored(a in 1u32..=16, b in 1u32..=16) {
            prop_assume!(a < b);
            prop_assert!(seed_prob(a, b) > 0.5);
        }

        #[test]
        fn prop_rating_probs_bounded(r1 in -2000.0f64..2000.0, r2 in -2000.0f64..2000.0) {
            for p in [elo_prob(r1, r2, 400.0), margin_prob(r1, r2, 25.0), barthag_prob(r1 / 2000.0, r2 / 2000.0)] {
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }

        #[test]
        fn prop_elo_symmetric(r1 in 1000.0f64..2000.0, r2 in 1000.0f64..2000.0) {
            prop_assert!((elo_prob(r1, r2, 400.0) + elo_prob(r2, r1, 400.0) - 1.0).abs() < 1e-12);
        }
    }
}
