/// Historical first-round win rates for the better seed, keyed by (better, worse) seed
pub const SEED_MATCHUPS: [((u32, u32), f64); 8] = [
    ((1, 16), 0.99),
    ((2, 15), 0.94),
    ((3, 14), 0.86),
    ((4, 13), 0.79),
    ((5, 12), 0.64),
    ((6, 11), 0.62),
    ((7, 10), 0.60),
    ((8, 9), 0.52),
];

/// Better seed of each first-round game, in bracket order (1v16, 8v9, 5v12, ...)
pub const BRACKET_ORDER: [u32; 8] = [1, 8, 5, 4, 6, 3, 7, 2];

/// Better-seed win rate for any pairing missing from `SEED_MATCHUPS`
pub const DEFAULT_SEED_PROB: f64 = 0.55;

/// Default Elo spread (rating points per factor of ten in odds)
pub const ELO_SCALE: f64 = 400.0;

/// Default spread for efficiency-margin ratings
pub const MARGIN_SCALE: f64 = 1.0;

/// Default blend weight on the rating-based probability
pub const DEFAULT_ALPHA: f64 = 0.7;

/// Clamp applied to probability-valued ratings before taking log-odds
pub const RATING_PROB_EPS: f64 = 1e-6;

/// First-round games per region (16 teams)
pub const REGION_GAMES: usize = 8;

/// Regions required to play the national semifinals and final
pub const NATIONAL_REGIONS: usize = 4;

/// Decimal places kept in reported probabilities
pub const PROB_DECIMALS: i32 = 4;

/// Round a probability to `PROB_DECIMALS` places
pub fn round_prob(p: f64) -> f64 {
    let factor = 10f64.powi(PROB_DECIMALS);
    (p * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_first_round_pairings() {
        for ((lo, hi), prob) in SEED_MATCHUPS {
            assert_eq!(lo + hi, 17);
            assert!(lo < hi);
            assert!(prob > 0.5 && prob < 1.0);
        }
    }

    #[test]
    fn test_bracket_order_covers_top_seeds() {
        let mut seeds = BRACKET_ORDER.to_vec();
        seeds.sort();
        assert_eq!(seeds, (1..=8).collect::<Vec<u32>>());
    }

    #[test]
    fn test_round_prob() {
        assert_eq!(round_prob(0.909090909), 0.9091);
        assert_eq!(round_prob(0.5), 0.5);
        assert_eq!(round_prob(0.12344), 0.1234);
        assert_eq!(round_prob(1.0), 1.0);
    }
}
