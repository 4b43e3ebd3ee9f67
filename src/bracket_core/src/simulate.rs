use rand::Rng;

use crate::bracket::{Bracket, RegionBracket};
use crate::model::Predictor;
use crate::tally::{Stage, Tally};
use crate::team::Team;

/// Monte Carlo game simulation.
///
/// Draws one uniform value in [0, 1). `team1` wins if the draw is strictly below
/// its win probability, otherwise `team2` wins.
pub fn play_game<'t, R: Rng>(
    team1: &'t Team,
    team2: &'t Team,
    predictor: &Predictor,
    rng: &mut R,
) -> &'t Team {
    let prob = predictor.win_prob(team1, team2);
    if rng.gen::<f64>() < prob {
        team1
    } else {
        team2
    }
}

/// Play adjacent pairs (0-1, 2-3, ...) and return the winners in order.
pub fn play_round<'t, R: Rng>(
    field: &[&'t Team],
    predictor: &Predictor,
    rng: &mut R,
) -> Vec<&'t Team> {
    field
        .chunks_exact(2)
        .map(|pair| play_game(pair[0], pair[1], predictor, rng))
        .collect()
}

/// Play one region down to its champion.
///
/// Each round's winners are credited with the next stage: `r32`, `s16`, `e8`,
/// then `ff` for the region champion.
pub fn play_region<'b, R: Rng>(
    region: &'b RegionBracket,
    predictor: &Predictor,
    rng: &mut R,
    tally: &mut Tally,
) -> &'b Team {
    let mut field: Vec<&Team> = region.teams.iter().collect();

    for stage in Stage::REGION {
        field = play_round(&field, predictor, rng);
        for team in &field {
            tally.record(&team.name, stage);
        }
    }

    debug_assert_eq!(field.len(), 1);
    field[0]
}

/// Simulate the full tournament once, recording every stage reached into `tally`.
///
/// The national semifinals and final are only played when the bracket has
/// exactly four regions. Returns the champion if one was decided.
pub fn play_tournament<'b, R: Rng>(
    bracket: &'b Bracket,
    predictor: &Predictor,
    rng: &mut R,
    tally: &mut Tally,
) -> Option<&'b Team> {
    let winners: Vec<&Team> = bracket
        .regions
        .iter()
        .map(|region| play_region(region, predictor, rng, tally))
        .collect();

    let [(a, b), (c, d)] = bracket.national_pairings()?;
    let finalist1 = play_game(winners[a], winners[b], predictor, rng);
    let finalist2 = play_game(winners[c], winners[d], predictor, rng);
    let champion = play_game(finalist1, finalist2, predictor, rng);

    tally.record(&champion.name, Stage::Champion);
    Some(champion)
}
