use crate::constants::{NATIONAL_REGIONS, REGION_GAMES};
use crate::error::{BracketError, Result};
use crate::team::{Game, Team};

/// One region's 16 teams in standard bracket order.
///
/// Adjacent slots (0-1, 2-3, ...) meet in the first round, and winners of
/// adjacent games meet in the next.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBracket {
    pub name: String,
    pub teams: Vec<Team>,
}

impl RegionBracket {
    /// Build a region from its first-round games in any order.
    ///
    /// Games are sorted by `Game::seeding_key`. The standard pairings come out in
    /// bracket order (1v16, 8v9, 5v12, 4v13, 6v11, 3v14, 7v10, 2v15).
    pub fn new(name: &str, games: &[&Game]) -> Result<Self> {
        if games.len() != REGION_GAMES {
            return Err(BracketError::IncompleteRegion {
                region: name.to_string(),
                games: games.len(),
                expected: REGION_GAMES,
            });
        }

        let mut ordered = games.to_vec();
        ordered.sort_by_key(|g| g.seeding_key());

        let teams = ordered
            .iter()
            .flat_map(|g| [g.team_a(), g.team_b()])
            .collect();

        Ok(RegionBracket {
            name: name.to_string(),
            teams,
        })
    }
}

/// The whole tournament: regions in order of first appearance in the request.
#[derive(Clone, Debug, PartialEq)]
pub struct Bracket {
    pub regions: Vec<RegionBracket>,
}

impl Bracket {
    /// Group first-round games by region and canonicalize each region.
    pub fn from_games(games: &[Game]) -> Result<Self> {
        let mut grouped: Vec<(&str, Vec<&Game>)> = Vec::new();

        for (index, game) in games.iter().enumerate() {
            let region = game
                .region
                .as_deref()
                .ok_or(BracketError::MissingRegion { index })?;

            match grouped.iter_mut().find(|(name, _)| *name == region) {
                Some((_, region_games)) => region_games.push(game),
                None => grouped.push((region, vec![game])),
            }
        }

        let regions = grouped
            .iter()
            .map(|(name, region_games)| RegionBracket::new(name, region_games))
            .collect::<Result<Vec<_>>>()?;

        Ok(Bracket { regions })
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    /// National semifinal pairings as indices into `regions`.
    ///
    /// The two alphabetically first regions meet in one semifinal and the last two
    /// in the other. Returns `None` unless there are exactly four regions.
    pub fn national_pairings(&self) -> Option<[(usize, usize); 2]> {
        if self.regions.len() != NATIONAL_REGIONS {
            return None;
        }

        let mut order: Vec<usize> = (0..self.regions.len()).collect();
        order.sort_by(|&a, &b| self.regions[a].name.cmp(&self.regions[b].name));

        Some([(order[0], order[1]), (order[2], order[3])])
    }
}
