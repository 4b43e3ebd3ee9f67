use serde::{Deserialize, Serialize};

use crate::constants::BRACKET_ORDER;

/// A bracket entrant. Identity is by name within its region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    /// Seed within the region, 1 (best) through 16
    pub seed: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Team {
            name: name.into(),
            seed,
        }
    }
}

/// First-round game as it arrives in the request.
///
/// The A/B order fixes which side `pA` refers to; it has no bearing on who can win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Only required once the bracket is simulated
    #[serde(default)]
    pub region: Option<String>,
    pub team_a: String,
    pub team_b: String,
    pub seed_a: u32,
    pub seed_b: u32,
}

impl Game {
    pub fn new(region: &str, team_a: &str, seed_a: u32, team_b: &str, seed_b: u32) -> Self {
        Game {
            region: Some(region.to_string()),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            seed_a,
            seed_b,
        }
    }

    pub fn team_a(&self) -> Team {
        Team::new(self.team_a.clone(), self.seed_a)
    }

    pub fn team_b(&self) -> Team {
        Team::new(self.team_b.clone(), self.seed_b)
    }

    /// Sort key putting a region's games in standard order (1v16, 8v9, 5v12, ...).
    ///
    /// Games are placed by the better seed's bracket slot, then by (better, worse) seed.
    /// Pairings whose better seed is outside 1-8 sort after the standard slots.
    pub fn seeding_key(&self) -> (usize, u32, u32) {
        let better = self.seed_a.min(self.seed_b);
        let worse = self.seed_a.max(self.seed_b);
        let slot = BRACKET_ORDER
            .iter()
            .position(|&s| s == better)
            .unwrap_or(BRACKET_ORDER.len());
        (slot, better, worse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_wire_names() {
        let game: Game = serde_json::from_str(
            r#"{"region":"East","teamA":"Duke","teamB":"Vermont","seedA":1,"seedB":16}"#,
        )
        .unwrap();
        assert_eq!(game, Game::new("East", "Duke", 1, "Vermont", 16));
        assert_eq!(game.team_a(), Team::new("Duke", 1));
        assert_eq!(game.team_b(), Team::new("Vermont", 16));
    }

    #[test]
    fn test_region_optional() {
        let game: Game =
            serde_json::from_str(r#"{"teamA":"A","teamB":"B","seedA":8,"seedB":9}"#).unwrap();
        assert!(game.region.is_none());
    }

    #[test]
    fn test_missing_field_is_named() {
        let err = serde_json::from_str::<Game>(r#"{"teamA":"A","teamB":"B","seedA":8}"#)
            .unwrap_err();
        assert!(err.to_string().contains("seedB"), "got: {}", err);
    }

    #[test]
    fn test_seeding_key_unordered() {
        assert_eq!(Game::new("W", "X", 12, "Y", 5).seeding_key(), (2, 5, 12));
        assert_eq!(Game::new("W", "Y", 5, "X", 12).seeding_key(), (2, 5, 12));
        assert!(Game::new("W", "A", 8, "B", 9).seeding_key() < Game::new("W", "C", 2, "D", 15).seeding_key());
        assert_eq!(Game::new("W", "A", 9, "B", 10).seeding_key(), (8, 9, 10));
    }
}
