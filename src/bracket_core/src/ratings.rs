use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::error::{BracketError, Result};

/// Team ratings keyed by team name.
///
/// What a rating means (Elo points, Barthag, efficiency margin) is decided by the model.
/// Teams without an entry are valid and make the rating models fall back to seeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ratings {
    ratings: HashMap<String, f64>,
}

impl Ratings {
    pub fn new() -> Self {
        Ratings {
            ratings: HashMap::new(),
        }
    }

    /// Build ratings from the raw request map.
    ///
    /// Numbers and numeric strings are accepted and `null` counts as absent.
    /// Anything else fails with the offending team's name. Teams are checked in name
    /// order, so the first bad entry alphabetically is the one reported.
    pub fn from_values(values: &BTreeMap<String, Value>) -> Result<Self> {
        let mut ratings = HashMap::with_capacity(values.len());

        for (team, value) in values {
            let rating = match value {
                Value::Null => continue,
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };

            match rating {
                Some(r) if r.is_finite() => {
                    ratings.insert(team.clone(), r);
                }
                _ => {
                    return Err(BracketError::NonNumericRating {
                        team: team.clone(),
                        value: value.to_string(),
                    })
                }
            }
        }

        Ok(Ratings { ratings })
    }

    /// Add or replace a team's rating.
    pub fn insert(&mut self, team: &str, rating: f64) {
        self.ratings.insert(team.to_string(), rating);
    }

    pub fn get(&self, team: &str) -> Option<f64> {
        self.ratings.get(team).copied()
    }

    /// Both ratings, or `None` if either team is unrated.
    pub fn pair(&self, team1: &str, team2: &str) -> Option<(f64, f64)> {
        Some((self.get(team1)?, self.get(team2)?))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(String, f64)> for Ratings {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Ratings {
            ratings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let ratings = Ratings::from_values(&values(json!({
            "Duke": 1650,
            "UNC": "1600.5",
            "Kansas": null,
        })))
        .unwrap();

        assert_eq!(ratings.get("Duke"), Some(1650.0));
        assert_eq!(ratings.get("UNC"), Some(1600.5));
        assert_eq!(ratings.get("Kansas"), None);
        assert_eq!(ratings.len(), 2);
    }

    #[test]
    fn test_non_numeric_names_team() {
        let err = Ratings::from_values(&values(json!({ "Gonzaga": "strong" }))).unwrap_err();
        match err {
            BracketError::NonNumericRating { team, .. } => assert_eq!(team, "Gonzaga"),
            other => panic!("unexpected error: {}", other),
        }

        assert!(Ratings::from_values(&values(json!({ "Gonzaga": [1] }))).is_err());
        assert!(Ratings::from_values(&values(json!({ "Gonzaga": true }))).is_err());
    }

    #[test]
    fn test_first_bad_team_reported() {
        let raw = values(json!({
            "Xavier": "tbd",
            "Baylor": 1550,
            "Arizona": {},
            "Creighton": "n/a",
        }));

        for _ in 0..10 {
            match Ratings::from_values(&raw) {
                Err(BracketError::NonNumericRating { team, value }) => {
                    assert_eq!(team, "Arizona");
                    assert_eq!(value, "{}");
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_pair_requires_both() {
        let mut ratings = Ratings::new();
        ratings.insert("A", 10.0);
        assert_eq!(ratings.pair("A", "B"), None);
        ratings.insert("B", 4.0);
        assert_eq!(ratings.pair("A", "B"), Some((10.0, 4.0)));
        assert_eq!(ratings.pair("B", "A"), Some((4.0, 10.0)));
    }
}
