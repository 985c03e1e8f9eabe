//! Level catalog
//!
//! The run is a fixed, ordered list of levels. Each entry is immutable data;
//! difficulty comes from distance, ring size, target motion and wind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected level table
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed level table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level table is empty")]
    Empty,
    #[error("level {index} ({name}) has no arrows")]
    NoArrows { index: usize, name: String },
    #[error("level {index} ({name}) has a non-finite target distance {distance}")]
    BadDistance {
        index: usize,
        name: String,
        distance: f32,
    },
    #[error("level {index} ({name}) needs a finite positive target radius, got {radius}")]
    BadRadius {
        index: usize,
        name: String,
        radius: f32,
    },
    #[error("level {index} ({name}) needs a finite non-negative wind ceiling, got {wind_max}")]
    BadWind {
        index: usize,
        name: String,
        wind_max: f32,
    },
    #[error("level {index} ({name}) has non-finite motion parameters")]
    BadMotion { index: usize, name: String },
}

/// Vertical oscillation of a moving target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Peak vertical offset (pixels)
    pub amplitude: f32,
    /// Angular speed multiplier
    pub speed: f32,
}

/// One level of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Arrows granted per attempt
    pub arrows: u32,
    /// Horizontal distance of the target center from the field origin
    pub target_distance: f32,
    pub target_radius: f32,
    /// Cumulative run score needed to pass
    pub min_score_to_advance: u32,
    /// Present only on moving levels
    #[serde(default)]
    pub motion: Option<Motion>,
    /// Wind magnitude ceiling (0 = calm)
    #[serde(default)]
    pub wind_max: f32,
}

impl LevelConfig {
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }
}

/// Ordered level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelConfig>", into = "Vec<LevelConfig>")]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl LevelCatalog {
    /// Build a catalog, rejecting entries that would break the simulation
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            if level.arrows == 0 {
                return Err(CatalogError::NoArrows {
                    index,
                    name: level.name.clone(),
                });
            }
            if !level.target_distance.is_finite() {
                return Err(CatalogError::BadDistance {
                    index,
                    name: level.name.clone(),
                    distance: level.target_distance,
                });
            }
            if !level.target_radius.is_finite() || level.target_radius <= 0.0 {
                return Err(CatalogError::BadRadius {
                    index,
                    name: level.name.clone(),
                    radius: level.target_radius,
                });
            }
            if !level.wind_max.is_finite() || level.wind_max < 0.0 {
                return Err(CatalogError::BadWind {
                    index,
                    name: level.name.clone(),
                    wind_max: level.wind_max,
                });
            }
            let finite_motion = |m: Motion| m.amplitude.is_finite() && m.speed.is_finite();
            if !level.motion.is_none_or(finite_motion) {
                return Err(CatalogError::BadMotion {
                    index,
                    name: level.name.clone(),
                });
            }
        }
        Ok(Self { levels })
    }

    /// Parse and validate a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of levels (always at least 1)
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    /// Level at `index`, falling back to the last level past the end
    pub fn level(&self, index: usize) -> &LevelConfig {
        let last = self.levels.len() - 1;
        &self.levels[index.min(last)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl TryFrom<Vec<LevelConfig>> for LevelCatalog {
    type Error = CatalogError;

    fn try_from(levels: Vec<LevelConfig>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelCatalog> for Vec<LevelConfig> {
    fn from(catalog: LevelCatalog) -> Self {
        catalog.levels
    }
}

fn level(
    name: &str,
    arrows: u32,
    target_distance: f32,
    target_radius: f32,
    min_score_to_advance: u32,
    motion: Option<(f32, f32)>,
    wind_max: f32,
) -> LevelConfig {
    LevelConfig {
        name: name.to_string(),
        arrows,
        target_distance,
        target_radius,
        min_score_to_advance,
        motion: motion.map(|(amplitude, speed)| Motion { amplitude, speed }),
        wind_max,
    }
}

impl Default for LevelCatalog {
    /// The six-level trial
    fn default() -> Self {
        Self {
            levels: vec![
                level("Training Grounds", 10, 520.0, 70.0, 80, None, 0.0),
                level("Light Breeze", 10, 560.0, 65.0, 140, None, 1.2),
                level("Shifting Gusts", 10, 600.0, 60.0, 220, Some((40.0, 1.2)), 2.5),
                level("Mountain Draft", 9, 640.0, 56.0, 310, Some((70.0, 1.5)), 3.4),
                level("Storm Front", 9, 680.0, 52.0, 420, Some((95.0, 1.8)), 4.2),
                level("Final Trial", 8, 720.0, 48.0, 560, Some((120.0, 2.3)), 5.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = LevelCatalog::default();
        assert_eq!(catalog.len(), 6);
        let revalidated = LevelCatalog::new(catalog.iter().cloned().collect());
        assert!(revalidated.is_ok());

        let first = catalog.level(0);
        assert_eq!(first.name, "Training Grounds");
        assert_eq!(first.arrows, 10);
        assert_eq!(first.min_score_to_advance, 80);
        assert!(!first.is_moving());
        assert_eq!(first.wind_max, 0.0);

        let last = catalog.level(5);
        assert_eq!(last.arrows, 8);
        assert_eq!(last.motion, Some(Motion { amplitude: 120.0, speed: 2.3 }));
    }

    #[test]
    fn test_difficulty_increases() {
        let catalog = LevelCatalog::default();
        let levels: Vec<_> = catalog.iter().collect();
        for pair in levels.windows(2) {
            assert!(pair[1].target_distance > pair[0].target_distance);
            assert!(pair[1].target_radius < pair[0].target_radius);
            assert!(pair[1].min_score_to_advance > pair[0].min_score_to_advance);
            assert!(pair[1].wind_max >= pair[0].wind_max);
        }
    }

    #[test]
    fn test_level_lookup_clamps() {
        let catalog = LevelCatalog::default();
        assert!(catalog.get(6).is_none());
        assert_eq!(catalog.level(99).name, "Final Trial");
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(matches!(LevelCatalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            LevelCatalog::new(vec![level("Empty Quiver", 0, 500.0, 60.0, 10, None, 0.0)]),
            Err(CatalogError::NoArrows { index: 0, .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![
                level("Ok", 3, 500.0, 60.0, 10, None, 0.0),
                level("Dot", 3, 500.0, 0.0, 10, None, 0.0),
            ]),
            Err(CatalogError::BadRadius { index: 1, .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![level("Suck", 3, 500.0, 60.0, 10, None, -1.0)]),
            Err(CatalogError::BadWind { .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![level("Gale", 3, 500.0, 60.0, 10, None, f32::INFINITY)]),
            Err(CatalogError::BadWind { index: 0, .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![level("Horizon", 3, f32::INFINITY, 60.0, 10, None, 0.0)]),
            Err(CatalogError::BadDistance { index: 0, .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![level("Wall", 3, 500.0, f32::INFINITY, 10, None, 0.0)]),
            Err(CatalogError::BadRadius { index: 0, .. })
        ));
        assert!(matches!(
            LevelCatalog::new(vec![level("Blur", 3, 500.0, 60.0, 10, Some((f32::INFINITY, 1.0)), 0.0)]),
            Err(CatalogError::BadMotion { index: 0, .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "name": "Calm", "arrows": 3, "target_distance": 500, "target_radius": 60,
              "min_score_to_advance": 20 },
            { "name": "Bobbing", "arrows": 2, "target_distance": 600, "target_radius": 40,
              "min_score_to_advance": 50, "motion": { "amplitude": 30, "speed": 1.0 },
              "wind_max": 2.0 }
        ]"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.level(0).wind_max, 0.0);
        assert!(catalog.level(1).is_moving());

        assert!(matches!(LevelCatalog::from_json("[{"), Err(CatalogError::Json(_))));

        // 1e39 overflows f32 to infinity
        let gale = r#"[{ "name": "Gale", "arrows": 3, "target_distance": 500, "target_radius": 60,
            "min_score_to_advance": 20, "wind_max": 1e39 }]"#;
        assert!(matches!(LevelCatalog::from_json(gale), Err(CatalogError::Json(_))));
    }
}
