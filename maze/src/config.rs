use clap::{Args, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How start and end are chosen on a freshly carved grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    /// Start on the top or left border, end on the opposite one
    #[default]
    OppositeEdges,
    /// Random start, end in the opposite quadrant and far enough away
    RandomFar,
    /// Sample a few pairs and keep the one with the longest solution
    MaximumDistance,
}

/// Parameters of the enhancement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    /// Extension length used when early dead ends are not prioritized
    pub min_dead_end_length: usize,
    /// How many near-solution dead ends to extend
    pub dead_ends_to_extend: usize,
    /// How many decoy branches to carve off the solution
    pub decoy_paths: usize,
    /// Extend dead ends early on the solution more than late ones
    pub prioritize_early_dead_ends: bool,
}

impl EnhancementConfig {
    /// A config that leaves the maze untouched
    pub const DISABLED: EnhancementConfig = EnhancementConfig {
        min_dead_end_length: 3,
        dead_ends_to_extend: 0,
        decoy_paths: 0,
        prioritize_early_dead_ends: true,
    };

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.dead_ends_to_extend > 0 || self.decoy_paths > 0
    }
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Weights of the candidate selection score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub tortuosity: f64,
    pub dead_end: f64,
    pub decoy: f64,
    /// Weight of the solution length over the grid perimeter
    pub length: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Difficulty::default().generation().weights
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub placement: PlacementStrategy,
    pub enhancement: EnhancementConfig,
    pub weights: ScoringWeights,
    /// Candidates generated per request, the best scoring one is kept
    pub attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Difficulty::default().generation()
    }
}

/// Difficulty tiers offered to players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Grid size as `[width, height]`
    #[must_use]
    pub const fn size(self) -> [usize; 2] {
        match self {
            Difficulty::Easy => [10, 10],
            Difficulty::Medium => [15, 15],
            Difficulty::Hard => [20, 20],
        }
    }

    #[must_use]
    pub const fn generation(self) -> GenerationConfig {
        match self {
            Difficulty::Easy => GenerationConfig {
                placement: PlacementStrategy::OppositeEdges,
                enhancement: EnhancementConfig::DISABLED,
                weights: ScoringWeights {
                    tortuosity: 1.0,
                    dead_end: 0.5,
                    decoy: 0.3,
                    length: 0.5,
                },
                attempts: 3,
            },
            Difficulty::Medium => GenerationConfig {
                placement: PlacementStrategy::RandomFar,
                enhancement: EnhancementConfig::DISABLED,
                weights: ScoringWeights {
                    tortuosity: 1.5,
                    dead_end: 1.0,
                    decoy: 0.7,
                    length: 0.8,
                },
                attempts: 5,
            },
            Difficulty::Hard => GenerationConfig {
                placement: PlacementStrategy::RandomFar,
                enhancement: EnhancementConfig::DISABLED,
                weights: ScoringWeights {
                    tortuosity: 2.0,
                    dead_end: 1.5,
                    decoy: 1.2,
                    length: 1.0,
                },
                attempts: 7,
            },
        }
    }

    #[must_use]
    pub const fn config(self) -> Config {
        let [width, height] = self.size();
        Config {
            seed: None,
            width,
            height,
            generation: self.generation(),
        }
    }
}

/// Config for a maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the maze, a random one is drawn if missing
    pub seed: Option<u64>,
    pub width: usize,
    pub height: usize,
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// A grid size no maze fits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a {width}x{height} grid cannot hold distinct start and end cells")]
    TooSmall { width: usize, height: usize },
}

impl Config {
    /// Check the grid can hold a maze: at least one row and column, and two cells
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Config { width, height, .. } = *self;
        if width == 0 || height == 0 || width * height < 2 {
            return Err(ConfigError::TooSmall { width, height });
        }
        Ok(())
    }
}

/// Partial scoring weights, read as a `[weights]` table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Args, Default, PartialEq)]
pub struct PartialWeights {
    /// Weight of the solution tortuosity
    #[clap(long = "tortuosity-weight")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tortuosity: Option<f64>,
    /// Weight of the mean dead end depth
    #[clap(long = "dead-end-weight")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_end: Option<f64>,
    /// Weight of the decoy count
    #[clap(long = "decoy-weight")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoy: Option<f64>,
    /// Weight of the solution length over the perimeter
    #[clap(long = "length-weight")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl PartialWeights {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(self, other: PartialWeights) -> Self {
        Self {
            tortuosity: other.tortuosity.or(self.tortuosity),
            dead_end: other.dead_end.or(self.dead_end),
            decoy: other.decoy.or(self.decoy),
            length: other.length.or(self.length),
        }
    }

    pub fn or_defaults(self, default: ScoringWeights) -> ScoringWeights {
        ScoringWeights {
            tortuosity: self.tortuosity.unwrap_or(default.tortuosity),
            dead_end: self.dead_end.unwrap_or(default.dead_end),
            decoy: self.decoy.unwrap_or(default.decoy),
            length: self.length.unwrap_or(default.length),
        }
    }
}

/// Partial config for a maze
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default, PartialEq)]
pub struct PartialConfig {
    /// Seed of the maze
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Preset the other values default to
    #[clap(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Grid width, in cells
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// Grid height, in cells
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    /// Endpoint placement strategy
    #[clap(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementStrategy>,
    /// Number of candidates to generate
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<usize>,
    /// Extension length when early dead ends are not prioritized
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dead_end_length: Option<usize>,
    /// Near-solution dead ends to extend
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_ends_to_extend: Option<usize>,
    /// Decoy branches to carve
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoy_paths: Option<usize>,
    /// Extend dead ends early on the solution more than late ones
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioritize_early_dead_ends: Option<bool>,
    /// Candidate scoring weights
    #[clap(flatten)]
    #[serde(default, skip_serializing_if = "PartialWeights::is_empty")]
    pub weights: PartialWeights,
}

impl PartialConfig {
    /// Combine two partial configs, values in `other` win
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            seed: other.seed.or(self.seed),
            difficulty: other.difficulty.or(self.difficulty),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            placement: other.placement.or(self.placement),
            attempts: other.attempts.or(self.attempts),
            min_dead_end_length: other.min_dead_end_length.or(self.min_dead_end_length),
            dead_ends_to_extend: other.dead_ends_to_extend.or(self.dead_ends_to_extend),
            decoy_paths: other.decoy_paths.or(self.decoy_paths),
            prioritize_early_dead_ends: other
                .prioritize_early_dead_ends
                .or(self.prioritize_early_dead_ends),
            weights: self.weights.merge(other.weights),
        }
    }

    /// Fill the missing values from the difficulty preset
    pub fn or_defaults(self) -> Config {
        let default = self.difficulty.unwrap_or_default().config();
        let GenerationConfig {
            placement,
            enhancement,
            weights,
            attempts,
        } = default.generation;
        Config {
            seed: self.seed.or(default.seed),
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            generation: GenerationConfig {
                placement: self.placement.unwrap_or(placement),
                enhancement: EnhancementConfig {
                    min_dead_end_length: self
                        .min_dead_end_length
                        .unwrap_or(enhancement.min_dead_end_length),
                    dead_ends_to_extend: self
                        .dead_ends_to_extend
                        .unwrap_or(enhancement.dead_ends_to_extend),
                    decoy_paths: self.decoy_paths.unwrap_or(enhancement.decoy_paths),
                    prioritize_early_dead_ends: self
                        .prioritize_early_dead_ends
                        .unwrap_or(enhancement.prioritize_early_dead_ends),
                },
                weights: self.weights.or_defaults(weights),
                attempts: self.attempts.unwrap_or(attempts),
            },
        }
    }
}
