use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    gameboard::{
        algorithms::{Algorithm, GenerationError, Generator},
        Maze,
    },
    rng::{Seed, XorShift32},
};

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "An object with the following parameters is required to generate a maze:\n\
         {{ height, width, seed (optional), algorithm (optional) }}"
    )]
    MissingDimensions,
    #[error("Width and height must be greater than 0")]
    ZeroDimension,
    #[error("Height and width must be a maximum of 3000")]
    TooLarge,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parameters of a single generation.
///
/// ```toml
/// width = 20
/// height = 10
/// seed = "testseed"
/// algorithm = "huntAndKill"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<Seed>,
    pub algorithm: Option<String>,
}

impl MazeConfig {
    pub fn new(width: usize, height: usize) -> Self {
        MazeConfig {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading maze config from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fields set on `other` take precedence.
    pub fn merge(self, other: MazeConfig) -> Self {
        MazeConfig {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            seed: other.seed.or(self.seed),
            algorithm: other.algorithm.or(self.algorithm),
        }
    }

    /// Checks the dimensions and resolves the algorithm name.
    pub fn validate(&self) -> Result<(usize, usize, Algorithm), ConfigError> {
        let (Some(width), Some(height)) = (self.width, self.height) else {
            return Err(ConfigError::MissingDimensions);
        };

        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge);
        }

        let algorithm = match &self.algorithm {
            Some(name) => name.parse()?,
            None => Algorithm::default(),
        };

        Ok((width, height, algorithm))
    }
}

/// Maze together with what produced it, so it can be generated again.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub maze: Maze,
    pub seed: Seed,
    pub algorithm: Algorithm,
}

/// Validates the config and generates its maze, picking a random seed when
/// none is given.
pub fn generate(config: &MazeConfig) -> Result<GeneratedMaze, ConfigError> {
    let (width, height, algorithm) = config.validate()?;

    let seed = match &config.seed {
        Some(seed) => seed.clone(),
        None => {
            let seed = Seed::random();
            log::info!("No seed given, using {seed}");
            seed
        }
    };

    let mut rng = XorShift32::new(&seed);
    let maze = Generator::new(width, height).generate_with(algorithm, &mut rng)?;

    Ok(GeneratedMaze {
        maze,
        seed,
        algorithm,
    })
}
