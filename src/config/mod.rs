use crate::algorithms::initializer::InitializationMethod;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingFormat {
    Text,
    Binary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub train_path: PathBuf,
    pub train_format: RatingFormat,
    pub dump_path: Option<PathBuf>,
    pub holdout_path: PathBuf,
    pub holdout_count: usize,
    pub test_ids_path: PathBuf,
    pub submission_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Svd,
    Baseline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorFiles {
    pub users: PathBuf,
    pub items: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub kind: ModelKind,
    pub n_users: usize,
    pub n_items: usize,
    pub capacity: usize,
    pub features: usize,
    pub initialization: InitializationMethod,
    /// Previously saved factor tables; overrides `initialization`.
    pub init_from: Option<FactorFiles>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub total_iterations: u64,
    pub learning_rate: f32,
    pub seed: u64,
    pub baseline_damping: f32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("data/learn.ssv"),
            train_format: RatingFormat::Text,
            dump_path: None,
            holdout_path: PathBuf::from("data/holdout.ssv"),
            holdout_count: 1_500_000,
            test_ids_path: PathBuf::from("data/test-ids.csv"),
            submission_path: PathBuf::from("submission-float.csv"),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::Svd,
            n_users: 500_000,
            n_items: 20_000,
            capacity: 100_000_000,
            features: 300,
            initialization: InitializationMethod::InverseSqrt,
            init_from: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total_iterations: 300_000_000,
            learning_rate: 0.1,
            seed: 1,
            baseline_damping: 2.0,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SVDREC").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
