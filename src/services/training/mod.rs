use crate::algorithms::optimizer::sgd_step;
use crate::algorithms::FactorTable;
use crate::config::TrainingConfig;
use crate::error::Result;
use crate::store::RatingStore;
use crate::utils::validation::validate_training_inputs;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Step budget for feature `feature`: `ceil(total / sqrt(feature + 1))`.
pub fn iterations_for_feature(total_iterations: u64, feature: usize) -> u64 {
    (total_iterations as f64 / ((feature + 1) as f64).sqrt()).ceil() as u64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStats {
    pub feature: usize,
    pub iterations: u64,
    pub mean_abs_step_error: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub features: Vec<FeatureStats>,
    pub total_steps: u64,
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone)]
pub struct Trainer {
    features: usize,
    total_iterations: u64,
    learning_rate: f32,
}

impl Trainer {
    pub fn new(features: usize, total_iterations: u64, learning_rate: f32) -> Self {
        Self {
            features,
            total_iterations,
            learning_rate,
        }
    }

    pub fn from_config(config: &TrainingConfig, features: usize) -> Self {
        Self::new(features, config.total_iterations, config.learning_rate)
    }

    pub fn iterations(&self, feature: usize) -> u64 {
        iterations_for_feature(self.total_iterations, feature)
    }

    pub fn planned_steps(&self) -> u64 {
        (0..self.features).map(|t| self.iterations(t)).sum()
    }

    pub fn train<R: Rng + ?Sized>(
        &self,
        store: &RatingStore,
        users: &mut FactorTable,
        items: &mut FactorTable,
        rng: &mut R,
    ) -> Result<TrainingReport> {
        validate_training_inputs(store, users, items, self.features, self.learning_rate)?;

        info!(
            "Start training: {} ratings, {} features, {} planned steps, learning rate {}",
            store.count(),
            self.features,
            self.planned_steps(),
            self.learning_rate
        );

        let started = Instant::now();
        let mut stats = Vec::with_capacity(self.features);
        let mut total_steps = 0u64;

        for feature in 0..self.features {
            let iterations = self.iterations(feature);
            debug!("Feature {}: {} iterations", feature, iterations);

            let mut abs_error = 0.0f64;
            for _ in 0..iterations {
                let sample = store.sample_random(rng);
                let err = sgd_step(users, items, &sample, feature, self.learning_rate);
                abs_error += err.abs() as f64;
            }
            total_steps += iterations;

            let mean_abs_step_error = if iterations > 0 {
                abs_error / iterations as f64
            } else {
                0.0
            };
            info!(
                "Finished feature {} ({} steps, mean |step error| {:.6})",
                feature, iterations, mean_abs_step_error
            );
            stats.push(FeatureStats {
                feature,
                iterations,
                mean_abs_step_error,
            });
        }

        let elapsed_secs = started.elapsed().as_secs_f64();
        info!("Training finished, time elapsed: {:.1}s", elapsed_secs);

        Ok(TrainingReport {
            features: stats,
            total_steps,
            elapsed_secs,
        })
    }
}
