use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RunningMse {
    weight: f64,
    mse: f64,
    observed: usize,
}

impl RunningMse {
    pub fn new(expected: usize) -> Self {
        Self {
            weight: if expected > 0 { 1.0 / expected as f64 } else { 0.0 },
            mse: 0.0,
            observed: 0,
        }
    }

    pub fn observe(&mut self, truth: f32, prediction: f32) {
        let err = (truth - prediction) as f64;
        self.mse += self.weight * err * err;
        self.observed += 1;
    }

    pub fn mse(&self) -> f64 {
        self.mse
    }

    pub fn observed(&self) -> usize {
        self.observed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub records: usize,
    pub mse: f64,
    pub rmse: f64,
}

impl From<&RunningMse> for ErrorMetrics {
    fn from(acc: &RunningMse) -> Self {
        Self {
            records: acc.observed(),
            mse: acc.mse(),
            rmse: acc.mse().sqrt(),
        }
    }
}
