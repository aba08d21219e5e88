use crate::algorithms::RatingModel;
use crate::error::Result;
use crate::models::{Prediction, TestRecord};
use crate::utils::validation::validate_record_ids;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub emitted: usize,
    /// First id that broke the `1, 2, 3, ...` sequence, if any.
    pub stopped_at: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchPredictor;

impl BatchPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn run<M, I, F>(&self, model: &M, records: I, mut emit: F) -> Result<BatchSummary>
    where
        M: RatingModel + ?Sized,
        I: IntoIterator<Item = Result<TestRecord>>,
        F: FnMut(Prediction) -> Result<()>,
    {
        let mut expected_id = 1u64;
        let mut stopped_at = None;

        for record in records {
            let record = record?;
            if record.id != expected_id {
                warn!(
                    "Test id sequence broke at {} (expected {}), stopping",
                    record.id, expected_id
                );
                stopped_at = Some(record.id);
                break;
            }

            validate_record_ids(model, record.user_id, record.item_id)?;
            emit(Prediction {
                id: record.id,
                rating: model.predict(record.user_id, record.item_id),
            })?;
            expected_id += 1;
        }

        let summary = BatchSummary {
            emitted: (expected_id - 1) as usize,
            stopped_at,
        };
        info!("Emitted {} predictions", summary.emitted);
        Ok(summary)
    }

    pub fn predict_all<M, I>(&self, model: &M, records: I) -> Result<Vec<Prediction>>
    where
        M: RatingModel + ?Sized,
        I: IntoIterator<Item = Result<TestRecord>>,
    {
        let mut predictions = Vec::new();
        self.run(model, records, |prediction| {
            predictions.push(prediction);
            Ok(())
        })?;
        Ok(predictions)
    }
}
