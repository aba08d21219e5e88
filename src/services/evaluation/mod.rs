use crate::algorithms::RatingModel;
use crate::error::{Result, SvdError};
use crate::models::HoldoutRecord;
use crate::utils::metrics::{ErrorMetrics, RunningMse};
use crate::utils::validation::validate_record_ids;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Evaluator {
    expected: usize,
}

impl Evaluator {
    pub fn new(expected: usize) -> Self {
        Self { expected }
    }

    pub fn evaluate<M, I>(&self, model: &M, records: I) -> Result<ErrorMetrics>
    where
        M: RatingModel + ?Sized,
        I: IntoIterator<Item = Result<HoldoutRecord>>,
    {
        if self.expected == 0 {
            return Err(SvdError::invalid_state("holdout record count must be positive"));
        }

        info!(
            "Start calculating hold-out MSE over {} records with {} model",
            self.expected,
            model.name()
        );

        let mut acc = RunningMse::new(self.expected);
        for record in records.into_iter().take(self.expected) {
            let record = record?;
            validate_record_ids(model, record.user_id, record.item_id)?;
            acc.observe(record.rating, model.predict(record.user_id, record.item_id));
        }

        if acc.observed() < self.expected {
            return Err(SvdError::format(format!(
                "holdout ended after {} of {} records",
                acc.observed(),
                self.expected
            )));
        }

        let metrics = ErrorMetrics::from(&acc);
        info!("Hold-out MSE = {:.6} (RMSE {:.6})", metrics.mse, metrics.rmse);
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, UserId};

    struct ItemScore;

    impl RatingModel for ItemScore {
        fn predict(&self, _user_id: UserId, item_id: ItemId) -> f32 {
            item_id as f32 + 3.0
        }

        fn dimensions(&self) -> (usize, usize) {
            (4, 4)
        }

        fn name(&self) -> &'static str {
            "item-score"
        }
    }

    #[test]
    fn test_two_record_mse() {
        let records = vec![
            Ok(HoldoutRecord::new(0, 0, 3.0)),
            Ok(HoldoutRecord::new(1, 1, 5.0)),
        ];
        let metrics = Evaluator::new(2).evaluate(&ItemScore, records).unwrap();
        assert_eq!(metrics.records, 2);
        assert!((metrics.mse - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stops_at_expected_count() {
        let records = vec![
            Ok(HoldoutRecord::new(0, 0, 3.0)),
            Err(SvdError::format("never read")),
        ];
        let metrics = Evaluator::new(1).evaluate(&ItemScore, records).unwrap();
        assert_eq!(metrics.mse, 0.0);
    }

    #[test]
    fn test_short_stream_is_format_error() {
        let records = vec![Ok(HoldoutRecord::new(0, 0, 3.0))];
        assert!(matches!(
            Evaluator::new(3).evaluate(&ItemScore, records),
            Err(SvdError::Format { .. })
        ));
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let records = vec![Ok(HoldoutRecord::new(9, 0, 3.0))];
        assert!(Evaluator::new(1).evaluate(&ItemScore, records).is_err());
    }

    #[test]
    fn test_zero_expected_is_invalid() {
        let records: Vec<Result<HoldoutRecord>> = Vec::new();
        assert!(matches!(
            Evaluator::new(0).evaluate(&ItemScore, records),
            Err(SvdError::InvalidState { .. })
        ));
    }
}
