use crate::algorithms::initializer::InitializationMethod;
use crate::algorithms::{FactorTable, RatingModel};
use crate::error::{Result, SvdError};
use crate::models::{ItemId, UserId};
use crate::store::RatingStore;

pub fn validate_store_bounds(store: &RatingStore, n_users: usize, n_items: usize) -> Result<()> {
    if let Some(max_user) = store.max_user_id() {
        if max_user as usize >= n_users {
            return Err(SvdError::invalid_state(format!(
                "user id {} in ratings exceeds user table size {}",
                max_user, n_users
            )));
        }
    }

    if let Some(max_item) = store.max_item_id() {
        if max_item as usize >= n_items {
            return Err(SvdError::invalid_state(format!(
                "item id {} in ratings exceeds item table size {}",
                max_item, n_items
            )));
        }
    }

    Ok(())
}

pub fn validate_training_inputs(
    store: &RatingStore,
    users: &FactorTable,
    items: &FactorTable,
    features: usize,
    learning_rate: f32,
) -> Result<()> {
    if store.is_empty() {
        return Err(SvdError::invalid_state("rating store is empty"));
    }

    if features == 0 {
        return Err(SvdError::invalid_state("feature count must be positive"));
    }

    for (name, table) in [("user", users), ("item", items)] {
        if table.features() != features {
            return Err(SvdError::invalid_state(format!(
                "{} table has {} features, expected {}",
                name,
                table.features(),
                features
            )));
        }
        if table.capacity() == 0 {
            return Err(SvdError::invalid_state(format!("{} table has no rows", name)));
        }
    }

    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(SvdError::invalid_state(format!(
            "learning rate must be finite and positive, got {}",
            learning_rate
        )));
    }

    validate_store_bounds(store, users.capacity(), items.capacity())
}

pub fn validate_initialization(method: &InitializationMethod) -> Result<()> {
    match *method {
        InitializationMethod::InverseSqrt => Ok(()),
        InitializationMethod::Constant { value } if value.is_finite() => Ok(()),
        InitializationMethod::Constant { value } => Err(SvdError::invalid_state(format!(
            "constant initialization value must be finite, got {}",
            value
        ))),
        InitializationMethod::Uniform { low, high }
            if low.is_finite() && high.is_finite() && low < high =>
        {
            Ok(())
        }
        InitializationMethod::Uniform { low, high } => Err(SvdError::invalid_state(format!(
            "uniform initialization needs finite low < high, got [{}, {})",
            low, high
        ))),
    }
}

pub fn validate_record_ids<M: RatingModel + ?Sized>(
    model: &M,
    user_id: UserId,
    item_id: ItemId,
) -> Result<()> {
    if model.contains(user_id, item_id) {
        return Ok(());
    }

    let (users, items) = model.dimensions();
    Err(SvdError::format(format!(
        "record (user {}, item {}) outside model dimensions {} x {}",
        user_id, item_id, users, items
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::FactorModel;
    use crate::models::Rating;

    fn one_row_store(user: u32, item: u32) -> RatingStore {
        RatingStore::load(1, [Ok(Rating::new(user, item, 4))]).unwrap()
    }

    #[test]
    fn test_valid_inputs_pass() {
        let store = one_row_store(1, 1);
        let users = FactorTable::new(2, 4);
        let items = FactorTable::new(2, 4);
        assert!(validate_training_inputs(&store, &users, &items, 4, 0.1).is_ok());
    }

    #[test]
    fn test_empty_store_rejected() {
        let store = RatingStore::with_capacity(4);
        let users = FactorTable::new(2, 4);
        let items = FactorTable::new(2, 4);
        assert!(matches!(
            validate_training_inputs(&store, &users, &items, 4, 0.1),
            Err(SvdError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_feature_mismatch_rejected() {
        let store = one_row_store(0, 0);
        let users = FactorTable::new(2, 4);
        let items = FactorTable::new(2, 3);
        assert!(validate_training_inputs(&store, &users, &items, 4, 0.1).is_err());
    }

    #[test]
    fn test_id_beyond_table_rejected() {
        let store = one_row_store(0, 2);
        let users = FactorTable::new(2, 4);
        let items = FactorTable::new(2, 4);
        assert!(validate_training_inputs(&store, &users, &items, 4, 0.1).is_err());
    }

    #[test]
    fn test_bad_learning_rate_rejected() {
        let store = one_row_store(0, 0);
        let users = FactorTable::new(1, 4);
        let items = FactorTable::new(1, 4);
        assert!(validate_training_inputs(&store, &users, &items, 4, f32::NAN).is_err());
        assert!(validate_training_inputs(&store, &users, &items, 4, 0.0).is_err());
    }

    #[test]
    fn test_uniform_range_must_be_non_empty() {
        let ok = InitializationMethod::Uniform { low: -0.1, high: 0.1 };
        assert!(validate_initialization(&ok).is_ok());

        for (low, high) in [(0.2, 0.2), (0.5, -0.5), (f32::NEG_INFINITY, 0.0), (0.0, f32::NAN)] {
            assert!(matches!(
                validate_initialization(&InitializationMethod::Uniform { low, high }),
                Err(SvdError::InvalidState { .. })
            ));
        }
    }

    #[test]
    fn test_constant_must_be_finite() {
        assert!(validate_initialization(&InitializationMethod::Constant { value: 0.3 }).is_ok());
        assert!(validate_initialization(&InitializationMethod::Constant { value: f32::NAN }).is_err());
        assert!(validate_initialization(&InitializationMethod::InverseSqrt).is_ok());
    }

    #[test]
    fn test_record_ids_checked_against_model() {
        let users = FactorTable::new(2, 4);
        let items = FactorTable::new(3, 4);
        let model = FactorModel::new(&users, &items);
        assert!(validate_record_ids(&model, 1, 2).is_ok());
        assert!(matches!(
            validate_record_ids(&model, 2, 0),
            Err(SvdError::Format { .. })
        ));
    }
}
