pub mod baseline;
pub mod factors;
pub mod initializer;
pub mod optimizer;

pub use baseline::BaselineModel;
pub use factors::FactorTable;

use crate::models::{ItemId, UserId};
use ndarray::ArrayView1;

pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 5.0;

/// Clamps into `[MIN_RATING, MAX_RATING]`. NaN maps to the floor.
pub fn clip_rating(value: f32) -> f32 {
    if value > MAX_RATING {
        MAX_RATING
    } else if value >= MIN_RATING {
        value
    } else {
        MIN_RATING
    }
}

pub fn predict(user_row: ArrayView1<'_, f32>, item_row: ArrayView1<'_, f32>) -> f32 {
    clip_rating(user_row.dot(&item_row))
}

pub trait RatingModel {
    fn predict(&self, user_id: UserId, item_id: ItemId) -> f32;

    fn dimensions(&self) -> (usize, usize);

    fn name(&self) -> &'static str;

    fn contains(&self, user_id: UserId, item_id: ItemId) -> bool {
        let (users, items) = self.dimensions();
        (user_id as usize) < users && (item_id as usize) < items
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FactorModel<'a> {
    users: &'a FactorTable,
    items: &'a FactorTable,
}

impl<'a> FactorModel<'a> {
    pub fn new(users: &'a FactorTable, items: &'a FactorTable) -> Self {
        Self { users, items }
    }
}

impl RatingModel for FactorModel<'_> {
    fn predict(&self, user_id: UserId, item_id: ItemId) -> f32 {
        predict(
            self.users.row(user_id as usize),
            self.items.row(item_id as usize),
        )
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.users.capacity(), self.items.capacity())
    }

    fn name(&self) -> &'static str {
        "svd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use proptest::prelude::*;

    #[test]
    fn test_clip_rating_bounds() {
        assert_eq!(clip_rating(-3.0), 1.0);
        assert_eq!(clip_rating(3.5), 3.5);
        assert_eq!(clip_rating(12.0), 5.0);
        assert_eq!(clip_rating(f32::NAN), 1.0);
        assert_eq!(clip_rating(f32::INFINITY), 5.0);
    }

    #[test]
    fn test_constant_rows_predict_k_v_squared() {
        let mut users = FactorTable::new(3, 10);
        let mut items = FactorTable::new(2, 10);
        users.initialize_constant(0.6);
        items.initialize_constant(0.6);

        let model = FactorModel::new(&users, &items);
        let expected = clip_rating(10.0 * 0.6 * 0.6);
        assert!((model.predict(2, 1) - expected).abs() < 1e-5);
        assert_eq!(model.dimensions(), (3, 2));
        assert!(!model.contains(3, 0));
    }

    #[test]
    fn test_default_initialization_predicts_floor() {
        let users = FactorTable::new(1, 300);
        let items = FactorTable::new(1, 300);
        let prediction = FactorModel::new(&users, &items).predict(0, 0);
        assert!((prediction - 1.0).abs() < 1e-4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_prediction_always_in_range(
            user in prop::collection::vec(-1.0e19f32..1.0e19, 8),
            item in prop::collection::vec(-1.0e19f32..1.0e19, 8),
        ) {
            let prediction = predict(arr1(&user).view(), arr1(&item).view());
            prop_assert!((MIN_RATING..=MAX_RATING).contains(&prediction));
        }

        #[test]
        fn prop_constant_rows_match_closed_form(value in -2.0f32..2.0, features in 1usize..64) {
            let row = arr1(&vec![value; features]);
            let expected = clip_rating(features as f32 * value * value);
            prop_assert!((predict(row.view(), row.view()) - expected).abs() < 1e-3);
        }
    }
}
