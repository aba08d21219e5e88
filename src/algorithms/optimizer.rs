use crate::algorithms::factors::FactorTable;
use crate::algorithms::predict;
use crate::models::Rating;

/// Returns the scaled error `learning_rate * (rating - prediction)`.
pub fn sgd_step(
    users: &mut FactorTable,
    items: &mut FactorTable,
    sample: &Rating,
    feature: usize,
    learning_rate: f32,
) -> f32 {
    let user = sample.user_id as usize;
    let item = sample.item_id as usize;

    let prediction = predict(users.row(user), items.row(item));
    let err = learning_rate * (sample.rating as f32 - prediction);

    let mut user_row = users.row_mut(user);
    let mut item_row = items.row_mut(item);
    let old_user = user_row[feature];
    user_row[feature] += err * item_row[feature];
    item_row[feature] += err * old_user;

    err
}
