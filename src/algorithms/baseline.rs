use crate::algorithms::{clip_rating, RatingModel};
use crate::error::{Result, SvdError};
use crate::models::{ItemId, UserId};
use crate::store::RatingStore;
use tracing::info;

pub const DEFAULT_DAMPING: f32 = 2.0;

/// Damped item mean plus damped user offset.
#[derive(Debug, Clone)]
pub struct BaselineModel {
    damping: f32,
    item_sums: Vec<f32>,
    item_counts: Vec<u32>,
    offset_sums: Vec<f32>,
    offset_counts: Vec<u32>,
    global_mean_rating: f32,
    global_mean_offset: f32,
}

impl BaselineModel {
    pub fn fit(store: &RatingStore, n_users: usize, n_items: usize, damping: f32) -> Result<Self> {
        if store.is_empty() {
            return Err(SvdError::invalid_state("cannot fit baseline on an empty rating store"));
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(SvdError::invalid_state(format!(
                "baseline damping must be finite and non-negative, got {}",
                damping
            )));
        }
        crate::utils::validation::validate_store_bounds(store, n_users, n_items)?;

        let mut item_sums = vec![0.0f32; n_items];
        let mut item_counts = vec![0u32; n_items];
        let mut rating_sum = 0.0f64;
        for rating in store.iter() {
            let item = rating.item_id as usize;
            item_sums[item] += rating.rating as f32;
            item_counts[item] += 1;
            rating_sum += rating.rating as f64;
        }

        let mut offset_sums = vec![0.0f32; n_users];
        let mut offset_counts = vec![0u32; n_users];
        let mut offset_sum = 0.0f64;
        for rating in store.iter() {
            let item = rating.item_id as usize;
            let user = rating.user_id as usize;
            let offset = rating.rating as f32 - item_sums[item] / item_counts[item] as f32;
            offset_sums[user] += offset;
            offset_counts[user] += 1;
            offset_sum += offset as f64;
        }

        let count = store.count() as f64;
        let model = Self {
            damping,
            item_sums,
            item_counts,
            offset_sums,
            offset_counts,
            global_mean_rating: (rating_sum / count) as f32,
            global_mean_offset: (offset_sum / count) as f32,
        };

        info!(
            "Fitted baseline on {} ratings: global mean {:.4}, global offset {:.4}",
            store.count(),
            model.global_mean_rating,
            model.global_mean_offset
        );
        Ok(model)
    }

    pub fn global_mean_rating(&self) -> f32 {
        self.global_mean_rating
    }
}

impl RatingModel for BaselineModel {
    fn predict(&self, user_id: UserId, item_id: ItemId) -> f32 {
        let item = item_id as usize;
        let user = user_id as usize;
        let k = self.damping;

        let item_term = (self.global_mean_rating * k + self.item_sums[item])
            / (k + self.item_counts[item] as f32);
        let user_term = (self.global_mean_offset * k + self.offset_sums[user])
            / (k + self.offset_counts[user] as f32);

        clip_rating(item_term + user_term)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.offset_sums.len(), self.item_sums.len())
    }

    fn name(&self) -> &'static str {
        "baseline"
    }
}
