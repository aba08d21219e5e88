use crate::error::{Result, SvdError};
use crate::models::Rating;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct RatingStore {
    rows: Vec<Rating>,
    capacity: usize,
    max_user_id: Option<u32>,
    max_item_id: Option<u32>,
}

impl RatingStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::new(),
            capacity,
            max_user_id: None,
            max_item_id: None,
        }
    }

    pub fn load<I>(capacity: usize, source: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Rating>>,
    {
        let mut store = Self::with_capacity(capacity);
        for row in source {
            store.push(row?)?;
        }
        Ok(store)
    }

    pub fn push(&mut self, rating: Rating) -> Result<()> {
        if self.rows.len() >= self.capacity {
            return Err(SvdError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.max_user_id = self.max_user_id.max(Some(rating.user_id));
        self.max_item_id = self.max_item_id.max(Some(rating.item_id));
        self.rows.push(rating);
        Ok(())
    }

    /// Panics when `index >= count`.
    pub fn get(&self, index: usize) -> Rating {
        assert!(
            index < self.rows.len(),
            "rating index {} out of range for {} rows",
            index,
            self.rows.len()
        );
        self.rows[index]
    }

    pub fn sample_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Rating {
        self.rows[rng.gen_range(0..self.rows.len())]
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_user_id(&self) -> Option<u32> {
        self.max_user_id
    }

    pub fn max_item_id(&self) -> Option<u32> {
        self.max_item_id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rows(n: u32) -> Vec<Result<Rating>> {
        (0..n).map(|i| Ok(Rating::new(i, i * 2, 3))).collect()
    }

    #[test]
    fn test_load_within_capacity() {
        let store = RatingStore::load(4, rows(3)).unwrap();
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(2), Rating::new(2, 4, 3));
        assert_eq!(store.max_user_id(), Some(2));
        assert_eq!(store.max_item_id(), Some(4));
    }

    #[test]
    fn test_load_over_capacity_fails() {
        let result = RatingStore::load(2, rows(3));
        assert!(matches!(
            result,
            Err(SvdError::CapacityExceeded { capacity: 2 })
        ));
    }

    #[test]
    fn test_load_propagates_source_error() {
        let source = vec![Ok(Rating::new(0, 0, 1)), Err(SvdError::format("bad row"))];
        assert!(matches!(
            RatingStore::load(10, source),
            Err(SvdError::Format { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_get_past_count_panics() {
        let store = RatingStore::load(10, rows(2)).unwrap();
        store.get(2);
    }

    #[test]
    fn test_sample_random_stays_in_valid_rows() {
        let store = RatingStore::load(100, rows(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let rating = store.sample_random(&mut rng);
            assert!(rating.user_id < 5);
        }
    }
}
