use serde::{Deserialize, Serialize};

pub type UserId = u32;
pub type ItemId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: u64,
    pub user_id: UserId,
    pub item_id: ItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: u64,
    pub rating: f32,
}

impl Rating {
    pub fn new(user_id: UserId, item_id: ItemId, rating: i32) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

impl HoldoutRecord {
    pub fn new(user_id: UserId, item_id: ItemId, rating: f32) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

impl TestRecord {
    pub fn new(id: u64, user_id: UserId, item_id: ItemId) -> Self {
        Self {
            id,
            user_id,
            item_id,
        }
    }
}
