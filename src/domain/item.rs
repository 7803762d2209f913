use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageRef, ItemId, ItemTitle};

/// Recyclable-material category a collection point may accept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: ItemTitle,
    /// Icon reference: a file under `/uploads` or an absolute URL.
    pub image: ImageRef,
}
