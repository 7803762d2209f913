use diesel::prelude::*;

use crate::domain::item::Item as DomainItem;
use crate::domain::types::{ImageRef, ItemTitle, TypeConstraintError};

/// Diesel model representing the `items` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::items)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub image: String,
}

impl TryFrom<Item> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            title: ItemTitle::new(item.title)?,
            image: ImageRef::new(item.image)?,
        })
    }
}
