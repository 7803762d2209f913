use diesel::prelude::*;

use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::models::item::Item as DbItem;
use crate::repository::{DieselRepository, ItemReader, RepositoryResult};

impl ItemReader for DieselRepository {
    fn list_items(&self) -> RepositoryResult<Vec<Item>> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let items = items::table
            .order(items::id.asc())
            .load::<DbItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(items)
    }

    fn get_items_by_ids(&self, ids: &[ItemId]) -> RepositoryResult<Vec<Item>> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let items = items::table
            .filter(items::id.eq_any(ids))
            .order(items::id.asc())
            .load::<DbItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(items)
    }
}
