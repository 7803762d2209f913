use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::item::Item;
use crate::domain::point::{NewPoint, Point, PointSummary};
use crate::domain::types::PointId;
use crate::models::item::Item as DbItem;
use crate::models::point::{NewPoint as DbNewPoint, Point as DbPoint, PointItem};
use crate::repository::{
    DieselRepository, PointListQuery, PointReader, PointWriter, RepositoryError, RepositoryResult,
};

/// Items accepted by each of `point_ids`, keyed by point id.
fn load_point_items(
    conn: &mut SqliteConnection,
    point_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Item>>> {
    use crate::schema::{items, point_items};

    let rows = point_items::table
        .inner_join(items::table)
        .filter(point_items::point_id.eq_any(point_ids.to_vec()))
        .order((point_items::point_id.asc(), items::id.asc()))
        .select((point_items::point_id, items::all_columns))
        .load::<(i32, DbItem)>(conn)?;

    let mut grouped: HashMap<i32, Vec<Item>> = HashMap::new();
    for (point_id, item) in rows {
        grouped.entry(point_id).or_default().push(item.try_into()?);
    }
    Ok(grouped)
}

impl PointReader for DieselRepository {
    fn list_points(&self, query: PointListQuery) -> RepositoryResult<Vec<PointSummary>> {
        use crate::schema::{point_items, points};

        let mut conn = self.conn()?;

        let mut rows = points::table.into_boxed::<Sqlite>();
        if let Some(region) = &query.region {
            rows = rows.filter(points::region.eq(region.as_str()));
        }
        if let Some(city) = &query.city {
            rows = rows.filter(points::city.eq(city.as_str()));
        }
        if !query.items.is_empty() {
            let item_ids: Vec<i32> = query.items.iter().map(|id| id.get()).collect();
            rows = rows.filter(
                points::id.eq_any(
                    point_items::table
                        .filter(point_items::item_id.eq_any(item_ids))
                        .select(point_items::point_id),
                ),
            );
        }

        let rows = rows
            .order((points::name.asc(), points::id.asc()))
            .load::<DbPoint>(&mut conn)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut items = load_point_items(&mut conn, &ids)?;

        let points = rows
            .into_iter()
            .map(|row| {
                let accepted = items.remove(&row.id).unwrap_or_default();
                row.into_summary(accepted)
            })
            .collect::<Result<Vec<PointSummary>, _>>()?;

        Ok(points)
    }

    fn get_point_by_id(&self, id: PointId) -> RepositoryResult<Option<Point>> {
        use crate::schema::points;

        let mut conn = self.conn()?;

        let row = points::table
            .filter(points::id.eq(id.get()))
            .first::<DbPoint>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let accepted = load_point_items(&mut conn, &[row.id])?
            .remove(&row.id)
            .unwrap_or_default();
        Ok(Some(row.into_domain(accepted)?))
    }
}

impl PointWriter for DieselRepository {
    fn create_point(&self, point: &NewPoint) -> RepositoryResult<Point> {
        use crate::schema::{point_items, points};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(points::table)
                .values(DbNewPoint::from(point))
                .get_result::<DbPoint>(conn)?;

            let links: Vec<PointItem> = point
                .items
                .iter()
                .map(|item_id| PointItem {
                    point_id: row.id,
                    item_id: item_id.get(),
                })
                .collect();
            if !links.is_empty() {
                diesel::insert_into(point_items::table)
                    .values(&links)
                    .execute(conn)?;
            }

            let accepted = load_point_items(conn, &[row.id])?
                .remove(&row.id)
                .unwrap_or_default();
            Ok(row.into_domain(accepted)?)
        })
    }
}
