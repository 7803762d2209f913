use ecoleta::domain::types::{CityName, ItemId, PointId, RegionCode};
use ecoleta::repository::{
    DieselRepository, ItemReader, PointListQuery, PointReader, PointWriter,
};

mod common;

fn blumenau() -> PointListQuery {
    PointListQuery::default()
        .region(RegionCode::new("SC").expect("valid region"))
        .city(CityName::new("Blumenau").expect("valid city"))
}

fn ids(values: &[i32]) -> Vec<ItemId> {
    values
        .iter()
        .map(|id| ItemId::new(*id).expect("valid item id"))
        .collect()
}

#[test]
fn lists_seeded_items() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let items = repo.list_items().expect("should list items");
    assert_eq!(items.len(), 6);
    assert_eq!(items[0].title.as_str(), "Lampadas");
    assert_eq!(items[5].image.as_str(), "oleo.svg");

    let found = repo
        .get_items_by_ids(&ids(&[2, 4, 99]))
        .expect("should look up items");
    assert_eq!(found.len(), 2);
}

#[test]
fn creates_point_with_items() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_point(&common::new_point("Mercado Central", "SC", "Blumenau", &[1, 3]))
        .expect("should create point");

    assert_eq!(created.region.as_str(), "SC");
    let item_ids: Vec<i32> = created.items.iter().map(|i| i.id.get()).collect();
    assert_eq!(item_ids, vec![1, 3]);

    let stored = repo
        .get_point_by_id(created.id)
        .expect("should load point")
        .expect("point should exist");
    assert_eq!(stored, created);

    let missing = repo
        .get_point_by_id(PointId::new(999).expect("valid id"))
        .expect("lookup should succeed");
    assert!(missing.is_none());
}

#[test]
fn filters_points_by_location_and_any_item() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (name, region, city, items) in [
        ("Zeta Recicla", "SC", "Blumenau", &[3][..]),
        ("Alfa Coleta", "SC", "Blumenau", &[1, 2][..]),
        ("Beta Verde", "SC", "Blumenau", &[1, 3][..]),
        ("Gama", "SC", "Joinville", &[3][..]),
        ("Delta", "SP", "Blumenau", &[3][..]),
    ] {
        repo.create_point(&common::new_point(name, region, city, items))
            .expect("should create point");
    }

    let all = repo.list_points(blumenau()).expect("should list points");
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alfa Coleta", "Beta Verde", "Zeta Recicla"]);

    let papers = repo
        .list_points(blumenau().items(ids(&[3])))
        .expect("should filter by item");
    let names: Vec<&str> = papers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Beta Verde", "Zeta Recicla"]);

    // A point accepting several requested items appears once.
    let any = repo
        .list_points(blumenau().items(ids(&[1, 3])))
        .expect("should filter by items");
    assert_eq!(any.len(), 3);
    let beta = any
        .iter()
        .find(|p| p.name.as_str() == "Beta Verde")
        .expect("Beta Verde should match");
    assert_eq!(beta.items.len(), 2);

    let nothing = repo
        .list_points(blumenau().items(ids(&[6])))
        .expect("should filter by item");
    assert!(nothing.is_empty());
}
