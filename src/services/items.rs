use crate::dto::items::ItemDto;
use crate::repository::ItemReader;

use super::{ServiceError, ServiceResult};

/// List every item category with icon URLs resolved against `public_url`.
pub fn list_items<R>(repo: &R, public_url: &str) -> ServiceResult<Vec<ItemDto>>
where
    R: ItemReader,
{
    match repo.list_items() {
        Ok(items) => Ok(items
            .into_iter()
            .map(|item| ItemDto::from_item(item, public_url))
            .collect()),
        Err(e) => {
            log::error!("Failed to list items: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Item;
    use crate::domain::types::{ImageRef, ItemId, ItemTitle};
    use crate::repository::test::TestRepository;

    #[test]
    fn resolves_icon_urls() {
        let repo = TestRepository::new(
            vec![Item {
                id: ItemId::new(1).unwrap(),
                title: ItemTitle::new("Lampadas").unwrap(),
                image: ImageRef::new("lampadas.svg").unwrap(),
            }],
            vec![],
        );

        let items = list_items(&repo, "http://localhost:3333").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_url, "http://localhost:3333/uploads/lampadas.svg");
    }

    #[test]
    fn repository_failures_are_internal_errors() {
        let repo = TestRepository::failing();
        assert_eq!(
            list_items(&repo, "http://h").unwrap_err(),
            ServiceError::Internal
        );
    }
}
