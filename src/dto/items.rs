use serde::{Deserialize, Serialize};

use crate::domain::item::Item;
use crate::domain::types::{ImageRef, ItemId, ItemTitle, TypeConstraintError};

/// Item category as exposed by `GET /items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: i32,
    pub title: String,
    pub image_url: String,
}

impl ItemDto {
    pub fn from_item(item: Item, public_url: &str) -> Self {
        Self {
            id: item.id.get(),
            title: item.title.into_inner(),
            image_url: image_url(public_url, &item.image),
        }
    }
}

impl TryFrom<ItemDto> for Item {
    type Error = TypeConstraintError;

    fn try_from(dto: ItemDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::new(dto.id)?,
            title: ItemTitle::new(dto.title)?,
            image: ImageRef::new(dto.image_url)?,
        })
    }
}

/// Resolve an image reference into a URL the clients can fetch.
///
/// Absolute references are returned unchanged; bare file names live under
/// `/uploads` of the public server address.
pub fn image_url(public_url: &str, image: &ImageRef) -> String {
    let image = image.as_str();
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!(
            "{}/uploads/{}",
            public_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }
}
