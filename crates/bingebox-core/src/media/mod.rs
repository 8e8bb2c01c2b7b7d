mod catalog;
mod models;

pub use catalog::{displayable, image_url, CatalogRow};
pub use models::{MediaItem, MediaKind, Page, Video, VideoList};
