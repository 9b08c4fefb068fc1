//! Product records: the raw storefront shape and the projected output shape.
//!
//! - [`RawProduct`], [`RawVariant`], [`RawImage`]: what `/products.json` returns
//! - [`ProjectedProduct`], [`ProjectedVariant`]: what gets written to disk
//! - [`ProjectedProduct::from_raw`]: the mapping between the two

mod projection;
mod raw;

pub use projection::{project_all, split_tags, ProjectedProduct, ProjectedVariant};
pub use raw::{Price, ProductsPage, RawImage, RawProduct, RawTags, RawVariant};
