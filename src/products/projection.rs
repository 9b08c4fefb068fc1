//! Projection of raw storefront records onto the reduced output schema.
//!
//! Projection is a pure, total mapping: it never touches the network and
//! never fails. Absent fields become `null`, an empty string or an empty
//! list, depending on the field.

use serde::{Deserialize, Serialize};

use super::raw::{Price, RawProduct, RawTags, RawVariant};

/// The separator between tags in a comma-delimited tag string.
const TAG_SEPARATOR: &str = ", ";

/// A product reduced to the fields written to the output file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectedProduct {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    /// The product's `body_html`, or an empty string when absent.
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub published_at: Option<String>,
    pub variants: Vec<ProjectedVariant>,
    /// Image source URLs in storefront order; `None` where an image had no `src`.
    pub images: Vec<Option<String>>,
    /// Option objects exactly as the store sent them.
    pub options: Vec<serde_json::Value>,
}

/// A variant reduced to its pricing, stock and weight fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectedVariant {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub price: Option<Price>,
    pub compare_at_price: Option<Price>,
    pub sku: Option<String>,
    pub available: Option<bool>,
    pub inventory_quantity: Option<i64>,
    pub weight: Option<serde_json::Number>,
    pub weight_unit: Option<String>,
}

impl ProjectedProduct {
    /// Projects a raw storefront record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_scraper::{ProjectedProduct, RawProduct};
    ///
    /// let raw: RawProduct = serde_json::from_str(
    ///     r#"{"id": 1, "title": "Mug", "tags": "kitchen, gifts"}"#,
    /// ).unwrap();
    ///
    /// let projected = ProjectedProduct::from_raw(&raw);
    /// assert_eq!(projected.tags, vec!["kitchen", "gifts"]);
    /// assert_eq!(projected.description, "");
    /// assert!(projected.variants.is_empty());
    /// ```
    #[must_use]
    pub fn from_raw(raw: &RawProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title.clone(),
            handle: raw.handle.clone(),
            vendor: raw.vendor.clone(),
            product_type: raw.product_type.clone(),
            tags: raw.tags.as_ref().map(split_tags).unwrap_or_default(),
            description: raw.body_html.clone().unwrap_or_default(),
            created_at: raw.created_at.clone(),
            updated_at: raw.updated_at.clone(),
            published_at: raw.published_at.clone(),
            variants: raw.variants.iter().map(ProjectedVariant::from).collect(),
            images: raw.images.iter().map(|image| image.src.clone()).collect(),
            options: raw.options.clone(),
        }
    }
}

impl From<&RawProduct> for ProjectedProduct {
    fn from(raw: &RawProduct) -> Self {
        Self::from_raw(raw)
    }
}

impl From<&RawVariant> for ProjectedVariant {
    fn from(raw: &RawVariant) -> Self {
        Self {
            id: raw.id,
            title: raw.title.clone(),
            price: raw.price.clone(),
            compare_at_price: raw.compare_at_price.clone(),
            sku: raw.sku.clone(),
            available: raw.available,
            inventory_quantity: raw.inventory_quantity,
            weight: raw.weight.clone(),
            weight_unit: raw.weight_unit.clone(),
        }
    }
}

/// Splits raw tags into an ordered list of trimmed tag strings.
///
/// An empty tag string yields no tags.
///
/// ```rust
/// use shopify_scraper::products::{split_tags, RawTags};
///
/// let tags = RawTags::Delimited("a, b, c".to_string());
/// assert_eq!(split_tags(&tags), vec!["a", "b", "c"]);
///
/// let tags = RawTags::Delimited(String::new());
/// assert!(split_tags(&tags).is_empty());
/// ```
#[must_use]
pub fn split_tags(tags: &RawTags) -> Vec<String> {
    match tags {
        RawTags::Delimited(text) if text.is_empty() => Vec::new(),
        RawTags::Delimited(text) => text
            .split(TAG_SEPARATOR)
            .map(|tag| tag.trim().to_string())
            .collect(),
        RawTags::List(list) => list.iter().map(|tag| tag.trim().to_string()).collect(),
    }
}

/// Projects every product, keeping storefront order.
#[must_use]
pub fn project_all(products: &[RawProduct]) -> Vec<ProjectedProduct> {
    products.iter().map(ProjectedProduct::from_raw).collect()
}
