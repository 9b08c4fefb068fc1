//! Product records as returned by the public `/products.json` endpoint.
//!
//! Every field is optional or defaulted: storefronts omit fields freely, and a
//! missing or oddly typed field must never fail a whole page. A field of the
//! wrong JSON type reads as absent. Unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// One page of the `/products.json` response.
///
/// A body without a `products` key deserializes to an empty page.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProductsPage {
    /// The products on this page, in storefront listing order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<RawProduct>,
}

/// Product tags in either shape storefronts return them.
///
/// The documented shape is a single comma-delimited string
/// (`"summer, sale"`); some storefronts send a JSON array instead.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawTags {
    /// Comma-delimited tag string.
    Delimited(String),
    /// Tags already split into a list.
    List(Vec<String>),
}

/// A price as the store sent it: decimal text (`"19.99"`) or a JSON number.
///
/// Serializes back to the same JSON type and text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    /// Price sent as a string.
    Text(String),
    /// Price sent as a number.
    Number(serde_json::Number),
}

/// A product record from the storefront.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawProduct {
    /// The unique identifier of the product.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,

    /// The name of the product.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// The URL slug of the product.
    #[serde(default, deserialize_with = "lenient")]
    pub handle: Option<String>,

    /// The name of the product's vendor.
    #[serde(default, deserialize_with = "lenient")]
    pub vendor: Option<String>,

    /// A categorization for the product.
    #[serde(default, deserialize_with = "lenient")]
    pub product_type: Option<String>,

    /// The product's tags.
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<RawTags>,

    /// The description of the product in HTML format.
    #[serde(default, deserialize_with = "lenient")]
    pub body_html: Option<String>,

    /// When the product was created, as sent by the store.
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,

    /// When the product was last updated, as sent by the store.
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,

    /// When the product was published, as sent by the store.
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<String>,

    /// The variants of the product.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub variants: Vec<RawVariant>,

    /// All images associated with the product.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub images: Vec<RawImage>,

    /// The options of the product (e.g., Size, Color), kept whole.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub options: Vec<serde_json::Value>,
}

/// A variant embedded within a product record.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawVariant {
    /// The unique identifier of the variant.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,

    /// The title of the variant.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// The price of the variant.
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Price>,

    /// The original price of the variant for comparison.
    #[serde(default, deserialize_with = "lenient")]
    pub compare_at_price: Option<Price>,

    /// The stock keeping unit (SKU) of the variant.
    #[serde(default, deserialize_with = "lenient")]
    pub sku: Option<String>,

    /// Whether the variant can currently be purchased.
    #[serde(default, deserialize_with = "lenient")]
    pub available: Option<bool>,

    /// The inventory quantity of the variant.
    #[serde(default, deserialize_with = "lenient")]
    pub inventory_quantity: Option<i64>,

    /// The weight of the variant, integer or decimal as sent.
    #[serde(default, deserialize_with = "lenient")]
    pub weight: Option<serde_json::Number>,

    /// The unit of `weight` (e.g. "kg", "lb").
    #[serde(default, deserialize_with = "lenient")]
    pub weight_unit: Option<String>,
}

/// An image associated with a product. Only the source URL is kept.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct RawImage {
    /// The source URL of the image.
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a field of the wrong JSON type (or `null`) as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Reads a sequence field leniently.
///
/// Anything but an array yields an empty sequence. An element of the wrong
/// shape becomes `T::default()` so later elements keep their positions.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(elements) = value else {
        return Ok(Vec::new());
    };

    Ok(elements
        .into_iter()
        .map(|element| T::deserialize(element).unwrap_or_default())
        .collect())
}
