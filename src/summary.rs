//! Catalog statistics printed after a scrape.

use std::collections::HashSet;
use std::fmt;

use crate::products::ProjectedProduct;

/// Counts describing a scraped catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Number of products.
    pub products: usize,
    /// Number of distinct non-empty vendors.
    pub vendors: usize,
    /// Number of distinct non-empty product types.
    pub product_types: usize,
}

impl CatalogSummary {
    /// Summarizes a projected catalog. Missing or empty vendors and product
    /// types are not counted.
    #[must_use]
    pub fn from_products(products: &[ProjectedProduct]) -> Self {
        let vendors: HashSet<&str> = products
            .iter()
            .filter_map(|p| p.vendor.as_deref())
            .filter(|v| !v.is_empty())
            .collect();
        let product_types: HashSet<&str> = products
            .iter()
            .filter_map(|p| p.product_type.as_deref())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            products: products.len(),
            vendors: vendors.len(),
            product_types: product_types.len(),
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vendors: {}", self.vendors)?;
        write!(f, "Product Types: {}", self.product_types)
    }
}
