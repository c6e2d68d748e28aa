//! Catalog snapshot
//!
//! Products are read from a local YAML snapshot of the storefront catalog,
//! keyed by slug:
//!
//! ```yaml
//! products:
//!   red-wine:
//!     id: 1
//!     title: Red Wine
//!     price: "12.50"
//!     sale_price: "9.90"
//!     on_sale: true
//!     stock: 24
//!     image: /uploads/red.png
//! ```

use std::{fs, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    prices::{Price, PriceError},
    products::{Product, ProductId},
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error("Invalid price for {slug}: {source}")]
    InvalidPrice {
        /// Product slug
        slug: String,

        /// Price parsing error
        #[source]
        source: PriceError,
    },

    /// Two products share an id
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: FxHashMap<String, ProductFixture>,
}

/// Product as written in the catalog file
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: u64,
    title: String,
    price: String,
    #[serde(default)]
    sale_price: Option<String>,
    #[serde(default)]
    on_sale: bool,
    stock: u32,
    #[serde(default)]
    image: Option<String>,
}

impl ProductFixture {
    fn into_product(self, slug: String) -> Result<Product, CatalogError> {
        let parse = |value: &str| {
            Price::parse_major(value).map_err(|source| CatalogError::InvalidPrice {
                slug: slug.clone(),
                source,
            })
        };

        let price = parse(&self.price)?;
        let sale_price = self.sale_price.as_deref().map(parse).transpose()?;

        Ok(Product {
            id: ProductId::new(self.id),
            title: self.title,
            price,
            sale_price,
            on_sale: self.on_sale,
            stock: self.stock,
            image: self.image,
            slug,
        })
    }
}

/// Products available to add to the cart.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_slug: FxHashMap<String, usize>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Load a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed, a price cannot be
    /// parsed, or two products share an id.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut products = fixture
            .products
            .into_iter()
            .map(|(slug, product)| product.into_product(slug))
            .collect::<Result<Vec<_>, _>>()?;

        products.sort_by_key(|product| product.id);

        let mut seen = FxHashSet::default();

        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        let by_slug = products
            .iter()
            .enumerate()
            .map(|(idx, product)| (product.slug.clone(), idx))
            .collect();

        Ok(Self { products, by_slug })
    }

    /// Look a product up by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.by_slug
            .get(slug)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Look a product up by id.
    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.products
            .binary_search_by_key(&id, |product| product.id)
            .ok()
            .and_then(|idx| self.products.get(idx))
    }

    /// Iterate over the products, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
