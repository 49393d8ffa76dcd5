//! Listing records handed over by the collection layer, and the groups
//! handed back once listings have been resolved to products.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One scraped product record from one store.
///
/// Only `title` is inspected by the resolution engine; everything else is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl Listing {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
            url: None,
            image: None,
            store: None,
            availability: None,
        }
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

impl From<&str> for Listing {
    fn from(title: &str) -> Self {
        Listing::new(title)
    }
}

/// Listings judged to be the same physical product, under one display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub name: String,
    pub listings: Vec<Listing>,
}

impl ProductGroup {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Distinct stores offering this product, in first-seen order
    pub fn stores(&self) -> Vec<&str> {
        let mut stores: Vec<&str> = Vec::new();
        for store in self.listings.iter().filter_map(|l| l.store.as_deref()) {
            if !stores.contains(&store) {
                stores.push(store);
            }
        }
        stores
    }
}

/// Read a JSON array of listings from any reader
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a JSON array of listings from a file
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>> {
    let file = std::fs::File::open(path)?;
    read_listings(std::io::BufReader::new(file))
}
