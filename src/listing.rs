//! Listing-page requests: optional search text plus a category filter.
//!
//! A blank or whitespace-only search box falls back to the full catalogue;
//! otherwise the untrimmed text goes to `search_tools`. The category filter is
//! applied afterwards, so picking a category never widens a search.

use crate::catalog::{Category, CategoryId};
use crate::service::CatalogueService;
use log::debug;

/// Filter value that keeps every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    /// `"all"` (or nothing) keeps everything; any other value selects one id.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(id) => CategoryFilter::Only(CategoryId::from(id)),
        }
    }

    fn keeps(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => &category.id == id,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListingRequest {
    pub query: Option<String>,
    pub category: CategoryFilter,
}

impl ListingRequest {
    pub fn new(query: Option<&str>, category: Option<&str>) -> Self {
        Self {
            query: query.map(str::to_string),
            category: CategoryFilter::parse(category),
        }
    }

    fn active_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .filter(|query| !query.trim().is_empty())
    }

    /// Resolve the request against the catalogue. An empty result means
    /// nothing matched.
    pub fn resolve(&self, service: &CatalogueService) -> Vec<Category> {
        let categories = match self.active_query() {
            Some(query) => service.search_tools(query),
            None => service.list_categories().to_vec(),
        };
        let listing: Vec<Category> = categories
            .into_iter()
            .filter(|category| self.category.keeps(category))
            .collect();
        debug!(
            "listing query={:?} filter={:?} -> {} categories",
            self.active_query(),
            self.category,
            listing.len()
        );
        listing
    }
}
