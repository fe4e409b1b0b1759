//! Read-only query surface over a validated catalogue.
//!
//! `CatalogueService` is constructed once from a `CatalogueIndex` and handed
//! to whatever renders listings, search results, tool pages or the landing
//! page. Every query is a pure function of the index and its arguments; the
//! index sits behind an `Arc` so clones share one immutable dataset.

use crate::catalog::{Availability, CatalogueIndex, Category, SearchQuery, Tool};
use log::trace;
use serde::Serialize;
use std::sync::Arc;

/// Number of categories the landing page samples.
pub const DEFAULT_LANDING_CATEGORIES: usize = 3;
/// Number of tools taken from each sampled category.
pub const DEFAULT_LANDING_TOOLS: usize = 2;

#[derive(Clone, Debug)]
pub struct CatalogueService {
    index: Arc<CatalogueIndex>,
}

/// Outcome of opening a tool page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "tool", rename_all = "snake_case")]
pub enum ToolDetail<'a> {
    NotFound,
    ComingSoon(&'a Tool),
    Available(&'a Tool),
}

impl<'a> ToolDetail<'a> {
    pub fn tool(&self) -> Option<&'a Tool> {
        match self {
            ToolDetail::NotFound => None,
            ToolDetail::ComingSoon(tool) | ToolDetail::Available(tool) => Some(tool),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
/// Counts over the whole catalogue.
pub struct CatalogueStats {
    pub categories: usize,
    pub tools: usize,
    pub available: usize,
    pub coming_soon: usize,
    pub featured: usize,
}

impl CatalogueService {
    pub fn new(index: CatalogueIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }

    pub fn index(&self) -> &CatalogueIndex {
        &self.index
    }

    /// Every category with its full tool list, in definition order.
    pub fn list_categories(&self) -> &[Category] {
        self.index.categories()
    }

    /// Exact, case-sensitive lookup. Empty or unknown ids yield `None`.
    pub fn tool_by_id(&self, id: &str) -> Option<&Tool> {
        let tool = self.index.tool(id);
        trace!("tool_by_id({id:?}) -> {}", tool.is_some());
        tool
    }

    pub fn tools_by_category(&self, category_id: &str) -> Option<&Category> {
        self.index.category(category_id)
    }

    /// Categories filtered down to tools matching `query`.
    ///
    /// Categories with no matching tool are dropped. An empty query keeps
    /// every tool, so it returns every category that has at least one.
    pub fn search_tools(&self, query: &str) -> Vec<Category> {
        let results = SearchQuery::new(query).filter(self.index.categories());
        trace!("search_tools({query:?}) -> {} categories", results.len());
        results
    }

    pub fn detail(&self, id: &str) -> ToolDetail<'_> {
        match self.tool_by_id(id) {
            None => ToolDetail::NotFound,
            Some(tool) => match tool.availability() {
                Availability::ComingSoon => ToolDetail::ComingSoon(tool),
                Availability::Available => ToolDetail::Available(tool),
            },
        }
    }

    /// Tools flagged `featured`, in catalogue order.
    pub fn featured_tools(&self) -> Vec<&Tool> {
        self.index.tools().filter(|tool| tool.featured).collect()
    }

    /// First `tools_per_category` tools of each of the first
    /// `category_limit` categories, flattened.
    pub fn landing_tools(&self, category_limit: usize, tools_per_category: usize) -> Vec<&Tool> {
        self.index
            .categories()
            .iter()
            .take(category_limit)
            .flat_map(|category| category.tools.iter().take(tools_per_category))
            .collect()
    }

    pub fn stats(&self) -> CatalogueStats {
        let mut stats = CatalogueStats {
            categories: self.index.categories().len(),
            ..Default::default()
        };
        for tool in self.index.tools() {
            stats.tools += 1;
            match tool.availability() {
                Availability::Available => stats.available += 1,
                Availability::ComingSoon => stats.coming_soon += 1,
            }
            if tool.featured {
                stats.featured += 1;
            }
        }
        stats
    }
}
