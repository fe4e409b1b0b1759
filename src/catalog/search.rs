//! Tool search matching.
//!
//! Name and description match when they contain the query; tags only match
//! when one of them equals the query outright. Both sides are lower-cased
//! with Unicode rules before comparison.

use crate::catalog::model::{Category, Tool};

/// A case-folded search query.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    folded: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: raw.to_lowercase(),
        }
    }

    pub fn matches(&self, tool: &Tool) -> bool {
        tool.name.to_lowercase().contains(&self.folded)
            || tool.description.to_lowercase().contains(&self.folded)
            || tool.tags.iter().any(|tag| tag.to_lowercase() == self.folded)
    }

    /// Filter categories down to matching tools, dropping categories left
    /// empty. Order is preserved at both levels.
    pub fn filter(&self, categories: &[Category]) -> Vec<Category> {
        categories
            .iter()
            .filter_map(|category| {
                let tools: Vec<Tool> = category
                    .tools
                    .iter()
                    .filter(|tool| self.matches(tool))
                    .cloned()
                    .collect();
                if tools.is_empty() {
                    None
                } else {
                    Some(category.with_tools(tools))
                }
            })
            .collect()
    }
}
