//! Category-derived issue checklists.
//!
//! Each location category maps to an ordered list of selectable issues.
//! The mapping is a single declarative table built once at startup and
//! shared through application state; nothing else in the codebase carries
//! issue literals.

use serde::{Deserialize, Serialize};

/// One selectable issue: a short ASCII id and the label shown to visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub label: String,
}

impl Issue {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// A category's checklist plus the aliases it answers to.
#[derive(Debug, Clone)]
struct Category {
    aliases: &'static [&'static str],
    issues: Vec<Issue>,
}

/// The category → checklist table.
///
/// Lookup is case-insensitive over the alias lists. Categories not in the
/// table fall back to a single generic cleaning issue so a feedback form
/// can always be rendered.
#[derive(Debug, Clone)]
pub struct IssueCatalog {
    categories: Vec<Category>,
    fallback: Vec<Issue>,
}

impl IssueCatalog {
    /// Build the built-in catalog.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category {
                    aliases: &["toilet", "tuvalet"],
                    issues: vec![
                        Issue::new("dirty", "Tuvalet genel temizliği gerekli"),
                        Issue::new("paper_out", "Tuvalet kağıdı bitmiş"),
                        Issue::new("soap_out", "Sıvı sabun tükenmiş"),
                        Issue::new("floor_wet", "Zemin ıslak / kaygan"),
                    ],
                },
                Category {
                    aliases: &["room", "oda"],
                    issues: vec![
                        Issue::new("cleaning_needed", "Oda temizliği gerekli"),
                        Issue::new("linen_change", "Çarşaf / nevresim değişimi gerekli"),
                        Issue::new("room_vacated", "Oda boşaldı (kontrol/temizlik gerekli)"),
                        Issue::new("trash_full", "Çöp torbası dolu / boşaltılması gerekli"),
                        Issue::new("bathroom_issue", "Oda içi lavabo/tuvalet ile ilgili problem"),
                    ],
                },
            ],
            fallback: vec![Issue::new("dirty", "Genel temizlik gerekli")],
        }
    }

    /// The ordered checklist for a category (case-insensitive).
    pub fn checklist(&self, category: &str) -> &[Issue] {
        let wanted = category.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.aliases.iter().any(|a| *a == wanted))
            .map(|c| c.issues.as_slice())
            .unwrap_or(&self.fallback)
    }

    /// Resolve a submitted issue id against a category's checklist.
    ///
    /// Unknown ids are preserved with the raw id as the label so old QR
    /// form snapshots and newer catalogs stay mutually compatible.
    pub fn resolve(&self, category: &str, issue_id: &str) -> Issue {
        self.checklist(category)
            .iter()
            .find(|i| i.id == issue_id)
            .cloned()
            .unwrap_or_else(|| Issue {
                id: issue_id.to_string(),
                label: issue_id.to_string(),
            })
    }
}
