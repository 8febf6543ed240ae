//! Document library filtering.
//!
//! Pure functions over the workspace's document list: the search/category
//! predicate behind the library view and the per-category tallies shown in
//! the filter dropdown and sidebar. No hidden state — everything is a
//! function of its inputs.

use serde::Serialize;

use crate::models::{CategoryKind, Document};

/// Category filter for the library view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryKind),
}

/// Per-category tallies for the filter dropdown labels and sidebar badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub historical_deal: usize,
    pub current_opportunity: usize,
    pub market_research: usize,
    pub portfolio_report: usize,
    pub other: usize,
}

/// Filter the document list for the library view.
///
/// A document is kept when the category filter is `All` or matches its
/// category exactly, AND the search string is empty or case-insensitively
/// substring-matches the filename or any tag. Substring containment only,
/// no fuzzy matching. Source order is preserved.
pub fn filter_documents(
    documents: &[Document],
    search: &str,
    filter: &CategoryFilter,
) -> Vec<Document> {
    let needle = search.to_lowercase();
    documents
        .iter()
        .filter(|doc| {
            let matches_category = match filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(kind) => doc.category.kind() == *kind,
            };
            let matches_search = needle.is_empty()
                || doc.filename.to_lowercase().contains(&needle)
                || doc.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
            matches_category && matches_search
        })
        .cloned()
        .collect()
}

/// Tally documents per category.
pub fn category_counts(documents: &[Document]) -> CategoryCounts {
    let mut counts = CategoryCounts {
        all: documents.len(),
        ..CategoryCounts::default()
    };
    for doc in documents {
        match doc.category.kind() {
            CategoryKind::HistoricalDeal => counts.historical_deal += 1,
            CategoryKind::CurrentOpportunity => counts.current_opportunity += 1,
            CategoryKind::MarketResearch => counts.market_research += 1,
            CategoryKind::PortfolioReport => counts.portfolio_report += 1,
            CategoryKind::Other => counts.other += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DealCategory, DealOutcome};
    use chrono::Local;
    use uuid::Uuid;

    fn doc(filename: &str, tags: &[&str], category: DealCategory) -> Document {
        Document {
            id: Uuid::new_v4(),
            filename: filename.into(),
            uploaded_at: Local::now().naive_local(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category,
        }
    }

    fn sample_library() -> Vec<Document> {
        vec![
            doc(
                "TechCorp_Acquisition_2023.pdf",
                &["SaaS", "Series B", "Enterprise"],
                DealCategory::HistoricalDeal {
                    deal_outcome: DealOutcome::Invested,
                },
            ),
            doc(
                "FinTech_Startup_Deck.pdf",
                &["FinTech", "Seed", "Payments"],
                DealCategory::CurrentOpportunity,
            ),
            doc(
                "SaaS_Market_Analysis_2024.pdf",
                &["Market Research", "SaaS", "Trends"],
                DealCategory::MarketResearch,
            ),
            doc(
                "Fund_III_Q4_Portfolio_Report.pdf",
                &["Q4", "Portfolio", "Performance"],
                DealCategory::PortfolioReport,
            ),
        ]
    }

    #[test]
    fn empty_search_and_all_filter_keeps_everything() {
        let docs = sample_library();
        let filtered = filter_documents(&docs, "", &CategoryFilter::All);
        assert_eq!(filtered.len(), docs.len());
    }

    #[test]
    fn search_matches_tags_case_insensitively() {
        let docs = vec![doc(
            "TechCorp.pdf",
            &["SaaS"],
            DealCategory::HistoricalDeal {
                deal_outcome: DealOutcome::Invested,
            },
        )];
        let hit = filter_documents(&docs, "saas", &CategoryFilter::All);
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].filename, "TechCorp.pdf");

        let miss = filter_documents(&docs, "fintech", &CategoryFilter::All);
        assert!(miss.is_empty());
    }

    #[test]
    fn search_matches_filename_substring() {
        let docs = sample_library();
        let filtered = filter_documents(&docs, "fund_iii", &CategoryFilter::All);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "Fund_III_Q4_Portfolio_Report.pdf");
    }

    #[test]
    fn category_filter_matches_exactly() {
        let docs = sample_library();
        let filtered = filter_documents(
            &docs,
            "",
            &CategoryFilter::Only(CategoryKind::HistoricalDeal),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "TechCorp_Acquisition_2023.pdf");
    }

    #[test]
    fn search_and_category_compose() {
        let docs = sample_library();
        // "saas" matches both TechCorp (tag) and the market analysis, but
        // the category filter narrows to the latter.
        let filtered = filter_documents(
            &docs,
            "saas",
            &CategoryFilter::Only(CategoryKind::MarketResearch),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "SaaS_Market_Analysis_2024.pdf");
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let docs = sample_library();
        for search in ["", "saas", "fintech", "q4", "no-match-anywhere"] {
            let once = filter_documents(&docs, search, &CategoryFilter::All);
            let twice = filter_documents(&once, search, &CategoryFilter::All);
            assert_eq!(once.len(), twice.len(), "search {search:?} shrank twice");
        }
    }

    #[test]
    fn order_is_preserved() {
        let docs = sample_library();
        let filtered = filter_documents(&docs, "pdf", &CategoryFilter::All);
        let names: Vec<_> = filtered.iter().map(|d| d.filename.clone()).collect();
        let expected: Vec<_> = docs.iter().map(|d| d.filename.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn counts_tally_per_category() {
        let counts = category_counts(&sample_library());
        assert_eq!(counts.all, 4);
        assert_eq!(counts.historical_deal, 1);
        assert_eq!(counts.current_opportunity, 1);
        assert_eq!(counts.market_research, 1);
        assert_eq!(counts.portfolio_report, 1);
        assert_eq!(counts.other, 0);
    }

    #[test]
    fn counts_on_empty_library_are_zero() {
        assert_eq!(category_counts(&[]), CategoryCounts::default());
    }
}
