use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{CategoryKind, DealOutcome};
use super::ModelError;

/// A committed workspace document. Never mutated in place — the library
/// only appends (via upload commit) and removes (via delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: NaiveDateTime,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub category: DealCategory,
}

/// Deal category. Only `HistoricalDeal` carries an outcome, so a committed
/// document outside that category cannot hold one.
///
/// Serializes to the flat wire shape the REST backend uses:
/// `{"category": "historical_deal", "deal_outcome": "invested"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum DealCategory {
    HistoricalDeal { deal_outcome: DealOutcome },
    CurrentOpportunity,
    MarketResearch,
    PortfolioReport,
    Other,
}

impl DealCategory {
    /// The flat discriminant used for filtering, grouping, and counts.
    pub fn kind(&self) -> CategoryKind {
        match self {
            Self::HistoricalDeal { .. } => CategoryKind::HistoricalDeal,
            Self::CurrentOpportunity => CategoryKind::CurrentOpportunity,
            Self::MarketResearch => CategoryKind::MarketResearch,
            Self::PortfolioReport => CategoryKind::PortfolioReport,
            Self::Other => CategoryKind::Other,
        }
    }

    /// The recorded outcome, present only for historical deals.
    pub fn outcome(&self) -> Option<&DealOutcome> {
        match self {
            Self::HistoricalDeal { deal_outcome } => Some(deal_outcome),
            _ => None,
        }
    }

    /// Build a category from the flat pre-commit pair, enforcing the
    /// outcome rule: historical deals require an outcome, nothing else may
    /// carry one.
    pub fn from_parts(
        kind: CategoryKind,
        outcome: Option<DealOutcome>,
    ) -> Result<Self, ModelError> {
        match (kind, outcome) {
            (CategoryKind::HistoricalDeal, Some(deal_outcome)) => {
                Ok(Self::HistoricalDeal { deal_outcome })
            }
            (CategoryKind::HistoricalDeal, None) => Err(ModelError::OutcomeRequired),
            (kind, Some(_)) => Err(ModelError::OutcomeNotAllowed {
                category: kind.as_str().into(),
            }),
            (CategoryKind::CurrentOpportunity, None) => Ok(Self::CurrentOpportunity),
            (CategoryKind::MarketResearch, None) => Ok(Self::MarketResearch),
            (CategoryKind::PortfolioReport, None) => Ok(Self::PortfolioReport),
            (CategoryKind::Other, None) => Ok(Self::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn sample_doc(category: DealCategory) -> Document {
        Document {
            id: Uuid::new_v4(),
            filename: "TechCorp_Acquisition_2023.pdf".into(),
            uploaded_at: Local::now().naive_local(),
            tags: vec!["SaaS".into(), "Series B".into()],
            category,
        }
    }

    #[test]
    fn historical_deal_requires_outcome() {
        assert!(matches!(
            DealCategory::from_parts(CategoryKind::HistoricalDeal, None),
            Err(ModelError::OutcomeRequired)
        ));
        let category = DealCategory::from_parts(
            CategoryKind::HistoricalDeal,
            Some(DealOutcome::Invested),
        )
        .unwrap();
        assert_eq!(category.kind(), CategoryKind::HistoricalDeal);
        assert_eq!(category.outcome(), Some(&DealOutcome::Invested));
    }

    #[test]
    fn outcome_rejected_outside_historical_deals() {
        let result =
            DealCategory::from_parts(CategoryKind::MarketResearch, Some(DealOutcome::Passed));
        assert!(matches!(
            result,
            Err(ModelError::OutcomeNotAllowed { .. })
        ));
    }

    #[test]
    fn plain_categories_build_without_outcome() {
        for kind in [
            CategoryKind::CurrentOpportunity,
            CategoryKind::MarketResearch,
            CategoryKind::PortfolioReport,
            CategoryKind::Other,
        ] {
            let category = DealCategory::from_parts(kind.clone(), None).unwrap();
            assert_eq!(category.kind(), kind);
            assert!(category.outcome().is_none());
        }
    }

    #[test]
    fn document_serializes_flat_category() {
        let doc = sample_doc(DealCategory::HistoricalDeal {
            deal_outcome: DealOutcome::Invested,
        });
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["category"], "historical_deal");
        assert_eq!(json["deal_outcome"], "invested");
        assert_eq!(json["filename"], "TechCorp_Acquisition_2023.pdf");
    }

    #[test]
    fn document_without_outcome_serializes_without_field() {
        let doc = sample_doc(DealCategory::MarketResearch);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["category"], "market_research");
        assert!(json.get("deal_outcome").is_none());
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = sample_doc(DealCategory::HistoricalDeal {
            deal_outcome: DealOutcome::Exited,
        });
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.category, doc.category);
        assert_eq!(back.tags, doc.tags);
    }
}
