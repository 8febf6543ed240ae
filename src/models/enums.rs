use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(CategoryKind {
    HistoricalDeal => "historical_deal",
    CurrentOpportunity => "current_opportunity",
    MarketResearch => "market_research",
    PortfolioReport => "portfolio_report",
    Other => "other",
});

str_enum!(DealOutcome {
    Invested => "invested",
    Passed => "passed",
    Exited => "exited",
});

str_enum!(MessageRole {
    User => "user",
    Assistant => "assistant",
});

str_enum!(AnalysisMode {
    DocumentSearch => "document_search",
    InvestmentAnalysis => "investment_analysis",
});

str_enum!(Page {
    Upload => "upload",
    Analysis => "analysis",
    Documents => "documents",
});
