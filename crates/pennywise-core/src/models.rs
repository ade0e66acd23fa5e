//! Domain models for Pennywise

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Expense categories
///
/// The set is closed: budget goals, classifier output and stored expenses all
/// draw from these seven values. Declaration order is the iteration order for
/// every `BTreeMap<Category, _>` returned by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Shopping,
        Self::Utilities,
        Self::Healthcare,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Parse a category read back from storage, mapping unknown values to `Other`
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }

    /// Default share of salary for each category, in percent
    pub fn default_budget_percentage(&self) -> f64 {
        match self {
            Self::Food => 20.0,
            Self::Other => 30.0,
            _ => 10.0,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transportation" | "transport" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "utilities" => Ok(Self::Utilities),
            "healthcare" => Ok(Self::Healthcare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A calendar month, used as the grouping key for monthly aggregation
///
/// Ordering is chronological (year, then month). The string form is `YYYY-MM`,
/// which is also how the value serializes in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month key: {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month key: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in month key: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    /// Classifier confidence at insert time (0.0 - 1.0)
    pub confidence: f64,
}

/// New expense to insert
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub confidence: f64,
}

impl NewExpense {
    /// Confidence recorded when the caller doesn't supply one
    pub const DEFAULT_CONFIDENCE: f64 = 0.8;

    pub fn new(description: impl Into<String>, amount: f64, category: Category) -> Self {
        Self {
            description: description.into(),
            amount,
            category,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Check the invariants the store relies on
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidData("Description is required".to_string()));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(
                "Amount must be a non-negative number".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::InvalidData(
                "Confidence must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Monthly spending, keyed by month then category
pub type MonthlySpending = BTreeMap<YearMonth, BTreeMap<Category, f64>>;

/// Spending totals across all expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category_totals: BTreeMap<Category, f64>,
    pub total_spending: f64,
}

/// Budget status for a category in the current month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OverBudget,
    Warning,
    OnTrack,
    /// Used by the monthly summary row
    Info,
}

impl BudgetStatus {
    /// Classify a spend-to-limit percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            Self::OverBudget
        } else if percentage > 80.0 {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverBudget => "over-budget",
            Self::Warning => "warning",
            Self::OnTrack => "on-track",
            Self::Info => "info",
        }
    }
}

/// One row of the budget suggestions report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSuggestion {
    /// Category name, or "Monthly Summary" for the trailing summary row
    pub category: String,
    pub budget_limit: f64,
    pub current_spending: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
    pub suggestion: String,
}

/// Direction of spending between two months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Compare a later total against an earlier one
    pub fn between(earlier: f64, later: f64) -> Self {
        if later > earlier {
            Self::Increasing
        } else if later < earlier {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Trend label reported by the next-month prediction endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionTrend {
    Increasing,
    Decreasing,
    Stable,
    #[serde(rename = "Insufficient data")]
    InsufficientData,
}

impl From<Trend> for PredictionTrend {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Increasing => Self::Increasing,
            Trend::Decreasing => Self::Decreasing,
            Trend::Stable => Self::Stable,
        }
    }
}

/// Confidence of the next-month prediction
///
/// Numeric when there is too little history, a percentage label otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionConfidence {
    Score(f64),
    Label(String),
}

/// Next-month prediction from the last three months of totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextMonthPrediction {
    pub predicted_amount: f64,
    pub confidence: PredictionConfidence,
    pub trend: PredictionTrend,
}

/// Confidence of the rolling forecast, driven by how many months it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastConfidence {
    High,
    Medium,
    Low,
}

impl ForecastConfidence {
    pub fn from_month_count(months: usize) -> Self {
        if months >= 6 {
            Self::High
        } else if months >= 3 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Rolling-average forecast over up to six trailing months
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RollingForecast {
    /// No expenses at all
    Insufficient {
        predicted_amount: f64,
        prediction: String,
    },
    Forecast {
        predicted_amount: f64,
        confidence: ForecastConfidence,
        trend: Trend,
        months_used: Vec<YearMonth>,
        monthly_sums: BTreeMap<YearMonth, f64>,
    },
}

impl RollingForecast {
    pub fn predicted_amount(&self) -> f64 {
        match self {
            Self::Insufficient {
                predicted_amount, ..
            }
            | Self::Forecast {
                predicted_amount, ..
            } => *predicted_amount,
        }
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
