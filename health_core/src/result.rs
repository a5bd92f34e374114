//! # Result Bundle
//!
//! The standardized output every calculator returns to the UI layer:
//!
//! ```text
//! ResultBundle
//! ├── values:    id -> raw number | string | null
//! ├── formatted: id -> display string ("" when hidden by a toggle)
//! ├── summary:   templated sentence
//! ├── isValid:   false => every other field is empty
//! └── metadata?: { tableData?: rows, chartData?: points }
//! ```
//!
//! Pipelines assemble bundles through [`ResultBuilder`], which records a
//! [`DerivedMetric`] per output id. A hidden metric still carries its raw
//! value; only its display string is blanked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw value of a derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(f64),
    Text(String),
    Null,
}

impl ResultValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ResultValue::Null)
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        ResultValue::Number(value)
    }
}

impl From<i64> for ResultValue {
    fn from(value: i64) -> Self {
        ResultValue::Number(value as f64)
    }
}

impl From<String> for ResultValue {
    fn from(value: String) -> Self {
        ResultValue::Text(value)
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        ResultValue::Text(value.to_string())
    }
}

impl<T: Into<ResultValue>> From<Option<T>> for ResultValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ResultValue::Null)
    }
}

/// One derived output: raw value, display string and visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub id: String,
    pub value: ResultValue,
    pub display: String,
    pub visible: bool,
}

impl DerivedMetric {
    /// Display string as published: blank when hidden or when the value is null
    pub fn formatted(&self) -> &str {
        if self.visible && !self.value.is_null() {
            &self.display
        } else {
            ""
        }
    }
}

/// Meal plan row (macro calculator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRow {
    pub meal: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Protein food suggestion row (protein calculator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRow {
    pub food: String,
    pub serving: String,
    pub protein_per_serving: f64,
    pub servings_per_day: f64,
}

/// Prenatal milestone row (due-date calculator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRow {
    pub week: u32,
    pub date: String,
    pub milestone: String,
    pub description: String,
}

/// A table row handed verbatim to the table renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableRow {
    Meal(MealRow),
    Food(FoodRow),
    Milestone(MilestoneRow),
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesPoint {
    pub category: String,
    pub value: f64,
}

impl ChartSeriesPoint {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        ChartSeriesPoint {
            category: category.into(),
            value,
        }
    }
}

/// Auxiliary table/chart data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<TableRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartSeriesPoint>>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.table_data.is_none() && self.chart_data.is_none()
    }
}

/// Output contract of every calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "values": { "dailyCalories": 2150.0, "bmrFormula": "mifflinStJeor" },
///   "formatted": { "dailyCalories": "2,150 kcal", "bmrFormula": "Mifflin-St Jeor" },
///   "summary": "Eat 2,150 kcal per day: ...",
///   "isValid": true,
///   "metadata": { "chartData": [ { "category": "Protein", "value": 645.0 } ] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    pub values: BTreeMap<String, ResultValue>,
    pub formatted: BTreeMap<String, String>,
    pub summary: String,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ResultBundle {
    /// The invalid bundle: flag false, everything else empty.
    pub fn invalid() -> Self {
        ResultBundle::default()
    }

    pub fn value(&self, id: &str) -> Option<&ResultValue> {
        self.values.get(id)
    }

    /// Numeric value for `id`, if present and numeric
    pub fn number(&self, id: &str) -> Option<f64> {
        self.values.get(id).and_then(ResultValue::as_f64)
    }

    /// Text value for `id`, if present and textual
    pub fn text(&self, id: &str) -> Option<&str> {
        self.values.get(id).and_then(ResultValue::as_str)
    }

    /// Display string for `id` ("" when absent or hidden)
    pub fn display(&self, id: &str) -> &str {
        self.formatted.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn table_data(&self) -> &[TableRow] {
        self.metadata
            .as_ref()
            .and_then(|m| m.table_data.as_deref())
            .unwrap_or(&[])
    }

    pub fn chart_data(&self) -> &[ChartSeriesPoint] {
        self.metadata
            .as_ref()
            .and_then(|m| m.chart_data.as_deref())
            .unwrap_or(&[])
    }
}

/// Collects metrics and auxiliary data for one bundle.
#[derive(Debug, Default)]
pub struct ResultBuilder {
    metrics: Vec<DerivedMetric>,
    metadata: Metadata,
}

impl ResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visible metric
    pub fn metric(&mut self, id: &str, value: impl Into<ResultValue>, display: impl Into<String>) -> &mut Self {
        self.metric_if(id, value, display, true)
    }

    /// Record a metric whose display depends on a toggle.
    ///
    /// The raw value is stored either way.
    pub fn metric_if(
        &mut self,
        id: &str,
        value: impl Into<ResultValue>,
        display: impl Into<String>,
        visible: bool,
    ) -> &mut Self {
        self.metrics.push(DerivedMetric {
            id: id.to_string(),
            value: value.into(),
            display: display.into(),
            visible,
        });
        self
    }

    pub fn table(&mut self, rows: Vec<TableRow>) -> &mut Self {
        self.metadata.table_data = Some(rows);
        self
    }

    pub fn chart(&mut self, points: Vec<ChartSeriesPoint>) -> &mut Self {
        self.metadata.chart_data = Some(points);
        self
    }

    /// Finish the bundle with its summary sentence
    pub fn build(self, summary: String) -> ResultBundle {
        let mut values = BTreeMap::new();
        let mut formatted = BTreeMap::new();
        for metric in self.metrics {
            formatted.insert(metric.id.clone(), metric.formatted().to_string());
            values.insert(metric.id, metric.value);
        }
        ResultBundle {
            values,
            formatted,
            summary,
            is_valid: true,
            metadata: if self.metadata.is_empty() {
                None
            } else {
                Some(self.metadata)
            },
        }
    }
}
