//! # Common Types
//!
//! This module contains the types shared across the crate: the order records
//! and dataset read from disk, the chart-ready points produced by aggregation,
//! and the key used to cache aggregation results.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single order line, the atomic input of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// ISO-8601 date-time; the text before the first `T` is the day key
    pub timestamp: String,
    /// Units sold. Kept as the raw JSON number so a negative or fractional
    /// value rejects only this record instead of the whole dataset.
    pub quantity: Number,
    /// Price per unit in the dataset currency
    pub unit_price: f64,
    /// Product category label
    pub category: String,
    /// Destination country label
    pub country: String,
    /// Elapsed delivery time for this order
    pub delivery_days: f64,
}

impl OrderRecord {
    /// Units sold, if `quantity` is a non-negative integer.
    pub fn units(&self) -> Option<u64> {
        self.quantity.as_u64()
    }

    /// Revenue of this line, `quantity * unit_price`, unrounded. `None` when
    /// the quantity is not a whole unit count.
    pub fn revenue(&self) -> Option<f64> {
        self.units().map(|units| units as f64 * self.unit_price)
    }
}

// Floats are hashed by bit pattern; two records hash equal only when every
// field is bitwise identical.
impl Hash for OrderRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
        self.quantity.hash(state);
        self.unit_price.to_bits().hash(state);
        self.category.hash(state);
        self.country.hash(state);
        self.delivery_days.to_bits().hash(state);
    }
}

/// Metadata shipped alongside the orders. Passed through for display only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub currency: String,
    pub generated_at: String,
}

/// A full dataset as stored on disk: metadata plus the order lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub meta: DatasetMeta,
    pub orders: Vec<OrderRecord>,
}

/// One point of the daily revenue line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeriesPoint {
    /// Day key, `YYYY-MM-DD`
    pub date: String,
    /// Revenue for the day, rounded to 2 decimals
    pub revenue: f64,
    /// Units sold that day
    pub items_sold: u64,
}

/// One tile of the revenue-by-category treemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapNode {
    /// Category label
    pub name: String,
    /// Category revenue, rounded to 2 decimals
    pub size: f64,
}

/// One bar/line pair of the country comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPoint {
    pub country: String,
    /// Country revenue, rounded to 2 decimals
    pub revenue: f64,
    /// Mean delivery time, rounded to 1 decimal
    pub avg_delivery_days: f64,
}

/// The record field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Timestamp,
    Quantity,
    UnitPrice,
    Category,
    Country,
    DeliveryDays,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::Timestamp => "timestamp",
            RecordField::Quantity => "quantity",
            RecordField::UnitPrice => "unitPrice",
            RecordField::Category => "category",
            RecordField::Country => "country",
            RecordField::DeliveryDays => "deliveryDays",
        };
        f.write_str(name)
    }
}

/// An input record refused by validation, identified by its position in the
/// input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub field: RecordField,
    pub reason: String,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: invalid {}: {}", self.index, self.field, self.reason)
    }
}

/// The three chart-ready sequences produced from one set of orders, plus the
/// records that were left out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Daily points, ascending by date
    pub line_data: Vec<LineSeriesPoint>,
    /// Category tiles, in the order categories first appear
    pub tree_data: Vec<TreemapNode>,
    /// Country points, descending by revenue
    pub country_data: Vec<CountryPoint>,
    /// Records skipped because they failed validation
    pub rejected: Vec<RejectedRecord>,
}

impl Aggregation {
    /// True when no chart has anything to show.
    pub fn is_empty(&self) -> bool {
        self.line_data.is_empty() && self.tree_data.is_empty() && self.country_data.is_empty()
    }
}

/// What the renderer receives: pass-through metadata and the aggregated views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    pub meta: DatasetMeta,
    #[serde(flatten)]
    pub aggregation: Aggregation,
}

/// A key used for caching aggregation results by input content.
///
/// Two order slices map to the same key when they have the same length and
/// the same content hash.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct CacheKey {
    /// Number of records hashed
    pub record_count: usize,
    /// Hash of every record, in order
    pub content_hash: u64,
}

impl CacheKey {
    /// Build the key for a slice of orders.
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        orders.hash(&mut hasher);
        Self {
            record_count: orders.len(),
            content_hash: hasher.finish(),
        }
    }
}
