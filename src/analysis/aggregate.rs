use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::validate::validate_record;
use crate::types::{
    Aggregation, CountryPoint, LineSeriesPoint, OrderRecord, RecordField, RejectedRecord,
    TreemapNode,
};
use crate::utils::{round_currency, round_tenths};

/// Failures the aggregator can surface. Invalid records are not errors; they
/// are reported in [`Aggregation::rejected`].
#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

#[derive(Debug, Default, Clone, Copy)]
struct DailyStat {
    revenue: f64,
    items_sold: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct CategoryStat {
    revenue: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct CountryStat {
    revenue: f64,
    total_delivery_days: f64,
    order_count: u64,
}

impl CountryStat {
    fn avg_delivery_days(&self, country: &str) -> Result<f64, AggregationError> {
        if self.order_count == 0 {
            return Err(AggregationError::InternalInvariantViolation(format!(
                "country bucket {:?} has no orders",
                country
            )));
        }
        Ok(self.total_delivery_days / self.order_count as f64)
    }
}

/// Accumulators keyed by insertion order, so output that is not sorted by
/// key comes out in the order keys were first seen.
#[derive(Debug)]
struct Buckets<S> {
    index: HashMap<String, usize>,
    entries: Vec<(String, S)>,
}

impl<S: Default> Buckets<S> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut S {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), S::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    fn get(&self, key: &str) -> Option<&S> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    fn into_entries(self) -> Vec<(String, S)> {
        self.entries
    }
}

/// Single-pass accumulator over order records.
struct Accumulator {
    daily: BTreeMap<String, DailyStat>,
    categories: Buckets<CategoryStat>,
    countries: Buckets<CountryStat>,
    rejected: Vec<RejectedRecord>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            daily: BTreeMap::new(),
            categories: Buckets::new(),
            countries: Buckets::new(),
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, rejected: RejectedRecord) {
        log::debug!("Skipping {}", rejected);
        self.rejected.push(rejected);
    }

    /// Add a record to its three buckets, or to none of them if it is
    /// invalid or would push a bucket total out of range.
    fn add(&mut self, index: usize, record: &OrderRecord) {
        let checked = match validate_record(index, record) {
            Ok(checked) => checked,
            Err(rejected) => return self.reject(rejected),
        };

        let day = self.daily.get(checked.date).copied().unwrap_or_default();
        let category = self
            .categories
            .get(&record.category)
            .copied()
            .unwrap_or_default();
        let country = self
            .countries
            .get(&record.country)
            .copied()
            .unwrap_or_default();

        let day = DailyStat {
            revenue: day.revenue + checked.revenue,
            items_sold: match day.items_sold.checked_add(checked.units) {
                Some(items_sold) => items_sold,
                None => {
                    return self.reject(RejectedRecord {
                        index,
                        field: RecordField::Quantity,
                        reason: format!("items sold on {} overflow", checked.date),
                    })
                }
            },
        };
        let category = CategoryStat {
            revenue: category.revenue + checked.revenue,
        };
        let country = CountryStat {
            revenue: country.revenue + checked.revenue,
            total_delivery_days: country.total_delivery_days + record.delivery_days,
            order_count: country.order_count + 1,
        };

        if !(day.revenue.is_finite() && category.revenue.is_finite() && country.revenue.is_finite())
        {
            return self.reject(RejectedRecord {
                index,
                field: RecordField::UnitPrice,
                reason: "bucket revenue total is not finite".to_string(),
            });
        }
        if !country.total_delivery_days.is_finite() {
            return self.reject(RejectedRecord {
                index,
                field: RecordField::DeliveryDays,
                reason: format!("delivery days total for {} is not finite", record.country),
            });
        }

        self.daily.insert(checked.date.to_string(), day);
        *self.categories.entry(&record.category) = category;
        *self.countries.entry(&record.country) = country;
    }

    fn finish(self) -> Result<Aggregation, AggregationError> {
        let line_data = self
            .daily
            .into_iter()
            .map(|(date, stat)| LineSeriesPoint {
                date,
                revenue: round_currency(stat.revenue),
                items_sold: stat.items_sold,
            })
            .collect();

        let tree_data = self
            .categories
            .into_entries()
            .into_iter()
            .map(|(name, stat)| TreemapNode {
                name,
                size: round_currency(stat.revenue),
            })
            .collect();

        let mut country_data = self
            .countries
            .into_entries()
            .into_iter()
            .map(|(country, stat)| {
                let avg = stat.avg_delivery_days(&country)?;
                Ok(CountryPoint {
                    country,
                    revenue: round_currency(stat.revenue),
                    avg_delivery_days: round_tenths(avg),
                })
            })
            .collect::<Result<Vec<_>, AggregationError>>()?;
        // Stable sort: equal revenue keeps first-seen order
        country_data.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

        Ok(Aggregation {
            line_data,
            tree_data,
            country_data,
            rejected: self.rejected,
        })
    }
}

/// Aggregate order records into the three dashboard views.
///
/// Records failing validation are skipped and listed in
/// [`Aggregation::rejected`]; every other record lands in exactly one date,
/// category and country bucket. Rounding is applied only to the output.
pub fn aggregate(orders: &[OrderRecord]) -> Result<Aggregation, AggregationError> {
    let mut acc = Accumulator::new();
    for (index, record) in orders.iter().enumerate() {
        acc.add(index, record);
    }
    let aggregation = acc.finish()?;

    log::info!(
        "Aggregated {} orders into {} days, {} categories, {} countries ({} rejected)",
        orders.len(),
        aggregation.line_data.len(),
        aggregation.tree_data.len(),
        aggregation.country_data.len(),
        aggregation.rejected.len()
    );

    Ok(aggregation)
}
