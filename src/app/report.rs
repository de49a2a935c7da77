use std::fmt::{self, Write};

use crate::types::Dashboard;

const WIDTH: usize = 64;

/// Render a dashboard as a plain-text summary.
///
/// Shows the header line, the three views as tables and any rejected
/// records. `top_countries` limits the country table.
pub fn render_summary(dashboard: &Dashboard, top_countries: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_summary(&mut out, dashboard, top_countries)?;
    Ok(out)
}

fn write_summary(
    out: &mut impl Write,
    dashboard: &Dashboard,
    top_countries: usize,
) -> fmt::Result {
    let meta = &dashboard.meta;
    let views = &dashboard.aggregation;
    let currency = meta.currency.as_str();

    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out, "Sales Analytics")?;
    writeln!(
        out,
        "Currency: {} | Last Updated: {}",
        meta.currency, meta.generated_at
    )?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;

    if views.is_empty() {
        writeln!(out, "No orders to display")?;
    } else {
        writeln!(out, "\nDaily Revenue")?;
        writeln!(out, "{:<12} {:>16} {:>12}", "Date", "Revenue", "Items Sold")?;
        writeln!(out, "{}", "-".repeat(WIDTH))?;
        for point in &views.line_data {
            writeln!(
                out,
                "{:<12} {:>12.2} {:<3} {:>12}",
                point.date, point.revenue, currency, point.items_sold
            )?;
        }

        let total: f64 = views.tree_data.iter().map(|node| node.size).sum();
        writeln!(out, "\nRevenue by Category")?;
        writeln!(out, "{:<24} {:>16} {:>8}", "Category", "Revenue", "Share")?;
        writeln!(out, "{}", "-".repeat(WIDTH))?;
        for node in &views.tree_data {
            let share = if total > 0.0 { node.size / total * 100.0 } else { 0.0 };
            writeln!(
                out,
                "{:<24} {:>12.2} {:<3} {:>7.1}%",
                node.name, node.size, currency, share
            )?;
        }

        writeln!(out, "\nMarket Performance by Country")?;
        writeln!(out, "{:<16} {:>16} {:>20}", "Country", "Revenue", "Avg Delivery (Days)")?;
        writeln!(out, "{}", "-".repeat(WIDTH))?;
        for point in views.country_data.iter().take(top_countries) {
            writeln!(
                out,
                "{:<16} {:>12.2} {:<3} {:>20.1}",
                point.country, point.revenue, currency, point.avg_delivery_days
            )?;
        }
        if views.country_data.len() > top_countries {
            writeln!(
                out,
                "... {} more countries",
                views.country_data.len() - top_countries
            )?;
        }
    }

    if !views.rejected.is_empty() {
        writeln!(out, "\nRejected Records ({})", views.rejected.len())?;
        writeln!(out, "{}", "-".repeat(WIDTH))?;
        for rejected in &views.rejected {
            writeln!(out, "{}", rejected)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Aggregation, CountryPoint, DatasetMeta, LineSeriesPoint, RecordField, RejectedRecord,
        TreemapNode,
    };

    fn dashboard() -> Dashboard {
        Dashboard {
            meta: DatasetMeta {
                currency: "EUR".to_string(),
                generated_at: "2024-06-01T08:00:00Z".to_string(),
            },
            aggregation: Aggregation {
                line_data: vec![LineSeriesPoint {
                    date: "2024-01-01".to_string(),
                    revenue: 25.0,
                    items_sold: 3,
                }],
                tree_data: vec![
                    TreemapNode {
                        name: "A".to_string(),
                        size: 20.0,
                    },
                    TreemapNode {
                        name: "B".to_string(),
                        size: 5.0,
                    },
                ],
                country_data: vec![
                    CountryPoint {
                        country: "FR".to_string(),
                        revenue: 20.0,
                        avg_delivery_days: 4.0,
                    },
                    CountryPoint {
                        country: "DE".to_string(),
                        revenue: 5.0,
                        avg_delivery_days: 2.5,
                    },
                ],
                rejected: vec![RejectedRecord {
                    index: 7,
                    field: RecordField::Timestamp,
                    reason: "missing date".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_summary_contents() {
        let summary = render_summary(&dashboard(), 10).unwrap();

        assert!(summary.contains("Currency: EUR | Last Updated: 2024-06-01T08:00:00Z"));
        assert!(summary.contains("2024-01-01"));
        assert!(summary.contains("25.00 EUR"));
        assert!(summary.contains("80.0%"));
        assert!(summary.contains("record 7: invalid timestamp: missing date"));
    }

    #[test]
    fn test_country_limit() {
        let summary = render_summary(&dashboard(), 1).unwrap();

        assert!(summary.contains("FR"));
        assert!(!summary.contains("DE "));
        assert!(summary.contains("... 1 more countries"));
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = render_summary(&Dashboard::default(), 10).unwrap();
        assert!(summary.contains("No orders to display"));
        assert!(!summary.contains("Rejected"));
    }

    /// A sink that refuses every write.
    struct FullSink;

    impl Write for FullSink {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        assert_eq!(write_summary(&mut FullSink, &dashboard(), 10), Err(fmt::Error));
        assert!(render_summary(&dashboard(), 10).is_ok());
    }
}
