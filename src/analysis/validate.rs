use chrono::NaiveDate;

use crate::types::{OrderRecord, RecordField, RejectedRecord};

/// Extract the day key of a timestamp: the text before the first `T`.
///
/// Returns `None` when there is no `T` or the prefix is not a calendar date
/// in `YYYY-MM-DD` form.
pub fn date_key(timestamp: &str) -> Option<&str> {
    let (date, _) = timestamp.split_once('T')?;
    // Reject prefixes like "2024-1-1" that parse but would not sort lexically
    if date.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(date)
}

/// The parts of a record the aggregator needs, extracted once by validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedRecord<'a> {
    pub date: &'a str,
    pub units: u64,
    pub revenue: f64,
}

/// Check a record before it is bucketed.
pub fn validate_record(
    index: usize,
    record: &OrderRecord,
) -> Result<CheckedRecord<'_>, RejectedRecord> {
    let reject = |field: RecordField, reason: String| RejectedRecord {
        index,
        field,
        reason,
    };

    let date = date_key(&record.timestamp).ok_or_else(|| {
        reject(
            RecordField::Timestamp,
            format!("no YYYY-MM-DD date before 'T' in {:?}", record.timestamp),
        )
    })?;

    let units = record.units().ok_or_else(|| {
        reject(
            RecordField::Quantity,
            format!("{} is not a non-negative whole number", record.quantity),
        )
    })?;

    check_amount(record.unit_price).map_err(|reason| reject(RecordField::UnitPrice, reason))?;
    check_amount(record.delivery_days)
        .map_err(|reason| reject(RecordField::DeliveryDays, reason))?;

    if record.category.trim().is_empty() {
        return Err(reject(RecordField::Category, "empty label".to_string()));
    }
    if record.country.trim().is_empty() {
        return Err(reject(RecordField::Country, "empty label".to_string()));
    }

    let revenue = units as f64 * record.unit_price;
    if !revenue.is_finite() {
        return Err(reject(
            RecordField::UnitPrice,
            format!("revenue {} x {} is not finite", units, record.unit_price),
        ));
    }

    Ok(CheckedRecord {
        date,
        units,
        revenue,
    })
}

fn check_amount(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        Err(format!("{} is not finite", value))
    } else if value < 0.0 {
        Err(format!("{} is negative", value))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> OrderRecord {
        OrderRecord {
            timestamp: "2024-03-05T08:15:00Z".to_string(),
            quantity: 3.into(),
            unit_price: 12.5,
            category: "Books".to_string(),
            country: "DE".to_string(),
            delivery_days: 2.0,
        }
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key("2024-03-05T08:15:00Z"), Some("2024-03-05"));
        assert_eq!(date_key("2024-03-05T"), Some("2024-03-05"));
        assert_eq!(date_key("2024-03-05 08:15:00"), None);
        assert_eq!(date_key("2024-02-30T00:00:00Z"), None);
        assert_eq!(date_key("2024-3-5T00:00:00Z"), None);
        assert_eq!(date_key(""), None);
    }

    #[test]
    fn test_valid_record() {
        let record = record();
        assert_eq!(
            validate_record(0, &record),
            Ok(CheckedRecord {
                date: "2024-03-05",
                units: 3,
                revenue: 37.5,
            })
        );
    }

    #[test]
    fn test_missing_separator() {
        let mut record = record();
        record.timestamp = "2024-03-05".to_string();

        let rejected = validate_record(4, &record).unwrap_err();
        assert_eq!(rejected.index, 4);
        assert_eq!(rejected.field, RecordField::Timestamp);
    }

    #[test]
    fn test_bad_amounts() {
        let mut record = record();
        record.unit_price = -1.0;
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::UnitPrice
        );

        let mut record = self::record();
        record.delivery_days = f64::NAN;
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::DeliveryDays
        );

        let mut record = self::record();
        record.unit_price = f64::INFINITY;
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::UnitPrice
        );
    }

    #[test]
    fn test_quantity_must_be_whole_and_non_negative() {
        let mut record = record();
        record.quantity = (-1).into();
        let rejected = validate_record(2, &record).unwrap_err();
        assert_eq!(rejected.index, 2);
        assert_eq!(rejected.field, RecordField::Quantity);

        let mut record = self::record();
        record.quantity = serde_json::Number::from_f64(1.5).unwrap();
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::Quantity
        );
    }

    #[test]
    fn test_revenue_overflow() {
        let mut record = record();
        record.quantity = u64::MAX.into();
        record.unit_price = f64::MAX;

        let rejected = validate_record(1, &record).unwrap_err();
        assert_eq!(rejected.field, RecordField::UnitPrice);
        assert!(rejected.reason.contains("not finite"));
    }

    #[test]
    fn test_empty_labels() {
        let mut record = record();
        record.category = "  ".to_string();
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::Category
        );

        let mut record = self::record();
        record.country = String::new();
        assert_eq!(
            validate_record(0, &record).unwrap_err().field,
            RecordField::Country
        );
    }
}
