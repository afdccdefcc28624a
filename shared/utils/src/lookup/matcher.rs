//! Cell coercion and query normalization.
//!
//! Order numbers are compared as integer text: the query has its leading zeros
//! stripped and every order-number cell is coerced to the text of an integer,
//! with anything non-numeric collapsing to `"0"`.

use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use prazos_models::ForecastValue;

// Day-first forms are tried before year-first ones with the same separator.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Trim whitespace and strip leading zeros.
///
/// An all-zero or blank query normalizes to `""`, which no coerced cell equals.
pub fn normalize_query(query: &str) -> String {
    query.trim().trim_start_matches('0').to_string()
}

/// Coerce an order-number cell to integer text.
pub fn coerce_order_number(cell: &Data) -> String {
    let value = match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) => truncate(*f),
        Data::Bool(b) => Some(i64::from(*b)),
        Data::String(s) => parse_integer_text(s),
        _ => None,
    };

    value.unwrap_or(0).to_string()
}

fn truncate(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

fn parse_integer_text(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate))
}

/// Read a quantity cell. Text accepts either `.` or `,` as decimal separator.
pub fn cell_quantity(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::String(s) => s.trim().replace(',', ".").parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a text cell. Blank cells are `None`.
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        other => other.to_string(),
    };

    (!text.is_empty()).then_some(text)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Interpret a forecast cell.
///
/// Date cells and date-like text become [`ForecastValue::Date`]; anything else
/// is kept verbatim.
pub fn cell_forecast(cell: &Data) -> ForecastValue {
    match cell {
        Data::Empty => ForecastValue::Missing,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => ForecastValue::Date(datetime.date()),
            None => ForecastValue::Raw(cell.to_string()),
        },
        Data::DateTimeIso(s) | Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                ForecastValue::Missing
            } else {
                parse_date_text(trimmed)
                    .map(ForecastValue::Date)
                    .unwrap_or_else(|| ForecastValue::Raw(trimmed.to_string()))
            }
        }
        other => match cell_text(other) {
            Some(text) => ForecastValue::Raw(text),
            None => ForecastValue::Missing,
        },
    }
}

/// Parse the date forms found in the `Prazo` column.
///
/// Timestamps carrying an offset keep the calendar date of their own offset.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_local().date());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  00042 "), "42");
        assert_eq!(normalize_query("42"), "42");
        assert_eq!(normalize_query("4200"), "4200");
        assert_eq!(normalize_query("000"), "");
        assert_eq!(normalize_query("   "), "");
        assert_eq!(normalize_query("0A12"), "A12");
    }

    #[test]
    fn test_coerce_order_number() {
        assert_eq!(coerce_order_number(&Data::Float(42.0)), "42");
        assert_eq!(coerce_order_number(&Data::Float(42.9)), "42");
        assert_eq!(coerce_order_number(&Data::Int(7)), "7");
        assert_eq!(coerce_order_number(&Data::String(" 00042 ".into())), "42");
        assert_eq!(coerce_order_number(&Data::String("42.0".into())), "42");
        assert_eq!(coerce_order_number(&Data::String("PED-42".into())), "0");
        assert_eq!(coerce_order_number(&Data::String("nan".into())), "0");
        assert_eq!(coerce_order_number(&Data::Empty), "0");
        assert_eq!(coerce_order_number(&Data::Bool(true)), "1");
        assert_eq!(coerce_order_number(&Data::Float(f64::NAN)), "0");
    }

    #[test]
    fn test_cell_quantity() {
        assert_eq!(cell_quantity(&Data::Float(3.5)), Some(3.5));
        assert_eq!(cell_quantity(&Data::Int(2)), Some(2.0));
        assert_eq!(cell_quantity(&Data::String("1,25".into())), Some(1.25));
        assert_eq!(cell_quantity(&Data::String("muito".into())), None);
        assert_eq!(cell_quantity(&Data::Empty), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::String("  Chapa A ".into())), Some("Chapa A".to_string()));
        assert_eq!(cell_text(&Data::String("   ".into())), None);
        assert_eq!(cell_text(&Data::Float(1200.0)), Some("1200".to_string()));
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn test_cell_forecast() {
        let may_10 = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        assert_eq!(cell_forecast(&Data::String("2024-05-10".into())), ForecastValue::Date(may_10));
        assert_eq!(cell_forecast(&Data::String("10/05/2024".into())), ForecastValue::Date(may_10));
        assert_eq!(
            cell_forecast(&Data::DateTimeIso("2024-05-10T08:30:00".into())),
            ForecastValue::Date(may_10)
        );
        for text in [
            "2024/05/10",
            "10-05-2024",
            "10.05.2024",
            "2024-05-10 08:30",
            "2024-05-10 08:30:15",
            "2024-05-10 08:30:15.250",
            "10/05/2024 08:30",
            "10/05/2024 08:30:15",
            "2024-05-10T08:30",
            "2024-05-10T08:30:00Z",
            "2024-05-10T23:30:00-03:00",
        ] {
            assert_eq!(cell_forecast(&Data::String(text.into())), ForecastValue::Date(may_10), "{}", text);
        }
        assert_eq!(
            cell_forecast(&Data::DateTimeIso("2024-05-10T08:30:00.000Z".into())),
            ForecastValue::Date(may_10)
        );
        assert_eq!(cell_forecast(&Data::String("TBD".into())), ForecastValue::Raw("TBD".into()));
        assert_eq!(
            cell_forecast(&Data::String("31/02/2024".into())),
            ForecastValue::Raw("31/02/2024".into())
        );
        assert_eq!(cell_forecast(&Data::Float(45422.0)), ForecastValue::Raw("45422".into()));
        assert_eq!(cell_forecast(&Data::Empty), ForecastValue::Missing);
        assert_eq!(cell_forecast(&Data::String(" ".into())), ForecastValue::Missing);
    }

    proptest! {
        #[test]
        fn prop_leading_zeros_do_not_change_query(n in 1u64..10_000_000, zeros in 0usize..6) {
            let padded = format!("{}{}", "0".repeat(zeros), n);
            prop_assert_eq!(normalize_query(&padded), normalize_query(&n.to_string()));
            prop_assert_eq!(normalize_query(&padded), n.to_string());
        }

        #[test]
        fn prop_numeric_cells_match_their_query(n in 1i64..10_000_000) {
            let query = normalize_query(&format!("000{}", n));
            prop_assert_eq!(coerce_order_number(&Data::Float(n as f64)), query.clone());
            prop_assert_eq!(coerce_order_number(&Data::Int(n)), query);
        }
    }
}
