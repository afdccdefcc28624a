//! Rendering of lookup results as light markup.
//!
//! Output uses a small markup subset: `####` headers, `**bold**`, `` `code` ``
//! and `---` rules, with blank lines between blocks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use prazos_models::{ForecastValue, LookupMatch};
use std::path::Path;

use crate::config::ForecastConfig;

pub const ENTRY_DIVIDER: &str = "\n\n---\n\n";
pub const MISSING_FORECAST: &str = "N/A";

pub const PROCESSING_ERROR_MESSAGE: &str = "❌ **ERRO AO PROCESSAR:**\n\nNão foi possível ler a planilha. Verifique se alguma aba está com o nome errado ou se o arquivo não está corrompido.";
pub const EMPTY_QUERY_MESSAGE: &str = "Por favor, digite um número de pedido antes de buscar.";

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Three decimals, comma as decimal separator.
pub fn format_quantity(quantity: f64) -> String {
    format!("{:.3}", quantity).replace('.', ",")
}

/// The first weekday after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next = next + Duration::days(1);
    }
    next
}

pub fn format_forecast(forecast: &ForecastValue, options: &ForecastConfig, today: NaiveDate) -> String {
    match forecast {
        ForecastValue::Date(date) if options.today_as_range && *date == today => format!(
            "Entre hoje ({}) e o próximo dia útil ({})",
            format_date(today),
            format_date(next_business_day(today))
        ),
        ForecastValue::Date(date) => format_date(*date),
        ForecastValue::Raw(raw) => raw.clone(),
        ForecastValue::Missing => MISSING_FORECAST.to_string(),
    }
}

pub fn format_entry(entry: &LookupMatch, options: &ForecastConfig, today: NaiveDate) -> String {
    format!(
        "**Máquina/Processo:** {}\n\n**Produto:** {} – {} tons\n\n**Previsão de Produção:** {}",
        entry.tab.label(),
        entry.product,
        format_quantity(entry.quantity),
        format_forecast(&entry.forecast, options, today)
    )
}

/// Echoes the query exactly as typed.
pub fn not_found_message(raw_query: &str) -> String {
    format!(
        "❌ **Pedido `{}` não encontrado.**\n\nVerifique o número digitado ou se o pedido já foi programado.",
        raw_query
    )
}

pub fn source_not_found_message(path: &Path) -> String {
    format!(
        "❌ **ERRO CRÍTICO:**\n\nA planilha de pedidos (`{}`) não foi encontrada. Certifique-se de que o arquivo foi publicado junto com a aplicação.",
        path.display()
    )
}

/// Side-channel text for operators, optionally shown next to the generic message.
pub fn technical_error_message(detail: &str) -> String {
    format!("Ocorreu um erro técnico inesperado ao ler a planilha: {}", detail)
}

/// Render the matches of a query. `raw_query` is the user's input as typed.
pub fn render_matches(
    raw_query: &str,
    matches: &[LookupMatch],
    options: &ForecastConfig,
    today: NaiveDate,
) -> String {
    let trimmed = raw_query.trim();
    let entries: Vec<String> = matches
        .iter()
        .map(|m| format_entry(m, options, today))
        .collect();

    match entries.as_slice() {
        [] => not_found_message(raw_query),
        [single] => format!("#### ➡️ Pedido `{}`{}{}", trimmed, ENTRY_DIVIDER, single),
        many => format!(
            "#### ➡️ O pedido `{}` possui múltiplos itens:{}{}",
            trimmed,
            ENTRY_DIVIDER,
            many.join(ENTRY_DIVIDER)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prazos_models::WorksheetTab;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chapa(tab: WorksheetTab) -> LookupMatch {
        LookupMatch {
            tab,
            product: "Chapa A".to_string(),
            quantity: 3.5,
            forecast: ForecastValue::Date(day(2024, 5, 10)),
        }
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.5), "3,500");
        assert_eq!(format_quantity(0.0), "0,000");
        assert_eq!(format_quantity(12.34567), "12,346");
        assert_eq!(format_quantity(1500.0), "1500,000");
    }

    #[test]
    fn test_next_business_day() {
        // 2024-05-10 is a Friday
        assert_eq!(next_business_day(day(2024, 5, 10)), day(2024, 5, 13));
        assert_eq!(next_business_day(day(2024, 5, 11)), day(2024, 5, 13));
        assert_eq!(next_business_day(day(2024, 5, 13)), day(2024, 5, 14));
    }

    #[test]
    fn test_forecast_today_variant() {
        let today = day(2024, 5, 10);
        let forecast = ForecastValue::Date(today);

        let plain = ForecastConfig::default();
        assert_eq!(format_forecast(&forecast, &plain, today), "10/05/2024");

        let ranged = ForecastConfig { today_as_range: true };
        assert_eq!(
            format_forecast(&forecast, &ranged, today),
            "Entre hoje (10/05/2024) e o próximo dia útil (13/05/2024)"
        );
        assert_eq!(format_forecast(&forecast, &ranged, day(2024, 5, 9)), "10/05/2024");
    }

    #[test]
    fn test_forecast_raw_and_missing() {
        let options = ForecastConfig::default();
        let today = day(2024, 1, 1);
        assert_eq!(format_forecast(&ForecastValue::Raw("TBD".into()), &options, today), "TBD");
        assert_eq!(format_forecast(&ForecastValue::Missing, &options, today), "N/A");
    }

    #[test]
    fn test_single_entry() {
        let text = render_matches(" 42 ", &[chapa(WorksheetTab::Fagor)], &ForecastConfig::default(), day(2024, 1, 1));
        assert_eq!(
            text,
            "#### ➡️ Pedido `42`\n\n---\n\n**Máquina/Processo:** Fagor\n\n**Produto:** Chapa A – 3,500 tons\n\n**Previsão de Produção:** 10/05/2024"
        );
    }

    #[test]
    fn test_multiple_entries_in_order() {
        let text = render_matches(
            "42",
            &[chapa(WorksheetTab::Fagor), chapa(WorksheetTab::DivimecSlitter)],
            &ForecastConfig::default(),
            day(2024, 1, 1),
        );

        assert!(text.starts_with("#### ➡️ O pedido `42` possui múltiplos itens:\n\n---\n\n"));
        let fagor = text.find("Fagor").unwrap();
        let slitter = text.find("Divimec (Slitter)").unwrap();
        assert!(fagor < slitter);
        assert_eq!(text.matches(ENTRY_DIVIDER).count(), 2);
    }

    #[test]
    fn test_not_found_echoes_raw_query() {
        let text = render_matches("9999", &[], &ForecastConfig::default(), day(2024, 1, 1));
        assert_eq!(text, not_found_message("9999"));
        assert!(text.contains("`9999`"));
    }
}
