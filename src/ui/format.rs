use std::sync::OnceLock;

use chrono::NaiveDate;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_decimal::DecimalFormatter;
use icu_locale_core::locale;

/// `MM/DD/YYYY`, or `N/A` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => "N/A".to_string(),
    }
}

fn formatter() -> Option<&'static DecimalFormatter> {
    static FORMATTER: OnceLock<Option<DecimalFormatter>> = OnceLock::new();
    FORMATTER
        .get_or_init(|| {
            DecimalFormatter::try_new(locale!("en-US").into(), DecimalFormatterOptions::default())
                .map_err(|err| tracing::warn!("no en-US decimal formatter: {err}"))
                .ok()
        })
        .as_ref()
}

/// Dollar amount with en-US digit grouping and at most three decimals.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let plain = format!("{:.3}", amount.abs());
    let plain = plain.trim_end_matches('0').trim_end_matches('.');

    let grouped = formatter()
        .zip(plain.parse::<Decimal>().ok())
        .map(|(formatter, decimal)| formatter.format(&decimal).to_string())
        .unwrap_or_else(|| plain.to_string());

    if grouped == "0" {
        return "$0".to_string();
    }
    format!("{sign}${grouped}")
}
