//! Common sales-tax and VAT rates offered as quick picks.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A commonly used tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxPreset {
    /// Rate in percent.
    pub rate: Decimal,
    /// Display label.
    pub label: &'static str,
}

static COMMON_TAX_RATES: Lazy<Vec<TaxPreset>> = Lazy::new(|| {
    [
        (dec!(0), "0% - No Tax"),
        (dec!(5), "5% - Low Tax"),
        (dec!(6), "6% - Standard"),
        (dec!(7), "7% - Standard"),
        (dec!(8), "8% - Standard"),
        (dec!(8.25), "8.25% - California"),
        (dec!(10), "10% - Standard VAT"),
        (dec!(13), "13% - Ontario HST"),
        (dec!(15), "15% - Maritime HST"),
        (dec!(20), "20% - UK VAT"),
        (dec!(21), "21% - EU VAT"),
        (dec!(25), "25% - High VAT"),
    ]
    .into_iter()
    .map(|(rate, label)| TaxPreset { rate, label })
    .collect()
});

/// Returns the preset rates, lowest first.
#[must_use]
pub fn common_tax_rates() -> &'static [TaxPreset] {
    &COMMON_TAX_RATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_sorted_and_unique() {
        let presets = common_tax_rates();
        assert_eq!(presets.len(), 12);
        for pair in presets.windows(2) {
            assert!(pair[0].rate < pair[1].rate);
        }
    }

    #[test]
    fn test_california_preset() {
        let california = common_tax_rates()
            .iter()
            .find(|p| p.label.contains("California"))
            .unwrap();
        assert_eq!(california.rate, dec!(8.25));
    }
}
