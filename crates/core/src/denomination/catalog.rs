//! Static denomination reference data.
//!
//! One entry per supported currency: bills and coins in descending face
//! value, each with the label shown next to its count field. Built once on
//! first access and never mutated.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tallykit_shared::CurrencyCode;

/// Whether a denomination is paper money or a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    /// Paper (or polymer) note.
    Bill,
    /// Coin.
    Coin,
}

impl std::fmt::Display for DenominationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bill => write!(f, "bill"),
            Self::Coin => write!(f, "coin"),
        }
    }
}

/// A single bill or coin of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denomination {
    /// Bill or coin.
    pub kind: DenominationKind,
    /// Face value in major currency units.
    pub face_value: Decimal,
    /// Display label, e.g. `"$20"` or `"Quarter"`.
    pub label: String,
}

/// All denominations of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyDenominations {
    /// Currency code.
    pub code: CurrencyCode,
    /// Human-readable currency name.
    pub name: &'static str,
    /// Currency symbol.
    pub symbol: &'static str,
    /// Bills, highest face value first.
    pub bills: Vec<Denomination>,
    /// Coins, highest face value first.
    pub coins: Vec<Denomination>,
}

impl CurrencyDenominations {
    /// Iterates over bills then coins, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.bills.iter().chain(self.coins.iter())
    }

    /// Finds a denomination by kind and face value.
    #[must_use]
    pub fn find(&self, kind: DenominationKind, face_value: Decimal) -> Option<&Denomination> {
        let list = match kind {
            DenominationKind::Bill => &self.bills,
            DenominationKind::Coin => &self.coins,
        };
        list.iter().find(|d| d.face_value == face_value)
    }
}

/// Catalog of every supported currency, keyed by code.
#[derive(Debug, Clone)]
pub struct DenominationCatalog {
    currencies: BTreeMap<CurrencyCode, CurrencyDenominations>,
}

impl DenominationCatalog {
    /// Returns the bundled catalog.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_CATALOG
    }

    /// Looks up a currency by code.
    #[must_use]
    pub fn get(&self, code: &CurrencyCode) -> Option<&CurrencyDenominations> {
        self.currencies.get(code)
    }

    /// Iterates over all currencies in the order they are offered to users.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyDenominations> {
        CATALOG_ORDER.iter().filter_map(|code| {
            CurrencyCode::parse(code)
                .ok()
                .and_then(|code| self.currencies.get(&code))
        })
    }

    /// Number of currencies in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if the catalog has no currencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

/// Order in which the counter offers currencies.
const CATALOG_ORDER: [&str; 8] = ["USD", "EUR", "GBP", "INR", "JPY", "CAD", "AUD", "CNY"];

static STANDARD_CATALOG: Lazy<DenominationCatalog> = Lazy::new(|| {
    let entries = [
        entry(
            "USD",
            "US Dollar",
            "$",
            &[dec!(100), dec!(50), dec!(20), dec!(10), dec!(5), dec!(1)],
            &[
                (dec!(0.25), "Quarter"),
                (dec!(0.10), "Dime"),
                (dec!(0.05), "Nickel"),
                (dec!(0.01), "Penny"),
            ],
        ),
        entry(
            "EUR",
            "Euro",
            "€",
            &[dec!(500), dec!(200), dec!(100), dec!(50), dec!(20), dec!(10), dec!(5)],
            &[
                (dec!(2), "€2"),
                (dec!(1), "€1"),
                (dec!(0.50), "50c"),
                (dec!(0.20), "20c"),
                (dec!(0.10), "10c"),
                (dec!(0.05), "5c"),
                (dec!(0.02), "2c"),
                (dec!(0.01), "1c"),
            ],
        ),
        entry(
            "GBP",
            "British Pound",
            "£",
            &[dec!(50), dec!(20), dec!(10), dec!(5)],
            &[
                (dec!(2), "£2"),
                (dec!(1), "£1"),
                (dec!(0.50), "50p"),
                (dec!(0.20), "20p"),
                (dec!(0.10), "10p"),
                (dec!(0.05), "5p"),
                (dec!(0.02), "2p"),
                (dec!(0.01), "1p"),
            ],
        ),
        entry(
            "INR",
            "Indian Rupee",
            "₹",
            &[dec!(2000), dec!(500), dec!(200), dec!(100), dec!(50), dec!(20), dec!(10)],
            &[
                (dec!(20), "₹20"),
                (dec!(10), "₹10"),
                (dec!(5), "₹5"),
                (dec!(2), "₹2"),
                (dec!(1), "₹1"),
            ],
        ),
        entry(
            "JPY",
            "Japanese Yen",
            "¥",
            &[dec!(10000), dec!(5000), dec!(2000), dec!(1000)],
            &[
                (dec!(500), "¥500"),
                (dec!(100), "¥100"),
                (dec!(50), "¥50"),
                (dec!(10), "¥10"),
                (dec!(5), "¥5"),
                (dec!(1), "¥1"),
            ],
        ),
        entry(
            "CAD",
            "Canadian Dollar",
            "C$",
            &[dec!(100), dec!(50), dec!(20), dec!(10), dec!(5)],
            &[
                (dec!(2), "Toonie"),
                (dec!(1), "Loonie"),
                (dec!(0.25), "Quarter"),
                (dec!(0.10), "Dime"),
                (dec!(0.05), "Nickel"),
            ],
        ),
        entry(
            "AUD",
            "Australian Dollar",
            "A$",
            &[dec!(100), dec!(50), dec!(20), dec!(10), dec!(5)],
            &[
                (dec!(2), "A$2"),
                (dec!(1), "A$1"),
                (dec!(0.50), "50c"),
                (dec!(0.20), "20c"),
                (dec!(0.10), "10c"),
                (dec!(0.05), "5c"),
            ],
        ),
        entry(
            "CNY",
            "Chinese Yuan",
            "¥",
            &[dec!(100), dec!(50), dec!(20), dec!(10), dec!(5), dec!(1)],
            &[
                (dec!(1), "¥1"),
                (dec!(0.5), "5 Jiao"),
                (dec!(0.1), "1 Jiao"),
            ],
        ),
    ];

    DenominationCatalog {
        currencies: entries
            .into_iter()
            .flatten()
            .map(|c| (c.code.clone(), c))
            .collect(),
    }
});

fn entry(
    code: &str,
    name: &'static str,
    symbol: &'static str,
    bills: &[Decimal],
    coins: &[(Decimal, &str)],
) -> Option<CurrencyDenominations> {
    let code = CurrencyCode::parse(code).ok()?;
    Some(CurrencyDenominations {
        code,
        name,
        symbol,
        bills: bills
            .iter()
            .map(|value| Denomination {
                kind: DenominationKind::Bill,
                face_value: *value,
                label: format!("{symbol}{}", value.normalize()),
            })
            .collect(),
        coins: coins
            .iter()
            .map(|(value, label)| Denomination {
                kind: DenominationKind::Coin,
                face_value: *value,
                label: (*label).to_string(),
            })
            .collect(),
    })
}
