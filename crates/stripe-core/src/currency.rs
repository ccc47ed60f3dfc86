//! # Currency
//!
//! Three-letter ISO 4217 codes as Stripe sends them (lowercase). Amounts on
//! the wire are integers in the currency's minor unit; the helpers here
//! convert between that and a decimal amount.

use crate::open_enum;

open_enum! {
    /// ISO 4217 currency code, lowercase.
    pub struct Currency {
        AED = "aed",
        AUD = "aud",
        BIF = "bif",
        BRL = "brl",
        CAD = "cad",
        CHF = "chf",
        CLP = "clp",
        CNY = "cny",
        DJF = "djf",
        DKK = "dkk",
        EUR = "eur",
        GBP = "gbp",
        GNF = "gnf",
        HKD = "hkd",
        INR = "inr",
        JPY = "jpy",
        KMF = "kmf",
        KRW = "krw",
        MGA = "mga",
        MXN = "mxn",
        NOK = "nok",
        NZD = "nzd",
        PLN = "pln",
        PYG = "pyg",
        RWF = "rwf",
        SEK = "sek",
        SGD = "sgd",
        UGX = "ugx",
        USD = "usd",
        VND = "vnd",
        VUV = "vuv",
        XAF = "xaf",
        XOF = "xof",
        XPF = "xpf",
    }
}

/// Currencies whose amounts are already whole units.
const ZERO_DECIMAL: &[&str] = &[
    "bif", "clp", "djf", "gnf", "jpy", "kmf", "krw", "mga", "pyg", "rwf", "ugx", "vnd", "vuv",
    "xaf", "xof", "xpf",
];

impl Currency {
    /// Returns true if amounts in this currency carry no minor unit.
    pub fn is_zero_decimal(&self) -> bool {
        ZERO_DECIMAL.contains(&self.as_str().to_ascii_lowercase().as_str())
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, most others have 2)
    pub fn decimal_places(&self) -> u8 {
        if self.is_zero_decimal() {
            0
        } else {
            2
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents, etc.)
    pub fn to_minor_units(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_minor_units(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }

    /// Format a minor-unit amount with its code, e.g. `12.50 USD`.
    pub fn format_minor(&self, amount: i64) -> String {
        let places = self.decimal_places() as usize;
        format!(
            "{:.*} {}",
            places,
            self.from_minor_units(amount),
            self.as_str().to_ascii_uppercase()
        )
    }
}
