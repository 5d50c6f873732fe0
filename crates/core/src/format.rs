//! Display formatting for engine figures. The engine never formats; callers pick a presenter.

use crate::domain::units::Fraction;

pub trait Presenter {
    fn currency(&self, amount: f64) -> String;

    fn percent(&self, value: Fraction) -> String;
}

/// Symbol prefix, comma thousands separators, two decimals for money and one for percentages.
#[derive(Debug, Clone)]
pub struct PlainPresenter {
    symbol: String,
}

impl PlainPresenter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for PlainPresenter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl Presenter for PlainPresenter {
    fn currency(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return "n/a".to_string();
        }
        let fixed = format!("{:.2}", amount.abs());
        // Amounts that round to zero never carry a sign.
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{sign}{}{}.{cents}", self.symbol, group_thousands(whole))
    }

    fn percent(&self, value: Fraction) -> String {
        let pct = value.to_percentage().get();
        if !pct.is_finite() {
            return "n/a".to_string();
        }
        format!("{pct:.1}%")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
