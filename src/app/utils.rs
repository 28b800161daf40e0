use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// Absolute and relative change between two prices.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PriceChange {
    value: Decimal,
    percent: Decimal,
}

/// Change of `current` against `previous`. Both parts are zero when
/// `previous` is zero, so a missing baseline never divides by zero.
pub fn price_change(current: Decimal, previous: Decimal) -> PriceChange {
    if previous.is_zero() {
        return PriceChange::new(Decimal::ZERO, Decimal::ZERO);
    }

    let value = current - previous;
    let percent = value / previous * Decimal::ONE_HUNDRED;
    PriceChange::new(value, percent)
}

/// Render a monetary amount with two decimals, prefixed with the symbol
/// for common ISO codes. Missing values render as a placeholder dash.
pub fn format_currency(value: Option<Decimal>, currency: &str) -> String {
    let Some(value) = value else {
        return String::from("-");
    };

    let amount = value.round_dp(2);
    match currency {
        "USD" => format!("${amount:.2}"),
        "EUR" => format!("€{amount:.2}"),
        "GBP" => format!("£{amount:.2}"),
        "JPY" => format!("¥{amount:.2}"),
        _ => format!("{amount:.2} {currency}"),
    }
}

/// Render a signed percentage with two decimals, e.g. `+1.20%` / `-3.46%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() {
        format!("{rounded:.2}%")
    } else {
        format!("+{rounded:.2}%")
    }
}
