use rust_decimal::{Decimal, RoundingStrategy};

use super::number::{group_digits, group_fixed, Grouping, CURRENCY_MARKER};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Decimal extension trait
pub trait DecimalExt {
    /// Render with exactly `decimals` fractional digits, ties away from zero.
    fn format_fixed(&self, decimals: u32) -> String;
    /// Rupee amount rounded to whole units with en-IN grouping.
    fn format_currency(&self) -> String;
    /// Fixed precision with Western grouping of the integer part.
    fn format_number(&self, decimals: u32) -> String;
}

impl DecimalExt for Decimal {
    fn format_fixed(&self, decimals: u32) -> String {
        // rescale would drop scale silently past 28 places, so pad by hand
        let rounded = self
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .to_string();
        let fraction_len = rounded.split_once('.').map_or(0, |(_, frac)| frac.len());
        let missing = (decimals as usize).saturating_sub(fraction_len);

        let mut text = rounded;
        if missing > 0 {
            if fraction_len == 0 {
                text.push('.');
            }
            text.extend(std::iter::repeat('0').take(missing));
        }
        text
    }

    fn format_currency(&self) -> String {
        // ties toward positive infinity, same as the float formatter
        let rounded = self
            .checked_add(HALF)
            .map_or_else(|| self.round(), |shifted| shifted.floor());
        if rounded.is_zero() {
            return format!("{CURRENCY_MARKER}0");
        }

        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        let digits = rounded.abs().format_fixed(0);
        format!(
            "{CURRENCY_MARKER}{sign}{}",
            group_digits(&digits, Grouping::Indian)
        )
    }

    fn format_number(&self, decimals: u32) -> String {
        let sign = if self.is_sign_negative() && !self.is_zero() {
            "-"
        } else {
            ""
        };
        let fixed = self.abs().format_fixed(decimals);
        format!("{sign}{}", group_fixed(&fixed, Grouping::Western))
    }
}
