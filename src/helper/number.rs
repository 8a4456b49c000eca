/// Literal marker placed in front of every formatted currency amount.
pub const CURRENCY_MARKER: &str = "Rs ";

/// Largest fractional precision accepted by [`format_number`].
pub const MAX_FRACTION_DIGITS: u32 = 100;

/// Digit grouping convention used when inserting thousands separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// Groups of three: `1,234,567`
    Western,
    /// Last three digits, then groups of two (en-IN): `12,34,567`
    Indian,
}

/// Both conventions keep the rightmost three digits together.
const LEADING_GROUP: usize = 3;

/// Fractional digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

impl Grouping {
    fn group(self) -> usize {
        match self {
            Self::Western => 3,
            Self::Indian => 2,
        }
    }
}

/// Insert `,` separators into a run of ASCII digits.
///
/// The input must not carry a sign or a decimal point; see
/// [`format_number`] for full numeric strings.
pub fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= LEADING_GROUP {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - LEADING_GROUP);
    let mut groups = split_from_right(head, grouping.group());
    groups.push(tail);
    groups.join(",")
}

fn split_from_right(digits: &str, size: usize) -> Vec<&str> {
    let mut groups = Vec::with_capacity(digits.len() / size + 1);
    let mut end = digits.len();
    while end > size {
        groups.push(&digits[end - size..end]);
        end -= size;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        })
    } else {
        None
    }
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    // exact: a finite double minus its floor is representable
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Format an amount as rupees with en-IN grouping
/// Example: 5000000.4 → Rs 50,00,000
pub fn format_currency(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return format!("{CURRENCY_MARKER}{text}");
    }

    let rounded = round_half_up(value);
    if rounded == 0.0 {
        return format!("{CURRENCY_MARKER}0");
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!(
        "{CURRENCY_MARKER}{sign}{}",
        group_digits(&digits, Grouping::Indian)
    )
}

/// Format a value with a fixed number of decimals and Western grouping
/// Example: (1234.5, 2) → 1,234.50
pub fn format_number(value: f64, decimals: u32) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = to_fixed(value.abs(), decimals.min(MAX_FRACTION_DIGITS) as usize);
    format!("{sign}{}", group_fixed(&fixed, Grouping::Western))
}

/// Round the exact decimal expansion of a non-negative finite value to
/// `decimals` places, ties away from zero.
fn to_fixed(magnitude: f64, decimals: usize) -> String {
    let exact = format!("{magnitude:.prec$}", prec = EXACT_FRACTION_DIGITS);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    let mut int_len = int_part.len();

    // the expansion is exact, so a 5 here is at or above the midpoint
    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut text: String = digits.into_iter().map(char::from).collect();
    if decimals > 0 {
        text.insert(int_len, '.');
    }
    text
}

/// [`format_number`] with the decimal count omitted.
pub fn format_number_default(value: f64) -> String {
    format_number(value, 0)
}

/// Group the integer part of an unsigned fixed-point string, leaving the
/// fraction untouched.
pub(crate) fn group_fixed(fixed: &str, grouping: Grouping) -> String {
    match fixed.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}.{frac_part}", group_digits(int_part, grouping))
        }
        None => group_digits(fixed, grouping),
    }
}
