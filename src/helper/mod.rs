pub mod decimal_ext;
pub mod number;

pub use decimal_ext::DecimalExt;
pub use number::{
    format_currency, format_number, format_number_default, group_digits, Grouping,
    CURRENCY_MARKER,
};
