//! Reducing-balance loan calculators: EMI, amortization with annual
//! prepayment, and the bi-weekly payment strategy.

use std::fmt;

use serde::Serialize;

/// Balances below this are treated as repaid.
const SETTLED: f64 = 1e-6;

/// Longest accepted tenure: 100 years.
pub const MAX_TENURE_MONTHS: u32 = 1200;

#[derive(Clone, Debug, PartialEq)]
pub enum LoanError {
    InvalidPrincipal(f64),
    InvalidRate(f64),
    ZeroTenure,
    TenureTooLong(u32),
    InvalidPrepayment(f64),
}

impl fmt::Display for LoanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrincipal(value) => {
                write!(f, "principal must be a positive amount, got {value}")
            }
            Self::InvalidRate(value) => {
                write!(f, "annual rate must be zero or positive, got {value}")
            }
            Self::ZeroTenure => f.write_str("tenure must be at least one month"),
            Self::TenureTooLong(months) => write!(
                f,
                "tenure must be at most {MAX_TENURE_MONTHS} months, got {months}"
            ),
            Self::InvalidPrepayment(value) => {
                write!(f, "prepayment must be zero or positive, got {value}")
            }
        }
    }
}

impl std::error::Error for LoanError {}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual interest rate in percent, e.g. `8.5`.
    pub annual_rate: f64,
    pub months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, months: u32) -> Result<Self, LoanError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(LoanError::InvalidPrincipal(principal));
        }
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            return Err(LoanError::InvalidRate(annual_rate));
        }
        if months == 0 {
            return Err(LoanError::ZeroTenure);
        }
        if months > MAX_TENURE_MONTHS {
            return Err(LoanError::TenureTooLong(months));
        }
        Ok(Self {
            principal,
            annual_rate,
            months,
        })
    }

    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / (12.0 * 100.0)
    }

    /// Equated monthly instalment.
    #[must_use]
    pub fn emi(&self) -> f64 {
        let months = f64::from(self.months);
        let rate = self.monthly_rate();
        if rate == 0.0 {
            return self.principal / months;
        }

        // P·r / (1 − (1+r)^−n) stays finite where (1+r)^n overflows
        let discount = (1.0 + rate).powf(-months);
        self.principal * rate / (1.0 - discount)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub year: u32,
    pub emi: f64,
    /// Principal repaid this month, prepayment included.
    pub principal: f64,
    pub interest: f64,
    pub outstanding: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
}

impl ScheduleSummary {
    #[must_use]
    pub fn of(rows: &[ScheduleRow]) -> Self {
        let total_interest: f64 = rows.iter().map(|row| row.interest).sum();
        let total_principal: f64 = rows.iter().map(|row| row.principal).sum();
        Self {
            months: rows.last().map_or(0, |row| row.month),
            total_interest,
            total_paid: total_interest + total_principal,
        }
    }
}

/// Month-by-month schedule. At the end of every 12th month
/// `annual_prepayment` (capped at the balance) is paid off the principal.
pub fn amortization_schedule(
    terms: &LoanTerms,
    annual_prepayment: f64,
) -> Result<Vec<ScheduleRow>, LoanError> {
    if !annual_prepayment.is_finite() || annual_prepayment < 0.0 {
        return Err(LoanError::InvalidPrepayment(annual_prepayment));
    }

    let rate = terms.monthly_rate();
    let emi = terms.emi();
    let mut outstanding = terms.principal;
    let mut rows = Vec::with_capacity(terms.months.min(MAX_TENURE_MONTHS) as usize);

    for month in 1..=terms.months {
        if outstanding <= SETTLED {
            break;
        }

        let interest = outstanding * rate;
        let mut principal = (emi - interest).min(outstanding);
        outstanding -= principal;

        if month % 12 == 0 && annual_prepayment > 0.0 {
            let prepay = annual_prepayment.min(outstanding);
            outstanding -= prepay;
            principal += prepay;
        }

        rows.push(ScheduleRow {
            month,
            year: (month - 1) / 12 + 1,
            emi,
            principal,
            interest,
            outstanding: outstanding.max(0.0),
        });
    }

    tracing::debug!(
        months = rows.len(),
        prepayment = annual_prepayment,
        "amortization schedule built"
    );
    Ok(rows)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BiweeklyOutcome {
    pub emi: f64,
    pub biweekly_payment: f64,
    pub months: u32,
    pub months_saved: u32,
    pub interest_regular: f64,
    pub interest_biweekly: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

/// Half an EMI every two weeks adds up to 13 EMIs a year; modeled as
/// `13 * EMI / 12` paid monthly.
#[must_use]
pub fn biweekly_strategy(terms: &LoanTerms) -> BiweeklyOutcome {
    let rate = terms.monthly_rate();
    let emi = terms.emi();
    let payment = emi * 13.0 / 12.0;
    let interest_regular = emi * f64::from(terms.months) - terms.principal;

    let mut outstanding = terms.principal;
    let mut interest_biweekly = 0.0;
    let mut months = 0;
    while outstanding > SETTLED && months < terms.months {
        let interest = outstanding * rate;
        outstanding -= (payment - interest).min(outstanding);
        interest_biweekly += interest;
        months += 1;
    }

    let savings = interest_regular - interest_biweekly;
    let savings_percent = if interest_regular > SETTLED {
        savings / interest_regular * 100.0
    } else {
        0.0
    };

    BiweeklyOutcome {
        emi,
        biweekly_payment: emi / 2.0,
        months,
        months_saved: terms.months - months,
        interest_regular,
        interest_biweekly,
        savings,
        savings_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        amortization_schedule, biweekly_strategy, LoanError, LoanTerms, ScheduleSummary,
        MAX_TENURE_MONTHS,
    };

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    fn fifty_lakh() -> LoanTerms {
        LoanTerms::new(5_000_000.0, 8.5, 240).expect("valid terms")
    }

    #[test]
    fn rejects_invalid_terms() {
        assert_eq!(
            LoanTerms::new(0.0, 8.5, 240),
            Err(LoanError::InvalidPrincipal(0.0))
        );
        assert!(matches!(
            LoanTerms::new(f64::NAN, 8.5, 240),
            Err(LoanError::InvalidPrincipal(_))
        ));
        assert_eq!(
            LoanTerms::new(1000.0, -1.0, 12),
            Err(LoanError::InvalidRate(-1.0))
        );
        assert_eq!(LoanTerms::new(1000.0, 8.0, 0), Err(LoanError::ZeroTenure));
        assert_eq!(
            LoanTerms::new(1000.0, 8.0, MAX_TENURE_MONTHS + 1),
            Err(LoanError::TenureTooLong(MAX_TENURE_MONTHS + 1))
        );
        assert_eq!(
            LoanTerms::new(1000.0, 8.0, u32::MAX),
            Err(LoanError::TenureTooLong(u32::MAX))
        );
    }

    #[test]
    fn longest_tenure_stays_finite() {
        let terms = LoanTerms::new(1_000_000.0, 12.0, MAX_TENURE_MONTHS).expect("valid terms");
        assert!(close(terms.emi(), 10_000.0, 0.01));

        let rows = amortization_schedule(&terms, 0.0).expect("schedule");
        assert_eq!(rows.len(), MAX_TENURE_MONTHS as usize);
        assert!(rows[0].principal < 1.0);
        assert!(rows.iter().all(|row| row.principal.is_finite() && row.interest.is_finite()));

        let steep = LoanTerms::new(1_000_000.0, 1e6, MAX_TENURE_MONTHS).expect("valid terms");
        assert!(steep.emi().is_finite());
        assert!(biweekly_strategy(&steep).interest_biweekly.is_finite());
    }

    #[test]
    fn emi_matches_reference_values() {
        assert!(close(fifty_lakh().emi(), 43_391.16, 0.01));

        let terms = LoanTerms::new(1_000_000.0, 12.0, 12).expect("valid terms");
        assert!(close(terms.emi(), 88_848.79, 0.01));
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let terms = LoanTerms::new(120_000.0, 0.0, 12).expect("valid terms");
        assert!(close(terms.emi(), 10_000.0, 1e-9));

        let rows = amortization_schedule(&terms, 0.0).expect("schedule");
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|row| row.interest == 0.0));
        assert!(rows.last().is_some_and(|row| row.outstanding < 1e-6));
    }

    #[test]
    fn schedule_runs_full_tenure_without_prepayment() {
        let rows = amortization_schedule(&fifty_lakh(), 0.0).expect("schedule");
        assert_eq!(rows.len(), 240);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[11].year, 1);
        assert_eq!(rows[12].year, 2);

        let summary = ScheduleSummary::of(&rows);
        assert_eq!(summary.months, 240);
        assert!(close(summary.total_interest, 5_413_878.80, 1.0));
        assert!(close(summary.total_paid, 5_000_000.0 + summary.total_interest, 1e-3));
    }

    #[test]
    fn annual_prepayment_shortens_the_loan() {
        let rows = amortization_schedule(&fifty_lakh(), 100_000.0).expect("schedule");
        let summary = ScheduleSummary::of(&rows);
        assert_eq!(summary.months, 168);
        assert!(close(summary.total_interest, 3_558_489.47, 1.0));

        let first_prepay = &rows[11];
        assert!(first_prepay.principal > 100_000.0);
        assert!(rows.iter().all(|row| row.outstanding >= 0.0));
    }

    #[test]
    fn principal_repaid_sums_to_loan_amount() {
        for prepayment in [0.0, 100_000.0] {
            let rows = amortization_schedule(&fifty_lakh(), prepayment).expect("schedule");
            let repaid: f64 = rows.iter().map(|row| row.principal).sum();
            assert!(close(repaid, 5_000_000.0, 1e-3));
            assert!(rows.last().is_some_and(|row| row.outstanding < 1e-3));
        }
    }

    #[test]
    fn prepayment_is_capped_at_the_balance() {
        let terms = LoanTerms::new(100_000.0, 10.0, 24).expect("valid terms");
        let rows = amortization_schedule(&terms, 1_000_000.0).expect("schedule");
        assert_eq!(rows.len(), 12);

        let last = rows[11];
        assert!(last.outstanding.abs() < f64::EPSILON);
        assert!(last.principal < 100_000.0);

        let repaid: f64 = rows.iter().map(|row| row.principal).sum();
        assert!(close(repaid, 100_000.0, 1e-6));
    }

    #[test]
    fn rejects_negative_prepayment() {
        assert_eq!(
            amortization_schedule(&fifty_lakh(), -5.0),
            Err(LoanError::InvalidPrepayment(-5.0))
        );
    }

    #[test]
    fn biweekly_strategy_saves_interest_and_time() {
        let outcome = biweekly_strategy(&fifty_lakh());
        assert_eq!(outcome.months, 199);
        assert_eq!(outcome.months_saved, 41);
        assert!(close(outcome.biweekly_payment * 2.0, outcome.emi, 1e-9));
        assert!(close(outcome.savings, 1_089_367.27, 1.0));
        assert!(outcome.savings_percent > 20.0 && outcome.savings_percent < 21.0);
    }

    #[test]
    fn biweekly_strategy_at_zero_rate_saves_only_time() {
        let terms = LoanTerms::new(120_000.0, 0.0, 24).expect("valid terms");
        let outcome = biweekly_strategy(&terms);
        assert_eq!(outcome.months, 23);
        assert_eq!(outcome.months_saved, 1);
        assert!(close(outcome.savings, 0.0, 1e-9));
        assert!(close(outcome.savings_percent, 0.0, 1e-9));
    }
}
