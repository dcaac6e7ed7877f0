//! Amortized loan payments

/// Amount financed after the down payment
pub fn financed_principal(price: f64, down_payment_pct: f64) -> f64 {
    price * (1.0 - down_payment_pct / 100.0)
}

/// Monthly interest rate from an annual percentage rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    (annual_rate_pct / 100.0) / 12.0
}

/// Fixed monthly payment of a fully amortizing loan
///
/// Standard annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`. A zero rate
/// reduces to straight-line repayment `P / n`, and a zero term (cash
/// purchase) has no payment. NaN inputs yield a NaN payment.
///
/// # Arguments
/// * `price` - Purchase price
/// * `down_payment_pct` - Down payment as a percentage of price
/// * `annual_rate_pct` - Annual interest rate in percent
/// * `term_months` - Loan term in months
pub fn monthly_payment(price: f64, down_payment_pct: f64, annual_rate_pct: f64, term_months: f64) -> f64 {
    let principal = financed_principal(price, down_payment_pct);
    let r = monthly_rate(annual_rate_pct);
    let n = term_months;

    if n == 0.0 {
        return 0.0;
    }
    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

/// Whether the loan is still being repaid in the given (1-based) year
///
/// Real-valued comparison against the term in years, so a 30 month term
/// covers years 1 and 2 only.
pub fn loan_active(year: u32, term_months: f64) -> bool {
    f64::from(year) <= term_months / 12.0
}

/// Loan payments falling in one year
pub fn annual_loan_payment(year: u32, monthly_payment: f64, term_months: f64) -> f64 {
    if loan_active(year, term_months) {
        monthly_payment * 12.0
    } else {
        0.0
    }
}
