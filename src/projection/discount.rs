//! Present value of yearly cost streams
//!
//! Costs are treated as paid at the end of each year, so the first year's
//! cost is discounted by one full period.

/// Discount factor for a payment at the end of `year`
pub fn discount_factor(annual_rate: f64, year: u32) -> f64 {
    1.0 / (1.0 + annual_rate).powi(year as i32)
}

/// Present value of yearly costs at the given annual rate (decimal, 0.05 = 5%)
pub fn present_value(costs: &[f64], annual_rate: f64) -> f64 {
    costs
        .iter()
        .enumerate()
        .map(|(t, &cost)| cost * discount_factor(annual_rate, t as u32 + 1))
        .sum()
}
