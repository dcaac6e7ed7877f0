//! Running state carried from one projection year to the next

/// Accumulator for the two-vehicle comparison
#[derive(Debug, Clone)]
pub struct ComparisonState {
    /// Current projection year (1-indexed, 0 before the first year)
    pub year: u32,

    /// Running sum of yearly costs so far
    pub cumulative: f64,
}

impl ComparisonState {
    pub fn new() -> Self {
        Self {
            year: 0,
            cumulative: 0.0,
        }
    }

    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Add this year's cost and return the new running total
    pub fn accumulate(&mut self, yearly: f64) -> f64 {
        self.cumulative += yearly;
        self.cumulative
    }
}

impl Default for ComparisonState {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulator for the single-vehicle budget
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// Current projection year (1-indexed, 0 before the first year)
    pub year: u32,

    /// Fuel price per litre applying to the current year
    pub fuel_price: f64,

    /// Down payment plus all yearly totals so far
    pub total: f64,
}

impl BudgetState {
    pub fn new(base_fuel_price: f64, down_payment: f64) -> Self {
        Self {
            year: 0,
            fuel_price: base_fuel_price,
            total: down_payment,
        }
    }

    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Close the current year: add its total and escalate the fuel price
    pub fn close_year(&mut self, yearly: f64, escalation: f64) {
        self.total += yearly;
        self.fuel_price *= escalation;
    }
}
