//! Loan EMI calculation.
//!
//! EMI = P * r * (1 + r)^n / ((1 + r)^n - 1) with r the monthly rate and n
//! the number of monthly installments. A zero rate degenerates to P / n.
//! Inputs are validated before computing; outputs are rounded to the
//! nearest paisa only when converted to [`Money`].

use crate::errors::{AppError, AppResult};

use super::Money;

pub const DEFAULT_LOAN_AMOUNT: f64 = 100_000.0;
pub const DEFAULT_INTEREST_RATE: f64 = 7.5;
pub const DEFAULT_TENURE_YEARS: u32 = 5;

const MAX_INTEREST_RATE: f64 = 100.0;
const MAX_TENURE_YEARS: u32 = 50;

/// Inputs to the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual percentage rate
    pub annual_rate: f64,
    pub tenure_years: u32,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            principal: DEFAULT_LOAN_AMOUNT,
            annual_rate: DEFAULT_INTEREST_RATE,
            tenure_years: DEFAULT_TENURE_YEARS,
        }
    }
}

/// Repayment schedule summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub emi: Money,
    pub total_payable: Money,
    pub total_interest: Money,
}

impl LoanTerms {
    fn validate(&self) -> AppResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(AppError::validation("Loan amount must be greater than zero"));
        }
        if !self.annual_rate.is_finite() || !(0.0..=MAX_INTEREST_RATE).contains(&self.annual_rate) {
            return Err(AppError::validation(format!(
                "Interest rate must be between 0 and {}%",
                MAX_INTEREST_RATE
            )));
        }
        if self.tenure_years == 0 || self.tenure_years > MAX_TENURE_YEARS {
            return Err(AppError::validation(format!(
                "Loan tenure must be between 1 and {} years",
                MAX_TENURE_YEARS
            )));
        }
        Ok(())
    }

    /// Compute the monthly installment and totals.
    pub fn quote(&self) -> AppResult<LoanQuote> {
        self.validate()?;

        let months = f64::from(self.tenure_years * 12);
        let monthly_rate = self.annual_rate / 12.0 / 100.0;

        let emi = if monthly_rate == 0.0 {
            self.principal / months
        } else {
            let growth = (1.0 + monthly_rate).powf(months);
            self.principal * monthly_rate * growth / (growth - 1.0)
        };
        let total_payable = emi * months;

        Ok(LoanQuote {
            emi: Money::from_rupees_f64(emi),
            total_payable: Money::from_rupees_f64(total_payable),
            total_interest: Money::from_rupees_f64(total_payable - self.principal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terms_quote() {
        let quote = LoanTerms::default().quote().unwrap();
        assert_eq!(quote.emi, Money::from_paise(200379));
        assert_eq!(quote.total_payable, Money::from_paise(12022769));
        assert_eq!(quote.total_interest, Money::from_paise(2022769));
    }

    #[test]
    fn test_longer_loan() {
        let terms = LoanTerms { principal: 500_000.0, annual_rate: 9.0, tenure_years: 10 };
        assert_eq!(terms.quote().unwrap().emi, Money::from_paise(633379));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let terms = LoanTerms { principal: 120_000.0, annual_rate: 0.0, tenure_years: 1 };
        let quote = terms.quote().unwrap();
        assert_eq!(quote.emi, Money::from_rupees(10_000));
        assert_eq!(quote.total_interest, Money::ZERO);
    }

    #[test]
    fn test_rejects_invalid_terms() {
        let zero_tenure = LoanTerms { tenure_years: 0, ..LoanTerms::default() };
        assert!(matches!(zero_tenure.quote(), Err(AppError::Validation(_))));

        let negative_amount = LoanTerms { principal: -5.0, ..LoanTerms::default() };
        assert!(negative_amount.quote().is_err());

        let negative_rate = LoanTerms { annual_rate: -1.0, ..LoanTerms::default() };
        assert!(negative_rate.quote().is_err());

        let nan_amount = LoanTerms { principal: f64::NAN, ..LoanTerms::default() };
        assert!(nan_amount.quote().is_err());
    }
}
