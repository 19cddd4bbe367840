use crate::error::{MortgageError, Result};
use crate::render::format_currency;
use chrono::{Months, NaiveDate};
use log::{debug, trace};
use std::fmt;

// caps the schedule at 12,000 entries and keeps term_years * 12 far inside u32
pub const MAX_TERM_YEARS: i32 = 1_000;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanParameters {
    pub principal: f64,
    pub term_years: i32,
    pub annual_rate_percent: f64,
    pub first_pmt_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(principal: f64, term_years: i32, annual_rate_percent: f64) -> Result<Self> {
        let params = Self {
            principal,
            term_years,
            annual_rate_percent,
            first_pmt_date: None,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_first_pmt_date(mut self, first_pmt_date: NaiveDate) -> Self {
        self.first_pmt_date = Some(first_pmt_date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal <= 0. {
            return Err(MortgageError::invalid(
                "principal",
                format!("{} is not a positive amount", self.principal),
            ));
        }
        if self.term_years <= 0 {
            return Err(MortgageError::invalid(
                "term_years",
                format!("{} is not a positive number of years", self.term_years),
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(MortgageError::invalid(
                "term_years",
                format!("{} exceeds the {MAX_TERM_YEARS} year maximum", self.term_years),
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0. {
            return Err(MortgageError::invalid(
                "annual_rate_percent",
                format!("{} is not a non-negative rate", self.annual_rate_percent),
            ));
        }
        Ok(())
    }

    pub fn term_months(&self) -> u32 {
        // validate() keeps term_years within 1..=MAX_TERM_YEARS
        self.term_years.unsigned_abs() * 12
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12. / 100.
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlyEntry {
    pub month: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
    pub pmt_date: Option<NaiveDate>,
}

impl MonthlyEntry {
    pub fn new(
        month: u32,
        principal_paid: f64,
        interest_paid: f64,
        remaining_balance: f64,
        pmt_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            month,
            principal_paid,
            interest_paid,
            remaining_balance,
            pmt_date,
        }
    }
}

impl fmt::Display for MonthlyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Month {}: Principal Paid = {}, Interest Paid = {}, Remaining Principal = {}",
            self.month,
            format_currency(self.principal_paid),
            format_currency(self.interest_paid),
            format_currency(self.remaining_balance)
        )?;
        if let Some(date) = self.pmt_date {
            write!(f, " ({})", date)?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmortizationResult {
    pub monthly_payment: f64,
    pub schedule: Vec<MonthlyEntry>,
    pub total_interest_paid: f64,
    pub total_cost: f64,
}

/// Computes the level monthly payment and the full month-by-month schedule.
///
/// The parameters are validated again here, so hand-built `LoanParameters`
/// with out of range values are rejected with `InvalidInput` rather than
/// producing a meaningless schedule.
pub fn compute_schedule(params: &LoanParameters) -> Result<AmortizationResult> {
    params.validate()?;

    let pmt_count = params.term_months();
    let pmt_rate = params.monthly_rate();
    let pmt_amount = get_pmt_amount(&params.principal, pmt_count, &pmt_rate);
    debug!(
        "principal {}, {} payments at monthly rate {}, payment {}",
        params.principal, pmt_count, pmt_rate, pmt_amount
    );

    if !pmt_amount.is_finite() {
        return Err(MortgageError::invalid(
            "annual_rate_percent",
            format!("{} gives a payment too large to represent", params.annual_rate_percent),
        ));
    }

    let schedule = add_scheduled_pmts(params, pmt_count, &pmt_rate, pmt_amount)?;
    let total_interest_paid: f64 = schedule.iter().map(|pmt| pmt.interest_paid).sum();
    let total_cost = params.principal + total_interest_paid;
    if !total_cost.is_finite() {
        return Err(MortgageError::invalid(
            "principal",
            format!("{} gives a total cost too large to represent", params.principal),
        ));
    }

    Ok(AmortizationResult {
        monthly_payment: pmt_amount,
        schedule,
        total_interest_paid,
        total_cost,
    })
}

pub fn get_pmt_amount(
    &principal: &f64, // loan principal
    pmt_count: u32,   // number of monthly payments
    &pmt_rate: &f64,  // monthly rate as decimal (i.e., 0.005 for 6% annual)
) -> f64 {
    let n = f64::from(pmt_count);
    if pmt_rate == 0. {
        return principal / n;
    }
    // 1 - (1 + r)^-n, without forming 1 + r so tiny rates keep their precision
    let discount = -(-n * pmt_rate.ln_1p()).exp_m1();
    // the level payment is never below principal / n; subnormal rates can underflow under it
    ((principal * pmt_rate) / discount).max(principal / n)
}

// payment date for a 1-based payment number, counted in calendar months from the first payment
pub fn get_pmt_date(&first_pmt_date: &NaiveDate, pmt_number: u32) -> Result<NaiveDate> {
    first_pmt_date
        .checked_add_months(Months::new(pmt_number.saturating_sub(1)))
        .ok_or_else(|| {
            MortgageError::invalid(
                "first_pmt_date",
                format!("{} does not return a date for payment {}", first_pmt_date, pmt_number),
            )
        })
}

// calculate the vector of MonthlyEntry for compute_schedule
fn add_scheduled_pmts(
    params: &LoanParameters,
    pmt_count: u32,
    &pmt_rate: &f64,
    pmt_amount: f64,
) -> Result<Vec<MonthlyEntry>> {
    let mut sched_pmt: Vec<MonthlyEntry> = Vec::with_capacity(pmt_count as usize);
    let mut balance = params.principal; // remaining principal after each payment

    for pmt_number in 1..=pmt_count {
        let interest = balance * pmt_rate;
        let principal_paid = pmt_amount - interest;
        balance -= principal_paid;

        let pmt_date = match &params.first_pmt_date {
            Some(first) => Some(get_pmt_date(first, pmt_number)?),
            None => None,
        };
        trace!(
            "Pmt # {}, interest {}, principal {}, end bal {}",
            pmt_number,
            interest,
            principal_paid,
            balance
        );

        sched_pmt.push(MonthlyEntry::new(
            pmt_number,
            principal_paid,
            interest,
            balance,
            pmt_date,
        ));
    }
    Ok(sched_pmt)
}
