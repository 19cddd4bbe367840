use crate::error::{MortgageError, Result};
use crate::mortgage::{compute_schedule, AmortizationResult, LoanParameters};
use crate::render::{render_chart, render_text, ChartModel};
use chrono::NaiveDate;
use log::{debug, info};

/// Raw form text, as typed by the user.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct RawInputs {
    pub amount: String,
    pub years: String,
    pub rate: String,
    pub first_payment: String,
}

impl RawInputs {
    pub fn new(amount: &str, years: &str, rate: &str) -> Self {
        Self {
            amount: amount.to_string(),
            years: years.to_string(),
            rate: rate.to_string(),
            first_payment: String::new(),
        }
    }

    pub fn with_first_payment(mut self, first_payment: &str) -> Self {
        self.first_payment = first_payment.to_string();
        self
    }

    pub fn parse(&self) -> Result<LoanParameters> {
        let principal = parse_decimal("amount", &self.amount)?;
        let years = self.years.trim();
        let term_years: i32 = years.parse().map_err(|_| {
            MortgageError::invalid("years", format!("'{}' is not a whole number", years))
        })?;
        let rate = parse_decimal("rate", &self.rate)?;

        let params = LoanParameters::new(principal, term_years, rate)?;
        let first_payment = self.first_payment.trim();
        if first_payment.is_empty() {
            return Ok(params);
        }
        let date = NaiveDate::parse_from_str(first_payment, "%Y-%m-%d").map_err(|e| {
            MortgageError::invalid("first_payment", format!("'{}': {}", first_payment, e))
        })?;
        Ok(params.with_first_pmt_date(date))
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<f64> {
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| MortgageError::invalid(field, format!("'{}' is not a number", text)))?;
    if !value.is_finite() {
        return Err(MortgageError::invalid(field, format!("'{}' is not a finite number", text)));
    }
    Ok(value)
}

#[derive(Clone, PartialEq, Debug)]
pub enum Action {
    Calculate(RawInputs),
    Clear,
}

/// Everything the form shows. Text and chart are derived from `result`.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct FormState {
    pub inputs: RawInputs,
    pub result: Option<AmortizationResult>,
}

impl FormState {
    pub fn text(&self) -> String {
        render_text(self.result.as_ref())
    }

    pub fn chart(&self) -> Option<ChartModel> {
        render_chart(self.result.as_ref())
    }
}

/// Applies an action to the form. On error the caller keeps `state` as it was.
pub fn reduce(state: &FormState, action: Action) -> Result<FormState> {
    match action {
        Action::Calculate(inputs) => {
            let params = inputs.parse()?;
            let result = compute_schedule(&params)?;
            info!(
                "calculated {} payments of {:.2}, total cost {:.2}",
                result.schedule.len(),
                result.monthly_payment,
                result.total_cost
            );
            Ok(FormState {
                inputs,
                result: Some(result),
            })
        }
        Action::Clear => {
            debug!("clearing form, had result: {}", state.result.is_some());
            Ok(FormState::default())
        }
    }
}
