//! Input coercion, validation and the cost calculation itself.

use thiserror::Error;

use super::cost_table::ActionCostTable;

/// CoP multiplier during a ×3 event.
pub const COP_EVENT_MULTIPLIER: f64 = 3.0;
/// CoP multiplier during a ×3 event with the 100% buff.
pub const COP_BUFFED_MULTIPLIER: f64 = 4.0;

/// Reasons a calculation is refused. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Column E must be a positive number (cannot divide by 0).")]
    DivisionGuard,
    #[error("Enter a positive amount to train.")]
    InvalidAmount,
}

/// Snapshot of the form inputs at submit time. Values are whole,
/// non-negative numbers held as `f64` so long digit strings keep their size.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pub action: String,
    pub e: f64,
    pub c: f64,
    pub d: f64,
    pub amount: f64,
}

impl InputState {
    /// Build from raw field text, coercing each value with [`parse_int_or_zero`].
    pub fn from_raw(action: &str, e: &str, c: &str, d: &str, amount: &str) -> Self {
        Self {
            action: action.to_string(),
            e: parse_int_or_zero(e),
            c: parse_int_or_zero(c),
            d: parse_int_or_zero(d),
            amount: parse_int_or_zero(amount),
        }
    }
}

/// CoP totals for an action with a configured baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct CopTotals {
    pub per_unit: f64,
    /// The baseline is flagged as not yet confirmed.
    pub provisional: bool,
    pub total_base: f64,
    pub total_x3: f64,
    pub total_x4: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub action: String,
    pub amount: f64,
    /// C / E
    pub gems_per_unit: f64,
    /// D / E
    pub hours_per_unit: f64,
    pub total_gems: f64,
    pub total_hours: f64,
    /// `None` when no baseline is configured for the action.
    pub cop: Option<CopTotals>,
}

/// Keep ASCII digits only.
pub fn sanitize_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Sanitize `text` and move the caret (a char index) so it stays right
/// after the digits it followed before.
pub fn sanitize_with_cursor(text: &str, cursor: usize) -> (String, usize) {
    let digits_before = text
        .chars()
        .take(cursor)
        .filter(|c| c.is_ascii_digit())
        .count();
    (sanitize_digits(text), digits_before)
}

/// Strip non-digits and parse. Empty input gives 0. Long digit strings
/// round to the nearest `f64` instead of overflowing.
pub fn parse_int_or_zero(raw: &str) -> f64 {
    let digits = sanitize_digits(raw);
    if digits.is_empty() {
        return 0.0;
    }
    digits.parse().unwrap_or(0.0)
}

/// Validate the inputs and compute gems, speedup hours and CoP totals.
pub fn calculate(
    input: &InputState,
    table: &ActionCostTable,
) -> Result<CalculationResult, ValidationError> {
    if input.e <= 0.0 {
        return Err(ValidationError::DivisionGuard);
    }
    if input.amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    let amount = input.amount;
    let gems_per_unit = input.c / input.e;
    let hours_per_unit = input.d / input.e;

    let cop = table.get(&input.action).and_then(|entry| {
        entry.baseline.map(|per_unit| {
            let total_base = per_unit * amount;
            CopTotals {
                per_unit,
                provisional: entry.provisional,
                total_base,
                total_x3: total_base * COP_EVENT_MULTIPLIER,
                total_x4: total_base * COP_BUFFED_MULTIPLIER,
            }
        })
    });

    Ok(CalculationResult {
        action: input.action.clone(),
        amount: input.amount,
        gems_per_unit,
        hours_per_unit,
        total_gems: gems_per_unit * amount,
        total_hours: hours_per_unit * amount,
        cop,
    })
}
