use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: loan_closure_core::emi::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_closure_core::emi::analyze_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_closure_core::amortization::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_closure_core::amortization::analyze_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Closure optimisation
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_closure(input_json: String) -> NapiResult<String> {
    let input: loan_closure_core::optimizer::ClosureInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_closure_core::optimizer::compare_closure(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
