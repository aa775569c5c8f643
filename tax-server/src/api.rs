//! HTTP surface of the tax calculator.
//!
//! `GET /taxes/{year}?salary=<amount>` returns the calculation as JSON.
//! Client mistakes get a 400 with a short plain-text reason. Upstream and
//! internal failures get a generic 500; the cause is logged, never returned.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;
use tax_core::{TaxCalculationResponse, TaxCalculator, TaxCalculatorError};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Largest salary accepted; just under `Decimal::MAX` so the calculation
/// cannot overflow.
const MAX_SALARY: f64 = 7.9e28;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("invalid {0} value")]
    InvalidParameter(&'static str),

    #[error("salary cannot be negative")]
    InvalidIncome,

    #[error("salary is too large")]
    SalaryOutOfRange,

    #[error("Unable to calculate tax. An internal error has occurred. Please try again later.")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::InvalidParameter(_)
            | ApiError::InvalidIncome
            | ApiError::SalaryOutOfRange => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    calculator: TaxCalculator,
}

#[derive(Debug, Deserialize)]
struct TaxQuery {
    salary: Option<String>,
}

/// Build the application router around a calculator.
///
/// Path segments after the year are ignored.
pub fn router(calculator: TaxCalculator) -> Router {
    Router::new()
        .route("/taxes/{year}", get(calculate_taxes))
        .route("/taxes/{year}/{*rest}", get(calculate_taxes_with_suffix))
        .route("/taxes", get(missing_year))
        .route("/taxes/", get(missing_year))
        .with_state(AppState { calculator })
        .layer(TraceLayer::new_for_http())
}

async fn missing_year() -> ApiError {
    ApiError::MissingParameter("year")
}

async fn calculate_taxes(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): Query<TaxQuery>,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    calculate(&state, &year, query).await
}

async fn calculate_taxes_with_suffix(
    State(state): State<AppState>,
    Path((year, _rest)): Path<(String, String)>,
    Query(query): Query<TaxQuery>,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    calculate(&state, &year, query).await
}

async fn calculate(
    state: &AppState,
    year: &str,
    query: TaxQuery,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    let year = year.trim();
    if year.is_empty() {
        return Err(ApiError::MissingParameter("year"));
    }

    let salary = match query.salary.as_deref().map(str::trim) {
        None | Some("") => return Err(ApiError::MissingParameter("salary")),
        Some(raw) => parse_salary(raw)?,
    };

    match state.calculator.calculate_tax(salary, year).await {
        Ok(result) => {
            info!(year, %salary, total_tax = %result.total_tax, "tax calculated");
            Ok(Json(result))
        }
        Err(TaxCalculatorError::InvalidIncome(_)) => Err(ApiError::InvalidIncome),
        Err(TaxCalculatorError::Upstream(err)) => {
            error!(year, error = %err, "tax calculation failed");
            Err(ApiError::Internal)
        }
    }
}

/// Parses a salary using float grammar (`85000.50`, `8.5e4`, `1e-40`).
///
/// Plain decimals are kept exact. Other finite values go through `f64`;
/// magnitudes too small for a `Decimal` become zero and ones above
/// [`MAX_SALARY`] are rejected.
fn parse_salary(raw: &str) -> Result<Decimal, ApiError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidParameter("salary"))?;
    if !value.is_finite() {
        return Err(ApiError::InvalidParameter("salary"));
    }
    if value < 0.0 {
        return Err(ApiError::InvalidIncome);
    }
    if value > MAX_SALARY {
        return Err(ApiError::SalaryOutOfRange);
    }

    if let Ok(exact) = Decimal::from_str_exact(raw) {
        return Ok(exact);
    }

    Ok(Decimal::from_f64(value).unwrap_or(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_plain_salary() {
        assert_eq!(parse_salary("85000.50"), Ok(dec!(85000.50)));
    }

    #[test]
    fn parses_scientific_salary() {
        assert_eq!(parse_salary("1e5"), Ok(dec!(100000)));
    }

    #[test]
    fn negative_salary_is_invalid_income() {
        assert_eq!(parse_salary("-10"), Err(ApiError::InvalidIncome));
        assert_eq!(parse_salary("-1e-40"), Err(ApiError::InvalidIncome));
    }

    #[test]
    fn tiny_salary_becomes_zero() {
        assert_eq!(parse_salary("1e-40"), Ok(Decimal::ZERO));
    }

    #[test]
    fn large_exponents_within_range_are_accepted() {
        assert_eq!(parse_salary("1e20"), Ok(dec!(100000000000000000000)));
    }

    #[test]
    fn salary_above_decimal_range_is_rejected() {
        for raw in ["1e29", "1e30", "1e300"] {
            assert_eq!(
                parse_salary(raw),
                Err(ApiError::SalaryOutOfRange),
                "{raw} should be out of range"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_salary() {
        for raw in ["abc", "NaN", "inf", "-infinity", "12,000", "1_000", "1e"] {
            assert_eq!(
                parse_salary(raw),
                Err(ApiError::InvalidParameter("salary")),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn client_errors_are_bad_requests() {
        assert_eq!(
            ApiError::MissingParameter("year").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidParameter("salary").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidIncome.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::SalaryOutOfRange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
