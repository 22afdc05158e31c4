//! Query string parameter access
//!
//! Query strings are extracted as ordered `(key, value)` pairs so that
//! repeated keys (`values=1&values=2`) keep their order. Helpers here turn
//! the pairs into typed values and report shape problems as validation
//! errors (422).

use axum::extract::{rejection::QueryRejection, Query};
use errors::{CircuitError, CircuitResult};

/// Ordered query parameters of one request
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Unwrap the axum extractor result, mapping a malformed query to 422
    pub fn from_extractor(
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> CircuitResult<Self> {
        match query {
            Ok(Query(pairs)) => Ok(Self::new(pairs)),
            Err(rejection) => Err(CircuitError::Validation(rejection.body_text())),
        }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in request order
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn optional_f64(&self, key: &str) -> CircuitResult<Option<f64>> {
        self.get(key).map(|raw| parse_f64(key, raw)).transpose()
    }

    pub fn required_f64(&self, key: &str) -> CircuitResult<f64> {
        self.optional_f64(key)?
            .ok_or_else(|| CircuitError::MissingParameter(key.to_string()))
    }

    /// All values for `key` as numbers; an absent key yields an empty list
    pub fn f64_list(&self, key: &str) -> CircuitResult<Vec<f64>> {
        self.all(key).map(|raw| parse_f64(key, raw)).collect()
    }

    pub fn required_str(&self, key: &str) -> CircuitResult<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| CircuitError::MissingParameter(key.to_string()))
    }
}

/// Parse one finite number; `nan`, `inf` and overflowing literals are refused
fn parse_f64(key: &str, raw: &str) -> CircuitResult<f64> {
    let invalid = |reason: String| CircuitError::InvalidParameter {
        param: key.to_string(),
        reason,
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(format!("'{}' is not a valid number", raw)))?;
    if !value.is_finite() {
        return Err(invalid(format!("'{}' is not a finite number", raw)));
    }
    Ok(value)
}
