//! Liveness and readiness checks

use algorithm::prelude::*;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// Liveness check: is the server running?
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: can the models fit and forecast?
pub async fn readiness() -> (StatusCode, Json<Value>) {
    let checks = [("server", Ok(())), ("holt_winters", model_check())];
    let healthy = checks.iter().all(|(_, result)| result.is_ok());

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "checks": checks.iter().map(|(name, result)| {
            json!({
                "name": name,
                "status": if result.is_ok() { "Healthy" } else { "Unhealthy" },
                "message": result.as_ref().err().map(ToString::to_string),
            })
        }).collect::<Vec<_>>()
    });
    (status, Json(body))
}

/// Fit and forecast two seasons of a synthetic series.
fn model_check() -> Result<()> {
    let data: Vec<f64> = (0..24).map(|i| 10.0 + (i % 12) as f64).collect();
    let model = HoltWinters::auto(&data, 12)?;
    let forecast = model.predict(3)?;
    if forecast.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TsError::NumericalError("non-finite self-check forecast".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_check_passes() {
        assert!(model_check().is_ok());
    }
}
