//! AWS Lambda handler for the calculator dashboard
//!
//! Accepts a calculation request (or an array of them) as JSON and returns the
//! result. Works both for direct invocation and behind a Lambda Function URL, where
//! the request arrives as a string `body` and the response must carry a status code.
//!
//! Set `FINCALC_TAX_SLABS` to a CSV slab table to replace the built-in regime.

use fincalc::{CalculationRequest, Calculator};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{error, info};
use serde_json::{json, Value};
use std::sync::Arc;

const TAX_SLABS_ENV: &str = "FINCALC_TAX_SLABS";

/// Evaluate a decoded payload: one request object or an array of them
fn evaluate(calculator: &Calculator, payload: Value) -> Result<Value, serde_json::Error> {
    if payload.is_array() {
        let requests: Vec<CalculationRequest> = serde_json::from_value(payload)?;
        serde_json::to_value(calculator.run_batch(&requests))
    } else {
        let request: CalculationRequest = serde_json::from_value(payload)?;
        serde_json::to_value(calculator.run(&request))
    }
}

fn url_response(status: u16, body: Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

fn error_body(message: String) -> Value {
    json!({ "error": message })
}

/// Handle a Function URL envelope
fn handle_url_request(calculator: &Calculator, event: &Value) -> Value {
    let method = event
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .unwrap_or("POST");

    // CORS preflight
    if method == "OPTIONS" {
        return url_response(200, Value::Null);
    }

    if event.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
        return url_response(400, error_body("base64-encoded bodies are not supported".to_string()));
    }

    let body = event.get("body").and_then(Value::as_str).unwrap_or("{}");
    let payload: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return url_response(400, error_body(format!("Invalid JSON: {}", e))),
    };

    match evaluate(calculator, payload) {
        Ok(result) => url_response(200, result),
        Err(e) => url_response(400, error_body(format!("Invalid request: {}", e))),
    }
}

/// Dispatch on the event shape
fn handle_event(calculator: &Calculator, event: Value) -> Result<Value, Error> {
    if event.get("requestContext").is_some() || event.get("body").is_some() {
        return Ok(handle_url_request(calculator, &event));
    }

    evaluate(calculator, event).map_err(|e| {
        error!("rejected direct invocation: {}", e);
        Error::from(format!("Invalid request: {}", e))
    })
}

async fn handler(calculator: Arc<Calculator>, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let (payload, context) = event.into_parts();

    let response = handle_event(&calculator, payload);
    info!("request {} handled in {:?}", context.request_id, start.elapsed());
    response
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let calculator = match std::env::var(TAX_SLABS_ENV) {
        Ok(path) => {
            info!("loading tax slabs from {}", path);
            Calculator::from_tax_slabs_csv(&path)?
        }
        Err(_) => Calculator::new(),
    };
    let calculator = Arc::new(calculator);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let calculator = Arc::clone(&calculator);
        async move { handler(calculator, event).await }
    }))
    .await
}
