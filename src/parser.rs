use serde_json::Value;
use thiserror::Error;

use crate::models::Product;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON")]
    Malformed(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("product not found")]
    NotFound,
}

/// Interpret an API response body and extract the product record.
///
/// The body must be a JSON object with `status == 1` and a `product` object
/// carrying string `product_name` and `image_url` fields. Anything else is
/// rejected with an error naming the first violated expectation.
pub fn interpret(body: &[u8]) -> Result<Product, ParseError> {
    let document: Value = serde_json::from_slice(body).map_err(ParseError::Malformed)?;

    let root = document
        .as_object()
        .ok_or(ParseError::UnexpectedShape("response root is not an object"))?;

    // The API reports status 1 for found, 0 for not found. A missing or
    // mistyped status is treated the same as 0.
    match root.get("status").and_then(Value::as_i64) {
        Some(1) => {}
        _ => return Err(ParseError::NotFound),
    }

    let product = root
        .get("product")
        .and_then(Value::as_object)
        .ok_or(ParseError::UnexpectedShape("product is not an object"))?;

    let name = product
        .get("product_name")
        .and_then(Value::as_str)
        .ok_or(ParseError::UnexpectedShape(
            "product.product_name is not a string",
        ))?;

    let image_url = product
        .get("image_url")
        .and_then(Value::as_str)
        .ok_or(ParseError::UnexpectedShape(
            "product.image_url is not a string",
        ))?;

    Ok(Product {
        name: name.to_string(),
        image_url: image_url.to_string(),
    })
}
