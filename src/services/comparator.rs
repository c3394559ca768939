use serde::Serialize;
use serde_json::Value;

/// Absolute tolerance used everywhere prices are compared. Absorbs
/// floating-point noise picked up in upstream serialization without
/// treating genuinely equal prices as changed.
pub const PRICE_TOLERANCE: f64 = 1e-4;

/// True iff `a` and `b` differ by less than [`PRICE_TOLERANCE`].
pub fn numbers_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < PRICE_TOLERANCE
}

/// Recursive structural equality over freshly deserialized JSON values.
/// Object keys compare order-independently. Inputs are acyclic by
/// construction (`serde_json` cannot produce cycles), so no visited-set
/// guard is needed.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(xv, yv)| deep_equal(xv, yv))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, xv)| y.get(k).is_some_and(|yv| deep_equal(xv, yv)))
        }
        _ => false,
    }
}

/// Structural equality of two serializable values, routed through
/// [`deep_equal`]. Values that fail to serialize compare unequal.
pub fn deep_equal_serialized<T: Serialize>(a: &T, b: &T) -> bool {
    match (serde_json::to_value(a), serde_json::to_value(b)) {
        (Ok(va), Ok(vb)) => deep_equal(&va, &vb),
        _ => false,
    }
}
