//! JSON clean-up applied to every response body.
//!
//! Clients parse numbers as IEEE doubles, so integers beyond ±(2^53 - 1)
//! would be silently rounded. They are dropped instead.

use serde_json::Value;

/// Largest integer a double represents exactly.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

fn is_unsafe_integer(value: &Value) -> bool {
    let Value::Number(n) = value else {
        return false;
    };
    if n.is_f64() {
        return false;
    }
    match n.as_i64() {
        Some(i) => !(-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i),
        // Only u64 above i64::MAX gets here.
        None => true,
    }
}

/// Removes out-of-range integers from objects and arrays, recursively.
///
/// A bare out-of-range integer has no container to be dropped from and is
/// returned unchanged.
pub fn retain_safe_integers(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !is_unsafe_integer(v));
            map.values_mut().for_each(retain_safe_integers);
        }
        Value::Array(items) => {
            items.retain(|v| !is_unsafe_integer(v));
            items.iter_mut().for_each(retain_safe_integers);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_integers_pass_through() {
        let mut value = json!({
            "year": 1904,
            "max": MAX_SAFE_INTEGER,
            "min": -MAX_SAFE_INTEGER,
        });
        let before = value.clone();
        retain_safe_integers(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn overflowing_integers_are_dropped_at_any_depth() {
        let mut value = json!({
            "name": "Hamlet",
            "big": MAX_SAFE_INTEGER + 1,
            "nested": { "small": -MAX_SAFE_INTEGER - 1, "ok": 7 },
            "list": [1, u64::MAX, { "deep": i64::MIN }, [i64::MAX, 2]],
        });
        retain_safe_integers(&mut value);

        assert_eq!(
            value,
            json!({
                "name": "Hamlet",
                "nested": { "ok": 7 },
                "list": [1, {}, [2]],
            })
        );
    }

    #[test]
    fn strings_floats_and_empty_containers_are_untouched() {
        let mut value = json!({
            "text": "9007199254740993",
            "float": 1.0e300,
            "empty": {},
            "none": [],
            "null": null,
        });
        let before = value.clone();
        retain_safe_integers(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn conversion_is_idempotent() {
        let mut once = json!({ "a": [i64::MAX, { "b": 3, "c": i64::MIN }] });
        retain_safe_integers(&mut once);
        let mut twice = once.clone();
        retain_safe_integers(&mut twice);
        assert_eq!(once, twice);
    }
}
