//! At-rest form of the optimizer config
//!
//! The config column holds JSON text. `Value::Null` is stored as SQL NULL
//! and a NULL or empty column reads back as `Value::Null`.

use optimizer_core::errors::OptimizerError;
use serde_json::Value;

pub(crate) fn serialize_config(config: &Value) -> Result<Option<String>, OptimizerError> {
    if config.is_null() {
        return Ok(None);
    }
    serde_json::to_string(config)
        .map(Some)
        .map_err(|e| OptimizerError::ConfigSerialization {
            reason: e.to_string(),
        })
}

/// Malformed text is an error, never an empty config.
///
/// Takes the raw column bytes so invalid UTF-8 is reported instead of
/// being replaced.
pub(crate) fn deserialize_config(
    optimizer_id: i64,
    stored: Option<&[u8]>,
) -> Result<Value, OptimizerError> {
    let corrupt = |reason: String| OptimizerError::CorruptConfig {
        optimizer_id,
        reason,
    };

    let Some(bytes) = stored else {
        return Ok(Value::Null);
    };
    let text = std::str::from_utf8(bytes).map_err(|e| corrupt(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_config() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>()
                .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
                .prop_map(Value::from),
            "[a-zA-Z0-9 _;\"\\\\]{0,12}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_config_round_trips(config in arb_config()) {
            let stored = serialize_config(&config).unwrap();
            let restored = deserialize_config(1, stored.as_deref().map(str::as_bytes)).unwrap();
            prop_assert_eq!(restored, config);
        }
    }

    #[test]
    fn test_null_is_stored_as_sql_null() {
        assert_eq!(serialize_config(&Value::Null).unwrap(), None);
        assert_eq!(deserialize_config(1, Some(b"".as_slice())).unwrap(), Value::Null);
    }

    #[test]
    fn test_nested_config_text() {
        let stored = serialize_config(&json!({"boost_factor": 2})).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"boost_factor":2}"#));
    }

    #[test]
    fn test_malformed_payload_is_corrupt() {
        let err = deserialize_config(9, Some(b"a:1:{s:5:".as_slice())).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::CorruptConfig { optimizer_id: 9, .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let err = deserialize_config(4, Some(b"\"\xff\"".as_slice())).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::CorruptConfig { optimizer_id: 4, .. }
        ));
    }

    #[test]
    fn test_small_float_survives_round_trip() {
        let config = json!({"boost_factor": 1.0715660391465826e-75});
        let stored = serialize_config(&config).unwrap();
        let restored = deserialize_config(1, stored.as_deref().map(str::as_bytes)).unwrap();
        assert_eq!(restored, config);
    }
}
