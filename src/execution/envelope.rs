//! Generic response envelope.
//!
//! Every operation aliases its payload as `result`, e.g.
//! `query { result: tenants { id } }`, so any destination type can be filled
//! from the same `{result: ...}` shape. The destination is a `&mut T`;
//! anything else does not compile.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::transport::TransportError;

#[derive(Deserialize)]
struct GenericResponse<T> {
    result: T,
}

/// Maps the `result` field of a response onto a caller's destination.
pub struct ResultMapper<'a, T> {
    result: &'a mut T,
}

impl<'a, T: DeserializeOwned> ResultMapper<'a, T> {
    pub fn for_target(target: &'a mut T) -> Self {
        Self { result: target }
    }

    /// Write `data.result` into the destination.
    pub fn absorb(&mut self, data: Value) -> Result<(), TransportError> {
        let GenericResponse { result } = serde_json::from_value::<GenericResponse<T>>(data)
            .map_err(|e| TransportError::Decode(format!("mapping result: {}", e)))?;
        *self.result = result;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Health {
        ok: bool,
    }

    #[test]
    fn test_absorb_fills_target() {
        let mut target = Health::default();
        ResultMapper::for_target(&mut target)
            .absorb(json!({"result": {"ok": true}}))
            .unwrap();
        assert_eq!(target, Health { ok: true });
    }

    #[test]
    fn test_absorb_into_vec() {
        let mut target: Vec<String> = vec!["stale".into()];
        ResultMapper::for_target(&mut target)
            .absorb(json!({"result": ["a", "b"]}))
            .unwrap();
        assert_eq!(target, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_result_leaves_target() {
        let mut target = Health { ok: true };
        let err = ResultMapper::for_target(&mut target)
            .absorb(json!({"tenants": []}))
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        assert_eq!(target, Health { ok: true });
    }
}
