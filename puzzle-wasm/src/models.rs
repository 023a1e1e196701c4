use puzzle_core::{ErrorKind, RotationResult, TransferResult};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// `{ok, error?}` answer handed back to JS for every operation, plus the
/// details of a successful one.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u16>,
}

impl Reply {
    fn refused(err: ErrorKind) -> Self {
        Reply {
            ok: false,
            error: Some(err.as_str()),
            ..Default::default()
        }
    }
}

impl From<&TransferResult> for Reply {
    fn from(result: &TransferResult) -> Self {
        match result {
            Ok(done) => Reply {
                ok: true,
                tile: Some(done.tile.to_string()),
                locked: Some(done.locked),
                solved: Some(done.solved),
                ..Default::default()
            },
            Err(err) => Reply::refused(*err),
        }
    }
}

impl From<&RotationResult> for Reply {
    fn from(result: &RotationResult) -> Self {
        match result {
            Ok(rotation) => Reply {
                ok: true,
                rotation: Some(rotation.degrees()),
                ..Default::default()
            },
            Err(err) => Reply::refused(*err),
        }
    }
}

/// Encodes a value as a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}
