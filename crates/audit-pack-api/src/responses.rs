// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

pub const API_VERSION: &str = "v1";

/// Uniform response envelope: `api_version` always, `session` when the
/// payload is session-scoped, the route's payload under `data`.
#[must_use]
pub fn json_envelope(session: Option<Value>, data: Value) -> Value {
    let mut out = json!({
        "api_version": API_VERSION,
        "data": data,
    });
    if let Some(session) = session {
        out["session"] = session;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_includes_session_only_when_given() {
        let bare = json_envelope(None, json!({"x": 1}));
        assert_eq!(bare["api_version"], API_VERSION);
        assert_eq!(bare["data"]["x"], 1);
        assert!(bare.get("session").is_none());

        let scoped = json_envelope(Some(json!("sess-1")), json!({}));
        assert_eq!(scoped["session"], "sess-1");
    }
}
