use serde_json::Value;

use crate::RelayReply;

/// Decides whether the relay accepted the message.
///
/// An explicit `success` flag in a JSON body wins. Without one (or without
/// a JSON body at all) a 2xx status counts as acceptance.
pub fn classify_response(status: u16, body: &[u8]) -> RelayReply {
    let json = serde_json::from_slice::<Value>(body).ok();
    let flag = json.as_ref().and_then(|value| success_flag(value.get("success")?));
    let message = json
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    RelayReply {
        status,
        accepted: flag.unwrap_or((200..300).contains(&status)),
        message,
    }
}

fn success_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
