use crate::shared::Result;
use serde_json::Value;
use std::time::Duration;

/// Builds the shared reqwest client with the crate user agent
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let user_agent = format!("wp-plugin-compat/{}", env!("CARGO_PKG_VERSION"));
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Strips trailing slashes so paths can be appended with `/`
pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Reads a loosely typed scalar field as text
///
/// Strings are returned as-is and numbers in their JSON rendering; any
/// other shape counts as absent.
pub(crate) fn scalar_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
