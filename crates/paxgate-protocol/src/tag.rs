use crate::error::{ProtocolError, ProtocolResult};

/// Extract the value between `<name>` and `</name>`.
///
/// First-match, non-greedy: the value ends at the first closing tag after
/// the first opening tag. Tag names are case-sensitive. The raw string is
/// returned; numeric coercion is the caller's concern.
pub fn tag_value<'a>(payload: &'a str, name: &str) -> ProtocolResult<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");

    let start = payload
        .find(&open)
        .ok_or_else(|| ProtocolError::TagNotFound(name.to_string()))?
        + open.len();
    let len = payload[start..]
        .find(&close)
        .ok_or_else(|| ProtocolError::TagNotFound(name.to_string()))?;

    Ok(&payload[start..start + len])
}
