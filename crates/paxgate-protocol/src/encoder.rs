/// Serialize tag/value pairs inside a root element.
///
/// Output is byte-exact: pairs are emitted in the order given, with no
/// whitespace and no escaping. Firmware parsers are minimal and
/// positionally sensitive, so the caller's ordering is the wire contract.
pub fn encode_response(root: &str, pairs: &[(&str, &str)]) -> String {
    let body_len: usize = pairs
        .iter()
        .map(|(tag, value)| tag.len() * 2 + value.len() + 5)
        .sum();
    let mut out = String::with_capacity(root.len() * 2 + 5 + body_len);

    out.push('<');
    out.push_str(root);
    out.push('>');
    for (tag, value) in pairs {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(value);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out.push_str("</");
    out.push_str(root);
    out.push('>');
    out
}
