/// Turns a raw OSM tag key into an `osmt:` local name.
///
/// Only spaces are escaped. `:` passes through as-is, so keys such as
/// `addr:street` end up as `osmt:addr:street`.
pub fn encode_tag_key(raw_key: &str) -> String {
    raw_key.replace(' ', "%20")
}

fn is_role_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Encodes a relation member role so it can be appended to the
/// `osmx:hasrole` local name. Anything outside `[A-Za-z0-9_-]` is written as
/// `%HH` for each UTF-8 byte.
pub fn encode_role(role: &str) -> String {
    if role.chars().all(is_role_safe) {
        return role.to_string();
    }
    let mut encoded = String::with_capacity(role.len() * 3);
    for c in role.chars() {
        if is_role_safe(c) {
            encoded.push(c);
        } else {
            let mut bytes = [0; 4];
            for byte in c.encode_utf8(&mut bytes).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}
