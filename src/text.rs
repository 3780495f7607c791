//! Identifier helpers: config keys snake_case/camelCase -> display labels.

/// Humanize a field key for display: "agent_id" -> "Agent Id",
/// "departureDate" -> "Departure Date". Used when a column or field omits
/// its label.
pub fn humanize(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut start_of_word = true;
    for c in s.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            start_of_word = true;
        } else if c.is_uppercase() {
            if !start_of_word {
                out.push(' ');
            }
            out.push(c);
            start_of_word = false;
        } else if start_of_word {
            out.extend(c.to_uppercase());
            start_of_word = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// String form of a JSON value for search matching and plain cells. Strings
/// come through unquoted; objects and arrays use their JSON form.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
