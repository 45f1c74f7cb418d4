/// Build an `export VAR=value` line for the calling shell to `eval`.
pub fn export_line(var: &str, value: &str) -> String {
    format!("export {var}={}", quote(value))
}

/// Assign `var` and record `marker` in `marker_var` on one line.
///
/// An empty marker unsets `marker_var` so a later run does not strip a
/// segment that is no longer in `var`.
pub fn state_line(var: &str, value: &str, marker_var: &str, marker: &str) -> String {
    if marker.is_empty() {
        format!("{}; unset {marker_var}", export_line(var, value))
    } else {
        format!("export {var}={} {marker_var}={}", quote(value), quote(marker))
    }
}

/// Single-quote `value` unless every character is shell-safe.
pub fn quote(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_safe) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "/._:+,@%=-".contains(ch)
}
