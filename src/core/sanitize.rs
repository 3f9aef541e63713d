// src/core/sanitize.rs

/// File stem for a per-group export. Umlauts are folded so the name
/// survives every filesystem; `idx` keeps unnamed groups apart.
pub fn sanitize_group_filename(name: &str, idx: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        let folded = match ch {
            'ä' => Some("ae"), 'ö' => Some("oe"), 'ü' => Some("ue"),
            'Ä' => Some("Ae"), 'Ö' => Some("Oe"), 'Ü' => Some("Ue"),
            'ß' => Some("ss"),
            _ => None,
        };
        if let Some(f) = folded { out.push_str(f); last_us = false; }
        else if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { format!("gruppe_{}", idx) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_names() {
        assert_eq!(sanitize_group_filename("  Die schnellen Füße ", 0), "Die_schnellen_Fuesse");
        assert_eq!(sanitize_group_filename("???", 3), "gruppe_3");
    }
}
