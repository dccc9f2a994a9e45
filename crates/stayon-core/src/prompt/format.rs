//! Light markdown cleanup for follow-up replies before they are shown.
//!
//! - Lines starting with a section emoji become bold headings (trailing colon dropped).
//! - `-` and `•` bullets are normalized to `- `.
//! - Plain bullets following a bold bullet are indented one level.

const HEADING_MARKERS: [&str; 6] = ["▶️", "✅", "📌", "❗", "📝", "📍"];

pub fn tidy_reply(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut indent_next = false;

    for raw in text.trim().lines() {
        let line = raw.trim();
        if line.is_empty() {
            out.push(String::new());
            indent_next = false;
            continue;
        }

        if let Some(heading) = as_heading(line) {
            out.push(format!("**{heading}**\n"));
            indent_next = false;
            continue;
        }

        if let Some(rest) = strip_bullet(line) {
            let is_bold = rest.starts_with("**") && rest[2..].contains("**");
            if is_bold {
                out.push(format!("- {rest}"));
                indent_next = true;
            } else if indent_next {
                out.push(format!("    - {rest}"));
            } else {
                out.push(format!("- {rest}"));
            }
            continue;
        }

        out.push(line.to_string());
        indent_next = false;
    }

    format!("{}\n", out.join("\n").trim())
}

fn as_heading(line: &str) -> Option<&str> {
    let marker = HEADING_MARKERS.iter().find(|m| line.starts_with(**m))?;
    if line[marker.len()..].trim().is_empty() {
        return None;
    }
    Some(line.trim_end_matches([':', '：', ' ']))
}

fn strip_bullet(line: &str) -> Option<&str> {
    // Horizontal rules are not bullets.
    if line.starts_with("--") {
        return None;
    }
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))?;
    Some(rest.trim_start())
}
