//! Transcript naming and JSON encoding.
//!
//! Filenames look like `{customer}_{YYMMDD-HHMMSS}.json`. The timestamp is the
//! last `_`-separated segment, which is what listing sorts on.
//!
//! Two on-disk shapes are readable:
//! - a JSON object (the structured document), and
//! - a bare JSON array of turns, written by the first release.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;

use stayon_types::chat::ChatTurn;
use stayon_types::error::TranscriptError;
use stayon_types::transcript::{LoadedTranscript, Transcript, TranscriptFormat};

pub const TIMESTAMP_FORMAT: &str = "%y%m%d-%H%M%S";
pub const EXTENSION: &str = ".json";

/// Stand-in customer name for files saved before a name was entered.
pub const UNNAMED_CUSTOMER: &str = "unnamed";

/// Build the filename for a save at `now`.
pub fn transcript_filename(customer_name: &str, now: DateTime<FixedOffset>) -> String {
    format!(
        "{}_{}{EXTENSION}",
        sanitize_customer_name(customer_name),
        now.format(TIMESTAMP_FORMAT)
    )
}

/// Make a customer name safe to use as a filename prefix.
pub fn sanitize_customer_name(name: &str) -> String {
    let cleaned = name.trim().replace(['/', '\\'], "-").replace("..", "-");
    if cleaned.is_empty() {
        UNNAMED_CUSTOMER.to_string()
    } else {
        cleaned
    }
}

/// Reject anything that could escape its directory.
pub fn validate_path_segment(segment: &str) -> Result<(), TranscriptError> {
    if segment.trim().is_empty()
        || segment.contains(['/', '\\', '\0'])
        || segment.contains("..")
    {
        return Err(TranscriptError::InvalidName(segment.to_string()));
    }
    Ok(())
}

/// A transcript filename must be a plain segment ending in `.json`.
pub fn validate_filename(filename: &str) -> Result<(), TranscriptError> {
    validate_path_segment(filename)?;
    if !filename.ends_with(EXTENSION) || filename.len() == EXTENSION.len() {
        return Err(TranscriptError::InvalidName(filename.to_string()));
    }
    Ok(())
}

/// The `YYMMDD-HHMMSS` part of a filename, if it has one.
pub fn filename_timestamp(filename: &str) -> Option<&str> {
    let stem = filename.strip_suffix(EXTENSION).unwrap_or(filename);
    stem.rsplit_once('_').map(|(_, ts)| ts)
}

/// The customer-name prefix of a filename.
pub fn customer_from_filename(filename: &str) -> &str {
    let stem = filename.strip_suffix(EXTENSION).unwrap_or(filename);
    stem.rsplit_once('_').map_or(stem, |(customer, _)| customer)
}

/// Order filenames by embedded timestamp, newest first. Ties fall back to name.
pub fn sort_newest_first(files: &mut [String]) {
    files.sort_by(|a, b| {
        let ka = filename_timestamp(a).unwrap_or_default();
        let kb = filename_timestamp(b).unwrap_or_default();
        kb.cmp(ka).then_with(|| a.cmp(b))
    });
}

/// Case-insensitive substring filter. An empty keyword keeps everything.
pub fn search(files: &[String], keyword: &str) -> Vec<String> {
    let needle = keyword.trim().to_lowercase();
    files
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Pretty-print with four-space indentation. Non-ASCII is written as-is.
pub fn encode(transcript: &Transcript) -> Result<String, TranscriptError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    transcript
        .serialize(&mut serializer)
        .map_err(|e| TranscriptError::Malformed(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| TranscriptError::Malformed(e.to_string()))
}

/// Decode either on-disk shape.
pub fn decode(filename: &str, bytes: &[u8]) -> Result<LoadedTranscript, TranscriptError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| TranscriptError::Malformed(format!("{filename}: {e}")))?;

    let (format, transcript) = match value {
        Value::Array(_) => {
            let messages: Vec<ChatTurn> = serde_json::from_value(value)
                .map_err(|e| TranscriptError::Malformed(format!("{filename}: {e}")))?;
            let transcript = Transcript {
                messages,
                ..Transcript::default()
            };
            (TranscriptFormat::Legacy, transcript)
        }
        Value::Object(_) => {
            let mut transcript: Transcript = serde_json::from_value(value)
                .map_err(|e| TranscriptError::Malformed(format!("{filename}: {e}")))?;
            if transcript.customer_name.trim().is_empty() {
                transcript.customer_name = customer_from_filename(filename).to_string();
            }
            (TranscriptFormat::Structured, transcript)
        }
        other => {
            return Err(TranscriptError::Malformed(format!(
                "{filename}: expected an object or an array, found {}",
                json_kind(&other)
            )));
        }
    };

    Ok(LoadedTranscript {
        filename: filename.to_string(),
        format,
        transcript,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn filename_uses_local_timestamp() {
        let name = transcript_filename("Hong Gildong", kst(2025, 3, 7, 14, 5, 9));
        assert_eq!(name, "Hong Gildong_250307-140509.json");
    }

    #[test]
    fn filename_replaces_separators_in_customer_name() {
        let name = transcript_filename("A/B\\C..D", kst(2025, 1, 1, 0, 0, 0));
        assert_eq!(name, "A-B-C-D_250101-000000.json");
        assert!(validate_filename(&name).is_ok());
    }

    #[test]
    fn blank_customer_name_is_unnamed() {
        let name = transcript_filename("  ", kst(2025, 1, 1, 0, 0, 0));
        assert_eq!(name, "unnamed_250101-000000.json");
    }

    #[test]
    fn validate_rejects_traversal() {
        for bad in ["../x.json", "a/b.json", "a\\b.json", "..json", "", "notes.txt", ".json"] {
            assert!(
                matches!(validate_filename(bad), Err(TranscriptError::InvalidName(_))),
                "accepted {bad:?}"
            );
        }
        assert!(validate_filename("Lee_250101-000000.json").is_ok());
    }

    #[test]
    fn timestamp_and_customer_are_split_on_last_underscore() {
        assert_eq!(filename_timestamp("Kim_Ji_250101-093000.json"), Some("250101-093000"));
        assert_eq!(customer_from_filename("Kim_Ji_250101-093000.json"), "Kim_Ji");
        assert_eq!(customer_from_filename("plain.json"), "plain");
        assert_eq!(filename_timestamp("plain.json"), None);
    }

    #[test]
    fn sort_puts_newest_first() {
        let mut files = vec![
            "B_250101-100000.json".to_string(),
            "A_250301-090000.json".to_string(),
            "C_241231-235959.json".to_string(),
        ];
        sort_newest_first(&mut files);
        assert_eq!(
            files,
            vec![
                "A_250301-090000.json",
                "B_250101-100000.json",
                "C_241231-235959.json"
            ]
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let files = vec!["Hong_250101-000000.json".to_string(), "Lee_250101-000000.json".to_string()];
        assert_eq!(search(&files, "hONG"), vec!["Hong_250101-000000.json"]);
        assert_eq!(search(&files, "").len(), 2);
        assert!(search(&files, "park").is_empty());
    }

    #[test]
    fn encode_is_indented_and_keeps_non_ascii() {
        let transcript = Transcript {
            customer_name: "홍길동".to_string(),
            ..Transcript::default()
        };
        let json = encode(&transcript).unwrap();
        assert!(json.contains("\n    \"customerName\": \"홍길동\""));
    }

    #[test]
    fn structured_round_trip() {
        let transcript = Transcript {
            customer_name: "Hong".to_string(),
            urgency_tier: "high (very firm)".to_string(),
            situation_text: "switching to a friend's agency".to_string(),
            script_text: "Hello".to_string(),
            emphasis_topics: vec!["brand_trust".to_string()],
            messages: vec![ChatTurn::assistant("Hello"), ChatTurn::user("next?")],
        };
        let json = encode(&transcript).unwrap();
        let loaded = decode("Hong_250101-000000.json", json.as_bytes()).unwrap();
        assert_eq!(loaded.format, TranscriptFormat::Structured);
        assert_eq!(loaded.transcript, transcript);
    }

    #[test]
    fn legacy_array_has_empty_metadata() {
        let json = r#"[{"role": "ai", "content": "script"}, {"role": "user", "content": "q"}]"#;
        let loaded = decode("Old_240101-000000.json", json.as_bytes()).unwrap();
        assert_eq!(loaded.format, TranscriptFormat::Legacy);
        assert_eq!(
            loaded.transcript.messages,
            vec![ChatTurn::assistant("script"), ChatTurn::user("q")]
        );
        assert!(loaded.transcript.customer_name.is_empty());
        assert!(loaded.transcript.script_text.is_empty());
        assert!(loaded.transcript.urgency_tier.is_empty());
    }

    #[test]
    fn structured_without_name_uses_filename_prefix() {
        let json = r#"{"script_context": "Hello"}"#;
        let loaded = decode("Park_250101-000000.json", json.as_bytes()).unwrap();
        assert_eq!(loaded.transcript.customer_name, "Park");
        assert_eq!(loaded.transcript.script_text, "Hello");
    }

    #[test]
    fn other_shapes_are_malformed() {
        for body in ["42", "\"text\"", "null", "{not json"] {
            assert!(matches!(
                decode("x_250101-000000.json", body.as_bytes()),
                Err(TranscriptError::Malformed(_))
            ));
        }
    }
}
