//! Parsing of the engine's text transcript.
//!
//! A transcript looks like:
//!
//! ```text
//! /tmp/a: OK
//! /tmp/b: Eicar-Test-Signature FOUND
//!
//! ----------- SCAN SUMMARY -----------
//! Known viruses: 8697190
//! Infected files: 1
//! ```
//!
//! Lines before the separator are per-file verdicts, lines after it are
//! `Key: value` summary statistics. Verdict lines that are neither `OK` nor
//! `<signature> FOUND` are dropped without error.
//!
//! Lines break on `\n`, `\r\n` and `\r`, and also on the vertical tab,
//! form feed, the `\x1c`..`\x1e` separators, NEL and the Unicode line and
//! paragraph separators.

use crate::core::types::EntryStatus;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Exact line separating per-file verdicts from the summary block.
pub const SUMMARY_SEPARATOR: &str = "----------- SCAN SUMMARY -----------";

const ENTRY_DELIMITER: &str = ": ";
const CLEAN_MARKER: &str = "OK";
const FOUND_SUFFIX: &str = " FOUND";

/// Raw output captured from one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Everything the engine wrote to standard output.
    pub stdout: String,
    /// Process exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

impl Transcript {
    /// Creates a transcript from captured stdout.
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: None,
        }
    }

    /// Sets the process exit code.
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    /// Returns `true` if the literal `FOUND` appears anywhere in stdout.
    pub fn mentions_detection(&self) -> bool {
        self.stdout.contains("FOUND")
    }

    /// Parses the transcript into structured records.
    pub fn parse(&self) -> ParsedTranscript {
        ParsedTranscript::parse(&self.stdout)
    }
}

/// One per-path verdict from the transcript.
///
/// `signature` is `Some` exactly when `status` is `Infected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path as printed by the engine.
    pub path: String,
    /// Verdict.
    pub status: EntryStatus,
    /// Detected signature name.
    pub signature: Option<String>,
}

impl FileEntry {
    /// Creates a clean entry.
    pub fn clean(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: EntryStatus::Clean,
            signature: None,
        }
    }

    /// Creates an infected entry.
    pub fn infected(path: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: EntryStatus::Infected,
            signature: Some(signature.into()),
        }
    }

    /// Returns `true` if the entry is infected.
    pub fn is_infected(&self) -> bool {
        self.status == EntryStatus::Infected
    }

    /// Parses a single verdict line. Returns `None` for anything that is not
    /// `<path>: OK` or `<path>: <signature> FOUND`.
    fn parse_line(line: &str) -> Option<Self> {
        let (path, rest) = line.split_once(ENTRY_DELIMITER)?;
        let rest = rest.trim();

        if rest == CLEAN_MARKER {
            Some(Self::clean(path))
        } else {
            rest.strip_suffix(FOUND_SUFFIX)
                .map(|signature| Self::infected(path, signature.trim()))
        }
    }
}

/// Ordered `label -> value` table from the summary block.
///
/// Values are kept verbatim. Re-inserting a key replaces its value in place,
/// so iteration order is first-seen order and the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTable {
    entries: Vec<(String, String)>,
}

impl SummaryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a value by label.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(label, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SummaryTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Structured view of one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTranscript {
    /// Recognised per-path verdicts, in transcript order.
    pub file_results: Vec<FileEntry>,
    /// Number of infected entries in `file_results`.
    pub infected_count: usize,
    /// Summary statistics.
    pub summary: SummaryTable,
    /// The transcript with outer whitespace trimmed.
    pub raw_output: String,
    /// Every transcript line, verbatim and in order.
    pub lines: Vec<String>,
}

impl ParsedTranscript {
    /// Parses a complete transcript. Pure; never fails.
    pub fn parse(stdout: &str) -> Self {
        let lines: Vec<String> = split_lines(stdout);

        let (file_lines, summary_lines) =
            match lines.iter().position(|line| line == SUMMARY_SEPARATOR) {
                Some(idx) => (&lines[..idx], &lines[idx + 1..]),
                None => (&lines[..], &lines[lines.len()..]),
            };

        let file_results: Vec<FileEntry> = file_lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let entry = FileEntry::parse_line(line);
                if entry.is_none() {
                    tracing::trace!(line = %line, "Ignoring unrecognised transcript line");
                }
                entry
            })
            .collect();

        let mut summary = SummaryTable::new();
        for line in summary_lines {
            if let Some((key, value)) = line.split_once(':') {
                summary.insert(key.trim(), value.trim());
            }
        }

        let infected_count = file_results.iter().filter(|e| e.is_infected()).count();

        Self {
            file_results,
            infected_count,
            summary,
            raw_output: stdout.trim().to_string(),
            lines,
        }
    }

    /// Infected entries only.
    pub fn detections(&self) -> impl Iterator<Item = &FileEntry> {
        self.file_results.iter().filter(|e| e.is_infected())
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits on every line break, treating `\r\n` as one. A trailing break does
/// not produce an empty final line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                lines.push(rest[..idx].to_owned());
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
            }
            None => {
                lines.push(rest.to_owned());
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const EICAR_TRANSCRIPT: &str = "/tmp/a: OK\n/tmp/b: Eicar-Test-Signature FOUND\n----------- SCAN SUMMARY -----------\nInfected files: 1\n";

    #[test]
    fn test_parse_mixed_transcript() {
        let parsed = ParsedTranscript::parse(EICAR_TRANSCRIPT);

        assert_eq!(
            parsed.file_results,
            vec![
                FileEntry::clean("/tmp/a"),
                FileEntry::infected("/tmp/b", "Eicar-Test-Signature"),
            ]
        );
        assert_eq!(parsed.infected_count, 1);
        assert_eq!(parsed.summary.len(), 1);
        assert_eq!(parsed.summary.get("Infected files"), Some("1"));
    }

    #[test]
    fn test_lines_and_raw_output_preserved() {
        let parsed = ParsedTranscript::parse(EICAR_TRANSCRIPT);

        assert_eq!(parsed.lines.len(), 4);
        assert_eq!(parsed.lines[2], SUMMARY_SEPARATOR);
        assert_eq!(parsed.raw_output, EICAR_TRANSCRIPT.trim());
    }

    #[test]
    fn test_no_separator_means_no_summary() {
        let parsed = ParsedTranscript::parse("/tmp/a: OK\nScanned files: 3\n");

        assert!(parsed.summary.is_empty());
        assert_eq!(parsed.file_results, vec![FileEntry::clean("/tmp/a")]);
    }

    #[test]
    fn test_separator_partitions_lines() {
        // A verdict-looking line after the separator is summary, not an entry.
        let transcript = format!(
            "/tmp/a: OK\n{}\n/tmp/c: Evil FOUND\nTime: 0.5 sec\n",
            SUMMARY_SEPARATOR
        );
        let parsed = ParsedTranscript::parse(&transcript);

        assert_eq!(parsed.file_results, vec![FileEntry::clean("/tmp/a")]);
        assert_eq!(parsed.infected_count, 0);
        assert_eq!(parsed.summary.get("/tmp/c"), Some("Evil FOUND"));
        assert_eq!(parsed.summary.get("Time"), Some("0.5 sec"));
    }

    #[test]
    fn test_signature_whitespace_stripped() {
        let parsed = ParsedTranscript::parse("/x:   Win.Trojan.Agent-1   FOUND   \n");

        assert_eq!(
            parsed.file_results,
            vec![FileEntry::infected("/x", "Win.Trojan.Agent-1")]
        );
    }

    #[test]
    fn test_path_with_delimiter_splits_on_first_occurrence() {
        let parsed = ParsedTranscript::parse("/tmp/odd: name.txt: OK\n");

        // Splitting on the first ": " leaves "name.txt: OK" as the verdict,
        // which is not recognised.
        assert!(parsed.file_results.is_empty());

        let parsed = ParsedTranscript::parse("/tmp/odd:name.txt: Eicar FOUND\n");
        assert_eq!(
            parsed.file_results,
            vec![FileEntry::infected("/tmp/odd:name.txt", "Eicar")]
        );
    }

    #[test]
    fn test_unrecognised_lines_silently_dropped() {
        let transcript = "/tmp/a: OK\n/tmp/b: Symbolic link\n/tmp/c: Access denied. ERROR\nLibClamAV Warning something\n\n   \n/tmp/d: Foo FOUND\n";
        let parsed = ParsedTranscript::parse(transcript);

        assert_eq!(
            parsed.file_results,
            vec![FileEntry::clean("/tmp/a"), FileEntry::infected("/tmp/d", "Foo")]
        );
        assert_eq!(parsed.infected_count, 1);
        // Dropped lines remain visible in the raw line sequence.
        assert_eq!(parsed.lines.len(), 7);
    }

    #[test]
    fn test_duplicate_summary_key_last_wins() {
        let transcript = format!(
            "{}\nScanned files: 1\nTime: 1 sec\nScanned files: 2\n",
            SUMMARY_SEPARATOR
        );
        let parsed = ParsedTranscript::parse(&transcript);

        assert_eq!(parsed.summary.get("Scanned files"), Some("2"));
        let keys: Vec<&str> = parsed.summary.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Scanned files", "Time"]);
    }

    #[test]
    fn test_summary_value_split_on_first_colon() {
        let transcript = format!("{}\nStart Date: 2024:01:02 10:11:12\n", SUMMARY_SEPARATOR);
        let parsed = ParsedTranscript::parse(&transcript);

        assert_eq!(parsed.summary.get("Start Date"), Some("2024:01:02 10:11:12"));
    }

    #[test]
    fn test_infected_count_matches_entries() {
        let transcript = "/a: X FOUND\n/b: OK\n/c: Y FOUND\n/d: Z FOUND\n";
        let parsed = ParsedTranscript::parse(transcript);

        assert_eq!(parsed.infected_count, 3);
        assert_eq!(parsed.detections().count(), parsed.infected_count);
        for entry in &parsed.file_results {
            assert_eq!(entry.signature.is_some(), entry.is_infected());
        }
    }

    #[test]
    fn test_empty_transcript() {
        let parsed = ParsedTranscript::parse("");

        assert!(parsed.file_results.is_empty());
        assert!(parsed.summary.is_empty());
        assert!(parsed.lines.is_empty());
        assert_eq!(parsed.raw_output, "");
    }

    #[test]
    fn test_summary_serializes_in_order() {
        let mut table = SummaryTable::new();
        table.insert("Scanned files", "2");
        table.insert("Infected files", "0");

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"Scanned files":"2","Infected files":"0"}"#);
    }

    #[test]
    fn test_transcript_mentions_detection() {
        assert!(Transcript::new("/tmp/b: Eicar FOUND").mentions_detection());
        assert!(!Transcript::new("/tmp/b: OK").mentions_detection());
    }

    #[test]
    fn test_split_lines_on_every_break() {
        assert_eq!(split_lines(""), Vec::<String>::new());
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\r\nb\rc\n\nd"), vec!["a", "b", "c", "", "d"]);
        assert_eq!(
            split_lines("a\x0bb\x0cc\x1cd\u{85}e\u{2028}f"),
            vec!["a", "b", "c", "d", "e", "f"]
        );
    }

    #[test]
    fn test_carriage_return_transcript() {
        let parsed = ParsedTranscript::parse(
            "/tmp/a: OK\r/tmp/b: Evil FOUND\r----------- SCAN SUMMARY -----------\rInfected files: 1\r",
        );

        assert_eq!(parsed.lines.len(), 4);
        assert_eq!(parsed.infected_count, 1);
        assert_eq!(parsed.summary.get("Infected files"), Some("1"));
    }
}
