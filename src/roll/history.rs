//! Roll log
//!
//! An append-only list of stored rolls. Besides appending and clearing, the
//! only mutation allowed is adding or stripping the `Sum:` annotation on
//! every line.

use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::OnceLock;

/// Matches a sum annotation, including the separating space
fn sum_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r" ?[Ss]um:? ?[\d.]+").expect("sum pattern should be valid regex")
    })
}

/// Sum of every purely numeric token on a line
pub fn line_sum(line: &str) -> u64 {
    line.split(' ')
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<u64>().ok())
        .sum()
}

fn strip_sum(line: &str) -> String {
    sum_pattern().replace_all(line, "").into_owned()
}

fn annotate(line: &str) -> String {
    let base = strip_sum(line);
    let base = base.trim_end();
    format!("{} Sum: {}", base, line_sum(base))
}

#[derive(Debug, Clone, Default)]
pub struct RollLog {
    lines: Vec<String>,
    last_stored: Option<DateTime<Local>>,
}

impl RollLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one roll as a line. Empty rolls are ignored.
    pub fn store(&mut self, values: &[u32], with_sum: bool) {
        if values.is_empty() {
            return;
        }

        let mut line = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        if with_sum {
            let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
            line.push_str(&format!(" Sum: {}", sum));
        }

        self.lines.push(line);
        self.last_stored = Some(Local::now());
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Add (or strip) the sum annotation on every line
    pub fn set_sums(&mut self, enabled: bool) {
        for line in &mut self.lines {
            *line = if enabled {
                annotate(line)
            } else {
                strip_sum(line)
            };
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_stored(&self) -> Option<DateTime<Local>> {
        self.last_stored
    }

    /// Full log text, one line per stored roll, newline terminated
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(rolls: &[&[u32]], with_sum: bool) -> RollLog {
        let mut log = RollLog::new();
        for roll in rolls {
            log.store(roll, with_sum);
        }
        log
    }

    #[test]
    fn test_store_format() {
        let log = log_with(&[&[3, 4], &[12]], false);
        assert_eq!(log.text(), "3 4\n12\n");

        let log = log_with(&[&[3, 4]], true);
        assert_eq!(log.lines(), &["3 4 Sum: 7".to_string()]);
        assert!(log.last_stored().is_some());
    }

    #[test]
    fn test_store_empty_is_noop() {
        let mut log = RollLog::new();
        log.store(&[], true);
        assert!(log.is_empty());
        assert_eq!(log.text(), "");
        assert!(log.last_stored().is_none());
    }

    #[test]
    fn test_line_sum() {
        assert_eq!(line_sum("1 2 3"), 6);
        assert_eq!(line_sum("10 20 Sum: 30.0"), 30);
        assert_eq!(line_sum("abc 5 x7 "), 5);
        assert_eq!(line_sum(""), 0);
    }

    #[test]
    fn test_enable_sums() {
        let mut log = log_with(&[&[1, 2, 3], &[6, 6]], false);
        log.set_sums(true);
        assert_eq!(log.text(), "1 2 3 Sum: 6\n6 6 Sum: 12\n");
    }

    #[test]
    fn test_disable_sums() {
        let mut log = log_with(&[&[1, 2, 3], &[6, 6]], true);
        log.set_sums(false);
        assert_eq!(log.text(), "1 2 3\n6 6\n");
    }

    #[test]
    fn test_disable_strips_legacy_forms() {
        let mut log = RollLog::new();
        log.lines = vec!["4 5 sum 9.0".into(), "4 5 Sum:9".into()];
        log.set_sums(false);
        assert_eq!(log.lines(), &["4 5".to_string(), "4 5".to_string()]);
    }

    #[test]
    fn test_toggle_twice_restores_content() {
        let plain = log_with(&[&[2, 9, 4], &[1]], false);
        let mut log = plain.clone();
        log.set_sums(true);
        log.set_sums(false);
        assert_eq!(log.lines(), plain.lines());

        let summed = log_with(&[&[2, 9, 4], &[1]], true);
        let mut log = summed.clone();
        log.set_sums(false);
        log.set_sums(true);
        assert_eq!(log.lines(), summed.lines());
    }

    #[test]
    fn test_same_toggle_twice_is_idempotent() {
        let mut log = log_with(&[&[5, 5]], false);
        log.set_sums(true);
        let once = log.text();
        log.set_sums(true);
        assert_eq!(log.text(), once);

        log.set_sums(false);
        let off = log.text();
        log.set_sums(false);
        assert_eq!(log.text(), off);
    }

    #[test]
    fn test_clear() {
        let mut log = log_with(&[&[1, 2]], true);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
