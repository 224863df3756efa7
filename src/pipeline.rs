//! Line-oriented evaluation used by the `optional-pipe` binary.
//!
//! Each input line is one entry. Blank lines and the literal `null` are
//! absent; everything else is trimmed, parsed as an integer and kept only
//! when it reaches the configured minimum.

use crate::Optional;

pub const NULL_LITERAL: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    min: i64,
}

impl Pipeline {
    pub fn new(min: i64) -> Self {
        Pipeline { min }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Reads one line as a possibly absent entry.
    pub fn entry(line: &str) -> Optional<String> {
        let trimmed = line.trim();
        Optional::of_nullable(
            (!trimmed.is_empty() && trimmed != NULL_LITERAL).then(|| trimmed.to_string()),
        )
    }

    pub fn run(&self, line: &str) -> Optional<i64> {
        Self::entry(line)
            .map(|text| text.parse::<i64>().ok())
            .filter(|n| *n >= self.min)
    }

    /// Runs every line and returns the results in input order.
    pub fn run_all<'a, I>(&self, lines: I) -> Vec<Optional<i64>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(|line| self.run(line)).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_absent_forms() {
        assert!(Pipeline::entry("").is_empty());
        assert!(Pipeline::entry("   ").is_empty());
        assert!(Pipeline::entry(" null ").is_empty());
        assert_eq!(Pipeline::entry(" 12 ").get().map(String::as_str), Ok("12"));
    }

    #[test]
    fn test_run() {
        let pipeline = Pipeline::new(10);
        assert_eq!(pipeline.run("42").to_string(), "Optional[42]");
        assert_eq!(pipeline.run("3").to_string(), "Optional.empty");
        assert_eq!(pipeline.run("forty").to_string(), "Optional.empty");
        assert_eq!(pipeline.run("null").to_string(), "Optional.empty");
    }

    #[test]
    fn test_run_all_keeps_order() {
        let results = Pipeline::default().run_all(["1", "", "-4", "7"]);
        let rendered: Vec<String> = results.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["Optional[1]", "Optional.empty", "Optional.empty", "Optional[7]"]
        );
    }
}
