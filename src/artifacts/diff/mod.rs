//! Line-oriented diff built on a longest-common-subsequence table
//!
//! The engine produces the full edit script rather than grouped hunks:
//! common lines carry no prefix, deletions a `-`, additions a `+`. The
//! observable contract is that applying the script to the old text yields
//! the new text; for identical inputs the script is empty and the file is
//! omitted from the report entirely.

use std::fmt;
use std::path::{Path, PathBuf};

/// One line of an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Deletion(String),
    Addition(String),
}

/// Edit script for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub lines: Vec<DiffLine>,
}

/// Diff listing across one or more source/target pairings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub files: Vec<FileDiff>,
}

impl DiffReport {
    pub fn push(&mut self, file_diff: Option<FileDiff>) {
        if let Some(file_diff) = file_diff {
            self.files.push(file_diff);
        }
    }
}

/// Split into lines on `\n`; a final newline does not produce an empty
/// trailing line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// `table[i][j]` holds the LCS length of `old[i..]` and `new[j..]`.
fn lcs_table(old: &[String], new: &[String]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];

    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            table[i][j] = if old[i] == new[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    table
}

/// Walk the table from `(0, 0)` emitting the edit script. Ties prefer the
/// deletion, so removed lines print before their replacements.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let old = split_lines(old_text);
    let new = split_lines(new_text);
    let table = lcs_table(&old, &new);

    let mut lines = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            lines.push(DiffLine::Context(old[i].clone()));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            lines.push(DiffLine::Deletion(old[i].clone()));
            i += 1;
        } else {
            lines.push(DiffLine::Addition(new[j].clone()));
            j += 1;
        }
    }
    while i < old.len() {
        lines.push(DiffLine::Deletion(old[i].clone()));
        i += 1;
    }
    while j < new.len() {
        lines.push(DiffLine::Addition(new[j].clone()));
        j += 1;
    }

    lines
}

/// Diff one file; `None` when both sides are byte-identical.
pub fn diff_file(path: &Path, old: &[u8], new: &[u8]) -> Option<FileDiff> {
    if old == new {
        return None;
    }

    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);

    Some(FileDiff {
        path: path.to_path_buf(),
        lines: diff_lines(&old_text, &new_text),
    })
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        writeln!(f, "diff --git a/{path} b/{path}")?;
        writeln!(f, "--- a/{path}")?;
        writeln!(f, "+++ b/{path}")?;

        for line in &self.lines {
            match line {
                DiffLine::Context(text) => writeln!(f, "{text}")?,
                DiffLine::Deletion(text) => writeln!(f, "-{text}")?,
                DiffLine::Addition(text) => writeln!(f, "+{text}")?,
            }
        }

        Ok(())
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file_diff in &self.files {
            write!(f, "{file_diff}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Vec::<String>::new())]
    #[case("a", vec!["a".to_string()])]
    #[case("a\n", vec!["a".to_string()])]
    #[case("a\nb", vec!["a".to_string(), "b".to_string()])]
    #[case("a\n\n", vec!["a".to_string(), String::new()])]
    #[case("\n", vec![String::new()])]
    fn test_split_lines(#[case] text: &str, #[case] expected: Vec<String>) {
        assert_eq!(split_lines(text), expected);
    }

    #[test]
    fn test_single_line_replacement() {
        let lines = diff_lines("a\nb\nc\n", "a\nB\nc\n");
        assert_eq!(
            lines,
            vec![
                DiffLine::Context("a".to_string()),
                DiffLine::Deletion("b".to_string()),
                DiffLine::Addition("B".to_string()),
                DiffLine::Context("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_identical_inputs_produce_no_file_diff() {
        assert_eq!(diff_file(Path::new("a.txt"), b"same\n", b"same\n"), None);
    }

    #[test]
    fn test_unified_rendering() {
        let file_diff = diff_file(Path::new("a.txt"), b"a\nb\nc\n", b"a\nB\nc\n").unwrap();
        assert_eq!(
            file_diff.to_string(),
            "diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\na\n-b\n+B\nc\n"
        );
    }

    #[test]
    fn test_pure_addition_and_deletion() {
        let added = diff_lines("", "x\ny\n");
        assert_eq!(
            added,
            vec![
                DiffLine::Addition("x".to_string()),
                DiffLine::Addition("y".to_string()),
            ]
        );

        let removed = diff_lines("x\ny\n", "");
        assert_eq!(
            removed,
            vec![
                DiffLine::Deletion("x".to_string()),
                DiffLine::Deletion("y".to_string()),
            ]
        );
    }

    /// Replaying the script must reconstruct both sides: context plus
    /// deletions is the old text, context plus additions the new.
    fn replay(lines: &[DiffLine]) -> (Vec<String>, Vec<String>) {
        let mut old = Vec::new();
        let mut new = Vec::new();
        for line in lines {
            match line {
                DiffLine::Context(text) => {
                    old.push(text.clone());
                    new.push(text.clone());
                }
                DiffLine::Deletion(text) => old.push(text.clone()),
                DiffLine::Addition(text) => new.push(text.clone()),
            }
        }
        (old, new)
    }

    proptest! {
        #[test]
        fn test_edit_script_transforms_old_into_new(
            old in proptest::collection::vec("[abc]{0,3}", 0..8),
            new in proptest::collection::vec("[abc]{0,3}", 0..8),
        ) {
            let old_text = old.iter().map(|line| format!("{line}\n")).collect::<String>();
            let new_text = new.iter().map(|line| format!("{line}\n")).collect::<String>();

            let (replayed_old, replayed_new) = replay(&diff_lines(&old_text, &new_text));
            prop_assert_eq!(replayed_old, split_lines(&old_text));
            prop_assert_eq!(replayed_new, split_lines(&new_text));
        }

        #[test]
        fn test_identical_inputs_yield_pure_context(
            lines in proptest::collection::vec("[abc]{0,3}", 0..8),
        ) {
            let text = lines.iter().map(|line| format!("{line}\n")).collect::<String>();
            let script = diff_lines(&text, &text);
            prop_assert!(script.iter().all(|line| matches!(line, DiffLine::Context(_))));
        }
    }
}
