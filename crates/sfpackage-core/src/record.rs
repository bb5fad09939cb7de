use serde::{Deserialize, Serialize};

/// Operation git reported for a changed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    /// Copy, type change, unmerged or any other code
    Other(char),
}

impl ChangeStatus {
    pub fn from_code(code: char) -> Self {
        match code {
            'A' => Self::Added,
            'M' => Self::Modified,
            'D' => Self::Deleted,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Other(code) => *code,
        }
    }
}

/// One line of `git diff --name-status` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub status: ChangeStatus,
    pub path: String,
}

impl ChangeRecord {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    /// Parse a single name-status line.
    ///
    /// The first character is the status code and the trimmed remainder is
    /// the path. Returns `None` for lines that carry no path.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let code = chars.next()?;
        let path = chars.as_str().trim();

        if path.is_empty() {
            return None;
        }

        Some(Self::new(ChangeStatus::from_code(code), path))
    }
}

/// Parse newline separated name-status text, skipping blank lines
pub fn parse_name_status(text: &str) -> Vec<ChangeRecord> {
    text.lines().filter_map(ChangeRecord::parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_separated_line() {
        let record = ChangeRecord::parse_line("M\tforce-app/main/default/classes/Foo.cls").unwrap();
        assert_eq!(record.status, ChangeStatus::Modified);
        assert_eq!(record.path, "force-app/main/default/classes/Foo.cls");
    }

    #[test]
    fn test_parse_space_separated_line() {
        let record = ChangeRecord::parse_line("D   force-app/classes/Bar.cls  ").unwrap();
        assert_eq!(record.status, ChangeStatus::Deleted);
        assert_eq!(record.path, "force-app/classes/Bar.cls");
    }

    #[test]
    fn test_unknown_code_is_other() {
        let record = ChangeRecord::parse_line("T\tforce-app/classes/Foo.cls").unwrap();
        assert_eq!(record.status, ChangeStatus::Other('T'));
        assert_eq!(record.status.code(), 'T');
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert!(ChangeRecord::parse_line("").is_none());
        assert!(ChangeRecord::parse_line("   ").is_none());
        assert!(ChangeRecord::parse_line("M").is_none());

        let records = parse_name_status("A\tforce-app/a.cls\n\n\nD\tforce-app/b.cls\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, ChangeStatus::Added);
        assert_eq!(records[1].path, "force-app/b.cls");
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse_name_status("M\tforce-app/a.cls\r\nA\tforce-app/b.cls\r\n");
        assert_eq!(records[0].path, "force-app/a.cls");
        assert_eq!(records[1].path, "force-app/b.cls");
    }
}
