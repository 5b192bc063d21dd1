//! Line buffer that splits file text and joins it back byte-for-byte.

/// Separator used between lines of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect from the first line break; files without one default to `\n`.
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(i) if content[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// The lines of one file plus what is needed to reproduce it exactly.
///
/// Every line keeps its own terminator, so files that mix `\n` and `\r\n`
/// join back unchanged. Lines added with [`push`](Self::push) use the
/// file's detected [`LineEnding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lines {
    pub lines: Vec<String>,
    pub ending: LineEnding,
    /// Terminator after each line; `None` only for a last line without one.
    terminators: Vec<Option<LineEnding>>,
}

impl Lines {
    pub fn split(content: &str) -> Self {
        let mut lines = Vec::new();
        let mut terminators = Vec::new();
        for piece in content.split_inclusive('\n') {
            let (text, terminator) = if let Some(text) = piece.strip_suffix("\r\n") {
                (text, Some(LineEnding::CrLf))
            } else if let Some(text) = piece.strip_suffix('\n') {
                (text, Some(LineEnding::Lf))
            } else {
                (piece, None)
            };
            lines.push(text.to_string());
            terminators.push(terminator);
        }
        Self {
            lines,
            ending: LineEnding::detect(content),
            terminators,
        }
    }

    /// Whether the text ended with a separator.
    pub fn trailing_newline(&self) -> bool {
        matches!(self.terminators.last(), Some(Some(_)))
    }

    pub fn join(&self) -> String {
        let mut out = String::new();
        for (line, terminator) in self.lines.iter().zip(&self.terminators) {
            out.push_str(line);
            if let Some(ending) = terminator {
                out.push_str(ending.as_str());
            }
        }
        out
    }

    /// Add a line after the current last line. The file keeps ending with a
    /// separator only if it did before; an empty file gets none.
    pub fn push(&mut self, line: String) {
        let terminator = match self.terminators.last_mut() {
            None => None,
            Some(last) if last.is_none() => {
                *last = Some(self.ending);
                None
            }
            Some(_) => Some(self.ending),
        };
        self.lines.push(line);
        self.terminators.push(terminator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(content: &str) {
        assert_eq!(Lines::split(content).join(), content, "{content:?}");
    }

    #[test]
    fn join_reproduces_input() {
        round_trip("");
        round_trip("\n");
        round_trip("Port 22");
        round_trip("Port 22\n");
        round_trip("Port 22\n\n");
        round_trip("a\r\nb\r\n");
        round_trip("  indented\t\n# comment  \n");
        round_trip("a\r\nb\nc\r\n");
        round_trip("a\nb\r\nc");
        round_trip("stray\rcarriage\n");
    }

    #[test]
    fn mixed_endings_are_kept_per_line() {
        let lines = Lines::split("Include x\r\nPort 22\n");
        assert_eq!(lines.ending, LineEnding::CrLf);
        assert_eq!(lines.lines, vec!["Include x", "Port 22"]);
        assert!(lines.trailing_newline());
    }

    #[test]
    fn push_after_unterminated_last_line() {
        let mut lines = Lines::split("a\r\nb");
        lines.push("c".into());
        assert_eq!(lines.join(), "a\r\nb\r\nc");
    }

    #[test]
    fn indices_follow_file_order() {
        let lines = Lines::split("# header\nPort 22\n");
        assert_eq!(lines.lines, vec!["# header", "Port 22"]);
        assert!(lines.trailing_newline());
        assert!(!Lines::split("Port 22").trailing_newline());
    }

    #[test]
    fn crlf_is_detected_and_stripped() {
        let lines = Lines::split("IPV6=yes\r\nIPV6=no\r\n");
        assert_eq!(lines.ending, LineEnding::CrLf);
        assert_eq!(lines.lines, vec!["IPV6=yes", "IPV6=no"]);
    }

    #[test]
    fn push_goes_before_trailing_newline() {
        let mut lines = Lines::split("http {\n}\n");
        lines.push("gzip on;".into());
        assert_eq!(lines.join(), "http {\n}\ngzip on;\n");
    }

    #[test]
    fn push_into_empty_file() {
        let mut lines = Lines::split("");
        lines.push("gzip on;".into());
        assert_eq!(lines.join(), "gzip on;");
    }
}
