//! Commit message model and structural parser.
//!
//! A message is split into `header`, `body` and `footer` on blank-line
//! boundaries:
//!
//! ```text
//! header
//! <blank>
//! body paragraph
//! <blank>
//! footer (everything that remains)
//! ```
//!
//! Nothing is trimmed or case-folded here; rules normalise what they need.

use serde::Serialize;

use super::header::Header;

/// Git's scissors line. Everything from it onward is discarded by
/// [`strip_comments`].
pub const SCISSORS_LINE: &str = "# ------------------------ >8 ------------------------";

/// Footer tokens that open a footer even when written inside a paragraph.
pub const BREAKING_CHANGE_TOKENS: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// A parsed commit message. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    header: String,
    body: Vec<String>,
    footer: Vec<String>,
    raw: String,
}

impl CommitMessage {
    /// Split raw commit text into header, body and footer.
    ///
    /// If the header is not followed by a blank line, body and footer are
    /// left empty; the text stays visible through [`CommitMessage::raw`] so
    /// `body-leading-blank` can report the missing separator.
    pub fn parse(raw: &str) -> Self {
        let lines = split_lines(raw);

        let Some((header, rest)) = lines.split_first() else {
            return Self {
                header: String::new(),
                body: Vec::new(),
                footer: Vec::new(),
                raw: raw.to_string(),
            };
        };

        let mut body = Vec::new();
        let mut footer = Vec::new();

        if rest.first().is_some_and(|line| is_blank(line)) {
            let mut idx = skip_blank(rest, 0);
            while idx < rest.len() && !is_blank(rest[idx]) {
                body.push(rest[idx].to_string());
                idx += 1;
            }
            idx = skip_blank(rest, idx);
            footer = rest[idx..].iter().map(|l| l.to_string()).collect();
        }

        Self {
            header: header.to_string(),
            body,
            footer,
            raw: raw.to_string(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }

    /// The message exactly as it was handed to [`CommitMessage::parse`].
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn has_footer(&self) -> bool {
        !self.footer.is_empty()
    }

    /// Body lines joined with `\n`, or `None` when there is no body.
    pub fn body_text(&self) -> Option<String> {
        self.has_body().then(|| self.body.join("\n"))
    }

    /// Footer lines joined with `\n`, or `None` when there is no footer.
    pub fn footer_text(&self) -> Option<String> {
        self.has_footer().then(|| self.footer.join("\n"))
    }

    /// Conventional view of the header.
    pub fn parsed_header(&self) -> Header {
        Header::parse(&self.header)
    }

    /// Raw lines with line endings removed and trailing blank lines dropped.
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.raw)
    }

    /// Number of blank lines between the header and the first line of text,
    /// or `None` when nothing but blank lines follows the header.
    pub fn header_gap(&self) -> Option<usize> {
        let lines = self.lines();
        let rest = lines.get(1..)?;
        let gap = skip_blank(rest, 0);
        (gap < rest.len()).then_some(gap)
    }

    /// Indices (into [`CommitMessage::lines`]) of footer tokens that sit
    /// directly beneath a non-blank line, outside the parsed footer.
    pub fn embedded_footer_tokens(&self) -> Vec<usize> {
        let lines = self.lines();
        // The footer is always the tail of the message.
        let footer_start = lines.len() - self.footer.len();
        (1..footer_start)
            .filter(|&i| {
                BREAKING_CHANGE_TOKENS
                    .iter()
                    .any(|token| lines[i].starts_with(token))
                    && !is_blank(lines[i - 1])
            })
            .collect()
    }
}

/// Remove git comment lines and everything after the scissors line.
///
/// Applied to `COMMIT_EDITMSG` content before parsing; never applied to
/// messages read from other sources.
pub fn strip_comments(text: &str) -> String {
    let mut kept = Vec::new();
    for line in text.lines() {
        if line.trim_end() == SCISSORS_LINE {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        kept.push(line);
    }
    let mut out = kept.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn split_lines(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = raw
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
    lines
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn skip_blank(lines: &[&str], mut idx: usize) -> usize {
    while idx < lines.len() && is_blank(lines[idx]) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only() {
        let msg = CommitMessage::parse("feat(auth): add login flow");
        assert_eq!(msg.header(), "feat(auth): add login flow");
        assert!(!msg.has_body());
        assert!(!msg.has_footer());
        assert_eq!(msg.header_gap(), None);
    }

    #[test]
    fn test_header_body_footer() {
        let raw = "fix(ui): correct button color\n\nThe primary button used the wrong token.\nIt now uses accent.\n\nRefs: #42\nReviewed-by: kim\n";
        let msg = CommitMessage::parse(raw);
        assert_eq!(msg.header(), "fix(ui): correct button color");
        assert_eq!(msg.body().len(), 2);
        assert_eq!(msg.footer(), &["Refs: #42".to_string(), "Reviewed-by: kim".to_string()]);
        assert_eq!(msg.header_gap(), Some(1));
        assert_eq!(msg.raw(), raw);
    }

    #[test]
    fn test_body_without_separator_is_not_parsed_as_body() {
        let msg = CommitMessage::parse("fix(ui): correct button color\nbody text here");
        assert!(!msg.has_body());
        assert!(!msg.has_footer());
        assert_eq!(msg.header_gap(), Some(0));
    }

    #[test]
    fn test_crlf_and_trailing_blank_lines() {
        let msg = CommitMessage::parse("docs: update readme\r\n\r\nmore words\r\n\r\n\r\n");
        assert_eq!(msg.header(), "docs: update readme");
        assert_eq!(msg.body(), &["more words".to_string()]);
        assert!(!msg.has_footer());
    }

    #[test]
    fn test_footer_keeps_inner_blank_lines() {
        let msg = CommitMessage::parse("chore: bump\n\nbody\n\nfirst\n\nsecond");
        assert_eq!(
            msg.footer(),
            &["first".to_string(), String::new(), "second".to_string()]
        );
    }

    #[test]
    fn test_empty_input() {
        let msg = CommitMessage::parse("");
        assert_eq!(msg.header(), "");
        assert!(!msg.has_body());
    }

    #[test]
    fn test_double_blank_gap() {
        let msg = CommitMessage::parse("feat: add thing here\n\n\nbody");
        assert_eq!(msg.header_gap(), Some(2));
        assert_eq!(msg.body(), &["body".to_string()]);
    }

    #[test]
    fn test_embedded_breaking_change_token() {
        let msg = CommitMessage::parse("feat: add thing here\n\nbody line\nBREAKING CHANGE: gone");
        assert_eq!(msg.embedded_footer_tokens(), vec![3]);

        let msg = CommitMessage::parse("feat: add thing here\n\nbody line\n\nBREAKING CHANGE: gone");
        assert!(msg.embedded_footer_tokens().is_empty());
    }

    #[test]
    fn test_breaking_change_after_other_trailers() {
        let msg =
            CommitMessage::parse("feat: add thing here\n\nbody line\n\nRefs: #12\nBREAKING CHANGE: gone");
        assert_eq!(msg.footer().len(), 2);
        assert!(msg.embedded_footer_tokens().is_empty());
    }

    #[test]
    fn test_strip_comments_and_scissors() {
        let text = "feat: add thing here\n# Please enter the commit message\n\nbody\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(strip_comments(text), "feat: add thing here\n\nbody\n");
    }

    #[test]
    fn test_strip_comments_all_comments() {
        assert_eq!(strip_comments("# only a comment\n"), "");
    }
}
