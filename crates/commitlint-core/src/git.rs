//! Reading commit messages out of a git repository.

use std::fmt;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::domain::{CommitlintError, Result};
use crate::obs::emit_range_read;

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';
const LOG_FORMAT: &str = "--format=%H%x1f%B%x1e";

/// Which commits to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Commits reachable from `to` but not from `from`.
    Between { from: String, to: String },
    /// The commit at `HEAD`.
    Last,
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between { from, to } => write!(f, "{from}..{to}"),
            Self::Last => f.write_str("HEAD"),
        }
    }
}

/// One commit and its full message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
}

/// Run `git log` in `repo_dir` and return the commits in `range`, oldest
/// first.
pub async fn read_commits(repo_dir: &Path, range: &CommitRange) -> Result<Vec<CommitRecord>> {
    let mut args = vec!["log".to_string(), LOG_FORMAT.to_string()];
    match range {
        CommitRange::Between { from, to } => {
            args.push("--reverse".to_string());
            args.push(format!("{from}..{to}"));
        }
        CommitRange::Last => args.push("-1".to_string()),
    }

    let output = Command::new("git")
        .args(&args)
        .current_dir(repo_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| CommitlintError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommitlintError::Git(format!(
            "git log {range} failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let commits = parse_log(&stdout);
    emit_range_read(&range.to_string(), commits.len());
    Ok(commits)
}

fn parse_log(stdout: &str) -> Vec<CommitRecord> {
    stdout
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches('\n');
            let (sha, message) = record.split_once(FIELD_SEP)?;
            Some(CommitRecord {
                sha: sha.trim().to_string(),
                message: message.trim_end_matches('\n').to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn make_git_repo(messages: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["commit", "--allow-empty", "-m", "chore: initial commit"]);
        for message in messages {
            run_git(dir.path(), &["commit", "--allow-empty", "-m", message]);
        }
        dir
    }

    #[test]
    fn test_parse_log_records() {
        let out = "aaa\x1ffeat: one\n\nbody\n\x1e\nbbb\x1ffix: two\n\x1e\n";
        let commits = parse_log(out);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "aaa");
        assert_eq!(commits[0].message, "feat: one\n\nbody");
        assert_eq!(commits[1].message, "fix: two");
    }

    #[test]
    fn test_range_display() {
        let range = CommitRange::Between {
            from: "origin/main".to_string(),
            to: "HEAD".to_string(),
        };
        assert_eq!(range.to_string(), "origin/main..HEAD");
    }

    #[tokio::test]
    async fn read_last_commit() {
        let repo = make_git_repo(&["feat(ui): add dark mode toggle"]);
        let commits = read_commits(repo.path(), &CommitRange::Last).await.unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "feat(ui): add dark mode toggle");
        assert_eq!(commits[0].sha.len(), 40);
    }

    #[tokio::test]
    async fn read_range_oldest_first() {
        let repo = make_git_repo(&["feat: first change here", "fix: second change here"]);
        let range = CommitRange::Between {
            from: "HEAD~2".to_string(),
            to: "HEAD".to_string(),
        };
        let commits = read_commits(repo.path(), &range).await.unwrap();
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["feat: first change here", "fix: second change here"]);
    }

    #[tokio::test]
    async fn read_commits_fails_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_commits(dir.path(), &CommitRange::Last).await.unwrap_err();
        assert!(matches!(err, CommitlintError::Git(_)));
    }
}
