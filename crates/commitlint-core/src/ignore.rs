//! Messages that are never linted: merges, reverts, autosquash markers and
//! bare release commits produced by tooling rather than written by hand.

use std::sync::LazyLock;

use regex::Regex;

static DEFAULT_IGNORES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?m)^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?)))(?:\r?\n)*$)",
        r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("default ignore pattern compiles"))
    .collect()
});

static RELEASE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^chore(\([^)]+\))?:").expect("release prefix compiles"));

static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^=?v?(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$",
    )
    .expect("semver pattern compiles")
});

/// Whether `raw` matches one of the built-in ignore patterns.
pub fn is_default_ignored(raw: &str) -> bool {
    DEFAULT_IGNORES.iter().any(|re| re.is_match(raw)) || is_release_commit(raw)
}

/// A first line that is only a version (optionally after `chore:` or
/// `chore(scope):`), as written by release tooling.
fn is_release_commit(raw: &str) -> bool {
    let first = raw.lines().next().unwrap_or_default();
    let stripped = RELEASE_PREFIX.replace(first, "");
    SEMVER.is_match(stripped.trim())
}
