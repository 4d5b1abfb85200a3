//! Descriptions of the allowed commit types, as shown to authors.

use serde::Serialize;

/// One allowed commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitType {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const COMMIT_TYPES: [CommitType; 11] = [
    CommitType {
        name: "feat",
        title: "Features",
        description: "A new feature",
    },
    CommitType {
        name: "fix",
        title: "Bug Fixes",
        description: "A bug fix",
    },
    CommitType {
        name: "docs",
        title: "Documentation",
        description: "Documentation only changes",
    },
    CommitType {
        name: "style",
        title: "Styles",
        description: "Changes that do not affect the meaning of the code (white-space, formatting, etc)",
    },
    CommitType {
        name: "refactor",
        title: "Code Refactoring",
        description: "A code change that neither fixes a bug nor adds a feature",
    },
    CommitType {
        name: "perf",
        title: "Performance Improvements",
        description: "A code change that improves performance",
    },
    CommitType {
        name: "test",
        title: "Tests",
        description: "Adding missing tests or correcting existing tests",
    },
    CommitType {
        name: "build",
        title: "Builds",
        description: "Changes that affect the build system or external dependencies",
    },
    CommitType {
        name: "ci",
        title: "Continuous Integrations",
        description: "Changes to CI configuration files and scripts",
    },
    CommitType {
        name: "chore",
        title: "Chores",
        description: "Other changes that don't modify src or test files",
    },
    CommitType {
        name: "revert",
        title: "Reverts",
        description: "Reverts a previous commit",
    },
];

/// The allowed types in the order authors are offered them.
pub fn commit_types() -> &'static [CommitType] {
    &COMMIT_TYPES
}

pub fn find_commit_type(name: &str) -> Option<&'static CommitType> {
    COMMIT_TYPES.iter().find(|t| t.name == name)
}
