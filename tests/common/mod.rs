//! Shared fixtures for integration tests
//!
//! Repositories are built with git2 in a temporary directory; attribution
//! itself shells out to `git`, so tests skip when no executable is found.

#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// True when a `git` executable can be run
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Return early from a test when git is not installed
macro_rules! require_git {
    () => {
        if !common::git_available() {
            eprintln!("git executable not found, skipping");
            return;
        }
    };
}

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Write `files` and commit them with distinct author and committer names
    pub fn commit_as(&self, author: &str, committer: &str, files: &[(&str, &str)]) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");
        for (name, content) in files {
            let full_path = self.path().join(name);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create directories");
            }
            fs::write(&full_path, content).expect("Failed to write file");
            index.add_path(Path::new(name)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let author_sig = Signature::now(author, &email_for(author)).expect("Failed to create signature");
        let committer_sig = Signature::now(committer, &email_for(committer)).expect("Failed to create signature");

        let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &author_sig,
                &committer_sig,
                &format!("Commit by {}", author),
                &tree,
                &parents,
            )
            .expect("Failed to create commit")
    }

    pub fn commit(&self, author: &str, files: &[(&str, &str)]) -> Oid {
        self.commit_as(author, author, files)
    }
}

fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "."))
}

/// The standard two-author history used across suites
///
/// `main.go`: 3 lines by Alice then 2 appended by Bob.
/// `docs/guide.md`: 4 lines by Bob.
/// `empty.txt`: committed empty by Carol.
pub fn sample_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit("Alice", &[("main.go", "package main\n\nfunc main() {}\n")]);
    repo.commit(
        "Bob",
        &[
            ("main.go", "package main\n\nfunc main() {}\n// helper\nfunc helper() {}\n"),
            ("docs/guide.md", "# Guide\n\nRead\nthis\n"),
        ],
    );
    repo.commit("Carol", &[("empty.txt", "")]);
    repo
}
