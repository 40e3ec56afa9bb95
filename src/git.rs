//! Repository access
//!
//! `RepositorySource` is the boundary between the attribution engine and the
//! version control system. `GitRepository` implements it with libgit2 for
//! tree listing and blob reads, and the `git` executable for the two text
//! protocols the engine consumes (`blame --line-porcelain` and `log -1`).

use git2::{ObjectType, Oid, Repository, TreeWalkMode, TreeWalkResult};
use log::{debug, trace};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FameError, FameResult};

/// Format for `git log` producing `hash NUL author NUL committer`
const HISTORY_FORMAT: &str = "--format=%H%x00%an%x00%cn";

/// The most recent commit touching a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub hash: String,
    pub author_name: String,
    pub committer_name: String,
}

/// Everything the engine needs from a repository at a fixed revision
pub trait RepositorySource {
    /// Paths of all tracked files, in tree order
    fn list_tracked_files(&self) -> FameResult<Vec<String>>;

    /// Raw content of `path`; an empty vector means the file has no content
    fn read_file_content(&self, path: &str) -> FameResult<Vec<u8>>;

    /// Latest commit touching `path`, or `None` when it has no history
    fn most_recent_history_entry(&self, path: &str) -> FameResult<Option<HistoryEntry>>;

    /// Line attribution dump in `--line-porcelain` form
    fn line_attribution(&self, path: &str) -> FameResult<String>;
}

/// A git repository pinned to one revision
pub struct GitRepository {
    repository: Repository,
    root: PathBuf,
    revision: String,
    commit_id: String,
    tree_id: Oid,
}

impl GitRepository {
    /// Open the repository at `root` and resolve `revision` to a commit
    pub fn open<P: AsRef<Path>>(root: P, revision: &str) -> FameResult<Self> {
        let root = root.as_ref().to_path_buf();
        debug!("Opening repository at: {}", root.display());

        let repository = Repository::open(&root)?;
        let (commit_id, tree_id) = repository
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| (commit.id(), commit.tree_id()))
            .map_err(|e| FameError::collaborator("resolve revision", revision, e.message()))?;

        debug!("Revision {} resolved to commit {} (tree {})", revision, commit_id, tree_id);
        Ok(Self {
            repository,
            root,
            revision: revision.to_string(),
            commit_id: commit_id.to_string(),
            tree_id,
        })
    }

    fn run_git(&self, operation: &'static str, path: &str, args: &[&str]) -> FameResult<Vec<u8>> {
        trace!("git -C {} {}", self.root.display(), args.join(" "));
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| FameError::collaborator(operation, path, format!("unable to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("git exited with {}", output.status),
                text => text.to_string(),
            };
            return Err(FameError::collaborator(operation, path, message));
        }

        Ok(output.stdout)
    }
}

impl RepositorySource for GitRepository {
    fn list_tracked_files(&self) -> FameResult<Vec<String>> {
        let tree = self.repository.find_tree(self.tree_id)?;
        let mut files = Vec::new();

        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            match entry.kind() {
                Some(ObjectType::Blob) => {
                    files.push(format!("{}{}", root, String::from_utf8_lossy(entry.name_bytes())));
                }
                Some(ObjectType::Commit) => {
                    debug!("Skipping submodule entry: {}{}", root, String::from_utf8_lossy(entry.name_bytes()));
                }
                _ => {}
            }
            TreeWalkResult::Ok
        })
        .map_err(|e| FameError::collaborator("list tracked files", &self.revision, e.message()))?;

        debug!("Found {} tracked files at {}", files.len(), self.revision);
        Ok(files)
    }

    fn read_file_content(&self, path: &str) -> FameResult<Vec<u8>> {
        let read = || -> Result<Vec<u8>, git2::Error> {
            let tree = self.repository.find_tree(self.tree_id)?;
            let entry = tree.get_path(Path::new(path))?;
            let blob = entry.to_object(&self.repository)?.peel_to_blob()?;
            Ok(blob.content().to_vec())
        };
        read().map_err(|e| FameError::collaborator("read file content", path, e.message()))
    }

    fn most_recent_history_entry(&self, path: &str) -> FameResult<Option<HistoryEntry>> {
        let output = self.run_git(
            "git log",
            path,
            &["log", "-1", HISTORY_FORMAT, &self.commit_id, "--", path],
        )?;
        parse_history_entry(&String::from_utf8_lossy(&output), path)
    }

    fn line_attribution(&self, path: &str) -> FameResult<String> {
        let output = self.run_git(
            "git blame",
            path,
            &["blame", "--line-porcelain", &self.commit_id, "--", path],
        )?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Parse `hash NUL author NUL committer` as printed by `HISTORY_FORMAT`
pub fn parse_history_entry(output: &str, path: &str) -> FameResult<Option<HistoryEntry>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split('\0').collect();
    match fields.as_slice() {
        [hash, author, committer] => Ok(Some(HistoryEntry {
            hash: hash.to_string(),
            author_name: author.to_string(),
            committer_name: committer.to_string(),
        })),
        _ => Err(FameError::collaborator(
            "git log",
            path,
            format!("malformed log entry: expected 3 fields, found {}", fields.len()),
        )),
    }
}
