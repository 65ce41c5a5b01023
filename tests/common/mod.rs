//! Fixture helpers shared by integration tests: build a tree from a compact
//! description and snapshot a tree back into the same shape for comparison.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One node in a fixture tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(String),
    Dir,
    Link(PathBuf),
}

pub fn file(s: &str) -> Node {
    Node::File(s.to_string())
}

pub fn link(target: &str) -> Node {
    Node::Link(PathBuf::from(target))
}

/// Create `entries` under `root` (which is created if missing). Paths use `/`.
/// Parents are created implicitly; list explicit `Dir` entries for empty directories.
pub fn write_tree(root: &Path, entries: &[(&str, Node)]) -> io::Result<()> {
    fs::create_dir_all(root)?;
    for (rel, node) in entries {
        let p = root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        match node {
            Node::File(s) => fs::write(&p, s)?,
            Node::Dir => fs::create_dir_all(&p)?,
            Node::Link(target) => make_link(target, &p)?,
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_link(target: &Path, at: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, at)
}

#[cfg(windows)]
fn make_link(target: &Path, at: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, at)
}

/// Flatten the tree at `root` into `relative path -> node`, without following links.
/// A missing root yields an empty map.
pub fn snapshot(root: &Path) -> BTreeMap<String, Node> {
    let mut out = BTreeMap::new();
    if fs::symlink_metadata(root).is_err() {
        return out;
    }
    for entry in walkdir::WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = entry.expect("walk fixture");
        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("under root")
            .to_string_lossy()
            .replace('\\', "/");
        let ft = entry.file_type();
        let node = if ft.is_symlink() {
            Node::Link(fs::read_link(entry.path()).expect("read link"))
        } else if ft.is_dir() {
            Node::Dir
        } else {
            Node::File(fs::read_to_string(entry.path()).expect("read file"))
        };
        out.insert(rel, node);
    }
    out
}

/// Build the map `snapshot` would produce for `entries`, including implicit parents.
pub fn expected(entries: &[(&str, Node)]) -> BTreeMap<String, Node> {
    let mut out = BTreeMap::new();
    for (rel, node) in entries {
        let mut parent = Path::new(rel).parent();
        while let Some(p) = parent {
            if p.as_os_str().is_empty() {
                break;
            }
            out.insert(p.to_string_lossy().replace('\\', "/"), Node::Dir);
            parent = p.parent();
        }
        out.insert(rel.to_string(), node.clone());
    }
    out
}

/// Root-level existence check that does not follow a final symlink.
pub fn exists_no_follow(p: &Path) -> bool {
    fs::symlink_metadata(p).is_ok()
}
