//! Virtual paths and resolution of user-typed path arguments.

use std::fmt;

use folio_types::error::{FolioError, Result};

use crate::tree::FileTree;

/// Segment separator in typed paths.
pub const SEPARATOR: char = '/';

/// Argument that always resolves to the root.
pub const HOME: &str = "~";

/// A path from the tree root, as a sequence of segment names.
///
/// The empty sequence is the root. `Display` renders the root-anchored form
/// used by `pwd` (`/`, `/info/projects`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VPath {
    segments: Vec<String>,
}

impl VPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Drop the last segment. Returns `false` at the root.
    pub fn pop(&mut self) -> bool {
        self.segments.pop().is_some()
    }

    /// Home-relative form used in the prompt: `~`, `~/info/projects`.
    pub fn prompt_form(&self) -> String {
        let mut out = String::from(HOME);
        for seg in &self.segments {
            out.push(SEPARATOR);
            out.push_str(seg);
        }
        out
    }
}

impl fmt::Display for VPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{SEPARATOR}");
        }
        for seg in &self.segments {
            write!(f, "{SEPARATOR}{seg}")?;
        }
        Ok(())
    }
}

/// Resolve `arg` against `current`.
///
/// Only directories can be reached: a segment naming a file (or nothing)
/// fails the whole resolution with [`FolioError::PathNotFound`]. `..` at the
/// root stays at the root. `current` is never modified.
pub fn resolve(tree: &FileTree, current: &VPath, arg: &str) -> Result<VPath> {
    if arg.is_empty() || arg == HOME {
        return Ok(VPath::root());
    }

    let mut working = current.clone();
    for segment in arg.split(SEPARATOR) {
        match segment {
            "" | "." => {},
            ".." => {
                working.pop();
            },
            name => {
                let is_dir = tree
                    .directory(&working)
                    .and_then(|dir| dir.child_dir(name))
                    .is_some();
                if !is_dir {
                    return Err(FolioError::PathNotFound(arg.to_string()));
                }
                working.push(name);
            },
        }
    }
    Ok(working)
}

/// Re-walk `path` from the root: every segment must exist and every entry
/// before the last must be a directory.
pub fn is_valid(tree: &FileTree, path: &VPath) -> bool {
    match path.segments().split_last() {
        None => true,
        Some((last, parents)) => {
            let parent = VPath::from_segments(parents.iter().cloned());
            tree.directory(&parent)
                .is_some_and(|dir| dir.get(last).is_some())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> VPath {
        VPath::from_segments(segments.iter().copied())
    }

    fn tree() -> FileTree {
        FileTree::portfolio()
    }

    #[test]
    fn empty_and_home_resolve_to_root() {
        let t = tree();
        let cwd = path(&["info", "projects"]);
        assert_eq!(resolve(&t, &cwd, "").unwrap(), VPath::root());
        assert_eq!(resolve(&t, &cwd, "~").unwrap(), VPath::root());
    }

    #[test]
    fn relative_descent() {
        let t = tree();
        let p = resolve(&t, &VPath::root(), "info/projects").unwrap();
        assert_eq!(p, path(&["info", "projects"]));
    }

    #[test]
    fn dotdot_pops() {
        let t = tree();
        let p = resolve(&t, &path(&["info", "projects"]), "..").unwrap();
        assert_eq!(p, path(&["info"]));
        let p = resolve(&t, &path(&["info", "projects"]), "../contact").unwrap();
        assert_eq!(p, path(&["info", "contact"]));
    }

    #[test]
    fn dotdot_at_root_stays_at_root() {
        let t = tree();
        assert_eq!(resolve(&t, &VPath::root(), "..").unwrap(), VPath::root());
        assert_eq!(
            resolve(&t, &VPath::root(), "../../info").unwrap(),
            path(&["info"])
        );
    }

    #[test]
    fn dot_and_empty_segments_are_noops() {
        let t = tree();
        let p = resolve(&t, &VPath::root(), "./info//./projects/").unwrap();
        assert_eq!(p, path(&["info", "projects"]));
    }

    #[test]
    fn leading_separator_is_relative() {
        // An empty first segment is a no-op, so `/x` is resolved from cwd.
        let t = tree();
        let p = resolve(&t, &path(&["info"]), "/projects").unwrap();
        assert_eq!(p, path(&["info", "projects"]));
    }

    #[test]
    fn file_segment_fails() {
        let t = tree();
        let err = resolve(&t, &path(&["info"]), "about.txt").unwrap_err();
        assert!(matches!(err, FolioError::PathNotFound(ref a) if a == "about.txt"));
    }

    #[test]
    fn missing_segment_fails_with_full_argument() {
        let t = tree();
        let err = resolve(&t, &VPath::root(), "info/nope/projects").unwrap_err();
        assert_eq!(format!("{err}"), "cd: no such directory: info/nope/projects");
    }

    #[test]
    fn current_is_untouched_on_failure() {
        let t = tree();
        let cwd = path(&["info"]);
        let before = cwd.clone();
        assert!(resolve(&t, &cwd, "projects/../missing").is_err());
        assert_eq!(cwd, before);
    }

    #[test]
    fn hidden_directories_resolve() {
        let root = crate::tree::Directory::new()
            .with_dir(".config", crate::tree::Directory::new())
            .unwrap();
        let t = FileTree::new(root);
        assert_eq!(
            resolve(&t, &VPath::root(), ".config").unwrap(),
            path(&[".config"])
        );
    }

    #[test]
    fn is_valid_checks() {
        let t = tree();
        assert!(is_valid(&t, &VPath::root()));
        assert!(is_valid(&t, &path(&["info", "contact"])));
        assert!(is_valid(&t, &path(&["info", "about.txt"])));
        assert!(!is_valid(&t, &path(&["info", "about.txt", "more"])));
        assert!(!is_valid(&t, &path(&["nope"])));
    }

    #[test]
    fn display_and_prompt_forms() {
        assert_eq!(VPath::root().to_string(), "/");
        assert_eq!(VPath::root().prompt_form(), "~");
        let p = path(&["info", "projects"]);
        assert_eq!(p.to_string(), "/info/projects");
        assert_eq!(p.prompt_form(), "~/info/projects");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        /// Every directory path in the portfolio tree.
        fn dir_paths() -> Vec<VPath> {
            vec![
                VPath::root(),
                path(&["info"]),
                path(&["info", "projects"]),
                path(&["info", "contact"]),
            ]
        }

        proptest! {
            #[test]
            fn dotdot_never_underflows(idx in 0usize..4, extra in 0usize..6) {
                let t = tree();
                let mut p = dir_paths()[idx].clone();
                let steps = p.depth() + extra;
                for _ in 0..steps {
                    p = resolve(&t, &p, "..").unwrap();
                }
                prop_assert!(p.is_root());
            }

            #[test]
            fn success_implies_valid(
                idx in 0usize..4,
                arg in "(info|projects|contact|about\\.txt|\\.\\.|\\.|nope)(/(info|projects|contact|\\.\\.|\\.|))*",
            ) {
                let t = tree();
                let cwd = dir_paths()[idx].clone();
                if let Ok(p) = resolve(&t, &cwd, &arg) {
                    prop_assert!(is_valid(&t, &p));
                    prop_assert!(t.directory(&p).is_some());
                }
            }
        }
    }
}
