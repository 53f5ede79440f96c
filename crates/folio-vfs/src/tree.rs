//! Read-only directory tree.
//!
//! A [`Directory`] keeps its children in insertion order, which is also the
//! listing order. Lookups are linear; portfolio trees hold a handful of
//! entries per directory.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use folio_types::error::{FolioError, Result};

use crate::path::VPath;

/// Names starting with this character are hidden from default listings.
pub const HIDDEN_MARKER: char = '.';

/// Whether `name` is hidden from default listings.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory(Directory),
    /// A file and its text content.
    File(String),
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&str> {
        match self {
            Entry::File(content) => Some(content),
            Entry::Directory(_) => None,
        }
    }
}

/// An ordered mapping of unique names to entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, Entry)>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child. Names must be unique and may not be empty, `.` or `..`.
    pub fn insert(&mut self, name: impl Into<String>, entry: Entry) -> Result<()> {
        let name = name.into();
        check_name(&name).map_err(FolioError::Config)?;
        if self.get(&name).is_some() {
            return Err(FolioError::Config(format!("duplicate entry: {name}")));
        }
        self.entries.push((name, entry));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert) for a file.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        self.insert(name, Entry::File(content.into()))?;
        Ok(self)
    }

    /// Builder form of [`insert`](Self::insert) for a subdirectory.
    pub fn with_dir(mut self, name: impl Into<String>, dir: Directory) -> Result<Self> {
        self.insert(name, Entry::Directory(dir))?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    /// Child directory named `name`, if there is one.
    pub fn child_dir(&self, name: &str) -> Option<&Directory> {
        self.get(name).and_then(Entry::as_dir)
    }

    /// Content of the child file named `name`, if there is one.
    pub fn file(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Entry::as_file)
    }

    /// Children in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Children in insertion order, skipping hidden names unless `show_hidden`.
    pub fn listing(&self, show_hidden: bool) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries()
            .filter(move |(name, _)| show_hidden || !is_hidden(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_name(name: &str) -> std::result::Result<(), String> {
    match name {
        "" => Err("entry name must not be empty".to_string()),
        "." | ".." => Err(format!("reserved entry name: {name}")),
        _ => Ok(()),
    }
}

/// The whole read-only tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
    root: Directory,
}

impl FileTree {
    pub fn new(root: Directory) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Look up the entry at `path`. The root path yields `None`; use
    /// [`directory`](Self::directory) to address the root.
    pub fn lookup(&self, path: &VPath) -> Option<&Entry> {
        let (last, parents) = path.segments().split_last()?;
        let mut dir = &self.root;
        for seg in parents {
            dir = dir.child_dir(seg)?;
        }
        dir.get(last)
    }

    /// The directory at `path`, or `None` if it is missing or a file.
    pub fn directory(&self, path: &VPath) -> Option<&Directory> {
        path.segments()
            .iter()
            .try_fold(&self.root, |dir, seg| dir.child_dir(seg))
    }

    /// Parse a tree from TOML. Tables are directories, strings are files,
    /// document order is listing order.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let root: Directory = toml::from_str(text)?;
        Ok(Self { root })
    }

    /// Load a tree from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let tree = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded file tree from {} ({} top-level entries)",
            path.display(),
            tree.root.len()
        );
        Ok(tree)
    }

    /// The built-in portfolio tree.
    pub fn portfolio() -> Self {
        match portfolio_root() {
            Ok(root) => Self::new(root),
            Err(e) => {
                log::error!("built-in portfolio tree is invalid: {e}");
                Self::new(Directory::new())
            },
        }
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::portfolio()
    }
}

fn portfolio_root() -> Result<Directory> {
    let projects = Directory::new()
        .with_file(
            "portfolio.txt",
            "Terminal Portfolio — A fun terminal-like interface to explore my work.",
        )?
        .with_file(
            "blog.txt",
            "Personal blog — Sharing thoughts on code, design, and tech.",
        )?;
    let contact = Directory::new()
        .with_file("email.txt", "youremail@example.com")?
        .with_file("github.txt", "https://github.com/yourusername")?
        .with_file("linkedin.txt", "https://www.linkedin.com/in/yourusername/")?;
    let info = Directory::new()
        .with_file(
            "about.txt",
            "Hi! I'm Drinor, a developer passionate about building interactive web experiences.",
        )?
        .with_file(
            "skills.txt",
            "Languages: JavaScript, Python, Go\n\
             Frameworks: React, Next.js, Node.js\n\
             Other: Git, Linux, Docker",
        )?
        .with_dir("projects", projects)?
        .with_dir("contact", contact)?
        .with_file(".secret.txt", "This is a hidden file! Only visible with 'ls -a'.")?;
    Directory::new().with_dir("info", info)
}

// -- Deserialization --

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

impl<'de> Deserialize<'de> for Directory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DirectoryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string (file) or a table (directory)")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Entry, E> {
        Ok(Entry::File(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Entry, E> {
        Ok(Entry::File(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Entry, A::Error> {
        DirectoryVisitor.visit_map(map).map(Entry::Directory)
    }
}

struct DirectoryVisitor;

impl<'de> Visitor<'de> for DirectoryVisitor {
    type Value = Directory;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Directory, A::Error> {
        let mut dir = Directory::new();
        while let Some((name, entry)) = map.next_entry::<String, Entry>()? {
            dir.insert(name, entry).map_err(de::Error::custom)?;
        }
        Ok(dir)
    }
}
