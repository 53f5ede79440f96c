//! Tab completion for command names and path arguments.
//!
//! Completion only looks at the shape of the buffer: one token completes a
//! command name, a command plus one argument completes the last path segment
//! of that argument, anything longer is left alone.

use folio_vfs::{FileTree, SEPARATOR, VPath, is_hidden};

/// A path completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub is_dir: bool,
}

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exactly one match: the buffer should become this text.
    Replace(String),
    /// Several command names match. The buffer stays as typed.
    Commands(Vec<String>),
    /// Several directory entries match. The buffer stays as typed.
    Entries(Vec<Candidate>),
    /// Nothing to offer. The buffer stays as typed.
    NoMatch,
}

/// Complete `input` against the command set and the directory at `cwd`.
pub fn complete(input: &str, cwd: &VPath, tree: &FileTree, commands: &[&str]) -> Completion {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Completion::NoMatch;
    }
    let Some((cmd, rest)) = trimmed.split_once(char::is_whitespace) else {
        return complete_command(input, trimmed, commands);
    };
    let arg = rest.trim_start();
    if arg.contains(char::is_whitespace) {
        log::debug!("completion skipped: more than one argument after {cmd}");
        return Completion::NoMatch;
    }
    complete_path(input, arg, cwd, tree)
}

fn complete_command(input: &str, partial: &str, commands: &[&str]) -> Completion {
    let matches: Vec<&str> = commands
        .iter()
        .copied()
        .filter(|name| name.starts_with(partial))
        .collect();
    match matches.as_slice() {
        [] => Completion::NoMatch,
        [only] => {
            let lead = &input[..input.len() - partial.len()];
            Completion::Replace(format!("{lead}{only} "))
        },
        _ => Completion::Commands(matches.iter().map(|s| s.to_string()).collect()),
    }
}

fn complete_path(input: &str, arg: &str, cwd: &VPath, tree: &FileTree) -> Completion {
    let (parents, partial) = match arg.rsplit_once(SEPARATOR) {
        Some((parents, partial)) => (Some(parents), partial),
        None => (None, arg),
    };

    let mut base = cwd.clone();
    for segment in parents.into_iter().flat_map(|p| p.split(SEPARATOR)) {
        match segment {
            "" | "." => {},
            ".." => {
                log::debug!("completion abandoned at '..' in {arg}");
                return Completion::NoMatch;
            },
            name => {
                let is_dir = tree
                    .directory(&base)
                    .is_some_and(|dir| dir.child_dir(name).is_some());
                if !is_dir {
                    return Completion::NoMatch;
                }
                base.push(name);
            },
        }
    }

    let Some(dir) = tree.directory(&base) else {
        return Completion::NoMatch;
    };
    let show_hidden = is_hidden(partial);
    let mut matches: Vec<Candidate> = dir
        .listing(show_hidden)
        .filter(|(name, _)| name.starts_with(partial))
        .map(|(name, entry)| Candidate {
            name: name.to_string(),
            is_dir: entry.is_dir(),
        })
        .collect();

    match matches.len() {
        0 => Completion::NoMatch,
        1 => {
            let Candidate { name, is_dir } = matches.remove(0);
            let lead = &input[..input.len() - partial.len()];
            let suffix = if is_dir { "/" } else { "" };
            Completion::Replace(format!("{lead}{name}{suffix}"))
        },
        _ => Completion::Entries(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMANDS: &[&str] = &["ls", "cd", "cat", "pwd", "clear", "help", "echo"];

    fn at(cwd: &[&str], input: &str) -> Completion {
        let tree = FileTree::portfolio();
        complete(input, &VPath::from_segments(cwd.iter().copied()), &tree, COMMANDS)
    }

    fn names(c: Completion) -> Vec<String> {
        match c {
            Completion::Entries(list) => list.into_iter().map(|c| c.name).collect(),
            Completion::Commands(list) => list,
            other => panic!("expected candidates, got {other:?}"),
        }
    }

    #[test]
    fn single_command_match() {
        assert_eq!(at(&[], "l"), Completion::Replace("ls ".into()));
        assert_eq!(at(&[], "pw"), Completion::Replace("pwd ".into()));
    }

    #[test]
    fn several_command_matches() {
        assert_eq!(names(at(&[], "c")), vec!["cd", "cat", "clear"]);
    }

    #[test]
    fn empty_buffer_has_no_token_to_complete() {
        assert_eq!(at(&[], ""), Completion::NoMatch);
        assert_eq!(at(&["info"], "  \t "), Completion::NoMatch);
    }

    #[test]
    fn no_command_match() {
        assert_eq!(at(&[], "zz"), Completion::NoMatch);
    }

    #[test]
    fn directory_gets_trailing_separator() {
        assert_eq!(at(&[], "cd in"), Completion::Replace("cd info/".into()));
    }

    #[test]
    fn file_gets_no_separator() {
        assert_eq!(at(&["info"], "cat ab"), Completion::Replace("cat about.txt".into()));
    }

    #[test]
    fn nested_segment() {
        assert_eq!(
            at(&[], "cd info/pro"),
            Completion::Replace("cd info/projects/".into())
        );
        assert_eq!(
            at(&["info"], "cd ./contact/gi"),
            Completion::Replace("cd ./contact/github.txt".into())
        );
    }

    #[test]
    fn several_entry_matches() {
        assert_eq!(names(at(&["info", "projects"], "cat ")), vec!["portfolio.txt", "blog.txt"]);
    }

    #[test]
    fn entry_candidates_mark_directories() {
        let Completion::Entries(list) = at(&["info"], "ls ") else {
            panic!("expected entries");
        };
        let projects = list.iter().find(|c| c.name == "projects").unwrap();
        assert!(projects.is_dir);
        assert!(!list.iter().any(|c| c.name == ".secret.txt"));
    }

    #[test]
    fn hidden_only_with_marker_prefix() {
        assert_eq!(at(&["info"], "cat .s"), Completion::Replace("cat .secret.txt".into()));
        assert_eq!(at(&["info"], "cat s"), Completion::Replace("cat skills.txt".into()));
    }

    #[test]
    fn dotdot_abandons() {
        assert_eq!(at(&["info"], "cd ../in"), Completion::NoMatch);
    }

    #[test]
    fn missing_or_file_parent_abandons() {
        assert_eq!(at(&[], "cd nope/x"), Completion::NoMatch);
        assert_eq!(at(&["info"], "cd about.txt/x"), Completion::NoMatch);
    }

    #[test]
    fn three_tokens_unchanged() {
        assert_eq!(at(&["info"], "cat about.txt sk"), Completion::NoMatch);
    }

    #[test]
    fn no_path_match() {
        assert_eq!(at(&["info"], "cat zz"), Completion::NoMatch);
    }
}
