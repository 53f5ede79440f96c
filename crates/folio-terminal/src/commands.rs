//! Built-in commands for the portfolio terminal.

use folio_types::error::{FolioError, Result};
use folio_types::line::Line;
use folio_vfs::resolve;

use crate::echo;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, Invocation};

/// Separator between entries in `ls` output.
const LS_SEPARATOR: &str = "  ";

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(EchoCmd));
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [-a|--all]"
    }
    fn execute(&self, inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let show_hidden = inv.args.iter().any(|a| matches!(*a, "-a" | "--all"));
        let Some(dir) = env.tree.directory(&env.cwd) else {
            return Err(FolioError::PathNotFound(env.cwd.to_string()));
        };

        let mut line = Line::new();
        for (i, (name, entry)) in dir.listing(show_hidden).enumerate() {
            if i > 0 {
                line = line.with(LS_SEPARATOR, env.theme.output);
            }
            let color = if entry.is_dir() {
                env.theme.directory
            } else {
                env.theme.output
            };
            line = line.with(name, color);
        }
        if line.spans.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::line(line))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change working directory"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        env.cwd = resolve(env.tree, &env.cwd, &inv.arg_string())?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display a file in the current directory"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn execute(&self, inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        // Direct children only: `cat a/b` looks for an entry literally named
        // "a/b", it does not walk into `a`.
        let name = inv.arg_string();
        let content = env
            .tree
            .directory(&env.cwd)
            .and_then(|dir| dir.file(&name))
            .ok_or_else(|| FolioError::FileNotFound(name.clone()))?;
        Ok(CommandOutput::line(Line::plain(content, env.theme.output)))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::line(Line::plain(
            env.cwd.to_string(),
            env.theme.prompt,
        )))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear terminal output"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _inv: &Invocation<'_>, _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List available commands"
    }
    fn usage(&self) -> &str {
        "help"
    }
    fn execute(&self, _inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        // The registry intercepts `help` so it can list every command; this
        // body only runs if the command is invoked outside a registry.
        Ok(CommandOutput::line(Line::plain(
            "Type 'help' at the prompt for a list of commands.",
            env.theme.prompt,
        )))
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Send me a message"
    }
    fn usage(&self) -> &str {
        "echo from:<name> \"<message>\" > <address>"
    }
    fn execute(&self, inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let req = echo::parse(inv.raw_args)?;
        if req.recipient != env.contact_address {
            return Err(FolioError::NotifierRejected(req.recipient.to_string()));
        }
        Ok(CommandOutput::Notify {
            sender: req.sender.to_string(),
            message: req.message.to_string(),
            recipient: req.recipient.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::config::Theme;
    use folio_vfs::{FileTree, VPath};

    const CONTACT: &str = "me@example.com";

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        reg
    }

    /// Run `line` from `cwd`, returning the output and the resulting cwd.
    fn run_in(cwd: &[&str], line: &str) -> (Result<CommandOutput>, VPath) {
        let tree = FileTree::portfolio();
        let theme = Theme::default();
        let mut env = Environment {
            cwd: VPath::from_segments(cwd.iter().copied()),
            tree: &tree,
            theme: &theme,
            contact_address: CONTACT,
        };
        let out = registry().execute(line, &mut env);
        (out, env.cwd)
    }

    fn lines(out: Result<CommandOutput>) -> Vec<Line> {
        match out.unwrap() {
            CommandOutput::Lines(lines) => lines,
            other => panic!("expected lines, got {other:?}"),
        }
    }

    fn text(out: Result<CommandOutput>) -> String {
        lines(out).iter().map(Line::text).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn ls_hides_dotfiles_by_default() {
        let (out, _) = run_in(&["info"], "ls");
        assert_eq!(text(out), "about.txt  skills.txt  projects  contact");
    }

    #[test]
    fn ls_all_flags_show_hidden() {
        for cmd in ["ls -a", "ls --all"] {
            let (out, _) = run_in(&["info"], cmd);
            assert_eq!(
                text(out),
                "about.txt  skills.txt  projects  contact  .secret.txt",
                "{cmd}"
            );
        }
    }

    #[test]
    fn ls_colors_directories() {
        let theme = Theme::default();
        let (out, _) = run_in(&["info"], "ls");
        let line = &lines(out)[0];
        let projects = line.spans.iter().find(|s| s.text == "projects").unwrap();
        let about = line.spans.iter().find(|s| s.text == "about.txt").unwrap();
        assert_eq!(projects.color, theme.directory);
        assert_eq!(about.color, theme.output);
    }

    #[test]
    fn ls_at_root() {
        let (out, _) = run_in(&[], "ls");
        assert_eq!(text(out), "info");
    }

    #[test]
    fn cd_without_argument_goes_home() {
        let (out, cwd) = run_in(&["info", "projects"], "cd");
        assert_eq!(out.unwrap(), CommandOutput::None);
        assert!(cwd.is_root());
    }

    #[test]
    fn cd_into_file_fails_and_keeps_cwd() {
        let (out, cwd) = run_in(&["info"], "cd about.txt");
        assert_eq!(
            format!("{}", out.unwrap_err()),
            "cd: no such directory: about.txt"
        );
        assert_eq!(cwd, VPath::from_segments(["info"]));
    }

    #[test]
    fn cd_multi_segment() {
        let (_, cwd) = run_in(&[], "cd info/contact");
        assert_eq!(cwd.to_string(), "/info/contact");
    }

    #[test]
    fn cat_direct_child() {
        let (out, _) = run_in(&["info", "contact"], "cat email.txt");
        assert_eq!(text(out), "youremail@example.com");
    }

    #[test]
    fn cat_returns_project_notes_verbatim() {
        let (out, _) = run_in(&["info", "projects"], "cat portfolio.txt");
        assert_eq!(
            text(out),
            "Terminal Portfolio — A fun terminal-like interface to explore my work."
        );
        let (out, _) = run_in(&["info", "projects"], "cat blog.txt");
        assert_eq!(text(out), "Personal blog — Sharing thoughts on code, design, and tech.");
    }

    #[test]
    fn cat_does_not_walk_paths() {
        let (out, _) = run_in(&[], "cat info/about.txt");
        assert!(matches!(out, Err(FolioError::FileNotFound(ref n)) if n == "info/about.txt"));
    }

    #[test]
    fn cat_directory_is_not_a_file() {
        let (out, _) = run_in(&["info"], "cat projects");
        assert_eq!(format!("{}", out.unwrap_err()), "cat: projects: No such file");
    }

    #[test]
    fn cat_hidden_file() {
        let (out, _) = run_in(&["info"], "cat .secret.txt");
        assert!(text(out).starts_with("This is a hidden file!"));
    }

    #[test]
    fn cat_keeps_multiline_content_in_one_line() {
        let (out, _) = run_in(&["info"], "cat skills.txt");
        let lines = lines(out);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text().contains('\n'));
    }

    #[test]
    fn pwd_forms() {
        assert_eq!(text(run_in(&[], "pwd").0), "/");
        assert_eq!(text(run_in(&["info", "projects"], "pwd").0), "/info/projects");
    }

    #[test]
    fn clear_is_a_signal() {
        assert_eq!(run_in(&[], "clear").0.unwrap(), CommandOutput::Clear);
    }

    #[test]
    fn help_lists_every_command() {
        let help = text(run_in(&[], "help").0);
        assert!(help.starts_with("Available commands: "));
        assert_eq!(
            help,
            "Available commands: ls, cd, cat, pwd, clear, help, echo"
        );
    }

    #[test]
    fn echo_to_contact_address_signals_notify() {
        let (out, _) = run_in(&[], "echo from:Alice \"hi  there\" > me@example.com");
        assert_eq!(
            out.unwrap(),
            CommandOutput::Notify {
                sender: "Alice".into(),
                message: "hi  there".into(),
                recipient: CONTACT.into(),
            }
        );
    }

    #[test]
    fn echo_to_other_address_is_rejected() {
        let (out, _) = run_in(&[], "echo from:Alice \"hi\" > wrong@example.com");
        assert!(matches!(out, Err(FolioError::NotifierRejected(ref r)) if r == "wrong@example.com"));
    }

    #[test]
    fn echo_without_grammar_is_usage() {
        let (out, _) = run_in(&[], "echo hello");
        assert!(matches!(out, Err(FolioError::MalformedEchoGrammar)));
    }

    #[test]
    fn builtins_registered_in_order() {
        assert_eq!(
            registry().names(),
            vec!["ls", "cd", "cat", "pwd", "clear", "help", "echo"]
        );
    }
}
