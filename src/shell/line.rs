//! Interactive shell loop
//!
//! A line-based shell with rustyline editing and history. Input dispatch
//! order: the `:set` directive, then the command registry (first matching
//! pattern wins), then the evaluation buffer. Incomplete chunks are
//! buffered until their delimiters balance.

use std::mem;
use std::path::Path;
use std::rc::Rc;

use owo_colors::OwoColorize;
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, EditMode, Editor};
use tracing::{debug, warn};

use crate::ext::{self, Extensions};
use crate::shell::backend::{EvalResult, ScratchBackend, ShellBackend};
use crate::shell::completer::ShellHelper;
use crate::shell::context::ShellContext;
use crate::shell::registry::{
    CommandOutcome, CommandRegistry, OptionRegistry, RegistryError, SetOutcome,
};
use crate::util::config::UserConfig;
use crate::{NAME, VERSION};

/// Shell errors
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// What the loop should do after processing a line
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input
    Continue,
    /// Leave the shell
    Exit,
}

/// Interactive shell
///
/// Owns the registries, the session context, and the evaluation backend.
pub struct Shell<B: ShellBackend> {
    config: UserConfig,
    editor: Editor<ShellHelper, FileHistory>,
    backend: B,
    context: ShellContext,
    options: OptionRegistry,
    commands: CommandRegistry,
    exts: Extensions,
    buffer: String,
}

impl Shell<ScratchBackend> {
    /// Create a shell with the bundled scratch backend
    pub fn new(config: UserConfig) -> Result<Self, ShellError> {
        Self::with_backend(config, |exts| {
            ScratchBackend::with_autoload_debug(Rc::clone(&exts.autoload_debug))
        })
    }
}

impl<B: ShellBackend> Shell<B> {
    /// Create a shell around a custom backend
    ///
    /// The backend factory runs after the default extensions are installed
    /// so it can hold handles to them.
    pub fn with_backend<F>(
        config: UserConfig,
        make_backend: F,
    ) -> Result<Self, ShellError>
    where
        F: FnOnce(&Extensions) -> B,
    {
        let mut options = OptionRegistry::new();
        let mut commands = CommandRegistry::new();
        let exts = ext::install_defaults(&mut options, &mut commands)?;
        commands.register(
            r"^:(quit|q)$",
            "shell",
            ":quit",
            "exit the shell",
            Box::new(|_, _| CommandOutcome::Exit),
        )?;

        if !exts
            .colour
            .borrow_mut()
            .apply_scheme(&config.repl.colour_scheme)
        {
            warn!(
                "unknown colour scheme '{}' in config, keeping '{}'",
                config.repl.colour_scheme,
                exts.colour.borrow().active()
            );
        }

        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();
        let mut editor: Editor<ShellHelper, FileHistory> = Editor::with_config(rl_config)?;
        let option_names: Vec<String> = options.names().map(str::to_string).collect();
        editor.set_helper(Some(ShellHelper::new(option_names)));

        let backend = make_backend(&exts);

        Ok(Self {
            config,
            editor,
            backend,
            context: ShellContext::new(),
            options,
            commands,
            exts,
            buffer: String::new(),
        })
    }

    /// The session context
    pub fn context(&self) -> &ShellContext {
        &self.context
    }

    /// The session context, mutable
    pub fn context_mut(&mut self) -> &mut ShellContext {
        &mut self.context
    }

    /// Handles to the installed extensions
    pub fn extensions(&self) -> &Extensions {
        &self.exts
    }

    /// Run the interactive loop until exit
    pub fn run(&mut self) -> Result<(), ShellError> {
        println!("{} {}", NAME.bold(), VERSION);
        println!("Type ? for help, :quit to exit\n");

        if let Some(path) = self.config.repl.history_file.clone() {
            if path.exists() {
                let _ = self.editor.load_history(&path);
            }
        }

        loop {
            let prompt = if self.buffer.is_empty() {
                self.config.repl.prompt.clone()
            } else {
                self.config.repl.continuation_prompt.clone()
            };
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_vars(self.context.var_names());
            }

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    if self.feed(&line) == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => {
                    self.buffer.clear();
                    println!("(interrupted)");
                }
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(path) = self.config.repl.history_file.clone() {
            let _ = self.editor.save_history(&path);
        }

        Ok(())
    }

    /// Replay a script file through the shell, line by line
    ///
    /// A missing file replays nothing.
    pub fn run_script(
        &mut self,
        path: &Path,
    ) {
        let lines = self.exts.load_script.borrow().load_script(path);
        debug!("replaying {} line(s) from {}", lines.len(), path.display());
        for line in lines {
            if self.feed(&line) == Flow::Exit {
                break;
            }
        }
    }

    /// Process one line of input as if typed at the prompt
    pub fn feed(
        &mut self,
        line: &str,
    ) -> Flow {
        let trimmed = line.trim();

        if self.buffer.is_empty() {
            if trimmed.is_empty() {
                return Flow::Continue;
            }
            self.exts.exec_time.borrow_mut().mark_parse_start();

            if let Some(rest) = trimmed.strip_prefix(":set") {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    self.handle_set(rest.trim());
                    return Flow::Continue;
                }
            }

            if let Some(outcome) = self.commands.dispatch(trimmed, &mut self.context) {
                return self.handle_outcome(outcome);
            }
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        if is_complete(&self.buffer) {
            let code = mem::take(&mut self.buffer);
            self.eval(&code);
        }
        Flow::Continue
    }

    fn handle_set(
        &mut self,
        args: &str,
    ) {
        if args.is_empty() {
            println!("{}", self.render_options());
            return;
        }
        let (name, value) = match args.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (args, None),
        };
        match self.options.set(name, value, &mut self.context) {
            SetOutcome::Applied => {}
            SetOutcome::Ignored(msg) => println!("{}", msg),
        }
    }

    fn handle_outcome(
        &mut self,
        outcome: CommandOutcome,
    ) -> Flow {
        match outcome {
            CommandOutcome::Text(text) => {
                println!("{}", text);
                Flow::Continue
            }
            CommandOutcome::Lines(lines) => {
                for line in lines {
                    if self.feed(&line) == Flow::Exit {
                        return Flow::Exit;
                    }
                }
                Flow::Continue
            }
            CommandOutcome::Help => {
                println!("{}", self.render_help());
                Flow::Continue
            }
            CommandOutcome::Exit => Flow::Exit,
            CommandOutcome::Silent => Flow::Continue,
        }
    }

    fn eval(
        &mut self,
        code: &str,
    ) {
        self.exts.exec_time.borrow_mut().mark_exec_start();
        let result = self.backend.eval(code, &mut self.context);
        self.exts.exec_time.borrow_mut().mark_end();

        match result {
            EvalResult::Value(value) => {
                let verbose = self.exts.verbose.borrow_mut().take();
                let text = if verbose {
                    value.verbose()
                } else {
                    value.to_string()
                };
                println!("{}", self.exts.colour.borrow().paint("value", &text));
            }
            EvalResult::Ok => {}
            EvalResult::Error(e) => {
                println!("{}", self.exts.colour.borrow().paint("exception", &e));
            }
        }

        if self.exts.exec_time.borrow().enabled() {
            println!("{}", self.exts.exec_time.borrow().summary());
        }
    }

    fn render_options(&self) -> String {
        let mut out = String::from("options:\n");
        for name in self.options.names() {
            let aliases = self.options.aliases_of(name);
            if aliases.is_empty() {
                out.push_str(&format!("  {}\n", name));
            } else {
                out.push_str(&format!("  {} ({})\n", name, aliases.join(", ")));
            }
        }
        out.push_str("set with :set <name>=<value>");
        out
    }

    fn render_help(&self) -> String {
        let mut out = format!("{} {}\n\ncommands:\n", NAME, VERSION);
        out.push_str("  :set <name>[=<value>]  - set a shell option (:set lists them)\n");
        for (usage, help, _owner) in self.commands.help_rows() {
            out.push_str(&format!("  {:<22} - {}\n", usage, help));
        }
        out.push_str("\nanything else is evaluated by the backend");
        out
    }
}

/// Whether the buffered input forms a complete chunk
///
/// Counts braces, brackets, and parens outside string literals; an excess
/// closer ends the chunk immediately.
fn is_complete(code: &str) -> bool {
    let code = code.trim();
    if code.is_empty() {
        return true;
    }

    let mut braces = 0;
    let mut brackets = 0;
    let mut parens = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => braces += 1,
            '}' if !in_string => {
                if braces == 0 {
                    return true;
                }
                braces -= 1;
            }
            '[' if !in_string => brackets += 1,
            ']' if !in_string => {
                if brackets == 0 {
                    return true;
                }
                brackets -= 1;
            }
            '(' if !in_string => parens += 1,
            ')' if !in_string => {
                if parens == 0 {
                    return true;
                }
                parens -= 1;
            }
            _ => {}
        }
    }

    braces == 0 && brackets == 0 && parens == 0 && !in_string && !escaped
}
