use rustyline::DefaultEditor;

mod dispatch;
mod session;

pub use dispatch::{dispatch, Dispatch};
pub use session::Session;

use crate::{error::ShellError, flags::Flags, process::Supervisor, prompt::PromptRenderer};

pub struct Shell {
    editor: DefaultEditor,
    flags: Flags,
    session: Session,
    supervisor: Supervisor,
    renderer: PromptRenderer,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let renderer = PromptRenderer::new(flags.is_set("mono"));

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to leave the shell");
        })?;

        Ok(Shell {
            editor,
            flags,
            session: Session::new(),
            supervisor: Supervisor::new(),
            renderer,
        })
    }

    /// The read-eval loop: read a line, tokenize, dispatch. Empty lines are
    /// skipped without dispatching; dispatch errors are reported and the
    /// loop keeps going. Only `exit` or end of input stop it.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = if self.flags.is_set("quiet") {
                String::new()
            } else {
                self.renderer.render(self.session.prompt())
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let tokens = tokenize(&line);
                    if tokens.is_empty() {
                        continue;
                    }

                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    match dispatch(&mut self.session, &self.supervisor, &tokens) {
                        Ok(Dispatch::Continue) => {}
                        Ok(Dispatch::Terminate) => break,
                        Err(e) => eprintln!("msh: error {}: {}", e.code(), e),
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(rustyline::error::ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
