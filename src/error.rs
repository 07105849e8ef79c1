use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    HomeDirNotFound,
    MissingArgument(&'static str),
    InvalidNumber(String),
    DirectoryChange(String, String),
    ProcessError(ProcessError),
    CtrlC(String),
}

impl ShellError {
    /// Numeric code printed by the read-eval loop alongside the message.
    pub fn code(&self) -> i32 {
        match self {
            ShellError::Readline(_) => -1,
            ShellError::Io(_) => -2,
            ShellError::HomeDirNotFound => -3,
            ShellError::MissingArgument(_) => -4,
            ShellError::InvalidNumber(_) => -5,
            ShellError::DirectoryChange(_, _) => -6,
            ShellError::ProcessError(_) => -7,
            ShellError::CtrlC(_) => -8,
        }
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::HomeDirNotFound => write!(f, "Home directory not found"),
            ShellError::MissingArgument(builtin) => {
                write!(f, "{}: missing argument", builtin)
            }
            ShellError::InvalidNumber(token) => write!(f, "invalid number: {}", token),
            ShellError::DirectoryChange(path, reason) => write!(f, "cd: {}: {}", path, reason),
            ShellError::ProcessError(e) => write!(f, "{}", e),
            ShellError::CtrlC(msg) => write!(f, "Ctrl-C error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
