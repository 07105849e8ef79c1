/// Per-session shell state: the prompt string and the external-command
/// timeout. Owned by [`super::Shell`] and passed into dispatch by reference.
#[derive(Debug, Clone)]
pub struct Session {
    prompt: String,
    timeout_secs: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            prompt: "$".to_string(),
            timeout_secs: 2,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    /// Update the timeout and announce the change on stderr. 0 disables the
    /// deadline entirely.
    pub fn set_timeout(&mut self, secs: u32) {
        self.timeout_secs = secs;

        if secs == 0 {
            eprintln!("Timeout is disabled");
        } else {
            eprintln!("Timeout is set to {} second{}", secs, plural_suffix(secs));
        }
    }
}

pub(crate) fn plural_suffix(secs: u32) -> &'static str {
    if secs >= 2 {
        "s"
    } else {
        ""
    }
}
