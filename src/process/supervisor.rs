use std::process::{Command, ExitStatus, Stdio};

use super::{signal, ProcessError};
use crate::path::PathExpander;

/// How a supervised external command ended. Both variants return control to
/// the dispatcher identically; `Killed` only exists for diagnostics and tests.
#[derive(Debug)]
pub enum Outcome {
    Completed(ExitStatus),
    Killed,
}

/// Runs external commands: spawn, arm the deadline, block until the child is
/// reaped, disarm. One command is in flight at a time; the shell never
/// overlaps children.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    expander: PathExpander,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Supervisor {
            expander: PathExpander::new(),
        }
    }

    /// Launch `argv[0]` with the remaining tokens as arguments and wait for
    /// it. A `timeout_secs` of 0 means the child may run forever.
    pub fn run(&self, argv: &[String], timeout_secs: u32) -> Result<Outcome, ProcessError> {
        let Some(program) = argv.first() else {
            return Err(ProcessError::Other("empty command".to_string()));
        };

        signal::install_deadline_handler()?;

        let expanded_args: Vec<String> = argv
            .iter()
            .map(|arg| {
                if arg.contains('~') {
                    self.expander
                        .expand(arg)
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_else(|_| arg.clone())
                } else {
                    arg.clone()
                }
            })
            .collect();

        let mut command = Command::new(&expanded_args[0]);
        command
            .args(&expanded_args[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Name first: the handler reads it once the deadline is armed.
        signal::set_active_name(program);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessError::CommandNotFound(program.clone()));
            }
            Err(e) => return Err(ProcessError::SpawnFailed(e.to_string())),
        };

        signal::set_active_pid(child.id() as i32);
        if timeout_secs > 0 {
            signal::arm(timeout_secs);
        }

        let status = child.wait();
        // Disarm before anything else can spawn; a leftover deadline must
        // never fire at a later child.
        signal::disarm_and_clear();
        let status = status?;

        if was_deadline_kill(&status) {
            Ok(Outcome::Killed)
        } else {
            Ok(Outcome::Completed(status))
        }
    }
}

fn was_deadline_kill(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(libc::SIGKILL)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use std::time::Instant;

    /// The deadline bookkeeping is process-wide, so tests that spawn
    /// children must not overlap.
    pub(crate) fn lock_supervisor() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        match MUTEX.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fast_command_completes_with_success_status() {
        let _lock = lock_supervisor();
        let supervisor = Supervisor::new();
        let outcome = supervisor.run(&argv(&["true"]), 0).expect("run true");
        match outcome {
            Outcome::Completed(status) => assert!(status.success()),
            Outcome::Killed => panic!("true must not be killed"),
        }
    }

    #[test]
    fn long_running_command_is_killed_at_the_deadline() {
        let _lock = lock_supervisor();
        let supervisor = Supervisor::new();
        let started = Instant::now();
        let outcome = supervisor.run(&argv(&["sleep", "10"]), 1).expect("run sleep");
        assert!(matches!(outcome, Outcome::Killed));
        assert!(started.elapsed().as_secs() < 5);
    }

    #[test]
    fn zero_timeout_never_kills() {
        let _lock = lock_supervisor();
        let supervisor = Supervisor::new();
        let outcome = supervisor.run(&argv(&["sleep", "1"]), 0).expect("run sleep");
        match outcome {
            Outcome::Completed(status) => assert!(status.success()),
            Outcome::Killed => panic!("no deadline was armed"),
        }
    }

    #[test]
    fn unknown_program_reports_not_found_and_no_child_lingers() {
        let _lock = lock_supervisor();
        let supervisor = Supervisor::new();
        let err = supervisor
            .run(&argv(&["msh_test_no_such_program_123"]), 0)
            .expect_err("spawn must fail");
        assert!(matches!(err, ProcessError::CommandNotFound(ref name)
            if name == "msh_test_no_such_program_123"));
    }

    #[test]
    fn stale_deadline_does_not_touch_the_next_child() {
        let _lock = lock_supervisor();
        let supervisor = Supervisor::new();
        let outcome = supervisor.run(&argv(&["sleep", "10"]), 1).expect("run sleep");
        assert!(matches!(outcome, Outcome::Killed));

        // The next child outlives the old 1s deadline window; it must
        // complete untouched because the alarm was cancelled after wait.
        let outcome = supervisor.run(&argv(&["sleep", "2"]), 0).expect("run sleep");
        match outcome {
            Outcome::Completed(status) => assert!(status.success()),
            Outcome::Killed => panic!("stale deadline fired at a reused child slot"),
        }
    }
}
