//! Finishing commands

use std::process::{Command, Stdio};

use takeoff_fs::NormalizedPath;

use crate::{InstallerConfig, ModuleDescriptor, Reporter, reporter};

/// Runs a shell command line to completion.
///
/// Runners report nothing back; a failing command does not stop the install.
pub trait CommandRunner {
    fn run(&self, command_line: &str);
}

/// [`CommandRunner`] that spawns the platform shell with inherited stdio.
///
/// On Unix: `sh -c "{command_line}"`
/// On Windows: `cmd /C "{command_line}"`
#[derive(Debug, Clone)]
pub struct ShellRunner {
    working_dir: NormalizedPath,
}

impl ShellRunner {
    pub fn new(working_dir: NormalizedPath) -> Self {
        Self { working_dir }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) {
        tracing::debug!(command = command_line, cwd = %self.working_dir, "running command");
        let status = shell_command(command_line)
            .current_dir(self.working_dir.to_native())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(command = command_line, code = ?status.code(), "command failed")
            }
            Err(e) => tracing::warn!(command = command_line, error = %e, "command could not start"),
        }
    }
}

fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", command_line]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}

/// What happened to a module's finishing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The module declares no command.
    NoCommand,
    /// The user was asked to run the command.
    ManualStepReported,
    /// The command ran through the project builder.
    AutoExecuted { command_line: String },
}

/// Full command line for `command`: `<root>/<builder_path> <command>`.
pub fn builder_command_line(root: &NormalizedPath, config: &InstallerConfig, command: &str) -> String {
    format!("{} {}", root.join(&config.builder_path), command)
}

/// Run or report the finishing command of `package`.
pub fn handle_command(
    descriptor: &ModuleDescriptor,
    package: &str,
    root: &NormalizedPath,
    config: &InstallerConfig,
    runner: &dyn CommandRunner,
    out: &dyn Reporter,
) -> CommandOutcome {
    if !descriptor.has_command() {
        return CommandOutcome::NoCommand;
    }

    if !descriptor.auto_install {
        out.info(&reporter::run_command_hint(package, &descriptor.command));
        return CommandOutcome::ManualStepReported;
    }

    let command_line = builder_command_line(root, config, &descriptor.command);
    runner.run(&command_line);
    out.info(&reporter::take_off_successful(package));
    CommandOutcome::AutoExecuted { command_line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log(RefCell<Vec<String>>);

    impl CommandRunner for Log {
        fn run(&self, command_line: &str) {
            self.0.borrow_mut().push(format!("run {command_line}"));
        }
    }

    impl Reporter for Log {
        fn info(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn descriptor(command: &str, auto_install: bool) -> ModuleDescriptor {
        ModuleDescriptor {
            command: command.to_string(),
            auto_install,
            ..Default::default()
        }
    }

    fn handle(descriptor: &ModuleDescriptor, log: &Log) -> CommandOutcome {
        handle_command(
            descriptor,
            "foo-take-off",
            &NormalizedPath::new("/project"),
            &InstallerConfig::default(),
            log,
            log,
        )
    }

    #[test]
    fn no_command_does_nothing() {
        let log = Log::default();
        assert_eq!(handle(&descriptor("", true), &log), CommandOutcome::NoCommand);
        assert!(log.0.borrow().is_empty());
    }

    #[test]
    fn manual_command_is_reported() {
        let log = Log::default();
        assert_eq!(
            handle(&descriptor("foo:setup", false), &log),
            CommandOutcome::ManualStepReported
        );
        assert_eq!(
            *log.0.borrow(),
            vec!["foo-take-off: Please run 'foo:setup' to finish the installation"]
        );
    }

    #[test]
    fn auto_install_runs_through_builder() {
        let log = Log::default();
        assert_eq!(
            handle(&descriptor("foo:setup", true), &log),
            CommandOutcome::AutoExecuted {
                command_line: "/project/bin/generator foo:setup".to_string()
            }
        );
        assert_eq!(
            *log.0.borrow(),
            vec![
                "run /project/bin/generator foo:setup",
                "foo-take-off: Take off successful"
            ]
        );
    }
}
