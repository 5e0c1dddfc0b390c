// src/classify.rs

//! Turning failures into operator-facing reports
//!
//! Every error that reaches `main` falls into one [`ErrorCategory`]:
//!
//! - **Usage**: the operator can fix it by changing the invocation. Only
//!   the message and a pointer to `--help` are printed.
//! - **ExternalCommand**: a command run on the target failed. The command,
//!   its full output and a backtrace are printed below a support banner.
//! - **Unexpected**: anything else. The error chain and a backtrace are
//!   printed below a support banner.
//!
//! The first [`crate::Error`] in the error chain decides the category, so
//! context added with `anyhow::Context` does not change it.

use std::fmt::Write as _;

use crate::error::Error;
use crate::os::OsRelease;

/// Where operators of this machine should report unexpected errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportChannel {
    /// SUSE Linux Enterprise customers file service requests
    Enterprise,
    /// Everyone else files a public bug report
    Community { repository: String },
}

impl SupportChannel {
    /// Choose the channel from the os-release of the local machine
    pub fn detect() -> Self {
        match OsRelease::local() {
            Some(release) => Self::for_os(&release),
            None => Self::community(),
        }
    }

    pub fn for_os(release: &OsRelease) -> Self {
        if release.is_sle_family() {
            Self::Enterprise
        } else {
            Self::community()
        }
    }

    fn community() -> Self {
        Self::Community {
            repository: env!("CARGO_PKG_REPOSITORY").to_string(),
        }
    }

    /// Banner printed above external command and unexpected errors
    pub fn banner(&self) -> String {
        match self {
            Self::Enterprise => "sysdesc experienced an unexpected error.\n\
                 If this impacts your business please file a service request at \
                 https://www.suse.com/mysupport\n\
                 so that we can assist you on this issue. \
                 An active support contract is required.\n"
                .to_string(),
            Self::Community { repository } => format!(
                "sysdesc experienced an unexpected error. Please file a bug report at: {}/issues/new\n",
                repository
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    ExternalCommand,
    Unexpected,
}

impl ErrorCategory {
    /// Process exit status for this category
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage => 2,
            Self::ExternalCommand | Self::Unexpected => 1,
        }
    }

    fn of(error: &Error) -> Self {
        match error {
            Error::InvalidCommandLine(_)
            | Error::UnknownScope { .. }
            | Error::ServerPortError(_)
            | Error::InvalidFilter(_)
            | Error::InvalidDescriptionName(_)
            | Error::DescriptionNotFound(_)
            | Error::DescriptionExists(_)
            | Error::InvalidDescription { .. }
            | Error::IncompatibleFormat { .. }
            | Error::ToolNotFound(_)
            | Error::Config(_) => Self::Usage,
            Error::ExternalCommandFailed { .. } => Self::ExternalCommand,
            Error::InspectionFailed { .. } | Error::Io(_) | Error::Json(_) => Self::Unexpected,
        }
    }
}

/// Maps errors to categories and renders them for the operator
pub struct ErrorClassifier {
    program: String,
    channel: SupportChannel,
}

impl ErrorClassifier {
    pub fn new(program: impl Into<String>, channel: SupportChannel) -> Self {
        Self {
            program: program.into(),
            channel,
        }
    }

    pub fn classify(&self, error: &anyhow::Error) -> ErrorCategory {
        for cause in error.chain() {
            if let Some(error) = cause.downcast_ref::<Error>() {
                return ErrorCategory::of(error);
            }
            if cause.downcast_ref::<clap::Error>().is_some() {
                return ErrorCategory::Usage;
            }
        }
        ErrorCategory::Unexpected
    }

    /// Text written to standard error for `error`
    pub fn render(&self, error: &anyhow::Error) -> String {
        match self.classify(error) {
            ErrorCategory::Usage => self.render_usage(error),
            ErrorCategory::ExternalCommand => self.render_external(error),
            ErrorCategory::Unexpected => self.render_unexpected(error),
        }
    }

    pub fn exit_code(&self, error: &anyhow::Error) -> u8 {
        self.classify(error).exit_code()
    }

    fn render_usage(&self, error: &anyhow::Error) -> String {
        let message = error
            .chain()
            .find_map(|cause| {
                cause
                    .downcast_ref::<Error>()
                    .map(ToString::to_string)
                    .or_else(|| cause.downcast_ref::<clap::Error>().map(clap_message))
            })
            .unwrap_or_else(|| error.to_string());
        format!(
            "{}\n\nRun '{} --help' for more information.\n",
            message.trim_end(),
            self.program
        )
    }

    fn render_external(&self, error: &anyhow::Error) -> String {
        let mut out = self.channel.banner();
        let failed = error.chain().find_map(|cause| match cause.downcast_ref::<Error>() {
            Some(Error::ExternalCommandFailed {
                command,
                status,
                stdout,
                stderr,
            }) => Some((command, status, stdout, stderr)),
            _ => None,
        });
        if let Some((command, status, stdout, stderr)) = failed {
            let _ = write!(
                out,
                "\nThe following command failed ({}):\n  {}\n\nError output:\n{}\n\nStandard output:\n{}\n",
                status,
                command,
                stderr.trim_end(),
                stdout.trim_end()
            );
        }
        let _ = write!(out, "\nBacktrace:\n{}\n", error.backtrace());
        out
    }

    fn render_unexpected(&self, error: &anyhow::Error) -> String {
        let mut out = self.channel.banner();
        out.push('\n');
        for (index, cause) in error.chain().enumerate() {
            if index == 0 {
                let _ = writeln!(out, "{}", cause);
            } else {
                let _ = writeln!(out, "Caused by: {}", cause);
            }
        }
        let _ = write!(out, "\nBacktrace:\n{}\n", error.backtrace());
        out
    }
}

/// clap's rendered error without its own usage hint
fn clap_message(error: &clap::Error) -> String {
    let rendered = error.to_string();
    rendered
        .lines()
        .take_while(|line| !line.starts_with("For more information"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn classifier() -> ErrorClassifier {
        ErrorClassifier::new(
            "sysdesc",
            SupportChannel::Community {
                repository: "https://example.org/sysdesc".to_string(),
            },
        )
    }

    fn external() -> Error {
        Error::ExternalCommandFailed {
            command: "ssh root@db01 -- cat /etc/passwd".to_string(),
            status: "exit status 1".to_string(),
            stdout: "partial".to_string(),
            stderr: "Permission denied".to_string(),
        }
    }

    #[test]
    fn test_usage_errors() {
        let error = anyhow::Error::from(Error::InvalidCommandLine("bad option".to_string()));
        let classifier = classifier();

        assert_eq!(classifier.classify(&error), ErrorCategory::Usage);
        assert_eq!(classifier.exit_code(&error), 2);
        assert_eq!(
            classifier.render(&error),
            "bad option\n\nRun 'sysdesc --help' for more information.\n"
        );
    }

    #[test]
    fn test_context_does_not_change_category() {
        let error = Err::<(), _>(Error::DescriptionNotFound("db01".to_string()))
            .context("Failed to show description")
            .unwrap_err();
        let classifier = classifier();

        assert_eq!(classifier.classify(&error), ErrorCategory::Usage);
        assert!(classifier
            .render(&error)
            .starts_with("System description 'db01' does not exist."));
    }

    #[test]
    fn test_external_command_rendering() {
        let error = anyhow::Error::from(external()).context("Inspection failed");
        let classifier = classifier();
        let out = classifier.render(&error);

        assert_eq!(classifier.classify(&error), ErrorCategory::ExternalCommand);
        assert_eq!(classifier.exit_code(&error), 1);
        assert!(out.starts_with(
            "sysdesc experienced an unexpected error. Please file a bug report at: https://example.org/sysdesc/issues/new\n"
        ));
        assert!(out.contains("ssh root@db01 -- cat /etc/passwd"));
        assert!(out.contains("Error output:\nPermission denied"));
        assert!(out.contains("Standard output:\npartial"));
        let stdout_at = out.find("Standard output:").unwrap();
        let backtrace_at = out.find("\nBacktrace:\n").unwrap();
        assert!(backtrace_at > stdout_at);
    }

    #[test]
    fn test_unexpected_errors() {
        let error = anyhow::anyhow!("something odd");
        let classifier = classifier();
        let out = classifier.render(&error);

        assert_eq!(classifier.classify(&error), ErrorCategory::Unexpected);
        assert!(out.contains("something odd"));
        assert!(out.contains("Backtrace:"));

        let error = anyhow::Error::from(Error::InspectionFailed {
            scope: "users".to_string(),
            message: "bad line".to_string(),
        });
        assert_eq!(classifier.classify(&error), ErrorCategory::Unexpected);
    }

    #[test]
    fn test_support_channel() {
        let sles = OsRelease::parse("ID=\"sles\"\n");
        assert_eq!(SupportChannel::for_os(&sles), SupportChannel::Enterprise);
        assert!(SupportChannel::Enterprise
            .banner()
            .contains("https://www.suse.com/mysupport"));

        let leap = OsRelease::parse("ID=opensuse-leap\n");
        assert!(matches!(
            SupportChannel::for_os(&leap),
            SupportChannel::Community { .. }
        ));
    }
}
