//! Diagnostics shown on stderr.

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic, LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use thiserror::Error;
use tsdoc_config::ConfigurationError;
use tsdoc_diagnostics::{ParserMessage, TSDocMessageId};

/// A parser message pointed at the input it came from.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MessageDiagnostic {
    message_id: TSDocMessageId,
    message: String,
    source_code: NamedSource<String>,
    span: SourceSpan,
}

impl MessageDiagnostic {
    pub fn new(name: &str, text: &str, message: &ParserMessage<'_>) -> Self {
        Self {
            message_id: message.message_id,
            message: message.unformatted_text.clone(),
            source_code: NamedSource::new(name, text.to_string()),
            span: message.text_range.to_range().into(),
        }
    }
}

impl Diagnostic for MessageDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.message_id))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            None, self.span,
        ))))
    }
}

/// Failures that stop the run before any comment is checked.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(tsdoc::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read standard input")]
    #[diagnostic(code(tsdoc::io))]
    Stdin(#[source] std::io::Error),

    #[error("Invalid configuration")]
    #[diagnostic(code(tsdoc::config))]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to start the worker pool")]
    #[diagnostic(code(tsdoc::jobs))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
