use std::error::Error as StdError;
use std::fmt;

use tracing_error::SpanTrace;

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in hyperdoc operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// The requested resource does not exist or is not visible
    NotFound { resource_type: String, id: String },

    /// A request parameter could not be interpreted
    InvalidParameter { name: String, message: String },

    /// Multiple errors occurred during batch operations
    Multiple {
        errors: Vec<HyperdocError>,
        count: usize,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound { resource_type, id } => {
                write!(f, "{resource_type} '{id}' not found")
            }
            ErrorKind::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            ErrorKind::Multiple { errors, count } => {
                write!(f, "Multiple errors occurred ({count} total)")?;
                if let Some(first) = errors.first() {
                    write!(f, ": {first}")?;
                }
                Ok(())
            }
            ErrorKind::Message { message } => {
                write!(f, "{message}")
            }
        }
    }
}

/* 📖 # Why separate ErrorKind and HyperdocError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (resource identities, parameter names, etc.)
- HyperdocError: wraps ErrorKind with additional runtime context strings, an optional cause and a span trace

Benefits:
- Users can pattern match on ErrorKind for specific handling (e.g. map NotFound to a 404 at the HTTP edge)
- HyperdocError provides ergonomic context attachment for propagation
- Avoids nested context strings (which get expensive with many layers)
*/

/// Comprehensive error type wrapping ErrorKind with optional context.
/// HyperdocError implements the standard Error trait and supports context attachment
/// and cause chaining.
pub struct HyperdocError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<HyperdocError>>,
    span_trace: SpanTrace,
}

impl HyperdocError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message error. Shorthand for the common catch-all case.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a not-found error for the given resource identity.
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        })
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameter {
            name: name.into(),
            message: message.into(),
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Attaches a causing error, forming an error chain.
    pub fn caused_by(mut self, cause: HyperdocError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, oldest first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// Renders the error, its context and its cause chain as an indented tree.
    fn render_tree(&self) -> String {
        let mut out = format!("{}\n", self.kind);
        let mut branches: Vec<String> = self.context.clone();
        if let Some(cause) = &self.cause {
            branches.push(format!("cause: {}", cause.render_tree().trim_end()));
        }
        let last_index = branches.len().saturating_sub(1);
        for (index, branch) in branches.iter().enumerate() {
            let (head, continuation) = if index == last_index {
                ("└─ ", "   ")
            } else {
                ("├─ ", "│  ")
            };
            for (line_index, line) in branch.lines().enumerate() {
                out.push_str(if line_index == 0 { head } else { continuation });
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

impl From<ErrorKind> for HyperdocError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for HyperdocError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => match &self.kind {
                ErrorKind::Multiple { errors, .. } => {
                    errors.first().map(|e| e as &(dyn StdError + 'static))
                }
                _ => None,
            },
        }
    }
}

impl fmt::Display for HyperdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{ctx}")?;
            } else {
                write!(f, ": {ctx}")?;
            }
        }

        // Add a separator if we have context
        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for HyperdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_tree())?;
        writeln!(f, "Trace: {}", self.span_trace)
    }
}

/* 📖 # Why use Box<HyperdocError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for hyperdoc operations.
pub type HyperdocResult<T> = std::result::Result<T, Box<HyperdocError>>;

/* 📖 # Why provide ResultExt for context attachment?
The ResultExt trait provides ergonomic methods to add context to errors during propagation.
Using `.context("message")` is more readable than manually mapping and wrapping errors.
This pattern is common in error-handling libraries (e.g., anyhow, eyre).
*/

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> HyperdocResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> HyperdocResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for HyperdocResult<T> {
    fn context(self, context: impl Into<String>) -> HyperdocResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> HyperdocResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
