use std::fmt;

/// Byte range of the offending text in the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone)]
pub struct InputError {
    pub kind: InputErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// The text is not a height list at all (bad bracket syntax, not a list).
    MalformedInput,
    /// The list shape is fine but one entry is not a usable height.
    InvalidValue,
}

impl InputError {
    pub fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(InputErrorKind::MalformedInput, message)
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(InputErrorKind::InvalidValue, message)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for InputError {}

pub type ParseResult<T> = Result<T, InputError>;
