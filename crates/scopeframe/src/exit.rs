use std::fmt;
use std::io;

use scopeframe_codec::CodecError;
use scopeframe_stream::StreamError;

// Exit code constants follow sysexits-style semantics.
pub const SUCCESS: i32 = 0;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn stream_error(context: &str, err: StreamError) -> CliError {
    match err {
        StreamError::Io(source) => io_error(context, source),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Io(source) => io_error(context, source),
        CodecError::StructuralMismatch { .. }
        | CodecError::TypeMismatch { .. }
        | CodecError::Desync(_)
        | CodecError::Truncated
        | CodecError::InvalidString(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        CodecError::Unsupported(_) => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}
