//! Error classification for the retry policy.
//!
//! Errors are sorted into an [`ErrorKind`] where they are created, so the
//! retry loop never inspects free text itself.
//!
//! Compatibility note: the API's transport has no structured "temporary"
//! code, so the baseline classifier matches the error text against
//! [`TRANSIENT_MARKERS`]. Typed `std::io::Error` sources found in an error
//! chain are checked first.

use std::error::Error;
use std::io;

/// Substrings marking a temporary connection problem.
pub const TRANSIENT_MARKERS: [&str; 2] = ["connection refused", "connection reset by peer"];

/// How a failure should be treated by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Temporary connection problem, worth another attempt.
    Transient,
    /// Any other failure; surfaced immediately.
    Permanent,
    /// Caller bug.
    Misuse,
}

/// Errors that know their own [`ErrorKind`].
pub trait Retryable {
    fn kind(&self) -> ErrorKind;

    fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

/// Classify an error message by the transient markers (case-insensitive).
pub fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_ascii_lowercase();
    if TRANSIENT_MARKERS.iter().any(|m| lower.contains(m)) {
        ErrorKind::Transient
    } else {
        ErrorKind::Permanent
    }
}

/// Classify an error by walking its source chain.
pub fn classify_error(err: &(dyn Error + 'static)) -> ErrorKind {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset
            ) {
                return ErrorKind::Transient;
            }
        }
        current = e.source();
    }
    classify_message(&error_chain(err))
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        let part = e.to_string();
        if !text.contains(&part) {
            text.push_str(": ");
            text.push_str(&part);
        }
        current = e.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_classify_message() {
        assert_eq!(
            classify_message("dial tcp 127.0.0.1:3000: connect: connection refused"),
            ErrorKind::Transient
        );
        assert_eq!(
            classify_message("read tcp: Connection reset by peer (os error 104)"),
            ErrorKind::Transient
        );
        assert_eq!(
            classify_message("graphql: Cannot query field \"foo\""),
            ErrorKind::Permanent
        );
        assert_eq!(classify_message("connection closed"), ErrorKind::Permanent);
    }

    #[test]
    fn test_classify_typed_io_source() {
        let err = Wrapper(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(classify_error(&err), ErrorKind::Transient);

        let err = Wrapper(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(classify_error(&err), ErrorKind::Permanent);
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = Wrapper(io::Error::new(io::ErrorKind::Other, "tls handshake"));
        assert_eq!(error_chain(&err), "error sending request: tls handshake");
    }
}
