// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    Misuse(MisuseError),
}

/// A collaborator was consumed outside the session that provides it.
///
/// These are programming errors at the call site: the caller asked for a
/// notification channel or cart that was never installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MisuseError {
    /// No `NotificationChannel` was provided to the session.
    NoNotificationChannel,

    /// No `CartTotal` was provided to the session.
    NoCart,
}

impl fmt::Display for MisuseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MisuseError::NoNotificationChannel => {
                write!(f, "notification channel used outside of a session that provides it")
            }
            MisuseError::NoCart => write!(f, "cart used outside of a session that provides it"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Misuse(e) => write!(f, "Misuse Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MisuseError> for Error {
    fn from(err: MisuseError) -> Self {
        Error::Misuse(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
