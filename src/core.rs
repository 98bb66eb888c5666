use std::fmt::{self, Display, Formatter};

pub type EmptyResult = GenericResult<()>;
pub type GenericResult<T> = Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Api,
    Git,
    Filesystem,
    Console,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new<M: Into<String>>(kind: ErrorKind, message: M) -> Error {
        Error {kind, message: message.into()}
    }

    pub fn context(self, prefix: &str) -> Error {
        Error {
            kind: self.kind,
            message: format!("{prefix}: {}", self.message),
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        self.message.fmt(formatter)
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! Err {
    ($kind:ident, $($arg:tt)*) => (::std::result::Result::Err(
        $crate::core::Error::new($crate::core::ErrorKind::$kind, format!($($arg)*))))
}
