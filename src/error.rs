use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid colour {0:?}: expected six hex digits")]
    InvalidColor(String),

    #[error("no layouts configured")]
    NoLayouts,

    #[error("chord {0} is bound more than once")]
    DuplicateChord(String),

    #[error("group {0:?} is declared more than once")]
    DuplicateGroup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for penrose::Error {
    fn from(e: Error) -> Self {
        penrose::custom_error!("{}", e)
    }
}
