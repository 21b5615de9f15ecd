use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("you have already voted on poll {0}")]
    AlreadyVoted(String),

    #[error("no poll with id {0}")]
    PollNotFound(String),

    #[error("\"{option}\" is not an option on poll {poll_id}")]
    UnknownOption { poll_id: String, option: String },

    #[error("{0}")]
    InvalidPoll(String),

    // Absent data defaults to empty; corrupt data does not.
    #[error("stored data under \"{key}\" is not valid JSON: {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
