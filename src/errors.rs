use thiserror::Error;

/// Failures that mean the environment is unusable. Any of these ends the run.
#[derive(Error, Debug)]
pub enum ClosedBranchesError {
    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("Failed to execute `git {command}`: {source}")]
    GitExec {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Only {received} of {expected} branch checks reported back")]
    WorkerLost { expected: usize, received: usize },
}

pub type Result<T> = std::result::Result<T, ClosedBranchesError>;

/// Failures local to a single branch's status fetch. These are logged and the branch is skipped.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    Status(reqwest::StatusCode),

    #[error("json decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty response body")]
    EmptyBody,
}
