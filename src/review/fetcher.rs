use crate::errors::FetchError;
use crate::review::types::IssueStatus;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::{redirect, StatusCode};

/// Source of issue statuses, keyed by status URL.
pub trait StatusSource {
    fn fetch(&self, url: &str) -> Result<IssueStatus, FetchError>;
}

/// Client settings shared by every request. Redirects are refused rather than followed, so a
/// status is never read from a host other than the configured one.
pub fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .redirect(redirect::Policy::custom(|attempt| {
            attempt.error("redirects are not followed")
        }))
}

/// Fetches statuses over HTTP. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    client: Client,
}

impl HttpStatusSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Decode the first JSON value of `body`; anything after it is ignored.
pub fn decode_status<R: std::io::Read>(body: R) -> Result<IssueStatus, FetchError> {
    let mut values = serde_json::Deserializer::from_reader(body).into_iter::<IssueStatus>();
    match values.next() {
        Some(status) => Ok(status?),
        None => Err(FetchError::EmptyBody),
    }
}

impl StatusSource for HttpStatusSource {
    fn fetch(&self, url: &str) -> Result<IssueStatus, FetchError> {
        log::debug!("Requesting {}", url);

        let response = self.client.get(url).send()?;
        log::debug!("Response: {:?}", &response);

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        decode_status(response)
    }
}

#[cfg(test)]
pub enum MockOutcome {
    Closed(bool),
    Status(u16),
    Malformed,
}

#[cfg(test)]
pub struct MockStatusSource {
    pub outcomes: std::collections::HashMap<String, MockOutcome>,
    pub requested: std::sync::Mutex<Vec<String>>,
    /// Errors handed out; each one becomes a warning in the caller.
    pub failures: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockStatusSource {
    pub fn new() -> Self {
        Self {
            outcomes: std::collections::HashMap::new(),
            requested: std::sync::Mutex::new(Vec::new()),
            failures: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn with_outcome(mut self, url: &str, outcome: MockOutcome) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    pub fn get_requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn get_failures(&self) -> usize {
        self.failures.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl StatusSource for MockStatusSource {
    fn fetch(&self, url: &str) -> Result<IssueStatus, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let outcome = match self.outcomes.get(url) {
            Some(MockOutcome::Closed(closed)) => Ok(IssueStatus { closed: *closed }),
            Some(MockOutcome::Status(code)) => Err(FetchError::Status(
                StatusCode::from_u16(*code).unwrap(),
            )),
            Some(MockOutcome::Malformed) => decode_status("{\"closed\":".as_bytes()),
            None => Err(FetchError::Status(StatusCode::NOT_FOUND)),
        };
        if outcome.is_err() {
            self.failures.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
        outcome
    }
}
