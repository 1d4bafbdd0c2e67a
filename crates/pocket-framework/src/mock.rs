//! # Mock Transport & Testing Helpers
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Queue the
//! responses you expect, run the code under test, then check what was sent:
//!
//! ```rust
//! use pocket_framework::mock::MockTransport;
//! use pocket_framework::Method;
//!
//! let mock = MockTransport::new();
//! mock.expect(Method::Delete).return_json(&true);
//! mock.expect(Method::Get).return_status(404, "");
//! assert_eq!(mock.pending(), 2);
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation (or arrives when none is left) fails with
//! [`ApiError::Transport`] and is reported by [`MockTransport::verify`].
//!
//! [`CallbackProbe`] captures the outcome of a repository call so a test can
//! `await` it and check that exactly one callback fired.
//!
//! [`MockDto`] is a minimal [`Dto`] for tests that do not care about the
//! entity itself.

use crate::dto::Dto;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

struct Expectation {
    method: Method,
    response: ApiResult<HttpResponse>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<HttpRequest>,
    mismatches: Vec<String>,
}

/// In-memory [`Transport`] with queued expectations.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Expects the next request to use `method`.
    pub fn expect(&self, method: Method) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            state: Arc::clone(&self.state),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of expectations not yet consumed.
    pub fn pending(&self) -> usize {
        self.lock().expectations.len()
    }

    /// Panics unless every expectation was met and no unexpected request arrived.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut state = self.lock();
        let described = format!("{} {}", request.method, request.url);
        let method = request.method;
        state.requests.push(request);

        match state.expectations.pop_front() {
            Some(expectation) if expectation.method == method => expectation.response,
            Some(expectation) => {
                state
                    .mismatches
                    .push(format!("expected {}, got {}", expectation.method, described));
                Err(ApiError::Transport(format!("unexpected request {}", described)))
            }
            None => {
                state.mismatches.push(format!("no expectation for {}", described));
                Err(ApiError::Transport(format!("unexpected request {}", described)))
            }
        }
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    fn push(self, response: ApiResult<HttpResponse>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            response,
        });
    }

    /// Answers with `200` and `value` as the JSON body.
    pub fn return_json<T: Serialize + ?Sized>(self, value: &T) {
        let body = serde_json::to_vec(value).unwrap_or_else(|e| panic!("mock body: {}", e));
        self.push(Ok(HttpResponse::new(200, body)));
    }

    /// Answers with an arbitrary status and raw body.
    pub fn return_status(self, status: u16, body: &str) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    /// Fails the request at the transport level.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }
}

/// Captures the callbacks of one repository call.
pub struct CallbackProbe<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<ApiResult<T>>>>>,
    receiver: oneshot::Receiver<ApiResult<T>>,
    successes: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl<T: Send + 'static> Default for CallbackProbe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> CallbackProbe<T> {
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            slot: Arc::new(Mutex::new(Some(sender))),
            receiver,
            successes: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn deliver(slot: &Mutex<Option<oneshot::Sender<ApiResult<T>>>>, outcome: ApiResult<T>) {
        let sender = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(sender) = sender {
            let _ = sender.send(outcome);
        }
    }

    pub fn on_success(&self) -> impl FnOnce(T) + Send + 'static {
        let slot = Arc::clone(&self.slot);
        let successes = Arc::clone(&self.successes);
        move |value| {
            successes.fetch_add(1, Ordering::SeqCst);
            Self::deliver(&slot, Ok(value));
        }
    }

    pub fn on_failure(&self) -> impl FnOnce(ApiError) + Send + 'static {
        let slot = Arc::clone(&self.slot);
        let failures = Arc::clone(&self.failures);
        move |error| {
            failures.fetch_add(1, Ordering::SeqCst);
            Self::deliver(&slot, Err(error));
        }
    }

    /// Waits for the first callback. Panics if none fires within five seconds.
    pub async fn outcome(&mut self) -> ApiResult<T> {
        match tokio::time::timeout(Duration::from_secs(5), &mut self.receiver).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => panic!("callback channel closed"),
            Err(_) => panic!("no callback fired"),
        }
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

/// A never-modified entity with only an id and a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockDto {
    pub id: String,
    pub name: String,
}

impl MockDto {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Dto for MockDto {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_date_time(&self) -> i64 {
        0
    }

    fn created_by_user_id(&self) -> &str {
        "mock"
    }

    fn last_modified_date_time(&self) -> Option<i64> {
        None
    }

    fn last_modified_by_user_id(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(method: Method) -> HttpRequest {
        HttpRequest::new(method, Url::parse("http://localhost/api/User").unwrap())
    }

    #[tokio::test]
    async fn test_expectations_are_consumed_in_order() {
        let mock = MockTransport::new();
        mock.expect(Method::Get).return_status(200, "true");
        mock.expect(Method::Delete).return_err(ApiError::Transport("reset".into()));

        let first = mock.send(request(Method::Get)).await.unwrap();
        assert_eq!(first.text(), "true");
        let second = mock.send(request(Method::Delete)).await;
        assert_eq!(second, Err(ApiError::Transport("reset".into())));

        assert_eq!(mock.request_count(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_method_mismatch_is_reported_by_verify() {
        let mock = MockTransport::new();
        mock.expect(Method::Get).return_json(&true);

        let result = mock.send(request(Method::Put)).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_probe_records_single_callback() {
        let mut probe = CallbackProbe::<u32>::new();
        let on_success = probe.on_success();
        let _on_failure = probe.on_failure();

        tokio::spawn(async move { on_success(3) });

        assert_eq!(probe.outcome().await, Ok(3));
        assert_eq!(probe.successes(), 1);
        assert_eq!(probe.failures(), 0);
    }
}
