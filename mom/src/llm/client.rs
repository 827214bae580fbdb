//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// The client never remembers earlier calls. Conversation history is owned
/// by the session and replayed into every request, so a client can be
/// swapped or mocked without losing the interview.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock LLM client for unit tests
    ///
    /// Hands out scripted responses in order and keeps every request it saw.
    pub struct MockLlmClient {
        responses: Vec<CompletionResponse>,
        failures: HashSet<usize>,
        call_count: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<CompletionResponse>) -> Self {
            debug!(response_count = %responses.len(), "MockLlmClient::new: called");
            Self {
                responses,
                failures: HashSet::new(),
                call_count: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn from_texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| CompletionResponse::text(*t)).collect())
        }

        /// Make the call with this zero-based index fail with a 503
        ///
        /// The failed call still consumes its slot in the scripted responses.
        pub fn fail_on(mut self, call_index: usize) -> Self {
            self.failures.insert(call_index);
            self
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().expect("mock request log poisoned").clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockLlmClient::complete: called");
            self.requests.lock().expect("mock request log poisoned").push(request);

            if self.failures.contains(&idx) {
                return Err(LlmError::ApiError {
                    status: 503,
                    message: "mock failure".to_string(),
                });
            }

            self.responses
                .get(idx)
                .cloned()
                .ok_or_else(|| LlmError::InvalidResponse("No more mock responses".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_responses() {
            let client = MockLlmClient::from_texts(&["Response 1", "Response 2"]);
            let req = CompletionRequest::one_shot("Test", "hello", 0.7, 1000);

            let resp1 = client.complete(req.clone()).await.unwrap();
            assert_eq!(resp1.content, Some("Response 1".to_string()));

            let resp2 = client.complete(req.clone()).await.unwrap();
            assert_eq!(resp2.content, Some("Response 2".to_string()));

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            let req = CompletionRequest::one_shot("Test", "hello", 0.7, 1000);

            assert!(client.complete(req).await.is_err());
        }

        #[tokio::test]
        async fn test_mock_client_scripted_failure() {
            let client = MockLlmClient::from_texts(&["a", "b"]).fail_on(0);
            let req = CompletionRequest::one_shot("Test", "hello", 0.7, 1000);

            let err = client.complete(req.clone()).await.unwrap_err();
            assert!(matches!(err, LlmError::ApiError { status: 503, .. }));

            let resp = client.complete(req).await.unwrap();
            assert_eq!(resp.content.as_deref(), Some("b"));
        }
    }
}
