//! Scripted transport for testing
//!
//! Replies are registered per method and path. Each call pops the next queued
//! reply for its route; the last reply is kept and repeated. Every request is
//! recorded so tests can assert on what (and whether anything) was sent.

use crate::error::{Error, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// A scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response
    Response(HttpResponse),
    /// Fail with a network error
    Network(String),
    /// Fail with a timeout
    Timeout,
    /// Sleep, then return the response
    Delayed(Duration, HttpResponse),
}

impl From<HttpResponse> for MockReply {
    fn from(response: HttpResponse) -> Self {
        Self::Response(response)
    }
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
}

/// A transport that answers from a script instead of the network.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Create an empty transport. Unscripted requests get a 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a reply for `method path`.
    pub fn on(&self, method: Method, path: &str, reply: impl Into<MockReply>) -> &Self {
        let reply = reply.into();
        let mut routes = Self::lock(&self.routes);
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
        self
    }

    /// Queue a reply for `GET path`.
    pub fn on_get(&self, path: &str, reply: impl Into<MockReply>) -> &Self {
        self.on(Method::GET, path, reply)
    }

    /// Queue a reply for `POST path`.
    pub fn on_post(&self, path: &str, reply: impl Into<MockReply>) -> &Self {
        self.on(Method::POST, path, reply)
    }

    /// All requests received so far
    #[must_use]
    pub fn calls(&self) -> Vec<HttpRequest> {
        Self::lock(&self.calls).clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        Self::lock(&self.calls).len()
    }

    /// Number of requests received for `method path`
    #[must_use]
    pub fn calls_to(&self, method: &Method, path: &str) -> usize {
        Self::lock(&self.calls)
            .iter()
            .filter(|r| &r.method == method && r.path() == path)
            .count()
    }

    fn next_reply(&self, request: &HttpRequest) -> MockReply {
        let mut routes = Self::lock(&self.routes);
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path());

        match route {
            Some(route) if route.replies.len() > 1 => route
                .replies
                .pop_front()
                .unwrap_or_else(|| MockReply::Response(HttpResponse::new(404))),
            Some(route) => route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| MockReply::Response(HttpResponse::new(404))),
            None => MockReply::Response(HttpResponse::new(404)),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let reply = self.next_reply(&request);
        let timeout_ms = request.timeout.as_millis() as u64;
        Self::lock(&self.calls).push(request);

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Network(message) => Err(Error::Network(message)),
            MockReply::Timeout => Err(Error::Timeout(timeout_ms)),
            MockReply::Delayed(delay, response) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
        }
    }
}
