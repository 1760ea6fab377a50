use std::fmt::Display;
use std::pin::Pin;
use std::time::Instant;

use super::{Middleware, Next};
use crate::tree::Outcome;
use crate::{Request, Response};

#[derive(Debug, Clone)]
/// A middleware for tracing HTTP requests.
///
/// This logs (using `log`) each request, as well as how long each request
/// took, at `info` by default.  When a router answered through its default
/// fallback, the routing [`Outcome`] is included after the status.
///
/// # Examples
/// ```rust
/// # use trailhead::*;
/// let mut http = trailhead::http();
/// http.with(trailhead::middleware::TraceMiddleware::new().with_level(log::Level::Debug));
/// ```
pub struct TraceMiddleware {
    level: log::Level,
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        TraceMiddleware {
            level: log::Level::Info,
        }
    }
}

impl TraceMiddleware {
    #[must_use]
    /// Creates a new trace middleware.  This is provided as an alternative
    /// to `Default`.
    pub fn new() -> Self {
        TraceMiddleware::default()
    }

    #[must_use]
    /// Sets the level both log lines are emitted at.
    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }
}

#[async_trait]
impl Middleware for TraceMiddleware {
    async fn apply(
        self: Pin<&Self>,
        request: Request,
        next: Next<'_>,
    ) -> Result<Response, anyhow::Error> {
        let level = self.level;
        if !log::log_enabled!(level) {
            return next.apply(request).await;
        }

        let method = request.method().clone();
        let path = request.uri().path().to_string();
        log::log!(level, "--> {} {}", method, path);
        let start = Instant::now();

        let result = next.apply(request).await;
        log::log!(
            level,
            "<-- {} {}: {} (in {}ms)",
            method,
            path,
            StatusDisplay(&result),
            start.elapsed().as_millis()
        );

        result
    }
}

struct StatusDisplay<'a>(&'a Result<Response, anyhow::Error>);

impl Display for StatusDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Ok(response) => match response.extensions().get::<Outcome>() {
                Some(outcome) => write!(f, "{} ({:?})", response.status(), outcome),
                None => write!(f, "{}", response.status()),
            },
            Err(_) => write!(f, "(error)"),
        }
    }
}
