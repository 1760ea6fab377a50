use crate::tree::Outcome;

#[derive(Debug)]
#[must_use]
/// An HTTP response.
///
/// This wraps an `http::Response<hyper::Body>`, with just enough helpers for
/// route handlers and fallbacks: empty responses with a given status (see
/// [`Response::for_outcome`] for the ones a router produces when nothing
/// matched), plain text responses, and reading the body back out.
///
/// # Examples
///
/// ```rust
/// use trailhead::{Request, Response};
///
/// async fn greet(request: Request) -> Result<Response, anyhow::Error> {
///     let target = request.param_str("target").unwrap_or("world");
///     Ok(Response::text(format!("hello, {}", target)))
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), anyhow::Error> {
/// let mut http = trailhead::http();
/// http.route("GET /hello", greet)?
///     .route("GET /hello/:target", greet)?;
/// http.prepare();
/// let response = http.handle(Request::get("/hello/trail")?).await?;
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(&response.to_bytes().await?[..], b"hello, trail");
/// # Ok(())
/// # }
/// ```
pub struct Response(http::Response<hyper::Body>);

impl Response {
    /// A response with no body, and the given status.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// let response = Response::empty_status(http::StatusCode::ACCEPTED);
    /// assert_eq!(response.status(), http::StatusCode::ACCEPTED);
    /// ```
    pub fn empty_status(status: http::StatusCode) -> Self {
        let mut inner = http::Response::new(hyper::Body::empty());
        *inner.status_mut() = status;
        Response(inner)
    }

    /// A response with no body and a `204 No Content` status.
    pub fn empty_204() -> Self {
        Response::empty_status(http::StatusCode::NO_CONTENT)
    }

    /// The response a router falls back to when nothing matched: an empty
    /// `404` or `405`, with the outcome itself in the extensions, so that
    /// middleware further out can tell a routing miss from a handler that
    /// happened to answer with the same status.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// use trailhead::tree::Outcome;
    ///
    /// let response = Response::for_outcome(Outcome::MethodNotAllowed);
    /// assert_eq!(response.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    /// assert_eq!(response.extensions().get(), Some(&Outcome::MethodNotAllowed));
    /// ```
    pub fn for_outcome(outcome: Outcome) -> Self {
        let mut response = Response::empty_status(outcome.status());
        response.extensions_mut().insert(outcome);
        response
    }

    /// A `200 OK` response with the text as its body, and a `Content-Type`
    /// of `text/plain; charset=utf-8`.
    pub fn text<V: Into<String>>(body: V) -> Self {
        let mut inner = http::Response::new(hyper::Body::from(body.into()));
        inner.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        Response(inner)
    }

    /// Reads the whole body into memory.  There is no limit on the size of
    /// the body, so this is meant for bodies the application produced
    /// itself (e.g. in tests).
    ///
    /// # Errors
    /// Fails if the body stream fails.
    pub async fn to_bytes(self) -> Result<bytes::Bytes, hyper::Error> {
        hyper::body::to_bytes(self.0.into_body()).await
    }

    /// The status code.
    pub fn status(&self) -> http::StatusCode {
        self.0.status()
    }

    /// The header map.
    pub fn headers(&self) -> &http::HeaderMap {
        self.0.headers()
    }

    /// The extensions, where routing information may be recorded.
    pub fn extensions(&self) -> &http::Extensions {
        self.0.extensions()
    }

    /// The extensions, mutably.
    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        self.0.extensions_mut()
    }
}

impl From<http::Response<hyper::Body>> for Response {
    fn from(inner: http::Response<hyper::Body>) -> Self {
        Response(inner)
    }
}

impl From<Response> for http::Response<hyper::Body> {
    fn from(this: Response) -> Self {
        this.0
    }
}

/// Conversion into the result of an endpoint.
///
/// Endpoints may return either a [`Response`], or a `Result` of one with any
/// error that converts into [`anyhow::Error`].
pub trait IntoResponse {
    /// Performs the conversion.
    ///
    /// # Errors
    /// Whatever error the value carried.
    fn into_response(self) -> Result<Response, anyhow::Error>;
}

impl IntoResponse for Response {
    fn into_response(self) -> Result<Response, anyhow::Error> {
        Ok(self)
    }
}

impl<E> IntoResponse for Result<Response, E>
where
    E: Into<anyhow::Error>,
{
    fn into_response(self) -> Result<Response, anyhow::Error> {
        self.map_err(Into::into)
    }
}
