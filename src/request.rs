use crate::tree::{Outcome, Params};
use std::convert::TryFrom;
use std::str::FromStr;

#[derive(Debug)]
/// An HTTP request, as seen by the router and everything after it.
///
/// This wraps an `http::Request<hyper::Body>`.  Besides the usual head, it
/// carries what the router decided about it, in its extensions: the
/// [`Params`] captured along the path when a route matched (see
/// [`Request::param`]), or the [`Outcome`] when none did (see
/// [`Request::outcome`]).  A request only ever carries one of the two.
///
/// # Examples
/// ```rust
/// # use trailhead::*;
/// async fn buy(request: Request) -> Response {
///     let amount: u32 = request.param("amount").unwrap_or(1);
///     Response::text(format!("you bought {} coconuts", amount))
/// }
///
/// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
/// let mut http = trailhead::http();
/// http.route("GET /buy/:amount", buy)?;
/// http.prepare();
/// let response = http.handle(Request::get("/buy/3")?).await?;
/// assert_eq!(&response.to_bytes().await?[..], b"you bought 3 coconuts");
/// # Ok(())
/// # }
/// ```
pub struct Request(http::Request<hyper::Body>);

impl Request {
    /// A `GET` request for the URI, with an empty body.
    ///
    /// # Errors
    /// Fails if the URI is invalid.
    pub fn get<U>(uri: U) -> Result<Self, http::Error>
    where
        http::Uri: TryFrom<U>,
        <http::Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        Request::from_method(uri, http::Method::GET)
    }

    /// A `POST` request for the URI, with an empty body.
    ///
    /// # Errors
    /// Fails if the URI is invalid.
    pub fn post<U>(uri: U) -> Result<Self, http::Error>
    where
        http::Uri: TryFrom<U>,
        <http::Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        Request::from_method(uri, http::Method::POST)
    }

    /// A request with the method, for the URI, with an empty body.  The
    /// method does not have to be one the router knows about; such a
    /// request simply never matches a route.
    ///
    /// # Errors
    /// Fails if the URI is invalid.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// let request = Request::from_method("/a", http::Method::OPTIONS).unwrap();
    /// assert_eq!(request.method(), http::Method::OPTIONS);
    /// ```
    pub fn from_method<U>(uri: U, method: http::Method) -> Result<Self, http::Error>
    where
        http::Uri: TryFrom<U>,
        <http::Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(hyper::Body::empty())
            .map(Request)
    }

    /// The captured path parameter, parsed.  This is `None` if nothing was
    /// captured under that name, or if it does not parse.
    pub fn param<T: FromStr>(&self, name: &str) -> Option<T> {
        self.params()?.parse(name)
    }

    /// The captured path parameter, as it was in the (percent-decoded) path.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// async fn greet(request: Request) -> Response {
    ///     let target = request.param_str("target").unwrap_or("world");
    ///     Response::text(format!("hello, {}", target))
    /// }
    ///
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let mut http = trailhead::http();
    /// http.route("GET /hello", greet)?.route("GET /hello/:target", greet)?;
    /// http.prepare();
    /// let response = http.handle(Request::get("/hello/big%20world")?).await?;
    /// assert_eq!(&response.to_bytes().await?[..], b"hello, big world");
    /// let response = http.handle(Request::get("/hello")?).await?;
    /// assert_eq!(&response.to_bytes().await?[..], b"hello, world");
    /// # Ok(())
    /// # }
    /// ```
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.params()?.get(name)
    }

    /// Every parameter captured by the router.  This is `None` if the request
    /// was not routed to a handler.
    pub fn params(&self) -> Option<&Params> {
        self.0.extensions().get()
    }

    /// Why the router found no handler for this request, if it found none.
    /// Any stage after the router can use this to choose between a `404`
    /// and a `405`.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// use trailhead::tree::Outcome;
    ///
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let mut http = trailhead::http();
    /// http.route("GET /a", trailhead::endpoints::simple(Response::empty_204))?;
    /// http.fallback(trailhead::endpoints::sync(|request: Request| {
    ///     match request.outcome() {
    ///         Some(Outcome::MethodNotAllowed) => Response::text("try GET"),
    ///         _ => Response::text("no such thing"),
    ///     }
    /// }));
    /// http.prepare();
    /// let response = http.handle(Request::post("/a")?).await?;
    /// assert_eq!(&response.to_bytes().await?[..], b"try GET");
    /// # Ok(())
    /// # }
    /// ```
    pub fn outcome(&self) -> Option<Outcome> {
        self.0.extensions().get().copied()
    }

    /// The request URI.
    pub fn uri(&self) -> &http::Uri {
        self.0.uri()
    }

    /// The request method.
    pub fn method(&self) -> &http::Method {
        self.0.method()
    }

    /// The header map.
    pub fn headers(&self) -> &http::HeaderMap {
        self.0.headers()
    }

    /// The extensions.
    pub fn extensions(&self) -> &http::Extensions {
        self.0.extensions()
    }

    /// The extensions, mutably.  The router records its decision here.
    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        self.0.extensions_mut()
    }
}

impl From<http::Request<hyper::Body>> for Request {
    fn from(inner: http::Request<hyper::Body>) -> Self {
        Request(inner)
    }
}

impl From<Request> for http::Request<hyper::Body> {
    fn from(this: Request) -> Self {
        this.0
    }
}
