//! Trailhead is a hierarchical HTTP router built on Tokio and Hyper.  Routes
//! are merged into a tree, either from short descriptions like
//! `"GET /users/:id"`, or from nested [`tree::Step`]s; each request is then
//! resolved by walking that tree one path segment at a time.
//!
//! A request that matches no route is not an error: the router records
//! whether the path was unknown, or known but without a handler for the
//! method, and falls through to its fallback endpoint, which by default
//! answers `404 Not Found` or `405 Method Not Allowed`.
//!
//! # Getting Started
//! To get started, just add trailhead and tokio to your `Cargo.toml`:
//!
//! ```toml
//! trailhead = "0.1.0"
//! tokio = { version = "1.26.0", features = ["full"] } # or whatever the latest version is
//! ```
//!
//! # Examples
//! ```rust,no_run
//! async fn hello(request: trailhead::Request) -> Result<trailhead::Response, anyhow::Error> {
//!     let name = request.param_str("name").unwrap_or("world");
//!     Ok(trailhead::Response::text(format!("hello, {}!", name)))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let mut http = trailhead::http();
//!     http.route("GET /", hello)?.route("GET /hello/:name", hello)?;
//!     http.listen("0.0.0.0:8080").await?;
//!     Ok(())
//! }
//! ```
#![deny(clippy::correctness)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
extern crate async_trait;

mod endpoint;
pub mod endpoints;
mod error;
pub mod middleware;
mod request;
mod response;
mod router;
pub mod tree;

pub use self::endpoint::Endpoint;
pub use self::error::{ConfigurationError, ConflictError, RouterError};
pub use self::middleware::Middleware;
pub use self::request::Request;
pub use self::response::{IntoResponse, Response};
pub use self::router::{Action, Router};
#[doc(no_inline)]
pub use ::http;
#[doc(no_inline)]
pub use hyper::Body;

/// A result whose error defaults to [`anyhow::Error`], the error every stage
/// of request processing may fail with.
pub type Result<R = Response, E = anyhow::Error> = std::result::Result<R, E>;

#[must_use]
#[inline]
/// This creates a new HTTP router.  This is a shortcut for [`Router::default`].
pub fn http() -> Router {
    Router::default()
}
