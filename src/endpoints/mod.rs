//! Pre-defined endpoints, and the adapters that turn endpoints and
//! middleware into route actions.
//!
//! ```rust
//! # use trailhead::*;
//! # fn main() -> Result<(), RouterError> {
//! let mut http = trailhead::http();
//! http.route("GET /home", trailhead::endpoints::simple(|| {
//!     Response::text("hello, there!")
//! }))?;
//! # Ok(())
//! # }
//! ```

mod func;
mod terminal;

pub(crate) use self::func::FnEndpoint;
pub use self::terminal::Terminal;
use crate::response::IntoResponse;
use crate::router::Action;
use crate::{Endpoint, Middleware, Request};

/// Creates an endpoint that synchronously generates a response.
///
/// This does not spawn a blocking task; so any endpoint that uses this should
/// not block the task in its processing.  This is useful for endpoints that
/// quickly generate a response, or otherwise do not use futures.
///
/// # Examples
///
/// ```rust
/// # use trailhead::*;
/// # fn main() -> Result<(), RouterError> {
/// let mut http = trailhead::http();
/// http.route("GET /users/:id", trailhead::endpoints::sync(|request: Request| {
///     let id = request.param_str("id").unwrap_or_default().to_owned();
///     Response::text(id)
/// }))?;
/// # Ok(())
/// # }
/// ```
pub fn sync<F, Res>(func: F) -> impl Endpoint
where
    F: Fn(Request) -> Res + Send + Sync + 'static,
    Res: IntoResponse + Send + 'static,
{
    FnEndpoint::new(func)
}

/// Creates an endpoint that synchronously, infallibly generates a response.
///
/// This is meant for a very basic operation that returns a specific response
/// regardless of the request.  This is best paired with a
/// [`crate::Response::empty_204`]-like function.
///
/// # Examples
///
/// ```rust
/// # use trailhead::*;
/// # fn main() -> Result<(), RouterError> {
/// let mut http = trailhead::http();
/// http.route("DELETE /", trailhead::endpoints::simple(Response::empty_204))?;
/// # Ok(())
/// # }
/// ```
pub fn simple<F, Res>(func: F) -> impl Endpoint
where
    F: Fn() -> Res + Send + Sync + 'static,
    Res: IntoResponse + Send + 'static,
{
    sync::<_, Res>(move |_| func())
}

/// Wraps an endpoint into a route handler that never continues to the next
/// stage.  This is what [`crate::Router::route`] uses.
pub fn terminal<E: Endpoint>(endpoint: E) -> Terminal<E> {
    Terminal::new(endpoint)
}

/// Creates a route action from an endpoint, for use in a
/// [`crate::tree::Step`].
///
/// # Examples
/// ```rust
/// # use trailhead::*;
/// use trailhead::tree::Step;
///
/// # fn main() -> Result<(), RouterError> {
/// let step = Step::segment("users").append(Step::action(
///     "GET",
///     trailhead::endpoints::action(trailhead::endpoints::simple(Response::empty_204)),
/// )?);
/// let mut http = trailhead::http();
/// http.add_step(step)?;
/// # Ok(())
/// # }
/// ```
pub fn action<E: Endpoint>(endpoint: E) -> Action {
    Box::pin(terminal(endpoint))
}

/// Creates a route action from a handler that may continue to the next
/// stage, for use in a [`crate::tree::Step`].
pub fn handler<M: Middleware>(middleware: M) -> Action {
    Box::pin(middleware)
}
