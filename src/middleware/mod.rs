//! Request processing stages.
//!
//! Everything between the raw request and the final [`Endpoint`] is a
//! [`Middleware`]: the router's own middleware stack, the router itself when
//! it is used as a stage, and every route handler.  Each stage receives a
//! [`Next`], the capability to continue to whatever comes after it.
//!
//! ```rust
//! # use trailhead::*;
//! # fn main() -> Result<(), RouterError> {
//! let mut http = trailhead::http();
//! http.with(trailhead::middleware::TraceMiddleware::new());
//! http.route("GET /home", trailhead::endpoints::simple(|| {
//!     Response::text("hello, there!")
//! }))?;
//! # Ok(())
//! # }
//! ```

mod trace;

pub use self::trace::TraceMiddleware;
use crate::{Endpoint, Request, Response};
use std::fmt::Debug;
use std::pin::Pin;

#[derive(Copy, Clone, Debug)]
/// The next item(s) in the stack.
///
/// This borrows from the stack itself, and so the lifetime here exceeds the
/// lifetime of the request (but is not `'static`).  This contains a reference
/// to the eventual endpoint, any (remaining) middleware that must happen
/// next, and, between the two, the stage that dispatches to route handlers.
pub struct Next<'a> {
    middleware: &'a [Pin<Box<dyn Middleware>>],
    dispatch: Option<Pin<&'a dyn Middleware>>,
    endpoint: Pin<&'a dyn Endpoint>,
}

#[async_trait]
/// An HTTP request/response modifier.
///
/// This sits between the raw request and response and the endpoint, allowing
/// custom functions to mutate either before being passed on.  A typical
/// middleware will take the incoming [`Request`], potentially modify it, before
/// calling [`Next::apply`] with the modified request; then, take the resulting
/// [`Response`], potentially modifying it, before returning.  However, since
/// every layer of the stack is fallible, it must be able to handle errors.
///
/// Route handlers are middleware as well: a handler that does not want to
/// answer a request it was routed to may call [`Next::apply`] to fall
/// through to the endpoint after the router.
pub trait Middleware: Debug + Send + Sync + 'static {
    #[must_use]
    /// Handles the given request, returning a response.  The next parameter
    /// contains the information on how to process everything after the current
    /// middleware, i.e. generating a response from the endpoint.
    async fn apply(
        self: Pin<&Self>,
        request: Request,
        next: Next<'_>,
    ) -> Result<Response, anyhow::Error>;
}

/// A boxed handler, such as a route [`crate::Action`], is a middleware in its
/// own right; so it can be given to [`crate::Router::add_route`] or
/// [`crate::Router::with`] as is.
#[async_trait]
impl Middleware for Pin<Box<dyn Middleware>> {
    async fn apply(
        self: Pin<&Self>,
        request: Request,
        next: Next<'_>,
    ) -> Result<Response, anyhow::Error> {
        self.get_ref().as_ref().apply(request, next).await
    }
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        middleware: &'a [Pin<Box<dyn Middleware>>],
        dispatch: Option<Pin<&'a dyn Middleware>>,
        endpoint: Pin<&'a dyn Endpoint>,
    ) -> Self {
        Next {
            middleware,
            dispatch,
            endpoint,
        }
    }

    /// A continuation that goes straight to the given endpoint.
    pub(crate) fn endpoint(endpoint: Pin<&'a dyn Endpoint>) -> Self {
        Next::new(&[], None, endpoint)
    }

    /// This causes all of the remaining middleware and endpoint to be run,
    /// from this point; i.e., if there is any remaining middleware, execute
    /// that (passing in a modified version of this struct); then the
    /// dispatching stage, if any; otherwise, execute the endpoint.
    ///
    /// It is valid behavior to not call this function; not calling this
    /// function means interrupting the stack, and none of the remaining
    /// middleware nor endpoints will be run.  This could be useful for e.g.
    /// requiring authentication.
    pub async fn apply(self, request: Request) -> Result<Response, anyhow::Error> {
        if let Some((current, next)) = self.middleware.split_first() {
            let new = Next {
                middleware: next,
                ..self
            };
            current.as_ref().apply(request, new).await
        } else if let Some(dispatch) = self.dispatch {
            dispatch.apply(request, Next::endpoint(self.endpoint)).await
        } else {
            self.endpoint.apply(request).await
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Count(Arc<AtomicUsize>);

    #[async_trait]
    impl Middleware for Count {
        async fn apply(
            self: Pin<&Self>,
            request: Request,
            next: Next<'_>,
        ) -> Result<Response, anyhow::Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            next.apply(request).await
        }
    }

    #[tokio::test]
    async fn test_order() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut stack: Vec<Pin<Box<dyn Middleware>>> = vec![];
        stack.push(Box::pin(Count(count.clone())));
        stack.push(Box::pin(Count(count.clone())));
        let dispatch = Count(count.clone());
        let dispatch = Pin::new(&dispatch);
        let dispatch: Pin<&dyn Middleware> = dispatch;
        let endpoint = crate::endpoints::simple(Response::empty_204);
        let endpoint = Pin::new(&endpoint);
        let endpoint: Pin<&dyn Endpoint> = endpoint;
        let next = Next::new(&stack[..], Some(dispatch), endpoint);
        let response = next.apply(Request::get("/").unwrap()).await.unwrap();
        assert_eq!(response.status(), http::StatusCode::NO_CONTENT);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_boxed_handler() {
        let count = Arc::new(AtomicUsize::new(0));
        let boxed: Pin<Box<dyn Middleware>> = Box::pin(Count(count.clone()));
        let endpoint = crate::endpoints::simple(Response::empty_204);
        let endpoint = Pin::new(&endpoint);
        let endpoint: Pin<&dyn Endpoint> = endpoint;
        let response = Pin::new(&boxed)
            .apply(Request::get("/").unwrap(), Next::endpoint(endpoint))
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::NO_CONTENT);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
