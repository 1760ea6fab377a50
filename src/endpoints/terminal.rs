use std::pin::Pin;

use crate::middleware::Next;
use crate::{Endpoint, Middleware, Request, Response};

/// A route handler that runs an endpoint and never continues to the next
/// stage.
pub struct Terminal<E>(Pin<Box<E>>);

impl<E: Endpoint> Terminal<E> {
    pub(crate) fn new(endpoint: E) -> Self {
        Terminal(Box::pin(endpoint))
    }
}

#[async_trait]
impl<E: Endpoint> Middleware for Terminal<E> {
    async fn apply(
        self: Pin<&Self>,
        request: Request,
        _next: Next<'_>,
    ) -> Result<Response, anyhow::Error> {
        self.get_ref().0.as_ref().apply(request).await
    }
}

impl<E> std::fmt::Debug for Terminal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Terminal")
            .field(&std::any::type_name::<E>())
            .finish()
    }
}
