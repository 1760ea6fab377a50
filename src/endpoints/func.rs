use std::pin::Pin;

use crate::response::IntoResponse;
use crate::{Endpoint, Request, Response};

/// An endpoint that runs a plain (non-async) function on the request.
pub(crate) struct FnEndpoint<F>(F);

impl<F> FnEndpoint<F> {
    pub(crate) fn new(func: F) -> Self {
        FnEndpoint(func)
    }
}

#[async_trait]
impl<F, Res> Endpoint for FnEndpoint<F>
where
    F: Fn(Request) -> Res + Send + Sync + 'static,
    Res: IntoResponse + Send + 'static,
{
    async fn apply(self: Pin<&Self>, request: Request) -> Result<Response, anyhow::Error> {
        (self.get_ref().0)(request).into_response()
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}
