use crate::response::IntoResponse;
use crate::{Request, Response};
use std::future::Future;
use std::pin::Pin;

#[async_trait]
/// The last stage a request can reach.
///
/// An endpoint never continues anywhere: it turns the request into a
/// response, or fails.  A router's fallback is an endpoint (it receives the
/// requests no route matched, with the [`crate::tree::Outcome`] recorded in
/// them), and so is the simplest kind of route handler, through
/// [`crate::Router::route`].
///
/// Any `Fn(Request) -> impl Future<Output = impl IntoResponse>` is an
/// endpoint, which covers plain `async fn`s.
///
/// # Examples
/// ```rust
/// # use trailhead::*;
/// async fn show(request: Request) -> Response {
///     Response::text(request.param_str("id").unwrap_or_default().to_owned())
/// }
///
/// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
/// let mut http = trailhead::http();
/// http.route("GET /users/:id", show)?;
/// http.prepare();
/// let response = http.handle(Request::get("/users/7")?).await?;
/// assert_eq!(&response.to_bytes().await?[..], b"7");
/// # Ok(())
/// # }
/// ```
pub trait Endpoint: Send + Sync + 'static {
    #[must_use]
    /// Produces the response for the request.
    async fn apply(self: Pin<&Self>, request: Request) -> Result<Response, anyhow::Error>;

    #[doc(hidden)]
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl std::fmt::Debug for dyn Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
impl<F, Fut, Res> Endpoint for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
    Res: IntoResponse + Send + 'static,
{
    async fn apply(self: Pin<&Self>, request: Request) -> Result<Response, anyhow::Error> {
        (self.get_ref())(request).await.into_response()
    }
}
