use super::Router;
use crate::{Endpoint, RouterError};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;

impl Router {
    /// Creates a listen server on the specified address.
    ///
    /// The router is prepared (freezing its routes) before it starts
    /// accepting connections, and is shared between all of them.
    ///
    /// # Errors
    /// This can fail if the socket address is invalid, or if the socket is
    /// already in use.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use trailhead::*;
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let mut http = trailhead::http();
    /// http.route("GET /", |_| async { Response::text("hello, world!") })?;
    /// http.listen("0.0.0.0:8080").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn listen(mut self, address: &str) -> Result<(), RouterError> {
        let address: SocketAddr = address
            .parse()
            .map_err(|_| RouterError::InvalidAddress(address.to_owned()))?;
        self.prepare();

        log::info!("listen({})", address);

        let termination = shutdown(self.terminate.take());
        let this = Arc::pin(self);

        hyper::server::Server::bind(&address)
            .serve(hyper::service::make_service_fn(
                |v: &hyper::server::conn::AddrStream| {
                    let service = RouterService(this.clone(), v.remote_addr());
                    async move { Ok::<_, std::convert::Infallible>(service) }
                },
            ))
            .with_graceful_shutdown(termination)
            .await
            .map_err(RouterError::HyperServer)?;

        log::info!("shutdown({})", address);
        Ok(())
    }
}

// Resolves once `true` is sent; never resolves without a receiver, or once
// the sender is dropped.
async fn shutdown(receiver: Option<watch::Receiver<bool>>) {
    let mut receiver = match receiver {
        Some(receiver) => receiver,
        None => return futures::future::pending().await,
    };

    while !*receiver.borrow() {
        if receiver.changed().await.is_err() {
            return futures::future::pending().await;
        }
    }
}

#[derive(Clone)]
struct RouterService(Pin<Arc<Router>>, SocketAddr);

type RouterFuture<R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'static>>;

impl tower::Service<hyper::Request<hyper::Body>> for RouterService {
    type Response = hyper::Response<hyper::Body>;
    type Error = anyhow::Error;
    type Future = RouterFuture<Self::Response, Self::Error>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: hyper::Request<hyper::Body>) -> Self::Future {
        let this = (self.0).clone();
        log::trace!("{} {} from {}", request.method(), request.uri(), self.1);
        Box::pin(async move {
            Endpoint::apply(this.as_ref(), request.into())
                .await
                .map(Into::into)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_on_signal() {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(shutdown(Some(rx)));
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_without_signal() {
        let pending = tokio::time::timeout(Duration::from_millis(10), shutdown(None)).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let error = Router::default().listen("not an address").await.unwrap_err();
        assert!(matches!(error, RouterError::InvalidAddress(_)));
    }
}
