mod service;

use crate::endpoint::Endpoint;
use crate::endpoints::FnEndpoint;
use crate::middleware::{Middleware, Next};
use crate::tree::{Outcome, Params, Resolution, Step, Tree, TreeBuilder};
use crate::{Request, Response, RouterError};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::pin::Pin;
use tokio::sync::watch;

/// The value a route resolves to: a handler that receives the request and
/// the capability to continue to the next stage.
pub type Action = Pin<Box<dyn Middleware>>;

#[derive(Debug)]
enum Table {
    Building(TreeBuilder<Action>),
    Prepared(Tree<Action>),
}

impl Default for Table {
    fn default() -> Self {
        Table::Building(TreeBuilder::new())
    }
}

/// An HTTP router.
///
/// This contains the routing tree, mapping a method and a path to the
/// handler registered for them, along with the middleware that runs before
/// dispatch and the fallback endpoint that runs when nothing matched.
/// Routes are added with [`Router::route`], [`Router::add_route`] or
/// [`Router::add_step`]; once all of them are in, [`Router::prepare`] freezes
/// the tree, after which it can be shared between any number of concurrent
/// requests.
///
/// ```text
/// GET  /users          -> index
/// GET  /users/:id      -> show
/// GET  /users/me       -> me
/// POST /users/:id      -> update
/// ```
///
/// A literal segment always takes precedence over a parameter at the same
/// position, regardless of the order the routes were added in; so `/users/me`
/// always goes to `me`, and never to `show`.  Resolution never backtracks,
/// though: a request for `/users/me/posts` does not fall back to
/// `/users/:id/posts` if the literal branch has no `posts`.
///
/// When no route matches, the router records the [`Outcome`] in the
/// request, and falls through to the next stage.  The default fallback
/// replies with an empty `404 Not Found` or `405 Method Not Allowed`,
/// depending on that outcome.
///
/// # Internals
///
/// Routes are merged into a trie of nodes, each holding literal children,
/// at most one parameter child, and children per method.  Resolution walks
/// the trie one segment at a time, which makes it `O(n)` with `n` being the
/// number of segments in the path.
pub struct Router {
    table: Table,
    middleware: Vec<Pin<Box<dyn Middleware>>>,
    fallback: Option<Pin<Box<dyn Endpoint>>>,
    terminate: Option<watch::Receiver<bool>>,
}

impl Default for Router {
    fn default() -> Self {
        Router {
            table: Table::default(),
            middleware: vec![],
            fallback: None,
            terminate: None,
        }
    }
}

impl Router {
    /// Prepares the router, freezing the routing tree.
    ///
    /// This is automatically called when listening using [`Router::listen`].
    /// However, you may want to use the router before that point for e.g.
    /// testing, and so this must be called before any requests are routed.
    /// If this is not called, every request is treated as not found.  Once
    /// prepared, no more routes can be added.
    pub fn prepare(&mut self) {
        if let Table::Building(builder) = &mut self.table {
            let builder = std::mem::take(builder);
            self.table = Table::Prepared(builder.finish());
        }
    }

    /// Whether [`Router::prepare`] was called.
    pub fn is_prepared(&self) -> bool {
        matches!(self.table, Table::Prepared(_))
    }

    /// Adds a route, given its description, that runs the endpoint.
    ///
    /// The description is a method, a space, and a path, e.g.
    /// `"GET /users/:id"`; see [`Router::add_route`].
    ///
    /// # Errors
    /// See [`Router::add_route`].
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let mut http = trailhead::http();
    /// http.route("GET /foo", trailhead::endpoints::simple(Response::empty_204))?;
    /// http.prepare();
    /// let response = http.handle(Request::get("/foo")?).await?;
    /// assert_eq!(response.status(), http::StatusCode::NO_CONTENT);
    /// let response = http.handle(Request::post("/foo")?).await?;
    /// assert_eq!(response.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    /// let response = http.handle(Request::get("/bar")?).await?;
    /// assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    /// # Ok(())
    /// # }
    /// ```
    pub fn route<E: Endpoint>(&mut self, description: &str, endpoint: E) -> Result<&mut Self, RouterError> {
        self.add_route(description, crate::endpoints::terminal(endpoint))
    }

    /// Adds a route, given its description, that runs the handler.  The
    /// handler receives the request, and the capability to fall through to
    /// the next stage (the fallback endpoint).
    ///
    /// The description must start with one of `GET`, `HEAD`, `POST`, `PUT`,
    /// `DELETE`, `TRACE`, `OPTIONS`, `PATCH` or `CONNECT` (in any case),
    /// followed by a single space and a path starting with `/`.  Path
    /// segments starting with `:` capture the corresponding request segment
    /// under that name.
    ///
    /// # Errors
    /// Fails if the description is malformed, if the route conflicts with an
    /// existing one (the same method and path, or a differently named
    /// parameter at the same position), or if the router is already
    /// prepared.
    pub fn add_route<M: Middleware>(&mut self, description: &str, handler: M) -> Result<&mut Self, RouterError> {
        self.builder()?.add_route(description, Box::pin(handler))?;
        Ok(self)
    }

    /// Adds a step, and all of its children, to the routing tree.  See
    /// [`Step`] for how steps are merged.
    ///
    /// # Errors
    /// Fails if the step conflicts with an existing route, or if the router
    /// is already prepared.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// use trailhead::tree::Step;
    ///
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let show = trailhead::endpoints::action(trailhead::endpoints::simple(Response::empty_204));
    /// let users = Step::segment("users")
    ///     .append(Step::parameter("id")?.append(Step::action("GET", show)?));
    ///
    /// let mut http = trailhead::http();
    /// http.add_step(users)?;
    /// http.prepare();
    /// let response = http.handle(Request::get("/users/12")?).await?;
    /// assert_eq!(response.status(), http::StatusCode::NO_CONTENT);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_step(&mut self, step: Step<Action>) -> Result<&mut Self, RouterError> {
        self.builder()?.add_step(step)?;
        Ok(self)
    }

    /// Appends middleware to the router.  Each middleware is executed in the
    /// order that it is appended to the router (i.e., the first middleware
    /// inserted executes first), before the request is dispatched.
    ///
    /// # Examples
    /// ```rust
    /// let mut http = trailhead::http();
    /// http.with(trailhead::middleware::TraceMiddleware::new());
    /// ```
    pub fn with<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(Box::pin(middleware));
        self
    }

    /// Sets a fallback endpoint.  This is the stage after the router: it runs
    /// when no route matched (with the [`Outcome`] available through
    /// [`Request::outcome`]), and when a handler falls through.  By default,
    /// this is an empty response, with a status of `405` for
    /// [`Outcome::MethodNotAllowed`], and `404` otherwise.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// # #[tokio::main] async fn main() -> Result<(), anyhow::Error> {
    /// let mut http = trailhead::http();
    /// http.route("GET /foo", trailhead::endpoints::simple(Response::empty_204))?;
    /// http.fallback(trailhead::endpoints::simple(|| Response::text("nothing here")));
    /// http.prepare();
    /// let response = http.handle(Request::get("/bar")?).await?;
    /// assert_eq!(response.status(), http::StatusCode::OK);
    /// # Ok(())
    /// # }
    /// ```
    pub fn fallback<E: Endpoint>(&mut self, endpoint: E) -> &mut Self {
        self.fallback = Some(Box::pin(endpoint));
        self
    }

    /// A channel to handle the termination singal.  By default, the router does
    /// not terminate, at least not gracefully, even in the face of
    /// SIGINT/SIGTERM.  This allows you to signal to the router when it should
    /// terminate, and it will gracefully shut down, letting all current
    /// requests finish before exiting.  Note that the return type is not
    /// `Clone`, and dropping the sender will not terminate the router.
    ///
    /// Note this only applies to the router when listening, and not when
    /// handling a single request.
    pub fn termination_signal(&mut self) -> watch::Sender<bool> {
        let (tx, rx) = watch::channel(false);
        self.terminate = Some(rx);
        tx
    }

    /// Handles a one-off request to the router.  This is equivalent to pinning
    /// the router (with [`Pin::new`], since the Router is `Unpin`), before
    /// calling [`crate::Endpoint::apply`].
    ///
    /// # Errors
    /// This is whatever error the middleware, the handler, or the fallback
    /// returned.
    pub async fn handle(&self, request: Request) -> Result<Response, anyhow::Error> {
        Endpoint::apply(Pin::new(self), request).await
    }

    /// Resolves the method and the raw (percent-encoded) path of a request
    /// against the routing tree.  The path is split on `/` after one leading
    /// slash is stripped, and each segment is percent-decoded (invalid UTF-8
    /// is replaced).  Escapes of reserved characters (`;/?:@&=+$,#`) are
    /// kept as they are, so `/a%2Fb` is the single segment `a%2Fb`, and is
    /// routed by a route with that literal segment.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::*;
    /// # fn main() -> Result<(), RouterError> {
    /// let mut http = trailhead::http();
    /// http.route("GET /files/:name", trailhead::endpoints::simple(Response::empty_204))?;
    /// http.prepare();
    /// let params = http.lookup(&http::Method::GET, "/files/a%20b.txt").into_params().unwrap();
    /// assert_eq!(params.get("name"), Some("a b.txt"));
    /// let params = http.lookup(&http::Method::GET, "/files/a%2Fb").into_params().unwrap();
    /// assert_eq!(params.get("name"), Some("a%2Fb"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, method: &http::Method, path: &str) -> Resolution<'_, Action> {
        match &self.table {
            Table::Prepared(tree) => tree.resolve(method, &split_path(path)[..]),
            Table::Building(_) => {
                log::warn!(
                    "{} {} routed through a router that was not prepared",
                    method,
                    path
                );
                Resolution::Missing(Outcome::NotFound)
            }
        }
    }

    fn builder(&mut self) -> Result<&mut TreeBuilder<Action>, RouterError> {
        match &mut self.table {
            Table::Building(builder) => Ok(builder),
            Table::Prepared(_) => Err(RouterError::Frozen),
        }
    }

    fn fallback_endpoint(&self) -> Pin<&dyn Endpoint> {
        self.fallback
            .as_ref()
            .map(Pin::as_ref)
            .unwrap_or_else(default_endpoint)
    }
}

#[async_trait]
impl Endpoint for Router {
    async fn apply(self: Pin<&Self>, request: Request) -> Result<Response, anyhow::Error> {
        let this = self.get_ref();
        let dispatch: Pin<&dyn Middleware> = self;
        let next = Next::new(&this.middleware[..], Some(dispatch), this.fallback_endpoint());
        next.apply(request).await
    }
}

/// The router as a single stage in someone else's stack: matched requests
/// go to their handler, which continues to the given `next`; everything
/// else goes straight to `next`.  The router's own middleware and fallback
/// are not used.
#[async_trait]
impl Middleware for Router {
    async fn apply(
        self: Pin<&Self>,
        mut request: Request,
        next: Next<'_>,
    ) -> Result<Response, anyhow::Error> {
        let this = self.get_ref();
        let handler = match this.lookup(request.method(), request.uri().path()) {
            // an earlier router stage may have left its own decision
            Resolution::Found { action, params } => {
                log::trace!("{} {} --> {:?}", request.method(), request.uri(), action);
                request.extensions_mut().remove::<Outcome>();
                request.extensions_mut().insert(params);
                action.as_ref()
            }
            Resolution::Missing(outcome) => {
                log::trace!("{} {} --> {:?}", request.method(), request.uri(), outcome);
                request.extensions_mut().remove::<Params>();
                request.extensions_mut().insert(outcome);
                return next.apply(request).await;
            }
        };

        handler.apply(request, next).await
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("middleware", &self.middleware)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

fn fall_through(request: Request) -> Response {
    Response::for_outcome(request.outcome().unwrap_or(Outcome::NotFound))
}

lazy_static::lazy_static! {
    static ref DEFAULT_ENDPOINT: FnEndpoint<fn(Request) -> Response> = FnEndpoint::new(fall_through as fn(Request) -> Response);
    static ref DEFAULT_ENDPOINT_PIN: Pin<&'static (dyn Endpoint + Unpin + 'static)> = Pin::new(&*DEFAULT_ENDPOINT);
}

// 'r can be anything _up to and including_ 'static, and this makes it play
// nice with unwrap_or_else.
pub(crate) fn default_endpoint<'r>() -> Pin<&'r dyn Endpoint> {
    *DEFAULT_ENDPOINT_PIN
}

/// Bytes whose escapes are left as they are when decoding a segment, so that
/// e.g. an encoded `/` stays distinguishable from a separator.
const RESERVED: &[u8] = b";/?:@&=+$,#";

// `/` is `[""]`, and `/a/` is `["a", ""]`.
fn split_path(path: &str) -> Vec<Cow<'_, str>> {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.split('/').map(decode_segment).collect()
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    let mut rest = segment;
    let mut decoded = String::new();

    while let Some(at) = rest.as_bytes().windows(3).position(reserved_escape) {
        decoded.push_str(&percent_decode_str(&rest[..at]).decode_utf8_lossy());
        decoded.push_str(&rest[at..at + 3]);
        rest = &rest[at + 3..];
    }

    if decoded.is_empty() {
        percent_decode_str(rest).decode_utf8_lossy()
    } else {
        decoded.push_str(&percent_decode_str(rest).decode_utf8_lossy());
        Cow::Owned(decoded)
    }
}

fn reserved_escape(window: &[u8]) -> bool {
    window[0] == b'%'
        && std::str::from_utf8(&window[1..])
            .ok()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map_or(false, |byte| RESERVED.contains(&byte))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::endpoints;
    use crate::tree::StepConfig;
    use http::StatusCode;

    fn status(code: u16) -> Action {
        endpoints::action(endpoints::sync(move |_| {
            Response::empty_status(StatusCode::from_u16(code).unwrap())
        }))
    }

    fn echo(name: &'static str) -> Action {
        endpoints::action(endpoints::sync(move |request: Request| {
            Response::text(request.param_str(name).unwrap_or("(none)").to_owned())
        }))
    }

    async fn expect(router: &Router, method: http::Method, path: &str, code: u16) {
        let request = Request::from_method(path, method.clone()).unwrap();
        let response = router.handle(request).await.unwrap();
        assert_eq!(response.status().as_u16(), code, "{} {}", method, path);
    }

    async fn body(router: &Router, path: &str) -> String {
        let response = router.handle(Request::get(path).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        let bytes = response.to_bytes().await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn prepared(build: impl FnOnce(&mut Router) -> Result<(), RouterError>) -> Router {
        let mut router = Router::default();
        build(&mut router).unwrap();
        router.prepare();
        router
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/"), vec![""]);
        assert_eq!(split_path("/a/b"), vec!["a", "b"]);
        assert_eq!(split_path("/a/"), vec!["a", ""]);
        assert_eq!(split_path("//"), vec!["", ""]);
        assert_eq!(split_path("/%20seg/caf%C3%A9"), vec![" seg", "café"]);
        assert_eq!(split_path("/a%2Fb"), vec!["a%2Fb"]);
        assert_eq!(split_path("/%3f%20x%23"), vec!["%3f x%23"]);
        assert_eq!(split_path("/%2%2F"), vec!["%2%2F"]);
    }

    #[test]
    fn test_invalid_description() {
        let mut router = Router::default();
        let error = router.add_route("dcdsvfd", status(200)).unwrap_err();
        assert!(matches!(error, RouterError::Configuration(_)));
    }

    #[test]
    fn test_frozen() {
        let mut router = Router::default();
        router.add_route("GET /", status(200)).unwrap();
        router.prepare();
        assert!(router.is_prepared());
        router.prepare();
        let error = router.add_route("GET /a", status(200)).unwrap_err();
        assert!(matches!(error, RouterError::Frozen));
    }

    #[tokio::test]
    async fn test_unprepared() {
        let mut router = Router::default();
        router.add_route("GET /", status(200)).unwrap();
        expect(&router, http::Method::GET, "/", 404).await;
    }

    #[tokio::test]
    async fn test_routes_on_root() {
        let router = prepared(|r| r.add_route("GET /", status(200)).map(drop));
        expect(&router, http::Method::GET, "/", 200).await;
        expect(&router, http::Method::POST, "/", 405).await;
        expect(&router, http::Method::GET, "/path", 404).await;
    }

    #[tokio::test]
    async fn test_routes_with_segments() {
        let router = prepared(|r| {
            r.add_route("GET /seg", status(200))?
                .add_route("POST /other", status(200))?
                .add_route("GET /first/second", status(200))?;
            Ok(())
        });
        expect(&router, http::Method::GET, "/seg", 200).await;
        expect(&router, http::Method::GET, "/seg/", 200).await;
        expect(&router, http::Method::GET, "/", 404).await;
        expect(&router, http::Method::GET, "/other", 405).await;
        expect(&router, http::Method::GET, "/first/second", 200).await;
        expect(&router, http::Method::GET, "/first/", 404).await;
    }

    #[tokio::test]
    async fn test_routes_with_parameters() {
        let router = prepared(|r| {
            r.add_route("GET /:param", echo("param"))?
                .add_route("GET /seg/:param", echo("param"))?
                .add_route("GET /pair/:first/:second", echo("second"))?;
            Ok(())
        });
        assert_eq!(body(&router, "/foo/").await, "foo");
        assert_eq!(body(&router, "/seg/bar").await, "bar");
        assert_eq!(body(&router, "/pair/foo/bar").await, "bar");
        // `seg` is taken as a literal, and has no handler of its own
        expect(&router, http::Method::GET, "/seg", 404).await;
    }

    #[tokio::test]
    async fn test_segment_precedence() {
        for literal_first in [true, false] {
            let router = prepared(|r| {
                if literal_first {
                    r.add_route("GET /foo/seg", status(300))?;
                    r.add_route("GET /foo/:param", status(200))?;
                } else {
                    r.add_route("GET /foo/:param", status(200))?;
                    r.add_route("GET /foo/seg", status(300))?;
                }
                Ok(())
            });
            expect(&router, http::Method::GET, "/foo/seg", 300).await;
            expect(&router, http::Method::GET, "/foo/other", 200).await;
        }
    }

    #[tokio::test]
    async fn test_steps() {
        let router = prepared(|r| {
            let first = StepConfig::new()
                .segment("first")
                .method("get", status(300))
                .build()?
                .append(StepConfig::new().segment("second").method("GET", status(200)).build()?);
            let both = StepConfig::new()
                .segment("seg")
                .parameter("param")
                .method("GET", echo("param"))
                .build()?;
            r.add_step(first)?.add_step(both)?;
            Ok(())
        });
        expect(&router, http::Method::GET, "/first", 300).await;
        expect(&router, http::Method::GET, "/first/second", 200).await;
        expect(&router, http::Method::POST, "/first", 405).await;
        assert_eq!(body(&router, "/seg/foo").await, "foo");
    }

    #[tokio::test]
    async fn test_empty_segments() {
        let router = prepared(|r| {
            r.add_step(Step::segment("").append(Step::action("GET", status(200))?))?;
            r.add_step(
                Step::segment("")
                    .append(Step::segment("second").append(Step::action("GET", status(201))?)),
            )?;
            r.add_step(Step::segment(" seg").append(Step::action("GET", status(202))?))?;
            Ok(())
        });
        expect(&router, http::Method::GET, "//", 200).await;
        expect(&router, http::Method::GET, "/", 404).await;
        expect(&router, http::Method::GET, "//second/", 201).await;
        expect(&router, http::Method::GET, "/%20seg/", 202).await;
    }

    #[tokio::test]
    async fn test_parameter_on_empty_segment() {
        let router = prepared(|r| {
            r.add_step(Step::parameter("param")?.append(Step::action("GET", status(200))?))?;
            Ok(())
        });
        expect(&router, http::Method::GET, "//", 200).await;
        expect(&router, http::Method::GET, "/", 404).await;
    }

    #[test]
    fn test_conflicts() {
        let mut router = Router::default();
        router
            .add_step(Step::parameter("first").unwrap().append(Step::action("GET", status(200)).unwrap()))
            .unwrap();
        let error = router
            .add_step(Step::parameter("second").unwrap().append(Step::action("GET", status(200)).unwrap()))
            .unwrap_err();
        assert!(matches!(error, RouterError::Conflict(_)));

        router.add_route("GET /a", status(200)).unwrap();
        let error = router.add_route("GET /a/", status(200)).unwrap_err();
        assert!(matches!(error, RouterError::Conflict(_)));
        router.add_route("POST /a", status(200)).unwrap();
    }

    #[tokio::test]
    async fn test_custom_fallback() {
        let mut router = Router::default();
        router.route("GET /a", endpoints::simple(Response::empty_204)).unwrap();
        router.fallback(endpoints::sync(|request: Request| {
            let outcome = request.outcome().map(|o| format!("{:?}", o));
            Response::text(outcome.unwrap_or_default())
        }));
        router.prepare();
        assert_eq!(body(&router, "/b").await, "NotFound");
        let response = router.handle(Request::post("/a").unwrap()).await.unwrap();
        let bytes = response.to_bytes().await.unwrap();
        assert_eq!(&bytes[..], b"MethodNotAllowed");
    }

    #[derive(Debug)]
    struct Pass;

    #[async_trait]
    impl Middleware for Pass {
        async fn apply(
            self: Pin<&Self>,
            request: Request,
            next: Next<'_>,
        ) -> Result<Response, anyhow::Error> {
            if request.param_str("name") == Some("skip") {
                return next.apply(request).await;
            }
            Ok(Response::empty_204())
        }
    }

    #[tokio::test]
    async fn test_handler_falls_through() {
        let mut router = Router::default();
        router.add_route("GET /:name", Pass).unwrap();
        router.fallback(endpoints::sync(|request: Request| {
            assert_eq!(request.outcome(), None);
            Response::text(request.param_str("name").unwrap_or("").to_owned())
        }));
        router.prepare();
        expect(&router, http::Method::GET, "/keep", 204).await;
        assert_eq!(body(&router, "/skip").await, "skip");
    }

    #[tokio::test]
    async fn test_router_as_middleware() {
        let mut inner = Router::default();
        inner.route("GET /inner", endpoints::simple(Response::empty_204)).unwrap();
        inner.prepare();

        let mut outer = Router::default();
        outer.with(inner);
        outer.route("GET /outer", endpoints::simple(|| Response::text("outer"))).unwrap();
        outer.prepare();

        expect(&outer, http::Method::GET, "/inner", 204).await;
        assert_eq!(body(&outer, "/outer").await, "outer");
        // the inner router's miss is overwritten by the outer one's
        expect(&outer, http::Method::POST, "/outer", 405).await;
        expect(&outer, http::Method::GET, "/nowhere", 404).await;
    }

    fn routing_state(request: &Request) -> String {
        format!("{:?} {:?}", request.outcome(), request.param_str("name"))
    }

    #[tokio::test]
    async fn test_nested_routers_leave_one_decision() {
        let mut inner = Router::default();
        inner.add_route("GET /:name", Pass).unwrap();
        inner.prepare();

        let mut outer = Router::default();
        outer.with(inner);
        outer
            .route("GET /outer/route", endpoints::sync(|request: Request| Response::text(routing_state(&request))))
            .unwrap();
        outer.fallback(endpoints::sync(|request: Request| Response::text(routing_state(&request))));
        outer.prepare();

        // the inner miss is cleared by the outer match
        assert_eq!(body(&outer, "/outer/route").await, "None None");
        // the inner capture is cleared by the outer miss
        assert_eq!(body(&outer, "/skip").await, "Some(NotFound) None");
    }

    #[tokio::test]
    async fn test_encoded_reserved_segment() {
        let router = prepared(|r| {
            r.add_route("GET /a%2Fb", status(201))?
                .add_route("GET /a/b", status(202))?
                .add_route("GET /files/:name", echo("name"))?;
            Ok(())
        });
        expect(&router, http::Method::GET, "/a%2Fb", 201).await;
        expect(&router, http::Method::GET, "/a/b", 202).await;
        assert_eq!(body(&router, "/files/x%2Fy%20z").await, "x%2Fy z");
    }

    #[tokio::test]
    async fn test_actions_as_handlers() {
        let router = prepared(|r| {
            r.add_route("GET /action", endpoints::action(endpoints::simple(Response::empty_204)))?
                .add_route("GET /handler", endpoints::handler(Pass))?;
            Ok(())
        });
        expect(&router, http::Method::GET, "/action", 204).await;
        expect(&router, http::Method::GET, "/handler", 204).await;
    }
}
