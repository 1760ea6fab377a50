#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Errors generated while describing routes, before anything is inserted
/// into the routing tree.
///
/// These are programmer errors in route setup; they are meant to abort the
/// construction of the routing table rather than be handled at runtime.
pub enum ConfigurationError {
    #[error("a step needs at least one of a segment, a parameter, or a method and an action")]
    /// Generated when a [`crate::tree::Step`] carries nothing at all.
    EmptyStep,
    #[error("a step that contains a method must also contain an action")]
    /// Generated when a step has a method but no action.
    MethodWithoutAction,
    #[error("a step that contains an action must also contain a method")]
    /// Generated when a step has an action but no method.
    ActionWithoutMethod,
    #[error("a parameter must have a name")]
    /// Generated when a parameter name is the empty string (this includes a
    /// bare `:` segment in a route description).
    EmptyParameter,
    #[error("{:?} is not a recognized http method", .0)]
    /// Generated when the method token is not one of the nine verbs the
    /// router knows about.
    UnknownMethod(String),
    #[error("a route description must look like `METHOD /path/...`, got {:?}", .0)]
    /// Generated when a route description does not start with a method,
    /// a single whitespace character, and a path beginning with `/`.
    InvalidDescription(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Errors generated when a route would overwrite part of the routing tree.
pub enum ConflictError {
    #[error("cannot bind parameter {:?} at {}: {:?} is already bound there", attempted, position, existing)]
    /// A node may only have one parameter child; a second, differently named
    /// one was inserted.
    Parameter {
        /// Where in the tree the conflict happened, e.g. `/users`.
        position: String,
        /// The name already bound at that position.
        existing: String,
        /// The name that was rejected.
        attempted: String,
    },
    #[error("there is already an action at {}", position)]
    /// Two actions were attached to the same position.
    Action {
        /// Where in the tree the conflict happened, e.g. `/users/:id GET`.
        position: String,
    },
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
/// Errors generated specifically from this library, and not its interactions
/// user code.
pub enum RouterError {
    #[error(transparent)]
    /// A route or step was malformed.  See [`ConfigurationError`].
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    /// A route conflicted with one already in the tree.  See
    /// [`ConflictError`].
    Conflict(#[from] ConflictError),
    #[error("the router is already prepared, and no routes can be added to it")]
    /// Generated when adding a route after [`crate::Router::prepare`] was
    /// called.
    Frozen,
    #[error("could not parse the given string ({:?}) as an address", .0)]
    /// Generated when attempting to parse an address (during
    /// [`crate::Router::listen`]), but the address was invalid.
    InvalidAddress(String),
    #[error("could not serve server")]
    /// Generated when attempting to bind and listen using hyper, but it failed
    /// for some underlying reason.
    HyperServer(#[source] hyper::Error),
}
