use super::node::{Arena, Node, NodeId};
use super::Params;

/// Why a resolution produced no action.
///
/// These are not errors; they are ordinary results of a lookup, and are
/// expected to be turned into a `404` or a `405` response by whoever is
/// handling the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Nothing was registered at the path.
    NotFound,
    /// Something was registered at the path, but not for the requested
    /// method.
    MethodNotAllowed,
}

impl Outcome {
    /// The status code a response for this outcome should carry.
    ///
    /// # Examples
    /// ```rust
    /// # use trailhead::tree::Outcome;
    /// assert_eq!(Outcome::NotFound.status(), http::StatusCode::NOT_FOUND);
    /// assert_eq!(Outcome::MethodNotAllowed.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    /// ```
    pub fn status(self) -> http::StatusCode {
        match self {
            Outcome::NotFound => http::StatusCode::NOT_FOUND,
            Outcome::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// The result of resolving a method and a path against a [`Tree`].
#[derive(Debug)]
pub enum Resolution<'t, A> {
    /// An action was found.
    Found {
        /// The action registered for the method and path.
        action: &'t A,
        /// The parameters captured along the path.
        params: Params,
    },
    /// Nothing matched.
    Missing(Outcome),
}

impl<'t, A> Resolution<'t, A> {
    /// The action, if one was found.
    pub fn action(&self) -> Option<&'t A> {
        match self {
            Resolution::Found { action, .. } => Some(*action),
            Resolution::Missing(_) => None,
        }
    }

    /// The captured parameters, if an action was found.
    pub fn into_params(self) -> Option<Params> {
        match self {
            Resolution::Found { params, .. } => Some(params),
            Resolution::Missing(_) => None,
        }
    }

    /// The outcome, if no action was found.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Resolution::Found { .. } => None,
            Resolution::Missing(outcome) => Some(*outcome),
        }
    }
}

/// The frozen routing tree, created by [`super::TreeBuilder::finish`].
///
/// A tree only supports resolution, which never modifies it; it can be
/// shared between any number of concurrent requests.
#[derive(Debug)]
pub struct Tree<A> {
    arena: Arena<A>,
}

impl<A> Tree<A> {
    pub(super) fn new(arena: Arena<A>) -> Self {
        Tree { arena }
    }

    /// Resolves the method and the path segments to an action.
    ///
    /// The segments are the components of the (already percent-decoded) path
    /// with one leading slash stripped, split on `/`; so `/` is `[""]`, and
    /// `/a/b` is `["a", "b"]`.  A lone empty segment at the end means there
    /// is nothing left to match, the same as no segments at all.
    ///
    /// At each segment, a literal child always wins over the parameter child;
    /// once a branch is chosen it is never reconsidered, even if it later
    /// fails to match.  Once the segments are exhausted, an action attached
    /// directly to the node is returned whatever the method is; otherwise the
    /// method is looked up among the node's methods.
    pub fn resolve<S: AsRef<str>>(&self, method: &http::Method, segments: &[S]) -> Resolution<'_, A> {
        let mut params = Params::default();
        let mut node = self.arena.get(NodeId::ROOT);
        let mut remaining = segments;

        loop {
            let (segment, rest) = match remaining {
                [only] if only.as_ref().is_empty() => break,
                [first, rest @ ..] => (first.as_ref(), rest),
                [] => break,
            };

            node = if let Some(&child) = node.literals.get(segment) {
                self.arena.get(child)
            } else if let Some((name, child)) = &node.parameter {
                params.insert(name.clone(), segment.to_owned());
                self.arena.get(*child)
            } else {
                return Resolution::Missing(Outcome::NotFound);
            };
            remaining = rest;
        }

        self.terminal(node, method, params)
    }

    fn terminal<'t>(&'t self, node: &'t Node<A>, method: &http::Method, params: Params) -> Resolution<'t, A> {
        if let Some(action) = &node.action {
            return Resolution::Found { action, params };
        }

        match node.methods.get(method) {
            Some(&child) => self.terminal(self.arena.get(child), method, params),
            None if node.methods.is_empty() => Resolution::Missing(Outcome::NotFound),
            None => Resolution::Missing(Outcome::MethodNotAllowed),
        }
    }
}
