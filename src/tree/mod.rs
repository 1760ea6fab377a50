//! The routing tree.
//!
//! Routes are described with [`Step`]s (or with textual descriptions such as
//! `"GET /users/:id"`, which are converted into steps), merged into a
//! [`TreeBuilder`], and then frozen into a [`Tree`] that only supports
//! resolution.  The builder and the tree are generic over the action type;
//! [`crate::Router`] uses them with its own handlers, but any value can be
//! routed to.
//!
//! # Examples
//! ```rust
//! use trailhead::tree::{Outcome, Resolution, Step, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder
//!     .add_route("GET /users/:id", "show")?
//!     .add_route("GET /users/me", "me")?;
//! builder.add_step(Step::segment("health").append(Step::action("head", "health")?))?;
//! let tree = builder.finish();
//!
//! match tree.resolve(&http::Method::GET, &["users", "42"]) {
//!     Resolution::Found { action, params } => {
//!         assert_eq!(*action, "show");
//!         assert_eq!(params.get("id"), Some("42"));
//!     }
//!     Resolution::Missing(_) => unreachable!(),
//! }
//! assert_eq!(tree.resolve(&http::Method::GET, &["users", "me"]).action(), Some(&"me"));
//! assert_eq!(
//!     tree.resolve(&http::Method::POST, &["users", "me"]).outcome(),
//!     Some(Outcome::MethodNotAllowed)
//! );
//! # Ok::<(), trailhead::RouterError>(())
//! ```

mod builder;
mod description;
mod matcher;
mod method;
mod node;
mod params;
mod step;

pub use self::builder::TreeBuilder;
pub use self::matcher::{Outcome, Resolution, Tree};
pub use self::method::METHODS;
pub use self::params::Params;
pub use self::step::{Step, StepConfig};
