use super::method;
use crate::ConfigurationError;

/// A validated description of one fragment of a route.
///
/// A step may carry a literal segment, a named parameter, and a method with
/// its action, in any combination (as long as at least one is present), as
/// well as an ordered list of child steps.  When a step is inserted into a
/// [`super::TreeBuilder`], its parts are applied in a fixed order: the
/// segment, then the parameter, then the children, then the method, and
/// finally the action.  So, a step with a segment `users` and a `GET` action
/// registers `GET /users`; adding a child with a parameter `id` and a `GET`
/// action also registers `GET /users/:id`.
///
/// Steps are consumed on insertion.
///
/// # Examples
/// ```rust
/// use trailhead::tree::{Step, StepConfig, TreeBuilder};
///
/// let users = StepConfig::new()
///     .segment("users")
///     .method("GET", "index")
///     .build()?
///     .append(Step::parameter("id")?.append(Step::action("get", "show")?));
///
/// let mut builder = TreeBuilder::new();
/// builder.add_step(users)?;
/// let tree = builder.finish();
/// assert_eq!(tree.resolve(&http::Method::GET, &["users"]).action(), Some(&"index"));
/// assert_eq!(tree.resolve(&http::Method::GET, &["users", "1"]).action(), Some(&"show"));
/// # Ok::<(), trailhead::RouterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Step<A> {
    pub(super) segment: Option<String>,
    pub(super) parameter: Option<String>,
    pub(super) terminal: Option<(http::Method, A)>,
    pub(super) children: Vec<Step<A>>,
}

impl<A> Step<A> {
    /// Validates the configuration, creating a step.
    ///
    /// # Errors
    /// This fails if the configuration has neither a segment, a parameter,
    /// nor a method and an action; if only one of the method and the action
    /// is given; if the parameter name is empty; or if the method is not one
    /// of [`super::METHODS`].
    pub fn new(config: StepConfig<A>) -> Result<Self, ConfigurationError> {
        let StepConfig {
            segment,
            parameter,
            method,
            action,
        } = config;

        let terminal = match (method, action) {
            (Some(method), Some(action)) => Some((method::parse(&method)?, action)),
            (Some(_), None) => return Err(ConfigurationError::MethodWithoutAction),
            (None, Some(_)) => return Err(ConfigurationError::ActionWithoutMethod),
            (None, None) => None,
        };

        if parameter.as_deref() == Some("") {
            return Err(ConfigurationError::EmptyParameter);
        }

        if segment.is_none() && parameter.is_none() && terminal.is_none() {
            return Err(ConfigurationError::EmptyStep);
        }

        Ok(Step {
            segment,
            parameter,
            terminal,
            children: vec![],
        })
    }

    /// Creates a step matching the given literal segment.  The empty string
    /// is a valid segment, distinct from the root.
    pub fn segment<S: Into<String>>(segment: S) -> Self {
        Step {
            segment: Some(segment.into()),
            parameter: None,
            terminal: None,
            children: vec![],
        }
    }

    /// Creates a step capturing a single path segment under the given name.
    ///
    /// # Errors
    /// Fails if the name is empty.
    pub fn parameter<S: Into<String>>(name: S) -> Result<Self, ConfigurationError> {
        Step::new(StepConfig::new().parameter(name))
    }

    /// Creates a step attaching an action to a method.
    ///
    /// # Errors
    /// Fails if the method is not one of [`super::METHODS`] (the comparison
    /// ignores case).
    pub fn action<M: AsRef<str>>(method: M, action: A) -> Result<Self, ConfigurationError> {
        Step::new(StepConfig::new().method(method, action))
    }

    #[must_use]
    /// Appends a child step, returning the parent.
    pub fn append(mut self, child: Step<A>) -> Self {
        self.children.push(child);
        self
    }

    /// The literal segment of this step, if any.
    pub fn segment_str(&self) -> Option<&str> {
        self.segment.as_deref()
    }

    /// The parameter name of this step, if any.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// The (uppercase) method of this step, if any.
    pub fn method(&self) -> Option<&http::Method> {
        self.terminal.as_ref().map(|(method, _)| method)
    }

    /// The children of this step, in the order they were appended.
    pub fn children(&self) -> &[Step<A>] {
        &self.children[..]
    }
}

impl<A> TryFrom<StepConfig<A>> for Step<A> {
    type Error = ConfigurationError;

    fn try_from(config: StepConfig<A>) -> Result<Self, Self::Error> {
        Step::new(config)
    }
}

/// The unvalidated parts of a [`Step`].
///
/// Nothing is checked until [`StepConfig::build`] (or [`Step::new`]) is
/// called.
#[derive(Debug, Clone)]
pub struct StepConfig<A> {
    /// The literal segment.
    pub segment: Option<String>,
    /// The parameter name.
    pub parameter: Option<String>,
    /// The method token, matched case-insensitively.
    pub method: Option<String>,
    /// The action for the method.
    pub action: Option<A>,
}

impl<A> Default for StepConfig<A> {
    fn default() -> Self {
        StepConfig {
            segment: None,
            parameter: None,
            method: None,
            action: None,
        }
    }
}

impl<A> StepConfig<A> {
    #[must_use]
    /// Creates an empty configuration.
    pub fn new() -> Self {
        StepConfig::default()
    }

    #[must_use]
    /// Sets the literal segment.
    pub fn segment<S: Into<String>>(mut self, segment: S) -> Self {
        self.segment = Some(segment.into());
        self
    }

    #[must_use]
    /// Sets the parameter name.
    pub fn parameter<S: Into<String>>(mut self, name: S) -> Self {
        self.parameter = Some(name.into());
        self
    }

    #[must_use]
    /// Sets the method and its action together.
    pub fn method<M: AsRef<str>>(mut self, method: M, action: A) -> Self {
        self.method = Some(method.as_ref().to_owned());
        self.action = Some(action);
        self
    }

    /// Validates the configuration.  See [`Step::new`].
    ///
    /// # Errors
    /// See [`Step::new`].
    pub fn build(self) -> Result<Step<A>, ConfigurationError> {
        Step::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> StepConfig<u32> {
        StepConfig::new()
    }

    #[test]
    fn test_empty_step() {
        assert_eq!(
            config().build().unwrap_err(),
            ConfigurationError::EmptyStep
        );
    }

    #[test]
    fn test_empty_segment_is_valid() {
        let step = config().segment("").build().unwrap();
        assert_eq!(step.segment_str(), Some(""));
    }

    #[test]
    fn test_empty_parameter() {
        assert_eq!(
            config().parameter("").build().unwrap_err(),
            ConfigurationError::EmptyParameter
        );
        assert_eq!(
            Step::<u32>::parameter("").unwrap_err(),
            ConfigurationError::EmptyParameter
        );
    }

    #[test]
    fn test_unpaired_method() {
        let method_only = StepConfig::<u32> {
            method: Some("GET".into()),
            ..StepConfig::default()
        };
        assert_eq!(
            method_only.build().unwrap_err(),
            ConfigurationError::MethodWithoutAction
        );

        let action_only = StepConfig {
            segment: Some("a".into()),
            action: Some(1u32),
            ..StepConfig::default()
        };
        assert_eq!(
            action_only.build().unwrap_err(),
            ConfigurationError::ActionWithoutMethod
        );
    }

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            Step::action("BREW", 1u32).unwrap_err(),
            ConfigurationError::UnknownMethod("BREW".into())
        );
    }

    #[test]
    fn test_method_is_uppercased() {
        let step = Step::action("patch", 1u32).unwrap();
        assert_eq!(step.method(), Some(&http::Method::PATCH));
    }

    #[test]
    fn test_append_keeps_order() {
        let step = Step::segment("a")
            .append(Step::segment("b"))
            .append(Step::parameter("c").unwrap())
            .append(Step::action("GET", 1u32).unwrap());
        let children = step.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].segment_str(), Some("b"));
        assert_eq!(children[1].parameter_name(), Some("c"));
        assert_eq!(children[2].method(), Some(&http::Method::GET));
    }

    #[test]
    fn test_combined_step() {
        let step = StepConfig::new()
            .segment("a")
            .parameter("b")
            .method("DELETE", 1u32)
            .build()
            .unwrap();
        assert_eq!(step.segment_str(), Some("a"));
        assert_eq!(step.parameter_name(), Some("b"));
        assert_eq!(step.method(), Some(&http::Method::DELETE));
    }
}
