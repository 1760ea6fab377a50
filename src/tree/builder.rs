use super::node::{Arena, NodeId};
use super::{description, Step, Tree};
use crate::{ConflictError, RouterError};

/// The mutable half of the routing tree.
///
/// Routes are inserted here during setup; once every route is in, call
/// [`TreeBuilder::finish`] to get a [`Tree`], which can only be resolved
/// against.  Insertion is not transactional: if it fails with a conflict,
/// whatever was merged before the conflict stays in the tree.  Conflicts are
/// meant to abort setup entirely.
#[derive(Debug)]
pub struct TreeBuilder<A> {
    arena: Arena<A>,
}

impl<A> Default for TreeBuilder<A> {
    fn default() -> Self {
        TreeBuilder {
            arena: Arena::new(),
        }
    }
}

/// The parts of a step that are applied, in this order, when the step is
/// merged into the tree.  A pending step moves through every phase exactly
/// once, skipping the parts it does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Segment,
    Parameter,
    Children,
    Method,
    Action,
    Done,
}

impl Phase {
    fn next(self) -> Phase {
        match self {
            Phase::Segment => Phase::Parameter,
            Phase::Parameter => Phase::Children,
            Phase::Children => Phase::Method,
            Phase::Method => Phase::Action,
            Phase::Action | Phase::Done => Phase::Done,
        }
    }
}

/// A step being merged: where it currently is in the tree, which phase it
/// is in, and the parts that have not been applied yet.
struct Pending<A> {
    at: NodeId,
    position: String,
    phase: Phase,
    segment: Option<String>,
    parameter: Option<String>,
    children: Vec<Step<A>>,
    method: Option<http::Method>,
    action: Option<A>,
}

impl<A> Pending<A> {
    fn new(at: NodeId, position: String, step: Step<A>) -> Self {
        let (method, action) = match step.terminal {
            Some((method, action)) => (Some(method), Some(action)),
            None => (None, None),
        };

        Pending {
            at,
            position,
            phase: Phase::Segment,
            segment: step.segment,
            parameter: step.parameter,
            children: step.children,
            method,
            action,
        }
    }

    fn position(&self) -> String {
        if self.position.is_empty() {
            "/".to_owned()
        } else {
            self.position.clone()
        }
    }
}

impl<A> TreeBuilder<A> {
    #[must_use]
    /// Creates a builder containing only an empty root.
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    /// Parses the description (e.g. `"GET /users/:id"`) and merges the
    /// resulting steps into the tree.
    ///
    /// The description must start with one of [`super::METHODS`] (in any
    /// case), a single whitespace character, and a path starting with `/`.
    /// One leading and one trailing slash are stripped from the path before
    /// it is split; segments starting with `:` become parameters.
    ///
    /// # Errors
    /// Fails with [`RouterError::Configuration`] if the description is
    /// malformed, and with [`RouterError::Conflict`] if the route conflicts
    /// with one already inserted.
    pub fn add_route(&mut self, description: &str, action: A) -> Result<&mut Self, RouterError> {
        let step = description::parse(description, action)?;
        self.add_step(step)?;
        Ok(self)
    }

    /// Merges the step, and all of its children, into the tree.
    ///
    /// # Errors
    /// Fails if a parameter with a different name is already bound where the
    /// step binds one, or if an action is already attached where the step
    /// attaches one.
    pub fn add_step(&mut self, step: Step<A>) -> Result<&mut Self, ConflictError> {
        let mut work = vec![Pending::new(NodeId::ROOT, String::new(), step)];

        while let Some(pending) = work.pop() {
            self.advance(pending, &mut work)?;
        }

        Ok(self)
    }

    /// Freezes the builder.
    pub fn finish(self) -> Tree<A> {
        log::debug!("routing tree finished with {} node(s)", self.arena.len());
        Tree::new(self.arena)
    }

    /// Runs the pending step through its remaining phases.  When it reaches
    /// its children, it is parked back on the work stack (resuming at the
    /// method phase) underneath its children, so that each child is merged
    /// in full, in order, before the parent continues.
    fn advance(&mut self, mut pending: Pending<A>, work: &mut Vec<Pending<A>>) -> Result<(), ConflictError> {
        loop {
            match pending.phase {
                Phase::Segment => {
                    if let Some(segment) = pending.segment.take() {
                        pending.position.push('/');
                        pending.position.push_str(&segment);
                        pending.at = self.literal(pending.at, segment);
                    }
                }
                Phase::Parameter => {
                    if let Some(name) = pending.parameter.take() {
                        let position = pending.position();
                        pending.at = self.parameter(pending.at, name.clone(), position)?;
                        pending.position.push_str("/:");
                        pending.position.push_str(&name);
                    }
                }
                Phase::Children => {
                    if !pending.children.is_empty() {
                        let children = std::mem::take(&mut pending.children);
                        let at = pending.at;
                        let position = pending.position.clone();
                        pending.phase = Phase::Method;
                        work.push(pending);
                        work.extend(
                            children
                                .into_iter()
                                .rev()
                                .map(|child| Pending::new(at, position.clone(), child)),
                        );
                        return Ok(());
                    }
                }
                Phase::Method => {
                    if let Some(method) = pending.method.take() {
                        pending.position = format!("{} {}", pending.position(), method);
                        pending.at = self.method(pending.at, method);
                    }
                }
                Phase::Action => {
                    if let Some(action) = pending.action.take() {
                        self.attach(pending.at, action, pending.position())?;
                        log::debug!("route inserted: {}", pending.position());
                    }
                }
                Phase::Done => return Ok(()),
            }

            pending.phase = pending.phase.next();
        }
    }

    fn literal(&mut self, at: NodeId, segment: String) -> NodeId {
        if let Some(&child) = self.arena.get(at).literals.get(&segment) {
            return child;
        }

        let child = self.arena.push();
        self.arena.get_mut(at).literals.insert(segment, child);
        child
    }

    fn parameter(&mut self, at: NodeId, name: String, position: String) -> Result<NodeId, ConflictError> {
        if let Some((existing, child)) = &self.arena.get(at).parameter {
            return if **existing == *name {
                Ok(*child)
            } else {
                Err(ConflictError::Parameter {
                    position,
                    existing: existing.to_string(),
                    attempted: name,
                })
            };
        }

        let child = self.arena.push();
        self.arena.get_mut(at).parameter = Some((name.into(), child));
        Ok(child)
    }

    fn method(&mut self, at: NodeId, method: http::Method) -> NodeId {
        if let Some(&child) = self.arena.get(at).methods.get(&method) {
            return child;
        }

        let child = self.arena.push();
        self.arena.get_mut(at).methods.insert(method, child);
        child
    }

    fn attach(&mut self, at: NodeId, action: A, position: String) -> Result<(), ConflictError> {
        let slot = &mut self.arena.get_mut(at).action;
        if slot.is_some() {
            return Err(ConflictError::Action { position });
        }

        *slot = Some(action);
        Ok(())
    }
}
