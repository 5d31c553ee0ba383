use crate::error::{Error, NavigationError, NavigationFailure, Result};
use crate::path::{Path, Step};
use crate::types::Value;

/// The container directly holding a node, borrowed from the root.
///
/// Owns its step, so it outlives the path it was resolved from.
#[derive(Debug, Clone)]
pub struct ParentRef<'a> {
    container: &'a Value,
    step: Step,
    child: &'a Value,
}

impl<'a> ParentRef<'a> {
    /// A mapping or sequence node.
    pub fn container(&self) -> &'a Value {
        self.container
    }

    /// Position of the node inside [`Self::container`].
    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn child(&self) -> &'a Value {
        self.child
    }
}

/// Mutable counterpart of [`ParentRef`]; writes land in the root.
#[derive(Debug)]
pub struct ParentMut<'a> {
    container: &'a mut Value,
    step: Step,
}

impl<'a> ParentMut<'a> {
    pub fn container(&self) -> &Value {
        &*self.container
    }

    pub fn container_mut(&mut self) -> &mut Value {
        &mut *self.container
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    /// `None` only if the entry was removed through [`Self::container_mut`].
    pub fn child_mut(&mut self) -> Option<&mut Value> {
        self.container.get_mut(&self.step)
    }

    /// Swap in a new value for the node, returning the old one. `None`, and
    /// `value` dropped, if the entry was removed through
    /// [`Self::container_mut`].
    pub fn replace(&mut self, value: Value) -> Option<Value> {
        self.child_mut().map(|slot| std::mem::replace(slot, value))
    }

    /// Take the node out of its container. Later siblings in a sequence shift
    /// down, so other paths through this container go stale.
    pub fn remove(self) -> Option<Value> {
        match (self.container, &self.step) {
            (Value::Object(map), Step::Key(key)) => map.shift_remove(key),
            (Value::Array(items) | Value::Tuple(items), Step::Index(i)) if *i < items.len() => {
                Some(items.remove(*i))
            }
            _ => None,
        }
    }

    pub fn into_container(self) -> &'a mut Value {
        self.container
    }
}

/// Re-navigate `path` in `root` and return the container holding its last step.
///
/// Fails with [`Error::EmptyPath`] for the root, and with
/// [`Error::Navigation`] when any step, the last one included, cannot be
/// followed: a missing key, an index past the end, or a step of the wrong
/// kind for the node it meets.
pub fn resolve_parent<'a>(root: &'a Value, path: &Path) -> Result<ParentRef<'a>> {
    let (last, init) = path.split_last().ok_or(Error::EmptyPath)?;
    let container = descend(root, init)?;
    let child = container
        .follow(last)
        .map_err(|reason| navigation_error(init, last, reason))?;
    Ok(ParentRef {
        container,
        step: last.clone(),
        child,
    })
}

pub fn resolve_parent_mut<'a>(root: &'a mut Value, path: &Path) -> Result<ParentMut<'a>> {
    let (last, init) = path.split_last().ok_or(Error::EmptyPath)?;
    let container = descend_mut(root, init)?;
    if let Err(reason) = container.follow(last) {
        return Err(navigation_error(init, last, reason));
    }
    Ok(ParentMut { container, step: last.clone() })
}

/// The node at `path` itself.
pub fn resolve<'a>(root: &'a Value, path: &Path) -> Result<&'a Value> {
    descend(root, path.steps())
}

pub fn resolve_mut<'a>(root: &'a mut Value, path: &Path) -> Result<&'a mut Value> {
    descend_mut(root, path.steps())
}

fn descend<'a>(root: &'a Value, steps: &[Step]) -> Result<&'a Value> {
    let mut current = root;
    for (depth, step) in steps.iter().enumerate() {
        current = current
            .follow(step)
            .map_err(|reason| navigation_error(&steps[..depth], step, reason))?;
    }
    Ok(current)
}

fn descend_mut<'a>(root: &'a mut Value, steps: &[Step]) -> Result<&'a mut Value> {
    let mut current = root;
    for (depth, step) in steps.iter().enumerate() {
        current = current
            .follow_mut(step)
            .map_err(|reason| navigation_error(&steps[..depth], step, reason))?;
    }
    Ok(current)
}

fn navigation_error(followed: &[Step], step: &Step, reason: NavigationFailure) -> Error {
    let err = NavigationError {
        followed: Path::from(followed.to_vec()),
        step: step.clone(),
        reason,
    };
    tracing::debug!(%err, "path does not resolve");
    Error::Navigation(err)
}
