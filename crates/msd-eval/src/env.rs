//! Environments: persistent chains of name bindings
//!
//! Extending never touches the parent, so one chain can be shared by any
//! number of closures and evaluation frames.

use std::fmt;
use std::rc::Rc;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

#[derive(Debug)]
struct Binding {
    name: Box<str>,
    value: Value,
    parent: Env,
}

/// Immutable environment; cloning is a reference-count bump.
#[derive(Clone, Default)]
pub struct Env(Option<Rc<Binding>>);

impl Env {
    /// The environment with no bindings
    pub fn empty() -> Self {
        Env(None)
    }

    /// New chain with `name` bound in front of `self`
    pub fn extend(&self, name: impl Into<Box<str>>, value: Value) -> Self {
        Env(Some(Rc::new(Binding {
            name: name.into(),
            value,
            parent: self.clone(),
        })))
    }

    /// Nearest binding of `name`, walking outward
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        let mut node = self.0.as_deref();
        while let Some(binding) = node {
            if binding.name.as_ref() == name {
                return Ok(binding.value.clone());
            }
            node = binding.parent.0.as_deref();
        }
        Err(EvalError::free_variable(name))
    }

    /// Bound names, innermost first; shadowed names appear more than once
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.0.as_deref(), |b| b.parent.0.as_deref()).map(|b| b.name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
