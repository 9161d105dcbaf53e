//! Handler registry mapping manifest keys to handlers.

use std::collections::{HashMap, VecDeque};

use super::handler::ManifestHandler;
use crate::error::{ManifestError, Result};

/// Registry of manifest handlers.
///
/// Handlers are kept in registration order, which is the order of the
/// Parse phase. Keys are unique: registering a second handler for a key
/// replaces the first one in place.
pub struct ManifestHandlerRegistry {
    handlers: Vec<Box<dyn ManifestHandler>>,
    index: HashMap<String, usize>,
}

impl ManifestHandlerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a handler under its own key.
    pub fn register(&mut self, handler: impl ManifestHandler + 'static) {
        self.register_boxed(Box::new(handler));
    }

    /// Register an already boxed handler.
    pub fn register_boxed(&mut self, handler: Box<dyn ManifestHandler>) {
        let key = handler.key().to_string();
        match self.index.get(&key) {
            Some(&position) => {
                tracing::warn!(key = %key, "Replacing previously registered manifest handler");
                self.handlers[position] = handler;
            }
            None => {
                self.index.insert(key, self.handlers.len());
                self.handlers.push(handler);
            }
        }
    }

    /// Get the handler owning `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn ManifestHandler> {
        self.index
            .get(key)
            .and_then(|&position| self.handlers.get(position))
            .map(|handler| handler.as_ref())
    }

    /// Check if a handler is registered for a key.
    #[must_use]
    pub fn has_handler(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn ManifestHandler> {
        self.handlers.iter().map(|handler| handler.as_ref())
    }

    /// All registered keys in registration order.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<&str> {
        self.handlers.iter().map(|handler| handler.key()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Order handlers so that every handler comes after its prerequisites.
    ///
    /// Returns positions into registration order. Among handlers whose
    /// prerequisites are satisfied, the earliest registered goes first.
    /// Prerequisites on keys that nobody registered do not constrain the
    /// order.
    ///
    /// # Errors
    /// Returns `ManifestError::PrerequisiteCycle` naming the handlers that
    /// could not be ordered.
    pub fn validation_order(&self) -> Result<Vec<usize>> {
        let count = self.handlers.len();
        let mut pending = vec![0_usize; count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];

        for (position, handler) in self.handlers.iter().enumerate() {
            for prerequisite in handler.prerequisite_keys() {
                match self.index.get(*prerequisite) {
                    Some(&required) => {
                        pending[position] += 1;
                        dependents[required].push(position);
                    }
                    None => tracing::debug!(
                        key = %handler.key(),
                        prerequisite = %prerequisite,
                        "Prerequisite has no registered handler"
                    ),
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..count).filter(|&p| pending[p] == 0).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(position) = ready.pop_front() {
            order.push(position);
            for &dependent in &dependents[position] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    insert_sorted(&mut ready, dependent);
                }
            }
        }

        if order.len() < count {
            let keys = (0..count)
                .filter(|p| pending[*p] > 0)
                .map(|p| self.handlers[p].key().to_string())
                .collect();
            return Err(ManifestError::PrerequisiteCycle { keys });
        }

        Ok(order)
    }
}

fn insert_sorted(queue: &mut VecDeque<usize>, position: usize) {
    let at = queue.partition_point(|&queued| queued < position);
    queue.insert(at, position);
}

impl Default for ManifestHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
