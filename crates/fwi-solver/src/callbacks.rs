//! Named-event callback registry for the solver pipeline.
//!
//! Handlers are registered under a string event name and invoked in
//! registration order when that event fires. Dispatching an event with no
//! registered handlers is a no-op, so instrumentation stays strictly
//! optional.

use fwi_mesh::QuadMesh;
use nalgebra::DVector;
use num_complex::Complex64;
use std::collections::HashMap;

/// Fired after a solve has produced the complex field, before it is
/// returned to the caller.
pub const ON_SOLVE_COMPLETE: &str = "on_solve_complete";

/// Payload handed to `ON_SOLVE_COMPLETE` handlers.
pub struct SolveCompleted<'a> {
    /// Complex field values, one per mesh point.
    pub field: &'a DVector<Complex64>,
    /// The mesh the field was solved on.
    pub mesh: &'a QuadMesh,
    /// Angular frequency of the solve.
    pub omega: f64,
}

type Handler = Box<dyn Fn(&SolveCompleted) + Send + Sync>;

/// Event-name to handler-list map. Handlers for the same event run in the
/// order they were registered.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, Vec<Handler>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`. Multiple handlers per event are
    /// allowed and preserved in registration order.
    pub fn on<F>(&mut self, event: &str, handler: F)
    where
        F: Fn(&SolveCompleted) + Send + Sync + 'static,
    {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke every handler registered for `event`, in registration order.
    /// Unknown events are silently ignored.
    pub fn dispatch(&self, event: &str, payload: &SolveCompleted) {
        if let Some(handlers) = self.handlers.get(event) {
            for handler in handlers {
                handler(payload);
            }
        }
    }

    /// Number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwi_mesh::generators::unit_square;
    use std::sync::{Arc, Mutex};

    fn payload_on<'a>(
        mesh: &'a QuadMesh,
        field: &'a DVector<Complex64>,
    ) -> SolveCompleted<'a> {
        SolveCompleted {
            field,
            mesh,
            omega: 1.0,
        }
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mesh = unit_square(1.0, 0.0, 0.0);
        let field = DVector::from_element(4, Complex64::new(0.0, 0.0));

        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.on(ON_SOLVE_COMPLETE, move |_| {
                order.lock().unwrap().push(tag);
            });
        }

        registry.dispatch(ON_SOLVE_COMPLETE, &payload_on(&mesh, &field));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unknown_event_is_a_noop() {
        let mesh = unit_square(1.0, 0.0, 0.0);
        let field = DVector::from_element(4, Complex64::new(0.0, 0.0));
        let registry = CallbackRegistry::new();
        // No handlers at all; must not panic.
        registry.dispatch("never_registered", &payload_on(&mesh, &field));
        assert_eq!(registry.handler_count("never_registered"), 0);
    }

    #[test]
    fn handler_sees_field_and_mesh() {
        let mesh = unit_square(2.5, 0.1, 1.0);
        let field = DVector::from_element(4, Complex64::new(1.0, -2.0));

        let seen = Arc::new(Mutex::new(None));
        let mut registry = CallbackRegistry::new();
        {
            let seen = Arc::clone(&seen);
            registry.on(ON_SOLVE_COMPLETE, move |p: &SolveCompleted| {
                *seen.lock().unwrap() = Some((p.field.len(), p.mesh.n_points(), p.omega));
            });
        }

        registry.dispatch(ON_SOLVE_COMPLETE, &payload_on(&mesh, &field));
        assert_eq!(*seen.lock().unwrap(), Some((4, 4, 1.0)));
    }

    #[test]
    fn events_are_independent() {
        let mesh = unit_square(1.0, 0.0, 0.0);
        let field = DVector::from_element(4, Complex64::new(0.0, 0.0));

        let count = Arc::new(Mutex::new(0usize));
        let mut registry = CallbackRegistry::new();
        {
            let count = Arc::clone(&count);
            registry.on("other_event", move |_| {
                *count.lock().unwrap() += 1;
            });
        }

        registry.dispatch(ON_SOLVE_COMPLETE, &payload_on(&mesh, &field));
        assert_eq!(*count.lock().unwrap(), 0);

        registry.dispatch("other_event", &payload_on(&mesh, &field));
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
