#![allow(dead_code)]

use match_emitter::{BoxError, Callback, MatchEmitter};
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Test Arguments
// ============================================================================

pub const ARG_A: i32 = 10;
pub const ARG_B: i32 = 20;

// ============================================================================
// Test Callbacks
// ============================================================================

/// A callback that does nothing.
pub fn noop() -> Callback<i32> {
    Callback::new(|_: &MatchEmitter<i32>, _: &[i32]| {})
}

/// A callback that pushes `id` onto `order` every time it runs.
pub fn order_recording(id: usize, order: &Rc<RefCell<Vec<usize>>>) -> Callback<i32> {
    let order = order.clone();
    Callback::new(move |_: &MatchEmitter<i32>, _: &[i32]| order.borrow_mut().push(id))
}

/// A callback that always fails with `message`.
pub fn failing(message: &'static str) -> Callback<i32> {
    Callback::new(move |_: &MatchEmitter<i32>, _: &[i32]| -> Result<(), BoxError> {
        Err(message.into())
    })
}

/// Install a test-writer subscriber so `tracing` output shows up on failures.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("match_emitter=trace"))
        .with_test_writer()
        .try_init();
}
