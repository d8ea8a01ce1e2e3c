//! Stack growth for deeply nested programs.
//!
//! Both the Pratt parser and the tree-walking evaluator recurse once per
//! nesting level of the source program. Wrapping those recursion points in
//! [`ensure_sufficient_stack`] moves the work onto a freshly allocated stack
//! segment whenever the current one is nearly exhausted, so a deeply nested
//! expression such as `((((...))))` or a long chain of recursive calls does
//! not abort the host process.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
