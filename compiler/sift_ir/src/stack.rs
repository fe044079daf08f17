//! Stack growth for recursive tree walks.
//!
//! Matching, searching and rendering all recurse once per level of tree
//! nesting. Programs with very deep expression chains (long `a + b + c ...`
//! sums, generated code) would overflow the native stack, so each recursive
//! step goes through [`ensure_sufficient_stack`], which grows the stack on
//! demand with `stacker`. On wasm32 it is a plain call.

/// Grow when less than this much stack remains (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
