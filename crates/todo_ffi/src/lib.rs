//! Flutter-facing FFI surface for the to-do widget core.

pub mod api;
