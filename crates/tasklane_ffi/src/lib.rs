//! FFI bindings crate for the Tasklane UI shell.

pub mod api;
