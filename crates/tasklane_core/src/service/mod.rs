//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slot persistence into the board-store API.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_store;
