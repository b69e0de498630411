//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the word-mutation transaction that keeps unit scores current.

pub mod roster_service;
pub mod word_service;
