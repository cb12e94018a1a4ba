//! LedgerChain - An append-only transaction ledger with hashed-digest integrity checking
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Chain structure and traversal operations
//! - [`transaction`] - Transaction record and its operations
//!
//! ## Cryptography
//! - [`crypto`] - Transaction digests (SHA-256) and verification
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod transaction;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
