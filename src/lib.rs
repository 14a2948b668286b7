//! Review-request SMS demo service.
//!
//! A small HTTP service that drafts a review-request text message with a
//! language model, forces the draft through a sanitize/validate/compose
//! pipeline so it is policy-compliant and length-bounded, and sends it
//! through the TNZ SMS gateway. Completed sends are recorded in a local
//! `SQLite` audit log.
//!
//! # Architecture
//!
//! - [`config`]: environment configuration and secret handling
//! - [`policy`]: sanitization, truncation, composition, validation
//! - [`generator`]: language-model client and prompt construction
//! - [`draft`]: the generate/validate/regenerate/compose flow
//! - [`sms`]: phone normalization and the TNZ gateway client
//! - [`storage`]: the append-only audit log
//! - [`server`]: the axum HTTP surface
//! - [`error`]: the error hierarchy

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod draft;
pub mod error;
pub mod generator;
pub mod policy;
pub mod server;
pub mod sms;
pub mod storage;
