//! Message-shaping policy.
//!
//! This module turns an unconstrained model-generated draft into a
//! guaranteed-valid, guaranteed-bounded SMS body:
//! - [`sanitize`]: strip non-ASCII, links, opt-out artifacts, stray quotes
//! - [`truncate_to_word_boundary`]: length clamp that never splits a word
//! - [`MessagePolicy`] / [`compose`]: attach the mandatory suffix under a
//!   hard total-length budget
//! - [`looks_bad`]: reject drafts the sanitizer could not fully clean
//!
//! Each function is pure so the layers can be tested independently of any
//! network collaborator.

mod compose;
mod sanitize;
mod truncate;
mod validate;

pub use compose::{compose, MessagePolicy, PREFIX_TARGET_CAP};
pub use sanitize::sanitize;
pub use truncate::truncate_to_word_boundary;
pub use validate::{looks_bad, MAX_DRAFT_CHARS, MIN_DRAFT_CHARS};
