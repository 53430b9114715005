//! Domain types and client-side validation for the content-planning
//! dashboard.
//!
//! Everything here is pure logic with no I/O beyond reading attachment
//! files from disk: entity forms and their validation schemas, the content
//! status enum, and the reshaping helpers used when rendering collections.

pub mod attachment;
pub mod entities;
pub mod error;
pub mod listing;
pub mod rules;
pub mod schema;
pub mod status;
pub mod types;
