//! REST client for the content-planning backend.
//!
//! [`api::ApiClient`] wraps the HTTP verbs, [`resource::Resource`] binds one
//! entity's schema to its endpoint, and [`collection::Collection`] keeps a
//! local copy of a collection that is re-fetched after every mutation.

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod resource;

pub use api::ApiClient;
pub use collection::Collection;
pub use config::ClientConfig;
pub use error::ClientError;
pub use resource::Resource;
