//! # resource-client
//!
//! A generic CRUD client for REST-like JSON APIs, with loading/error/success
//! state designed to back a UI layer.
//!
//! A [`ResourceClient`] is bound to a base URL and a resource path and
//! exposes six operations: `list`, `find`, `create`, `replace`,
//! `partial_update` and `delete`. Each operation resets the observable
//! state, raises its busy flag, dispatches one HTTP request, and commits
//! either the result or an error.
//!
//! ## Reading state
//!
//! ```ignore
//! use resource_client::ResourceClient;
//!
//! let mut posts: ResourceClient<Post> =
//!     ResourceClient::new("https://api.example.com", "posts")?
//!         .with_unwrap_key("hydra:member");
//!
//! posts.list_with(&[("page", "2")]).await;
//!
//! if let Some(error) = posts.error() {
//!     eprintln!("{error}");
//! } else {
//!     render(posts.items());
//! }
//! ```
//!
//! ## Authenticated transport
//!
//! The transport attaches `Accept: application/json, application/ld+json`
//! to every request and resolves the bearer token per request through a
//! [`TokenProvider`]:
//!
//! ```ignore
//! use resource_client::{ResourceClient, Transport};
//!
//! let transport = Transport::new()
//!     .with_token_provider(move || session.current_token());
//!
//! let mut posts: ResourceClient<Post> =
//!     ResourceClient::new("https://api.example.com", "posts")?
//!         .with_transport(transport);
//! ```
//!
//! ## Errors
//!
//! Unexpected status codes and transport failures land in the same
//! observable slot as one tagged [`Error`]: `Protocol { status, message }`
//! for the former, cause-preserving variants for the latter. Busy flags are
//! always cleared after settlement, so the UI is never left in-flight.

pub mod client;
pub mod error;
pub mod state;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::ResourceClient;
pub use error::Error;
pub use state::{Category, RequestState};
pub use transport::{StaticToken, TokenProvider, Transport};
pub use types::{ApiRequest, ApiResponse, RequestBody, ACCEPT_TYPES, LD_JSON, MERGE_PATCH_JSON};
