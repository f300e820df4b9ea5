//! WordPress publishing for wpub.
//!
//! This crate provides the publish pipeline:
//! - [`WordPressClient`]: REST API client with basic authentication
//!   (media upload, tag/category lookup-or-create, post creation)
//! - [`Publisher`]: Upload + taxonomy + body assembly + post creation workflow
//! - [`assemble`]: HTML body rendering from the post fields
//! - [`ImageTensor`]: In-memory pixel buffer written to a bitmap before upload
//!
//! # API Client
//!
//! ```ignore
//! use wpub_config::Credentials;
//! use wpub_wordpress::{TermKind, WordPressClient};
//!
//! let client = WordPressClient::from_config(
//!     "https://blog.example.com",
//!     &Credentials::new("admin", "app password"),
//! );
//!
//! let term = client.resolve_term("landscapes", TermKind::Category)?;
//! println!("Category id: {}", term.id);
//! ```

// HTTP plumbing
mod auth;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod transport;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

// API client
mod client;
pub use client::WordPressClient;

// Post body
mod content;
mod params;
mod terms;
pub use content::{PostContent, assemble};
pub use params::{SamplingParams, Sampler, Scheduler, UnknownName};
pub use terms::parse_tag_list;

// Image materialization
mod bitmap;
pub use bitmap::{BITMAP_MIME, ImageTensor, materialize};

// Errors
mod error;
pub use error::{ImageError, WordPressError};

// Types
mod types;
pub use types::{CreatedPost, MediaAsset, PostDraft, TaxonomyTerm, TermKind};

// Publisher
pub mod publisher;
pub use publisher::{PublishError, PublishOutcome, PublishReport, PublishRequest, Publisher};
