//! WordPress REST API types.

mod media;
mod post;
mod term;

pub(crate) use media::MediaResponse;
pub use media::MediaAsset;
pub use post::{CreatedPost, PostDraft};
pub(crate) use term::{CreatedTermResponse, TermRecord};
pub use term::{TaxonomyTerm, TermKind};
