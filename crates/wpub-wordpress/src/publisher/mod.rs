//! Post publisher for WordPress.
//!
//! This module provides the [`Publisher`] struct that encapsulates the entire
//! workflow for publishing an image as a WordPress post:
//!
//! 1. Write the image to a local bitmap file
//! 2. Upload it to the media library
//! 3. Resolve or create tags and the category
//! 4. Assemble the HTML body
//! 5. Create the post with the upload as featured image
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wpub_config::Credentials;
//! use wpub_wordpress::{ImageTensor, PublishRequest, Publisher, SamplingParams, WordPressClient};
//!
//! let client = WordPressClient::from_config(
//!     "https://blog.example.com",
//!     &Credentials::new("admin", "app password"),
//! );
//! let publisher = Publisher::new(&client, "comfyui_output.png");
//!
//! let request = PublishRequest {
//!     title: "Sunset".to_owned(),
//!     content: "Rendered tonight.".to_owned(),
//!     tags: "sunset, sdxl".to_owned(),
//!     category: "Renders".to_owned(),
//!     metadata: String::new(),
//!     positive_prompt: "a sunset over the sea".to_owned(),
//!     negative_prompt: String::new(),
//!     params: SamplingParams::default(),
//!     embed_image: true,
//!     image: ImageTensor::new(vec![1, 64, 64, 3], vec![0.5; 64 * 64 * 3])?,
//! };
//!
//! let outcome = publisher.publish(&request)?;
//! assert!(outcome.succeeded());
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod outcome;
mod request;

pub use error::PublishError;
pub use executor::Publisher;
pub use outcome::{PublishOutcome, PublishReport, TermResolution};
pub use request::PublishRequest;
