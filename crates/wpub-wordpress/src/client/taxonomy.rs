//! Tag and category operations for WordPress API.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use tracing::{debug, info};

use super::WordPressClient;
use crate::error::WordPressError;
use crate::terms::{numeric_id, term_slug};
use crate::transport::{HttpRequest, Transport};
use crate::types::{CreatedTermResponse, TaxonomyTerm, TermKind, TermRecord};

/// Query-string unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

impl<T: Transport> WordPressClient<T> {
    /// Resolve a term name to its ID, creating the term if needed.
    ///
    /// A purely numeric category is taken as an ID without any request;
    /// one too large for an ID fails without a request too.
    /// Otherwise the term is searched and matched by exact, case-insensitive
    /// name; when no candidate matches it is created.
    pub fn resolve_term(&self, name: &str, kind: TermKind) -> Result<TaxonomyTerm, WordPressError> {
        if kind == TermKind::Category
            && let Some(parsed) = numeric_id(name)
        {
            let id = parsed.map_err(|source| WordPressError::InvalidId {
                value: name.to_owned(),
                source,
            })?;
            debug!("Using category ID {} as given", id);
            return Ok(TaxonomyTerm {
                name: name.to_owned(),
                id,
                kind,
            });
        }

        if let Some(term) = self.find_term(name, kind)? {
            info!("Found {} '{}' (id={})", kind, name, term.id);
            return Ok(term);
        }

        self.create_term(name, kind)
    }

    /// Find an existing term by exact, case-insensitive name.
    ///
    /// The search endpoint matches substrings, so candidates are filtered
    /// again here. A failed or unparsable search yields `None`.
    pub fn find_term(
        &self,
        name: &str,
        kind: TermKind,
    ) -> Result<Option<TaxonomyTerm>, WordPressError> {
        let url = format!(
            "{}/{}?search={}",
            self.api_url(),
            kind.endpoint(),
            utf8_percent_encode(name, QUERY_ENCODE_SET)
        );

        info!("Searching {} '{}'", kind, name);

        let response = self.send(HttpRequest::get(url))?;
        if response.status != 200 {
            debug!(
                "Search for {} '{}' returned {}, treating as no match",
                kind, name, response.status
            );
            return Ok(None);
        }

        let candidates: Vec<TermRecord> = response.json().unwrap_or_else(|e| {
            debug!("Unparsable {} search response: {}", kind, e);
            Vec::new()
        });

        let wanted = name.to_lowercase();
        Ok(candidates
            .into_iter()
            .filter(|c| c.name.to_lowercase() == wanted)
            .find_map(|c| c.id)
            .map(|id| TaxonomyTerm {
                name: name.to_owned(),
                id,
                kind,
            }))
    }

    /// Create a term with a slug derived from its name.
    pub fn create_term(&self, name: &str, kind: TermKind) -> Result<TaxonomyTerm, WordPressError> {
        let url = format!("{}/{}", self.api_url(), kind.endpoint());
        let payload = json!({
            "name": name,
            "slug": term_slug(name),
        });

        info!("Creating {} '{}'", kind, name);

        let request = HttpRequest::post(url, serde_json::to_vec(&payload)?)
            .header("Content-Type", "application/json");
        let response = self.send(request)?;

        if !response.is_success() {
            return Err(response.into_error());
        }

        let id = response
            .json::<CreatedTermResponse>()
            .ok()
            .and_then(|r| r.id)
            .ok_or_else(|| WordPressError::MissingField {
                field: "id",
                body: response.text(),
            })?;

        info!("Created {} '{}' (id={})", kind, name, id);
        Ok(TaxonomyTerm {
            name: name.to_owned(),
            id,
            kind,
        })
    }
}
