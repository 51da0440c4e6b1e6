//! Search index records.

use serde::{Deserialize, Serialize};

/// Search record for one rendered page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub lang: String,
    /// Plaintext of the page body.
    pub text: String,
    /// Public URL of the page.
    pub path: String,
    pub title: String,
    /// Metabox keywords followed by front matter keywords.
    pub keywords: Vec<String>,
}
