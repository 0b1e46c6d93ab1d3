//! Draft publishing
//!
//! The converter's output is only useful once it lands in Confluence. This
//! module defines the page-store seam ([`PageStore`]), a REST implementation
//! ([`RestClient`]), and the small amount of orchestration around them: parent
//! lookup and draft title derivation.
//!
//! Configuration always arrives as an explicit [`ClientSettings`] value; nothing
//! here reads the environment.

pub mod rest;

pub use rest::{ClientSettings, RestClient};

use crate::error::PublishError;
use tracing::{info, warn};

/// Suffix appended to derived page titles.
pub const DEFAULT_TITLE_SUFFIX: &str = " (Draft)";

/// A page about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPage<'a> {
    pub title: &'a str,
    /// Storage-format body
    pub body: &'a str,
    /// Id of the page to nest under
    pub parent_id: Option<&'a str>,
}

/// A page the store has created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPage {
    pub id: String,
    pub title: String,
    /// Browser URL of the page
    pub url: String,
}

/// Somewhere draft pages can be created and looked up by title.
///
/// Implementations are bound to one space (content container).
pub trait PageStore {
    /// Id of the first page titled `title`, if any.
    fn find_page_id(&self, title: &str) -> Result<Option<String>, PublishError>;

    /// Create a draft page. Calling twice creates two pages.
    fn create_draft(&self, draft: &DraftPage<'_>) -> Result<CreatedPage, PublishError>;
}

/// Create a draft, nested under `parent_title` when that page exists.
///
/// A parent that cannot be found, or whose lookup fails, is logged and the page
/// is created at the top level of the space instead.
pub fn publish_draft(
    store: &dyn PageStore,
    title: &str,
    body: &str,
    parent_title: Option<&str>,
) -> Result<CreatedPage, PublishError> {
    let parent_id = parent_title
        .filter(|parent| !parent.trim().is_empty())
        .and_then(|parent| resolve_parent(store, parent));

    let draft = DraftPage {
        title,
        body,
        parent_id: parent_id.as_deref(),
    };
    let page = store.create_draft(&draft)?;
    info!(id = %page.id, title = %page.title, "created draft page");
    Ok(page)
}

fn resolve_parent(store: &dyn PageStore, parent: &str) -> Option<String> {
    match store.find_page_id(parent) {
        Ok(Some(id)) => {
            info!(parent, id = %id, "found parent page");
            Some(id)
        }
        Ok(None) => {
            warn!(parent, "parent page not found, creating as top-level page");
            None
        }
        Err(err) => {
            warn!(parent, error = %err, "parent page lookup failed, creating as top-level page");
            None
        }
    }
}

/// Page title for a source file stem: dashes become spaces, every word is
/// capitalized, then `suffix` is appended.
///
/// `my-first-post` with the default suffix gives `My First Post (Draft)`.
pub fn draft_title(stem: &str, suffix: &str) -> String {
    let mut title = title_case(&stem.replace('-', " "));
    title.push_str(suffix);
    title
}

// A word starts at every letter that does not follow another letter.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
