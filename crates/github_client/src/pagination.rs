//! Page-index pagination for GitHub list endpoints.
//!
//! GitHub list endpoints accept `page` and `per_page` query parameters and
//! advertise further pages through the `Link` response header. A fetch stops
//! as soon as a page comes back empty or the `Link` header has no `next`
//! relation, whichever happens first. This tolerates servers that omit the
//! header on the final non-empty page.

use http::{header::LINK, HeaderMap};

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

/// Largest page size the GitHub REST API accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based page index.
    pub page: u32,
    /// Number of records requested per page.
    pub per_page: u8,
}

impl PageCursor {
    /// Cursor at page 1 with the maximum page size.
    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: MAX_PER_PAGE,
        }
    }

    /// Moves the cursor to the following page.
    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Appends the cursor as query parameters to an endpoint path.
    pub fn apply_to(&self, endpoint: &str) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{endpoint}{separator}page={}&per_page={}",
            self.page, self.per_page
        )
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first()
    }
}

/// How logins are stored when a page is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginCase {
    /// Lower-case every login so that comparisons are case-insensitive.
    #[default]
    Lowercase,
    /// Keep logins exactly as GitHub returned them.
    Preserve,
}

impl LoginCase {
    pub fn apply(&self, login: &str) -> String {
        match self {
            LoginCase::Lowercase => login.to_lowercase(),
            LoginCase::Preserve => login.to_string(),
        }
    }
}

/// One entry of a `Link` header, e.g. `<https://...?page=2>; rel="next"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    pub url: String,
    pub rels: Vec<String>,
}

impl LinkRelation {
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parses an RFC 8288 `Link` header value into its entries.
///
/// Relation types are lower-cased. A `rel` parameter may list several
/// space-separated relation types. Malformed trailing input is ignored.
pub fn parse_link_header(value: &str) -> Vec<LinkRelation> {
    let mut links = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        let after_open = &rest[start + 1..];
        let Some(end) = after_open.find('>') else {
            break;
        };

        let url = &after_open[..end];
        let tail = &after_open[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = tail[..params_end].trim().trim_end_matches(',');

        let rels = params
            .split(';')
            .filter_map(|param| {
                let (key, value) = param.trim().split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("rel")
                    .then(|| value.trim().trim_matches('"'))
            })
            .flat_map(str::split_whitespace)
            .map(str::to_ascii_lowercase)
            .collect();

        links.push(LinkRelation {
            url: url.trim().to_string(),
            rels,
        });
        rest = &tail[params_end..];
    }

    links
}

/// Whether any `Link` header on the response advertises a `next` page.
pub fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(parse_link_header)
        .any(|link| link.has_rel("next"))
}
