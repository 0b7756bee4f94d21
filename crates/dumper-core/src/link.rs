#![forbid(unsafe_code)]

//! Validated hyperlinks that can be embedded in a row.

use std::fmt;

use crate::error::{DumpError, Result};
use crate::row::ROW_WIDTH;

/// A hyperlink whose display name is spelled out inside the byte stream.
///
/// The name may carry one line break. The first line is embedded under the
/// anchor and the second line fills the row after it without one, see
/// [`crate::schedule::Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    name: String,
    url: String,
}

impl Link {
    /// Validate and build a link.
    ///
    /// Each line must be 1..=16 printable ASCII characters, there is at most
    /// one line break, and the url must be non-empty.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let url = url.into();

        let head = first_line(&name);
        if head.is_empty() {
            return Err(DumpError::EmptyName);
        }
        if !name.chars().all(|c| c == '\n' || is_printable(c)) {
            return Err(DumpError::NonAsciiName { name });
        }
        if head.len() > ROW_WIDTH {
            return Err(DumpError::NameTooLong {
                len: head.len(),
                name,
                max: ROW_WIDTH,
            });
        }
        if let Some(rest) = remainder(&name) {
            if rest.is_empty() || rest.contains('\n') {
                return Err(DumpError::MalformedRemainder { name });
            }
            if rest.len() > ROW_WIDTH {
                return Err(DumpError::NameTooLong {
                    len: rest.len(),
                    name,
                    max: ROW_WIDTH,
                });
            }
        }
        if url.trim().is_empty() {
            return Err(DumpError::EmptyUrl { name });
        }

        Ok(Self { name, url })
    }

    /// Parse a `NAME=URL` pair. The first `=` separates the two halves.
    pub fn parse(input: &str) -> Result<Self> {
        match input.split_once('=') {
            Some((name, url)) => Self::new(name, url),
            None => Err(DumpError::MalformedLink {
                input: input.to_string(),
            }),
        }
    }

    /// Full display name, line breaks included.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The part of the name that is embedded in a row.
    #[must_use]
    pub fn head(&self) -> &str {
        first_line(&self.name)
    }

    /// Byte length of [`Link::head`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.head().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head().is_empty()
    }

    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.name.contains('\n')
    }

    /// Split at the line break. Both halves keep the url.
    #[must_use]
    pub fn split_head(&self) -> (Link, Option<Link>) {
        let part = |name: &str| Link {
            name: name.to_string(),
            url: self.url.clone(),
        };
        (part(self.head()), remainder(&self.name).map(part))
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name.escape_default(), self.url)
    }
}

fn first_line(name: &str) -> &str {
    name.split('\n').next().unwrap_or_default()
}

fn remainder(name: &str) -> Option<&str> {
    name.split_once('\n').map(|(_, rest)| rest)
}

fn is_printable(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control()
}
