//! The two routes of the application.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DETAIL_PREFIX: &str = "/document_details/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
    #[error("Missing document id in {0}")]
    MissingDocumentId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`: gate, upload, listing, key details and chat.
    #[default]
    Home,
    /// `/document_details/:documentId`
    DocumentDetails(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Ok(Self::Home);
        }

        let Some(rest) = path.strip_prefix(DETAIL_PREFIX) else {
            return Err(RouteError::Unknown(path.to_string()));
        };
        let id = rest.trim_end_matches('/');
        if id.is_empty() || id.contains('/') {
            return Err(RouteError::MissingDocumentId(path.to_string()));
        }
        Ok(Self::DocumentDetails(id.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::DocumentDetails(id) => format!("{DETAIL_PREFIX}{id}"),
        }
    }

    pub fn document_id(&self) -> Option<&str> {
        match self {
            Self::Home => None,
            Self::DocumentDetails(id) => Some(id),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
