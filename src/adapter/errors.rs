// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use crate::phonenumberutil::errors::{InvalidMetadataError, ParseError};

#[derive(Debug, Error)]
pub enum AdapterError {
    /// An operation ran before metadata was loaded.
    #[error("Phone number metadata has not been loaded")]
    MetadataNotLoaded,
    /// Metadata is published once per registry.
    #[error("Phone number metadata has already been loaded")]
    MetadataAlreadyLoaded,
    #[error("Metadata bundle holds no regions")]
    EmptyMetadata,
    #[error("{0}")]
    InvalidMetadata(#[from] InvalidMetadataError),
    /// The region, after legacy remapping, is not in the loaded metadata.
    #[error("Unsupported region code: {0}")]
    UnsupportedRegion(String),
    #[error("Invalid format style: {}", .0.as_deref().unwrap_or("<none>"))]
    InvalidStyle(Option<String>),
    #[error("Invalid phone object: {0}")]
    PhoneObjectInvalid(String),
    #[error("{0}")]
    ParseFailure(#[from] ParseFailure),
}

/// Free text that could not be read as a phone number.
///
/// This is an expected outcome of parsing, so
/// [`crate::PhoneObjectUtil::parse_phone_number`] returns it as a value rather
/// than as an [`AdapterError`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to parse phone number: {source}")]
pub struct ParseFailure {
    #[source]
    pub source: ParseError,
}

impl ParseFailure {
    /// Diagnostic text of the underlying parse error.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

impl From<ParseError> for ParseFailure {
    fn from(source: ParseError) -> Self {
        Self { source }
    }
}

#[cfg(test)]
mod tests {
    use super::{AdapterError, ParseFailure};
    use crate::phonenumberutil::errors::ParseError;

    #[test]
    fn style_error_names_missing_style() {
        assert_eq!(
            AdapterError::InvalidStyle(None).to_string(),
            "Invalid format style: <none>"
        );
        assert_eq!(
            AdapterError::InvalidStyle(Some("fancy".to_owned())).to_string(),
            "Invalid format style: fancy"
        );
    }

    #[test]
    fn parse_failure_keeps_diagnostic() {
        let failure = ParseFailure::from(ParseError::TooShortNsn);
        assert_eq!(failure.message(), "Too short Nsn");
        let error = AdapterError::from(failure.clone());
        assert!(matches!(error, AdapterError::ParseFailure(inner) if inner == failure));
    }
}
