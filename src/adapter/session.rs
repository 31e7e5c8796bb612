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

use log::trace;

use super::{errors::AdapterError, oracle::AsYouTypeSession, registry::LoadedMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Accumulating,
}

/// As-you-type formatting for one number being typed in one region.
///
/// Sessions belong to a single caller; create one per input field.
pub struct IncrementalFormatterSession<'a> {
    inner: Box<dyn AsYouTypeSession + 'a>,
    region_code: String,
    state: SessionState,
}

impl<'a> IncrementalFormatterSession<'a> {
    pub(crate) fn create(metadata: &'a LoadedMetadata, region_code: &str) -> Result<Self, AdapterError> {
        let region_code = metadata.resolve_region(region_code)?;
        trace!("Starting as-you-type session for {region_code}");
        Ok(Self {
            inner: metadata.oracle().as_you_type_formatter(region_code),
            region_code: region_code.to_owned(),
            state: SessionState::Idle,
        })
    }

    /// Returns the whole number typed so far, formatted.
    pub fn input_digit(&mut self, next_char: char) -> String {
        self.state = SessionState::Accumulating;
        self.inner.input_digit(next_char)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.state = SessionState::Idle;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The region the session formats for, after legacy remapping.
    pub fn region_code(&self) -> &str {
        &self.region_code
    }
}
