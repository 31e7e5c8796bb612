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

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::regex_util::anchored_pattern;

#[derive(Debug, Error)]
#[error("An error occurred while trying to create regex `{pattern}`: {source}")]
pub struct InvalidRegexError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

impl PartialEq for InvalidRegexError {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Compiled metadata patterns shared between threads.
///
/// Every pattern coming from metadata is compiled at most once; the cache is
/// filled while a bundle is loaded, so lookups during parsing and formatting
/// only hit the map.
pub struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            return Ok(regex.value().clone());
        }
        let entry = self
            .cache
            .entry(pattern.to_string())
            .or_try_insert_with(|| {
                regex::Regex::new(pattern).map(Arc::new).map_err(|source| InvalidRegexError {
                    pattern: pattern.to_string(),
                    source,
                })
            })?;
        Ok(entry.value().clone())
    }

    /// Same as [`RegexCache::get_regex`] but for the anchored form of
    /// `pattern`, suitable for full matching.
    pub fn get_full_match_regex(
        &self,
        pattern: &str,
    ) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        self.get_regex(&anchored_pattern(pattern))
    }

    /// Returns the number of compiled patterns.
    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::RegexCache;

    #[test]
    fn compiles_each_pattern_once() {
        let cache = RegexCache::with_capacity(4);
        let first = cache.get_regex(r"\d{3}").unwrap();
        let second = cache.get_regex(r"\d{3}").unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reports_broken_pattern() {
        let cache = RegexCache::with_capacity(4);
        let err = cache.get_regex("(\\d").unwrap_err();
        assert_eq!(err.pattern, "(\\d");
        assert_eq!(cache.len(), 0);
    }
}
