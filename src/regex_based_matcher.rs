// Copyright (C) 2009 The Libphonenumber Authors
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

use log::error;

use super::regex_util::{RegexConsume, RegexFullMatch};
use crate::{
    interfaces,
    proto_gen::phonemetadata::PhoneNumberDesc,
    regexp_cache::{InvalidRegexError, RegexCache},
};

/// Matches national numbers against metadata patterns, sharing the compiled
/// patterns with the rest of the engine.
pub struct RegexBasedMatcher {
    cache: Arc<RegexCache>,
}

impl RegexBasedMatcher {
    pub fn new(cache: Arc<RegexCache>) -> Self {
        Self { cache }
    }

    fn match_number(
        &self,
        phone_number: &str,
        number_pattern: &str,
        allow_prefix_match: bool,
    ) -> Result<bool, InvalidRegexError> {
        if allow_prefix_match {
            let regexp = self.cache.get_regex(number_pattern)?;
            Ok(regexp.matches_start(phone_number))
        } else {
            let regexp = self.cache.get_full_match_regex(number_pattern)?;
            Ok(regexp.full_match(phone_number))
        }
    }
}

impl interfaces::MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool {
        let national_number_pattern = number_desc.national_number_pattern();
        // We don't want to consider it a prefix match when matching non-empty input
        // against an empty pattern.
        if national_number_pattern.is_empty() {
            return false;
        }
        match self.match_number(number, national_number_pattern, allow_prefix_match) {
            Ok(res) => res,
            Err(err) => {
                error!("Invalid regex! {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RegexBasedMatcher;
    use crate::{
        interfaces::MatcherApi, proto_gen::phonemetadata::PhoneNumberDesc,
        regexp_cache::RegexCache,
    };

    fn desc(pattern: &str) -> PhoneNumberDesc {
        let mut desc = PhoneNumberDesc::new();
        desc.set_national_number_pattern(pattern.to_owned());
        desc
    }

    #[test]
    fn matches_whole_number_or_prefix() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::with_capacity(4)));
        let us = desc(r"[2-9]\d{9}");
        assert!(matcher.match_national_number("6502530000", &us, false));
        assert!(!matcher.match_national_number("650253", &us, false));
        assert!(!matcher.match_national_number("650253000011", &us, false));
        assert!(matcher.match_national_number("650253000011", &us, true));
    }

    #[test]
    fn empty_pattern_never_matches() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::with_capacity(4)));
        assert!(!matcher.match_national_number("", &PhoneNumberDesc::new(), true));
    }

    #[test]
    fn broken_pattern_does_not_match() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::with_capacity(4)));
        assert!(!matcher.match_national_number("123", &desc("(\\d"), false));
    }
}
