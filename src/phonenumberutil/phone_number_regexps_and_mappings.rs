// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
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

use std::{collections::HashMap, sync::Arc};

use regex::Regex;

use crate::{
    phonenumberutil::{
        helper_constants::{
            CAPTURE_UP_TO_SECOND_NUMBER_START, DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, STAR_SIGN,
            VALID_ALPHA, VALID_PUNCTUATION,
        },
        helper_functions::create_extn_pattern,
    },
    regexp_cache::RegexCache,
};

pub(super) struct PhoneNumberRegExpsAndMappings {
    /// Compiled metadata patterns, shared with the matcher.
    pub regexp_cache: Arc<RegexCache>,

    /// These mappings map a character (key) to a specific digit that should
    /// replace it for normalization purposes.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Regular expression of acceptable characters that may start a phone number
    /// for the purposes of parsing. This allows us to strip away meaningless
    /// prefixes to phone numbers that may be mistakenly given to us. This consists
    /// of digits and the plus symbol.
    pub valid_start_char_pattern: Regex,

    /// Regular expression of valid characters before a marker that might indicate
    /// a second number.
    pub capture_up_to_second_number_start_pattern: Regex,

    /// Regular expression of trailing characters that we want to remove. We remove
    /// all characters that are not alpha or numerical characters. The hash
    /// character is retained here, as it may signify the previous block was an
    /// extension.
    pub unwanted_end_char_pattern: Regex,

    /// Regular expression of groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// Regexp of all known extension prefixes used by different regions followed
    /// by 1 or more valid digits, for use when parsing.
    pub extn_pattern: Regex,

    /// Viable phone number, optionally followed by an extension.
    ///
    /// `[digits]{minLengthNsn}|
    /// plus_sign*(([punctuation]|[star])*[digits]){3,}
    /// ([punctuation]|[star]|[digits]|[alpha])*`
    ///
    /// The second expression restricts the number of digits to three or
    /// more, but then allows them to be in international form, and to have
    /// alpha-characters and punctuation.
    pub valid_phone_number_pattern: Regex,

    /// We use this pattern to check if the phone number has at least three letters
    /// in it - if so, then we treat it as a number where some phone-number digits
    /// are represented by letters.
    pub valid_alpha_phone_pattern: Regex,

    /// The first group of a formatting rule. `\d` rather than `1` because some
    /// countries do not use the first group in the national pattern.
    pub first_group_capturing_pattern: Regex,

    pub plus_chars_pattern: Regex,

    /// A format is eligible for the as-you-type formatter when its format
    /// string only holds `$N` groups separated by valid punctuation. This keeps
    /// e.g. the star in Israeli star numbers out of the output.
    pub is_format_eligible_as_you_type_formatting_regex: Regex,

    /// Whether a national prefix formatting rule only holds the first group,
    /// i.e. does not start with the national prefix. Unbalanced parentheses
    /// are allowed.
    pub formatting_rule_has_first_group_only_regex: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn alpha_phone_mappings() -> HashMap<char, char> {
        // IMPORTANT: only uppercase letters like in Java version
        const KEYPAD: [(&str, char); 8] = [
            ("ABC", '2'),
            ("DEF", '3'),
            ("GHI", '4'),
            ("JKL", '5'),
            ("MNO", '6'),
            ("PQRS", '7'),
            ("TUV", '8'),
            ("WXYZ", '9'),
        ];
        let mut mappings = HashMap::with_capacity(36);
        for (letters, digit) in KEYPAD {
            mappings.extend(letters.chars().map(|letter| (letter, digit)));
        }
        mappings.extend(('0'..='9').map(|d| (d, d)));
        mappings
    }

    pub fn new(regexp_cache: Arc<RegexCache>) -> Result<Self, regex::Error> {
        let extn_patterns_for_parsing = create_extn_pattern();
        let valid_phone_number = format!(
            // 2-digits pattern moved to an end to match full number first
            "[{}]*(?:[{}{}]*[{}]){{3,}}[{}{}{}{}]*|[{}]{{{}}}",
            PLUS_CHARS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_ALPHA,
            DIGITS,
            MIN_LENGTH_FOR_NSN,
        );

        Ok(Self {
            regexp_cache,
            alpha_phone_mappings: Self::alpha_phone_mappings(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS))?,
            capture_up_to_second_number_start_pattern: Regex::new(
                CAPTURE_UP_TO_SECOND_NUMBER_START,
            )?,
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]")?,
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION))?,
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing))?,
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                &valid_phone_number, &extn_patterns_for_parsing
            ))?,
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*")?,
            first_group_capturing_pattern: Regex::new("(\\$\\d)")?,
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS))?,
            is_format_eligible_as_you_type_formatting_regex: Regex::new(&format!(
                "^[{}]*\\$1[{}]*(\\$\\d[{}]*)*$",
                VALID_PUNCTUATION, VALID_PUNCTUATION, VALID_PUNCTUATION
            ))?,
            formatting_rule_has_first_group_only_regex: Regex::new("^\\(?\\$1\\)?$")?,
        })
    }
}
