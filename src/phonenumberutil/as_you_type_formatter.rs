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

use std::borrow::Cow;

use log::{error, trace};
use regex::NoExpand;

use super::{
    PhoneNumberFormat,
    helper_constants::{
        DIGIT_PLACEHOLDER, LONGEST_TEMPLATE_NUMBER, MIN_LEADING_DIGITS_LENGTH, PLUS_CHARS,
        PLUS_SIGN,
    },
    phonenumberutil::PhoneNumberUtil,
};
use crate::{
    proto_gen::phonemetadata::{NumberFormat, PhoneMetadata},
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

/// Formats a phone number while it is being typed, one character at a time.
///
/// A formatter is bound to the engine it was created from and to the region
/// the number is typed in. Typing a `+` as the first character switches it to
/// international mode, where the calling code is read from the digits that
/// follow. Digits that start with the region's international prefix are
/// read the same way and keep the prefix, as in `011 44 20 1234 5678`. Any
/// other character that is not a digit stops formatting, and the raw input is
/// echoed back until [`AsYouTypeFormatter::clear`] is called.
pub struct AsYouTypeFormatter<'a> {
    util: &'a PhoneNumberUtil,
    default_metadata: Option<&'a PhoneMetadata>,
    accrued_input: String,
    accrued_digits: String,
    able_to_format: bool,
    is_international: bool,
}

impl<'a> AsYouTypeFormatter<'a> {
    pub(super) fn new(util: &'a PhoneNumberUtil, region_code: &str) -> Self {
        let default_metadata = util.get_metadata_for_region(region_code);
        if default_metadata.is_none() {
            trace!("No metadata for region {region_code}, only international input is formatted");
        }
        Self {
            util,
            default_metadata,
            accrued_input: String::new(),
            accrued_digits: String::new(),
            able_to_format: true,
            is_international: false,
        }
    }

    /// Feeds the next typed character and returns the whole number formatted
    /// so far.
    pub fn input_digit(&mut self, next_char: char) -> String {
        self.accrued_input.push(next_char);
        if self.accrued_input.chars().count() == 1 && PLUS_CHARS.contains(next_char) {
            self.is_international = true;
        } else if let Some(digit) = Self::normalize_digit(next_char) {
            self.accrued_digits.push(digit);
        } else {
            trace!("Non-digit input {next_char:?}, formatting stops");
            self.able_to_format = false;
        }

        if !self.able_to_format {
            return self.accrued_input.clone();
        }
        self.attempt_to_format()
    }

    /// Forgets everything typed so far.
    pub fn clear(&mut self) {
        self.accrued_input.clear();
        self.accrued_digits.clear();
        self.able_to_format = true;
        self.is_international = false;
    }

    fn normalize_digit(next_char: char) -> Option<char> {
        if next_char.is_ascii_digit() {
            return Some(next_char);
        }
        let mut buf = [0u8; 4];
        dec_from_char::normalize_decimals(next_char.encode_utf8(&mut buf))
            .to_string()
            .chars()
            .next()
            .filter(|c| c.is_ascii_digit())
    }

    fn attempt_to_format(&self) -> String {
        if self.is_international {
            return self.format_international("", &self.accrued_digits);
        }
        let Some(metadata) = self.default_metadata else {
            return self.accrued_digits.clone();
        };
        if let Some(national_digits) = self.strip_international_prefix(metadata, &self.accrued_digits) {
            let idd = &self.accrued_digits[..self.accrued_digits.len() - national_digits.len()];
            return self.format_international(idd, national_digits);
        }
        let (national_prefix, national_number) =
            self.split_national_prefix(metadata, &self.accrued_digits);
        self.format_national_digits(
            metadata,
            national_number,
            PhoneNumberFormat::National,
            national_prefix,
        )
        .unwrap_or_else(|| self.accrued_digits.clone())
    }

    /// Formats digits that follow either a typed `+` (`idd` empty) or the
    /// dialled international prefix of the region, e.g. `011 44 20 1234`.
    fn format_international(&self, idd: &str, digits: &str) -> String {
        let leading: Cow<'_, str> = if idd.is_empty() {
            Cow::Borrowed(PLUS_SIGN)
        } else if digits.is_empty() {
            return idd.to_owned();
        } else {
            Cow::Owned(fast_cat::concat_str!(idd, " "))
        };

        let (country_code, national_number) = self.util.extract_country_code(digits);
        if country_code == 0 {
            return fast_cat::concat_str!(&leading, digits);
        }
        let mut buf = itoa::Buffer::new();
        let country_code_str = buf.format(country_code);
        if national_number.is_empty() {
            return fast_cat::concat_str!(&leading, country_code_str);
        }

        let region_code = self.util.get_region_code_for_country_code(country_code);
        let formatted_national_number = self
            .util
            .get_metadata_for_region_or_calling_code(country_code, region_code)
            .and_then(|metadata| {
                self.format_national_digits(
                    metadata,
                    national_number,
                    PhoneNumberFormat::International,
                    "",
                )
            });
        let formatted_national_number = formatted_national_number
            .as_deref()
            .unwrap_or(national_number);
        fast_cat::concat_str!(&leading, country_code_str, " ", formatted_national_number)
    }

    /// Returns the digits after the region's international prefix when the
    /// typed digits start with it.
    fn strip_international_prefix<'b>(
        &self,
        metadata: &PhoneMetadata,
        digits: &'b str,
    ) -> Option<&'b str> {
        let international_prefix = metadata.international_prefix();
        if international_prefix.is_empty() {
            return None;
        }
        match self.util.reg_exps.regexp_cache.get_regex(international_prefix) {
            Ok(regex) => regex
                .consume_start(digits)
                .filter(|rest| rest.len() < digits.len()),
            Err(err) => {
                error!("Invalid regex! {}", err);
                None
            }
        }
    }

    /// Splits off a typed national prefix, e.g. the trunk `0` in the UK or the
    /// `1` in the US.
    fn split_national_prefix<'b>(
        &self,
        metadata: &PhoneMetadata,
        digits: &'b str,
    ) -> (&'b str, &'b str) {
        let national_prefix_for_parsing = metadata.national_prefix_for_parsing();
        if national_prefix_for_parsing.is_empty() {
            return ("", digits);
        }
        match self
            .util
            .reg_exps
            .regexp_cache
            .get_regex(national_prefix_for_parsing)
        {
            Ok(regex) => match regex.find_start(digits) {
                Some(prefix) if prefix.end() > 0 => digits.split_at(prefix.end()),
                _ => ("", digits),
            },
            Err(err) => {
                error!("Invalid regex! {}", err);
                ("", digits)
            }
        }
    }

    /// Formats national digits with the first eligible format whose template
    /// can hold them. `None` means the digits are output as typed.
    fn format_national_digits(
        &self,
        metadata: &PhoneMetadata,
        national_number: &str,
        number_format: PhoneNumberFormat,
        national_prefix: &str,
    ) -> Option<String> {
        if national_number.len() < MIN_LEADING_DIGITS_LENGTH {
            return None;
        }
        let available_formats = if number_format == PhoneNumberFormat::International
            && !metadata.intl_number_format.is_empty()
        {
            &metadata.intl_number_format
        } else {
            &metadata.number_format
        };

        for format in available_formats {
            if !self
                .util
                .reg_exps
                .is_format_eligible_as_you_type_formatting_regex
                .is_match(format.format())
            {
                continue;
            }
            if !self.leading_digits_match(format, national_number) {
                continue;
            }
            let national_prefix_rule = if national_prefix.is_empty() {
                None
            } else {
                PhoneNumberUtil::national_prefix_formatting_rule(format, metadata)
            };
            let template = match self.formatting_template(format, national_prefix_rule.as_deref()) {
                Ok(Some(template)) => template,
                Ok(None) => continue,
                Err(err) => {
                    error!("Invalid regex! {}", err);
                    continue;
                }
            };
            let Some(formatted) = Self::fill_template(&template, national_number) else {
                trace!("Too many digits for format {}", format.pattern());
                continue;
            };

            let prefix_in_rule = national_prefix_rule.as_deref().is_some_and(|rule| {
                !self
                    .util
                    .reg_exps
                    .formatting_rule_has_first_group_only_regex
                    .is_match(rule)
            });
            if !national_prefix.is_empty() && !prefix_in_rule {
                return Some(fast_cat::concat_str!(national_prefix, " ", &formatted));
            }
            return Some(formatted);
        }
        None
    }

    fn leading_digits_match(&self, format: &NumberFormat, national_number: &str) -> bool {
        let Some(last_index) = format.leading_digits_pattern.len().checked_sub(1) else {
            return true;
        };
        // Later patterns are more detailed and need more typed digits.
        let index = (national_number.len() - MIN_LEADING_DIGITS_LENGTH).min(last_index);
        match self
            .util
            .reg_exps
            .regexp_cache
            .get_regex(&format.leading_digits_pattern[index])
        {
            Ok(regex) => regex.matches_start(national_number),
            Err(err) => {
                error!("Invalid regex! {}", err);
                false
            }
        }
    }

    /// Builds a template such as `(\u{2008}\u{2008}\u{2008}) \u{2008}...` by
    /// formatting the longest number the pattern accepts.
    fn formatting_template(
        &self,
        format: &NumberFormat,
        national_prefix_rule: Option<&str>,
    ) -> Result<Option<String>, InvalidRegexError> {
        let pattern = self.util.reg_exps.regexp_cache.get_regex(format.pattern())?;
        let Some(longest_phone_number) = pattern.find(LONGEST_TEMPLATE_NUMBER) else {
            return Ok(None);
        };

        let mut number_format = Cow::Borrowed(format.format());
        if let Some(rule) = national_prefix_rule {
            number_format = Cow::Owned(
                self.util
                    .reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format, NoExpand(rule))
                    .into_owned(),
            );
        }
        let template = pattern.replace_all(longest_phone_number.as_str(), number_format.as_ref());
        Ok(Some(
            template
                .chars()
                .map(|c| if c == '9' { DIGIT_PLACEHOLDER } else { c })
                .collect(),
        ))
    }

    /// Puts digits into the template placeholders and cuts the template after
    /// the last digit. `None` when the digits do not fit.
    fn fill_template(template: &str, digits: &str) -> Option<String> {
        let mut digits = digits.chars().peekable();
        let mut formatted = String::with_capacity(template.len());
        let mut pending_literals = String::new();
        for template_char in template.chars() {
            if digits.peek().is_none() {
                break;
            }
            if template_char == DIGIT_PLACEHOLDER {
                formatted.push_str(&pending_literals);
                pending_literals.clear();
                formatted.push(digits.next()?);
            } else {
                pending_literals.push(template_char);
            }
        }
        digits.peek().is_none().then_some(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::AsYouTypeFormatter;

    #[test]
    fn fills_template_up_to_last_digit() {
        let template = "(\u{2008}\u{2008}\u{2008}) \u{2008}\u{2008}\u{2008}-\u{2008}\u{2008}\u{2008}\u{2008}";
        assert_eq!(
            AsYouTypeFormatter::fill_template(template, "650").as_deref(),
            Some("(650")
        );
        assert_eq!(
            AsYouTypeFormatter::fill_template(template, "6502").as_deref(),
            Some("(650) 2")
        );
        assert_eq!(
            AsYouTypeFormatter::fill_template(template, "6502530000").as_deref(),
            Some("(650) 253-0000")
        );
        assert_eq!(AsYouTypeFormatter::fill_template(template, "65025300001"), None);
    }

    #[test]
    fn normalizes_wide_digits() {
        assert_eq!(AsYouTypeFormatter::normalize_digit('7'), Some('7'));
        assert_eq!(AsYouTypeFormatter::normalize_digit('-'), None);
    }
}
