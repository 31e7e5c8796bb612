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

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use log::{debug, trace, warn};
use regex::NoExpand;

use super::{
    as_you_type_formatter::AsYouTypeFormatter,
    errors::{
        ExtractNumberError, GetExampleNumberError, InvalidMetadataError, NotANumberError,
        ParseError, ParseErrorInternal, ValidationError,
    },
    helper_constants::{
        DEFAULT_EXTN_PREFIX, MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
        MIN_LENGTH_FOR_NSN, REGION_CODE_FOR_NON_GEO_ENTITY, RFC3966_EXTN_PREFIX,
    },
    helper_functions::{
        self, get_number_desc_by_type, metadata_patterns, normalize_helper,
        prefix_number_with_country_calling_code, test_number_length_with_unknown_type,
    },
    helper_types::{CountryCodeSource, PhoneNumberWithCountryCodeSource},
    metadata_bundle::MetadataBundle,
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
    NumberLengthType, PhoneNumberFormat, PhoneNumberType,
};
use crate::{
    i18n,
    interfaces::MatcherApi,
    proto_gen::{
        phonemetadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc},
        phonenumber::PhoneNumber,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{RegexConsume, RegexFullMatch},
    regexp_cache::{InvalidRegexError, RegexCache},
    string_util::strip_cow_prefix,
};

/// Numbering-plan engine built from a [`MetadataBundle`].
///
/// Every pattern of the bundle is compiled while the engine is built, so
/// parsing and formatting never meet a broken metadata pattern afterwards.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(super) reg_exps: PhoneNumberRegExpsAndMappings,

    /// A mapping from a country calling code to the regions sharing it, main
    /// region first. Sorted by calling code for binary search.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,
}

impl PhoneNumberUtil {
    pub fn from_bundle(bundle: &MetadataBundle) -> Result<Self, InvalidMetadataError> {
        let entries = bundle
            .country_to_metadata
            .values()
            .chain(bundle.non_geographical_metadata.values());

        let regexp_cache = Arc::new(RegexCache::with_capacity(
            bundle.country_to_metadata.len() * 32,
        ));
        for metadata in entries {
            for pattern in metadata_patterns(metadata) {
                regexp_cache
                    .get_regex(pattern)
                    .and_then(|_| regexp_cache.get_full_match_regex(pattern))
                    .map_err(|source| InvalidMetadataError::InvalidPattern {
                        region: metadata.id().to_owned(),
                        source,
                    })?;
            }
        }
        debug!("Compiled {} metadata patterns", regexp_cache.len());

        // Sorted by calling code, as the BTreeMap is.
        let country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)> = bundle
            .country_code_to_region_code_map
            .iter()
            .map(|(code, regions)| (*code, regions.clone()))
            .collect();

        Ok(Self {
            matcher_api: Box::new(RegexBasedMatcher::new(regexp_cache.clone())),
            reg_exps: PhoneNumberRegExpsAndMappings::new(regexp_cache)?,
            country_calling_code_to_region_code_map,
            region_to_metadata_map: bundle.country_to_metadata.clone(),
            country_code_to_non_geographical_metadata_map: bundle
                .non_geographical_metadata
                .clone(),
        })
    }

    /// Geographical regions the engine holds metadata for.
    pub fn get_supported_regions(&self) -> BTreeSet<String> {
        self.region_to_metadata_map.keys().cloned().collect()
    }

    /// Returns the country calling code for a region, or 0 when the region is
    /// unknown.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return 0;
        };
        metadata.country_code()
    }

    /// Whether national numbers of this calling code keep a significant leading
    /// zero (Italy being the well-known case).
    pub fn is_leading_zero_possible(&self, country_calling_code: i32) -> bool {
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
            .is_some_and(|metadata| metadata.leading_zero_possible())
    }

    pub(super) fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    pub(super) fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    pub(super) fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. Ensure the number of leading zeros is at least 0 so we
        // don't crash in the case of malicious input.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(phone_number.number_of_leading_zeros().max(0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        fast_cat::concat_str!(&zeros_start, national_number)
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub(super) fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .and_then(|regions| regions.first())
            .map(|region| region.as_str())
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    fn get_region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Option<&[String]> {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .ok()
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
    }

    pub(super) fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.country_code_to_non_geographical_metadata_map
                .get(&country_calling_code)
        } else {
            self.region_to_metadata_map.get(region_code)
        }
    }

    fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    // ---------------------------------------------------------------------
    // Formatting
    // ---------------------------------------------------------------------

    /// Formats a phone number in the specified format using default rules.
    ///
    /// Numbers with an unknown calling code are returned as their bare
    /// national significant number, except in E164 which needs no metadata.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        self.format_helper(phone_number, number_format)
            .unwrap_or_else(|err| {
                panic!("A valid regex is expected in metadata; this indicates a library bug! {err}")
            })
    }

    fn format_helper(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Result<String, InvalidRegexError> {
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = Self::get_national_significant_number(phone_number);

        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            // Extensions are not formatted.
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }
        if !self.has_valid_country_calling_code(country_calling_code) {
            trace!("Unknown calling code {country_calling_code}, returning the bare number");
            return Ok(formatted_number);
        }
        // Formatting rules of regions sharing a calling code live in the main
        // region, e.g. US for all NANPA regions.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(formatted_number);
        };

        if let Cow::Owned(s) = self.format_nsn(&formatted_number, metadata, number_format)? {
            formatted_number = s;
        }
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, number_format)
        {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    fn format_nsn<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        match self.choose_formatting_pattern_for_number(available_formats, number)? {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(number, formatting_pattern, metadata, number_format)
            }
            None => Ok(Cow::Borrowed(number)),
        }
    }

    fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Result<Option<&'b NumberFormat>, InvalidRegexError> {
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(last) = format.leading_digits_pattern.last() {
                let leading_digits = self.reg_exps.regexp_cache.get_regex(last)?;
                if !leading_digits.matches_start(national_number) {
                    continue;
                }
            }
            let pattern_to_match = self
                .reg_exps
                .regexp_cache
                .get_full_match_regex(format.pattern())?;
            if pattern_to_match.full_match(national_number) {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    /// Expands `$NP` and `$FG` in a national prefix formatting rule. Returns
    /// `None` when the rule needs a national prefix the region does not have.
    pub(super) fn national_prefix_formatting_rule<'b>(
        formatting_pattern: &'b NumberFormat,
        metadata: &PhoneMetadata,
    ) -> Option<Cow<'b, str>> {
        let rule = formatting_pattern.national_prefix_formatting_rule();
        if rule.is_empty() {
            return None;
        }
        if !rule.contains('$') || !(rule.contains("$NP") || rule.contains("$FG")) {
            return Some(Cow::Borrowed(rule));
        }
        let national_prefix = metadata.national_prefix();
        if rule.contains("$NP") && national_prefix.is_empty() {
            return None;
        }
        Some(Cow::Owned(
            rule.replace("$NP", national_prefix).replace("$FG", "$1"),
        ))
    }

    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        if number_format == PhoneNumberFormat::National {
            if let Some(national_prefix_formatting_rule) =
                Self::national_prefix_formatting_rule(formatting_pattern, metadata)
            {
                // Apply the national_prefix_formatting_rule as the formatting_pattern
                // contains only information on how the national significant number
                // should be formatted at this point.
                number_format_rule = Cow::Owned(
                    self.reg_exps
                        .first_group_capturing_pattern
                        .replace(
                            &number_format_rule,
                            NoExpand(&national_prefix_formatting_rule),
                        )
                        .into_owned(),
                );
            }
        }

        // The anchored form keeps group numbers and rewrites the whole number.
        let pattern_to_match = self
            .reg_exps
            .regexp_cache
            .get_full_match_regex(formatting_pattern.pattern())?;
        let mut formatted_number =
            pattern_to_match.replace_all(national_number, number_format_rule.as_ref());

        if number_format == PhoneNumberFormat::RFC3966 {
            // First consume any leading punctuation, if any was present.
            if let Some(rest) = self
                .reg_exps
                .separator_pattern
                .consume_start(&formatted_number)
            {
                formatted_number = Cow::Owned(rest.to_owned());
            }
            // Then replace all separators with a "-".
            if let Cow::Owned(s) = self
                .reg_exps
                .separator_pattern
                .replace_all(&formatted_number, "-")
            {
                formatted_number = Cow::Owned(s)
            }
        }
        Ok(formatted_number)
    }

    // Returns the formatted extension of a phone number, if the phone number had an
    // extension specified else None.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return None;
        }

        let prefix = if number_format == PhoneNumberFormat::RFC3966 {
            RFC3966_EXTN_PREFIX
        } else if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    /// Whether the number is a valid number of the given region: the region
    /// must own the calling code and the national number must match one of
    /// its number types.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code && country_code != metadata.country_code()
        {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
            != PhoneNumberType::Unknown
    }

    /// Classifies the length of a number against the main region of its
    /// calling code.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: For regions that share a country calling code, like NANPA numbers,
        // we just use the rules from the default region (US in this case) since the
        // GetRegionCodeForNumber will not work if the number is possible but not
        // valid. There is in fact one country calling code (290) where the possible
        // number pattern differs between various regions (Saint Helena and Tristan
        // da Cunha), but this is handled by putting all possible lengths for any
        // country with this country calling code in the metadata for the default
        // region in this case.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length_with_unknown_type(&national_number, metadata)
    }

    fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general national number pattern"
            );
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns equal, \
                     number is fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!(
                    "Number '{national_number}': Fixed-line and mobile patterns differ, but number is \
                     still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!(
            "Number '{national_number}' type unknown - doesn't match any specific number type pattern."
        );
        PhoneNumberType::Unknown
    }

    fn is_number_matching_desc(&self, national_number: &str, number_desc: &PhoneNumberDesc) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        // very common name, so specify mod
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    // ---------------------------------------------------------------------
    // Example numbers
    // ---------------------------------------------------------------------

    /// Gets a valid number for the specified region and number type.
    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.region_to_metadata_map.get(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        let desc = get_number_desc_by_type(metadata, number_type);
        if !desc.has_example_number() {
            debug!("No example number of type {number_type:?} for region {region_code}");
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        Ok(self.parse(desc.example_number(), region_code)?)
    }

    // ---------------------------------------------------------------------
    // Parsing
    // ---------------------------------------------------------------------

    /// Parses free text into a phone number, using `default_region` when the
    /// text carries no calling code of its own.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region)
            .map_err(ParseErrorInternal::into_public)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseErrorInternal> {
        if number_to_parse.len() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLong.into());
        }
        let normalized_input = dec_from_char::normalize_decimals(number_to_parse).to_string();
        let national_number = self.extract_possible_number(&normalized_input)?;

        if !self.is_viable_phone_number(national_number) {
            trace!("The string supplied did not seem to be a phone number '{national_number}'.");
            return Err(ParseError::NotANumber(NotANumberError::NotMatchedValidNumberPattern).into());
        }

        if !self.check_region_for_parsing(national_number, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode.into());
        }

        let mut phone_number = PhoneNumber::new();
        let (national_number, extension) = self.maybe_strip_extension(national_number);
        if let Some(extension) = extension {
            phone_number.set_extension(extension);
        }

        let mut country_metadata = self.region_to_metadata_map.get(default_region);
        let (mut country_code, mut normalized_national_number) =
            match self.maybe_extract_country_code(country_metadata, national_number) {
                Err(ParseErrorInternal::FailedToParse(ParseError::InvalidCountryCode)) => {
                    // Strings like "+999 ..." may still carry a usable number once the
                    // plus sign is dropped.
                    let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(national_number)
                    else {
                        return Err(ParseError::InvalidCountryCode.into());
                    };
                    let (country_code, number) =
                        self.maybe_extract_country_code(country_metadata, rest)?;
                    if country_code == 0 {
                        return Err(ParseError::InvalidCountryCode.into());
                    }
                    (country_code, number)
                }
                result => result?,
            };

        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                country_metadata =
                    self.get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
        } else {
            // If no extracted country calling code, use the region supplied instead.
            // Note that the national number was already normalized by
            // maybe_extract_country_code.
            let Some(metadata) = country_metadata else {
                return Err(ParseError::InvalidCountryCode.into());
            };
            country_code = metadata.country_code();
        }

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn.into());
        }

        if let Some(metadata) = country_metadata {
            if let Some(potential_national_number) = self
                .maybe_strip_national_prefix_and_carrier_code(metadata, &normalized_national_number)?
            {
                // We require that the NSN remaining after stripping the national prefix
                // and carrier code be long enough to be a possible length for the region.
                // Otherwise, we don't do the stripping, since the original number could be
                // a valid short number.
                match test_number_length_with_unknown_type(&potential_national_number, metadata) {
                    Ok(NumberLengthType::IsPossibleLocalOnly)
                    | Err(ValidationError::TooShort)
                    | Err(ValidationError::InvalidLength) => {}
                    _ => normalized_national_number = potential_national_number,
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn.into());
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLongNsn.into());
        }

        Self::set_italian_leading_zeros(&normalized_national_number, &mut phone_number);
        let national_number_value = normalized_national_number
            .parse::<u64>()
            .map_err(ParseError::from)?;
        phone_number.set_national_number(national_number_value);
        phone_number.set_country_code(country_code);
        Ok(phone_number)
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// strips leading characters that could not be used to start a phone number,
    /// trailing non-alphanumerics and anything after a second-number marker.
    fn extract_possible_number<'b>(&self, phone_number: &'b str) -> Result<&'b str, ParseError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(phone_number) else {
            return Err(ExtractNumberError::NoValidStartCharacter.into());
        };
        let mut extracted_number = self.trim_unwanted_end_chars(&phone_number[start.start()..]);
        if extracted_number.is_empty() {
            return Err(ExtractNumberError::NotANumber.into());
        }

        // Now remove any extra numbers at the end.
        if let Some(first_number) = self
            .reg_exps
            .capture_up_to_second_number_start_pattern
            .captures(extracted_number)
            .and_then(|captures| captures.get(1))
        {
            extracted_number = first_number.as_str();
        }
        Ok(extracted_number)
    }

    fn trim_unwanted_end_chars<'b>(&self, phone_number: &'b str) -> &'b str {
        let mut buf = [0u8; 4];
        let mut end = phone_number.len();
        for char in phone_number.chars().rev() {
            if !self
                .reg_exps
                .unwanted_end_char_pattern
                .is_match(char.encode_utf8(&mut buf))
            {
                break;
            }
            end -= char.len_utf8();
        }
        &phone_number[..end]
    }

    fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(phone_number)
    }

    /// Checks to see that the region code used is valid, or if it is not
    /// valid, that the number to parse starts with a + symbol so that we can
    /// attempt to infer the region from the number.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        self.is_valid_region_code(default_region)
            || self.reg_exps.plus_chars_pattern.matches_start(number_to_parse)
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number and returns it.
    fn maybe_strip_extension<'b>(&self, phone_number: &'b str) -> (&'b str, Option<String>) {
        let Some(captures) = self.reg_exps.extn_pattern.captures(phone_number) else {
            return (phone_number, None);
        };
        let Some(full_match) = captures.get(0) else {
            return (phone_number, None);
        };
        let number_without_extension = &phone_number[..full_match.start()];
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(number_without_extension) {
            return (phone_number, None);
        }
        // The numbers are captured into groups in the regular expression; only
        // one of them is non-empty.
        let extension = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|group| !group.is_empty());
        match extension {
            Some(extension) => (number_without_extension, Some(extension.to_owned())),
            None => (phone_number, None),
        }
    }

    /// Tries to extract a country calling code from a number. Country calling
    /// codes are extracted in the following ways:
    ///   - by stripping the international dialing prefix of the region the person
    ///   is dialing from, if this is present in the number, and looking at the next
    ///   digits
    ///   - by stripping the '+' sign if present and then looking at the next digits
    ///   - by comparing the start of the number and the country calling code of the
    ///   default region. If the number is not considered possible for the numbering
    ///   plan of the default region initially, but starts with the country calling
    ///   code of this region, validation will be reattempted after stripping this
    ///   country calling code. If this number is considered a possible number, then
    ///   the first digits will be considered the country calling code and removed as
    ///   such.
    ///
    /// Returns 0 as the calling code when none was found, together with the
    /// normalized national number.
    fn maybe_extract_country_code(
        &self,
        default_region_metadata: Option<&PhoneMetadata>,
        number: &str,
    ) -> Result<(i32, String), ParseErrorInternal> {
        // Set the default prefix to be something that will never match if there is
        // no default region.
        let possible_country_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix())
            .unwrap_or("NonMatch");

        let PhoneNumberWithCountryCodeSource {
            phone_number: full_number,
            country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(number, possible_country_idd_prefix)?;

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                trace!("Phone number had an IDD, but after this was not long enough to be a viable phone number.");
                return Err(ParseError::TooShortAfterIdd.into());
            }
            let (country_code, national_number) = self.extract_country_code(&full_number);
            if country_code != 0 {
                return Ok((country_code, national_number.to_owned()));
            }
            // If this fails, they must be using a strange country calling code
            // that we don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode.into());
        }

        if let Some(default_region_metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for the
            // default region. If so, we remove the country calling code, and do some
            // checks on the validity of the number before and after.
            let default_country_code = default_region_metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) =
                strip_cow_prefix(Cow::Borrowed(full_number.as_str()), default_country_code_str)
            {
                let general_desc = &default_region_metadata.general_desc;
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(
                        default_region_metadata,
                        &potential_national_number,
                    )?
                    .map(Cow::Owned)
                    .unwrap_or(potential_national_number);

                // If the number was not valid before but is valid now, or if it was too
                // long before, we consider the number with the country calling code
                // stripped to be a better result and keep that instead.
                if (!self
                    .matcher_api
                    .match_national_number(&full_number, general_desc, false)
                    && self.matcher_api.match_national_number(
                        &potential_national_number,
                        general_desc,
                        false,
                    ))
                    || test_number_length_with_unknown_type(&full_number, default_region_metadata)
                        == Err(ValidationError::TooLong)
                {
                    return Ok((default_country_code, potential_national_number.into_owned()));
                }
            }
        }
        Ok((0, full_number))
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    fn maybe_strip_international_prefix_and_normalize(
        &self,
        phone_number: &str,
        possible_idd_prefix: &str,
    ) -> Result<PhoneNumberWithCountryCodeSource, InvalidRegexError> {
        if phone_number.is_empty() {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                String::new(),
                CountryCodeSource::FromDefaultCountry,
            ));
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            // Can now normalize the rest of the number since we've consumed the "+"
            // sign at the start.
            return Ok(PhoneNumberWithCountryCodeSource::new(
                self.normalize(rest),
                CountryCodeSource::FromNumberWithPlusSign,
            ));
        }

        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.reg_exps.regexp_cache.get_regex(possible_idd_prefix)?;
        let normalized_number = self.normalize(phone_number);
        if let Some(rest) = Self::parse_prefix_as_idd(&idd_pattern, &normalized_number) {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                rest.to_owned(),
                CountryCodeSource::FromNumberWithIdd,
            ));
        }
        Ok(PhoneNumberWithCountryCodeSource::new(
            normalized_number,
            CountryCodeSource::FromDefaultCountry,
        ))
    }

    /// Strips the IDD from the start of the number if present. Only strip this
    /// if the first digit after the match is not a 0, since country calling
    /// codes cannot begin with 0.
    fn parse_prefix_as_idd<'b>(idd_pattern: &regex::Regex, number: &'b str) -> Option<&'b str> {
        let rest = idd_pattern.consume_start(number)?;
        if rest.starts_with('0') {
            return None;
        }
        Some(rest)
    }

    /// Extracts country calling code from the digits of a number, returning 0
    /// and the digits untouched when none of the first digits is a known
    /// calling code.
    pub(super) fn extract_country_code<'b>(&self, full_number: &'b str) -> (i32, &'b str) {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return (0, full_number);
        }
        let max_length = MAX_LENGTH_COUNTRY_CODE.min(full_number.len());
        for length in 1..=max_length {
            let Ok(potential_country_code) = full_number[..length].parse::<i32>() else {
                break;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                return (potential_country_code, &full_number[length..]);
            }
        }
        (0, full_number)
    }

    /// Strips any national prefix (such as 0, 1) present in the number
    /// provided. Returns `None` when nothing was stripped.
    pub(super) fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        metadata: &PhoneMetadata,
        number: &str,
    ) -> Result<Option<String>, InvalidRegexError> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length or with no national prefix
            // possible.
            return Ok(None);
        }
        let national_prefix_pattern = self
            .reg_exps
            .regexp_cache
            .get_regex(possible_national_prefix)?;
        let Some(captures) = national_prefix_pattern.captures_start(number) else {
            return Ok(None);
        };
        let Some(prefix_match) = captures.get(0) else {
            return Ok(None);
        };
        let general_desc = &metadata.general_desc;
        // Check if the original number is viable.
        let is_viable_original_number =
            self.matcher_api
                .match_national_number(number, general_desc, false);
        let rest = &number[prefix_match.end()..];
        let transform_rule = metadata.national_prefix_transform_rule();
        // The last group holds the part of the number the transform rule keeps.
        let has_transform_group = captures.len() > 1
            && captures
                .get(captures.len() - 1)
                .is_some_and(|group| !group.as_str().is_empty());

        let stripped = if transform_rule.is_empty() || !has_transform_group {
            rest.to_owned()
        } else {
            let mut transformed_number = String::with_capacity(number.len());
            captures.expand(transform_rule, &mut transformed_number);
            transformed_number.push_str(rest);
            transformed_number
        };
        // If the original number was viable, and the resultant number is not,
        // we return.
        if is_viable_original_number
            && !self
                .matcher_api
                .match_national_number(&stripped, general_desc, false)
        {
            return Ok(None);
        }
        Ok(Some(stripped))
    }

    /// Normalizes a string of characters representing a phone number. Wide-ascii
    /// and arabic-indic numerals are converted to European numerals, punctuation
    /// is stripped, and letters are mapped to keypad digits when the number has
    /// at least three of them.
    pub(super) fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, phone_number)
        } else {
            Self::normalize_digits_only(phone_number)
        }
    }

    pub(super) fn normalize_digits_only(phone_number: &str) -> String {
        dec_from_char::normalize_decimals(phone_number)
            .to_string()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }

    /// A helper function to set the values related to leading zeros in a
    /// PhoneNumber.
    fn set_italian_leading_zeros(national_number: &str, phone_number: &mut PhoneNumber) {
        if national_number.len() > 1 && national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            let mut number_of_leading_zeros = 1;
            // Note that if the national number is all "0"s, the last "0" is not
            // counted as a leading zero.
            while number_of_leading_zeros < national_number.len() - 1
                && national_number.as_bytes()[number_of_leading_zeros] == b'0'
            {
                number_of_leading_zeros += 1;
            }
            if number_of_leading_zeros != 1 {
                phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }
    }

    // ---------------------------------------------------------------------
    // As-you-type formatting
    // ---------------------------------------------------------------------

    /// Returns a fresh as-you-type formatter for a region. An unknown region
    /// gives a formatter that can only format numbers typed with a `+`.
    pub fn get_as_you_type_formatter(&self, region_code: &str) -> AsYouTypeFormatter<'_> {
        AsYouTypeFormatter::new(self, region_code)
    }
}
