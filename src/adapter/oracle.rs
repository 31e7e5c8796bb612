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

use std::collections::BTreeSet;

use log::debug;

use crate::{
    phonenumberutil::{
        AsYouTypeFormatter, NumberLengthType, PhoneNumberFormat, PhoneNumberType,
        PhoneNumberUtil,
        errors::{ParseError, ValidationError},
    },
    proto_gen::phonenumber::PhoneNumber,
};

/// A stateful as-you-type formatting session handed out by an oracle.
pub trait AsYouTypeSession {
    /// Feeds one typed character and returns the full formatted text so far.
    fn input_digit(&mut self, next_char: char) -> String;
    fn clear(&mut self);
}

/// Numbering-plan knowledge the adapter relies on.
///
/// The adapter never parses, validates or formats by itself: every decision
/// about numbering plans goes through this trait. [`PhoneNumberUtil`] is the
/// implementation used by default; tests and embedders may supply their own.
/// Region codes passed in are already resolved and known to be supported.
pub trait NumberingPlanOracle: Send + Sync {
    fn parse(&self, text: &str, region_code: &str) -> Result<PhoneNumber, ParseError>;

    fn is_valid_number_for_region(&self, number: &PhoneNumber, region_code: &str) -> bool;

    /// Length-based possibility of a number against the main region of its
    /// calling code.
    fn classify_possibility(
        &self,
        number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError>;

    fn format(&self, number: &PhoneNumber, number_format: PhoneNumberFormat) -> String;

    fn example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Option<PhoneNumber>;

    /// Whether a leading zero of a national number is significant for this
    /// calling code.
    fn is_leading_zero_possible(&self, country_code: i32) -> bool;

    /// 0 when the region is unknown.
    fn country_code_for_region(&self, region_code: &str) -> i32;

    fn supported_regions(&self) -> BTreeSet<String>;

    fn as_you_type_formatter<'a>(&'a self, region_code: &str) -> Box<dyn AsYouTypeSession + 'a>;
}

impl AsYouTypeSession for AsYouTypeFormatter<'_> {
    fn input_digit(&mut self, next_char: char) -> String {
        AsYouTypeFormatter::input_digit(self, next_char)
    }

    fn clear(&mut self) {
        AsYouTypeFormatter::clear(self)
    }
}

impl NumberingPlanOracle for PhoneNumberUtil {
    fn parse(&self, text: &str, region_code: &str) -> Result<PhoneNumber, ParseError> {
        PhoneNumberUtil::parse(self, text, region_code)
    }

    fn is_valid_number_for_region(&self, number: &PhoneNumber, region_code: &str) -> bool {
        PhoneNumberUtil::is_valid_number_for_region(self, number, region_code)
    }

    fn classify_possibility(
        &self,
        number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.is_possible_number_with_reason(number)
    }

    fn format(&self, number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        PhoneNumberUtil::format(self, number, number_format)
    }

    fn example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Option<PhoneNumber> {
        self.get_example_number_for_type(region_code, number_type)
            .inspect_err(|err| {
                debug!("No example number of type {number_type:?} for {region_code}: {err}")
            })
            .ok()
    }

    fn is_leading_zero_possible(&self, country_code: i32) -> bool {
        PhoneNumberUtil::is_leading_zero_possible(self, country_code)
    }

    fn country_code_for_region(&self, region_code: &str) -> i32 {
        self.get_country_code_for_region(region_code)
    }

    fn supported_regions(&self) -> BTreeSet<String> {
        self.get_supported_regions()
    }

    fn as_you_type_formatter<'a>(&'a self, region_code: &str) -> Box<dyn AsYouTypeSession + 'a> {
        Box::new(self.get_as_you_type_formatter(region_code))
    }
}
