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
use serde::Serialize;
use strum::IntoStaticStr;

use super::oracle::NumberingPlanOracle;
use crate::{
    phonenumberutil::{NumberLengthType, errors::ValidationError},
    proto_gen::phonenumber::PhoneNumber,
};

/// Why a phone object is not valid for a region. The codes returned by
/// [`InvalidReason::code`] are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidReason {
    /// The number does not belong to the region, or has a length no number
    /// of the region has.
    InvalidForRegion,
    InvalidCountryCode,
    TooLong,
    TooShort,
}

impl InvalidReason {
    pub fn code(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationOutcome {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(*reason),
        }
    }
}

/// Strict region validity first; the length-based possibility of the number
/// only explains a failure.
pub struct ValidationClassifier<'a> {
    oracle: &'a dyn NumberingPlanOracle,
}

impl<'a> ValidationClassifier<'a> {
    pub fn new(oracle: &'a dyn NumberingPlanOracle) -> Self {
        Self { oracle }
    }

    /// `region_code` must already be resolved and supported.
    pub fn classify(&self, phone_number: &PhoneNumber, region_code: &str) -> ValidationOutcome {
        if self.oracle.is_valid_number_for_region(phone_number, region_code) {
            return ValidationOutcome::Valid;
        }
        let possibility = self.oracle.classify_possibility(phone_number);
        trace!("Number is not valid for {region_code}, possibility: {possibility:?}");
        ValidationOutcome::Invalid(reason_for_possibility(possibility))
    }
}

fn reason_for_possibility(possibility: Result<NumberLengthType, ValidationError>) -> InvalidReason {
    match possibility {
        Err(ValidationError::InvalidCountryCode) => InvalidReason::InvalidCountryCode,
        Err(ValidationError::TooShort) => InvalidReason::TooShort,
        Err(ValidationError::TooLong) => InvalidReason::TooLong,
        Err(ValidationError::InvalidLength)
        | Ok(NumberLengthType::IsPossible)
        | Ok(NumberLengthType::IsPossibleLocalOnly) => InvalidReason::InvalidForRegion,
    }
}
