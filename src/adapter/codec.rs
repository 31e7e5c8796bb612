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

use super::{
    errors::AdapterError,
    oracle::NumberingPlanOracle,
    phone_object::{NationalNumber, PhoneObject},
};
use crate::proto_gen::phonenumber::PhoneNumber;

/// Converts between [`PhoneObject`] and the engine's [`PhoneNumber`].
///
/// A leading zero of a string national number survives the trip only for
/// calling codes where the oracle says it is significant; elsewhere it is a
/// trunk prefix and is dropped.
pub struct PhoneObjectCodec<'a> {
    oracle: &'a dyn NumberingPlanOracle,
}

impl<'a> PhoneObjectCodec<'a> {
    pub fn new(oracle: &'a dyn NumberingPlanOracle) -> Self {
        Self { oracle }
    }

    pub fn to_canonical(&self, phone_object: &PhoneObject) -> Result<PhoneNumber, AdapterError> {
        let country_code = parse_country_code(&phone_object.country_code)?;
        let mut phone_number = PhoneNumber::new();
        phone_number.set_country_code(country_code);

        match &phone_object.national_number {
            NationalNumber::Digits(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AdapterError::PhoneObjectInvalid(format!(
                        "nationalNumber {digits:?} is not a string of digits"
                    )));
                }
                let national_number = digits.parse::<u64>().map_err(|err| {
                    AdapterError::PhoneObjectInvalid(format!("nationalNumber {digits:?}: {err}"))
                })?;
                if digits.starts_with('0') && self.oracle.is_leading_zero_possible(country_code) {
                    phone_number.set_italian_leading_zero(true);
                }
                phone_number.set_national_number(national_number);
            }
            NationalNumber::Value(national_number) => {
                phone_number.set_national_number(*national_number);
            }
        }

        if let Some(extension) = &phone_object.extension {
            phone_number.set_extension(extension.clone());
        }
        Ok(phone_number)
    }

    pub fn from_canonical(&self, phone_number: Option<&PhoneNumber>) -> Option<PhoneObject> {
        phone_number.map(|phone_number| self.to_phone_object(phone_number))
    }

    pub fn to_phone_object(&self, phone_number: &PhoneNumber) -> PhoneObject {
        let mut buf = itoa::Buffer::new();
        let country_code = buf.format(phone_number.country_code()).to_owned();
        let national_number = buf.format(phone_number.national_number());
        let national_number = if phone_number.italian_leading_zero()
            && self
                .oracle
                .is_leading_zero_possible(phone_number.country_code())
        {
            fast_cat::concat_str!("0", national_number)
        } else {
            national_number.to_owned()
        };

        PhoneObject {
            country_code,
            national_number: NationalNumber::Digits(national_number),
            extension: (phone_number.has_extension() && !phone_number.extension().is_empty())
                .then(|| phone_number.extension().to_owned()),
        }
    }
}

fn parse_country_code(country_code: &str) -> Result<i32, AdapterError> {
    if country_code.is_empty() || !country_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AdapterError::PhoneObjectInvalid(format!(
            "countryCode {country_code:?} is not a string of digits"
        )));
    }
    match country_code.parse::<i32>() {
        Ok(code) if code > 0 => Ok(code),
        Ok(_) => Err(AdapterError::PhoneObjectInvalid(format!(
            "countryCode {country_code:?} is not positive"
        ))),
        Err(err) => Err(AdapterError::PhoneObjectInvalid(format!(
            "countryCode {country_code:?}: {err}"
        ))),
    }
}
