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

use serde::{Deserialize, Deserializer, Serialize};

/// The simplified phone number exchanged with callers.
///
/// ```json
/// {"countryCode": "39", "nationalNumber": "0212345678", "extension": "12"}
/// ```
///
/// `nationalNumber` keeps any significant leading zero when it is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneObject {
    pub country_code: String,
    pub national_number: NationalNumber,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_extension"
    )]
    pub extension: Option<String>,
}

/// A national number given either as digits or as a plain integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NationalNumber {
    Digits(String),
    Value(u64),
}

impl PhoneObject {
    pub fn new(country_code: impl Into<String>, national_number: impl Into<NationalNumber>) -> Self {
        Self {
            country_code: country_code.into(),
            national_number: national_number.into(),
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

impl From<&str> for NationalNumber {
    fn from(digits: &str) -> Self {
        NationalNumber::Digits(digits.to_owned())
    }
}

impl From<String> for NationalNumber {
    fn from(digits: String) -> Self {
        NationalNumber::Digits(digits)
    }
}

impl From<u64> for NationalNumber {
    fn from(value: u64) -> Self {
        NationalNumber::Value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtensionValue {
    Text(String),
    Number(u64),
}

fn deserialize_extension<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<ExtensionValue>::deserialize(deserializer)?.map(|value| match value {
            ExtensionValue::Text(text) => text,
            ExtensionValue::Number(number) => number.to_string(),
        }),
    )
}
