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

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::{
    codec::PhoneObjectCodec,
    errors::{AdapterError, ParseFailure},
    phone_object::PhoneObject,
    registry::LoadedMetadata,
};
use crate::phonenumberutil::{PhoneNumberFormat, PhoneNumberType};

/// Output styles accepted by [`crate::PhoneObjectUtil::format_phone_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
pub enum FormatStyle {
    #[strum(serialize = "e164")]
    E164,
    #[strum(serialize = "international")]
    International,
    #[strum(serialize = "national")]
    National,
    #[strum(serialize = "rfc3966")]
    RFC3966,
}

impl FormatStyle {
    /// Style keys are exact; anything else, or no key, is an
    /// [`AdapterError::InvalidStyle`].
    pub fn from_key(key: Option<&str>) -> Result<Self, AdapterError> {
        key.and_then(|key| key.parse().ok())
            .ok_or_else(|| AdapterError::InvalidStyle(key.map(str::to_owned)))
    }
}

impl From<FormatStyle> for PhoneNumberFormat {
    fn from(style: FormatStyle) -> Self {
        match style {
            FormatStyle::E164 => PhoneNumberFormat::E164,
            FormatStyle::International => PhoneNumberFormat::International,
            FormatStyle::National => PhoneNumberFormat::National,
            FormatStyle::RFC3966 => PhoneNumberFormat::RFC3966,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub style: Option<String>,
}

impl FormatOptions {
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
        }
    }
}

/// Style-keyed formatting, example numbers and free-text parsing over the
/// loaded oracle.
pub struct FormatterFacade<'a> {
    metadata: &'a LoadedMetadata,
    codec: PhoneObjectCodec<'a>,
}

impl<'a> FormatterFacade<'a> {
    pub fn new(metadata: &'a LoadedMetadata) -> Self {
        Self {
            metadata,
            codec: PhoneObjectCodec::new(metadata.oracle()),
        }
    }

    /// Formats without validating; an invalid number is formatted as well
    /// as the metadata allows.
    pub fn format(
        &self,
        phone_object: &PhoneObject,
        options: &FormatOptions,
    ) -> Result<String, AdapterError> {
        let phone_number = self.codec.to_canonical(phone_object)?;
        let style = FormatStyle::from_key(options.style.as_deref())?;
        Ok(self.metadata.oracle().format(&phone_number, style.into()))
    }

    /// Unknown type keys ask for the region's general example.
    pub fn example_number(
        &self,
        region_code: &str,
        type_key: &str,
    ) -> Result<Option<PhoneObject>, AdapterError> {
        let region_code = self.metadata.resolve_region(region_code)?;
        let number_type = PhoneNumberType::from_key_or_unknown(type_key);
        debug!("Example number of type {number_type:?} requested for {region_code}");
        let example = self
            .metadata
            .oracle()
            .example_number_for_type(region_code, number_type);
        Ok(self.codec.from_canonical(example.as_ref()))
    }

    pub fn parse(
        &self,
        text: &str,
        region_code: &str,
    ) -> Result<Result<PhoneObject, ParseFailure>, AdapterError> {
        let region_code = self.metadata.resolve_region(region_code)?;
        Ok(self
            .metadata
            .oracle()
            .parse(text, region_code)
            .map_err(ParseFailure::from)
            .map(|phone_number| self.codec.to_phone_object(&phone_number)))
    }
}
