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

use std::collections::{BTreeMap, BTreeSet};

use super::{
    codec::PhoneObjectCodec,
    errors::{AdapterError, ParseFailure},
    formatter::{FormatOptions, FormatterFacade},
    oracle::NumberingPlanOracle,
    phone_object::PhoneObject,
    registry::MetadataRegistry,
    session::IncrementalFormatterSession,
    validation::{ValidationClassifier, ValidationOutcome},
};
use crate::phonenumberutil::MetadataBundle;

/// Phone-object operations over one set of loaded metadata.
///
/// Every operation other than loading fails with
/// [`AdapterError::MetadataNotLoaded`] until [`PhoneObjectUtil::load_metadata`]
/// or [`PhoneObjectUtil::load_metadata_with_oracle`] has succeeded. Region
/// arguments accept legacy codes such as `"UK"`.
///
/// ```ignore
/// let util = PhoneObjectUtil::new();
/// util.load_metadata(MetadataBundle::from_bytes(&bytes)?)?;
/// let phone = util.parse_phone_number("+44 20 1234 5678", "US")??;
/// assert_eq!(phone.country_code, "44");
/// ```
#[derive(Default)]
pub struct PhoneObjectUtil {
    registry: MetadataRegistry,
}

impl PhoneObjectUtil {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads metadata and builds the bundled numbering-plan engine for it.
    pub fn load_metadata(&self, bundle: MetadataBundle) -> Result<(), AdapterError> {
        self.registry.load(bundle)
    }

    pub fn load_metadata_with_oracle(
        &self,
        bundle: MetadataBundle,
        oracle: Box<dyn NumberingPlanOracle>,
    ) -> Result<(), AdapterError> {
        self.registry.load_with_oracle(bundle, oracle)
    }

    pub fn is_ready(&self) -> bool {
        self.registry.is_ready()
    }

    pub fn country_code_to_region_code_map(
        &self,
    ) -> Result<&BTreeMap<i32, Vec<String>>, AdapterError> {
        self.registry.country_code_to_region_code_map()
    }

    pub fn get_country_code_for_region(&self, region_code: &str) -> Result<i32, AdapterError> {
        self.registry.country_code_for_region(region_code)
    }

    pub fn get_supported_regions(&self) -> Result<&BTreeSet<String>, AdapterError> {
        self.registry.supported_regions()
    }

    /// Formats a phone object in `options.style`: `e164`, `international`,
    /// `national` or `rfc3966`.
    pub fn format_phone_number(
        &self,
        phone_object: &PhoneObject,
        options: &FormatOptions,
    ) -> Result<String, AdapterError> {
        let loaded = self.registry.require_ready()?;
        FormatterFacade::new(loaded).format(phone_object, options)
    }

    pub fn validate_phone_number(
        &self,
        phone_object: &PhoneObject,
        region_code: &str,
    ) -> Result<ValidationOutcome, AdapterError> {
        let loaded = self.registry.require_ready()?;
        let region_code = loaded.resolve_region(region_code)?;
        let phone_number = PhoneObjectCodec::new(loaded.oracle()).to_canonical(phone_object)?;
        Ok(ValidationClassifier::new(loaded.oracle()).classify(&phone_number, region_code))
    }

    /// The outer result reports misuse (no metadata, unsupported region); the
    /// inner one whether `text` could be read as a number.
    pub fn parse_phone_number(
        &self,
        text: &str,
        region_code: &str,
    ) -> Result<Result<PhoneObject, ParseFailure>, AdapterError> {
        let loaded = self.registry.require_ready()?;
        FormatterFacade::new(loaded).parse(text, region_code)
    }

    /// `type_key` is one of `FIXED_LINE`, `MOBILE`, `TOLL_FREE`, ...; unknown
    /// keys ask for any example of the region.
    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        type_key: &str,
    ) -> Result<Option<PhoneObject>, AdapterError> {
        let loaded = self.registry.require_ready()?;
        FormatterFacade::new(loaded).example_number(region_code, type_key)
    }

    pub fn get_as_you_type_formatter(
        &self,
        region_code: &str,
    ) -> Result<IncrementalFormatterSession<'_>, AdapterError> {
        let loaded = self.registry.require_ready()?;
        IncrementalFormatterSession::create(loaded, region_code)
    }
}
