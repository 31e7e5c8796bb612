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
    collections::{BTreeMap, BTreeSet},
    sync::OnceLock,
};

use log::{debug, info, warn};

use super::{errors::AdapterError, oracle::NumberingPlanOracle, region_resolver};
use crate::{
    i18n::RegionCode,
    phonenumberutil::{MetadataBundle, PhoneNumberUtil},
};

/// Metadata published by a [`MetadataRegistry`], together with the oracle
/// built for it.
pub struct LoadedMetadata {
    region_codes: BTreeSet<String>,
    country_code_to_region_code_map: BTreeMap<i32, Vec<String>>,
    oracle: Box<dyn NumberingPlanOracle>,
}

impl LoadedMetadata {
    pub fn oracle(&self) -> &dyn NumberingPlanOracle {
        self.oracle.as_ref()
    }

    pub fn supported_regions(&self) -> &BTreeSet<String> {
        &self.region_codes
    }

    pub fn country_code_to_region_code_map(&self) -> &BTreeMap<i32, Vec<String>> {
        &self.country_code_to_region_code_map
    }

    /// Resolves a legacy code and checks the result is supported.
    pub fn resolve_region<'a>(&self, region_code: &'a str) -> Result<&'a str, AdapterError> {
        region_resolver::resolve_supported(&self.region_codes, region_code)
    }
}

/// One-shot store for numbering-plan metadata.
///
/// Nothing is visible until a load has completed, and a registry can be loaded
/// only once; later loads fail with [`AdapterError::MetadataAlreadyLoaded`].
#[derive(Default)]
pub struct MetadataRegistry {
    loaded: OnceLock<LoadedMetadata>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bundled [`PhoneNumberUtil`] engine from `bundle` and
    /// publishes both.
    pub fn load(&self, bundle: MetadataBundle) -> Result<(), AdapterError> {
        self.ensure_loadable(&bundle)?;
        let oracle = PhoneNumberUtil::from_bundle(&bundle)?;
        self.publish(bundle, Box::new(oracle))
    }

    /// Publishes `bundle` with an oracle built elsewhere.
    pub fn load_with_oracle(
        &self,
        bundle: MetadataBundle,
        oracle: Box<dyn NumberingPlanOracle>,
    ) -> Result<(), AdapterError> {
        self.ensure_loadable(&bundle)?;
        self.publish(bundle, oracle)
    }

    fn ensure_loadable(&self, bundle: &MetadataBundle) -> Result<(), AdapterError> {
        if self.is_ready() {
            return Err(AdapterError::MetadataAlreadyLoaded);
        }
        if bundle.region_codes.is_empty() {
            return Err(AdapterError::EmptyMetadata);
        }
        Ok(())
    }

    fn publish(
        &self,
        bundle: MetadataBundle,
        oracle: Box<dyn NumberingPlanOracle>,
    ) -> Result<(), AdapterError> {
        Self::warn_about_gaps(&bundle, oracle.as_ref());
        let loaded = LoadedMetadata {
            region_codes: bundle.region_codes,
            country_code_to_region_code_map: bundle.country_code_to_region_code_map,
            oracle,
        };
        let region_count = loaded.region_codes.len();
        // A concurrent load may have won since the readiness check.
        self.loaded
            .set(loaded)
            .map_err(|_| AdapterError::MetadataAlreadyLoaded)?;
        info!("Loaded phone number metadata for {region_count} regions");
        Ok(())
    }

    fn warn_about_gaps(bundle: &MetadataBundle, oracle: &dyn NumberingPlanOracle) {
        for (legacy, current) in RegionCode::LEGACY {
            if !bundle.region_codes.contains(current) {
                warn!("Legacy region {legacy} maps to {current}, which the metadata does not cover");
            }
        }
        let oracle_regions = oracle.supported_regions();
        for region_code in bundle.region_codes.difference(&oracle_regions) {
            warn!("Region {region_code} has no metadata in the numbering-plan oracle");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn require_ready(&self) -> Result<&LoadedMetadata, AdapterError> {
        self.loaded.get().ok_or(AdapterError::MetadataNotLoaded)
    }

    pub fn supported_regions(&self) -> Result<&BTreeSet<String>, AdapterError> {
        Ok(self.require_ready()?.supported_regions())
    }

    pub fn country_code_to_region_code_map(
        &self,
    ) -> Result<&BTreeMap<i32, Vec<String>>, AdapterError> {
        Ok(self.require_ready()?.country_code_to_region_code_map())
    }

    pub fn country_code_for_region(&self, region_code: &str) -> Result<i32, AdapterError> {
        let loaded = self.require_ready()?;
        let region_code = loaded.resolve_region(region_code)?;
        match loaded.oracle().country_code_for_region(region_code) {
            0 => {
                debug!("Oracle has no calling code for listed region {region_code}");
                Err(AdapterError::UnsupportedRegion(region_code.to_owned()))
            }
            country_code => Ok(country_code),
        }
    }
}
