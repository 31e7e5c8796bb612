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

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use log::{debug, trace};
use protobuf::Message;

use crate::{
    i18n,
    phonenumberutil::helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY,
    proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection},
};

/// Numbering-plan metadata as handed to the registry.
///
/// `country_code_to_region_code_map` lists the main region of a calling code
/// first, so `+1` maps to `["US", "CA", ...]`. Non-geographical entities such
/// as `+800` are keyed by their calling code in `non_geographical_metadata`
/// and appear in the calling code map under `"001"`, but never in
/// `region_codes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBundle {
    pub region_codes: BTreeSet<String>,
    pub country_code_to_region_code_map: BTreeMap<i32, Vec<String>>,
    pub country_to_metadata: HashMap<String, PhoneMetadata>,
    pub non_geographical_metadata: HashMap<i32, PhoneMetadata>,
}

impl MetadataBundle {
    /// Builds a bundle from a metadata collection, deriving the region set and
    /// the calling code map from the entries themselves.
    pub fn from_collection(collection: PhoneMetadataCollection) -> Self {
        let mut bundle = Self::default();
        // Temporary map so regions sharing a calling code can be ordered with
        // the main country in front.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();

        for metadata in collection.metadata {
            let region_code = metadata.id().to_owned();
            if i18n::RegionCode::get_unknown() == region_code {
                trace!("Skipping metadata for the unknown region");
                continue;
            }
            let main_country_for_code = metadata.main_country_for_code();
            let country_calling_code = metadata.country_code();

            if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
                bundle
                    .non_geographical_metadata
                    .insert(country_calling_code, metadata);
            } else {
                bundle.region_codes.insert(region_code.clone());
                bundle
                    .country_to_metadata
                    .insert(region_code.clone(), metadata);
            }

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_for_code {
                regions.push_front(region_code);
            } else {
                regions.push_back(region_code);
            }
        }

        bundle.country_code_to_region_code_map.extend(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        );
        debug!(
            "Metadata bundle holds {} regions and {} calling codes",
            bundle.region_codes.len(),
            bundle.country_code_to_region_code_map.len()
        );
        bundle
    }

    /// Decodes a serialized [`PhoneMetadataCollection`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, protobuf::Error> {
        let collection = PhoneMetadataCollection::parse_from_bytes(bytes)?;
        Ok(Self::from_collection(collection))
    }
}
