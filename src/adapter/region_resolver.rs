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

use log::trace;

use super::errors::AdapterError;
use crate::i18n::RegionCode;

/// Maps a legacy region code to its current one; other codes, including
/// lowercase ones, pass through untouched.
pub fn resolve(region_code: &str) -> &str {
    match RegionCode::current_for_legacy(region_code) {
        Some(current) => {
            trace!("Legacy region code {region_code} resolved to {current}");
            current
        }
        None => region_code,
    }
}

pub fn check_supported(
    supported_regions: &BTreeSet<String>,
    region_code: &str,
) -> Result<(), AdapterError> {
    if supported_regions.contains(region_code) {
        Ok(())
    } else {
        Err(AdapterError::UnsupportedRegion(region_code.to_owned()))
    }
}

/// Resolves, then checks the resolved code.
pub fn resolve_supported<'a>(
    supported_regions: &BTreeSet<String>,
    region_code: &'a str,
) -> Result<&'a str, AdapterError> {
    let resolved = resolve(region_code);
    check_supported(supported_regions, resolved)?;
    Ok(resolved)
}
