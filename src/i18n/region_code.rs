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

pub struct RegionCode {}

impl RegionCode {
    /// Retired or informal region codes still found in stored data, paired
    /// with the code the metadata uses today.
    pub const LEGACY: [(&'static str, &'static str); 8] = [
        ("UK", "GB"),
        ("AN", "CW"),
        ("BU", "MM"),
        ("CS", "RS"),
        ("FX", "FR"),
        ("TP", "TL"),
        ("YU", "RS"),
        ("ZR", "CD"),
    ];

    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        Self::zz()
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }

    /// The current code for a legacy one. Lookup is exact, `"uk"` is not
    /// legacy.
    pub fn current_for_legacy(region_code: &str) -> Option<&'static str> {
        Self::LEGACY
            .iter()
            .find(|(legacy, _)| *legacy == region_code)
            .map(|(_, current)| *current)
    }
}
