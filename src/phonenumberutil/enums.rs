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

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Defines the various standardized formats for representing phone numbers.
///
/// `INTERNATIONAL` and `NATIONAL` formats align with the ITU-T E.123 recommendation,
/// but use local conventions like hyphens (-) instead of spaces for separators.
///
/// For example, the Google Switzerland office number would be:
/// - **INTERNATIONAL**: `+41 44 668 1800`
/// - **NATIONAL**: `044 668 1800`
/// - **E164**: `+41446681800` (international format without formatting)
/// - **RFC3966**: `tel:+41-44-668-1800` (hyphen-separated with a "tel:" prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// **E.164 format.**
    /// No spaces or symbols, always starting with a `+` followed by the
    /// country code. Extensions are dropped.
    E164,
    /// **International format.**
    /// Country code plus the number grouped for display.
    International,
    /// **National format.**
    /// Used for dialing within the number's own country. It may include a
    /// national prefix (like '0').
    National,
    /// **RFC3966 format.**
    /// Starts with "tel:", uses hyphens as separators, and can include extensions.
    RFC3966,
}

/// Categorizes phone numbers based on their primary use.
///
/// The string keys (`"FIXED_LINE"`, `"MOBILE"`, ...) are the ones accepted by
/// example-number lookups.
#[derive(Debug, EnumIter, EnumString, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    /// Traditional landline numbers tied to a geographic location.
    #[strum(serialize = "FIXED_LINE")]
    FixedLine,
    #[strum(serialize = "MOBILE")]
    Mobile,
    /// Used in regions (e.g., the USA) where it's impossible to distinguish between
    /// fixed-line and mobile numbers by looking at the phone number itself.
    #[strum(serialize = "FIXED_LINE_OR_MOBILE")]
    FixedLineOrMobile,
    #[strum(serialize = "TOLL_FREE")]
    TollFree,
    #[strum(serialize = "PREMIUM_RATE")]
    PremiumRate,
    /// The cost of the call is split between the caller and the recipient.
    #[strum(serialize = "SHARED_COST")]
    SharedCost,
    #[strum(serialize = "VOIP")]
    VoIP,
    /// A number associated with a person, not a location or device.
    #[strum(serialize = "PERSONAL_NUMBER")]
    PersonalNumber,
    #[strum(serialize = "PAGER")]
    Pager,
    /// Universal Access Numbers.
    #[strum(serialize = "UAN")]
    UAN,
    #[strum(serialize = "VOICEMAIL")]
    VoiceMail,
    /// The number does not match any of the known patterns for its region, or
    /// the generic "any type" when asking for an example number.
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl PhoneNumberType {
    /// Maps a type key to a type; unrecognized keys mean [`PhoneNumberType::Unknown`].
    pub fn from_key_or_unknown(key: &str) -> Self {
        key.parse().unwrap_or(PhoneNumberType::Unknown)
    }
}

/// Represents the possible outcomes when checking if a phone number's length is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// **The length is valid for a dialable number.**
    IsPossible,
    /// **The length is valid for a local-only number.**
    /// Too short for a full national number but dialable within a specific
    /// local area (e.g., without the area code).
    IsPossibleLocalOnly,
}
