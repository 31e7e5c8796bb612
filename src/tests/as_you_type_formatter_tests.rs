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

use crate::{AsYouTypeFormatter, PhoneNumberUtil};

use super::{init_logging, region_code::RegionCode, test_metadata::test_bundle};

fn get_phone_util() -> PhoneNumberUtil {
    init_logging();
    PhoneNumberUtil::from_bundle(&test_bundle()).expect("Metadata should be valid")
}

fn type_all(formatter: &mut AsYouTypeFormatter<'_>, input: &str) -> Vec<String> {
    input.chars().map(|c| formatter.input_digit(c)).collect()
}

#[test]
fn aytf_us() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "6502530000"),
        vec![
            "6",
            "65",
            "650",
            "650-2",
            "650-25",
            "650-253",
            "650-2530",
            "(650) 253-00",
            "(650) 253-000",
            "(650) 253-0000",
        ]
    );
    // Too long for any format.
    assert_eq!(formatter.input_digit('1'), "65025300001");

    formatter.clear();
    assert_eq!(formatter.input_digit('6'), "6");
    assert_eq!(formatter.input_digit('5'), "65");
}

#[test]
fn aytf_us_with_national_prefix() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "16502"),
        vec!["1", "16", "165", "1 650", "1 650-2"]
    );
}

#[test]
fn aytf_gb_national_prefix_in_rule() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::gb());
    assert_eq!(
        type_all(&mut formatter, "02012345678"),
        vec![
            "0",
            "02",
            "020",
            "020 1",
            "020 12",
            "020 123",
            "020 1234",
            "020 1234 5",
            "020 1234 56",
            "020 1234 567",
            "020 1234 5678",
        ]
    );
}

#[test]
fn aytf_international() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "+16502530000"),
        vec![
            "+",
            "+1",
            "+1 6",
            "+1 65",
            "+1 650",
            "+1 650-2",
            "+1 650-25",
            "+1 650-253",
            "+1 650-253-0",
            "+1 650-253-00",
            "+1 650-253-000",
            "+1 650-253-0000",
        ]
    );

    formatter.clear();
    assert_eq!(
        type_all(&mut formatter, "+44201"),
        vec!["+", "+4", "+44", "+44 2", "+44 20", "+44 20 1"]
    );
}

#[test]
fn aytf_unknown_calling_code() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "+999"),
        vec!["+", "+9", "+99", "+999"]
    );
}

#[test]
fn aytf_stops_on_non_digit() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "650*2"),
        vec!["6", "65", "650", "650*", "650*2"]
    );

    formatter.clear();
    assert_eq!(formatter.input_digit('6'), "6");
}

#[test]
fn aytf_unknown_region() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::zz());
    assert_eq!(
        type_all(&mut formatter, "6502"),
        vec!["6", "65", "650", "6502"]
    );

    formatter.clear();
    assert_eq!(
        type_all(&mut formatter, "+4420"),
        vec!["+", "+4", "+44", "+44 2", "+44 20"]
    );
}

#[test]
fn aytf_idd() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(
        type_all(&mut formatter, "011442012345678"),
        vec![
            "0",
            "01",
            "011",
            "011 4",
            "011 44",
            "011 44 2",
            "011 44 20",
            "011 44 20 1",
            "011 44 20 12",
            "011 44 20 123",
            "011 44 20 1234",
            "011 44 20 1234 5",
            "011 44 20 1234 56",
            "011 44 20 1234 567",
            "011 44 20 1234 5678",
        ]
    );

    // Typed the same way, "+" and the dialled prefix agree on the grouping.
    formatter.clear();
    let plus = type_all(&mut formatter, "+442012345678");
    assert_eq!(plus.last().map(String::as_str), Some("+44 20 1234 5678"));

    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::gb());
    assert_eq!(
        type_all(&mut formatter, "0016502"),
        vec!["0", "00", "00 1", "00 1 6", "00 1 65", "00 1 650", "00 1 650-2"]
    );
}
