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

use crate::{
    PhoneNumberUtil,
    enums::{NumberLengthType, PhoneNumberFormat, PhoneNumberType},
    errors::{GetExampleNumberError, InvalidMetadataError, NotANumberError, ParseError, ValidationError},
    phonenumber::PhoneNumber,
    phonenumberutil::MetadataBundle,
};

use super::{
    init_logging,
    region_code::RegionCode,
    test_metadata::{desc, region, test_bundle, test_collection},
};

fn get_phone_util() -> PhoneNumberUtil {
    init_logging();
    PhoneNumberUtil::from_bundle(&test_bundle()).expect("Metadata should be valid")
}

fn number(country_code: i32, national_number: u64) -> PhoneNumber {
    let mut phone_number = PhoneNumber::new();
    phone_number.set_country_code(country_code);
    phone_number.set_national_number(national_number);
    phone_number
}

fn italian(national_number: u64) -> PhoneNumber {
    let mut phone_number = number(39, national_number);
    phone_number.set_italian_leading_zero(true);
    phone_number
}

#[test]
fn rejects_bundle_with_broken_pattern() {
    init_logging();
    let mut collection = test_collection();
    let mut broken = region("FR", 33);
    broken.general_desc = desc(r"[1-9\d{8}", &[9], None);
    collection.metadata.push(broken);

    let err = PhoneNumberUtil::from_bundle(&MetadataBundle::from_collection(collection))
        .err()
        .expect("broken pattern should be rejected");
    assert!(matches!(
        err,
        InvalidMetadataError::InvalidPattern { ref region, .. } if region == "FR"
    ));
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert_eq!(
        regions.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["CA", "DE", "GB", "IT", "US"]
    );
    assert!(!regions.contains(RegionCode::un001()));
}

#[test]
fn get_country_code_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(1, phone_util.get_country_code_for_region(RegionCode::us()));
    assert_eq!(1, phone_util.get_country_code_for_region(RegionCode::ca()));
    assert_eq!(44, phone_util.get_country_code_for_region(RegionCode::gb()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::zz()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::un001()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::uk()));
}

#[test]
fn is_leading_zero_possible() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_leading_zero_possible(39));
    assert!(!phone_util.is_leading_zero_possible(1));
    assert!(!phone_util.is_leading_zero_possible(800));
    assert!(!phone_util.is_leading_zero_possible(999));
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let test_number = number(1, 6502530000);
    assert_eq!(
        "(650) 253-0000",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+1 650-253-0000",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+16502530000",
        phone_util.format(&test_number, PhoneNumberFormat::E164)
    );
    assert_eq!(
        "tel:+1-650-253-0000",
        phone_util.format(&test_number, PhoneNumberFormat::RFC3966)
    );

    let test_number = number(1, 8002345678);
    assert_eq!(
        "(800) 234-5678",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    // No format matches, the number stays bare.
    let test_number = number(1, 123);
    assert_eq!("123", phone_util.format(&test_number, PhoneNumberFormat::National));
}

#[test]
fn format_gb_number() {
    let phone_util = get_phone_util();
    let test_number = number(44, 2012345678);
    assert_eq!(
        "020 1234 5678",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+44 20 1234 5678",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "tel:+44-20-1234-5678",
        phone_util.format(&test_number, PhoneNumberFormat::RFC3966)
    );

    let test_number = number(44, 7400123456);
    assert_eq!(
        "07400 123456",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+44 7400 123456",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
}

#[test]
fn format_de_number() {
    let phone_util = get_phone_util();
    let test_number = number(49, 30123456);
    assert_eq!(
        "030 123456",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+49 30 123456",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );

    let test_number = number(49, 15123456789);
    assert_eq!(
        "0151 23456789",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
}

#[test]
fn format_it_number() {
    let phone_util = get_phone_util();
    let test_number = italian(212345678);
    assert_eq!(
        "02 1234 5678",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "+39 02 1234 5678",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+390212345678",
        phone_util.format(&test_number, PhoneNumberFormat::E164)
    );

    let test_number = number(39, 3123456789);
    assert_eq!(
        "312 345 6789",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
}

#[test]
fn format_non_geographical_number() {
    let phone_util = get_phone_util();
    let test_number = number(800, 12345678);
    assert_eq!(
        "+800 1234 5678",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+80012345678",
        phone_util.format(&test_number, PhoneNumberFormat::E164)
    );
}

#[test]
fn format_unknown_calling_code() {
    let phone_util = get_phone_util();
    let test_number = number(999, 123456);
    assert_eq!(
        "123456",
        phone_util.format(&test_number, PhoneNumberFormat::International)
    );
    assert_eq!(
        "+999123456",
        phone_util.format(&test_number, PhoneNumberFormat::E164)
    );
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();
    let mut test_number = number(1, 6502530000);
    test_number.set_extension("123".to_owned());
    assert_eq!(
        "(650) 253-0000 ext. 123",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
    assert_eq!(
        "tel:+1-650-253-0000;ext=123",
        phone_util.format(&test_number, PhoneNumberFormat::RFC3966)
    );
    // E164 drops extensions.
    assert_eq!(
        "+16502530000",
        phone_util.format(&test_number, PhoneNumberFormat::E164)
    );

    // GB prefers its own extension prefix.
    let mut test_number = number(44, 2012345678);
    test_number.set_extension("4".to_owned());
    assert_eq!(
        "020 1234 5678 x4",
        phone_util.format(&test_number, PhoneNumberFormat::National)
    );
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let expected = number(1, 6502530000);
    for input in [
        "6502530000",
        "(650) 253-0000",
        "650.253.0000",
        "+1 650 253 0000",
        "1 650 253 0000",
        "tel: 650-253-0000",
    ] {
        assert_eq!(
            expected,
            phone_util.parse(input, RegionCode::us()).unwrap(),
            "{input}"
        );
    }
    // National prefix of the UK is stripped.
    assert_eq!(
        number(44, 2012345678),
        phone_util.parse("020 1234 5678", RegionCode::gb()).unwrap()
    );
    assert_eq!(
        number(49, 30123456),
        phone_util.parse("030 123456", RegionCode::de()).unwrap()
    );
}

#[test]
fn parse_number_with_calling_code() {
    let phone_util = get_phone_util();
    let expected = number(44, 2012345678);
    assert_eq!(expected, phone_util.parse("+442012345678", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("+44 20 1234 5678", RegionCode::zz()).unwrap());
    assert_eq!(expected, phone_util.parse("011 44 20 1234 5678", RegionCode::us()).unwrap());
    assert_eq!(expected, phone_util.parse("00 44 20 1234 5678", RegionCode::de()).unwrap());
    assert_eq!(
        number(800, 12345678),
        phone_util.parse("+800 1234 5678", RegionCode::us()).unwrap()
    );
}

#[test]
fn parse_unicode_digits() {
    let phone_util = get_phone_util();
    assert_eq!(
        number(44, 2012345678),
        phone_util
            .parse("+44\u{2013}20\u{2013}1234\u{2013}5678", RegionCode::gb())
            .unwrap()
    );
    assert_eq!(
        number(1, 6502530000),
        phone_util
            .parse("\u{FF16}\u{FF15}\u{FF10}2530000", RegionCode::us())
            .unwrap()
    );
}

#[test]
fn parse_vanity_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        number(1, 8003569377),
        phone_util.parse("1-800-FLOWERS", RegionCode::us()).unwrap()
    );
}

#[test]
fn parse_extension() {
    let phone_util = get_phone_util();
    let mut expected = number(1, 6502530000);
    expected.set_extension("123".to_owned());
    for input in [
        "650-253-0000 ext. 123",
        "650-253-0000 x123",
        "(650) 253-0000 extension 123",
        "tel:+1-650-253-0000;ext=123",
    ] {
        assert_eq!(
            expected,
            phone_util.parse(input, RegionCode::us()).unwrap(),
            "{input}"
        );
    }
}

#[test]
fn parse_italian_leading_zeros() {
    let phone_util = get_phone_util();
    let parsed = phone_util.parse("02 1234 5678", RegionCode::it()).unwrap();
    assert_eq!(italian(212345678), parsed);
    assert_eq!(1, parsed.number_of_leading_zeros());

    // "00" followed by a zero is not an international prefix.
    let parsed = phone_util.parse("0001234567", RegionCode::it()).unwrap();
    assert!(parsed.italian_leading_zero());
    assert_eq!(3, parsed.number_of_leading_zeros());
    assert_eq!(1234567, parsed.national_number());
    assert_eq!(
        "+390001234567",
        phone_util.format(&parsed, PhoneNumberFormat::E164)
    );
}

#[test]
fn parse_failures() {
    let phone_util = get_phone_util();
    assert!(matches!(
        phone_util.parse("This is not a phone number", RegionCode::us()),
        Err(ParseError::NotANumber(_))
    ));
    assert!(matches!(
        phone_util.parse("1", RegionCode::us()),
        Err(ParseError::NotANumber(NotANumberError::NotMatchedValidNumberPattern))
    ));
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("6502530000", RegionCode::zz())
    );
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("6502530000", RegionCode::un001())
    );
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("+999 1234 5678", RegionCode::zz())
    );
    assert_eq!(
        Err(ParseError::TooShortAfterIdd),
        phone_util.parse("011 12", RegionCode::us())
    );
    assert_eq!(
        Err(ParseError::TooLongNsn),
        phone_util.parse("+44 2012345678901234567", RegionCode::us())
    );
    let long_input = "1".repeat(251);
    assert_eq!(Err(ParseError::TooLong), phone_util.parse(&long_input, RegionCode::us()));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_valid_number_for_region(&number(1, 6502530000), RegionCode::us()));
    assert!(!phone_util.is_valid_number_for_region(&number(1, 6502530000), RegionCode::ca()));
    assert!(phone_util.is_valid_number_for_region(&number(1, 2042345678), RegionCode::ca()));
    assert!(!phone_util.is_valid_number_for_region(&number(44, 2012345678), RegionCode::us()));
    assert!(phone_util.is_valid_number_for_region(&number(44, 7400123456), RegionCode::gb()));
    assert!(!phone_util.is_valid_number_for_region(&number(44, 8012345678), RegionCode::gb()));
    assert!(phone_util.is_valid_number_for_region(&italian(212345678), RegionCode::it()));
    // Without the zero this is not an Italian number.
    assert!(!phone_util.is_valid_number_for_region(&number(39, 212345678), RegionCode::it()));
    assert!(phone_util.is_valid_number_for_region(&number(800, 12345678), RegionCode::un001()));
    assert!(!phone_util.is_valid_number_for_region(&number(1, 6502530000), RegionCode::zz()));
    assert!(!phone_util.is_valid_number_for_region(&number(1, 650), RegionCode::us()));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_with_reason(&number(1, 6502530000))
    );
    assert_eq!(
        Ok(NumberLengthType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&number(1, 2530000))
    );
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&number(1, 650))
    );
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&number(1, 65025300001))
    );
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number(999, 6502530000))
    );
    // Regions sharing a calling code are checked against the main one.
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_with_reason(&number(1, 9992345678))
    );
}

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok(number(1, 2015550123)),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::FixedLine)
    );
    assert_eq!(
        Ok(number(1, 8002345678)),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::TollFree)
    );
    assert_eq!(
        Ok(number(1, 2015550123)),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::Unknown)
    );
    assert_eq!(
        Ok(italian(212345678)),
        phone_util.get_example_number_for_type(RegionCode::it(), PhoneNumberType::FixedLine)
    );
    assert_eq!(
        Ok(number(49, 15123456789)),
        phone_util.get_example_number_for_type(RegionCode::de(), PhoneNumberType::Mobile)
    );
    assert_eq!(
        Err(GetExampleNumberError::NoExampleNumber),
        phone_util.get_example_number_for_type(RegionCode::gb(), PhoneNumberType::Unknown)
    );
    assert_eq!(
        Err(GetExampleNumberError::NoExampleNumber),
        phone_util.get_example_number_for_type(RegionCode::us(), PhoneNumberType::Pager)
    );
    assert_eq!(
        Err(GetExampleNumberError::InvalidRegionCode),
        phone_util.get_example_number_for_type(RegionCode::zz(), PhoneNumberType::Mobile)
    );
}

#[test]
fn example_numbers_are_valid() {
    let phone_util = get_phone_util();
    for region_code in phone_util.get_supported_regions() {
        for number_type in [PhoneNumberType::FixedLine, PhoneNumberType::Mobile] {
            let example = phone_util
                .get_example_number_for_type(&region_code, number_type)
                .unwrap();
            assert!(
                phone_util.is_valid_number_for_region(&example, &region_code),
                "{region_code} {number_type:?}"
            );
        }
    }
}
