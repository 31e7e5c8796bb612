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

//! US and GB metadata shaped like the published tables, enough for
//! benchmarking against the `phonenumber` crate.

use phoneobj::{
    MetadataBundle, PhoneNumberUtil, PhoneObjectUtil,
    phonemetadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
};
use protobuf::MessageField;

fn desc(pattern: &str, lengths: &[i32], example: &str) -> MessageField<PhoneNumberDesc> {
    let mut desc = PhoneNumberDesc::new();
    desc.set_national_number_pattern(pattern.to_owned());
    desc.possible_length = lengths.to_vec();
    desc.set_example_number(example.to_owned());
    MessageField::some(desc)
}

fn number_format(pattern: &str, format: &str, leading_digits: &str, rule: &str) -> NumberFormat {
    let mut number_format = NumberFormat::new();
    number_format.set_pattern(pattern.to_owned());
    number_format.set_format(format.to_owned());
    number_format.leading_digits_pattern = vec![leading_digits.to_owned()];
    if !rule.is_empty() {
        number_format.set_national_prefix_formatting_rule(rule.to_owned());
    }
    number_format
}

fn us() -> PhoneMetadata {
    let mut us = PhoneMetadata::new();
    us.set_id("US".to_owned());
    us.set_country_code(1);
    us.set_main_country_for_code(true);
    us.set_international_prefix("011".to_owned());
    us.set_national_prefix("1".to_owned());
    us.set_national_prefix_for_parsing("1".to_owned());
    us.set_same_mobile_and_fixed_line_pattern(true);
    us.general_desc = desc(r"[2-9]\d{9}", &[10], "2015550123");
    us.fixed_line = desc(r"[2-9]\d{2}[2-9]\d{6}", &[], "2015550123");
    us.mobile = desc(r"[2-9]\d{2}[2-9]\d{6}", &[], "2015550123");
    us.toll_free = desc(r"8(?:00|33|44|55|66|77|88)[2-9]\d{6}", &[], "8002345678");
    us.number_format = vec![
        number_format(r"(\d{3})(\d{4})", "$1-$2", "[2-9]", ""),
        number_format(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3", "[2-9]", ""),
    ];
    us.intl_number_format = vec![number_format(
        r"(\d{3})(\d{3})(\d{4})",
        "$1-$2-$3",
        "[2-9]",
        "",
    )];
    us
}

fn gb() -> PhoneMetadata {
    let mut gb = PhoneMetadata::new();
    gb.set_id("GB".to_owned());
    gb.set_country_code(44);
    gb.set_international_prefix("00".to_owned());
    gb.set_national_prefix("0".to_owned());
    gb.set_national_prefix_for_parsing("0".to_owned());
    gb.general_desc = desc(r"[1-9]\d{9}", &[10], "2012345678");
    gb.fixed_line = desc(r"[1-6]\d{9}", &[], "2012345678");
    gb.mobile = desc(r"7[1-57-9]\d{8}", &[], "7400123456");
    gb.number_format = vec![
        number_format(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3", "2", "$NP$FG"),
        number_format(r"(\d{4})(\d{6})", "$1 $2", "7", "$NP$FG"),
    ];
    gb
}

pub fn bench_bundle() -> MetadataBundle {
    let mut collection = PhoneMetadataCollection::new();
    collection.metadata = vec![us(), gb()];
    MetadataBundle::from_collection(collection)
}

pub fn phone_number_util() -> PhoneNumberUtil {
    let _ = env_logger::try_init();
    PhoneNumberUtil::from_bundle(&bench_bundle()).expect("bench metadata should be valid")
}

pub fn phone_object_util() -> PhoneObjectUtil {
    let _ = env_logger::try_init();
    let util = PhoneObjectUtil::new();
    util.load_metadata(bench_bundle())
        .expect("bench metadata should be valid");
    util
}
