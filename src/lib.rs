mod adapter;
mod interfaces;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod phonenumberutil;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;
pub(crate) mod string_util;

#[cfg(test)]
mod tests;

pub use adapter::{
    PhoneObjectUtil,
    codec::PhoneObjectCodec,
    errors::{AdapterError, ParseFailure},
    formatter::{FormatOptions, FormatStyle, FormatterFacade},
    oracle::{AsYouTypeSession, NumberingPlanOracle},
    phone_object::{NationalNumber, PhoneObject},
    region_resolver,
    registry::{LoadedMetadata, MetadataRegistry},
    session::{IncrementalFormatterSession, SessionState},
    validation::{InvalidReason, ValidationClassifier, ValidationOutcome},
};
pub use phonenumberutil::{
    AsYouTypeFormatter, MetadataBundle, NumberLengthType, PhoneNumberFormat, PhoneNumberType,
    PhoneNumberUtil, enums, errors,
};
pub use proto_gen::{phonemetadata, phonenumber};
pub use regexp_cache::InvalidRegexError;
