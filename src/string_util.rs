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

use std::borrow::Cow;

/// Removes `prefix` from the front of `text`, keeping the borrowed or owned
/// shape of the input. `None` when `text` does not start with `prefix`.
pub fn strip_cow_prefix<'a>(text: Cow<'a, str>, prefix: &str) -> Option<Cow<'a, str>> {
    match text {
        Cow::Borrowed(s) => s.strip_prefix(prefix).map(Cow::Borrowed),
        Cow::Owned(mut s) if s.starts_with(prefix) => {
            s.drain(..prefix.len());
            Some(Cow::Owned(s))
        }
        Cow::Owned(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::strip_cow_prefix;

    #[test]
    fn strips_calling_code_from_borrowed_digits() {
        let stripped = strip_cow_prefix(Cow::Borrowed("16502530000"), "1");
        assert!(matches!(stripped, Some(Cow::Borrowed("6502530000"))));
        assert_eq!(strip_cow_prefix(Cow::Borrowed("6502530000"), "44"), None);
    }

    #[test]
    fn strips_calling_code_from_owned_digits() {
        let stripped = strip_cow_prefix(Cow::Owned("442012345678".to_owned()), "44");
        assert_eq!(stripped, Some(Cow::Owned("2012345678".to_owned())));
        assert_eq!(strip_cow_prefix(Cow::Owned("4".to_owned()), "44"), None);
    }
}
