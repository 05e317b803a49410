// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Common date and time functions.

use chrono::{DateTime, Utc};

/// Parses an RFC 3339 / ISO 8601 timestamp, falling back to the current
/// local time if the string cannot be parsed.
///
/// This permissive fallback mirrors the upstream provider's own behavior of
/// occasionally emitting malformed `time_stamp` fields; a record with a bad
/// timestamp is still useful and should not be dropped.
#[must_use]
pub fn parse_timestamp_or_now(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_parse_timestamp_or_now_valid() {
        let parsed = parse_timestamp_or_now("2026-02-10T00:00:00Z");
        assert_eq!(parsed.to_rfc3339(), "2026-02-10T00:00:00+00:00");
    }

    #[rstest]
    fn test_parse_timestamp_or_now_invalid_falls_back() {
        let before = Utc::now();
        let parsed = parse_timestamp_or_now("not-a-timestamp");
        let after = Utc::now();
        assert!(parsed >= before && parsed <= after);
    }
}
