// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/expression/constant.rs

//! Time constants as written in window parameters (`20 sec`, `1 min 30 sec`).
//! Every literal resolves to a `LONG` count of milliseconds.

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
const MILLIS_PER_MONTH: i64 = 2_630_000_000;
const MILLIS_PER_YEAR: i64 = 31_556_900_000;

pub struct TimeUtil;

impl TimeUtil {
    /// Multiplier for a unit keyword, `None` if the keyword is unknown.
    pub fn unit_millis(unit: &str) -> Option<i64> {
        let millis = match unit.to_lowercase().as_str() {
            "ms" | "millisec" | "millisecs" | "millisecond" | "milliseconds" => 1,
            "s" | "sec" | "secs" | "second" | "seconds" => MILLIS_PER_SECOND,
            "m" | "min" | "mins" | "minute" | "minutes" => MILLIS_PER_MINUTE,
            "h" | "hour" | "hours" => MILLIS_PER_HOUR,
            "d" | "day" | "days" => MILLIS_PER_DAY,
            "w" | "week" | "weeks" => MILLIS_PER_WEEK,
            "month" | "months" => MILLIS_PER_MONTH,
            "y" | "year" | "years" => MILLIS_PER_YEAR,
            _ => return None,
        };
        Some(millis)
    }

    /// Parse a time literal into milliseconds.
    ///
    /// A bare integer is already milliseconds. Otherwise the literal is a
    /// sequence of `<amount> <unit>` pairs whose values are summed, so
    /// `"1 min 30 sec"` is `90_000`. Amount and unit may be glued (`"500ms"`).
    pub fn parse_time_literal(literal: &str) -> Result<i64, String> {
        let trimmed = literal.trim();
        if trimmed.is_empty() {
            return Err("Empty time literal".to_string());
        }
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Ok(millis);
        }

        let mut tokens: Vec<String> = Vec::new();
        for word in trimmed.split_whitespace() {
            let split_at = word
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(word.len());
            if split_at > 0 && split_at < word.len() {
                tokens.push(word[..split_at].to_string());
                tokens.push(word[split_at..].to_string());
            } else {
                tokens.push(word.to_string());
            }
        }

        if tokens.len() % 2 != 0 {
            return Err(format!(
                "Time literal '{literal}' must be pairs of <amount> <unit>"
            ));
        }

        let mut total: i64 = 0;
        for pair in tokens.chunks(2) {
            let amount: i64 = pair[0]
                .parse()
                .map_err(|_| format!("Invalid amount '{}' in time literal '{literal}'", pair[0]))?;
            let unit = Self::unit_millis(&pair[1])
                .ok_or_else(|| format!("Unknown time unit '{}' in '{literal}'", pair[1]))?;
            let millis = amount
                .checked_mul(unit)
                .ok_or_else(|| format!("Time literal '{literal}' overflows"))?;
            total = total
                .checked_add(millis)
                .ok_or_else(|| format!("Time literal '{literal}' overflows"))?;
        }
        Ok(total)
    }
}
