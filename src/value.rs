//! Supported primitive kinds and the typed slots that bind to them.
//!
//! Every kind owns its parse, render and zero-test logic. The same parser
//! backs environment values and command-line values, so a string that is
//! valid in one source is valid in the other.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::ParseError;

/// The closed set of primitive kinds an option can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    I32,
    I64,
    Isize,
    U16,
    U32,
    U64,
    Usize,
    F64,
    String,
    Duration,
}

impl Kind {
    /// Placeholder shown in help output, e.g. `--timeout <duration>`.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Duration => "duration",
        }
    }

    /// Check that `raw` parses as this kind, without storing it.
    pub fn check(self, raw: &str) -> Result<(), ParseError> {
        match self {
            Kind::Bool => parse_bool(raw).map(drop),
            Kind::I32 => parse_signed::<i32>(raw, self).map(drop),
            Kind::I64 => parse_signed::<i64>(raw, self).map(drop),
            Kind::Isize => parse_signed::<isize>(raw, self).map(drop),
            Kind::U16 => parse_unsigned::<u16>(raw, self).map(drop),
            Kind::U32 => parse_unsigned::<u32>(raw, self).map(drop),
            Kind::U64 => parse_unsigned::<u64>(raw, self).map(drop),
            Kind::Usize => parse_unsigned::<usize>(raw, self).map(drop),
            Kind::F64 => parse_float(raw).map(drop),
            Kind::String => Ok(()),
            Kind::Duration => parse_duration(raw).map(drop),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed, typed handle on a primitive field.
///
/// Writing through a slot writes the configuration record itself.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F64(&'a mut f64),
    String(&'a mut String),
    Duration(&'a mut Duration),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Bool(_) => Kind::Bool,
            Slot::I32(_) => Kind::I32,
            Slot::I64(_) => Kind::I64,
            Slot::Isize(_) => Kind::Isize,
            Slot::U16(_) => Kind::U16,
            Slot::U32(_) => Kind::U32,
            Slot::U64(_) => Kind::U64,
            Slot::Usize(_) => Kind::Usize,
            Slot::F64(_) => Kind::F64,
            Slot::String(_) => Kind::String,
            Slot::Duration(_) => Kind::Duration,
        }
    }

    /// Parse `raw` as the slot's kind and store it. On error the field is
    /// left untouched.
    pub fn set(&mut self, raw: &str) -> Result<(), ParseError> {
        let kind = self.kind();
        match self {
            Slot::Bool(v) => **v = parse_bool(raw)?,
            Slot::I32(v) => **v = parse_signed(raw, kind)?,
            Slot::I64(v) => **v = parse_signed(raw, kind)?,
            Slot::Isize(v) => **v = parse_signed(raw, kind)?,
            Slot::U16(v) => **v = parse_unsigned(raw, kind)?,
            Slot::U32(v) => **v = parse_unsigned(raw, kind)?,
            Slot::U64(v) => **v = parse_unsigned(raw, kind)?,
            Slot::Usize(v) => **v = parse_unsigned(raw, kind)?,
            Slot::F64(v) => **v = parse_float(raw)?,
            Slot::String(v) => **v = raw.to_owned(),
            Slot::Duration(v) => **v = parse_duration(raw)?,
        }
        Ok(())
    }

    /// Render the current value in the form the parser accepts back.
    pub fn render(&self) -> String {
        match self {
            Slot::Bool(v) => v.to_string(),
            Slot::I32(v) => v.to_string(),
            Slot::I64(v) => v.to_string(),
            Slot::Isize(v) => v.to_string(),
            Slot::U16(v) => v.to_string(),
            Slot::U32(v) => v.to_string(),
            Slot::U64(v) => v.to_string(),
            Slot::Usize(v) => v.to_string(),
            Slot::F64(v) => v.to_string(),
            Slot::String(v) => (**v).clone(),
            Slot::Duration(v) => format_duration(**v),
        }
    }

    /// Whether the field holds its type's zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            Slot::Bool(v) => !**v,
            Slot::I32(v) => **v == 0,
            Slot::I64(v) => **v == 0,
            Slot::Isize(v) => **v == 0,
            Slot::U16(v) => **v == 0,
            Slot::U32(v) => **v == 0,
            Slot::U64(v) => **v == 0,
            Slot::Usize(v) => **v == 0,
            Slot::F64(v) => **v == 0.0,
            Slot::String(v) => v.is_empty(),
            Slot::Duration(v) => v.is_zero(),
        }
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::new(Kind::Bool, "expected true or false")),
    }
}

/// Split an integer literal into its radix and digits. `0x`, `0o` and `0b`
/// prefixes are recognised; anything else is decimal.
fn radix_digits(unsigned: &str) -> (u32, &str) {
    let has_prefix =
        |p: &str| unsigned.get(..2).is_some_and(|head| head.eq_ignore_ascii_case(p));
    if has_prefix("0x") {
        (16, &unsigned[2..])
    } else if has_prefix("0o") {
        (8, &unsigned[2..])
    } else if has_prefix("0b") {
        (2, &unsigned[2..])
    } else {
        (10, unsigned)
    }
}

fn parse_magnitude(digits: &str, kind: Kind) -> Result<u128, ParseError> {
    let (radix, digits) = radix_digits(digits);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ParseError::new(kind, "invalid syntax"));
    }
    u128::from_str_radix(digits, radix).map_err(|e| ParseError::new(kind, e.to_string()))
}

fn parse_signed<T: TryFrom<i128>>(raw: &str, kind: Kind) -> Result<T, ParseError> {
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = parse_magnitude(rest, kind)?;
    let magnitude =
        i128::try_from(magnitude).map_err(|_| ParseError::new(kind, "value out of range"))?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| ParseError::new(kind, "value out of range"))
}

fn parse_unsigned<T: TryFrom<u128>>(raw: &str, kind: Kind) -> Result<T, ParseError> {
    let magnitude = parse_magnitude(raw, kind)?;
    T::try_from(magnitude).map_err(|_| ParseError::new(kind, "value out of range"))
}

fn parse_float(raw: &str) -> Result<f64, ParseError> {
    raw.parse::<f64>()
        .map_err(|e| ParseError::new(Kind::F64, e.to_string()))
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration written as a sequence of decimal numbers with unit
/// suffixes, e.g. `300ms`, `1.5h`, `1h10m10s`. Valid units are `ns`, `us`
/// (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
fn parse_duration(raw: &str) -> Result<Duration, ParseError> {
    let err = |reason: &str| ParseError::new(Kind::Duration, reason);

    let mut s = raw.strip_prefix('+').unwrap_or(raw);
    if s.starts_with('-') {
        if s == "-0" {
            return Ok(Duration::ZERO);
        }
        return Err(err("negative durations are not supported"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(err("invalid duration"));
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let int_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (int_part, rest) = s.split_at(int_end);
        let (frac_part, rest) = match rest.strip_prefix('.') {
            Some(after_dot) => {
                let end = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(end)
            }
            None => ("", rest),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err("invalid duration"));
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_end);
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            "" => return Err(err("missing unit in duration")),
            _ => return Err(err("unknown unit in duration")),
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| err("duration out of range"))?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| err("duration out of range"))?;
        if !frac_part.is_empty() {
            // Digits past the 18th cannot move the result by a nanosecond.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().map_err(|_| err("invalid duration"))?;
            nanos = nanos
                .checked_add(frac * scale / 10u128.pow(digits.len() as u32))
                .ok_or_else(|| err("duration out of range"))?;
        }
        total = total
            .checked_add(nanos)
            .ok_or_else(|| err("duration out of range"))?;
        s = rest;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| err("duration out of range"))?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Render a duration as `72h3m0.5s`-style text: hours and minutes only when
/// non-zero, sub-second durations in the largest unit below a second.
fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_SEC {
        let (unit, suffix) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        return format!("{}{suffix}", decimal(nanos, unit));
    }

    let secs = nanos / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    let seconds = decimal(seconds * NANOS_PER_SEC + nanos % NANOS_PER_SEC, NANOS_PER_SEC);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `value / unit` as a decimal string with trailing zeros trimmed.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let frac = format!("{rem:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
