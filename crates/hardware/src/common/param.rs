//! Component parameters and override resolution.
//!
//! This module defines the values stored in a component's parameter map. It provides:
//! 1. **Values:** `Param`, the owned value type (string, integer, boolean, address range).
//! 2. **Static defaults:** `ParamDefault`, a `const`-friendly mirror used by catalog tables.
//! 3. **Resolution:** `resolve`, the explicit-override-else-default rule shared by every builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::addr::AddrRange;

/// A single parameter value attached to a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    /// Free-form string such as a size (`"64kB"`) or clock (`"1GHz"`).
    Str(String),
    /// Unsigned integer such as an associativity or latency in cycles.
    Int(u64),
    /// Boolean flag.
    Bool(bool),
    /// An address range (e.g. the range a DRAM interface services).
    Range(AddrRange),
}

impl Param {
    /// Returns the string payload, if this is a `Param::Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a `Param::Int`.
    pub const fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the range payload, if this is a `Param::Range`.
    pub const fn as_range(&self) -> Option<AddrRange> {
        match self {
            Self::Range(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Range(r) => write!(f, "{r}"),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::Int(u64::from(value))
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<AddrRange> for Param {
    fn from(value: AddrRange) -> Self {
        Self::Range(value)
    }
}

/// Compile-time parameter default, stored in static catalog tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamDefault {
    /// String default.
    Str(&'static str),
    /// Integer default.
    Int(u64),
    /// Boolean default.
    Bool(bool),
}

impl From<ParamDefault> for Param {
    fn from(value: ParamDefault) -> Self {
        match value {
            ParamDefault::Str(s) => Self::Str(s.to_string()),
            ParamDefault::Int(v) => Self::Int(v),
            ParamDefault::Bool(b) => Self::Bool(b),
        }
    }
}

/// Ordered parameter map; ordering keeps dumps and comparisons deterministic.
pub type ParamSet = BTreeMap<String, Param>;

/// Builds a `ParamSet` from a static default table.
pub fn param_set(defaults: &[(&'static str, ParamDefault)]) -> ParamSet {
    defaults
        .iter()
        .map(|(name, value)| ((*name).to_string(), Param::from(*value)))
        .collect()
}

/// Values that can stand in as an override.
///
/// Strings count as absent when empty. Numbers, booleans, and enums are never
/// absent once supplied.
pub trait Resolvable {
    /// Returns `true` if the value should be treated as "no override".
    fn is_unset(&self) -> bool {
        false
    }
}

impl Resolvable for &str {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Resolvable for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Resolvable for u32 {}
impl Resolvable for u64 {}
impl Resolvable for usize {}
impl Resolvable for bool {}

/// Returns the effective value of a parameter.
///
/// An absent or empty override yields `default`; anything else is returned
/// unchanged, with no coercion or range checking.
///
/// # Examples
///
/// ```
/// use hbmcfg_core::common::resolve;
///
/// assert_eq!(resolve(Some("256kB"), "128kB"), "256kB");
/// assert_eq!(resolve(Some(""), "128kB"), "128kB");
/// assert_eq!(resolve(None, 4u32), 4);
/// ```
#[inline]
pub fn resolve<T: Resolvable>(override_value: Option<T>, default: T) -> T {
    match override_value {
        Some(value) if !value.is_unset() => value,
        _ => default,
    }
}
