//! Enumerations exchanged with the API and their wire-token mapping.
//!
//! The remote expects every enumerated field as an exact lowercase token.
//! Each enum here carries an `Unrecognized` variant so that tokens the
//! remote starts using before this crate is updated still deserialize and
//! round-trip instead of breaking the schema.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wires `Display`, `FromStr` and serde through the `as_api_str` /
/// `from_api_str` mapping so the lowercase-token invariant cannot drift.
macro_rules! impl_wire_token {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_api_str())
            }
        }

        impl FromStr for $ty {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_api_str(s))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.as_api_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                Ok(Self::from_api_str(&token))
            }
        }
    };
}

/// Publication lifecycle of a [`Version`](super::version::Version)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionStatus {
    Archived,
    Draft,
    Listed,
    Scheduled,
    /// An actual status the remote reports, not a fallback
    Unknown,
    Unlisted,
    /// Wire token this crate does not know about yet
    Unrecognized(String),
}

impl VersionStatus {
    /// Canonical lowercase wire token for this status.
    ///
    /// Unrecognized tokens fall back to their lowercased form. That fallback
    /// is best-effort only; the remote may still reject it.
    pub fn as_api_str(&self) -> Cow<'static, str> {
        match self {
            Self::Archived => Cow::Borrowed("archived"),
            Self::Draft => Cow::Borrowed("draft"),
            Self::Listed => Cow::Borrowed("listed"),
            Self::Scheduled => Cow::Borrowed("scheduled"),
            Self::Unknown => Cow::Borrowed("unknown"),
            Self::Unlisted => Cow::Borrowed("unlisted"),
            Self::Unrecognized(token) => Cow::Owned(token.to_lowercase()),
        }
    }

    pub fn from_api_str(token: &str) -> Self {
        match token {
            "archived" => Self::Archived,
            "draft" => Self::Draft,
            "listed" => Self::Listed,
            "scheduled" => Self::Scheduled,
            "unknown" => Self::Unknown,
            "unlisted" => Self::Unlisted,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl_wire_token!(VersionStatus);

/// Subset of statuses a version may be scheduled to transition into.
///
/// Distinct from [`VersionStatus`] because not every status is a valid
/// scheduling target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRequestedStatus {
    Archived,
    Draft,
    Listed,
    Unlisted,
    /// Wire token this crate does not know about yet
    Unrecognized(String),
}

impl VersionRequestedStatus {
    pub fn as_api_str(&self) -> Cow<'static, str> {
        match self {
            Self::Archived => Cow::Borrowed("archived"),
            Self::Draft => Cow::Borrowed("draft"),
            Self::Listed => Cow::Borrowed("listed"),
            Self::Unlisted => Cow::Borrowed("unlisted"),
            Self::Unrecognized(token) => Cow::Owned(token.to_lowercase()),
        }
    }

    pub fn from_api_str(token: &str) -> Self {
        match token {
            "archived" => Self::Archived,
            "draft" => Self::Draft,
            "listed" => Self::Listed,
            "unlisted" => Self::Unlisted,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl_wire_token!(VersionRequestedStatus);

/// Release channel of a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectVersionType {
    Alpha,
    Beta,
    Release,
    /// Wire token this crate does not know about yet
    Unrecognized(String),
}

impl ProjectVersionType {
    pub fn as_api_str(&self) -> Cow<'static, str> {
        match self {
            Self::Alpha => Cow::Borrowed("alpha"),
            Self::Beta => Cow::Borrowed("beta"),
            Self::Release => Cow::Borrowed("release"),
            Self::Unrecognized(token) => Cow::Owned(token.to_lowercase()),
        }
    }

    pub fn from_api_str(token: &str) -> Self {
        match token {
            "alpha" => Self::Alpha,
            "beta" => Self::Beta,
            "release" => Self::Release,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl_wire_token!(ProjectVersionType);

/// How a [`Dependency`](super::version::Dependency) relates to the version
/// that declares it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyType {
    Required,
    Optional,
    Incompatible,
    Embedded,
    /// Wire token this crate does not know about yet
    Unrecognized(String),
}

impl DependencyType {
    pub fn as_api_str(&self) -> Cow<'static, str> {
        match self {
            Self::Required => Cow::Borrowed("required"),
            Self::Optional => Cow::Borrowed("optional"),
            Self::Incompatible => Cow::Borrowed("incompatible"),
            Self::Embedded => Cow::Borrowed("embedded"),
            Self::Unrecognized(token) => Cow::Owned(token.to_lowercase()),
        }
    }

    pub fn from_api_str(token: &str) -> Self {
        match token {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "incompatible" => Self::Incompatible,
            "embedded" => Self::Embedded,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl_wire_token!(DependencyType);
