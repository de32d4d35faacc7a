//! Product kind enum.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`ProductKind`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid product kind: {0} (expected physical, digital or course)")]
pub struct ProductKindError(pub String);

/// What sort of product a line item refers to.
///
/// Serialized as the lowercase name under the `type` key of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Shipped goods.
    #[default]
    Physical,
    /// Downloadable goods.
    Digital,
    /// Course enrollment.
    Course,
}

impl ProductKind {
    /// Whether this kind of product needs to be shipped.
    #[must_use]
    pub const fn is_shippable(self) -> bool {
        matches!(self, Self::Physical)
    }

    /// The lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Digital => "digital",
            Self::Course => "course",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = ProductKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "digital" => Ok(Self::Digital),
            "course" => Ok(Self::Course),
            _ => Err(ProductKindError(s.to_string())),
        }
    }
}
