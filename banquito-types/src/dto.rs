//! RQRS objects: the request/response bodies exchanged over HTTP.
//!
//! Each catalog uses one flat camelCase object for both directions. Fields
//! the store or the service owns (`id`, stamps) are optional on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Branch, BranchId, InterestRate, InterestRateId, ProductAccount, ProductAccountId, Rate, State,
};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Branch
// ─────────────────────────────────────────────────────────────────────────────

/// Branch request/response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchRqrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BranchId>,
    /// Business code; on update the path code takes precedence
    #[serde(default)]
    #[schema(example = "001")]
    pub code: String,
    #[schema(example = "Branch 1")]
    pub name: String,
}

impl From<Branch> for BranchRqrs {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            code: branch.code,
            name: branch.name,
        }
    }
}

impl TryFrom<BranchRqrs> for Branch {
    type Error = DomainError;

    fn try_from(rq: BranchRqrs) -> Result<Self, Self::Error> {
        Branch::new(rq.code, rq.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interest rate
// ─────────────────────────────────────────────────────────────────────────────

/// Interest rate request/response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestRateRqrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<InterestRateId>,
    #[schema(example = "Savings")]
    pub name: String,
    /// Rate in basis points; a decimal fraction of a unit on the wire
    /// (`"interestRate": 0.0250` is 250).
    #[serde(rename = "interestRate", with = "fixed_point::basis_points")]
    #[schema(value_type = f64, example = 0.025)]
    pub rate_bps: i64,
    #[serde(default)]
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub end: Option<DateTime<Utc>>,
}

impl From<InterestRate> for InterestRateRqrs {
    fn from(ir: InterestRate) -> Self {
        Self {
            id: ir.id,
            name: ir.name,
            rate_bps: ir.rate.basis_points(),
            state: ir.state,
            start: ir.start,
            end: ir.end,
        }
    }
}

impl TryFrom<InterestRateRqrs> for InterestRate {
    type Error = DomainError;

    fn try_from(rq: InterestRateRqrs) -> Result<Self, Self::Error> {
        let rate = Rate::from_basis_points(rq.rate_bps)?;
        InterestRate::new(rq.name, rate, rq.state, rq.start, rq.end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product account
// ─────────────────────────────────────────────────────────────────────────────

/// `"Y"` / `"N"` flag as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Flag::Yes } else { Flag::No }
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        matches!(flag, Flag::Yes)
    }
}

/// Product account request/response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductAccountRqrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "001")]
    pub id: Option<ProductAccountId>,
    #[schema(example = "Product1")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Minimum balance in cents; a two-place decimal on the wire.
    #[serde(alias = "minimunBalance", with = "fixed_point::cents")]
    #[schema(value_type = f64, example = 100.00)]
    pub minimum_balance: i64,
    #[serde(default)]
    pub pay_interest: Flag,
    #[serde(default)]
    pub accepts_checks: Flag,
    #[serde(default)]
    pub state: State,
    /// Set by the service; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub creation_date: Option<DateTime<Utc>>,
}

impl From<ProductAccount> for ProductAccountRqrs {
    fn from(pa: ProductAccount) -> Self {
        Self {
            id: pa.id,
            name: pa.name,
            description: pa.description,
            minimum_balance: pa.minimum_balance,
            pay_interest: pa.pay_interest.into(),
            accepts_checks: pa.accepts_checks.into(),
            state: pa.state,
            creation_date: pa.creation_date,
        }
    }
}

impl TryFrom<ProductAccountRqrs> for ProductAccount {
    type Error = DomainError;

    fn try_from(rq: ProductAccountRqrs) -> Result<Self, Self::Error> {
        ProductAccount::new(
            rq.id,
            rq.name,
            rq.description,
            rq.minimum_balance,
            rq.pay_interest.into(),
            rq.accepts_checks.into(),
            rq.state,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-point wire values
// ─────────────────────────────────────────────────────────────────────────────

/// Serde adapters carrying integer minor units as decimal numbers.
///
/// Input may be a JSON number or a decimal string; more fractional digits
/// than the scale allows is an error rather than a silent rounding.
mod fixed_point {
    use serde::{Deserializer, Serializer, de};
    use std::fmt;

    fn scale(places: u32) -> i64 {
        10_i64.pow(places)
    }

    fn serialize_scaled<S: Serializer>(value: i64, places: u32, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(value as f64 / scale(places) as f64)
    }

    fn parse_decimal(raw: &str, places: u32) -> Option<i64> {
        let raw = raw.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let frac = frac.trim_end_matches('0');
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
            || frac.len() > places as usize
        {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse::<i64>().ok()? * scale(places - frac.len() as u32)
        };
        let value = whole.checked_mul(scale(places))?.checked_add(frac)?;
        Some(if negative { -value } else { value })
    }

    struct ScaledVisitor {
        places: u32,
    }

    impl de::Visitor<'_> for ScaledVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a decimal with at most {} fractional digits", self.places)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            v.checked_mul(scale(self.places))
                .ok_or_else(|| E::custom("decimal value out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            let v = i64::try_from(v).map_err(|_| E::custom("decimal value out of range"))?;
            self.visit_i64(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            let scaled = v * scale(self.places) as f64;
            let rounded = scaled.round();
            // 2^53: beyond this f64 no longer holds every integer
            if !rounded.is_finite() || rounded.abs() > 9_007_199_254_740_992.0 {
                return Err(E::custom("decimal value out of range"));
            }
            let tolerance = (scaled.abs() * f64::EPSILON * 4.0).max(1e-6);
            if (scaled - rounded).abs() > tolerance {
                return Err(E::invalid_value(de::Unexpected::Float(v), &self));
            }
            Ok(rounded as i64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            parse_decimal(v, self.places).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    pub mod basis_points {
        use super::*;

        const PLACES: u32 = 4;

        pub fn serialize<S: Serializer>(value: &i64, s: S) -> Result<S::Ok, S::Error> {
            serialize_scaled(*value, PLACES, s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
            d.deserialize_any(ScaledVisitor { places: PLACES })
        }
    }

    pub mod cents {
        use super::*;

        const PLACES: u32 = 2;

        pub fn serialize<S: Serializer>(value: &i64, s: S) -> Result<S::Ok, S::Error> {
            serialize_scaled(*value, PLACES, s)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
            d.deserialize_any(ScaledVisitor { places: PLACES })
        }
    }

}
