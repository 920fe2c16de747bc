//! Order wire types carried inside L1 actions.
//!
//! Field names and declaration order follow the venue's compact wire
//! format. They are hashed as-is, so reordering a field here changes every
//! signature that covers it.

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::serde_util::{decimal_to_wire, lower_address};

// Enums below serialize by hand so the MessagePack hash input carries plain
// strings and single-entry maps regardless of the encoder's enum layout.

/// Time-in-force for limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Tif {
    /// Add liquidity only (post-only).
    Alo,
    /// Immediate or cancel.
    Ioc,
    /// Good til cancelled.
    Gtc,
}

impl Tif {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tif::Alo => "Alo",
            Tif::Ioc => "Ioc",
            Tif::Gtc => "Gtc",
        }
    }
}

impl Serialize for Tif {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tpsl {
    Tp,
    Sl,
}

impl Tpsl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tpsl::Tp => "tp",
            Tpsl::Sl => "sl",
        }
    }
}

impl Serialize for Tpsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub tif: Tif,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub is_market: bool,
    pub trigger_px: String,
    pub tpsl: Tpsl,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit(Limit),
    Trigger(Trigger),
}

impl Serialize for OrderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            OrderType::Limit(limit) => map.serialize_entry("limit", limit)?,
            OrderType::Trigger(trigger) => map.serialize_entry("trigger", trigger)?,
        }
        map.end()
    }
}

/// How orders in one `order` action relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Grouping {
    #[default]
    Na,
    NormalTpsl,
    PositionTpsl,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Na => "na",
            Grouping::NormalTpsl => "normalTpsl",
            Grouping::PositionTpsl => "positionTpsl",
        }
    }
}

impl Serialize for Grouping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single order in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "p")]
    pub limit_px: String,
    #[serde(rename = "s")]
    pub sz: String,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    #[serde(rename = "t")]
    pub order_type: OrderType,
    /// Client order id, `0x` followed by 32 hex characters.
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<String>,
}

impl OrderRequest {
    /// Build a limit order, formatting price and size for the wire.
    pub fn limit(asset: u32, is_buy: bool, price: Decimal, size: Decimal, tif: Tif) -> Self {
        Self {
            asset,
            is_buy,
            limit_px: decimal_to_wire(price),
            sz: decimal_to_wire(size),
            reduce_only: false,
            order_type: OrderType::Limit(Limit { tif }),
            cloid: None,
        }
    }

    /// Build a trigger (take-profit / stop-loss) order.
    pub fn trigger(
        asset: u32,
        is_buy: bool,
        price: Decimal,
        size: Decimal,
        trigger_px: Decimal,
        is_market: bool,
        tpsl: Tpsl,
    ) -> Self {
        Self {
            asset,
            is_buy,
            limit_px: decimal_to_wire(price),
            sz: decimal_to_wire(size),
            reduce_only: true,
            order_type: OrderType::Trigger(Trigger {
                is_market,
                trigger_px: decimal_to_wire(trigger_px),
                tpsl,
            }),
            cloid: None,
        }
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn with_cloid(mut self, cloid: impl Into<String>) -> Self {
        self.cloid = Some(cloid.into());
        self
    }
}

/// Builder fee attached to an order action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderInfo {
    #[serde(rename = "b", with = "lower_address")]
    pub builder: Address,
    /// Fee in tenths of a basis point.
    #[serde(rename = "f")]
    pub fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "o")]
    pub oid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelByCloidRequest {
    pub asset: u32,
    pub cloid: String,
}

/// Order reference used by modify actions: exchange oid or client id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRef {
    Oid(u64),
    Cloid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyRequest {
    pub oid: OrderRef,
    pub order: OrderRequest,
}

/// TWAP order in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwapRequest {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "s")]
    pub sz: String,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    /// Duration in minutes.
    #[serde(rename = "m")]
    pub minutes: u32,
    #[serde(rename = "t")]
    pub randomize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_order_wire_shape() {
        let order = OrderRequest::limit(4, true, Decimal::new(10500, 2), Decimal::new(2, 1), Tif::Ioc);
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"{"a":4,"b":true,"p":"105","s":"0.2","r":false,"t":{"limit":{"tif":"Ioc"}}}"#
        );
    }

    #[test]
    fn test_trigger_order_wire_shape() {
        let order = OrderRequest::trigger(
            1,
            false,
            Decimal::new(95, 0),
            Decimal::ONE,
            Decimal::new(96, 0),
            true,
            Tpsl::Sl,
        )
        .with_cloid("0x00000000000000000000000000000001");
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"{"a":1,"b":false,"p":"95","s":"1","r":true,"t":{"trigger":{"isMarket":true,"triggerPx":"96","tpsl":"sl"}},"c":"0x00000000000000000000000000000001"}"#
        );
    }

    #[test]
    fn test_order_ref_untagged() {
        let by_oid: OrderRef = serde_json::from_str("42").unwrap();
        assert_eq!(by_oid, OrderRef::Oid(42));
        let by_cloid: OrderRef = serde_json::from_str(r#""0xabc""#).unwrap();
        assert_eq!(by_cloid, OrderRef::Cloid("0xabc".to_string()));
    }

    #[test]
    fn test_grouping_wire_names() {
        assert_eq!(serde_json::to_string(&Grouping::Na).unwrap(), r#""na""#);
        assert_eq!(serde_json::to_string(&Grouping::NormalTpsl).unwrap(), r#""normalTpsl""#);
    }
}
