//! The closed set of venue actions.
//!
//! Every variant serializes its fields in declaration order, directly after
//! the `type` tag. That order is the canonical form: it is what gets
//! MessagePack-hashed for L1 actions and what gets submitted as JSON.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::order::{BuilderInfo, CancelByCloidRequest, CancelRequest, Grouping, ModifyRequest, OrderRef, OrderRequest, TwapRequest};
use super::serde_util::lower_address;
use super::signature::Signature;
use crate::signing::domain::Network;

/// Type tags the venue accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Order,
    Cancel,
    CancelByCloid,
    Modify,
    BatchModify,
    ScheduleCancel,
    UpdateLeverage,
    UpdateIsolatedMargin,
    TwapOrder,
    TwapCancel,
    VaultTransfer,
    SubAccountTransfer,
    CreateSubAccount,
    SetReferrer,
    EvmUserModify,
    ReserveRequestWeight,
    Noop,
    UsdSend,
    SpotSend,
    Withdraw3,
    UsdClassTransfer,
    SendAsset,
    ApproveAgent,
    ApproveBuilderFee,
    TokenDelegate,
    CDeposit,
    CWithdraw,
    ConvertToMultiSigUser,
    MultiSig,
}

impl ActionKind {
    pub const ALL: [ActionKind; 29] = [
        ActionKind::Order,
        ActionKind::Cancel,
        ActionKind::CancelByCloid,
        ActionKind::Modify,
        ActionKind::BatchModify,
        ActionKind::ScheduleCancel,
        ActionKind::UpdateLeverage,
        ActionKind::UpdateIsolatedMargin,
        ActionKind::TwapOrder,
        ActionKind::TwapCancel,
        ActionKind::VaultTransfer,
        ActionKind::SubAccountTransfer,
        ActionKind::CreateSubAccount,
        ActionKind::SetReferrer,
        ActionKind::EvmUserModify,
        ActionKind::ReserveRequestWeight,
        ActionKind::Noop,
        ActionKind::UsdSend,
        ActionKind::SpotSend,
        ActionKind::Withdraw3,
        ActionKind::UsdClassTransfer,
        ActionKind::SendAsset,
        ActionKind::ApproveAgent,
        ActionKind::ApproveBuilderFee,
        ActionKind::TokenDelegate,
        ActionKind::CDeposit,
        ActionKind::CWithdraw,
        ActionKind::ConvertToMultiSigUser,
        ActionKind::MultiSig,
    ];

    /// Wire value of the `type` field.
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::Order => "order",
            ActionKind::Cancel => "cancel",
            ActionKind::CancelByCloid => "cancelByCloid",
            ActionKind::Modify => "modify",
            ActionKind::BatchModify => "batchModify",
            ActionKind::ScheduleCancel => "scheduleCancel",
            ActionKind::UpdateLeverage => "updateLeverage",
            ActionKind::UpdateIsolatedMargin => "updateIsolatedMargin",
            ActionKind::TwapOrder => "twapOrder",
            ActionKind::TwapCancel => "twapCancel",
            ActionKind::VaultTransfer => "vaultTransfer",
            ActionKind::SubAccountTransfer => "subAccountTransfer",
            ActionKind::CreateSubAccount => "createSubAccount",
            ActionKind::SetReferrer => "setReferrer",
            ActionKind::EvmUserModify => "evmUserModify",
            ActionKind::ReserveRequestWeight => "reserveRequestWeight",
            ActionKind::Noop => "noop",
            ActionKind::UsdSend => "usdSend",
            ActionKind::SpotSend => "spotSend",
            ActionKind::Withdraw3 => "withdraw3",
            ActionKind::UsdClassTransfer => "usdClassTransfer",
            ActionKind::SendAsset => "sendAsset",
            ActionKind::ApproveAgent => "approveAgent",
            ActionKind::ApproveBuilderFee => "approveBuilderFee",
            ActionKind::TokenDelegate => "tokenDelegate",
            ActionKind::CDeposit => "cDeposit",
            ActionKind::CWithdraw => "cWithdraw",
            ActionKind::ConvertToMultiSigUser => "convertToMultiSigUser",
            ActionKind::MultiSig => "multiSig",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Whether actions of this kind carry `signatureChainId` and are
    /// authorized by an EIP-712 signature over their own fields.
    pub fn is_user_signed(&self) -> bool {
        matches!(
            self,
            ActionKind::UsdSend
                | ActionKind::SpotSend
                | ActionKind::Withdraw3
                | ActionKind::UsdClassTransfer
                | ActionKind::SendAsset
                | ActionKind::ApproveAgent
                | ActionKind::ApproveBuilderFee
                | ActionKind::TokenDelegate
                | ActionKind::CDeposit
                | ActionKind::CWithdraw
                | ActionKind::ConvertToMultiSigUser
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Signing path an action takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// MessagePack hash signed through the phantom agent.
    L1,
    /// EIP-712 signature over the action's own fields.
    UserSigned,
    /// Already-assembled multi-sig envelope.
    MultiSigWrapper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Order(BulkOrder),
    Cancel(BulkCancel),
    CancelByCloid(BulkCancelByCloid),
    Modify(Modify),
    BatchModify(BatchModify),
    ScheduleCancel(ScheduleCancel),
    UpdateLeverage(UpdateLeverage),
    UpdateIsolatedMargin(UpdateIsolatedMargin),
    TwapOrder(TwapOrder),
    TwapCancel(TwapCancel),
    VaultTransfer(VaultTransfer),
    SubAccountTransfer(SubAccountTransfer),
    CreateSubAccount(CreateSubAccount),
    SetReferrer(SetReferrer),
    EvmUserModify(EvmUserModify),
    ReserveRequestWeight(ReserveRequestWeight),
    Noop,
    UsdSend(UsdSend),
    SpotSend(SpotSend),
    Withdraw3(Withdraw3),
    UsdClassTransfer(UsdClassTransfer),
    SendAsset(SendAsset),
    ApproveAgent(ApproveAgent),
    ApproveBuilderFee(ApproveBuilderFee),
    TokenDelegate(TokenDelegate),
    CDeposit(CDeposit),
    CWithdraw(CWithdraw),
    ConvertToMultiSigUser(ConvertToMultiSigUser),
    MultiSig(MultiSigAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Order(_) => ActionKind::Order,
            Action::Cancel(_) => ActionKind::Cancel,
            Action::CancelByCloid(_) => ActionKind::CancelByCloid,
            Action::Modify(_) => ActionKind::Modify,
            Action::BatchModify(_) => ActionKind::BatchModify,
            Action::ScheduleCancel(_) => ActionKind::ScheduleCancel,
            Action::UpdateLeverage(_) => ActionKind::UpdateLeverage,
            Action::UpdateIsolatedMargin(_) => ActionKind::UpdateIsolatedMargin,
            Action::TwapOrder(_) => ActionKind::TwapOrder,
            Action::TwapCancel(_) => ActionKind::TwapCancel,
            Action::VaultTransfer(_) => ActionKind::VaultTransfer,
            Action::SubAccountTransfer(_) => ActionKind::SubAccountTransfer,
            Action::CreateSubAccount(_) => ActionKind::CreateSubAccount,
            Action::SetReferrer(_) => ActionKind::SetReferrer,
            Action::EvmUserModify(_) => ActionKind::EvmUserModify,
            Action::ReserveRequestWeight(_) => ActionKind::ReserveRequestWeight,
            Action::Noop => ActionKind::Noop,
            Action::UsdSend(_) => ActionKind::UsdSend,
            Action::SpotSend(_) => ActionKind::SpotSend,
            Action::Withdraw3(_) => ActionKind::Withdraw3,
            Action::UsdClassTransfer(_) => ActionKind::UsdClassTransfer,
            Action::SendAsset(_) => ActionKind::SendAsset,
            Action::ApproveAgent(_) => ActionKind::ApproveAgent,
            Action::ApproveBuilderFee(_) => ActionKind::ApproveBuilderFee,
            Action::TokenDelegate(_) => ActionKind::TokenDelegate,
            Action::CDeposit(_) => ActionKind::CDeposit,
            Action::CWithdraw(_) => ActionKind::CWithdraw,
            Action::ConvertToMultiSigUser(_) => ActionKind::ConvertToMultiSigUser,
            Action::MultiSig(_) => ActionKind::MultiSig,
        }
    }

    /// The `signatureChainId` field, present only on user-signed actions
    /// and multi-sig wrappers.
    pub fn signature_chain_id(&self) -> Option<&str> {
        match self {
            Action::UsdSend(a) => Some(&a.signature_chain_id),
            Action::SpotSend(a) => Some(&a.signature_chain_id),
            Action::Withdraw3(a) => Some(&a.signature_chain_id),
            Action::UsdClassTransfer(a) => Some(&a.signature_chain_id),
            Action::SendAsset(a) => Some(&a.signature_chain_id),
            Action::ApproveAgent(a) => Some(&a.signature_chain_id),
            Action::ApproveBuilderFee(a) => Some(&a.signature_chain_id),
            Action::TokenDelegate(a) => Some(&a.signature_chain_id),
            Action::CDeposit(a) => Some(&a.signature_chain_id),
            Action::CWithdraw(a) => Some(&a.signature_chain_id),
            Action::ConvertToMultiSigUser(a) => Some(&a.signature_chain_id),
            Action::MultiSig(a) => Some(&a.signature_chain_id),
            _ => None,
        }
    }

    /// Network a user-signed action declares it is bound to.
    pub fn hyperliquid_chain(&self) -> Option<Network> {
        match self {
            Action::UsdSend(a) => Some(a.hyperliquid_chain),
            Action::SpotSend(a) => Some(a.hyperliquid_chain),
            Action::Withdraw3(a) => Some(a.hyperliquid_chain),
            Action::UsdClassTransfer(a) => Some(a.hyperliquid_chain),
            Action::SendAsset(a) => Some(a.hyperliquid_chain),
            Action::ApproveAgent(a) => Some(a.hyperliquid_chain),
            Action::ApproveBuilderFee(a) => Some(a.hyperliquid_chain),
            Action::TokenDelegate(a) => Some(a.hyperliquid_chain),
            Action::CDeposit(a) => Some(a.hyperliquid_chain),
            Action::CWithdraw(a) => Some(a.hyperliquid_chain),
            Action::ConvertToMultiSigUser(a) => Some(a.hyperliquid_chain),
            _ => None,
        }
    }

    /// Which signing path this action takes.
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MultiSig(_) => ActionCategory::MultiSigWrapper,
            other if other.signature_chain_id().is_some() => ActionCategory::UserSigned,
            _ => ActionCategory::L1,
        }
    }

    /// The `time` or `nonce` field a user-signed action carries. It doubles
    /// as the request nonce.
    pub fn embedded_nonce(&self) -> Option<u64> {
        match self {
            Action::UsdSend(a) => Some(a.time),
            Action::SpotSend(a) => Some(a.time),
            Action::Withdraw3(a) => Some(a.time),
            Action::UsdClassTransfer(a) => Some(a.nonce),
            Action::SendAsset(a) => Some(a.nonce),
            Action::ApproveAgent(a) => Some(a.nonce),
            Action::ApproveBuilderFee(a) => Some(a.nonce),
            Action::TokenDelegate(a) => Some(a.nonce),
            Action::CDeposit(a) => Some(a.nonce),
            Action::CWithdraw(a) => Some(a.nonce),
            Action::ConvertToMultiSigUser(a) => Some(a.nonce),
            _ => None,
        }
    }
}

// L1 actions

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOrder {
    pub orders: Vec<OrderRequest>,
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCancel {
    pub cancels: Vec<CancelRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCancelByCloid {
    pub cancels: Vec<CancelByCloidRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modify {
    pub oid: OrderRef,
    pub order: OrderRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchModify {
    pub modifies: Vec<ModifyRequest>,
}

/// Dead man's switch. Without `time` the scheduled cancel is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCancel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeverage {
    pub asset: u32,
    pub is_cross: bool,
    pub leverage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIsolatedMargin {
    pub asset: u32,
    pub is_buy: bool,
    /// Signed margin delta in micro-USD.
    pub ntli: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwapOrder {
    pub twap: TwapRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwapCancel {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "t")]
    pub twap_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultTransfer {
    #[serde(with = "lower_address")]
    pub vault_address: Address,
    pub is_deposit: bool,
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransfer {
    #[serde(with = "lower_address")]
    pub sub_account_user: Address,
    pub is_deposit: bool,
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubAccount {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReferrer {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmUserModify {
    pub using_big_blocks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveRequestWeight {
    pub weight: u64,
}

// User-signed actions. Each starts with `signatureChainId` and
// `hyperliquidChain`; the remaining fields mirror the EIP-712 schema.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdSend {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub destination: Address,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSend {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub destination: Address,
    /// `NAME:0x<token id>`.
    pub token: String,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw3 {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub destination: Address,
    pub amount: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdClassTransfer {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    pub amount: String,
    pub to_perp: bool,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAsset {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub destination: Address,
    pub source_dex: String,
    pub destination_dex: String,
    pub token: String,
    pub amount: String,
    /// Sub-account address, or empty for the main account.
    #[serde(default)]
    pub from_sub_account: String,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveAgent {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub agent_address: Address,
    /// Unnamed agents travel as an explicit `null`, never as `""`.
    #[serde(default)]
    pub agent_name: Option<String>,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBuilderFee {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    /// Percentage string, e.g. `"0.001%"`.
    pub max_fee_rate: String,
    #[serde(with = "lower_address")]
    pub builder: Address,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDelegate {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    #[serde(with = "lower_address")]
    pub validator: Address,
    pub wei: u64,
    pub is_undelegate: bool,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CDeposit {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    pub wei: u64,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CWithdraw {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    pub wei: u64,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToMultiSigUser {
    pub signature_chain_id: String,
    pub hyperliquid_chain: Network,
    /// JSON-encoded `{"authorizedUsers": [...], "threshold": n}`, or
    /// `"null"` to convert back to a normal user.
    pub signers: String,
    pub nonce: u64,
}

// Multi-sig wrapper

/// The statement every cosigner signs: which account, who submits, what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSigPayload {
    #[serde(with = "lower_address")]
    pub multi_sig_user: Address,
    #[serde(with = "lower_address")]
    pub outer_signer: Address,
    pub action: Box<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSigAction {
    pub signature_chain_id: String,
    /// Cosigner signatures, index-aligned with the signer list.
    pub signatures: Vec<Signature>,
    pub payload: MultiSigPayload,
}

impl From<BulkOrder> for Action {
    fn from(value: BulkOrder) -> Self {
        Action::Order(value)
    }
}

impl From<BulkCancel> for Action {
    fn from(value: BulkCancel) -> Self {
        Action::Cancel(value)
    }
}

impl From<ScheduleCancel> for Action {
    fn from(value: ScheduleCancel) -> Self {
        Action::ScheduleCancel(value)
    }
}

impl From<UsdSend> for Action {
    fn from(value: UsdSend) -> Self {
        Action::UsdSend(value)
    }
}

impl From<ApproveAgent> for Action {
    fn from(value: ApproveAgent) -> Self {
        Action::ApproveAgent(value)
    }
}

impl From<MultiSigAction> for Action {
    fn from(value: MultiSigAction) -> Self {
        Action::MultiSig(value)
    }
}
