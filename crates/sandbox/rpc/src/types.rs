//! Request and response types of the RPC namespaces.

use alloy_primitives::{Address, B256, Bytes, U256};
use chrono::{DateTime, Utc};
use era_sandbox_node::{TransactionRecord, TransactionRequest, TransactionStatus};
use serde::{Deserialize, Serialize};

/// Call or transaction parameters accepted by `zks_estimateFee`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_deps: Option<Vec<Bytes>>,
}

impl From<CallRequest> for TransactionRequest {
    fn from(request: CallRequest) -> Self {
        Self {
            from: request.from.unwrap_or_default(),
            to: request.to,
            value: request.value.unwrap_or_default(),
            input: request.data.unwrap_or_default(),
            nonce: None,
            factory_deps: request.factory_deps.unwrap_or_default(),
        }
    }
}

/// Details returned by `zks_getTransactionDetails`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub is_l1_originated: bool,
    pub status: TransactionStatus,
    pub fee: U256,
    pub gas_per_pubdata: U256,
    pub initiator_address: Address,
    pub received_at: DateTime<Utc>,
    pub eth_commit_tx_hash: Option<B256>,
    pub eth_prove_tx_hash: Option<B256>,
    pub eth_execute_tx_hash: Option<B256>,
}

impl TransactionDetails {
    pub fn new(record: &TransactionRecord, gas_per_pubdata: u64) -> Self {
        let received_at = i64::try_from(record.received_at)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            is_l1_originated: false,
            status: record.status,
            fee: record.fee,
            gas_per_pubdata: U256::from(gas_per_pubdata),
            initiator_address: record.from,
            received_at,
            eth_commit_tx_hash: None,
            eth_prove_tx_hash: None,
            eth_execute_tx_hash: None,
        }
    }
}
