use crate::error::RpcError;
use serde::{Deserialize, Serialize};

/// JSON-RPC protocol version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    #[default]
    #[serde(rename = "2.0")]
    V2,
}

/// Request id echoed in the response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    String(String),
    Number(i64),
    Null,
}

/// Response of a _single_ rpc call
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcResponse {
    jsonrpc: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    #[serde(flatten)]
    result: ResponseResult,
}

impl From<RpcError> for RpcResponse {
    fn from(e: RpcError) -> Self {
        Self { jsonrpc: Version::V2, id: None, result: ResponseResult::Error(e) }
    }
}

impl RpcResponse {
    pub fn new(id: Id, content: impl Into<ResponseResult>) -> Self {
        Self { jsonrpc: Version::V2, id: Some(id), result: content.into() }
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn result(&self) -> &ResponseResult {
        &self.result
    }
}

/// Represents the result of a call either success or error
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub enum ResponseResult {
    #[serde(rename = "result")]
    Success(serde_json::Value),
    #[serde(rename = "error")]
    Error(RpcError),
}

impl ResponseResult {
    /// Serializes `content` into a success result.
    ///
    /// Content that fails to serialize becomes an internal error.
    pub fn success<S>(content: S) -> Self
    where
        S: Serialize,
    {
        match serde_json::to_value(&content) {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Error(RpcError::internal_error_with(err.to_string())),
        }
    }

    pub fn error(error: RpcError) -> Self {
        Self::Error(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<RpcError> for ResponseResult {
    fn from(err: RpcError) -> Self {
        Self::error(err)
    }
}

impl<T: Serialize> From<Result<T, RpcError>> for ResponseResult {
    fn from(result: Result<T, RpcError>) -> Self {
        match result {
            Ok(content) => Self::success(content),
            Err(err) => Self::error(err),
        }
    }
}
