//! Request and response bodies for the wallet endpoints

use serde::{Deserialize, Serialize};

use crate::storage::UserShare;
use crate::types::{IdentifierType, WalletType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Handle or id to reserve the wallet for; a UUID is generated when absent
    pub identifier: Option<String>,
    pub identifier_type: Option<IdentifierType>,
    pub wallet_type: Option<WalletType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub id: String,
    pub wallet: WalletSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateRequest {
    pub identifiers: Vec<String>,
    pub identifier_type: Option<IdentifierType>,
    pub wallet_type: Option<WalletType>,
}

/// Outcome for one identifier of a bulk request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemResult {
    pub identifier: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<WalletSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerateResponse {
    pub success: bool,
    pub results: Vec<BulkItemResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveQuery {
    pub id: Option<String>,
    /// Normalize `id` as this identifier type before lookup
    pub identifier_type: Option<IdentifierType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResponse {
    pub success: bool,
    pub user_share: UserShare,
    pub wallet_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub success: bool,
    pub cleared: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub wallets: usize,
}
