//! Request handlers for the wallet endpoints

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use uuid::Uuid;

use crate::server::dto::{
    BulkGenerateRequest, BulkGenerateResponse, BulkItemResult, ClearResponse, GenerateRequest,
    GenerateResponse, HealthResponse, RetrieveQuery, RetrieveResponse, WalletSummary,
};
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::storage::WalletData;
use crate::types::{IdentifierType, WalletType};
use crate::validation::normalize_identifier;

pub async fn ping() -> &'static str {
    "Pong!"
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        wallets: state.store.len(),
    })
}

/// `POST /wallet/generate`
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let identifier_type = request.identifier_type.unwrap_or_default();
    let wallet_type = request
        .wallet_type
        .unwrap_or(state.config.wallet.default_wallet_type);

    let (id, wallet) = generate_one(
        &state,
        request.identifier.as_deref(),
        identifier_type,
        wallet_type,
    )?;

    Ok(Json(GenerateResponse {
        success: true,
        id,
        wallet: WalletSummary {
            address: wallet.address,
        },
    }))
}

/// `POST /wallet/bulk-generate`
///
/// Each identifier succeeds or fails on its own; the batch itself only fails
/// on a malformed or oversized request.
pub async fn bulk_generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BulkGenerateRequest>, JsonRejection>,
) -> Result<Json<BulkGenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if request.identifiers.is_empty() {
        return Err(ApiError::BadRequest("No identifiers provided".to_string()));
    }
    let max = state.config.wallet.max_bulk_size;
    if request.identifiers.len() > max {
        return Err(ApiError::BadRequest(format!(
            "Too many identifiers: {} (max {})",
            request.identifiers.len(),
            max
        )));
    }

    let identifier_type = request.identifier_type.unwrap_or_default();
    let wallet_type = request
        .wallet_type
        .unwrap_or(state.config.wallet.default_wallet_type);

    let results: Vec<BulkItemResult> = request
        .identifiers
        .iter()
        .map(|identifier| {
            match generate_one(&state, Some(identifier), identifier_type, wallet_type) {
                Ok((id, wallet)) => BulkItemResult {
                    identifier: identifier.clone(),
                    success: true,
                    id: Some(id),
                    wallet: Some(WalletSummary {
                        address: wallet.address,
                    }),
                    error: None,
                },
                Err(e) => BulkItemResult {
                    identifier: identifier.clone(),
                    success: false,
                    id: None,
                    wallet: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    let created = results.iter().filter(|r| r.success).count();
    log::info!(
        "Bulk generated {}/{} {} wallet(s)",
        created,
        results.len(),
        wallet_type
    );

    Ok(Json(BulkGenerateResponse {
        success: true,
        results,
    }))
}

/// `GET /wallet/retrieve?id=...`
pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RetrieveQuery>, QueryRejection>,
) -> Result<Json<RetrieveResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let raw_id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing wallet id".to_string()))?;

    let id = match query.identifier_type {
        Some(identifier_type) => normalize_identifier(raw_id, identifier_type)?,
        None => raw_id.to_string(),
    };

    let record = state.store.get(&id).ok_or(ApiError::NotFound)?;

    log::info!("Retrieved wallet '{}' ({})", id, record.wallet_data.id);

    Ok(Json(RetrieveResponse {
        success: true,
        user_share: record.user_share.clone(),
        wallet_id: record.wallet_data.id.clone(),
    }))
}

/// `DELETE /wallet`
pub async fn clear_all(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>, ApiError> {
    if !state.config.server.allow_reset {
        return Err(ApiError::Forbidden("Wallet reset is disabled".to_string()));
    }

    let cleared = state.store.clear_all();
    state.provider.clear_custody();

    Ok(Json(ClearResponse {
        success: true,
        cleared,
    }))
}

/// Create one wallet and record it under its normalized id
fn generate_one(
    state: &AppState,
    identifier: Option<&str>,
    identifier_type: IdentifierType,
    wallet_type: WalletType,
) -> Result<(String, WalletData), ApiError> {
    let id = match identifier {
        Some(raw) => normalize_identifier(raw, identifier_type)?,
        None => Uuid::new_v4().to_string(),
    };

    let allow_overwrite = state.config.server.allow_overwrite;
    // Skip the provider call when the insert is bound to fail
    if !allow_overwrite && state.store.contains(&id) {
        return Err(ApiError::Conflict(format!("Wallet already exists: {}", id)));
    }

    let generated = state
        .provider
        .create_pregen_wallet(&id, identifier_type, wallet_type)?;
    let wallet = generated.wallet.clone();

    if allow_overwrite {
        if let Some(previous) = state.store.replace(&id, generated.wallet, generated.user_share) {
            state.provider.forget(&previous.wallet_data.id);
        }
    } else if let Err(e) = state
        .store
        .try_store(&id, generated.wallet, generated.user_share)
    {
        // Lost a race for the id after the provider already took custody
        state.provider.forget(&wallet.id);
        return Err(e.into());
    }

    Ok((id, wallet))
}
