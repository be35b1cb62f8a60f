//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use banquito_types::{
    Branch, BranchRqrs, CatalogRepository, CrudError, InterestRate, InterestRateId,
    InterestRateRqrs, ProductAccount, ProductAccountId, ProductAccountRqrs,
};

use super::error::ApiError;
use crate::service::{BranchService, InterestRateService, ProductAccountService};

/// Application state shared across handlers.
///
/// The three services share one store handle.
pub struct AppState<R: CatalogRepository> {
    pub branches: BranchService<Arc<R>>,
    pub interest_rates: InterestRateService<Arc<R>>,
    pub product_accounts: ProductAccountService<Arc<R>>,
}

impl<R: CatalogRepository> AppState<R> {
    pub fn new(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            branches: BranchService::new(repo.clone()),
            interest_rates: InterestRateService::new(repo.clone()),
            product_accounts: ProductAccountService::new(repo),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_branches<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let branches = state.branches.get_all().await?;
    Ok(Json(
        branches
            .into_iter()
            .map(BranchRqrs::from)
            .collect::<Vec<_>>(),
    ))
}

/// Get branch by business code.
#[tracing::instrument(skip(state))]
pub async fn get_branch<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let branch = state
        .branches
        .look_by_code(&code)
        .await?
        .ok_or_else(|| CrudError::code_not_found(Branch::ENTITY, &code))?;
    Ok(Json(BranchRqrs::from(branch)))
}

#[tracing::instrument(skip(state))]
pub async fn create_branch<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(rq): Json<BranchRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    let branch = Branch::try_from(rq)?;
    let created = state
        .branches
        .create(branch)
        .await
        .map_err(ApiError::rejected)?;
    Ok(Json(BranchRqrs::from(created)))
}

/// Rename the branch identified by the path code.
#[tracing::instrument(skip(state))]
pub async fn update_branch<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
    Json(mut rq): Json<BranchRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    rq.code = code.clone();
    let changes = Branch::try_from(rq)?;
    state.branches.update(&code, changes).await?;

    let branch = state
        .branches
        .look_by_code(&code)
        .await?
        .ok_or_else(|| CrudError::code_not_found(Branch::ENTITY, &code))?;
    Ok(Json(BranchRqrs::from(branch)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Interest rates
// ─────────────────────────────────────────────────────────────────────────────

fn parse_rate_id(raw: &str) -> Result<InterestRateId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid interest rate id: {raw}")))
}

/// List active interest rates.
#[tracing::instrument(skip(state))]
pub async fn list_interest_rates<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.interest_rates.list_all_actives().await?;
    Ok(Json(
        rates
            .into_iter()
            .map(InterestRateRqrs::from)
            .collect::<Vec<_>>(),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn get_interest_rate<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_rate_id(&id)?;
    let rate = state.interest_rates.obtain_by_id(id).await?;
    Ok(Json(InterestRateRqrs::from(rate)))
}

#[tracing::instrument(skip(state))]
pub async fn create_interest_rate<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(rq): Json<InterestRateRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = InterestRate::try_from(rq)?;
    let created = state
        .interest_rates
        .create(rate)
        .await
        .map_err(ApiError::rejected)?;
    Ok(Json(InterestRateRqrs::from(created)))
}

#[tracing::instrument(skip(state))]
pub async fn update_interest_rate<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    Json(rq): Json<InterestRateRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_rate_id(&id)?;
    let changes = InterestRate::try_from(rq)?;
    state.interest_rates.update(id, changes).await?;

    let rate = state.interest_rates.obtain_by_id(id).await?;
    Ok(Json(InterestRateRqrs::from(rate)))
}

/// Inactivate an interest rate; responds with a bare status and no body,
/// on failure too.
#[tracing::instrument(skip(state))]
pub async fn delete_interest_rate<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_rate_id(&id).map_err(|e| e.status())?;
    state
        .interest_rates
        .inactivate(id)
        .await
        .map_err(|e| ApiError::from_crud(e).status())?;
    Ok(StatusCode::OK)
}

// ─────────────────────────────────────────────────────────────────────────────
// Product accounts
// ─────────────────────────────────────────────────────────────────────────────

/// List active product accounts.
#[tracing::instrument(skip(state))]
pub async fn list_product_accounts<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.product_accounts.list_all_actives().await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(ProductAccountRqrs::from)
            .collect::<Vec<_>>(),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn get_product_account<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .product_accounts
        .obtain_by_id(&ProductAccountId::new(id))
        .await?;
    Ok(Json(ProductAccountRqrs::from(account)))
}

#[tracing::instrument(skip(state))]
pub async fn create_product_account<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(rq): Json<ProductAccountRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    let account = ProductAccount::try_from(rq)?;
    let created = state
        .product_accounts
        .create(account)
        .await
        .map_err(ApiError::rejected)?;
    Ok(Json(ProductAccountRqrs::from(created)))
}

#[tracing::instrument(skip(state))]
pub async fn update_product_account<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    Json(mut rq): Json<ProductAccountRqrs>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ProductAccountId::new(id);
    rq.id = Some(id.clone());
    let changes = ProductAccount::try_from(rq)?;
    state.product_accounts.update(&id, changes).await?;

    let account = state.product_accounts.obtain_by_id(&id).await?;
    Ok(Json(ProductAccountRqrs::from(account)))
}

/// Inactivate a product account; bare status, same as rates.
#[tracing::instrument(skip(state))]
pub async fn delete_product_account<R: CatalogRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state
        .product_accounts
        .inactivate(&ProductAccountId::new(id))
        .await
        .map_err(|e| ApiError::from_crud(e).status())?;
    Ok(StatusCode::OK)
}
