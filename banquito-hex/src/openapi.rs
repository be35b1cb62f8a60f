//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use banquito_types::domain::{BranchId, InterestRateId, State};
use banquito_types::dto::{BranchRqrs, Flag, InterestRateRqrs, ProductAccountRqrs};
use utoipa::{OpenApi, ToSchema};

/// Error body returned by every failing endpoint.
#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Branch cannot be updated, error:Branch with code: {999} does not exist")]
    pub error: String,
    /// Numeric CRUD code (404, 510, 520, 530) or 400 for rejected input
    #[schema(example = 520)]
    pub code: u16,
}

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

// ─────────────────────────────────────────────────────────────────────────────
// Branches
// ─────────────────────────────────────────────────────────────────────────────

/// List all branches
#[utoipa::path(
    get,
    path = "/api/branches",
    tag = "branches",
    responses(
        (status = 200, description = "All branches in insertion order", body = Vec<BranchRqrs>)
    )
)]
async fn list_branches() {}

/// Get a branch by code
#[utoipa::path(
    get,
    path = "/api/branches/{code}",
    tag = "branches",
    params(("code" = String, Path, description = "Branch business code")),
    responses(
        (status = 200, description = "Branch found", body = BranchRqrs),
        (status = 404, description = "No branch with that code", body = ErrorResponse)
    )
)]
async fn get_branch() {}

/// Create a branch
#[utoipa::path(
    post,
    path = "/api/branches",
    tag = "branches",
    request_body = BranchRqrs,
    responses(
        (status = 200, description = "Branch created", body = BranchRqrs),
        (status = 400, description = "Invalid branch or store failure (code 510)", body = ErrorResponse)
    )
)]
async fn create_branch() {}

/// Rename a branch
#[utoipa::path(
    put,
    path = "/api/branches/{code}",
    tag = "branches",
    params(("code" = String, Path, description = "Branch business code")),
    request_body = BranchRqrs,
    responses(
        (status = 200, description = "Branch as stored after the update", body = BranchRqrs),
        (status = 520, description = "Branch missing or store failure", body = ErrorResponse)
    )
)]
async fn update_branch() {}

// ─────────────────────────────────────────────────────────────────────────────
// Interest rates
// ─────────────────────────────────────────────────────────────────────────────

/// List active interest rates
#[utoipa::path(
    get,
    path = "/api/interest-rates",
    tag = "interest-rates",
    responses(
        (status = 200, description = "Interest rates in state ACT", body = Vec<InterestRateRqrs>)
    )
)]
async fn list_interest_rates() {}

/// Get an interest rate by id
#[utoipa::path(
    get,
    path = "/api/interest-rates/{id}",
    tag = "interest-rates",
    params(("id" = i64, Path, description = "Interest rate id")),
    responses(
        (status = 200, description = "Interest rate found", body = InterestRateRqrs),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Interest rate not found", body = ErrorResponse)
    )
)]
async fn get_interest_rate() {}

/// Create an interest rate
#[utoipa::path(
    post,
    path = "/api/interest-rates",
    tag = "interest-rates",
    request_body = InterestRateRqrs,
    responses(
        (status = 200, description = "Interest rate created", body = InterestRateRqrs),
        (status = 400, description = "Invalid rate or store failure (code 510)", body = ErrorResponse)
    )
)]
async fn create_interest_rate() {}

/// Update an interest rate
#[utoipa::path(
    put,
    path = "/api/interest-rates/{id}",
    tag = "interest-rates",
    params(("id" = i64, Path, description = "Interest rate id")),
    request_body = InterestRateRqrs,
    responses(
        (status = 200, description = "Interest rate as stored after the update", body = InterestRateRqrs),
        (status = 520, description = "Interest rate missing or store failure", body = ErrorResponse)
    )
)]
async fn update_interest_rate() {}

/// Inactivate an interest rate
#[utoipa::path(
    delete,
    path = "/api/interest-rates/{id}",
    tag = "interest-rates",
    params(("id" = i64, Path, description = "Interest rate id")),
    responses(
        (status = 200, description = "Interest rate is inactive"),
        (status = 400, description = "Malformed id, no body"),
        (status = 530, description = "Interest rate missing or store failure, no body")
    )
)]
async fn delete_interest_rate() {}

// ─────────────────────────────────────────────────────────────────────────────
// Product accounts
// ─────────────────────────────────────────────────────────────────────────────

/// List active product accounts
#[utoipa::path(
    get,
    path = "/api/product-accounts",
    tag = "product-accounts",
    responses(
        (status = 200, description = "Product accounts in state ACT", body = Vec<ProductAccountRqrs>)
    )
)]
async fn list_product_accounts() {}

/// Get a product account by id
#[utoipa::path(
    get,
    path = "/api/product-accounts/{id}",
    tag = "product-accounts",
    params(("id" = String, Path, description = "Product account id")),
    responses(
        (status = 200, description = "Product account found", body = ProductAccountRqrs),
        (status = 404, description = "Product account not found", body = ErrorResponse)
    )
)]
async fn get_product_account() {}

/// Create a product account
#[utoipa::path(
    post,
    path = "/api/product-accounts",
    tag = "product-accounts",
    request_body = ProductAccountRqrs,
    responses(
        (status = 200, description = "Product account created", body = ProductAccountRqrs),
        (status = 400, description = "Invalid account or store failure (code 510)", body = ErrorResponse)
    )
)]
async fn create_product_account() {}

/// Update a product account
#[utoipa::path(
    put,
    path = "/api/product-accounts/{id}",
    tag = "product-accounts",
    params(("id" = String, Path, description = "Product account id")),
    request_body = ProductAccountRqrs,
    responses(
        (status = 200, description = "Product account as stored after the update", body = ProductAccountRqrs),
        (status = 520, description = "Product account missing or store failure", body = ErrorResponse)
    )
)]
async fn update_product_account() {}

/// Inactivate a product account
#[utoipa::path(
    delete,
    path = "/api/product-accounts/{id}",
    tag = "product-accounts",
    params(("id" = String, Path, description = "Product account id")),
    responses(
        (status = 200, description = "Product account is inactive"),
        (status = 530, description = "Product account missing or store failure, no body")
    )
)]
async fn delete_product_account() {}

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Banquito Core Catalog API",
        version = "1.0.0",
        description = "Branch registry, interest-rate catalog and product-account catalog.\n\n## Errors\n\nFailures carry a numeric code: 404 (not found), 510 (create), 520 (update), 530 (inactivate). Update and delete respond with that code as the HTTP status; create always responds 400.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_branches,
        get_branch,
        create_branch,
        update_branch,
        list_interest_rates,
        get_interest_rate,
        create_interest_rate,
        update_interest_rate,
        delete_interest_rate,
        list_product_accounts,
        get_product_account,
        create_product_account,
        update_product_account,
        delete_product_account,
    ),
    components(
        schemas(
            BranchRqrs,
            InterestRateRqrs,
            ProductAccountRqrs,
            Flag,
            State,
            BranchId,
            InterestRateId,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "branches", description = "Branch registry"),
        (name = "interest-rates", description = "Interest-rate catalog"),
        (name = "product-accounts", description = "Product-account catalog"),
    )
)]
pub struct ApiDoc;
