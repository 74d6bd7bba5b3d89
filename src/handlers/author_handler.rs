//! Author handlers for CRUD operations.

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::AccessPolicies;
use crate::constants::{CODE_MISSING_BODY, ERR_MISSING_BODY};
use crate::errors::ApiError;
use crate::middleware::authorize;
use crate::models::{Author, AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest};
use crate::repositories::Repository;
use crate::utils::{mask_text, OperationLog};
use crate::validators::{validate_ids_match, validate_positive_id, validation_errors_to_api_error};

const ENTITY: &str = "authors";

/// List all authors
#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "Authors",
    responses(
        (status = 200, description = "List of authors", body = [AuthorResponse]),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_authors(
    repository: web::Data<dyn Repository<Author>>,
    policies: web::Data<AccessPolicies>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let log = OperationLog::new(ENTITY, "list");
    log.info("Fetching all authors");
    let claims = authorize(&req, policies.authors.read_requires_admin)?;

    let authors = repository.find_all().await.map_err(|e| log.fault(&e))?;
    let response: Vec<AuthorResponse> = authors.into_iter().map(AuthorResponse::from).collect();

    log.info(format_args!(
        "Returning {} authors to {}",
        response.len(),
        claims.sub
    ));
    Ok(HttpResponse::Ok().json(response))
}

/// Get a specific author by ID
#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author found", body = AuthorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Unexpected failure", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_author(
    repository: web::Data<dyn Repository<Author>>,
    policies: web::Data<AccessPolicies>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "get");
    log.info(format_args!("Fetching author {}", id));
    authorize(&req, policies.authors.read_requires_admin)?;

    let author = repository
        .find_by_id(id)
        .await
        .map_err(|e| log.fault(&e))?
        .ok_or_else(|| {
            log.warn(format_args!("Author {} not found", id));
            ApiError::NotFound
        })?;

    log.info(format_args!("Returning author {}", id));
    Ok(HttpResponse::Ok().json(AuthorResponse::from(author)))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "Authors",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Missing body or validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 500, description = "Author could not be stored", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_author(
    repository: web::Data<dyn Repository<Author>>,
    policies: web::Data<AccessPolicies>,
    body: Option<web::Json<CreateAuthorRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let log = OperationLog::new(ENTITY, "create");
    log.info("Creating author");
    let claims = authorize(&req, policies.authors.create_requires_admin)?;

    let body = body
        .ok_or_else(|| log.reject(ApiError::bad_request(CODE_MISSING_BODY, ERR_MISSING_BODY)))?
        .into_inner();
    body.validate()
        .map_err(|e| log.reject(validation_errors_to_api_error(e)))?;

    let mut author = Author::from(body);
    let stored = repository
        .create(&mut author)
        .await
        .map_err(|e| log.fault(&e))?;
    if !stored {
        return Err(log.refused(format_args!(
            "New author '{}'",
            mask_text(&author.last_name)
        )));
    }

    log.info(format_args!("Author {} created by {}", author.id, claims.sub));
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/authors/{}", author.id)))
        .json(AuthorResponse::from(author)))
}

/// Replace an author
#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 204, description = "Author updated"),
        (status = 400, description = "Invalid id, id mismatch, missing body or validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Author could not be stored", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_author(
    repository: web::Data<dyn Repository<Author>>,
    path: web::Path<i64>,
    body: Option<web::Json<UpdateAuthorRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "update");
    log.info(format_args!("Updating author {}", id));
    let claims = authorize(&req, true)?;

    validate_positive_id(id).map_err(|e| log.reject(e))?;
    let body = body
        .ok_or_else(|| log.reject(ApiError::bad_request(CODE_MISSING_BODY, ERR_MISSING_BODY)))?
        .into_inner();
    validate_ids_match(id, body.id).map_err(|e| log.reject(e))?;

    if !repository.exists(id).await.map_err(|e| log.fault(&e))? {
        log.warn(format_args!("Author {} not found", id));
        return Err(ApiError::NotFound);
    }

    body.validate()
        .map_err(|e| log.reject(validation_errors_to_api_error(e)))?;

    let author = Author::from(body);
    if !repository.update(&author).await.map_err(|e| log.fault(&e))? {
        return Err(log.refused(format_args!("Update of author {}", id)));
    }

    log.info(format_args!("Author {} updated by {}", id, claims.sub));
    Ok(HttpResponse::NoContent().finish())
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Invalid id", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Author not found"),
        (status = 500, description = "Author could not be deleted", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_author(
    repository: web::Data<dyn Repository<Author>>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "delete");
    log.info(format_args!("Deleting author {}", id));
    let claims = authorize(&req, true)?;

    validate_positive_id(id).map_err(|e| log.reject(e))?;

    if !repository.exists(id).await.map_err(|e| log.fault(&e))? {
        log.warn(format_args!("Author {} not found", id));
        return Err(ApiError::NotFound);
    }

    let author = repository
        .find_by_id(id)
        .await
        .map_err(|e| log.fault(&e))?
        .ok_or_else(|| {
            log.warn(format_args!("Author {} disappeared before delete", id));
            ApiError::NotFound
        })?;

    if !repository.delete(&author).await.map_err(|e| log.fault(&e))? {
        return Err(log.refused(format_args!("Delete of author {}", id)));
    }

    log.info(format_args!("Author {} deleted by {}", id, claims.sub));
    Ok(HttpResponse::NoContent().finish())
}
