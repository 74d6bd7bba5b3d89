//! Book handlers for CRUD operations.

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::AccessPolicies;
use crate::constants::{CODE_MISSING_BODY, ERR_MISSING_BODY};
use crate::errors::ApiError;
use crate::middleware::authorize;
use crate::models::{Book, BookResponse, CreateBookRequest, UpdateBookRequest};
use crate::repositories::Repository;
use crate::utils::{mask_text, OperationLog};
use crate::validators::{validate_ids_match, validate_positive_id, validation_errors_to_api_error};

const ENTITY: &str = "books";

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "Books",
    responses(
        (status = 200, description = "List of books", body = [BookResponse]),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_books(
    repository: web::Data<dyn Repository<Book>>,
    policies: web::Data<AccessPolicies>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let log = OperationLog::new(ENTITY, "list");
    log.info("Fetching all books");
    let claims = authorize(&req, policies.books.read_requires_admin)?;

    let books = repository.find_all().await.map_err(|e| log.fault(&e))?;
    let response: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();

    log.info(format_args!(
        "Returning {} books to {}",
        response.len(),
        claims.sub
    ));
    Ok(HttpResponse::Ok().json(response))
}

/// Get a specific book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Unexpected failure", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_book(
    repository: web::Data<dyn Repository<Book>>,
    policies: web::Data<AccessPolicies>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "get");
    log.info(format_args!("Fetching book {}", id));
    authorize(&req, policies.books.read_requires_admin)?;

    let book = repository
        .find_by_id(id)
        .await
        .map_err(|e| log.fault(&e))?
        .ok_or_else(|| {
            log.warn(format_args!("Book {} not found", id));
            ApiError::NotFound
        })?;

    log.info(format_args!("Returning book {}", id));
    Ok(HttpResponse::Ok().json(BookResponse::from(book)))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "Books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing body or validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 500, description = "Book could not be stored", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_book(
    repository: web::Data<dyn Repository<Book>>,
    policies: web::Data<AccessPolicies>,
    body: Option<web::Json<CreateBookRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let log = OperationLog::new(ENTITY, "create");
    log.info("Creating book");
    let claims = authorize(&req, policies.books.create_requires_admin)?;

    let body = body
        .ok_or_else(|| log.reject(ApiError::bad_request(CODE_MISSING_BODY, ERR_MISSING_BODY)))?
        .into_inner();
    body.validate()
        .map_err(|e| log.reject(validation_errors_to_api_error(e)))?;

    let mut book = Book::from(body);
    let stored = repository
        .create(&mut book)
        .await
        .map_err(|e| log.fault(&e))?;
    if !stored {
        return Err(log.refused(format_args!("New book '{}'", mask_text(&book.title))));
    }

    log.info(format_args!("Book {} created by {}", book.id, claims.sub));
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/books/{}", book.id)))
        .json(BookResponse::from(book)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBookRequest,
    responses(
        (status = 204, description = "Book updated"),
        (status = 400, description = "Invalid id, id mismatch, missing body or validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Book could not be stored", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_book(
    repository: web::Data<dyn Repository<Book>>,
    path: web::Path<i64>,
    body: Option<web::Json<UpdateBookRequest>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "update");
    log.info(format_args!("Updating book {}", id));
    let claims = authorize(&req, true)?;

    validate_positive_id(id).map_err(|e| log.reject(e))?;
    let body = body
        .ok_or_else(|| log.reject(ApiError::bad_request(CODE_MISSING_BODY, ERR_MISSING_BODY)))?
        .into_inner();
    validate_ids_match(id, body.id).map_err(|e| log.reject(e))?;

    if !repository.exists(id).await.map_err(|e| log.fault(&e))? {
        log.warn(format_args!("Book {} not found", id));
        return Err(ApiError::NotFound);
    }

    body.validate()
        .map_err(|e| log.reject(validation_errors_to_api_error(e)))?;

    let book = Book::from(body);
    if !repository.update(&book).await.map_err(|e| log.fault(&e))? {
        return Err(log.refused(format_args!("Update of book {}", id)));
    }

    log.info(format_args!("Book {} updated by {}", id, claims.sub));
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid id", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::models::ErrorResponse),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Book could not be deleted", body = String)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_book(
    repository: web::Data<dyn Repository<Book>>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let log = OperationLog::new(ENTITY, "delete");
    log.info(format_args!("Deleting book {}", id));
    let claims = authorize(&req, true)?;

    validate_positive_id(id).map_err(|e| log.reject(e))?;

    if !repository.exists(id).await.map_err(|e| log.fault(&e))? {
        log.warn(format_args!("Book {} not found", id));
        return Err(ApiError::NotFound);
    }

    let book = repository
        .find_by_id(id)
        .await
        .map_err(|e| log.fault(&e))?
        .ok_or_else(|| {
            log.warn(format_args!("Book {} disappeared before delete", id));
            ApiError::NotFound
        })?;

    if !repository.delete(&book).await.map_err(|e| log.fault(&e))? {
        return Err(log.refused(format_args!("Delete of book {}", id)));
    }

    log.info(format_args!("Book {} deleted by {}", id, claims.sub));
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{header, StatusCode};
    use actix_web::test::{self, TestRequest};
    use serde_json::{json, Value};

    use crate::config::{AccessPolicies, AccessPolicy};
    use crate::constants::{
        CODE_ADMIN_REQUIRED, CODE_ID_MISMATCH, CODE_INVALID_ID, CODE_MISSING_BODY,
        CODE_VALIDATION_FAILED, ERR_INTERNAL,
    };
    use crate::models::{AuthorResponse, Book, BookResponse};
    use crate::repositories::MemoryCatalog;
    use crate::test_support::{
        admin_token, bearer, catalog, init_app, numbered, reader_token, sample_author,
        sample_book, Fault, FaultyRepository,
    };

    /// Catalog with authors 1 and 2 and the given books.
    fn shelf(books: Vec<Book>) -> Arc<MemoryCatalog> {
        catalog(
            numbered(books),
            numbered(vec![
                sample_author("Frank", "Herbert"),
                sample_author("Brian", "Herbert"),
            ]),
        )
    }

    fn dune_payload() -> Value {
        json!({
            "title": "Dune",
            "year": 1965,
            "isbn": "978-0-441-17271-9",
            "summary": "Desert planet politics",
            "authorIds": [2, 1]
        })
    }

    #[actix_web::test]
    async fn test_create_then_get_returns_same_fields() {
        let app = init_app!(shelf(Vec::new()));

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(dune_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/api/books/1"
        );
        let created: BookResponse = test::read_body_json(resp).await;
        assert_eq!(created.id, 1);

        let req = TestRequest::get()
            .uri("/api/books/1")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: BookResponse = test::read_body_json(resp).await;
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.year, 1965);
        assert_eq!(fetched.isbn, "978-0-441-17271-9");
        assert_eq!(fetched.author_ids, vec![1, 2]);
        assert_eq!(fetched.image, None);
    }

    #[actix_web::test]
    async fn test_created_book_shows_up_on_its_authors() {
        let app = init_app!(shelf(Vec::new()));

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(dune_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        for uri in ["/api/authors/1", "/api/authors/2"] {
            let req = TestRequest::get()
                .uri(uri)
                .insert_header(bearer(&reader_token()))
                .to_request();
            let author: AuthorResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(author.book_ids, vec![1], "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_create_with_unknown_author_is_refused() {
        let shared = shelf(Vec::new());
        let app = init_app!(shared.clone());

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({
                "title": "Dune",
                "year": 1965,
                "isbn": "0441172717",
                "authorIds": [1, 999]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, ERR_INTERNAL.as_bytes());

        let req = TestRequest::get()
            .uri("/api/books")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let listed: Vec<BookResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());

        let req = TestRequest::get()
            .uri("/api/authors/1")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let author: AuthorResponse = test::call_and_read_body_json(&app, req).await;
        assert!(author.book_ids.is_empty());
    }

    #[actix_web::test]
    async fn test_update_with_unknown_author_keeps_old_links() {
        let app = init_app!(shelf(vec![sample_book("Dune")]));

        let req = TestRequest::put()
            .uri("/api/books/1")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({
                "id": 1,
                "title": "Dune",
                "year": 1965,
                "isbn": "0441172717",
                "authorIds": [999]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = TestRequest::get()
            .uri("/api/books/1")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let fetched: BookResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.author_ids, vec![1]);
    }

    #[actix_web::test]
    async fn test_list_returns_all_books() {
        let app = init_app!(shelf(vec![sample_book("Dune"), sample_book("Emma")]));

        let req = TestRequest::get()
            .uri("/api/books")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed: Vec<BookResponse> = test::read_body_json(resp).await;
        let titles: Vec<&str> = listed.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
    }

    #[actix_web::test]
    async fn test_requests_without_valid_token_are_unauthorized() {
        let app = init_app!(shelf(Vec::new()));

        let req = TestRequest::get().uri("/api/books").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );

        let req = TestRequest::get()
            .uri("/api/books")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_create_requires_admin_by_default() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&reader_token()))
            .set_json(dune_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_ADMIN_REQUIRED);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_open_create_policy_admits_any_caller() {
        let policies = AccessPolicies {
            books: AccessPolicy {
                read_requires_admin: false,
                create_requires_admin: false,
            },
            ..AccessPolicies::default()
        };
        let shared = shelf(Vec::new());
        let app = init_app!(shared.clone(), shared, policies);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&reader_token()))
            .set_json(dune_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_restricted_read_policy_rejects_non_admins() {
        let policies = AccessPolicies {
            books: AccessPolicy {
                read_requires_admin: true,
                create_requires_admin: true,
            },
            ..AccessPolicies::default()
        };
        let shared = shelf(vec![sample_book("Dune")]);
        let app = init_app!(shared.clone(), shared, policies);

        for uri in ["/api/books", "/api/books/1"] {
            let req = TestRequest::get()
                .uri(uri)
                .insert_header(bearer(&reader_token()))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", uri);

            let req = TestRequest::get()
                .uri(uri)
                .insert_header(bearer(&admin_token()))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_create_without_body_is_bad_request() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_MISSING_BODY);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_create_with_invalid_fields_reports_each_problem() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "year": 1965, "isbn": "12345" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_VALIDATION_FAILED);
        assert_eq!(
            body["errors"],
            json!([
                "ISBN must contain 10 or 13 digits, optionally separated by hyphens",
                "Title is required"
            ])
        );
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_create_with_overlong_isbn_is_bad_request() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({
                "title": "The Rust Programming Language",
                "year": 2019,
                "isbn": "9-7-8-1-7-1-8-5-0-0-4-4-0"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"], json!(["ISBN must be at most 17 characters"]));
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_create_refused_by_repository_is_internal_error() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::RejectWrites);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::post()
            .uri("/api/books")
            .insert_header(bearer(&admin_token()))
            .set_json(dune_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, ERR_INTERNAL.as_bytes());
        assert_eq!(books.write_calls(), 1);
    }

    #[actix_web::test]
    async fn test_storage_fault_hides_details_from_client() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::Unavailable);
        let app = init_app!(books, shared);

        let req = TestRequest::get()
            .uri("/api/books")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = test::read_body(resp).await;
        assert_eq!(body, ERR_INTERNAL.as_bytes());
    }

    #[actix_web::test]
    async fn test_get_missing_book_is_not_found() {
        let app = init_app!(shelf(Vec::new()));

        let req = TestRequest::get()
            .uri("/api/books/99")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(test::read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn test_update_replaces_fields() {
        let app = init_app!(shelf(vec![sample_book("Dune")]));

        let req = TestRequest::put()
            .uri("/api/books/1")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({
                "id": 1,
                "title": "Dune Messiah",
                "year": 1969,
                "isbn": "0-399-12817-4",
                "image": "covers/messiah.jpg"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let req = TestRequest::get()
            .uri("/api/books/1")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let fetched: BookResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "Dune Messiah");
        assert_eq!(fetched.year, 1969);
        assert_eq!(fetched.summary, None);
        assert_eq!(fetched.image.as_deref(), Some("covers/messiah.jpg"));
        assert!(fetched.author_ids.is_empty());
    }

    #[actix_web::test]
    async fn test_update_with_mismatched_ids_never_touches_storage() {
        let shared = shelf(vec![sample_book("Dune")]);
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::put()
            .uri("/api/books/5")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "id": 6, "title": "Dune", "year": 1965, "isbn": "0441172717" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_ID_MISMATCH);
        assert_eq!(books.lookup_calls(), 0);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_update_rejects_non_positive_id() {
        let app = init_app!(shelf(Vec::new()));

        let req = TestRequest::put()
            .uri("/api/books/0")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "id": 0, "title": "Dune", "year": 1965, "isbn": "0441172717" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_INVALID_ID);
    }

    #[actix_web::test]
    async fn test_update_missing_book_checks_existence_before_validation() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        // Body is invalid, but the missing book wins.
        let req = TestRequest::put()
            .uri("/api/books/3")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "id": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_update_existing_book_with_invalid_body_is_bad_request() {
        let shared = shelf(vec![sample_book("Dune")]);
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::put()
            .uri("/api/books/1")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "id": 1, "title": "", "year": 1965, "isbn": "0441172717" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_VALIDATION_FAILED);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_update_refused_by_repository_is_internal_error() {
        let shared = shelf(vec![sample_book("Dune")]);
        let books = FaultyRepository::new(shared.clone(), Fault::RejectWrites);
        let app = init_app!(books, shared);

        let req = TestRequest::put()
            .uri("/api/books/1")
            .insert_header(bearer(&admin_token()))
            .set_json(json!({ "id": 1, "title": "Dune", "year": 1965, "isbn": "0441172717" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_update_requires_admin() {
        let app = init_app!(shelf(vec![sample_book("Dune")]));

        let req = TestRequest::put()
            .uri("/api/books/1")
            .insert_header(bearer(&reader_token()))
            .set_json(json!({ "id": 1, "title": "Dune", "year": 1965, "isbn": "0441172717" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_delete_non_positive_id_skips_existence_check() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        for uri in ["/api/books/0", "/api/books/-4"] {
            let req = TestRequest::delete()
                .uri(uri)
                .insert_header(bearer(&admin_token()))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
        assert_eq!(books.lookup_calls(), 0);
    }

    #[actix_web::test]
    async fn test_delete_missing_book_never_touches_storage() {
        let shared = shelf(Vec::new());
        let books = FaultyRepository::new(shared.clone(), Fault::None);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::delete()
            .uri("/api/books/8")
            .insert_header(bearer(&admin_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(books.write_calls(), 0);
    }

    #[actix_web::test]
    async fn test_delete_removes_book() {
        let app = init_app!(shelf(vec![sample_book("Dune"), sample_book("Emma")]));

        let req = TestRequest::delete()
            .uri("/api/books/2")
            .insert_header(bearer(&admin_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = TestRequest::get()
            .uri("/api/books/2")
            .insert_header(bearer(&admin_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::get()
            .uri("/api/authors/1")
            .insert_header(bearer(&reader_token()))
            .to_request();
        let author: AuthorResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(author.book_ids, vec![1]);
    }

    #[actix_web::test]
    async fn test_delete_refused_by_repository_is_internal_error() {
        let shared = shelf(vec![sample_book("Dune")]);
        let books = FaultyRepository::new(shared.clone(), Fault::RejectWrites);
        let app = init_app!(books.clone(), shared);

        let req = TestRequest::delete()
            .uri("/api/books/1")
            .insert_header(bearer(&admin_token()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, ERR_INTERNAL.as_bytes());
        assert_eq!(books.write_calls(), 1);
    }
}
