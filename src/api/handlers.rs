use crate::analytics;
use crate::api::AppState;
use crate::auth::{
    expired_cookie, read_cookie, session_cookie, AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::error::{AppError, Result};
use crate::models::*;
use crate::query::{
    search_failures, search_solutions, sort_failures, sort_solutions, FailureSort, Page, PageMark,
    SolutionSort,
};
use axum::{
    extract::{Path, Query, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Paged list response with the navigation window pre-computed
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub window: Vec<PageMark>,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let window = page.window();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
            has_prev: page.has_prev,
            has_next: page.has_next,
            window,
        }
    }
}

fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// List failures with filtering, sorting, and pagination
pub async fn list_failures(
    State(state): State<AppState>,
    Query(params): Query<ListFailuresQuery>,
) -> Result<Json<PagedResponse<Failure>>> {
    let records = state.store.failures().await?;
    let tags = parse_tags(params.tags.as_deref());

    let mut result = search_failures(&records, params.q.as_deref().unwrap_or(""), &tags);

    // Predicate filters compose here, at the call site, as successive passes
    if let Some(status) = params.status {
        result.retain(|failure| failure.status == status);
    }
    if let Some(priority) = params.priority {
        result.retain(|failure| failure.priority == priority);
    }
    if let Some(ref author) = params.author {
        if !author.is_empty() {
            let needle = author.to_lowercase();
            result.retain(|failure| failure.author.name.to_lowercase().contains(&needle));
        }
    }
    if let Some(days) = params.days {
        let cutoff = Utc::now() - Duration::days(days);
        result.retain(|failure| failure.created_at >= cutoff);
    }

    sort_failures(&mut result, params.sort.unwrap_or_default());

    let per_page = params
        .per_page
        .unwrap_or(state.catalog.default_page_size)
        .min(state.catalog.max_page_size);
    let page = Page::slice(result, params.page.unwrap_or(1), per_page);

    Ok(Json(page.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListFailuresQuery {
    pub q: Option<String>,
    /// Comma-separated tag list
    pub tags: Option<String>,
    pub status: Option<FailureStatus>,
    pub priority: Option<Priority>,
    pub author: Option<String>,
    /// Only failures created within the last N days
    pub days: Option<i64>,
    pub sort: Option<FailureSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Get a failure by ID
pub async fn get_failure(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Failure>> {
    let failure = state
        .store
        .failure(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Failure {} not found", id)))?;
    Ok(Json(failure))
}

/// List the solutions linked to one failure
pub async fn failure_solutions(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Solution>>> {
    if state.store.failure(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Failure {} not found", id)));
    }

    let solutions = state.store.solutions_for_failure(id).await?;
    Ok(Json(solutions))
}

/// Submit a new failure report.
///
/// The collections are fixed at startup, so the draft is validated and
/// acknowledged without being written back.
pub async fn create_failure(
    Json(request): Json<CreateFailureRequest>,
) -> Result<(StatusCode, Json<DraftAck<CreateFailureRequest>>)> {
    request.validate()?;

    tracing::info!(title = %request.title, "Failure draft accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(DraftAck {
            status: "accepted".to_string(),
            draft: request,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateFailureRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub priority: Priority,
    pub context: DeploymentContext,
    pub expected_behavior: Option<String>,
    pub observed_behavior: Option<String>,
    pub stack_trace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftAck<T> {
    pub status: String,
    pub draft: T,
}

/// List solutions with filtering, sorting, and pagination
pub async fn list_solutions(
    State(state): State<AppState>,
    Query(params): Query<ListSolutionsQuery>,
) -> Result<Json<PagedResponse<Solution>>> {
    let records = state.store.solutions().await?;
    let tags = parse_tags(params.tags.as_deref());

    let mut result = search_solutions(&records, params.q.as_deref().unwrap_or(""), &tags);

    if let Some(band) = params.effectiveness {
        let (min, max) = band.bounds();
        result.retain(|solution| solution.effectiveness >= min && solution.effectiveness <= max);
    }
    if let Some(ref failure_tag) = params.failure_tag {
        if !failure_tag.is_empty() {
            result.retain(|solution| solution.has_tag_matching(failure_tag));
        }
    }
    if let Some(ref author) = params.author {
        if !author.is_empty() {
            let needle = author.to_lowercase();
            result.retain(|solution| solution.author.name.to_lowercase().contains(&needle));
        }
    }
    if let Some(days) = params.days {
        let cutoff = Utc::now() - Duration::days(days);
        result.retain(|solution| solution.created_at >= cutoff);
    }

    sort_solutions(&mut result, params.sort.unwrap_or_default());

    let per_page = params
        .per_page
        .unwrap_or(state.catalog.default_page_size)
        .min(state.catalog.max_page_size);
    let page = Page::slice(result, params.page.unwrap_or(1), per_page);

    Ok(Json(page.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListSolutionsQuery {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub effectiveness: Option<EffectivenessBand>,
    /// Restrict to solutions tagged for a failure type
    pub failure_tag: Option<String>,
    pub author: Option<String>,
    pub days: Option<i64>,
    pub sort: Option<SolutionSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Effectiveness ranges offered by the solutions filter
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EffectivenessBand {
    High,
    Medium,
    Low,
}

impl EffectivenessBand {
    /// Inclusive effectiveness bounds for the band
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            EffectivenessBand::High => (4.0, 5.0),
            EffectivenessBand::Medium => (3.0, 4.0),
            EffectivenessBand::Low => (1.0, 3.0),
        }
    }
}

/// Get a solution by ID
pub async fn get_solution(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Solution>> {
    let solution = state
        .store
        .solution(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Solution {} not found", id)))?;
    Ok(Json(solution))
}

/// Submit a new solution draft; validated and acknowledged, never stored
pub async fn create_solution(
    State(state): State<AppState>,
    Json(request): Json<CreateSolutionRequest>,
) -> Result<(StatusCode, Json<DraftAck<CreateSolutionRequest>>)> {
    request.validate()?;

    if state.store.failure(request.related_failure_id).await?.is_none() {
        return Err(AppError::Validation(format!(
            "related_failure_id: failure {} does not exist",
            request.related_failure_id
        )));
    }

    tracing::info!(
        title = %request.title,
        related_failure_id = request.related_failure_id,
        "Solution draft accepted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DraftAck {
            status: "accepted".to_string(),
            draft: request,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateSolutionRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub effectiveness: f64,
    pub related_failure_id: u32,
    pub code: Option<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Combined search across both collections
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params.q.as_deref().unwrap_or("");
    let kind = params.kind.unwrap_or_default();

    let mut results = Vec::new();

    if kind != SearchKind::Solutions {
        let failures = state.store.failures().await?;
        results.extend(
            search_failures(&failures, query, &[])
                .into_iter()
                .map(SearchResult::Failure),
        );
    }
    if kind != SearchKind::Failures {
        let solutions = state.store.solutions().await?;
        results.extend(
            search_solutions(&solutions, query, &[])
                .into_iter()
                .map(SearchResult::Solution),
        );
    }

    Ok(Json(SearchResponse {
        total: results.len() as u64,
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub kind: Option<SearchKind>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    All,
    Failures,
    Solutions,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    Failure(Failure),
    Solution(Solution),
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: u64,
    pub results: Vec<SearchResult>,
}

/// Dashboard overview numbers
pub async fn overview(State(state): State<AppState>) -> Result<Json<analytics::Overview>> {
    let failures = state.store.failures().await?;
    let solutions = state.store.solutions().await?;
    Ok(Json(analytics::overview(&failures, &solutions)))
}

/// Report aggregates
pub async fn reports(State(state): State<AppState>) -> Result<Json<analytics::Report>> {
    let failures = state.store.failures().await?;
    let solutions = state.store.solutions().await?;
    Ok(Json(analytics::report(&failures, &solutions)))
}

/// Register a new account via the remote identity service
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(HeaderMap, Json<AuthAck>)> {
    // Field-level validation happens before any network call
    request.validate()?;

    let tokens = state
        .identity
        .register(&request.name, &request.email, &request.password)
        .await?;

    let headers = token_cookies(&state, &tokens.token, &tokens.refresh_token)?;
    Ok((headers, Json(AuthAck { success: true })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Sign in via the remote identity service
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthAck>)> {
    request.validate()?;

    let tokens = state
        .identity
        .sign_in(&request.email, &request.password)
        .await?;

    let headers = token_cookies(&state, &tokens.token, &tokens.refresh_token)?;
    Ok((headers, Json(AuthAck { success: true })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthAck {
    pub success: bool,
}

/// Expire both session cookies
pub async fn logout(State(state): State<AppState>) -> Result<(HeaderMap, Json<AuthAck>)> {
    let secure = state.identity_cfg.secure_cookies;
    let mut headers = HeaderMap::new();
    append_cookie(&mut headers, expired_cookie(AUTH_TOKEN_COOKIE, secure))?;
    append_cookie(&mut headers, expired_cookie(REFRESH_TOKEN_COOKIE, secure))?;

    Ok((headers, Json(AuthAck { success: true })))
}

/// Report whether the access-token cookie is present.
///
/// No remote verification happens here; presence of the cookie is the whole
/// session check.
pub async fn session(headers: HeaderMap) -> Result<Json<SessionResponse>> {
    let authenticated = read_cookie(&headers, AUTH_TOKEN_COOKIE).is_some();
    Ok(Json(SessionResponse { authenticated }))
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

fn token_cookies(state: &AppState, token: &str, refresh_token: &str) -> Result<HeaderMap> {
    let cfg = &state.identity_cfg;
    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        session_cookie(
            AUTH_TOKEN_COOKIE,
            token,
            cfg.token_max_age_secs,
            cfg.secure_cookies,
        ),
    )?;
    append_cookie(
        &mut headers,
        session_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            cfg.refresh_token_max_age_secs,
            cfg.secure_cookies,
        ),
    )?;
    Ok(headers)
}

fn append_cookie(headers: &mut HeaderMap, cookie: String) -> Result<()> {
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}
