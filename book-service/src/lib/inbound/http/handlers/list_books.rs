use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::book::query::BookFilter;
use crate::book::query::BookSort;
use crate::book::query::NormalizedParams;
use crate::book::query::SortField;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::library::ports::LibraryServicePort;

/// Raw query string. Numbers stay strings here so a non-numeric value is
/// reported as a bad request rather than silently defaulted.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListBooksQuery {
    fn try_into_sort(&self) -> Result<BookSort, ApiError> {
        Ok(BookSort {
            sort_field: self.sort.clone().unwrap_or_default(),
            direction: self.direction.clone().unwrap_or_default(),
            limit: parse_number("limit", self.limit.as_deref())?,
            offset: parse_number("offset", self.offset.as_deref())?,
        })
    }
}

/// Absent or empty parameters read as 0, which normalization turns into the
/// default limit and the first page.
fn parse_number(name: &str, value: Option<&str>) -> Result<i64, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("{} param should be a number", name))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBooksResponseData {
    pub books: Vec<BookData>,
    pub query: QueryData,
}

/// Parameters actually applied after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryData {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortField,
    pub direction: i32,
}

impl From<&NormalizedParams> for QueryData {
    fn from(params: &NormalizedParams) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
            sort: params.sort_field,
            direction: params.direction.sign(),
        }
    }
}

/// Anonymous callers see every book; authenticated callers see their own.
pub async fn list_books<S: LibraryServicePort>(
    State(state): State<AppState<S>>,
    user: Option<Extension<AuthenticatedUser>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<ApiSuccess<ListBooksResponseData>, ApiError> {
    let sort = query.try_into_sort()?;

    let email = match user {
        Some(Extension(user)) => state
            .library_service
            .find_user(&user.user_id)
            .await?
            .email
            .to_string(),
        None => String::new(),
    };
    let filter = BookFilter::new(email, query.search.unwrap_or_default());

    let page = state.library_service.get_books(filter, sort).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListBooksResponseData {
            books: page.books.iter().map(BookData::from).collect(),
            query: QueryData::from(&page.params),
        },
    ))
}
