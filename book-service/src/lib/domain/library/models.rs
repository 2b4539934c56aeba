use crate::book::models::Book;
use crate::book::query::NormalizedParams;

/// Token pair handed out on sign-up, sign-in and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// One page of a book listing together with the parameters actually applied.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub params: NormalizedParams,
}
