use serde::{Deserialize, Serialize};

use crate::{
    domain::Artwork,
    error::{ApiError, ErrorCode},
};

/// Fields requested from the artworks endpoint; everything else is left on the server.
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub fields: String,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            fields: ARTWORK_FIELDS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// Wire shape of `GET /artworks`.
///
/// The record count normally lives at `meta.pagination.total`; `pagination.total` and a bare
/// `total` at the root are accepted as fallbacks, in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkListResponse {
    #[serde(default)]
    pub data: Option<Vec<Artwork>>,
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl ArtworkListResponse {
    pub fn total_records(&self) -> Option<u64> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.pagination.as_ref())
            .and_then(|pagination| pagination.total)
            .or_else(|| self.pagination.as_ref().and_then(|p| p.total))
            .or(self.total)
    }

    pub fn into_page(self) -> Result<ArtworkPage, ApiError> {
        let total_records = self.total_records().ok_or_else(|| {
            ApiError::new(
                ErrorCode::MissingTotal,
                "response carries no record count at meta.pagination.total, pagination.total or total",
            )
        })?;
        let rows = self
            .data
            .ok_or_else(|| ApiError::new(ErrorCode::MissingData, "response has no data array"))?;
        Ok(ArtworkPage {
            rows,
            total_records,
        })
    }
}

/// A validated page of artworks together with the server-side record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkPage {
    pub rows: Vec<Artwork>,
    pub total_records: u64,
}

pub fn parse_artwork_page(body: &[u8]) -> Result<ArtworkPage, ApiError> {
    let response: ArtworkListResponse = serde_json::from_slice(body)
        .map_err(|e| ApiError::new(ErrorCode::InvalidJson, e.to_string()))?;
    response.into_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtworkId;

    #[test]
    fn reads_total_from_meta_pagination() {
        let page = parse_artwork_page(
            br#"{
                "pagination": {"total": 1},
                "data": [
                    {"id": 1, "title": "A", "artist_display": "Someone\nFrance"},
                    {"id": 2, "title": "B", "date_start": -500, "date_end": -480}
                ],
                "meta": {"pagination": {"total": 126000, "limit": 10}}
            }"#,
        )
        .expect("page");
        assert_eq!(page.total_records, 126000);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].artist_display.as_deref(), Some("Someone\nFrance"));
        assert_eq!(page.rows[1].id, ArtworkId(2));
        assert_eq!(page.rows[1].date_start, Some(-500));
    }

    #[test]
    fn falls_back_to_root_pagination_then_root_total() {
        let page = parse_artwork_page(br#"{"data": [], "pagination": {"total": 42}}"#)
            .expect("root pagination");
        assert_eq!(page.total_records, 42);

        let page = parse_artwork_page(br#"{"data": [], "meta": {}, "total": 7}"#)
            .expect("root total");
        assert_eq!(page.total_records, 7);
    }

    #[test]
    fn missing_total_is_rejected_instead_of_defaulting_to_zero() {
        let err = parse_artwork_page(br#"{"data": [{"id": 1}]}"#).expect_err("no total");
        assert_eq!(err.code, ErrorCode::MissingTotal);
    }

    #[test]
    fn missing_data_is_rejected() {
        let err = parse_artwork_page(br#"{"meta": {"pagination": {"total": 3}}}"#)
            .expect_err("no data");
        assert_eq!(err.code, ErrorCode::MissingData);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let err = parse_artwork_page(br#"{"data": [{"title": "no id"}], "total": 1}"#)
            .expect_err("row without id");
        assert_eq!(err.code, ErrorCode::InvalidJson);

        let err = parse_artwork_page(b"<html>gateway timeout</html>").expect_err("not json");
        assert_eq!(err.code, ErrorCode::InvalidJson);
    }

    #[test]
    fn page_query_requests_only_displayed_fields() {
        let query = PageQuery::new(3, 10);
        assert_eq!(query.page, 3);
        assert!(query.fields.split(',').any(|field| field == "inscriptions"));
    }
}
