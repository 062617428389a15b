use reqwest::Url;

use crate::domain::entities::query::PageRequest;
use crate::usecase::ports::page_source::FetchError;

pub const PAGE_PARAM: &str = "page";
pub const ORDER_BY_PARAM: &str = "orderby";

/// Ordered key/value pairs for one page request: page, sort, search, then each filter.
pub fn build_query_params(request: &PageRequest, filter_field: &str) -> Vec<(String, String)> {
    let signature = &request.signature;
    let mut params = vec![(PAGE_PARAM.to_string(), request.page.to_string())];

    if let Some(order) = &signature.order_by {
        params.push((ORDER_BY_PARAM.to_string(), order.to_param()));
    }
    if !signature.search.is_empty() && !filter_field.is_empty() {
        params.push((filter_field.to_string(), signature.search.clone()));
    }
    for filter in &signature.filters {
        params.push((filter.field.clone(), filter.value.clone()));
    }

    params
}

pub fn endpoint_url(data_source: &str, params: &[(String, String)]) -> Result<Url, FetchError> {
    Url::parse_with_params(data_source, params)
        .map_err(|err| FetchError::Transport(format!("invalid data source {data_source}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::query::{FilterDescriptor, QuerySignature, SortOrder};

    fn request(page: u32, signature: QuerySignature) -> PageRequest {
        PageRequest { page, signature }
    }

    #[test]
    fn unsorted_unfiltered_request_only_carries_page() {
        let params = build_query_params(&request(1, QuerySignature::default()), "title");

        assert_eq!(params, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn params_keep_page_sort_search_filter_order() {
        let signature = QuerySignature {
            order_by: Some(SortOrder::descending("name")),
            filters: vec![
                FilterDescriptor::new("status", "open"),
                FilterDescriptor::new("owner", "ann"),
            ],
            search: "foo".to_string(),
        };

        let params = build_query_params(&request(3, signature), "title");

        let keys: Vec<&str> = params.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["page", "orderby", "title", "status", "owner"]);
        assert_eq!(params[1].1, "-name");
        assert_eq!(params[2].1, "foo");
    }

    #[test]
    fn endpoint_url_serializes_params_once() {
        let signature = QuerySignature {
            order_by: None,
            filters: Vec::new(),
            search: "foo bar".to_string(),
        };
        let params = build_query_params(&request(1, signature), "title");

        let url = endpoint_url("http://localhost:8080/api/items", &params)
            .expect("absolute data source should parse");

        assert_eq!(url.path(), "/api/items");
        assert_eq!(url.query(), Some("page=1&title=foo+bar"));
    }

    #[test]
    fn relative_data_source_is_rejected() {
        let err = endpoint_url("/api/items", &[]).expect_err("relative url should fail");

        assert!(err.to_string().contains("/api/items"));
    }
}
