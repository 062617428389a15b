use std::sync::Arc;

use crate::domain::entities::query::PageRequest;
use crate::domain::entities::record::PageResponse;
use crate::usecase::ports::page_source::{FetchError, PageSource};

pub struct OverviewService {
    source: Arc<dyn PageSource>,
}

impl OverviewService {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    pub async fn load_page(
        &self,
        request: &PageRequest,
        generation: u64,
    ) -> Result<PageResponse, FetchError> {
        tracing::debug!(
            page = request.page,
            generation,
            order_by = ?request.signature.order_by,
            filters = request.signature.filters.len(),
            search = %request.signature.search,
            "fetching page"
        );

        match self.source.fetch_page(request).await {
            Ok(response) => {
                tracing::debug!(
                    page = request.page,
                    generation,
                    rows = response.rows.len(),
                    page_count = response.meta.page_count,
                    total_count = response.meta.total_count,
                    "page fetched"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(page = request.page, generation, error = %err, "page fetch failed");
                Err(err)
            }
        }
    }
}
