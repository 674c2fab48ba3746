use mzdex_core::request::SearchRequest;
use mzdex_search::SearchEngine;

use crate::cli::root_commands::PageArgs;

/// Request seeded with paging and the configured default page size.
pub fn base_request(paging: &PageArgs, engine: &SearchEngine) -> SearchRequest {
    let page_size = paging
        .page_size
        .unwrap_or(engine.config().search.default_page_size);
    SearchRequest::default().with_page(paging.page, page_size)
}

/// `--tol-ppm` or the configured default.
pub fn tolerance(tol_ppm: Option<u32>, engine: &SearchEngine) -> u32 {
    tol_ppm.unwrap_or(engine.config().search.default_tolerance_ppm)
}
