use std::path::Path;

use anyhow::{Result, anyhow};

use rescata_catalog::{CatalogFilter, CatalogQuery, SortKey, SortSpec, run as run_query};
use rescata_infra::MarketplaceConfig;

use super::{CommandResult, load_products, reference_time};

#[derive(Debug, Clone)]
pub struct CatalogArgs {
    pub filter: String,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: i64,
    pub page_size: Option<usize>,
}

pub fn build_query(config: &MarketplaceConfig, args: &CatalogArgs) -> Result<CatalogQuery> {
    let filter: CatalogFilter = match args.filter.parse() {
        Ok(filter) => filter,
        Err(never) => match never {},
    };
    let mut query = CatalogQuery::new()
        .filter(filter)
        .page(args.page, args.page_size.unwrap_or(config.catalog.default_page_size))
        .limit_page_size(config.catalog.max_page_size);

    if let Some(raw) = &args.sort {
        let key: SortKey = raw.parse().map_err(|e: String| anyhow!(e))?;
        query = query.sort(if args.desc {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        });
    }
    Ok(query)
}

pub fn run(config: &MarketplaceConfig, file: &Path, args: &CatalogArgs, now: Option<&str>) -> Result<CommandResult> {
    let now = reference_time(now)?;
    let query = build_query(config, args)?;
    let products = load_products(file)?;
    let page = run_query(&products, &query, &config.lifecycle, now);
    Ok(CommandResult::ok(serde_json::to_string_pretty(&page)?))
}
