//! Search command - query an index.

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value, json};

use crate::factory::Factory;
use crate::io::PrintFlags;

#[derive(Args)]
pub struct SearchCmd {
    /// Index to search
    pub index: String,

    /// Full-text query
    #[arg(long)]
    pub query: Option<String>,

    /// Filter expression, e.g. "genres:Animation AND year > 2000"
    #[arg(long)]
    pub filters: Option<String>,

    /// Hits per page
    #[arg(long = "hitsPerPage")]
    pub hits_per_page: Option<u32>,

    /// Page to retrieve (0-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Attributes to include in each hit
    #[arg(long = "attributesToRetrieve", value_delimiter = ',')]
    pub attributes_to_retrieve: Option<Vec<String>>,

    /// Facets to count
    #[arg(long, value_delimiter = ',')]
    pub facets: Option<Vec<String>>,

    /// Search around a "lat,lng" point
    #[arg(long = "aroundLatLng")]
    pub around_lat_lng: Option<String>,

    /// Include ranking details in the response
    #[arg(long = "getRankingInfo")]
    pub get_ranking_info: bool,

    #[command(flatten)]
    pub print: PrintFlags,
}

impl SearchCmd {
    /// Only parameters the user set end up in the request.
    pub fn search_params(&self) -> Map<String, Value> {
        let mut params = Map::new();

        if let Some(query) = &self.query {
            params.insert("query".into(), json!(query));
        }
        if let Some(filters) = &self.filters {
            params.insert("filters".into(), json!(filters));
        }
        if let Some(hits) = self.hits_per_page {
            params.insert("hitsPerPage".into(), json!(hits));
        }
        if let Some(page) = self.page {
            params.insert("page".into(), json!(page));
        }
        if let Some(attrs) = &self.attributes_to_retrieve {
            params.insert("attributesToRetrieve".into(), json!(attrs));
        }
        if let Some(facets) = &self.facets {
            params.insert("facets".into(), json!(facets));
        }
        if let Some(around) = &self.around_lat_lng {
            params.insert("aroundLatLng".into(), json!(around));
        }
        if self.get_ranking_info {
            params.insert("getRankingInfo".into(), json!(true));
        }

        params
    }

    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.search_client()?;
        let params = self.search_params();

        f.io.start_progress("Searching");
        let res = client.search_single_index(&self.index, &params).await;
        f.io.stop_progress();

        self.print.print(&mut f.io, &res?)
    }
}
