use derive_getters::Getters;
use derive_new::new;
use strum_macros::{Display, EnumIter};

/// Sort column accepted by `GET /stocks`. Serialized names match the
/// backend columns.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    Symbol,
    Name,
    CurrentPrice,
}

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Filters for a stock list request. Empty filters are omitted from the
/// query string; `order` is only meaningful together with `sort_by`.
#[derive(Clone, Debug, Default, Getters, new)]
pub struct StockQuery {
    search: Option<String>,
    sort_by: Option<SortKey>,
    order: SortOrder,
    watchlist_only: bool,
}

impl StockQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            if !search.is_empty() {
                params.push(("search", search.clone()));
            }
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by", sort_by.to_string()));
            params.push(("order", self.order.to_string()));
        }
        if self.watchlist_only {
            params.push(("watchlist", String::from("true")));
        }
        params
    }
}
