use core::convert::Infallible;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rescata_products::{ClassifiedProduct, ProductState};

/// Which products a listing shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogFilter {
    /// `todos`
    #[default]
    All,
    /// `gratuitos`: price is zero, whatever the state.
    Free,
    /// `porVencer`: expiring soon *or* already expired.
    NeedsAttention,
    /// Any state name: exact match on the derived state.
    State(ProductState),
    /// A value that names no state. Matches nothing.
    Unrecognized(String),
}

impl CatalogFilter {
    pub fn matches(&self, item: &ClassifiedProduct<'_>) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::Free => item.product.is_free(),
            CatalogFilter::NeedsAttention => item.state.needs_attention(),
            CatalogFilter::State(state) => item.state == *state,
            CatalogFilter::Unrecognized(_) => false,
        }
    }
}

impl FromStr for CatalogFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "todos" => CatalogFilter::All,
            "gratuitos" => CatalogFilter::Free,
            "porVencer" => CatalogFilter::NeedsAttention,
            other => match ProductState::from_wire(other) {
                Some(state) => CatalogFilter::State(state),
                None => CatalogFilter::Unrecognized(other.to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_values() {
        assert_eq!("todos".parse::<CatalogFilter>(), Ok(CatalogFilter::All));
        assert_eq!("gratuitos".parse::<CatalogFilter>(), Ok(CatalogFilter::Free));
        assert_eq!("porVencer".parse::<CatalogFilter>(), Ok(CatalogFilter::NeedsAttention));
        assert_eq!("agotado".parse::<CatalogFilter>(), Ok(CatalogFilter::State(ProductState::OutOfStock)));
        assert_eq!("disponible".parse::<CatalogFilter>(), Ok(CatalogFilter::State(ProductState::Available)));
        assert_eq!(
            "baratos".parse::<CatalogFilter>(),
            Ok(CatalogFilter::Unrecognized("baratos".to_string()))
        );
    }
}
