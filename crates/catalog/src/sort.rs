use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use rescata_products::ClassifiedProduct;

/// Column a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Description,
    Price,
    Quantity,
    ExpiresOn,
    State,
    CreatedAt,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nombre" | "name" => Ok(SortKey::Name),
            "descripcion" | "description" => Ok(SortKey::Description),
            "precio" | "price" => Ok(SortKey::Price),
            "cantidad" | "quantity" => Ok(SortKey::Quantity),
            "vencimiento" | "expires_on" => Ok(SortKey::ExpiresOn),
            "estado" | "state" => Ok(SortKey::State),
            "createdAt" | "created_at" => Ok(SortKey::CreatedAt),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

impl SortKey {
    /// Ascending comparison. Text compares lexicographically, numbers
    /// numerically; products without an expiration sort after dated ones.
    pub fn compare(&self, a: &ClassifiedProduct<'_>, b: &ClassifiedProduct<'_>) -> Ordering {
        let (pa, pb) = (a.product, b.product);
        match self {
            SortKey::Name => pa.name.cmp(&pb.name),
            SortKey::Description => pa.description.cmp(&pb.description),
            SortKey::Price => pa.price.cmp(&pb.price),
            SortKey::Quantity => pa.quantity.cmp(&pb.quantity),
            SortKey::ExpiresOn => match (pa.expires_on, pb.expires_on) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::State => a.state.as_str().cmp(b.state.as_str()),
            SortKey::CreatedAt => pa.created_at.cmp(&pb.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column header click: same key flips direction, a new key starts ascending.
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.reversed(),
            },
            _ => SortSpec::ascending(key),
        }
    }

    pub fn compare(&self, a: &ClassifiedProduct<'_>, b: &ClassifiedProduct<'_>) -> Ordering {
        match self.direction {
            SortDirection::Ascending => self.key.compare(a, b),
            SortDirection::Descending => self.key.compare(b, a),
        }
    }
}
