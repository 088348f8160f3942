//! Catalog query models.

use clap::ValueEnum;
use storefront::models::SortDirection;

/// Field products can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ProductSort {
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl ProductSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

/// Filter and ordering applied to the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub sort: Option<ProductSort>,
    pub direction: SortDirection,
}

impl ProductQuery {
    /// Query-string pairs for one page of the listing. Unset filters are omitted.
    pub fn params(&self, page: u32, size: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string()), ("size", size.to_string())];

        if let Some(category) = self.category.as_deref().filter(|value| !value.is_empty()) {
            params.push(("category", category.to_string()));
        }

        if let Some(vendor) = self.vendor.as_deref().filter(|value| !value.is_empty()) {
            params.push(("vendor", vendor.to_string()));
        }

        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }

        params.push(("direction", self.direction.as_str().to_string()));

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_omitted() {
        let params = ProductQuery::default().params(1, 20);

        assert_eq!(
            params,
            vec![
                ("page", "1".to_string()),
                ("size", "20".to_string()),
                ("direction", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn every_filter_is_sent() {
        let query = ProductQuery {
            category: Some("lighting".to_string()),
            vendor: Some("acme".to_string()),
            sort: Some(ProductSort::CreatedAt),
            direction: SortDirection::Asc,
        };

        let params = query.params(2, 10);

        assert!(params.contains(&("category", "lighting".to_string())));
        assert!(params.contains(&("vendor", "acme".to_string())));
        assert!(params.contains(&("sort", "createdAt".to_string())));
        assert!(params.contains(&("direction", "asc".to_string())));
    }
}
