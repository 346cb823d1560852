use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of property rows shown per grid page.
pub const PROPERTY_PAGE_SIZE: usize = 8;

/// A managed rental property. One grid row per property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
}

impl Property {
    pub fn new(name: impl Into<String>, address: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            city: city.into(),
        }
    }
}

/// Slice of the ordered property list for one page. Client-side paging with
/// a fixed page size; an out-of-range page yields the last non-empty page.
pub fn page_slice(properties: &[Property], page: usize) -> &[Property] {
    if properties.is_empty() {
        return properties;
    }
    let pages = page_count(properties.len());
    let page = page.min(pages - 1);
    let start = page * PROPERTY_PAGE_SIZE;
    let end = (start + PROPERTY_PAGE_SIZE).min(properties.len());
    &properties[start..end]
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PROPERTY_PAGE_SIZE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(n: usize) -> Vec<Property> {
        (0..n)
            .map(|i| Property::new(format!("Apt {i}"), format!("{i} Main St"), "Lisbon"))
            .collect()
    }

    #[test]
    fn paging_splits_into_fixed_pages() {
        let all = props(19);
        assert_eq!(page_count(all.len()), 3);
        assert_eq!(page_slice(&all, 0).len(), PROPERTY_PAGE_SIZE);
        assert_eq!(page_slice(&all, 2).len(), 3);
    }

    #[test]
    fn out_of_range_page_clamps() {
        let all = props(5);
        assert_eq!(page_slice(&all, 7).len(), 5);
        assert!(page_slice(&[], 0).is_empty());
    }
}
