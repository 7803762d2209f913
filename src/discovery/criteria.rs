use serde::{Deserialize, Serialize};

use crate::discovery::selection::SelectionSet;
use crate::domain::types::{CityName, ItemId, RegionChoice, RegionCode};

/// Snapshot of the filter inputs as currently selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub region: RegionChoice,
    pub city: Option<CityName>,
    pub items: SelectionSet,
}

impl FilterCriteria {
    /// Region and city must both be set; the item set may be empty.
    pub fn is_submittable(&self) -> bool {
        self.region.is_set() && self.city.is_some()
    }

    /// Builds the registry query, or `None` while the criteria are incomplete.
    pub fn to_query(&self) -> Option<PointsQuery> {
        let region = self.region.code()?.clone();
        let city = self.city.clone()?;
        Some(PointsQuery {
            region,
            city,
            items: self.items.iter().collect(),
        })
    }
}

/// A complete, submission-ready point search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsQuery {
    pub region: RegionCode,
    pub city: CityName,
    /// Empty means no category filter.
    pub items: Vec<ItemId>,
}

impl PointsQuery {
    /// Query-string pairs for `GET /points`; `items` is comma separated and
    /// omitted when empty.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("region", self.region.to_string()),
            ("city", self.city.to_string()),
        ];
        if !self.items.is_empty() {
            let items = self
                .items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("items", items));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(region: &str, city: Option<&str>, items: &[i32]) -> FilterCriteria {
        let mut selection = SelectionSet::default();
        for id in items {
            selection.toggle(ItemId::new(*id).unwrap());
        }
        FilterCriteria {
            region: region.parse().unwrap(),
            city: city.map(|name| CityName::new(name).unwrap()),
            items: selection,
        }
    }

    #[test]
    fn submittable_only_with_region_and_city() {
        assert!(!criteria("0", None, &[]).is_submittable());
        assert!(!criteria("SC", None, &[3]).is_submittable());
        assert!(!criteria("0", Some("Blumenau"), &[]).is_submittable());
        assert!(criteria("SC", Some("Blumenau"), &[]).is_submittable());
        assert!(criteria("SC", Some("Blumenau"), &[1, 3]).is_submittable());
    }

    #[test]
    fn incomplete_criteria_build_no_query() {
        assert!(criteria("SC", None, &[3]).to_query().is_none());
    }

    #[test]
    fn query_pairs_join_item_ids() {
        let query = criteria("SC", Some("Blumenau"), &[3, 1]).to_query().unwrap();
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("region", "SC".to_string()),
                ("city", "Blumenau".to_string()),
                ("items", "1,3".to_string()),
            ]
        );
    }

    #[test]
    fn empty_selection_omits_items() {
        let query = criteria("SC", Some("Blumenau"), &[]).to_query().unwrap();
        assert_eq!(query.to_query_pairs().len(), 2);
    }
}
