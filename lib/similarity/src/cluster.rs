//! Grouping listings into products
//!
//! Every pair is classified up front (in parallel when the config allows),
//! then listings are assigned in input order with complete linkage: a listing
//! joins the first group whose members all match it.

use crate::naming::canonical_name;
use crate::scorer::TitleMatcher;
use prodmatch_core::{ExtractedAttributes, Listing, ProductGroup};
use rayon::prelude::*;

/// Upper-triangle pair decisions; row `i` holds pairs `(i, j)` for `j > i`
struct DecisionMatrix {
    rows: Vec<Vec<bool>>,
}

impl DecisionMatrix {
    fn compute(attrs: &[ExtractedAttributes], matcher: &TitleMatcher) -> Self {
        let n = attrs.len();
        let row = |i: usize| -> Vec<bool> {
            ((i + 1)..n)
                .map(|j| matcher.decide(&attrs[i], &attrs[j]).is_match)
                .collect()
        };

        let rows = if matcher.config().parallel {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };

        Self { rows }
    }

    fn is_match(&self, i: usize, j: usize) -> bool {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.rows[lo][hi - lo - 1]
    }
}

/// Group listings that describe the same product.
///
/// Output order follows each group's first member; members keep input
/// order. The result does not depend on thread scheduling.
pub fn group_listings(listings: &[Listing], matcher: &TitleMatcher) -> Vec<ProductGroup> {
    let attrs: Vec<ExtractedAttributes> = if matcher.config().parallel {
        listings
            .par_iter()
            .map(|l| ExtractedAttributes::from_title(&l.title))
            .collect()
    } else {
        listings
            .iter()
            .map(|l| ExtractedAttributes::from_title(&l.title))
            .collect()
    };

    let matrix = DecisionMatrix::compute(&attrs, matcher);

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for i in 0..listings.len() {
        match clusters
            .iter_mut()
            .find(|members| members.iter().all(|&m| matrix.is_match(m, i)))
        {
            Some(members) => members.push(i),
            None => clusters.push(vec![i]),
        }
    }

    let groups: Vec<ProductGroup> = clusters
        .into_iter()
        .map(|members| {
            let named: Vec<(&str, &ExtractedAttributes)> = members
                .iter()
                .map(|&i| (listings[i].title.as_str(), &attrs[i]))
                .collect();
            let name = canonical_name(&named);
            tracing::trace!(name = %name, size = members.len(), "formed group");

            ProductGroup {
                name,
                listings: members.iter().map(|&i| listings[i].clone()).collect(),
            }
        })
        .collect();

    tracing::debug!(listings = listings.len(), groups = groups.len(), "grouped listings");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MatchConfig;

    fn listings(titles: &[&str]) -> Vec<Listing> {
        titles.iter().map(|t| Listing::new(*t)).collect()
    }

    fn titles(group: &ProductGroup) -> Vec<&str> {
        group.listings.iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn test_groups_follow_input_order() {
        let input = listings(&[
            "Knauf Rotband 30kg",
            "Samsung Galaxy S21 128GB Black",
            "KNAUF ROTBAND, 30 kg",
            "Samsung Galaxy S21 128GB Black",
        ]);
        let groups = group_listings(&input, &TitleMatcher::default());

        assert_eq!(groups.len(), 2);
        assert_eq!(titles(&groups[0]), vec!["Knauf Rotband 30kg", "KNAUF ROTBAND, 30 kg"]);
        assert_eq!(groups[0].name, "KNAUF ROTBAND (30kg)");
        assert_eq!(groups[1].len(), 2);
    }

    #[test]
    fn test_veto_keeps_products_apart() {
        let input = listings(&["Knauf Rotband 30kg", "Knauf Sheetrock Finish 30kg"]);
        let groups = group_listings(&input, &TitleMatcher::default());
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let input = listings(&[
            "ROCKWOOL ROCKMIN 100x600x1200mm",
            "Rockwool Rockmin 50x600x1200mm",
            "Rockwool Rockmin Plus 100X600X1200 MM",
            "Knauf Rotband 30kg",
            "Samsung Galaxy S21 128GB",
            "Samsung Galaxy A52 128GB",
        ]);
        let parallel = group_listings(&input, &TitleMatcher::default());
        let sequential = group_listings(
            &input,
            &TitleMatcher::new(MatchConfig {
                parallel: false,
                ..Default::default()
            }),
        );

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].name, "AKMENS VATE ROCKWOOL ROCKMIN PLUS (100x600x1200mm)");
        assert_eq!(parallel[0].len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_listings(&[], &TitleMatcher::default()).is_empty());
    }
}
