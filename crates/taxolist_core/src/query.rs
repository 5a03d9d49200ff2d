//! Term selection handed to the host's term store.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use taxolist_config::{Configuration, OrderBy, SortOrder};

use crate::Term;

/// Taxonomy queried when none is given.
pub const DEFAULT_TAXONOMY: &str = "category";

/// What to fetch from the term store for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub taxonomy: String,
    pub orderby: OrderBy,
    pub order: SortOrder,
    /// Terms to restrict to; empty means every term of the taxonomy.
    pub include: BTreeSet<u64>,
}

impl TermQuery {
    /// Derives the query from a configuration.
    pub fn from_configuration(config: &Configuration, taxonomy: impl Into<String>) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            orderby: config.orderby,
            order: config.order,
            include: config.tax_term.clone(),
        }
    }

    /// Whether `term` passes the taxonomy and include filters.
    pub fn matches(&self, term: &Term) -> bool {
        let taxonomy_ok = term.taxonomy.is_empty() || term.taxonomy == self.taxonomy;
        let include_ok = self.include.is_empty() || self.include.contains(&term.id);
        taxonomy_ok && include_ok
    }

    fn compare(&self, a: &Term, b: &Term) -> Ordering {
        match self.orderby {
            OrderBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            OrderBy::Slug => a.slug.cmp(&b.slug),
            OrderBy::TermGroup => a.term_group.cmp(&b.term_group),
            OrderBy::TermId | OrderBy::Id => a.id.cmp(&b.id),
            OrderBy::Description => a.description.cmp(&b.description),
            OrderBy::Parent => a.parent.cmp(&b.parent),
            OrderBy::Count => a.count.cmp(&b.count),
            OrderBy::None => Ordering::Equal,
        }
    }
}

/// The host's term store.
pub trait TermSource {
    /// Returns the terms selected by `query`, already ordered.
    fn terms(&self, query: &TermQuery) -> Vec<Term>;
}

/// A [`TermSource`] over a fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct StaticTermSource {
    terms: Vec<Term>,
}

impl StaticTermSource {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl TermSource for StaticTermSource {
    fn terms(&self, query: &TermQuery) -> Vec<Term> {
        let mut selected: Vec<Term> = self
            .terms
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();

        if query.orderby != OrderBy::None {
            selected.sort_by(|a, b| match query.order {
                SortOrder::Asc => query.compare(a, b),
                SortOrder::Desc => query.compare(b, a),
            });
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store() -> StaticTermSource {
        StaticTermSource::new(vec![
            Term::new(1, "banana", "/b").with_count(5),
            Term::new(2, "Apple", "/a").with_count(9),
            Term::new(3, "cherry", "/c").with_count(1).with_taxonomy("post_tag"),
            Term::new(4, "date", "/d").with_count(7),
        ])
    }

    fn query(orderby: OrderBy, order: SortOrder) -> TermQuery {
        TermQuery {
            taxonomy: DEFAULT_TAXONOMY.to_string(),
            orderby,
            order,
            include: BTreeSet::new(),
        }
    }

    fn ids(terms: &[Term]) -> Vec<u64> {
        terms.iter().map(|t| t.id).collect()
    }

    #[rstest]
    #[case::name_asc(OrderBy::Name, SortOrder::Asc, vec![2, 1, 4])]
    #[case::name_desc(OrderBy::Name, SortOrder::Desc, vec![4, 1, 2])]
    #[case::count_desc(OrderBy::Count, SortOrder::Desc, vec![2, 4, 1])]
    #[case::id_asc(OrderBy::TermId, SortOrder::Asc, vec![1, 2, 4])]
    #[case::none_keeps_supplied_order(OrderBy::None, SortOrder::Desc, vec![1, 2, 4])]
    fn test_ordering(#[case] orderby: OrderBy, #[case] order: SortOrder, #[case] expected: Vec<u64>) {
        assert_eq!(ids(&store().terms(&query(orderby, order))), expected);
    }

    #[test]
    fn test_include_filter() {
        let mut q = query(OrderBy::TermId, SortOrder::Asc);
        q.include = [4, 3, 2].into_iter().collect();
        assert_eq!(ids(&store().terms(&q)), vec![2, 4]);
    }

    #[test]
    fn test_from_configuration() {
        let config = Configuration {
            orderby: OrderBy::Count,
            tax_term: [7].into_iter().collect(),
            ..Configuration::builtin()
        };

        let q = TermQuery::from_configuration(&config, DEFAULT_TAXONOMY);
        assert_eq!(q.orderby, OrderBy::Count);
        assert_eq!(q.order, SortOrder::Desc);
        assert!(q.include.contains(&7));
    }
}
