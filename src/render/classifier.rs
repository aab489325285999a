//! Partition pool names by group tag.

use std::collections::BTreeMap;

use crate::core::pool::PoolQuery;

/// Group membership snapshot of one pool.
///
/// A name belongs to exactly one bucket: the group its tag names, or the
/// ungrouped list when the tag is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification<'a> {
    buckets: BTreeMap<&'a str, Vec<&'a str>>, // group -> members; "" holds the ungrouped
}

impl<'a> Classification<'a> {
    #[must_use]
    pub fn of<P: PoolQuery + ?Sized>(pool: &'a P) -> Self {
        let mut buckets = BTreeMap::new();
        for name in pool.names() {
            let group = pool.group(name);
            buckets
                .entry(group)
                .or_insert_with(|| pool.names_in_group(group));
        }
        Self { buckets }
    }

    /// Distinct non-empty tags, sorted.
    pub fn groups(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.buckets.keys().copied().filter(|g| !g.is_empty())
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    /// Members of `group`, in listing order.
    #[must_use]
    pub fn filtered_names(&self, group: &str) -> Vec<&'a str> {
        self.buckets.get(group).cloned().unwrap_or_default()
    }

    /// Names without a tag, in listing order.
    #[must_use]
    pub fn ungrouped_names(&self) -> Vec<&'a str> {
        self.filtered_names("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        histogram::{Histogram1D, HistogramKind},
        pool::HistogramPool,
    };

    fn pool(entries: &[(&str, &str)]) -> HistogramPool {
        let mut p = HistogramPool::default();
        for &(name, group) in entries {
            p.insert(name, group, HistogramKind::OneD(Histogram1D::default()));
        }
        p
    }

    #[test]
    fn no_tags_means_everything_ungrouped() {
        let p = pool(&[("b", ""), ("a", "")]);
        let c = Classification::of(&p);
        assert_eq!(c.group_count(), 0);
        assert_eq!(c.groups().count(), 0);
        assert_eq!(c.ungrouped_names(), vec!["a", "b"]);
    }

    #[test]
    fn groups_are_sorted_and_members_keep_listing_order() {
        let p = pool(&[
            ("x_trk", "trk"),
            ("e_calo", "calo"),
            ("a_calo", "calo"),
            ("lone", ""),
            ("t_calo", "calo"),
        ]);
        let c = Classification::of(&p);
        assert_eq!(c.groups().collect::<Vec<_>>(), vec!["calo", "trk"]);
        assert_eq!(c.filtered_names("calo"), vec!["a_calo", "e_calo", "t_calo"]);
        assert_eq!(c.filtered_names("trk"), vec!["x_trk"]);
        assert_eq!(c.filtered_names("missing"), Vec::<&str>::new());
        assert_eq!(c.ungrouped_names(), vec!["lone"]);
    }

    #[test]
    fn every_name_lands_in_exactly_one_bucket() {
        let p = pool(&[("a", "g1"), ("b", "g2"), ("c", ""), ("d", "g1")]);
        let c = Classification::of(&p);
        let mut seen: Vec<&str> = c.groups().flat_map(|g| c.filtered_names(g)).collect();
        seen.extend(c.ungrouped_names());
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    /// Pool whose group listing comes from an index rather than a scan.
    struct Indexed;

    impl PoolQuery for Indexed {
        fn names(&self) -> Vec<&str> {
            vec!["a_g", "b_g", "c"]
        }
        fn group(&self, name: &str) -> &str {
            if name.ends_with("_g") { "g" } else { "" }
        }
        fn is_1d(&self, _: &str) -> bool {
            true
        }
        fn is_2d(&self, _: &str) -> bool {
            false
        }
        fn kind_label(&self, _: &str) -> Option<&str> {
            Some("1D")
        }
        fn histogram_1d(&self, _: &str) -> Option<&crate::core::histogram::Histogram1D> {
            None
        }
        fn names_in_group(&self, group: &str) -> Vec<&str> {
            match group {
                "g" => vec!["b_g", "a_g"],
                "" => vec!["c"],
                _ => Vec::new(),
            }
        }
        fn tree_dump(&self, _: &mut dyn std::io::Write) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn member_lists_come_from_the_pool_group_query() {
        let c = Classification::of(&Indexed);
        assert_eq!(c.groups().collect::<Vec<_>>(), vec!["g"]);
        assert_eq!(c.filtered_names("g"), vec!["b_g", "a_g"]);
        assert_eq!(c.ungrouped_names(), vec!["c"]);
    }
}
