//! Scan-and-union merging of variant sets.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;

/// Merge incoming groups (usually pairs) into existing groups.
///
/// Each incoming group is unioned into the first existing group sharing a
/// member, or starts a new group. An incoming group overlapping several
/// existing groups is not a silent bridge: it lands in the first one and
/// leaves the others in place, which [`check_partition`] then reports.
pub fn merge<I>(mut existing: Vec<BTreeSet<FigureKey>>, incoming: I) -> Vec<BTreeSet<FigureKey>>
where
    I: IntoIterator<Item = BTreeSet<FigureKey>>,
{
    for group in incoming {
        if group.is_empty() {
            continue;
        }
        match existing
            .iter_mut()
            .find(|current| !current.is_disjoint(&group))
        {
            Some(current) => current.extend(group),
            None => existing.push(group),
        }
    }
    existing
}

/// Fail if any figure belongs to more than one group.
///
/// The error carries the full membership of every group containing the
/// first offending figure.
pub fn check_partition(groups: &[BTreeSet<FigureKey>], source_name: &str) -> Result<()> {
    let mut index: AHashMap<&FigureKey, Vec<usize>> = AHashMap::new();
    for (i, group) in groups.iter().enumerate() {
        for member in group {
            index.entry(member).or_default().push(i);
        }
    }

    let mut conflicts: Vec<(&FigureKey, &Vec<usize>)> = index
        .iter()
        .filter(|(_, containing)| containing.len() > 1)
        .map(|(k, v)| (*k, v))
        .collect();
    conflicts.sort();

    if let Some((figure, containing)) = conflicts.first() {
        let groups = containing
            .iter()
            .map(|&i| groups[i].iter().cloned().collect())
            .collect();
        tracing::error!(
            figure = %figure,
            source = source_name,
            conflicts = conflicts.len(),
            "variant groups overlap"
        );
        return Err(FiguraError::VariantConflict {
            figure: (*figure).clone(),
            source_name: source_name.to_string(),
            groups,
        });
    }
    Ok(())
}

/// Turn pairs into two-member sets for [`merge`].
pub fn pair_sets<I>(pairs: I) -> impl Iterator<Item = BTreeSet<FigureKey>>
where
    I: IntoIterator<Item = (FigureKey, FigureKey)>,
{
    pairs.into_iter().map(|(a, b)| [a, b].into_iter().collect())
}
