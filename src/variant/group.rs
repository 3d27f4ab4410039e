//! Finalized variant groups with canonical heads.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::facts::FactSource;
use crate::figure::FigureKey;

/// An equivalence class of orthographic variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Canonical member; also the group's identifier.
    pub head: FigureKey,
    /// Members in priority order, head first.
    pub members: Vec<FigureKey>,
}

impl VariantGroup {
    pub fn contains(&self, key: &str) -> bool {
        self.members.iter().any(|m| m.as_str() == key)
    }
}

/// A partition of figures into variant groups.
#[derive(Debug, Clone, Default)]
pub struct VariantGroups {
    groups: Vec<VariantGroup>,
    index: AHashMap<FigureKey, usize>,
}

impl VariantGroups {
    /// Pick heads and index already-validated, disjoint sets.
    ///
    /// Members are ordered by best list rank (listed before unlisted), then
    /// corpus frequency descending, then key; the first becomes the head.
    /// Groups are ordered by head key.
    pub fn finalize<F: FactSource + ?Sized>(sets: Vec<BTreeSet<FigureKey>>, facts: &F) -> Self {
        let mut groups: Vec<VariantGroup> = sets
            .into_iter()
            .filter(|set| !set.is_empty())
            .map(|set| {
                let mut members: Vec<FigureKey> = set.into_iter().collect();
                members.sort_by(|a, b| compare_priority(a, b, facts));
                VariantGroup {
                    head: members[0].clone(),
                    members,
                }
            })
            .collect();
        groups.sort_by(|a, b| a.head.cmp(&b.head));

        let mut index = AHashMap::new();
        for (i, group) in groups.iter().enumerate() {
            for member in &group.members {
                index.insert(member.clone(), i);
            }
        }

        VariantGroups { groups, index }
    }

    pub fn group_of(&self, key: &str) -> Option<&VariantGroup> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    pub fn head_of(&self, key: &str) -> Option<&FigureKey> {
        self.group_of(key).map(|g| &g.head)
    }

    /// Members of the key's group, or just the key when it has none.
    pub fn family(&self, key: &FigureKey) -> Vec<FigureKey> {
        match self.group_of(key.as_str()) {
            Some(group) => group.members.clone(),
            None => vec![key.clone()],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn compare_priority<F: FactSource + ?Sized>(a: &FigureKey, b: &FigureKey, facts: &F) -> Ordering {
    let rank = |key: &FigureKey| {
        facts
            .list_membership(key.as_str())
            .iter()
            .map(|tag| tag.rank())
            .min()
            .unwrap_or(usize::MAX)
    };
    let frequency = |key: &FigureKey| Reverse(facts.corpus_frequency(key.as_str()));

    rank(a)
        .cmp(&rank(b))
        .then_with(|| frequency(a).cmp(&frequency(b)))
        .then_with(|| a.cmp(b))
}
