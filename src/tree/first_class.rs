//! Selection of the first-class components shown for a figure.
//!
//! The selector walks a figure's flattened decomposition once, keeping the
//! chain of ancestors above the current edge. Once a meaningful component is
//! selected, the chain ending in it is marked resolved and nothing below it
//! along that chain is selected again. Non-meaningful components are never
//! marked, so their descendants stay eligible.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::figure::FigureKey;
use crate::tree::materialize::ComponentUse;

/// A component occurrence selected for display under one figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstClassComponent {
    pub component: FigureKey,
    /// Position of the selected edge in the flattened decomposition.
    pub index_in_tree: usize,
    /// 1-based ordinal among the selected occurrences of this component
    /// under the same parent.
    pub occurrence: usize,
}

/// Select first-class components from a flattened decomposition.
pub fn select_first_class<M>(uses: &[ComponentUse], is_meaningful: M) -> Vec<FirstClassComponent>
where
    M: Fn(&FigureKey) -> bool,
{
    let mut chain: Vec<&FigureKey> = Vec::new();
    let mut resolved: AHashSet<Vec<&FigureKey>> = AHashSet::new();
    let mut occurrences: AHashMap<(&FigureKey, &FigureKey), usize> = AHashMap::new();
    let mut selected = Vec::new();

    for (index, ComponentUse { parent, component }) in uses.iter().enumerate() {
        match chain.iter().position(|ancestor| *ancestor == parent) {
            Some(at) => chain.truncate(at + 1),
            None => chain.push(parent),
        }

        let mut extended = chain.clone();
        extended.push(component);

        if resolved.contains(&chain) {
            resolved.insert(extended);
            continue;
        }

        if is_meaningful(component) {
            resolved.insert(extended);
            let occurrence = occurrences.entry((parent, component)).or_insert(0);
            *occurrence += 1;
            selected.push(FirstClassComponent {
                component: component.clone(),
                index_in_tree: index,
                occurrence: *occurrence,
            });
        }
    }

    selected
}
