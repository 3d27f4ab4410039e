use figura::prelude::*;
use figura::variant::{VariantGroup, VariantUnifier};

fn universe() -> InMemoryFacts {
    let mut facts = InMemoryFacts::new();
    for key in ["国", "國", "圀", "学", "學", "斈", "竜", "龍"] {
        facts.insert_figure(key, key);
    }
    facts.with_list(ListTag::Joyo, &["国", "学", "竜"])
}

fn unify(sources: &[VariantSource]) -> Result<Vec<VariantGroup>> {
    let facts = sources
        .iter()
        .cloned()
        .fold(universe(), |facts, source| facts.with_variant_source(source));
    let groups = VariantUnifier::new(&facts).unify()?;
    Ok(groups.iter().cloned().collect())
}

fn sources() -> Vec<VariantSource> {
    vec![
        VariantSource::new("kyujitai")
            .with_pair("国", "國")
            .with_pair("学", "學"),
        VariantSource::new("itaiji").with_pair("圀", "国"),
        VariantSource::new("unihan")
            .with_pair("斈", "学")
            .with_pair("竜", "龍"),
    ]
}

#[test]
fn test_source_order_does_not_change_groups() {
    let sources = sources();
    let expected = unify(&sources).unwrap();
    assert_eq!(expected.len(), 3);

    let orders = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    for order in orders {
        let permuted: Vec<VariantSource> = order.iter().map(|&i| sources[i].clone()).collect();
        assert_eq!(unify(&permuted).unwrap(), expected, "order {order:?}");
    }
}

#[test]
fn test_listed_member_heads_its_group() {
    let groups = unify(&sources()).unwrap();
    let heads: Vec<&str> = groups.iter().map(|g| g.head.as_str()).collect();
    assert_eq!(heads, vec!["国", "学", "竜"]);
    assert_eq!(groups[0].members.len(), 3);
}

#[test]
fn test_bridging_pair_is_a_conflict() {
    let bridge = VariantSource::new("bridge").with_pair("國", "學");
    let mut all = sources();
    all.push(bridge);

    let err = unify(&all).unwrap_err();
    match err {
        FiguraError::VariantConflict {
            source_name,
            groups,
            ..
        } => {
            assert_eq!(source_name, "bridge");
            assert_eq!(groups.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_removal_override_resolves_conflict() {
    let bridge = VariantSource::new("bridge")
        .with_pair("國", "學")
        .with_removal("學", "國")
        .with_addition("龍", "竜");
    let mut all = sources();
    all.push(bridge);

    let groups = unify(&all).unwrap();
    assert_eq!(groups.len(), 3);
}

#[test]
fn test_unknown_endpoint_is_reported() {
    let err = unify(&[VariantSource::new("typo").with_pair("国", "囯")]).unwrap_err();
    assert!(matches!(
        err,
        FiguraError::MissingFigure { ref figure, .. } if figure.as_str() == "囯"
    ));
}
