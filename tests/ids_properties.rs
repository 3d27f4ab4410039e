use figura::figure::FigureKey;
use figura::ids::node::{CompositionNode, FlattenOptions, Operator};
use figura::ids::parser::IdsParser;
use figura::ids::token::tokenize;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = CompositionNode> {
    prop_oneof![
        4 => prop::sample::select(vec!["口", "木", "女", "子", "⻌", "葛\u{E0100}", "𠂤"])
            .prop_map(CompositionNode::char),
        1 => "[A-Z]{3}-[0-9A-F]{4}".prop_map(CompositionNode::symbol),
    ]
}

fn operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(
        ('⿰'..='⿽')
            .filter_map(Operator::from_char)
            .collect::<Vec<_>>(),
    )
}

fn tree() -> impl Strategy<Value = CompositionNode> {
    leaf().prop_recursive(4, 32, 3, |inner| {
        (operator(), prop::collection::vec(inner, 3)).prop_map(|(op, mut operands)| {
            operands.truncate(op.arity());
            CompositionNode::composite(op, operands)
        })
    })
}

proptest! {
    #[test]
    fn parse_recovers_rendered_tree(node in tree()) {
        let figure = FigureKey::from("?");
        let text = node.to_string();
        let parsed = IdsParser::new(&figure).parse(&text).unwrap();
        prop_assert_eq!(parsed, node);
    }

    #[test]
    fn leaves_match_non_operator_tokens(node in tree()) {
        let text = node.to_string();
        let tokens = tokenize(&text).unwrap();
        let operands = tokens.iter().filter(|t| !t.is_operator()).count();
        prop_assert_eq!(node.leaves(FlattenOptions::default()).len(), operands);
    }
}
