//! Composition trees produced by the IDS parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ideographic description operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// ⿰
    LeftToRight,
    /// ⿱
    AboveToBelow,
    /// ⿲
    LeftToMiddleAndRight,
    /// ⿳
    AboveToMiddleAndBelow,
    /// ⿴
    FullSurround,
    /// ⿵
    SurroundFromAbove,
    /// ⿶
    SurroundFromBelow,
    /// ⿷
    SurroundFromLeft,
    /// ⿸
    SurroundFromUpperLeft,
    /// ⿹
    SurroundFromUpperRight,
    /// ⿺
    SurroundFromLowerLeft,
    /// ⿻
    Overlaid,
    /// ⿼
    SurroundFromRight,
    /// ⿽
    SurroundFromLowerRight,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        let op = match c {
            '⿰' => Operator::LeftToRight,
            '⿱' => Operator::AboveToBelow,
            '⿲' => Operator::LeftToMiddleAndRight,
            '⿳' => Operator::AboveToMiddleAndBelow,
            '⿴' => Operator::FullSurround,
            '⿵' => Operator::SurroundFromAbove,
            '⿶' => Operator::SurroundFromBelow,
            '⿷' => Operator::SurroundFromLeft,
            '⿸' => Operator::SurroundFromUpperLeft,
            '⿹' => Operator::SurroundFromUpperRight,
            '⿺' => Operator::SurroundFromLowerLeft,
            '⿻' => Operator::Overlaid,
            '⿼' => Operator::SurroundFromRight,
            '⿽' => Operator::SurroundFromLowerRight,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::LeftToRight => '⿰',
            Operator::AboveToBelow => '⿱',
            Operator::LeftToMiddleAndRight => '⿲',
            Operator::AboveToMiddleAndBelow => '⿳',
            Operator::FullSurround => '⿴',
            Operator::SurroundFromAbove => '⿵',
            Operator::SurroundFromBelow => '⿶',
            Operator::SurroundFromLeft => '⿷',
            Operator::SurroundFromUpperLeft => '⿸',
            Operator::SurroundFromUpperRight => '⿹',
            Operator::SurroundFromLowerLeft => '⿺',
            Operator::Overlaid => '⿻',
            Operator::SurroundFromRight => '⿼',
            Operator::SurroundFromLowerRight => '⿽',
        }
    }

    /// Number of operands the operator consumes.
    pub fn arity(self) -> usize {
        match self {
            Operator::LeftToMiddleAndRight | Operator::AboveToMiddleAndBelow => 3,
            _ => 2,
        }
    }
}

/// One leaf reference of a composition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Leaf {
    /// A character, with any variation selector attached.
    Char(String),
    /// A symbolic glyph code, without delimiters.
    Symbol(String),
}

impl Leaf {
    /// The figure key this leaf refers to.
    pub fn key(&self) -> &str {
        match self {
            Leaf::Char(text) | Leaf::Symbol(text) => text,
        }
    }
}

/// A parsed decomposition sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompositionNode {
    Composite {
        operator: Operator,
        operands: Vec<CompositionNode>,
    },
    Leaf {
        leaf: Leaf,
    },
}

/// Options for walking a tree's leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions<'a> {
    /// Outer shapes of `⿺` whose operands are walked enclosed-first.
    pub enclosed_first_outers: Option<&'a std::collections::BTreeSet<String>>,
}

impl CompositionNode {
    pub fn char<S: Into<String>>(text: S) -> Self {
        CompositionNode::Leaf {
            leaf: Leaf::Char(text.into()),
        }
    }

    pub fn symbol<S: Into<String>>(code: S) -> Self {
        CompositionNode::Leaf {
            leaf: Leaf::Symbol(code.into()),
        }
    }

    pub fn composite(operator: Operator, operands: Vec<CompositionNode>) -> Self {
        CompositionNode::Composite { operator, operands }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            CompositionNode::Leaf { leaf } => Some(leaf),
            CompositionNode::Composite { .. } => None,
        }
    }

    /// Depth-first pre-order leaves.
    pub fn leaves(&self, options: FlattenOptions<'_>) -> Vec<&Leaf> {
        let mut out = Vec::new();
        self.collect_leaves(options, &mut out);
        out
    }

    fn collect_leaves<'n>(&'n self, options: FlattenOptions<'_>, out: &mut Vec<&'n Leaf>) {
        match self {
            CompositionNode::Leaf { leaf } => out.push(leaf),
            CompositionNode::Composite { operator, operands } => {
                if self.is_enclosed_first(*operator, operands, options) {
                    for operand in operands.iter().rev() {
                        operand.collect_leaves(options, out);
                    }
                } else {
                    for operand in operands {
                        operand.collect_leaves(options, out);
                    }
                }
            }
        }
    }

    fn is_enclosed_first(
        &self,
        operator: Operator,
        operands: &[CompositionNode],
        options: FlattenOptions<'_>,
    ) -> bool {
        if operator != Operator::SurroundFromLowerLeft {
            return false;
        }
        let Some(outers) = options.enclosed_first_outers else {
            return false;
        };
        matches!(
            operands.first().and_then(|n| n.as_leaf()),
            Some(Leaf::Char(outer)) if outers.contains(outer)
        )
    }

    /// Nesting depth; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            CompositionNode::Leaf { .. } => 0,
            CompositionNode::Composite { operands, .. } => {
                1 + operands.iter().map(|n| n.depth()).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for CompositionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionNode::Leaf {
                leaf: Leaf::Char(text),
            } => f.write_str(text),
            CompositionNode::Leaf {
                leaf: Leaf::Symbol(code),
            } => write!(f, "&{code};"),
            CompositionNode::Composite { operator, operands } => {
                write!(f, "{}", operator.as_char())?;
                for operand in operands {
                    write!(f, "{operand}")?;
                }
                Ok(())
            }
        }
    }
}
