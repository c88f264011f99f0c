//! Redistribution of per-class distances onto the bare symbols.

use crate::{
    graph::Vertex,
    matrix::Matrix,
    relation::Relation,
    solver::Distances,
    symbol::Classes,
    types::Map,
};
use std::fmt;

/// The pair of precedence function values assigned to one symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Values {
    pub f: u32,
    pub g: u32,
}

/// The values of `f` and `g` for every bare symbol, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecedenceFunctions {
    symbols: Map<String, Values>,
}

/// Give each member of a group the distances computed for the group.
///
/// # Panics
/// Panics if `distances` lacks a vertex of some class.
pub fn expand(distances: &Distances, classes: &Classes) -> PrecedenceFunctions {
    let mut symbols = Map::default();
    for class in classes.classes() {
        let lookup = |vertex: Vertex| {
            distances
                .get(vertex)
                .unwrap_or_else(|| panic!("missing distance for class `{}'", class))
        };
        let values = Values {
            f: lookup(Vertex::f(class.id())),
            g: lookup(Vertex::g(class.id())),
        };
        for symbol in class.symbols() {
            symbols.insert(symbol.to_owned(), values);
        }
    }
    PrecedenceFunctions { symbols }
}

impl PrecedenceFunctions {
    pub fn get(&self, symbol: &str) -> Option<Values> {
        self.symbols.get(symbol).copied()
    }

    pub fn f(&self, symbol: &str) -> Option<u32> {
        self.get(symbol).map(|v| v.f)
    }

    pub fn g(&self, symbol: &str) -> Option<u32> {
        self.get(symbol).map(|v| v.g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Values)> + '_ {
        self.symbols.iter().map(|(s, v)| (&**s, *v))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Collect every matrix cell whose relation is not reproduced by
    /// comparing `f` of the row symbol with `g` of the column symbol.
    pub fn violations(&self, matrix: &Matrix, classes: &Classes) -> Vec<Violation> {
        let labels: Vec<_> = classes.classes().collect();
        let mut violations = vec![];
        for (row, col, relation) in matrix.cells() {
            if relation == Relation::None {
                continue;
            }
            for left in labels[row].symbols() {
                for right in labels[col].symbols() {
                    let (f, g) = match (self.f(left), self.g(right)) {
                        (Some(f), Some(g)) => (f, g),
                        _ => continue,
                    };
                    if !relation.holds(f, g) {
                        violations.push(Violation {
                            left: left.to_owned(),
                            right: right.to_owned(),
                            relation,
                            f,
                            g,
                        });
                    }
                }
            }
        }
        violations
    }
}

/// A relation that the computed functions fail to reproduce.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub left: String,
    pub right: String,
    pub relation: Relation,
    pub f: u32,
    pub g: u32,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} does not hold: f({}) = {}, g({}) = {}",
            self.left, self.relation, self.right, self.left, self.f, self.right, self.g
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::Graph, solver::longest_paths, symbol::Groups};

    fn matrix() -> Matrix {
        //                 id  A   B   $
        Matrix::define(|def| {
            def.row_str("id", ". > > >")?;
            def.row_str("A", "< > > >")?;
            def.row_str("B", "< < > >")?;
            def.row_str("end", "< < < .")?;
            def.end_marker("end")
        })
        .unwrap()
    }

    #[test]
    fn members_share_values() {
        let matrix = matrix();
        let mut groups = Groups::new();
        groups.insert("A", ["mul", "div"]).unwrap();
        groups.insert("B", ["add", "sub"]).unwrap();
        let classes = Classes::new(&matrix, &groups).unwrap();
        let graph = Graph::build(&matrix, &classes);
        let distances = longest_paths(&graph, &classes).unwrap();
        let funcs = expand(&distances, &classes);

        assert_eq!(funcs.len(), 6);
        assert_eq!(
            funcs.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            ["id", "mul", "div", "add", "sub", "end"]
        );
        assert_eq!(funcs.get("mul"), funcs.get("div"));
        assert_eq!(funcs.get("add"), funcs.get("sub"));
        assert_eq!(funcs.get("A"), None);
        assert!(funcs.f("mul").unwrap() > funcs.f("add").unwrap());
        assert_eq!(funcs.get("end"), Some(Values { f: 0, g: 0 }));
        assert!(funcs.violations(&matrix, &classes).is_empty());
    }

    #[test]
    fn report_violation() {
        let matrix = matrix();
        let classes = Classes::new(&matrix, &Groups::new()).unwrap();
        let graph = Graph::build(&matrix, &classes);
        let distances = longest_paths(&graph, &classes).unwrap();
        let mut funcs = expand(&distances, &classes);
        funcs.symbols["A"].f = 0;

        let violations = funcs.violations(&matrix, &classes);
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.left == "A"));
        assert!(violations[0].to_string().contains("does not hold"));
    }
}
