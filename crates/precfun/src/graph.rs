//! Construction of the ordering graph from a precedence matrix.

use crate::{
    matrix::Matrix,
    relation::Relation,
    symbol::{ClassID, Classes},
    types::{Map, Set},
    util::display_fn,
};
use std::fmt;

/// Which of the two precedence functions a vertex stands for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// The left-hand (stack top) function.
    F,
    /// The right-hand (lookahead) function.
    G,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F => f.write_str("f"),
            Self::G => f.write_str("g"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub role: Role,
    pub class: ClassID,
}

impl Vertex {
    pub const fn f(class: ClassID) -> Self {
        Self {
            role: Role::F,
            class,
        }
    }

    pub const fn g(class: ClassID) -> Self {
        Self {
            role: Role::G,
            class,
        }
    }

    // `"f(LABEL)"`
    pub fn display<'c>(&'c self, classes: &'c Classes) -> impl fmt::Display + 'c {
        display_fn(move |f| write!(f, "{}({})", self.role, classes[self.class]))
    }
}

#[derive(Debug)]
struct Node {
    representative: Vertex,
    successors: Set<Vertex>,
}

/// The directed graph whose longest paths give the precedence functions.
///
/// Vertices joined by an `=` relation are merged; the edges of a merged set
/// are kept on its representative only.
#[derive(Debug)]
pub struct Graph {
    nodes: Map<Vertex, Node>,
}

impl Graph {
    /// Build the ordering graph.
    ///
    /// `<` at `(row, col)` adds `g(col) -> f(row)` and `>` adds
    /// `f(row) -> g(col)`, so that the source of every edge ends up with the
    /// larger function value.
    pub fn build(matrix: &Matrix, classes: &Classes) -> Self {
        let span = tracing::debug_span!("build_graph");
        let _entered = span.enter();

        let n = classes.len();
        let vertices: Vec<Vertex> = classes
            .classes()
            .map(|class| Vertex::f(class.id()))
            .chain(classes.classes().map(|class| Vertex::g(class.id())))
            .collect();
        let f_index = |row: usize| row;
        let g_index = |col: usize| n + col;

        let mut parent: Vec<usize> = (0..vertices.len()).collect();
        for (row, col, rel) in matrix.cells() {
            if rel == Relation::Equal {
                union(&mut parent, f_index(row), g_index(col));
            }
        }

        let mut nodes = Map::default();
        for (i, vertex) in vertices.iter().enumerate() {
            let representative = vertices[find(&mut parent, i)];
            nodes.insert(
                *vertex,
                Node {
                    representative,
                    successors: Set::default(),
                },
            );
        }
        let mut graph = Self { nodes };

        for (row, col, rel) in matrix.cells() {
            let r = vertices[f_index(row)];
            let c = vertices[g_index(col)];
            match rel {
                Relation::Less => graph.add_edge(c, r),
                Relation::Greater => graph.add_edge(r, c),
                Relation::Equal | Relation::None => (),
            }
        }

        tracing::debug!(
            "ordering graph: {} vertices, {} edges",
            graph.nodes.len(),
            graph.num_edges()
        );

        graph
    }

    fn add_edge(&mut self, from: Vertex, to: Vertex) {
        let from = self.representative(from);
        let to = self.representative(to);
        if self.nodes[&from].successors.insert(to) {
            tracing::trace!("edge {:?} -> {:?}", from, to);
        }
    }

    /// All vertices, two per class, including merged and isolated ones.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.nodes.keys().copied()
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        self.nodes.contains_key(&vertex)
    }

    /// Return the vertex that carries the edges of `vertex`'s merged set.
    ///
    /// # Panics
    /// Panics if the vertex does not belong to this graph.
    pub fn representative(&self, vertex: Vertex) -> Vertex {
        self.nodes[&vertex].representative
    }

    pub fn is_representative(&self, vertex: Vertex) -> bool {
        self.representative(vertex) == vertex
    }

    /// The successors of the representative of `vertex`.
    pub fn successors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        let representative = self.representative(vertex);
        self.nodes[&representative].successors.iter().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.nodes.values().map(|node| node.successors.len()).sum()
    }

    pub fn display<'c>(&'c self, classes: &'c Classes) -> impl fmt::Display + 'c {
        display_fn(move |f| {
            writeln!(f, "graph = {{")?;
            for (vertex, node) in &self.nodes {
                write!(f, "    {}", vertex.display(classes))?;
                if node.representative != *vertex {
                    writeln!(f, " = {}", node.representative.display(classes))?;
                    continue;
                }
                write!(f, ": [")?;
                for (i, succ) in node.successors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", succ.display(classes))?;
                }
                writeln!(f, "]")?;
            }
            writeln!(f, "}}")
        })
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

// The smaller index becomes the root, so representatives do not depend on the
// order in which the `=` cells are visited.
fn union(parent: &mut [usize], x: usize, y: usize) {
    let x = find(parent, x);
    let y = find(parent, y);
    if x < y {
        parent[y] = x;
    } else {
        parent[x] = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Groups;

    fn setup(rows: &[(&str, &str)], end: &str) -> (Matrix, Classes) {
        let matrix = Matrix::define(|def| {
            for (label, marks) in rows {
                def.row_str(label, marks)?;
            }
            def.end_marker(end)
        })
        .unwrap();
        let classes = Classes::new(&matrix, &Groups::new()).unwrap();
        (matrix, classes)
    }

    fn id(classes: &Classes, label: &str) -> ClassID {
        classes.get(label).unwrap().id()
    }

    #[test]
    fn edge_directions() {
        let (matrix, classes) = setup(&[("id", ". >"), ("end", "< .")], "end");
        let graph = Graph::build(&matrix, &classes);
        let (i, e) = (id(&classes, "id"), id(&classes, "end"));

        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 2);
        // id > end
        assert_eq!(graph.successors(Vertex::f(i)).collect::<Vec<_>>(), [Vertex::g(e)]);
        // end < id
        assert_eq!(graph.successors(Vertex::g(i)).collect::<Vec<_>>(), [Vertex::f(e)]);
        assert_eq!(graph.successors(Vertex::f(e)).count(), 0);
        assert_eq!(graph.successors(Vertex::g(e)).count(), 0);
    }

    #[test]
    fn isolated_vertices_exist() {
        let (matrix, classes) = setup(&[("a", ". ."), ("b", ". .")], "b");
        let graph = Graph::build(&matrix, &classes);
        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 0);
        for class in classes.classes() {
            assert!(graph.contains(Vertex::f(class.id())));
            assert!(graph.contains(Vertex::g(class.id())));
        }
    }

    #[test]
    fn equal_merges_vertices() {
        let (matrix, classes) = setup(
            &[
                ("lp", "< = <"),
                ("rp", ". > >"),
                ("end", "< . ."),
            ],
            "end",
        );
        let graph = Graph::build(&matrix, &classes);
        let (lp, rp) = (id(&classes, "lp"), id(&classes, "rp"));

        assert_eq!(graph.representative(Vertex::g(rp)), Vertex::f(lp));
        assert!(!graph.is_representative(Vertex::g(rp)));
        assert_eq!(
            graph.successors(Vertex::g(rp)).collect::<Vec<_>>(),
            graph.successors(Vertex::f(lp)).collect::<Vec<_>>()
        );
        assert!(graph.display(&classes).to_string().contains("g(rp) = f(lp)"));
    }

    #[test]
    fn display_dump() {
        let (matrix, classes) = setup(&[("id", ". >"), ("end", "< .")], "end");
        let graph = Graph::build(&matrix, &classes);
        let dump = graph.display(&classes).to_string();
        assert_eq!(
            dump,
            "graph = {\n    f(id): [g(end)]\n    f(end): []\n    g(id): [f(end)]\n    g(end): []\n}\n"
        );
    }
}
