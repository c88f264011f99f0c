//! Compilation of operator-precedence relation tables into precedence functions.
//!
//! The result is a pair of integer functions `f` and `g` over the terminal
//! symbols such that `f(a) < g(b)` whenever `a` yields precedence to `b` and
//! `f(a) > g(b)` whenever `a` takes precedence over `b`.

pub mod expand;
pub mod graph;
pub mod matrix;
pub mod output;
pub mod relation;
pub mod solver;
pub mod symbol;
pub mod syntax;
pub mod types;
pub mod util;

pub use crate::{
    expand::PrecedenceFunctions,
    matrix::{Matrix, TableError},
    output::{Format, Sequences},
    relation::Relation,
    solver::CycleError,
    symbol::{Classes, Groups},
};

use crate::{graph::Graph, solver::Distances};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed precedence table")]
    Table(
        #[from]
        #[source]
        TableError,
    ),

    #[error("no precedence functions exist for the table")]
    Cycle(
        #[from]
        #[source]
        CycleError,
    ),
}

/// Everything derived from a single run over a precedence matrix.
#[derive(Debug)]
#[non_exhaustive]
pub struct Output {
    pub classes: Classes,
    pub graph: Graph,
    pub distances: Distances,
    pub functions: PrecedenceFunctions,
}

impl Output {
    /// Lay out the functions in the specified symbol order.
    pub fn sequences<S>(&self, order: Option<&[S]>) -> Result<Sequences, TableError>
    where
        S: AsRef<str>,
    {
        Sequences::new(&self.functions, &self.classes, order)
    }
}

/// Compute the precedence functions of the specified matrix.
pub fn compile(matrix: &Matrix, groups: &Groups) -> Result<Output, Error> {
    let span = tracing::debug_span!("compile");
    let _entered = span.enter();
    tracing::trace!("matrix:\n{}", matrix);

    let classes = Classes::new(matrix, groups)?;
    let graph = Graph::build(matrix, &classes);
    let distances = solver::longest_paths(&graph, &classes)?;
    tracing::debug!("computed {} longest paths", distances.len());
    let functions = expand::expand(&distances, &classes);
    tracing::debug!("expanded to {} symbols", functions.len());

    Ok(Output {
        classes,
        graph,
        distances,
        functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoketest() {
        //   id   ^   A   B   $
        let matrix = Matrix::define(|def| {
            def.row_str("id", ". > > > >")?;
            def.row_str("caret", "< > > > >")?;
            def.row_str("A", "< < > > >")?;
            def.row_str("B", "< < < > >")?;
            def.row_str("end", "< < < < .")?;
            def.end_marker("end")
        })
        .unwrap();
        let mut groups = Groups::new();
        groups.insert("A", ["mul", "div"]).unwrap();
        groups.insert("B", ["add", "sub"]).unwrap();

        let output = compile(&matrix, &groups).unwrap();
        eprintln!("{}", output.graph.display(&output.classes));
        eprintln!("{}", output.distances.display(&output.classes));

        let seq = output.sequences::<&str>(None).unwrap();
        assert_eq!(seq.symbols, ["id", "caret", "mul", "div", "add", "sub", "end"]);
        assert_eq!(seq.f, [6, 6, 4, 4, 2, 2, 0]);
        assert_eq!(seq.g, [7, 5, 3, 3, 1, 1, 0]);
        assert!(output
            .functions
            .violations(&matrix, &output.classes)
            .is_empty());
    }

    #[test]
    fn errors_are_distinguished() {
        let matrix = Matrix::define(|def| {
            def.row_str("a", "> = .")?;
            def.row_str("b", "< > .")?;
            def.row_str("end", ". . .")?;
            def.end_marker("end")
        })
        .unwrap();
        assert!(matches!(
            compile(&matrix, &Groups::new()),
            Err(Error::Cycle(..))
        ));

        let mut groups = Groups::new();
        groups.insert("C", ["lt"]).unwrap();
        assert!(matches!(
            compile(&matrix, &groups),
            Err(Error::Table(TableError::UnknownGroup { .. }))
        ));
    }
}
