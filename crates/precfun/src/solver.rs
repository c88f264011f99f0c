//! Longest paths over the ordering graph.

use crate::{
    graph::{Graph, Vertex},
    symbol::Classes,
    types::Map,
    util::display_fn,
};
use std::fmt;

/// The length of the longest path starting at each vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Distances {
    map: Map<Vertex, u32>,
}

impl Distances {
    pub fn get(&self, vertex: Vertex) -> Option<u32> {
        self.map.get(&vertex).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vertex, u32)> + '_ {
        self.map.iter().map(|(v, d)| (*v, *d))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // `"f(LABEL) = n"` per line.
    pub fn display<'c>(&'c self, classes: &'c Classes) -> impl fmt::Display + 'c {
        display_fn(move |f| {
            writeln!(f, "Longest paths:")?;
            for (vertex, dist) in &self.map {
                writeln!(f, "{} = {}", vertex.display(classes), dist)?;
            }
            Ok(())
        })
    }
}

/// The ordering graph contains a cycle, hence no precedence functions exist.
#[derive(Debug, thiserror::Error)]
#[error("precedence matrix is not analyzable: cycle {}", .cycle.join(" -> "))]
pub struct CycleError {
    /// The vertices on the cycle; the first one is repeated at the end.
    pub cycle: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done(u32),
}

/// Compute the longest path from every vertex.
///
/// A vertex without successors has distance zero. Vertices merged by `=` all
/// receive the distance of their representative.
pub fn longest_paths(graph: &Graph, classes: &Classes) -> Result<Distances, CycleError> {
    let span = tracing::debug_span!("longest_paths");
    let _entered = span.enter();

    let vertices: Map<Vertex, Mark> = graph.vertices().map(|v| (v, Mark::Unvisited)).collect();
    let mut solver = Solver {
        graph,
        classes,
        marks: vertices,
        stack: vec![],
    };
    solver.run()?;

    let mut map = Map::default();
    for vertex in graph.vertices() {
        let representative = graph.representative(vertex);
        let dist = match solver.marks[&representative] {
            Mark::Done(dist) => dist,
            mark => unreachable!("vertex {:?} left in state {:?}", representative, mark),
        };
        map.insert(vertex, dist);
    }
    let distances = Distances { map };

    let end = classes.end_marker().id();
    for vertex in [Vertex::f(end), Vertex::g(end)] {
        if let Some(dist @ 1..) = distances.get(vertex) {
            tracing::warn!(
                "the end marker vertex {} has outgoing edges (distance = {})",
                vertex.display(classes),
                dist
            );
        }
    }

    Ok(distances)
}

struct Solver<'g> {
    graph: &'g Graph,
    classes: &'g Classes,
    marks: Map<Vertex, Mark>,
    // (vertex, successors not yet visited)
    stack: Vec<(Vertex, Vec<Vertex>)>,
}

impl Solver<'_> {
    fn run(&mut self) -> Result<(), CycleError> {
        let roots: Vec<Vertex> = self
            .graph
            .vertices()
            .filter(|v| self.graph.is_representative(*v))
            .collect();
        for root in roots {
            if self.marks[&root] == Mark::Unvisited {
                self.traverse(root)?;
            }
        }
        Ok(())
    }

    fn push(&mut self, vertex: Vertex) {
        tracing::trace!(
            "{}{}",
            "  ".repeat(self.stack.len()),
            vertex.display(self.classes)
        );
        self.marks[&vertex] = Mark::InProgress;
        let mut successors: Vec<Vertex> = self.graph.successors(vertex).collect();
        successors.reverse();
        self.stack.push((vertex, successors));
    }

    fn traverse(&mut self, root: Vertex) -> Result<(), CycleError> {
        self.push(root);

        while let Some((vertex, pending)) = self.stack.last_mut() {
            let vertex = *vertex;
            match pending.pop() {
                Some(next) => match self.marks[&next] {
                    Mark::Unvisited => self.push(next),
                    Mark::InProgress => return Err(self.cycle(next)),
                    Mark::Done(_) => (),
                },
                None => {
                    let dist = self
                        .graph
                        .successors(vertex)
                        .map(|succ| match self.marks[&succ] {
                            Mark::Done(dist) => dist + 1,
                            _ => unreachable!("successor {:?} is not finished", succ),
                        })
                        .max()
                        .unwrap_or(0);
                    tracing::trace!("{} = {}", vertex.display(self.classes), dist);
                    self.marks[&vertex] = Mark::Done(dist);
                    self.stack.pop();
                }
            }
        }

        Ok(())
    }

    fn cycle(&self, start: Vertex) -> CycleError {
        let from = self
            .stack
            .iter()
            .position(|(v, _)| *v == start)
            .unwrap_or(0);
        let cycle = self.stack[from..]
            .iter()
            .map(|(v, _)| *v)
            .chain(Some(start))
            .map(|v| v.display(self.classes).to_string())
            .collect();
        CycleError { cycle }
    }
}
