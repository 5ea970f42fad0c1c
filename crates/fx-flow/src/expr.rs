//! Interned resistance expressions.
//!
//! The reducer manipulates transition labels symbolically; labels are ids
//! into this arena so structural equality is a plain id comparison.
//! Children of a combinator are sorted before interning: series and
//! parallel composition are both order-independent arithmetically, so
//! sorting loses nothing and makes content-equal expressions identical.

use std::collections::HashMap;

use fx_core::{EdgeId, Id, Real};

pub(crate) type ExprId = Id;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Expr {
    /// One edge's resistance.
    Constant(EdgeId),
    /// Sum of children.
    Series(Vec<ExprId>),
    /// Reciprocal of the sum of child reciprocals.
    Parallel(Vec<ExprId>),
}

#[derive(Debug, Default)]
pub(crate) struct ExprArena {
    nodes: Vec<Expr>,
    interned: HashMap<Expr, ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(&mut self, edge: EdgeId) -> ExprId {
        self.intern(Expr::Constant(edge))
    }

    pub fn series(&mut self, children: Vec<ExprId>) -> ExprId {
        self.combine(children, Expr::Series)
    }

    pub fn parallel(&mut self, children: Vec<ExprId>) -> ExprId {
        self.combine(children, Expr::Parallel)
    }

    fn combine(&mut self, mut children: Vec<ExprId>, kind: fn(Vec<ExprId>) -> Expr) -> ExprId {
        debug_assert!(!children.is_empty(), "combinator needs children");
        if children.len() == 1 {
            return children[0];
        }
        children.sort();
        self.intern(kind(children))
    }

    fn intern(&mut self, expr: Expr) -> ExprId {
        if let Some(&id) = self.interned.get(&expr) {
            return id;
        }
        let id = ExprId::from_index(self.nodes.len() as u32);
        self.nodes.push(expr.clone());
        self.interned.insert(expr, id);
        id
    }

    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.idx()]
    }

    /// Evaluate an expression against the network's resistances.
    pub fn evaluate(&self, id: ExprId, resistance_of: &dyn Fn(EdgeId) -> Real) -> Real {
        match self.get(id) {
            Expr::Constant(edge) => resistance_of(*edge),
            Expr::Series(children) => children
                .iter()
                .map(|&c| self.evaluate(c, resistance_of))
                .sum(),
            Expr::Parallel(children) => {
                let reciprocal: Real = children
                    .iter()
                    .map(|&c| 1.0 / self.evaluate(c, resistance_of))
                    .sum();
                1.0 / reciprocal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(i: u32) -> EdgeId {
        Id::from_index(i)
    }

    #[test]
    fn constants_are_interned() {
        let mut arena = ExprArena::new();
        assert_eq!(arena.constant(edge(0)), arena.constant(edge(0)));
        assert_ne!(arena.constant(edge(0)), arena.constant(edge(1)));
    }

    #[test]
    fn combinators_dedup_regardless_of_child_order() {
        let mut arena = ExprArena::new();
        let a = arena.constant(edge(0));
        let b = arena.constant(edge(1));
        assert_eq!(arena.series(vec![a, b]), arena.series(vec![b, a]));
        assert_eq!(arena.parallel(vec![a, b]), arena.parallel(vec![b, a]));
        assert_ne!(arena.series(vec![a, b]), arena.parallel(vec![a, b]));
    }

    #[test]
    fn singleton_combinator_collapses_to_child() {
        let mut arena = ExprArena::new();
        let a = arena.constant(edge(0));
        assert_eq!(arena.parallel(vec![a]), a);
        assert_eq!(arena.series(vec![a]), a);
    }

    #[test]
    fn evaluation_matches_circuit_identities() {
        let mut arena = ExprArena::new();
        let r = |e: EdgeId| if e == edge(0) { 3.0 } else { 6.0 };
        let a = arena.constant(edge(0));
        let b = arena.constant(edge(1));

        let series = arena.series(vec![a, b]);
        assert_eq!(arena.evaluate(series, &r), 9.0);

        let parallel = arena.parallel(vec![a, b]);
        assert!((arena.evaluate(parallel, &r) - 2.0).abs() < 1e-12);
    }
}
