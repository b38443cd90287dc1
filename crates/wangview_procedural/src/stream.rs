//! # Row Stream
//!
//! Lazy sequence of rows with a Markov dependency: each row is generated
//! from the row directly before it and nothing older. The consumer can fill
//! a grid one row at a time without the generator buffering the whole map.

use rand::Rng;

use crate::error::WangResult;
use crate::generator::RowGenerator;
use crate::hypergraph::ConstraintGraph;
use crate::terrain::Row;

/// Creates a stream of `height + 1` rows of `width` labels.
///
/// The first row is unconstrained from above; each of the `height` rows
/// after it is constrained by its predecessor.
pub fn rows<'g, 'r, R: Rng>(
    graph: &'g ConstraintGraph,
    width: usize,
    height: usize,
    rng: &'r mut R,
) -> RowStream<'g, 'r, R> {
    RowStream::new(RowGenerator::new(graph), width, height + 1, rng)
}

/// Forward-only row iterator.
///
/// Yields `Err` at most once; after an error the stream is exhausted.
#[derive(Debug)]
pub struct RowStream<'g, 'r, R> {
    generator: RowGenerator<'g>,
    width: usize,
    remaining: usize,
    previous: Option<Row>,
    rng: &'r mut R,
}

impl<'g, 'r, R: Rng> RowStream<'g, 'r, R> {
    /// Creates a stream that yields exactly `count` rows.
    #[must_use]
    pub fn new(generator: RowGenerator<'g>, width: usize, count: usize, rng: &'r mut R) -> Self {
        Self {
            generator,
            width,
            remaining: count,
            previous: None,
            rng,
        }
    }

    /// Returns the number of rows still to come.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<R: Rng> Iterator for RowStream<'_, '_, R> {
    type Item = WangResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self
            .generator
            .generate_row(self.width, self.previous.as_deref(), self.rng)
        {
            Ok(row) => {
                self.remaining -= 1;
                self.previous = Some(row.clone());
                Some(Ok(row))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<R: Rng> std::iter::FusedIterator for RowStream<'_, '_, R> {}
