//! Lazy sequence concatenation
//!
//! [`LazyConcat`] chains the outputs of many sources into one logical
//! sequence without opening any source up front: a source's iterator is
//! only constructed when the previous one is exhausted. The views use it
//! to concatenate per-document producers across a corpus while preserving
//! document order.

/// Lazily concatenated iterator over a collection of sources.
pub struct LazyConcat<S, I, F>
where
    I: Iterator,
    F: FnMut(S) -> I,
{
    sources: std::vec::IntoIter<S>,
    make: F,
    current: Option<I>,
}

impl<S, I, F> LazyConcat<S, I, F>
where
    I: Iterator,
    F: FnMut(S) -> I,
{
    /// `make` is called once per source, on demand, in order.
    pub fn new(sources: Vec<S>, make: F) -> Self {
        LazyConcat {
            sources: sources.into_iter(),
            make,
            current: None,
        }
    }
}

impl<S, I, F> Iterator for LazyConcat<S, I, F>
where
    I: Iterator,
    F: FnMut(S) -> I,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(item) = current.next() {
                    return Some(item);
                }
            }
            match self.sources.next() {
                Some(source) => self.current = Some((self.make)(source)),
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_concatenates_in_order() {
        let concat = LazyConcat::new(vec![vec![1, 2], vec![], vec![3]], |v: Vec<i32>| {
            v.into_iter()
        });
        assert_eq!(concat.collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sources_open_on_demand() {
        let opened = Cell::new(0);
        let mut concat = LazyConcat::new(vec![vec![1, 2], vec![3]], |v: Vec<i32>| {
            opened.set(opened.get() + 1);
            v.into_iter()
        });
        assert_eq!(opened.get(), 0);
        assert_eq!(concat.next(), Some(1));
        assert_eq!(opened.get(), 1);
        assert_eq!(concat.next(), Some(2));
        assert_eq!(opened.get(), 1);
        // The second source is only opened once the first is exhausted.
        assert_eq!(concat.next(), Some(3));
        assert_eq!(opened.get(), 2);
        assert_eq!(concat.next(), None);
    }

    #[test]
    fn test_empty_source_list() {
        let mut concat = LazyConcat::new(Vec::<Vec<i32>>::new(), |v| v.into_iter());
        assert_eq!(concat.next(), None);
    }
}
