//! Display Order
//!
//! Every section record carries a zero-based `order` that must equal its
//! array position. All renumbering goes through this module.

/// A record with a client-maintained display position
pub trait Ordered {
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

/// Rewrite `order` so that item `i` has order `i`
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_order(position as u32);
    }
}

/// True when orders are exactly `0..len` in array order
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(position, item)| item.order() == position as u32)
}

/// Sort by stored order (stable, so ties keep their array order), then renumber.
///
/// Used when adopting data from outside the editor, which may carry gaps or
/// duplicates.
pub fn normalize<T: Ordered>(items: &mut Vec<T>) {
    items.sort_by_key(|item| item.order());
    renumber(items);
}

/// Move the element at `from` to `to`, shifting everything in between.
///
/// Both indices must be in range; callers check.
pub(crate) fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        order: u32,
    }

    impl Ordered for Row {
        fn order(&self) -> u32 {
            self.order
        }

        fn set_order(&mut self, order: u32) {
            self.order = order;
        }
    }

    fn row(name: &'static str, order: u32) -> Row {
        Row { name, order }
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut rows = vec![row("a", 4), row("b", 9), row("c", 0)];
        renumber(&mut rows);
        assert!(is_dense(&rows));
        assert_eq!(rows[2].order, 2);
    }

    #[test]
    fn test_normalize_sorts_then_renumbers() {
        let mut rows = vec![row("c", 7), row("a", 1), row("b", 1)];
        normalize(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(is_dense(&rows));
    }

    #[test]
    fn test_move_within_forward_and_back() {
        let mut v = vec![0, 1, 2, 3, 4];
        move_within(&mut v, 1, 3);
        assert_eq!(v, vec![0, 2, 3, 1, 4]);
        move_within(&mut v, 3, 0);
        assert_eq!(v, vec![1, 0, 2, 3, 4]);
    }

    #[test]
    fn test_empty_is_dense() {
        let rows: Vec<Row> = Vec::new();
        assert!(is_dense(&rows));
    }
}
