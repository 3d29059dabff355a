//! Depth-first ordering of pages by parent link.

use std::collections::{HashMap, HashSet};

use pageloom_core::PageId;

/// Order `items` depth-first, pairing each with its depth.
///
/// Siblings keep their input order. An item whose parent is not in `items`
/// is treated as a root.
pub(crate) fn flatten_tree<T>(
    items: &[T],
    id: impl Fn(&T) -> PageId,
    parent: impl Fn(&T) -> Option<PageId>,
) -> Vec<(usize, &T)> {
    let known: HashSet<PageId> = items.iter().map(&id).collect();
    let mut children: HashMap<Option<PageId>, Vec<usize>> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        let p = parent(item).filter(|p| known.contains(p));
        children.entry(p).or_default().push(i);
    }

    let mut stack: Vec<(usize, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|&i| (0, i)).collect())
        .unwrap_or_default();
    let mut visited = HashSet::new();
    let mut out = Vec::with_capacity(items.len());

    while let Some((depth, i)) = stack.pop() {
        if !visited.insert(i) {
            continue;
        }
        out.push((depth, &items[i]));
        if let Some(kids) = children.get(&Some(id(&items[i]))) {
            stack.extend(kids.iter().rev().map(|&k| (depth + 1, k)));
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
