use std::collections::HashMap;

use crate::features::categories::dtos::CategoryNodeDto;
use crate::features::categories::models::Category;

/// Assemble ordered rows into a forest.
///
/// Rows live in an arena indexed by position; parent links are resolved
/// through an id→index map, so sibling order follows row order. Rows whose
/// parent is not in the set stay at the top level, and rows caught in a
/// parent cycle are emitted as roots once instead of being dropped.
pub fn build_forest(rows: Vec<Category>) -> Vec<CategoryNodeDto> {
    let index_of: HashMap<i32, usize> = rows
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.id, idx))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots = Vec::new();

    for (idx, category) in rows.iter().enumerate() {
        match category.parent_id.and_then(|pid| index_of.get(&pid)) {
            Some(&parent_idx) if parent_idx != idx => children[parent_idx].push(idx),
            _ => roots.push(idx),
        }
    }

    let mut slots: Vec<Option<CategoryNodeDto>> = rows
        .into_iter()
        .map(|c| Some(CategoryNodeDto::from(c)))
        .collect();

    let mut forest: Vec<CategoryNodeDto> = roots
        .into_iter()
        .filter_map(|idx| take_subtree(idx, &mut slots, &children))
        .collect();

    // Anything left was only reachable through a cycle
    for idx in 0..slots.len() {
        if let Some(node) = take_subtree(idx, &mut slots, &children) {
            forest.push(node);
        }
    }

    forest
}

fn take_subtree(
    idx: usize,
    slots: &mut [Option<CategoryNodeDto>],
    children: &[Vec<usize>],
) -> Option<CategoryNodeDto> {
    let mut node = slots[idx].take()?;
    node.children = children[idx]
        .iter()
        .filter_map(|&child| take_subtree(child, slots, children))
        .collect();
    Some(node)
}

/// Flat view used when the store lacks the columns needed for nesting
pub fn flat_nodes(rows: Vec<Category>) -> Vec<CategoryNodeDto> {
    rows.into_iter().map(CategoryNodeDto::from).collect()
}
