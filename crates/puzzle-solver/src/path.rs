//! Solution path reconstruction from a parent map.

use std::collections::HashMap;

/// Separator used when rendering a path on one line.
pub const PATH_SEPARATOR: &str = " -> ";

/// Walk parent links back from `goal` and return the identities in
/// start-to-goal order.
///
/// The walk stops at the first identity without a recorded parent, which is
/// the start state. A map that contains a cycle cannot make the walk spin:
/// at most `parents.len() + 1` identities are collected.
pub fn reconstruct_path(parents: &HashMap<String, String>, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;

    while let Some(parent) = parents.get(current) {
        if path.len() > parents.len() {
            break;
        }
        path.push(parent.clone());
        current = parent.as_str();
    }

    path.reverse();
    path
}

/// Render a path as `a -> b -> c`.
pub fn render_path(path: &[String]) -> String {
    path.join(PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents(links: &[(&str, &str)]) -> HashMap<String, String> {
        links
            .iter()
            .map(|(child, parent)| (child.to_string(), parent.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map_yields_single_element() {
        let path = reconstruct_path(&HashMap::new(), "012345678");
        assert_eq!(path, vec!["012345678".to_string()]);
    }

    #[test]
    fn test_path_runs_start_to_goal() {
        let map = parents(&[("c", "b"), ("b", "a"), ("x", "a")]);
        assert_eq!(reconstruct_path(&map, "c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cyclic_map_terminates() {
        let map = parents(&[("a", "b"), ("b", "a")]);
        let path = reconstruct_path(&map, "a");
        assert!(path.len() <= map.len() + 1);
        assert_eq!(path.last().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_render_path() {
        let path = vec!["120345678".to_string(), "102345678".to_string(), "012345678".to_string()];
        assert_eq!(
            render_path(&path),
            "120345678 -> 102345678 -> 012345678"
        );
        assert_eq!(render_path(&path[2..]), "012345678");
    }
}
