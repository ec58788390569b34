use hashbrown::HashSet;

use crate::graph_traits::GraphAdapter;
use crate::options::EdgeSelector;
use common::KspResult;

/// Find all simple paths from source to target as vertex sequences.
///
/// Parallel edges collapse into one step, so every returned sequence is
/// distinct. `max_length` bounds the number of vertices per path.
pub fn all_simple_paths<G: GraphAdapter>(
    graph: &G,
    source: &G::VertexId,
    target: &G::VertexId,
    edges: &EdgeSelector<G>,
    max_length: Option<usize>,
) -> KspResult<Vec<Vec<G::VertexId>>> {
    let mut paths = Vec::new();
    let mut current_path = vec![source.clone()];
    let mut visited = HashSet::new();
    visited.insert(source.clone());

    dfs_paths(graph, source, target, edges, max_length, &mut current_path, &mut visited, &mut paths)?;

    Ok(paths)
}

#[allow(clippy::too_many_arguments)]
fn dfs_paths<G: GraphAdapter>(
    graph: &G,
    current: &G::VertexId,
    target: &G::VertexId,
    edges: &EdgeSelector<G>,
    max_length: Option<usize>,
    path: &mut Vec<G::VertexId>,
    visited: &mut HashSet<G::VertexId>,
    paths: &mut Vec<Vec<G::VertexId>>,
) -> KspResult<()> {
    if current == target {
        paths.push(path.clone());
        return Ok(());
    }

    if let Some(max_len) = max_length {
        if path.len() >= max_len {
            return Ok(());
        }
    }

    let mut neighbours: Vec<G::VertexId> = Vec::new();
    for (_edge, next) in edges.expand(graph, current)? {
        if !neighbours.contains(&next) {
            neighbours.push(next);
        }
    }

    for next in neighbours {
        if !visited.contains(&next) {
            visited.insert(next.clone());
            path.push(next.clone());

            dfs_paths(graph, &next, target, edges, max_length, path, visited, paths)?;

            path.pop();
            visited.remove(&next);
        }
    }

    Ok(())
}
