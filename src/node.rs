//! Search tree nodes and path reconstruction.
//!
//! Nodes are stored in a flat arena (`SearchTree`) and reference their parent by
//! index, so lineage forms a tree without any owning back-pointers.

use crate::engine::{Board, Coord};
use crate::heuristics::Heuristic;

/// A board reached during search, with its path cost and lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    /// The board at this node.
    pub board: Board,
    /// Number of moves from the initial board (`g`).
    pub cost: u32,
    /// Index of the parent node in the arena, `None` for the root.
    pub parent: Option<usize>,
}

impl SearchNode {
    /// Creates a root node with zero cost and no parent.
    pub fn root(board: Board) -> Self {
        SearchNode {
            board,
            cost: 0,
            parent: None,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }
}

/// Arena owning every node created by one search.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Creates a tree holding only the root node, at index 0.
    pub fn with_root(board: Board) -> Self {
        SearchTree {
            nodes: vec![SearchNode::root(board)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` was not returned by this tree.
    pub fn get(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Appends a child of `parent` holding `board`, returning its index.
    ///
    /// The child's cost is always one more than its parent's.
    pub fn push_child(&mut self, parent: usize, board: Board) -> usize {
        let cost = self.nodes[parent].cost + 1;
        self.nodes.push(SearchNode {
            board,
            cost,
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    /// Empty-cell coordinate of the node's parent, if it has one.
    fn parent_empty(&self, index: usize) -> Option<Coord> {
        self.nodes[index]
            .parent
            .map(|p| self.nodes[p].board.empty())
    }

    /// Successor boards of the node at `index`, without the one that would undo
    /// the move that produced it.
    pub fn expand(&self, index: usize) -> Vec<Board> {
        let excluded = self.parent_empty(index);
        self.nodes[index].board.generate_neighbors(excluded)
    }

    /// Estimated total cost through this node: `g + h(board)`.
    pub fn priority_key(&self, index: usize, heuristic: Heuristic) -> u32 {
        let node = &self.nodes[index];
        node.cost + heuristic.estimate(&node.board)
    }

    /// Boards from the root to the node at `index`, inclusive.
    pub fn reconstruct_path(&self, index: usize) -> Vec<Board> {
        reconstruct_path(&self.nodes, index)
    }

    /// Consumes the tree, returning the underlying arena.
    pub fn into_nodes(self) -> Vec<SearchNode> {
        self.nodes
    }
}

/// Trace arena indices from `terminal_index` back to the root, returned in
/// root-to-terminal order.
pub fn extract_node_path(tree: &[SearchNode], terminal_index: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = Some(terminal_index);
    while let Some(idx) = current {
        path.push(idx);
        current = tree[idx].parent;
    }
    path.reverse();
    path
}

/// Boards along the lineage of `terminal_index`, root first and terminal last.
pub fn reconstruct_path(tree: &[SearchNode], terminal_index: usize) -> Vec<Board> {
    extract_node_path(tree, terminal_index)
        .into_iter()
        .map(|idx| tree[idx].board.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::manhattan_distance;

    fn start() -> Board {
        Board::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap()
    }

    #[test]
    fn test_root_node() {
        let tree = SearchTree::with_root(start());
        let root = tree.get(0);
        assert_eq!(root.cost, 0);
        assert_eq!(root.parent, None);
        assert_eq!(tree.reconstruct_path(0), vec![start()]);
    }

    #[test]
    fn test_root_priority_key_is_heuristic() {
        let tree = SearchTree::with_root(start());
        assert_eq!(
            tree.priority_key(0, Heuristic::Manhattan),
            manhattan_distance(&start())
        );
    }

    #[test]
    fn test_child_cost_and_priority_key() {
        let mut tree = SearchTree::with_root(start());
        let board = tree.expand(0).remove(0);
        let child = tree.push_child(0, board.clone());
        assert_eq!(tree.get(child).cost, 1);
        assert_eq!(tree.get(child).parent, Some(0));
        assert_eq!(
            tree.priority_key(child, Heuristic::Manhattan),
            1 + manhattan_distance(&board)
        );
    }

    #[test]
    fn test_expand_excludes_back_move() {
        let mut tree = SearchTree::with_root(start());
        // Root empty cell is the center, so it has 4 successors.
        let successors = tree.expand(0);
        assert_eq!(successors.len(), 4);

        let child = tree.push_child(0, successors[0].clone());
        let grandchildren = tree.expand(child);
        // The child's empty cell sits on an edge: 3 candidates minus the back-move.
        assert_eq!(grandchildren.len(), 2);
        assert!(grandchildren.iter().all(|b| *b != start()));
    }

    #[test]
    fn test_reconstruct_path_linear() {
        let mut tree = SearchTree::with_root(start());
        let down = tree
            .expand(0)
            .into_iter()
            .find(|b| b.empty() == Coord::new(2, 1))
            .unwrap();
        let a = tree.push_child(0, down);
        let right = tree
            .expand(a)
            .into_iter()
            .find(|b| b.empty() == Coord::new(2, 2))
            .unwrap();
        let b = tree.push_child(a, right);

        assert!(tree.get(b).is_goal());
        let path = tree.reconstruct_path(b);
        assert_eq!(path.len(), tree.get(b).cost as usize + 1);
        assert_eq!(path.first(), Some(&start()));
        assert_eq!(path.last(), Some(&Board::goal()));
    }

    #[test]
    fn test_extract_node_path_branching() {
        let mut tree = SearchTree::with_root(start());
        let successors = tree.expand(0);
        let one = tree.push_child(0, successors[0].clone());
        let _two = tree.push_child(0, successors[1].clone());
        let leaf_board = tree.expand(one).remove(0);
        let three = tree.push_child(one, leaf_board);
        assert_eq!(extract_node_path(tree.nodes(), three), vec![0, one, three]);
    }
}
