mod clone_subtree;

pub use clone_subtree::CloneSubtree;
