pub mod answers;
pub mod handler_tree;
