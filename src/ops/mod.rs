pub mod fuzzy;
pub mod library;
pub mod reconcile;
pub mod snippet_ops;
