//! # Block Module
//!
//! Cell-level geometry shared by the classifier and the mesher: which six
//! neighbours a cell has and how each of its faces is laid out.

pub mod block_side;
