//! Condition parsing and normalisation module
//!
//! This module turns queries like "author:alice -archived ( stars:>10 | pinned )"
//! into condition trees and rewrites, orders and scores those trees.

mod ast;
pub mod cache;
mod complexity;
mod compare;
mod optimiser;
pub mod parser;
pub mod tokenizer;


pub use ast::*;
pub use cache::*;
pub use complexity::*;
pub use compare::*;
pub use optimiser::*;
pub use parser::*;
pub use tokenizer::{tokenize, Token};
