//! Corvid intermediate representation.
//!
//! This crate provides the immutable node tree the compiler passes operate
//! on. It includes:
//! - The arena every node of a compilation unit is allocated in
//! - The closed [`Node`] type and its concrete variants, including
//!   [`CatchNode`] for `catch (e [if cond]) { .. }` clauses
//! - The [`Visitor`] protocol for traversal and copy-on-write rewriting
//! - Rendering back to source-like text
//! - A small set of passes built on the visitor
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use corvid_core::Source;
//! use corvid_ir::{IrArena, IrBuilder, Node, Visitor, IdentNode};
//!
//! // Renames every identifier `e` to `err`.
//! struct Rename<'ir>(IrArena<'ir>);
//!
//! impl<'ir> Visitor<'ir> for Rename<'ir> {
//!     fn leave_ident(&mut self, node: &'ir IdentNode<'ir>) -> Node<'ir> {
//!         if node.name() != "e" {
//!             return Node::Ident(node);
//!         }
//!         let meta = node.meta();
//!         let finish = meta.finish();
//!         Node::Ident(IdentNode::new(self.0, meta.source(), meta.token(), finish, "err"))
//!     }
//! }
//!
//! let bump = Bump::new();
//! let source = Source::new("demo.js", "");
//! let arena = IrArena::new(&bump);
//! let b = IrBuilder::new(arena, &source);
//!
//! let body = b.block(&[]);
//! let clause = b.catch(b.ident("e"), None, body);
//!
//! let renamed = Node::Catch(clause).accept(arena, &mut Rename(arena)).unwrap();
//! assert_eq!(renamed.to_string(), " catch (err)");
//! assert_eq!(Node::Catch(clause).to_string(), " catch (e)");
//! assert!(std::ptr::eq(renamed.as_catch().unwrap().body(), body));
//! ```

pub mod arena;
pub mod builder;
pub mod catch;
pub mod error;
pub mod expr;
pub mod node;
pub mod ops;
pub mod options;
pub mod passes;
pub mod render;
pub mod stmt;
pub mod visitor;

pub use arena::IrArena;
pub use builder::IrBuilder;
pub use catch::CatchNode;
pub use error::{IrError, IrResult};
pub use expr::{BinaryNode, IdentNode, LiteralNode, LiteralValue, UnaryNode};
pub use node::{Node, NodeKind, NodeMeta};
pub use ops::{BinaryOp, UnaryOp};
pub use options::IrOptions;
pub use passes::{
    CatchScopeResolver, ConditionalCatchCheck, ConstantFolder, PipelineOutput, ScopeOutput,
    run_pipeline,
};
pub use render::dump;
pub use stmt::{Block, ExpressionStatement, IfNode, ReturnNode, ThrowNode, TryNode, VarNode};
pub use visitor::{Visitor, traverse};
