//! Static inspection of custom handler code.
//!
//! A computed action names a function in the bot's own source tree. Instead of importing
//! that code, the handler module is located on disk, the function body is sliced out of
//! the file text, comments are stripped, and the remaining text is scanned for the
//! labels it returns.

pub mod lexer;
pub mod scanner;
pub mod source;

pub use lexer::strip_comments;
pub use scanner::{HeuristicScanner, TransitionScanner};
pub use source::{HandlerSource, locate_module, slice_symbol};
