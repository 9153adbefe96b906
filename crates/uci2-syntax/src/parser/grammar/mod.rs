//! # Grammar Rules
//!
//! UCI is line oriented. A file is a sequence of statements, each on its
//! own line:
//!
//! ```text
//! package <name>
//! config  <type> [<name>]
//!     option <name> <value>
//!     list   <name> [<value>]
//! ```
//!
//! `option` and `list` lines belong to the closest `config` line above them,
//! so the grammar nests them inside a `SECTION` node. Blank lines and
//! comments may appear anywhere.
//!
//! ## Error Recovery
//!
//! Grammar functions are lenient. Anything unexpected is reported with
//! `p.error()` and the rest of its line is wrapped in an `ERROR` node, then
//! parsing resumes on the next line. All input bytes end up in the tree.
//!
//! - [`statement`] - the four statement kinds and the value rule

mod statement;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root file node.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        if p.current().is_trivia() {
            p.bump();
        } else if p.at_keyword("config") {
            statement::section(p);
        } else if p.at_keyword("package") {
            statement::package(p);
        } else if p.at_keyword("option") || p.at_keyword("list") {
            let keyword = p.current_text();
            p.error(format!("`{keyword}` outside of a `config` section"));
            statement::error_line(p);
        } else {
            let found = p.current_text();
            p.error(format!(
                "expected `config` or `package`, found `{}`",
                found.escape_debug()
            ));
            statement::error_line(p);
        }
    }

    m.complete(p, SyntaxKind::ROOT);
}
