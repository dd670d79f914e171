use std::sync::Arc;

use swc_common::{
    BytePos, FileName, GLOBALS, Globals, SourceMap, Spanned,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::error::{ExtractError, Result};

/// Every comment of a file, copied out of swc's `SingleThreadedComments` and
/// sorted by position.
///
/// `SingleThreadedComments` is `Rc`-based and files whether a comment is leading or
/// trailing by token adjacency; extractors classify comments by line instead.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    comments: Vec<Comment>,
}

impl ExtractedComments {
    /// Must be called before `SingleThreadedComments` is dropped.
    pub fn from_swc(swc_comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = swc_comments.borrow_all();
        let mut comments: Vec<Comment> = leading
            .values()
            .chain(trailing.values())
            .flatten()
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.span.lo);
        comments.dedup_by_key(|c| c.span.lo);
        Self { comments }
    }

    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments ending at or before `pos`, nearest last.
    pub fn before(&self, pos: BytePos) -> &[Comment] {
        let end = self.comments.partition_point(|c| c.span.hi <= pos);
        &self.comments[..end]
    }

    /// Comments starting at or after `pos`, nearest first.
    pub fn after(&self, pos: BytePos) -> &[Comment] {
        let start = self.comments.partition_point(|c| c.span.lo < pos);
        &self.comments[start..]
    }
}

/// A parsed file handle handed to the extractors.
pub struct ParsedSource {
    pub file_name: String,
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
    code: String,
    start_pos: BytePos,
}

impl ParsedSource {
    /// 1-based line of a byte position.
    pub fn line_of(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }

    /// Source text between two positions of this file.
    pub fn text_between(&self, lo: BytePos, hi: BytePos) -> Option<&str> {
        let start = lo.0.checked_sub(self.start_pos.0)? as usize;
        let end = hi.0.checked_sub(self.start_pos.0)? as usize;
        self.code.get(start..end)
    }

    /// Text from the start of the line containing `pos` up to `pos`.
    pub fn line_prefix(&self, pos: BytePos) -> Option<&str> {
        let end = pos.0.checked_sub(self.start_pos.0)? as usize;
        let before = self.code.get(..end)?;
        Some(before.rfind('\n').map_or(before, |i| &before[i + 1..]))
    }
}

/// `.ts`-family files are parsed without JSX so `<T>value` casts keep working.
fn syntax_for(file_name: &str) -> Syntax {
    let plain_ts = [".ts", ".mts", ".cts"]
        .iter()
        .any(|ext| file_name.ends_with(ext))
        && !file_name.ends_with(".d.ts");
    Syntax::Typescript(TsSyntax {
        tsx: !plain_ts,
        ..Default::default()
    })
}

/// Parse JavaScript or TypeScript source (JSX enabled except for `.ts` files).
pub fn parse_source(code: String, file_name: &str) -> Result<ParsedSource> {
    let source_map: Arc<SourceMap> = Default::default();

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_name.into()).into(), code.clone());

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_name),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser.parse_module().map_err(|e| {
            let line = source_map.lookup_char_pos(e.span().lo).line;
            ExtractError::Parse {
                file: file_name.to_string(),
                message: format!("{} (line {line})", e.into_kind().msg()),
            }
        })?;

        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            file_name: file_name.to_string(),
            module,
            source_map: source_map.clone(),
            comments: extracted_comments,
            code,
            start_pos: source_file.start_pos,
        })
    })
}
