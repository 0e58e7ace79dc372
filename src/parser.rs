//! Phase 3: Tree Builder
//!
//! The tree builder walks the document line by line, driving the normalizer
//! and token matcher, and maintains a stack of open blocks that mirrors the
//! current brace nesting. It handles:
//! - Key/value assignment and block opening (inline or separate-line `{`)
//! - Duplicate block keys: merged, or kept apart under synthetic
//!   `key-TOKEN-n` names when a duplicate token is configured
//! - Multi-line quoted values (unterminated quote joins the next line)
//! - `#base` includes, fetched through the external collaborator
//! - The `"REMOVE"` sentinel, which drops the whole line
//!
//! Each open block owns its object while it is on the stack; the object is
//! reinserted into the parent's slot when the block closes, so no node is
//! ever shared between two parents.

use crate::error::{Error, ParseContext, Result};
use crate::lexer;
use crate::loader::{self, DocumentLoader};
use crate::merge;
use crate::scanner::{self, LineKind};
use crate::value::{Object, Value};

/// An open `{ ... }` block: the key it will be stored under and the object
/// being filled in, taken out of the parent for the duration of the block.
struct OpenBlock {
    key: String,
    object: Object,
}

/// The object currently receiving keys: the innermost open block, or the
/// document root when the stack is empty.
fn top_object<'a>(root: &'a mut Object, stack: &'a mut [OpenBlock]) -> &'a mut Object {
    match stack.last_mut() {
        Some(block) => &mut block.object,
        None => root,
    }
}

/// Parse one document into a value tree.
///
/// `loader` and a context path are both required before `#base` directives
/// are honored; otherwise they are inert, like every other `#` line.
pub(crate) fn parse_document(
    input: &str,
    ctx: &ParseContext,
    duplicate_token: Option<&str>,
    loader: Option<&dyn DocumentLoader>,
) -> Result<Value> {
    if let Some(token) = duplicate_token {
        if token.is_empty() {
            return Err(Error::InvalidArgument(
                "duplicate token must not be empty".to_string(),
            ));
        }
    }

    let raw_lines: Vec<&str> = input.split('\n').collect();

    let mut root = Object::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut externals: Vec<Value> = Vec::new();
    let mut expect_bracket = false;

    let mut i = 0;
    while i < raw_lines.len() {
        let line_num = i;
        let mut line = scanner::normalize(raw_lines[i]);
        i += 1;

        match scanner::classify(&line) {
            LineKind::Blank | LineKind::Comment => continue,
            LineKind::Directive => {
                fetch_external(&line, ctx, loader, &mut externals)?;
                continue;
            }
            LineKind::Content => {}
        }

        // Sentinel: the whole line is dropped, key and all.
        if line.contains("\"REMOVE\"") {
            continue;
        }

        // The opening brace for the previously pushed block.
        if line.starts_with('{') {
            expect_bracket = false;
            continue;
        }

        // A trailing brace satisfies the bracket for a key on this line.
        let mut sameline_bracket = false;
        if line.ends_with('{') {
            line.truncate(line.len() - 1);
            line.truncate(line.trim_end().len());
            sameline_bracket = true;
        }

        if expect_bracket {
            return Err(Error::ExpectedBracket(String::new()).with_location(ctx, line_num));
        }

        // Close the innermost block and hand its object back to the parent.
        if line.starts_with('}') {
            match stack.pop() {
                Some(block) => {
                    let parent = top_object(&mut root, &mut stack);
                    parent.insert(block.key, Value::Object(block.object));
                }
                None => {
                    return Err(
                        Error::UnbalancedBraces(String::new()).with_location(ctx, line_num)
                    );
                }
            }
            continue;
        }

        // Key/value loop: absorbs continuation lines until a terminal match.
        loop {
            let m = lexer::match_key_value(&line)
                .ok_or_else(|| Error::InvalidSyntax(String::new()).with_location(ctx, line_num))?;

            match m.value {
                None => {
                    open_block(
                        m.key,
                        duplicate_token,
                        &mut root,
                        &mut stack,
                        &mut expect_bracket,
                        sameline_bracket,
                    );
                    break;
                }
                Some(value) => {
                    if value.is_terminated() {
                        // Scalar assignment; a repeated scalar key overwrites
                        // in place, keeping its original position.
                        let top = top_object(&mut root, &mut stack);
                        top.insert(m.key, Value::String(value.text().to_string()));
                        break;
                    }
                    // Quoted value without its closing quote: the value spans
                    // onto the next physical line.
                    if i >= raw_lines.len() {
                        return Err(
                            Error::InvalidSyntax(String::new()).with_location(ctx, line_num)
                        );
                    }
                    line.push('\n');
                    line.push_str(&scanner::strip_non_ascii(raw_lines[i]));
                    i += 1;
                }
            }
        }
    }

    if !stack.is_empty() {
        let suffix = match &ctx.path {
            Some(path) => format!(" at end of <{}>", path),
            None => " at end of input".to_string(),
        };
        return Err(Error::UnbalancedBraces(suffix));
    }

    Ok(Value::Object(merge::fold_externals(root, &externals)))
}

/// Push a new block for `key` onto the stack.
///
/// With a duplicate token configured, a colliding block key is minted a
/// synthetic `key-TOKEN-n` sibling (n counting up from 2). Without one,
/// the existing object is reopened so repeated blocks accumulate.
fn open_block(
    key: String,
    duplicate_token: Option<&str>,
    root: &mut Object,
    stack: &mut Vec<OpenBlock>,
    expect_bracket: &mut bool,
    sameline_bracket: bool,
) {
    let top = top_object(root, stack);

    let key = match duplicate_token {
        Some(token) if top.contains_key(&key) => synthesize_key(&key, token, top),
        _ => key,
    };

    // Take the object out of its slot while the block is open; an empty
    // placeholder keeps the key's position in the parent.
    let object = match top.get_mut(&key) {
        Some(Value::Object(existing)) => std::mem::take(existing),
        Some(scalar) => {
            // A block key shadowing a scalar replaces it.
            *scalar = Value::Object(Object::new());
            Object::new()
        }
        None => {
            top.insert(key.clone(), Value::Object(Object::new()));
            Object::new()
        }
    };

    stack.push(OpenBlock { key, object });
    *expect_bracket = !sameline_bracket;
}

/// Find the smallest n >= 2 such that `key-TOKEN-n` is free in `top`.
fn synthesize_key(base: &str, token: &str, top: &Object) -> String {
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}-{}", base, token, n);
        if !top.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Handle a `#` directive line. Only `#base <path>` does anything, and only
/// when the current document has a path and a loader was supplied; the
/// referenced document is fetched, parsed standalone (no path, no token, so
/// its own `#base` lines are inert), and queued for the override merge.
fn fetch_external(
    line: &str,
    ctx: &ParseContext,
    loader: Option<&dyn DocumentLoader>,
    externals: &mut Vec<Value>,
) -> Result<()> {
    let Some(rest) = line.strip_prefix("#base") else {
        return Ok(());
    };
    let reference = rest.trim();
    let (Some(current), Some(loader)) = (ctx.path.as_deref(), loader) else {
        return Ok(());
    };
    if reference.is_empty() {
        return Ok(());
    }

    let resolved = loader::resolve_relative(current, reference);
    tracing::debug!(path = %resolved, "importing external document");
    let text = loader.load(&resolved).map_err(|source| Error::Fetch {
        path: resolved.clone(),
        source,
    })?;
    let external = parse_document(&text, &ParseContext::default(), None, None)?;
    externals.push(external);
    tracing::debug!(path = %resolved, "import complete");
    Ok(())
}
