const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

/// Removes comments from the lines of a definition, one line at a time. Since block comments
/// may span several lines, the filter remembers whether one is still open.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub(crate) struct CommentFilter {
    in_block: bool,
}

impl CommentFilter {
    /// Returns `true` if a block comment has been opened but not yet closed.
    pub(crate) fn in_block(&self) -> bool {
        self.in_block
    }

    /// Gives the trimmed content of `line` that is not commented out, or `None` if nothing
    /// remains. Line comments are handled first: a line starting with `#` is dropped as a
    /// whole, otherwise everything from the first `#` on is cut away. What is left is
    /// scanned for block comments, text between `/*` and `*/` is removed and an opener
    /// without closer carries over to the following lines.
    pub(crate) fn clean(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };

        let mut kept = String::with_capacity(line.len());
        let mut rest = line;
        loop {
            if self.in_block {
                let Some(end) = rest.find(BLOCK_CLOSE) else {
                    break;
                };
                self.in_block = false;
                rest = &rest[end + BLOCK_CLOSE.len()..];
            } else {
                let Some(start) = rest.find(BLOCK_OPEN) else {
                    kept.push_str(rest);
                    break;
                };
                kept.push_str(&rest[..start]);
                self.in_block = true;
                rest = &rest[start + BLOCK_OPEN.len()..];
            }
        }

        let kept = kept.trim();
        (!kept.is_empty()).then(|| kept.to_string())
    }
}
