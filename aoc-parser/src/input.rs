//! Input abstraction shared by text and token parsers

/// A buffer that parsers can walk item by item.
///
/// Positions are offsets into the buffer: byte offsets for `str`, element
/// indices for token slices. An item occupies `width` positions.
pub trait ParseInput {
    /// A single element of the input (a `char` for text, a token otherwise)
    type Item: Copy + PartialEq;

    /// Total length in positions
    fn input_len(&self) -> usize;

    /// Item starting at `pos` together with its width, or `None` at the end
    /// of input (or on a position that does not start an item)
    fn item_at(&self, pos: usize) -> Option<(Self::Item, usize)>;

    /// 1-based `(line, column)` of `pos`, for error messages
    fn locate(&self, pos: usize) -> (usize, usize) {
        (1, pos + 1)
    }
}

impl ParseInput for str {
    type Item = char;

    fn input_len(&self) -> usize {
        self.len()
    }

    fn item_at(&self, pos: usize) -> Option<(char, usize)> {
        let c = self.get(pos..)?.chars().next()?;
        Some((c, c.len_utf8()))
    }

    fn locate(&self, pos: usize) -> (usize, usize) {
        let mut end = pos.min(self.len());
        while !self.is_char_boundary(end) {
            end -= 1;
        }
        let before = &self[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl<T: Copy + PartialEq> ParseInput for [T] {
    type Item = T;

    fn input_len(&self) -> usize {
        self.len()
    }

    fn item_at(&self, pos: usize) -> Option<(T, usize)> {
        self.get(pos).map(|t| (*t, 1))
    }
}
