//! Source buffers and byte ranges.
//!
//! A `Source` is a named immutable text buffer shared behind `Rc`; two
//! ranges compare equal only when they point into the same buffer. A
//! `Range` is a half-open byte interval plus the line/column coordinate
//! of its first byte.

use std::rc::Rc;

/// A named immutable source buffer. Identity is `Rc` pointer identity.
#[derive(Debug)]
pub struct Source {
    name: String,
    contents: String,
}

impl Source {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Rc<Source> {
        Rc::new(Source {
            name: name.into(),
            contents: contents.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn size(&self) -> u32 {
        self.contents.len() as u32
    }

    pub fn byte(&self, index: u32) -> Option<u8> {
        self.contents.as_bytes().get(index as usize).copied()
    }
}

/// 0-based line/column coordinate. Rendered 1-based in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

/// A lexer mark: byte index plus its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub index: u32,
    pub coord: LineColumn,
}

/// A half-open byte interval into a `Source`, carrying the coordinate of
/// its start byte. `start <= end <= source.size` always holds.
#[derive(Debug, Clone, Default)]
pub struct Range {
    source: Option<Rc<Source>>,
    pub start: u32,
    pub end: u32,
    pub position: LineColumn,
}

impl Range {
    pub fn new(source: Rc<Source>, start: u32, end: u32, position: LineColumn) -> Range {
        debug_assert!(start <= end && end <= source.size());
        Range {
            source: Some(source),
            start,
            end,
            position,
        }
    }

    pub fn at(source: Rc<Source>, pos: Position, end: u32) -> Range {
        Range::new(source, pos.index, end, pos.coord)
    }

    /// The invalid-source sentinel. Compares unequal to every range that
    /// has a source, including itself.
    pub fn none() -> Range {
        Range::default()
    }

    pub fn source(&self) -> Option<&Rc<Source>> {
        self.source.as_ref()
    }

    pub fn size(&self) -> u32 {
        self.end - self.start
    }

    /// The source text this range covers. Empty when the range does not
    /// fall on character boundaries.
    pub fn text(&self) -> &str {
        match &self.source {
            Some(src) => src
                .contents()
                .get(self.start as usize..self.end as usize)
                .unwrap_or(""),
            None => "",
        }
    }

    /// The raw bytes this range covers.
    pub fn bytes(&self) -> &[u8] {
        match &self.source {
            Some(src) => &src.contents().as_bytes()[self.start as usize..self.end as usize],
            None => &[],
        }
    }

    fn same_source(&self, other: &Range) -> bool {
        match (&self.source, &other.source) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Smallest range enclosing both. Keeps the position of whichever
    /// start survives.
    pub fn merge(&self, other: &Range) -> Range {
        assert!(self.same_source(other));
        let (start, position) = if self.start <= other.start {
            (self.start, self.position)
        } else {
            (other.start, other.position)
        };
        Range {
            source: self.source.clone(),
            start,
            end: self.end.max(other.end),
            position,
        }
    }

    /// Grow this range forward to cover `other`. Requires that `other`
    /// does not start before and does not end before this range.
    pub fn extend(&mut self, other: &Range) {
        assert!(self.same_source(other));
        assert!(self.start <= other.start);
        assert!(self.end <= other.end);
        self.end = other.end;
    }

    /// Sub-range starting `offset` bytes in, `len` bytes long (to the end
    /// when `len` is 0). The coordinate is recomputed by scanning the
    /// buffer from its start.
    pub fn sub(&self, offset: u32, len: u32) -> Range {
        let src = self.source.clone().expect("sub on invalid range");
        let start = self.start + offset;
        assert!(start <= self.end);
        let end = if len == 0 { self.end } else { start + len };
        assert!(end <= self.end);

        let mut coord = LineColumn::default();
        for &b in &src.contents().as_bytes()[..start as usize] {
            if b == b'\n' {
                coord.line += 1;
                coord.column = 0;
            } else {
                coord.column += 1;
            }
        }
        Range {
            source: Some(src),
            start,
            end,
            position: coord,
        }
    }

    /// Widen to the newline boundaries of the line containing `start`.
    pub fn enclosing_line(&self) -> Range {
        let src = match &self.source {
            Some(src) => src,
            None => return self.clone(),
        };
        let bytes = src.contents().as_bytes();
        let mut s = self.start.min(src.size().saturating_sub(1));
        while s > 0 && bytes[s as usize] != b'\n' {
            s -= 1;
        }
        if (s as usize) < bytes.len() && bytes[s as usize] == b'\n' {
            s += 1;
        }
        let mut e = self.end;
        while (e as usize) < bytes.len() && bytes[e as usize] != b'\n' {
            e += 1;
        }
        Range {
            source: self.source.clone(),
            start: s,
            end: e,
            position: self.position,
        }
    }

    /// Empty range sitting at this range's end.
    pub fn range_at_end(&self) -> Range {
        Range {
            source: self.source.clone(),
            start: self.end,
            end: self.end,
            position: self.position,
        }
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Range) -> bool {
        self.same_source(other) && self.start == other.start && self.end == other.end
    }
}
