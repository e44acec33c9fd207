//! Attribute paths used to locate a node in error messages.

use std::fmt;

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Stack of segments from the root to the node being visited.
///
/// Walkers push on descent and pop on return; the path is only rendered to a
/// string when an error is raised.
#[derive(Debug, Clone, Default)]
pub(crate) struct AttrPath {
    segments: Vec<Segment>,
}

impl AttrPath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

