//! Types shared by the host seams of both components.

/// How a component names a page element it needs to bind to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor<'a> {
    /// A CSS selector such as `.hero-svg`.
    Selector(&'a str),
    /// An element id, without the leading `#`.
    Id(&'a str),
}

impl Anchor<'_> {
    /// Render as a CSS selector.
    pub fn to_selector(self) -> String {
        match self {
            Self::Selector(s) => s.to_string(),
            Self::Id(id) => format!("#{id}"),
        }
    }
}

/// Opaque handle to a host element returned by hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);
