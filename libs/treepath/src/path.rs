//! Path expressions: keys, slices, steps, and composite paths
//!
//! A [`Path`] is an ordered, non-empty sequence of [`Step`]s. Each step is
//! either a plain [`Key`] (field name, position, or slice), a [`Step::Wildcard`]
//! matching all direct children, or a [`Step::Deep`] wildcard matching zero or
//! more nesting levels.
//!
//! Classification happens at construction: `..` (and a [`Slice`] with no
//! bounds and unit step) converts to [`Step::Wildcard`], while bounded or
//! stepped ranges convert to slice keys that are handed to the collection's
//! own ranged lookup.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A key or index applied to a single collection.
///
/// Keys are opaque to the resolver: equality, ordering, and range semantics
/// are entirely the collection's concern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Field name for map-like collections.
    Name(String),
    /// Position for sequence-like collections. Negative positions count from
    /// the end.
    Index(i64),
    /// Bounded or stepped range over a sequence-like collection.
    Slice(Slice),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name}"),
            Key::Index(index) => write!(f, "{index}"),
            Key::Slice(slice) => write!(f, "{slice}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

/// Range bounds over a sequence, with the usual clamp-and-skip slicing rules:
/// negative bounds count from the end, out-of-range bounds clamp to the
/// sequence, and a negative step walks backward.
///
/// Slicing never fails: bounds that select nothing yield an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self {
            start,
            end,
            step: None,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// A slice with no bounds and unit step selects every element; it is
    /// classified as a wildcard rather than a key.
    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.end.is_none() && matches!(self.step, None | Some(1))
    }

    /// The concrete index sequence this slice selects from `len` elements.
    ///
    /// A step of zero selects the empty window.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        let step = self.step.unwrap_or(1);
        if step == 0 || len == 0 {
            return Vec::new();
        }

        let clamp = |bound: Option<i64>, default: i64| -> i64 {
            match bound {
                None => default,
                Some(mut b) => {
                    if b < 0 {
                        b += len;
                    }
                    if step > 0 {
                        b.clamp(0, len)
                    } else {
                        b.clamp(-1, len - 1)
                    }
                }
            }
        };

        let (start_default, end_default) = if step > 0 { (0, len) } else { (len - 1, -1) };
        let start = clamp(self.start, start_default);
        let end = clamp(self.end, end_default);

        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < end) || (step < 0 && i > end) {
            out.push(i as usize);
            i += step;
        }
        out
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        if let Some(step) = self.step {
            write!(f, " step {step}")?;
        }
        Ok(())
    }
}

impl From<Range<i64>> for Slice {
    fn from(range: Range<i64>) -> Self {
        Slice::new(Some(range.start), Some(range.end))
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(range: RangeFrom<i64>) -> Self {
        Slice::new(Some(range.start), None)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(range: RangeTo<i64>) -> Self {
        Slice::new(None, Some(range.end))
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::default()
    }
}

/// One level of a path expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// Plain key, index, or slice, handed unmodified to the collection.
    Key(Key),
    /// All direct children of the current collection.
    Wildcard,
    /// Zero or more levels of [`Step::Wildcard`] before the rest of the path.
    Deep,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, "{key}"),
            Step::Wildcard => write!(f, "*"),
            Step::Deep => write!(f, "**"),
        }
    }
}

impl From<Key> for Step {
    fn from(key: Key) -> Self {
        Step::Key(key)
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Key(Key::from(name))
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step::Key(Key::from(name))
    }
}

impl From<i64> for Step {
    fn from(index: i64) -> Self {
        Step::Key(Key::from(index))
    }
}

impl From<Slice> for Step {
    fn from(slice: Slice) -> Self {
        if slice.is_full() {
            Step::Wildcard
        } else {
            Step::Key(Key::Slice(slice))
        }
    }
}

impl From<RangeFull> for Step {
    fn from(_: RangeFull) -> Self {
        Step::Wildcard
    }
}

impl From<Range<i64>> for Step {
    fn from(range: Range<i64>) -> Self {
        Step::from(Slice::from(range))
    }
}

impl From<RangeFrom<i64>> for Step {
    fn from(range: RangeFrom<i64>) -> Self {
        Step::from(Slice::from(range))
    }
}

impl From<RangeTo<i64>> for Step {
    fn from(range: RangeTo<i64>) -> Self {
        Step::from(Slice::from(range))
    }
}

/// An ordered, non-empty sequence of steps.
///
/// A one-step path is semantically identical to its single step. The
/// non-empty invariant is enforced at construction; see [`Path::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    steps: SmallVec<[Step; 4]>,
}

impl Path {
    /// Build a path from an ordered sequence of steps.
    ///
    /// Fails with [`Error::EmptyPath`] when `steps` is empty, before any
    /// resolution is attempted.
    pub fn new<I>(steps: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Step>,
    {
        let steps: SmallVec<[Step; 4]> = steps.into_iter().map(Into::into).collect();
        if steps.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self { steps })
    }

    /// Append one more step, builder style.
    pub fn then(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps; always at least one.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.steps.as_slice().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let steps = Vec::<Step>::deserialize(deserializer)?;
        Path::new(steps).map_err(serde::de::Error::custom)
    }
}

impl From<Step> for Path {
    fn from(step: Step) -> Self {
        Self {
            steps: smallvec::smallvec![step],
        }
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Path::from(Step::from(key))
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Path::from(Step::from(name))
    }
}

impl From<String> for Path {
    fn from(name: String) -> Self {
        Path::from(Step::from(name))
    }
}

impl From<i64> for Path {
    fn from(index: i64) -> Self {
        Path::from(Step::from(index))
    }
}

impl From<Slice> for Path {
    fn from(slice: Slice) -> Self {
        Path::from(Step::from(slice))
    }
}

impl From<RangeFull> for Path {
    fn from(_: RangeFull) -> Self {
        Path::from(Step::Wildcard)
    }
}

impl From<Range<i64>> for Path {
    fn from(range: Range<i64>) -> Self {
        Path::from(Step::from(range))
    }
}

impl From<RangeFrom<i64>> for Path {
    fn from(range: RangeFrom<i64>) -> Self {
        Path::from(Step::from(range))
    }
}

impl From<RangeTo<i64>> for Path {
    fn from(range: RangeTo<i64>) -> Self {
        Path::from(Step::from(range))
    }
}

macro_rules! impl_path_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Step>),+> From<($($name,)+)> for Path {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                let mut steps: SmallVec<[Step; 4]> = SmallVec::new();
                $(steps.push($name.into());)+
                Self { steps }
            }
        }
    };
}

impl_path_from_tuple!(A);
impl_path_from_tuple!(A, B);
impl_path_from_tuple!(A, B, C);
impl_path_from_tuple!(A, B, C, D);
impl_path_from_tuple!(A, B, C, D, E);
impl_path_from_tuple!(A, B, C, D, E, F);
impl_path_from_tuple!(A, B, C, D, E, F, G);
impl_path_from_tuple!(A, B, C, D, E, F, G, H);

/// Build a [`Path`] from a comma-separated list of steps.
///
/// `*` is a wildcard, `**` a deep wildcard; any other step is an expression
/// convertible into a [`Step`] (strings, integers, ranges, [`Slice`],
/// [`Key`], [`Step`]). At least one step is required.
///
/// ```
/// use treepath::{path, Step};
///
/// let p = path!["things", *, "name"];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p.steps()[1], Step::Wildcard);
///
/// let deep = path![**, "id"];
/// assert_eq!(deep.steps()[0], Step::Deep);
/// ```
#[macro_export]
macro_rules! path {
    ($($rest:tt)+) => { $crate::path!(@first $($rest)+) };

    (@first * * $($rest:tt)*) => {
        $crate::path!(@more ($crate::Path::from($crate::Step::Deep)) $($rest)*)
    };
    (@first * $($rest:tt)*) => {
        $crate::path!(@more ($crate::Path::from($crate::Step::Wildcard)) $($rest)*)
    };
    (@first $e:expr , $($rest:tt)+) => {
        $crate::path!(@more ($crate::Path::from($crate::Step::from($e))) , $($rest)+)
    };
    (@first $e:expr $(,)?) => {
        $crate::Path::from($crate::Step::from($e))
    };

    (@more ($p:expr) $(,)?) => { $p };
    (@more ($p:expr) , * * $($rest:tt)*) => {
        $crate::path!(@more ($p.then($crate::Step::Deep)) $($rest)*)
    };
    (@more ($p:expr) , * $($rest:tt)*) => {
        $crate::path!(@more ($p.then($crate::Step::Wildcard)) $($rest)*)
    };
    (@more ($p:expr) , $e:expr , $($rest:tt)+) => {
        $crate::path!(@more ($p.then($e)) , $($rest)+)
    };
    (@more ($p:expr) , $e:expr $(,)?) => { $p.then($e) };
}
