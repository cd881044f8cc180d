//! Recursive path resolution over tree collections
//!
//! Resolution is a pure function of (current node, remaining steps). A plain
//! key descends once and propagates its failure; a wildcard, deep wildcard,
//! or ranged key fans out and aggregates per-branch results with
//! flatten-and-skip: branches failing with a recoverable error are dropped,
//! everything else propagates immediately. A deep wildcard tries the rest of
//! the path on the current node itself before fanning out below it.

use crate::error::{Error, Result};
use crate::path::{Key, Path, Step};
use crate::tree::Tree;
use tracing::trace;

/// How a deep wildcard with nothing following it expands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailingDeep {
    /// Equal to a bare wildcard: the direct children of the current node.
    #[default]
    Children,
    /// Every descendant at every depth, still skipping text-like nodes.
    Descendants,
}

/// Options controlling resolution behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions {
    /// Maximum number of descents below the root before resolution fails
    /// with [`Error::DepthExceeded`]. `None` disables the check; cyclic
    /// collections will then recurse until the stack is exhausted.
    pub max_depth: Option<usize>,
    /// Expansion of a trailing deep wildcard.
    pub trailing_deep: TrailingDeep,
}

/// The outcome of resolving a path: one value for a pure key chain, a flat
/// list once a wildcard, deep wildcard, or ranged key is involved.
///
/// The list is flattened exactly one level regardless of how many wildcards
/// the path contains; results are never nested lists.
#[derive(Debug, PartialEq)]
pub enum Resolved<'a, T: ?Sized> {
    One(&'a T),
    Many(Vec<&'a T>),
}

impl<'a, T: ?Sized> Resolved<'a, T> {
    /// The single value, when the path contained no fan-out step.
    pub fn as_one(&self) -> Option<&'a T> {
        match self {
            Resolved::One(value) => Some(value),
            Resolved::Many(_) => None,
        }
    }

    /// The value list, when the path contained a fan-out step.
    pub fn as_many(&self) -> Option<&[&'a T]> {
        match self {
            Resolved::One(_) => None,
            Resolved::Many(values) => Some(values),
        }
    }

    /// All resolved values; a single value becomes a one-element list.
    pub fn into_vec(self) -> Vec<&'a T> {
        match self {
            Resolved::One(value) => vec![value],
            Resolved::Many(values) => values,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        match self {
            Resolved::One(value) => std::slice::from_ref(value).iter().copied(),
            Resolved::Many(values) => values.as_slice().iter().copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Resolved::One(_) => 1,
            Resolved::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T: ?Sized> IntoIterator for Resolved<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Read-only resolver over a borrowed root collection.
///
/// Holds only the root reference and the options; it can be queried any
/// number of times and never copies or mutates the collection.
pub struct Resolver<'a, T: Tree + ?Sized> {
    root: &'a T,
    options: ResolveOptions,
}

impl<'a, T: Tree + ?Sized> Resolver<'a, T> {
    pub fn new(root: &'a T) -> Self {
        Self {
            root,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(root: &'a T, options: ResolveOptions) -> Self {
        Self { root, options }
    }

    pub fn root(&self) -> &'a T {
        self.root
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a path expression against the root.
    ///
    /// Anything convertible into a [`Path`] is accepted: a single key or
    /// index, a tuple of steps, or a [`crate::path!`] expression.
    pub fn resolve(&self, path: impl Into<Path>) -> Result<Resolved<'a, T>> {
        let path = path.into();
        self.resolve_path(&path)
    }

    /// Resolve an already-built path, e.g. one reused across queries.
    pub fn resolve_path(&self, path: &Path) -> Result<Resolved<'a, T>> {
        trace!(path = %path, "resolving path");
        resolve_steps(self.root, path.steps(), &self.options, 0)
    }
}

/// One-shot resolution with default options.
pub fn resolve<'a, T: Tree + ?Sized>(
    root: &'a T,
    path: impl Into<Path>,
) -> Result<Resolved<'a, T>> {
    Resolver::new(root).resolve(path)
}

/// Outcome of applying one key to one node: a single child, or the window a
/// ranged key selects.
enum Applied<'a, T: ?Sized> {
    One(&'a T),
    Window(Vec<&'a T>),
}

fn check_depth(options: &ResolveOptions, depth: usize) -> Result<()> {
    match options.max_depth {
        Some(limit) if depth > limit => Err(Error::DepthExceeded { limit }),
        _ => Ok(()),
    }
}

fn resolve_steps<'a, T: Tree + ?Sized>(
    node: &'a T,
    steps: &[Step],
    options: &ResolveOptions,
    depth: usize,
) -> Result<Resolved<'a, T>> {
    check_depth(options, depth)?;

    let Some((first, rest)) = steps.split_first() else {
        // Unreachable through the public surface: paths are non-empty by
        // construction. Treat the node itself as the result.
        return Ok(Resolved::One(node));
    };

    match first {
        Step::Key(key) => match apply_key(node, key)? {
            Applied::One(child) => {
                if rest.is_empty() {
                    Ok(Resolved::One(child))
                } else {
                    resolve_steps(child, rest, options, depth + 1)
                }
            }
            Applied::Window(children) => {
                if rest.is_empty() {
                    Ok(Resolved::Many(children))
                } else {
                    Ok(Resolved::Many(apply_to_each(
                        &children,
                        rest,
                        options,
                        depth + 1,
                    )?))
                }
            }
        },
        Step::Wildcard => {
            let children = expand_wildcard(node)?;
            if rest.is_empty() {
                Ok(Resolved::Many(children))
            } else {
                Ok(Resolved::Many(apply_to_each(
                    &children,
                    rest,
                    options,
                    depth + 1,
                )?))
            }
        }
        Step::Deep => {
            if rest.is_empty() && options.trailing_deep == TrailingDeep::Children {
                Ok(Resolved::Many(expand_wildcard(node)?))
            } else {
                Ok(Resolved::Many(expand_deep(node, rest, options, depth)?))
            }
        }
    }
}

fn apply_key<'a, T: Tree + ?Sized>(node: &'a T, key: &Key) -> Result<Applied<'a, T>> {
    let not_found = || Error::KeyNotFound {
        key: key.clone(),
        kind: node.kind(),
    };
    match key {
        Key::Name(name) => node
            .child_by_name(name)
            .map(Applied::One)
            .ok_or_else(not_found),
        Key::Index(index) => node
            .child_by_index(*index)
            .map(Applied::One)
            .ok_or_else(not_found),
        Key::Slice(slice) => node
            .children_in_range(slice)
            .map(Applied::Window)
            .ok_or_else(not_found),
    }
}

fn expand_wildcard<'a, T: Tree + ?Sized>(node: &'a T) -> Result<Vec<&'a T>> {
    node.children()
        .ok_or_else(|| Error::NotExpandable { kind: node.kind() })
}

/// Apply `rest` to each child independently and concatenate the survivors
/// into one flat list. Branches failing with a recoverable error are
/// dropped; anything else aborts the whole aggregation.
fn apply_to_each<'a, T: Tree + ?Sized>(
    children: &[&'a T],
    rest: &[Step],
    options: &ResolveOptions,
    depth: usize,
) -> Result<Vec<&'a T>> {
    let mut out = Vec::new();
    for child in children {
        match resolve_steps(*child, rest, options, depth) {
            Ok(Resolved::One(value)) => out.push(value),
            Ok(Resolved::Many(values)) => out.extend(values),
            Err(err) if err.is_skippable() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}

/// Expand a deep wildcard: the rest of the path matches after zero or more
/// wildcard applications. Zero applications means `rest` is tried on this
/// node itself, with a recoverable failure dropped like any wildcard
/// branch; the deeper applications walk every level below the node.
fn expand_deep<'a, T: Tree + ?Sized>(
    node: &'a T,
    rest: &[Step],
    options: &ResolveOptions,
    depth: usize,
) -> Result<Vec<&'a T>> {
    let mut out = Vec::new();
    if !rest.is_empty() {
        match resolve_steps(node, rest, options, depth) {
            Ok(Resolved::One(value)) => out.push(value),
            Ok(Resolved::Many(values)) => out.extend(values),
            Err(err) if err.is_skippable() => {}
            Err(err) => return Err(err),
        }
    }
    out.extend(expand_below(node, rest, options, depth)?);
    Ok(out)
}

/// Apply `rest` across this node's children, then re-expand one level
/// deeper for every child that is neither text-like nor a leaf. An empty
/// `rest` yields the children themselves at every level.
fn expand_below<'a, T: Tree + ?Sized>(
    node: &'a T,
    rest: &[Step],
    options: &ResolveOptions,
    depth: usize,
) -> Result<Vec<&'a T>> {
    check_depth(options, depth)?;

    let children = expand_wildcard(node)?;

    let mut out = Vec::new();
    if rest.is_empty() {
        out.extend(children.iter().copied());
    } else {
        out.extend(apply_to_each(&children, rest, options, depth + 1)?);
    }

    for child in children {
        if child.is_text() {
            continue;
        }
        match expand_below(child, rest, options, depth + 1) {
            Ok(values) => out.extend(values),
            // A leaf child contributes nothing to deeper levels.
            Err(Error::NotExpandable { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}
