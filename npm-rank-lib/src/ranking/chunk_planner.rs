//! Packing package names into request-sized batches.

use super::{PackageName, RankError};

/// Separator used when a batch is placed in a request path.
pub const NAME_SEPARATOR: char = ',';

/// Splits package names into batches whose comma-joined length fits a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    max_batch_len: usize,
}

impl ChunkPlanner {
    /// Create a planner with an explicit batch budget.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidInput`] if `max_batch_len` is zero.
    pub fn new(max_batch_len: usize) -> Result<Self, RankError> {
        if max_batch_len == 0 {
            return Err(RankError::InvalidInput("the batch length budget must be positive".into()));
        }

        Ok(Self { max_batch_len })
    }

    /// Create a planner whose budget is derived from the request limit and the hosts a batch may be sent to.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidInput`] if no budget is left for package names.
    pub fn for_hosts<S: AsRef<str>>(max_request_length: usize, hosts: &[S], path_template: &str) -> Result<Self, RankError> {
        Self::new(max_batch_len(max_request_length, hosts, path_template)?)
    }

    #[must_use]
    pub const fn max_batch_len(&self) -> usize {
        self.max_batch_len
    }

    /// Partition `names` into batches, preserving their order.
    ///
    /// # Errors
    ///
    /// See [`plan`].
    pub fn plan(&self, names: &[PackageName]) -> Result<Vec<Vec<PackageName>>, RankError> {
        plan(names, self.max_batch_len)
    }
}

/// Length available for the package list of a single request.
///
/// The request limit is reduced by the longest host and by the fixed path that precedes the names.
///
/// # Errors
///
/// Returns [`RankError::InvalidInput`] if `hosts` is empty or if nothing is left for names.
pub fn max_batch_len<S: AsRef<str>>(max_request_length: usize, hosts: &[S], path_template: &str) -> Result<usize, RankError> {
    let longest_host = hosts
        .iter()
        .map(|host| host.as_ref().len())
        .max()
        .ok_or_else(|| RankError::InvalidInput("at least one stats host is required".into()))?;

    match max_request_length.checked_sub(longest_host + path_template.len()) {
        Some(budget) if budget > 0 => Ok(budget),
        _ => Err(RankError::InvalidInput(format!(
            "a request length of {max_request_length} leaves no room for package names after a {longest_host} character host and '{path_template}'"
        ))),
    }
}

/// Greedily pack `names` into batches of at most `max_batch_len` comma-joined characters.
///
/// Names are measured as they appear in a request path, after percent-encoding, so a
/// scoped name such as `@scope/pkg` counts the `/` as the three characters of `%2F`.
/// A name is never split across batches and no batch is ever empty.
///
/// # Errors
///
/// Returns [`RankError::InvalidInput`] if `names` is empty, if `max_batch_len` is zero,
/// or if a single name is longer than `max_batch_len`.
pub fn plan(names: &[PackageName], max_batch_len: usize) -> Result<Vec<Vec<PackageName>>, RankError> {
    if names.is_empty() {
        return Err(RankError::InvalidInput("no package names to plan".into()));
    }

    if max_batch_len == 0 {
        return Err(RankError::InvalidInput("the batch length budget must be positive".into()));
    }

    let mut batches = Vec::new();
    let mut current: Vec<PackageName> = Vec::new();
    let mut current_len = 0;

    for name in names {
        let name_len = encoded_len(name);
        if name_len > max_batch_len {
            return Err(RankError::InvalidInput(format!(
                "package name '{name}' is longer than the {max_batch_len} character batch budget"
            )));
        }

        let joined_len = if current.is_empty() {
            name_len
        } else {
            current_len + NAME_SEPARATOR.len_utf8() + name_len
        };

        if joined_len > max_batch_len {
            batches.push(core::mem::take(&mut current));
            current_len = name_len;
        } else {
            current_len = joined_len;
        }

        current.push(name.clone());
    }

    batches.push(current);
    Ok(batches)
}

/// Length of `name` once percent-encoded as a URL path segment.
///
/// Mirrors the path segment encode set of the `url` crate. Control and non-ASCII bytes,
/// space, the backtick, and any of `"#%/<>?{}` take three characters each.
#[must_use]
pub fn encoded_len(name: &str) -> usize {
    name.bytes()
        .map(|b| match b {
            b' ' | b'"' | b'#' | b'%' | b'/' | b'<' | b'>' | b'?' | b'`' | b'{' | b'}' => 3,
            b if b.is_ascii_control() || !b.is_ascii() => 3,
            _ => 1,
        })
        .sum()
}

/// Comma-join a batch the way it appears in a request path.
#[must_use]
pub fn join_batch(batch: &[PackageName]) -> String {
    let mut joined = String::with_capacity(batch.iter().map(|name| name.len() + 1).sum());
    for (index, name) in batch.iter().enumerate() {
        if index > 0 {
            joined.push(NAME_SEPARATOR);
        }
        joined.push_str(name);
    }
    joined
}
