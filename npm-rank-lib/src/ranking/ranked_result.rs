use super::{Package, Window};

/// Packages ordered by descending downloads over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    window: Window,
    packages: Vec<Package>,
}

impl RankedResult {
    /// Rank `packages` by the count of `window`.
    ///
    /// The sort is stable, so packages with equal counts keep their relative order.
    #[must_use]
    pub fn new(window: Window, mut packages: Vec<Package>) -> Self {
        packages.sort_by(|a, b| b.counts.get(window).count.cmp(&a.counts.get(window).count));
        Self { window, packages }
    }

    #[must_use]
    pub const fn window(&self) -> Window {
        self.window
    }

    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    #[must_use]
    pub fn into_packages(self) -> Vec<Package> {
        self.packages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a Package;
    type IntoIter = core::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
