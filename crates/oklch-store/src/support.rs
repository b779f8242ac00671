//! Display capability queries.

use oklch_core::Support;

/// Reports which wide gamuts the display can show.
///
/// Queried when the store is created and again on
/// [`ValueStore::refresh_support`](crate::ValueStore::refresh_support).
pub trait SupportProvider {
    /// Current capabilities.
    fn query(&self) -> Support;
}

/// Fixed capabilities, for headless use and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticSupport(pub Support);

impl StaticSupport {
    /// sRGB only.
    pub const NONE: StaticSupport = StaticSupport(Support::new(false, false));

    /// Creates a provider reporting `p3` and `rec2020`.
    pub const fn new(p3: bool, rec2020: bool) -> Self {
        Self(Support::new(p3, rec2020))
    }
}

impl SupportProvider for StaticSupport {
    fn query(&self) -> Support {
        self.0
    }
}
