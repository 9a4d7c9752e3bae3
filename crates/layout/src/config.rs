use folio_types::FlowAxis;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// How many nodes are placed between two cheap overflow pre-checks.
    ///
    /// - **Higher values**: fewer geometry queries while content streams in,
    ///   but more content to extract again once overflow is found.
    /// - **Lower values**: tighter tracking of the page edge at the cost of
    ///   more measurements.
    ///
    /// Defaults to `4`. A value of `0` behaves like `1`.
    pub per_page_check: usize,
    /// The axis along which content overflows into the next page.
    ///
    /// Defaults to [`FlowAxis::Horizontal`] (column fragmentation).
    pub flow_axis: FlowAxis,
    /// Character appended when a cut lands inside a word.
    ///
    /// Defaults to U+2010 HYPHEN; `None` disables the heuristic.
    pub hyphen: Option<char>,
    /// Whether the settled page reacts to later size changes.
    ///
    /// Defaults to `true`.
    pub observe_resize: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            per_page_check: 4,
            flow_axis: FlowAxis::Horizontal,
            hyphen: Some('\u{2010}'),
            observe_resize: true,
        }
    }
}

impl LayoutConfig {
    pub(crate) fn check_interval(&self) -> usize {
        self.per_page_check.max(1)
    }
}
