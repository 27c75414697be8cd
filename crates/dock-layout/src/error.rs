// ABOUTME: Errors raised while building a layout.
// ABOUTME: Runtime operations never fail; they are no-ops when their preconditions do not hold.

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Layout container element is missing")]
    ContainerMissing,

    #[error("No center pane element was provided")]
    CenterPaneMissing,

    #[error("Layout creation was cancelled by a load callback")]
    Cancelled,
}
