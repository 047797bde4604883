use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CraftingError {
    #[error("Item could not be crafted: `{0}` is not in the catalog")]
    UnknownItem(String),
    #[error("Only available for single player or when host. Host can activate using ModManager.")]
    NotPermitted,
    #[error("Not any item selected to destroy!")]
    NoTarget,
    #[error("Destroy target is disabled, enable it first (`autodestroy on`)")]
    TargetOptionDisabled,
    #[error("No {0} to destroy")]
    NothingToDestroy(String),
    #[error("Nothing waiting for confirmation")]
    NothingPending,
}
