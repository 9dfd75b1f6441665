//! Per-entity lifecycle configuration: one soft-delete visibility rule and
//! one deletion mode, chosen explicitly at service construction instead of
//! being re-implemented ad hoc in each service.

/// Which rows a read path is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Soft-deleted rows are hidden from reads and listings.
    ActiveOnly,
    /// Every row is visible regardless of its active flag.
    All,
}

impl Visibility {
    pub fn allows(self, active: bool) -> bool {
        match self {
            Visibility::ActiveOnly => active,
            Visibility::All => true,
        }
    }
}

/// What "delete" means for an entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// The row is removed outright; there is nothing to restore.
    Hard,
    /// The active flag is flipped off; restore flips it back.
    Soft,
}

/// Lifecycle policy handed to a service at construction.
#[derive(Debug, Clone, Copy)]
pub struct EntityPolicy {
    pub visibility: Visibility,
    pub delete: DeleteMode,
}

impl EntityPolicy {
    pub const fn new(visibility: Visibility, delete: DeleteMode) -> Self {
        Self { visibility, delete }
    }
}
