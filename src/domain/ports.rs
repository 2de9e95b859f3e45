use crate::utils::error::Result;

/// A single persistent key-value slot holding the serialized draft.
///
/// Backends are swappable without touching the editor: a file on disk,
/// an in-memory map, or anything else that can hold one string.
pub trait DraftStore {
    /// Returns the stored payload, or `None` when the slot is empty.
    fn read(&self) -> Result<Option<String>>;

    /// Overwrites the slot. Last writer wins.
    fn write(&self, payload: &str) -> Result<()>;
}

impl<S: DraftStore + ?Sized> DraftStore for &S {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<()> {
        (**self).write(payload)
    }
}
