use once_cell::sync::OnceCell;

/// Memoized compiled address.
///
/// Reads go through `&self` and compile at most once; invalidation needs
/// `&mut self`, so a fresh value can never race with a reset.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompiledAddress {
    value: OnceCell<String>,
}

impl CompiledAddress {
    /// Return the cached address, compiling it with `f` when stale.
    pub(crate) fn get_or_compile(&self, f: impl FnOnce() -> String) -> &str {
        self.value.get_or_init(f)
    }

    /// Drop the cached address so the next read recompiles it.
    pub(crate) fn invalidate(&mut self) {
        self.value.take();
    }

    #[cfg(test)]
    pub(crate) fn is_stale(&self) -> bool {
        self.value.get().is_none()
    }
}
