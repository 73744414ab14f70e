use std::fmt::{self, Debug, Formatter};

/// Writes a pre-formatted string as-is when used inside `debug_*` builders, which would otherwise
/// quote it.
pub(crate) struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
