//! Field deserializers for hand-edited and machine-generated data files

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
