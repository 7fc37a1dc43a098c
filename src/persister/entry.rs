//! Contracts a client-supplied event payload must satisfy.
//!
//! The persister core is opaque to the event type: it only requires that an
//! `Entry` can be deep-copied, serialized, and deserialized. In the original
//! C++ source this was expressed with a cloner capability plus base-class
//! pointers so a polymorphic entry could be stored by its most-derived type
//! without slicing (see `TypeSystem/polymorphic.h` in the upstream tree).
//! Rust's native sum types make that slicing problem disappear: an `enum`
//! variant already carries its full payload by value, so `Clone` alone gives
//! us the deep copy the spec calls for.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// The full contract a log payload must satisfy.
///
/// Blanket-implemented for any type that is already `Clone + Send + Sync +
/// 'static` and round-trips through JSON, which covers plain structs,
/// tuples, and closed `enum` sum types alike.
pub trait Entry: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {}

impl<T> Entry for T where T: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {}

/// Optional capability for entries that are closed sum types with a known
/// set of concrete variants.
///
/// Implementing this is never required to use the persister — it exists
/// purely so callers of [`publish_derived`](crate::Persister::publish_derived)
/// can get a human-readable tag back for diagnostics/logging, mirroring the
/// tag the original C++ serializer stamped onto each polymorphic record so
/// replay could reconstruct the right variant.
pub trait PolymorphicEntry: Entry {
    /// Name of the currently-active variant, e.g. `"OrderPlaced"`.
    fn variant_name(&self) -> &'static str;
}
