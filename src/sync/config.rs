//! Operator-provided configuration for a [`Synchronizer`](super::synchronizer::Synchronizer).

use typed_builder::TypedBuilder;

use crate::types::data_types::SyncDepth;

/// Stores the user-defined parameters of a synchronizer, that is:
/// 1. The maximum depth, which bounds how many blocks a single call to `synchronize` may be
///    resolving at once. A ledger whose dependency graph contains a cycle (which can only happen
///    through corruption) makes synchronization fail once this depth is reached.
/// 2. The "Log Events" flag, if set to "true" then every [event](crate::events) is
///    [logged](crate::logging).
#[derive(Clone, Debug, TypedBuilder)]
#[builder(builder_method(doc = "
    Create a builder for building a [Configuration]. On the builder call the following methods to construct a valid [Configuration].

    Required:
    - `.log_events(...)`

    Optional:
    - `.max_depth(...)`
"))]
pub struct Configuration {
    #[builder(
        default = SyncDepth::DEFAULT,
        setter(doc = "Set the maximum number of blocks that may be resolving at once. Optional, defaults to `SyncDepth::DEFAULT`.")
    )]
    pub max_depth: SyncDepth,
    #[builder(setter(doc = "Enable logging? Required."))]
    pub log_events: bool,
}
