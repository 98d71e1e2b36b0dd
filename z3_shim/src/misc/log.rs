/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
Every native call is logged at trace, and every failure read from an error register at debug.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [loading](crate::library) the native library.
    pub const LOADER: &str = "loader";

    /// Logs related to native calls and the error register.
    pub const ADAPTER: &str = "adapter";

    /// Logs related to the creation and deletion of [contexts](crate::context).
    pub const CONTEXT: &str = "context";

    /// Logs related to [handles](crate::handles) and their ownership.
    pub const HANDLES: &str = "handles";
}
