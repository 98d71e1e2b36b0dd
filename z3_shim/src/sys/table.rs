/// Declares a table of native entry points.
///
/// Each line gives the native name (without the `Z3_` prefix) and the full native signature.
/// Void returns are written `-> ()`.
///
/// The table gets:
/// - `NAMES`, the native symbol names in declaration order.
/// - `resolve`, which looks up every entry in a loaded library.
/// - `inert`, a table of entries which return zeroed values and do nothing else.
macro_rules! function_table {
    (
        $(#[$meta:meta])*
        $vis:vis struct $table:ident {
            $( fn $name:ident ( $( $arg:ident : $ty:ty ),* ) -> $ret:ty ; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        $vis struct $table {
            $( pub $name: unsafe extern "C" fn( $( $ty ),* ) -> $ret, )*
        }

        #[allow(clippy::unused_unit)]
        impl $table {
            /// The native symbol names of the table, in declaration order.
            pub const NAMES: &'static [&'static str] = &[ $( concat!("Z3_", stringify!($name)) ),* ];

            /// Resolves each entry of the table from `library`.
            ///
            /// # Safety
            /// Each symbol must have the declared signature.
            pub unsafe fn resolve(
                library: &libloading::Library,
            ) -> Result<Self, $crate::types::err::LoadError> {
                Ok(Self {
                    $(
                        $name: {
                            let entry: libloading::Symbol<unsafe extern "C" fn( $( $ty ),* ) -> $ret> =
                                library
                                    .get(concat!("Z3_", stringify!($name), "\0").as_bytes())
                                    .map_err(|e| $crate::types::err::LoadError::MissingSymbol {
                                        symbol: concat!("Z3_", stringify!($name)),
                                        reason: e.to_string(),
                                    })?;
                            *entry
                        },
                    )*
                })
            }

            /// A table whose entries return a zeroed value (null, zero, false, or nothing) and have no other effect.
            ///
            /// Useful as a base when substituting some entries, e.g. `CheckedTable { mk_bool_sort: .., ..CheckedTable::inert() }`.
            pub fn inert() -> Self {
                Self {
                    $(
                        $name: {
                            #[allow(unused_variables)]
                            unsafe extern "C" fn inert( $( $arg: $ty ),* ) -> $ret {
                                std::mem::zeroed()
                            }
                            inert
                        },
                    )*
                }
            }
        }
    };
}
