//! Families of checked operations which differ only in their native entry.
//!
//! Each macro expands to methods of [Context](super::Context), one per entry named.

/// Operations of no argument other than the context.
macro_rules! nullary_ops {
    ( $( $(#[$meta:meta])* $name:ident -> $handle:ty; )* ) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> Result<$handle, $crate::types::err::ErrorKind> {
                let raw = self.checked(stringify!($name), |f, c| unsafe { (f.$name)(c) })?;
                Ok(self.wrap(raw))
            }
        )*
    };
}

/// Operations from one AST to an AST.
macro_rules! unary_ast_ops {
    ( $( $(#[$meta:meta])* $name:ident; )* ) => {
        $(
            $(#[$meta])*
            pub fn $name(
                &self,
                t: $crate::handles::Ast,
            ) -> Result<$crate::handles::Ast, $crate::types::err::ErrorKind> {
                let t = self.adopt(stringify!($name), t)?;
                let raw = self.checked(stringify!($name), |f, c| unsafe { (f.$name)(c, t) })?;
                Ok(self.wrap(raw))
            }
        )*
    };
}

/// Operations from two ASTs to an AST.
macro_rules! binary_ast_ops {
    ( $( $(#[$meta:meta])* $name:ident; )* ) => {
        $(
            $(#[$meta])*
            pub fn $name(
                &self,
                t1: $crate::handles::Ast,
                t2: $crate::handles::Ast,
            ) -> Result<$crate::handles::Ast, $crate::types::err::ErrorKind> {
                let t1 = self.adopt(stringify!($name), t1)?;
                let t2 = self.adopt(stringify!($name), t2)?;
                let raw = self.checked(stringify!($name), |f, c| unsafe { (f.$name)(c, t1, t2) })?;
                Ok(self.wrap(raw))
            }
        )*
    };
}

/// Operations from a slice of ASTs to an AST.
macro_rules! nary_ast_ops {
    ( $( $(#[$meta:meta])* $name:ident; )* ) => {
        $(
            $(#[$meta])*
            pub fn $name(
                &self,
                args: &[$crate::handles::Ast],
            ) -> Result<$crate::handles::Ast, $crate::types::err::ErrorKind> {
                let args = self.adopt_all(stringify!($name), args)?;
                let count = $crate::context::Context::count(stringify!($name), args.len())?;
                let raw = self.checked(stringify!($name), |f, c| unsafe {
                    (f.$name)(c, count, args.as_ptr())
                })?;
                Ok(self.wrap(raw))
            }
        )*
    };
}

/// Operations rendering a handle as text.
macro_rules! to_string_ops {
    ( $( $(#[$meta:meta])* $name:ident($handle:ty); )* ) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, handle: $handle) -> Result<String, $crate::types::err::ErrorKind> {
                let raw = self.adopt(stringify!($name), handle)?;
                self.checked_then(
                    stringify!($name),
                    |f, c| unsafe { (f.$name)(c, raw) },
                    |text| unsafe { $crate::text::from_native(text) },
                )
            }
        )*
    };
}
