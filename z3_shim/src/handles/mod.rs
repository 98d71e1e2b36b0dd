/*!
Handles to native objects.

A handle is a raw native pointer together with the [ContextId] of the context which returned it.
Handles are plain values: they are copied freely, and do not keep the native object alive.

# Lifetimes

Native objects follow one of three disciplines, given by [Handle::DISCIPLINE]:
- [Discipline::RefCounted], the object lives while its reference count is positive.
  A fresh object may be collected at the next call on the context, so an object to be kept should be retained with [Retained] (or [RefCounted::inc_ref]) immediately.
- [Discipline::Destroyed], the object is deleted by an explicit call, as with a [Context] or a [NativeConfig](crate::library::NativeConfig).
  These are not handles, and are deleted on drop.
- [Discipline::ContextOwned], the object lives as long as its context, as with a [Symbol].

Sorts and function declarations are counted through their view as an AST.
*/

use crate::{
    context::{Context, ContextId},
    misc::log::targets::{self},
    sys::{self},
    types::err::ErrorKind,
};

/// How the lifetime of a native object is managed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    RefCounted,
    Destroyed,
    ContextOwned,
}

/// A native pointer branded with the context it came from.
pub trait Handle: Copy {
    type Raw: Copy;

    const DISCIPLINE: Discipline;

    fn raw(&self) -> Self::Raw;

    fn origin(&self) -> ContextId;

    fn is_null(&self) -> bool;

    #[doc(hidden)]
    fn from_raw(raw: Self::Raw, origin: ContextId) -> Self;
}

macro_rules! handle {
    ( $( $(#[$meta:meta])* $name:ident => $raw:ty, $discipline:ident; )* ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub struct $name {
                raw: $raw,
                origin: ContextId,
            }

            // Safety: The pointer is only dereferenced by native calls made through the context of the handle.
            unsafe impl Send for $name {}
            unsafe impl Sync for $name {}

            impl Handle for $name {
                type Raw = $raw;

                const DISCIPLINE: Discipline = Discipline::$discipline;

                fn raw(&self) -> Self::Raw {
                    self.raw
                }

                fn origin(&self) -> ContextId {
                    self.origin
                }

                fn is_null(&self) -> bool {
                    self.raw.is_null()
                }

                fn from_raw(raw: Self::Raw, origin: ContextId) -> Self {
                    $name { raw, origin }
                }
            }
        )*
    };
}

handle! {
    /// A symbol, owned by its context.
    Symbol => sys::Z3_symbol, ContextOwned;
    /// A term or formula.
    Ast => sys::Z3_ast, RefCounted;
    Sort => sys::Z3_sort, RefCounted;
    FuncDecl => sys::Z3_func_decl, RefCounted;
    Params => sys::Z3_params, RefCounted;
    Solver => sys::Z3_solver, RefCounted;
    Model => sys::Z3_model, RefCounted;
    AstVector => sys::Z3_ast_vector, RefCounted;
    Stats => sys::Z3_stats, RefCounted;
    Tactic => sys::Z3_tactic, RefCounted;
}

/// Handles whose objects are reference counted.
pub trait RefCounted: Handle {
    fn inc_ref(context: &Context, handle: Self) -> Result<(), ErrorKind>;

    fn dec_ref(context: &Context, handle: Self) -> Result<(), ErrorKind>;
}

impl RefCounted for Ast {
    fn inc_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.inc_ref(handle)
    }

    fn dec_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.dec_ref(handle)
    }
}

impl RefCounted for Sort {
    fn inc_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.inc_ref(context.sort_to_ast(handle)?)
    }

    fn dec_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.dec_ref(context.sort_to_ast(handle)?)
    }
}

impl RefCounted for FuncDecl {
    fn inc_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.inc_ref(context.func_decl_to_ast(handle)?)
    }

    fn dec_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
        context.dec_ref(context.func_decl_to_ast(handle)?)
    }
}

macro_rules! ref_counted {
    ( $( $name:ident => $inc:ident, $dec:ident; )* ) => {
        $(
            impl RefCounted for $name {
                fn inc_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
                    let raw = context.adopt(stringify!($inc), handle)?;
                    context.checked(stringify!($inc), |f, c| unsafe { (f.$inc)(c, raw) })
                }

                fn dec_ref(context: &Context, handle: Self) -> Result<(), ErrorKind> {
                    let raw = context.adopt(stringify!($dec), handle)?;
                    context.checked(stringify!($dec), |f, c| unsafe { (f.$dec)(c, raw) })
                }
            }
        )*
    };
}

ref_counted! {
    Params => params_inc_ref, params_dec_ref;
    Solver => solver_inc_ref, solver_dec_ref;
    Model => model_inc_ref, model_dec_ref;
    AstVector => ast_vector_inc_ref, ast_vector_dec_ref;
    Stats => stats_inc_ref, stats_dec_ref;
    Tactic => tactic_inc_ref, tactic_dec_ref;
}

/// A reference to a counted object, released on drop.
///
/// A failure to release on drop is logged, as there is no caller to report it to.
/// Use [release](Retained::release) to observe the failure.
pub struct Retained<'c, H: RefCounted> {
    context: &'c Context,
    handle: H,
}

impl<'c, H: RefCounted> Retained<'c, H> {
    /// Takes a reference to the object of `handle`.
    pub fn new(context: &'c Context, handle: H) -> Result<Self, ErrorKind> {
        H::inc_ref(context, handle)?;
        Ok(Retained { context, handle })
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    pub fn context(&self) -> &'c Context {
        self.context
    }

    /// Releases the reference.
    pub fn release(self) -> Result<(), ErrorKind> {
        let this = std::mem::ManuallyDrop::new(self);
        H::dec_ref(this.context, this.handle)
    }
}

impl<H: RefCounted> std::ops::Deref for Retained<'_, H> {
    type Target = H;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<H: RefCounted> Drop for Retained<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = H::dec_ref(self.context, self.handle) {
            log::warn!(target: targets::HANDLES, "Release on drop failed: {e}");
        }
    }
}
