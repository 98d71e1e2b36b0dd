//! A substitute native library.
//!
//! Each context is a boxed [FakeState] with a real error register.
//! As with the native library, every checked entry clears the register on entry, and a failing entry records a code and returns a poison value.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    ffi::{c_char, c_uint, CStr, CString},
    ptr::NonNull,
    sync::{
        atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use z3_shim::{
    config::Config,
    context::Context,
    library::Z3Library,
    sys::{self, FunctionTable},
};

pub const INVALID_ARG: c_uint = 3;
pub const DEC_REF_ERROR: c_uint = 11;
pub const EXCEPTION: c_uint = 12;

/// The context parameters the substitute accepts through update_param_value.
pub const KNOWN_PARAMS: [&str; 5] = ["auto_config", "model", "proof", "timeout", "unsat_core"];

/// A value no successful entry returns.
pub const POISON: usize = 0xdead0;

#[derive(Default)]
pub struct FakeState {
    pub register: AtomicU32,
    pub register_reads: AtomicUsize,
    pub calls: AtomicUsize,
    pub handler_installed: AtomicBool,
    pub interrupted: AtomicBool,
    pub refs: Mutex<HashMap<usize, i64>>,
    pub params: Mutex<Vec<(String, String)>>,
    symbols: Mutex<Vec<CString>>,
    next: AtomicUsize,
}

impl FakeState {
    pub fn references(&self, raw: usize) -> i64 {
        self.refs
            .lock()
            .unwrap()
            .get(&raw)
            .copied()
            .unwrap_or_default()
    }
}

unsafe fn state<'a>(c: sys::Z3_context) -> &'a FakeState {
    &*(c as *const FakeState)
}

unsafe fn enter<'a>(c: sys::Z3_context) -> &'a FakeState {
    let state = state(c);
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.register.store(sys::Z3_OK, Ordering::SeqCst);
    state
}

fn fresh<T>(state: &FakeState) -> *mut T {
    ((state.next.fetch_add(1, Ordering::SeqCst) + 1) << 4) as *mut T
}

fn static_text(text: &'static [u8]) -> *const c_char {
    text.as_ptr() as *const c_char
}

unsafe extern "C" fn mk_config() -> sys::Z3_config {
    NonNull::<sys::_Z3_config>::dangling().as_ptr()
}

unsafe extern "C" fn mk_context_rc(_config: sys::Z3_config) -> sys::Z3_context {
    Box::into_raw(Box::<FakeState>::default()) as sys::Z3_context
}

unsafe extern "C" fn del_context(c: sys::Z3_context) {
    drop(Box::from_raw(c as *mut FakeState))
}

unsafe extern "C" fn interrupt(c: sys::Z3_context) {
    state(c).interrupted.store(true, Ordering::SeqCst)
}

unsafe extern "C" fn get_full_version() -> sys::Z3_string {
    static_text(b"4.13.0.0\0")
}

unsafe extern "C" fn get_version(
    major: *mut c_uint,
    minor: *mut c_uint,
    build: *mut c_uint,
    revision: *mut c_uint,
) {
    *major = 4;
    *minor = 13;
    *build = 0;
    *revision = 0;
}

unsafe extern "C" fn get_error_code(c: sys::Z3_context) -> sys::Z3_error_code {
    let state = state(c);
    state.register_reads.fetch_add(1, Ordering::SeqCst);
    state.register.load(Ordering::SeqCst)
}

unsafe extern "C" fn get_error_msg(_c: sys::Z3_context, e: sys::Z3_error_code) -> sys::Z3_string {
    let message: &'static [u8] = match e {
        0 => b"ok\0",
        3 => b"invalid argument\0",
        11 => b"invalid dec_ref command\0",
        12 => b"exception\0",
        _ => b"error\0",
    };
    static_text(message)
}

unsafe extern "C" fn set_error_handler(c: sys::Z3_context, h: sys::Z3_error_handler) {
    state(c).handler_installed.store(h.is_some(), Ordering::SeqCst)
}

unsafe extern "C" fn set_error(c: sys::Z3_context, e: sys::Z3_error_code) {
    let state = state(c);
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.register.store(e, Ordering::SeqCst)
}

unsafe extern "C" fn mk_sort(c: sys::Z3_context) -> sys::Z3_sort {
    fresh(enter(c))
}

unsafe extern "C" fn mk_bv_sort(c: sys::Z3_context, sz: c_uint) -> sys::Z3_sort {
    let state = enter(c);
    match sz {
        0 => {
            state.register.store(INVALID_ARG, Ordering::SeqCst);
            std::thread::yield_now();
            POISON as sys::Z3_sort
        }
        _ => fresh(state),
    }
}

unsafe extern "C" fn mk_string_symbol(c: sys::Z3_context, s: sys::Z3_string) -> sys::Z3_symbol {
    let state = enter(c);
    let owned = CStr::from_ptr(s).to_owned();
    let symbol = owned.as_ptr() as sys::Z3_symbol;
    state.symbols.lock().unwrap().push(owned);
    symbol
}

unsafe extern "C" fn get_symbol_kind(c: sys::Z3_context, _s: sys::Z3_symbol) -> c_uint {
    enter(c);
    1
}

unsafe extern "C" fn get_symbol_string(c: sys::Z3_context, s: sys::Z3_symbol) -> sys::Z3_string {
    enter(c);
    s as sys::Z3_string
}

unsafe extern "C" fn mk_const(c: sys::Z3_context, _s: sys::Z3_symbol, _ty: sys::Z3_sort) -> sys::Z3_ast {
    fresh(enter(c))
}

unsafe extern "C" fn mk_true(c: sys::Z3_context) -> sys::Z3_ast {
    fresh(enter(c))
}

unsafe extern "C" fn mk_not(c: sys::Z3_context, _a: sys::Z3_ast) -> sys::Z3_ast {
    fresh(enter(c))
}

unsafe extern "C" fn mk_and(c: sys::Z3_context, num_args: c_uint, args: *const sys::Z3_ast) -> sys::Z3_ast {
    let state = enter(c);
    let args = std::slice::from_raw_parts(args, num_args as usize);
    match args.iter().any(|a| a.is_null()) {
        true => {
            state.register.store(INVALID_ARG, Ordering::SeqCst);
            POISON as sys::Z3_ast
        }
        false => fresh(state),
    }
}

unsafe extern "C" fn inc_ref(c: sys::Z3_context, a: sys::Z3_ast) {
    let state = enter(c);
    *state.refs.lock().unwrap().entry(a as usize).or_default() += 1;
}

unsafe extern "C" fn dec_ref(c: sys::Z3_context, a: sys::Z3_ast) {
    let state = enter(c);
    match state.refs.lock().unwrap().get_mut(&(a as usize)) {
        Some(count) if *count > 0 => *count -= 1,
        _ => state.register.store(DEC_REF_ERROR, Ordering::SeqCst),
    }
}

unsafe extern "C" fn sort_to_ast(c: sys::Z3_context, s: sys::Z3_sort) -> sys::Z3_ast {
    enter(c);
    s as sys::Z3_ast
}

unsafe extern "C" fn ast_to_string(c: sys::Z3_context, _a: sys::Z3_ast) -> sys::Z3_string {
    enter(c);
    std::ptr::null()
}

unsafe extern "C" fn eval_smtlib2_string(c: sys::Z3_context, script: sys::Z3_string) -> sys::Z3_string {
    enter(c);
    script
}

unsafe extern "C" fn mk_solver(c: sys::Z3_context) -> sys::Z3_solver {
    fresh(enter(c))
}

unsafe extern "C" fn solver_check(c: sys::Z3_context, _s: sys::Z3_solver) -> sys::Z3_lbool {
    let state = enter(c);
    match state.interrupted.swap(false, Ordering::SeqCst) {
        true => sys::Z3_L_UNDEF,
        false => sys::Z3_L_TRUE,
    }
}

unsafe extern "C" fn solver_get_reason_unknown(c: sys::Z3_context, _s: sys::Z3_solver) -> sys::Z3_string {
    enter(c);
    static_text(b"canceled\0")
}

unsafe extern "C" fn update_param_value(c: sys::Z3_context, id: sys::Z3_string, value: sys::Z3_string) {
    let state = enter(c);
    let id = CStr::from_ptr(id).to_string_lossy().into_owned();
    let value = CStr::from_ptr(value).to_string_lossy().into_owned();
    match KNOWN_PARAMS.contains(&id.as_str()) {
        true => state.params.lock().unwrap().push((id, value)),
        false => state.register.store(EXCEPTION, Ordering::SeqCst),
    }
}

/// As the native library, translation to the source context is refused.
unsafe fn translated<T>(source: sys::Z3_context, target: sys::Z3_context) -> *mut T {
    let state = enter(source);
    match source == target {
        true => {
            state.register.store(INVALID_ARG, Ordering::SeqCst);
            POISON as *mut T
        }
        false => fresh(self::state(target)),
    }
}

unsafe extern "C" fn translate(source: sys::Z3_context, _a: sys::Z3_ast, target: sys::Z3_context) -> sys::Z3_ast {
    translated(source, target)
}

unsafe extern "C" fn solver_translate(
    source: sys::Z3_context,
    _s: sys::Z3_solver,
    target: sys::Z3_context,
) -> sys::Z3_solver {
    translated(source, target)
}

/// The inert table, with the entries above substituted.
pub fn table() -> FunctionTable {
    let mut table = FunctionTable::inert();

    table.silent.mk_config = mk_config;
    table.silent.mk_context_rc = mk_context_rc;
    table.silent.del_context = del_context;
    table.silent.interrupt = interrupt;
    table.silent.get_full_version = get_full_version;
    table.silent.get_version = get_version;

    table.register.get_error_code = get_error_code;
    table.register.get_error_msg = get_error_msg;
    table.register.set_error_handler = set_error_handler;

    table.checked.set_error = set_error;
    table.checked.mk_bool_sort = mk_sort;
    table.checked.mk_int_sort = mk_sort;
    table.checked.mk_bv_sort = mk_bv_sort;
    table.checked.mk_string_symbol = mk_string_symbol;
    table.checked.get_symbol_kind = get_symbol_kind;
    table.checked.get_symbol_string = get_symbol_string;
    table.checked.mk_const = mk_const;
    table.checked.mk_true = mk_true;
    table.checked.mk_not = mk_not;
    table.checked.mk_and = mk_and;
    table.checked.inc_ref = inc_ref;
    table.checked.dec_ref = dec_ref;
    table.checked.sort_to_ast = sort_to_ast;
    table.checked.ast_to_string = ast_to_string;
    table.checked.eval_smtlib2_string = eval_smtlib2_string;
    table.checked.mk_solver = mk_solver;
    table.checked.solver_check = solver_check;
    table.checked.solver_get_reason_unknown = solver_get_reason_unknown;
    table.checked.translate = translate;
    table.checked.solver_translate = solver_translate;
    table.checked.update_param_value = update_param_value;

    table
}

pub fn library() -> Arc<Z3Library> {
    Arc::new(Z3Library::from_table(table()))
}

pub fn context(library: &Arc<Z3Library>) -> Context {
    Context::with_library(library.clone(), &Config::default()).unwrap()
}

/// Applies `f` to the state of `context`.
///
/// This is made as a checked call, and so adds one register read.
pub fn inspect<T>(context: &Context, f: impl FnOnce(&FakeState) -> T) -> T {
    let mut value = None;
    let _ = context.checked("inspect", |_, c| value = Some(f(unsafe { state(c) })));
    value.unwrap()
}
