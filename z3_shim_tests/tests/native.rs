use z3_shim::{
    context::{Context, SortKind, StatValue, SymbolKind},
    handles::{Handle, Retained},
    library::Z3Library,
    types::{
        err::{self, ErrorCode, ErrorKind},
        Lbool,
    },
};
use z3_shim_tests::{native_context, native_library};

mod loading {
    use super::*;

    #[test]
    fn invalid_path() {
        match Z3Library::open("/definitely/not/a/real/libz3.so") {
            Err(err::LoadError::Open { .. }) => {}
            otherwise => panic!("unexpected: {otherwise:?}"),
        }
    }

    #[test]
    fn versions() {
        let Some(library) = native_library() else {
            return;
        };
        let version = library.get_version();
        assert!(version.major >= 4);
        assert!(library.get_full_version().contains(&version.major.to_string()));
    }
}

mod register {
    use super::*;

    #[test]
    fn malformed_then_valid() {
        let Some(context) = native_context() else {
            return;
        };

        let e = context.mk_bv_sort(0).unwrap_err();
        assert_ne!(e.code(), Some(ErrorCode::Ok));
        assert!(e.code().is_some());

        let sort = Retained::new(&context, context.mk_bv_sort(8).unwrap()).unwrap();
        assert_eq!(context.get_sort_kind(*sort), Ok(SortKind::BitVector));
        assert_eq!(context.get_bv_sort_size(*sort), Ok(8));
        assert_eq!(context.error_code(), ErrorCode::Ok);
    }

    #[test]
    fn independent_contexts() {
        let Some(library) = native_library() else {
            return;
        };
        let config = z3_shim::config::Config::default();
        let a = Context::with_library(library.clone(), &config).unwrap();
        let b = Context::with_library(library, &config).unwrap();

        assert!(a.mk_bv_sort(0).is_err());
        assert!(b.mk_bool_sort().is_ok());
        assert_ne!(a.error_code(), ErrorCode::Ok);
        assert_eq!(b.error_code(), ErrorCode::Ok);
    }

    #[test]
    fn injected_error() {
        let Some(context) = native_context() else {
            return;
        };

        let e = context.set_error(ErrorCode::InvalidUsage).unwrap_err();
        assert_eq!(e.code(), Some(ErrorCode::InvalidUsage));
        assert!(!context.error_message(ErrorCode::InvalidUsage).is_empty());
    }

    #[test]
    fn pop_past_the_base_scope() {
        let Some(context) = native_context() else {
            return;
        };

        let solver = Retained::new(&context, context.mk_solver().unwrap()).unwrap();
        context.solver_push(*solver).unwrap();
        assert_eq!(context.solver_get_num_scopes(*solver), Ok(1));
        assert!(context.solver_pop(*solver, 2).is_err());
        assert!(context.solver_pop(*solver, 1).is_ok());
    }

    #[test]
    fn int_symbols() {
        let Some(context) = native_context() else {
            return;
        };

        let symbol = context.mk_int_symbol(7).unwrap();
        assert_eq!(context.get_symbol_kind(symbol), Ok(0));
        assert_eq!(context.get_symbol_int(symbol), Ok(7));
        assert_eq!(context.get_symbol(symbol), Ok(SymbolKind::Int(7)));
    }

    #[test]
    fn unknown_tactic() {
        let Some(context) = native_context() else {
            return;
        };

        assert!(matches!(
            context.mk_tactic("not-a-tactic"),
            Err(ErrorKind::Native(_))
        ));
        assert!(context.mk_tactic("simplify").is_ok());
    }
}

mod solving {
    use super::*;

    #[test]
    fn bitvector_model() {
        let Some(context) = native_context() else {
            return;
        };

        let bv8 = Retained::new(&context, context.mk_bv_sort(8).unwrap()).unwrap();
        let name = context.mk_string_symbol("x").unwrap();
        let x = Retained::new(&context, context.mk_const(name, *bv8).unwrap()).unwrap();
        let three = Retained::new(&context, context.mk_int(3, *bv8).unwrap()).unwrap();
        let five = Retained::new(&context, context.mk_unsigned_int64(5, *bv8).unwrap()).unwrap();

        let sum = Retained::new(&context, context.mk_bvadd(*x, *three).unwrap()).unwrap();
        let goal = Retained::new(&context, context.mk_eq(*sum, *five).unwrap()).unwrap();

        let solver = Retained::new(&context, context.mk_solver().unwrap()).unwrap();
        context.solver_assert(*solver, *goal).unwrap();
        assert_eq!(context.solver_check(*solver), Ok(Lbool::True));

        let model = Retained::new(&context, context.solver_get_model(*solver).unwrap()).unwrap();
        let value = context.model_eval(*model, *x, true).unwrap().unwrap();
        let value = Retained::new(&context, value).unwrap();
        assert_eq!(context.get_numeral_uint64(*value), Ok(Some(2)));
        assert_eq!(context.get_numeral_string(*value), Ok("2".to_string()));
        assert_eq!(context.model_get_num_consts(*model), Ok(1));
    }

    #[test]
    fn unsat_core() {
        let Some(library) = native_library() else {
            return;
        };
        let mut config = z3_shim::config::Config::default();
        config.unsat_core.set(true);
        let context = Context::with_library(library, &config).unwrap();

        let bool_sort = Retained::new(&context, context.mk_bool_sort().unwrap()).unwrap();
        let name = context.mk_string_symbol("p").unwrap();
        let p = Retained::new(&context, context.mk_const(name, *bool_sort).unwrap()).unwrap();
        let not_p = Retained::new(&context, context.mk_not(*p).unwrap()).unwrap();

        let solver = Retained::new(&context, context.mk_solver().unwrap()).unwrap();
        context.solver_assert(*solver, *p).unwrap();
        assert_eq!(
            context.solver_check_assumptions(*solver, &[*not_p]),
            Ok(Lbool::False)
        );

        let core = Retained::new(&context, context.solver_get_unsat_core(*solver).unwrap()).unwrap();
        let elements = context.ast_vector_elements(*core).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(context.is_eq_ast(elements[0], *not_p), Ok(true));
    }

    #[test]
    fn statistics() {
        let Some(context) = native_context() else {
            return;
        };

        let solver = Retained::new(&context, context.mk_solver().unwrap()).unwrap();
        let t = Retained::new(&context, context.mk_true().unwrap()).unwrap();
        context.solver_assert(*solver, *t).unwrap();
        assert_eq!(context.solver_check(*solver), Ok(Lbool::True));

        let stats = Retained::new(&context, context.solver_get_statistics(*solver).unwrap()).unwrap();
        let entries = context.stats_entries(*stats).unwrap();
        assert_eq!(entries.len() as u32, context.stats_size(*stats).unwrap());

        for (idx, (_, value)) in (0..).zip(&entries) {
            match value {
                StatValue::Uint(v) => {
                    assert_eq!(context.stats_is_uint(*stats, idx), Ok(true));
                    assert_eq!(context.stats_get_uint_value(*stats, idx), Ok(*v));
                }
                StatValue::Double(_) => {
                    assert_eq!(context.stats_is_uint(*stats, idx), Ok(false));
                    assert!(context.stats_get_double_value(*stats, idx).is_ok());
                }
            }
        }
    }

    #[test]
    fn translation() {
        let Some(library) = native_library() else {
            return;
        };
        let config = z3_shim::config::Config::default();
        let a = Context::with_library(library.clone(), &config).unwrap();
        let b = Context::with_library(library, &config).unwrap();

        let t = Retained::new(&a, a.mk_true().unwrap()).unwrap();
        let translated = Retained::new(&b, a.translate(*t, &b).unwrap()).unwrap();
        assert_eq!(translated.origin(), b.id());
        assert_eq!(b.ast_to_string(*translated), Ok("true".to_string()));

        let e = a.translate(*t, &a).unwrap_err();
        assert_eq!(e.code(), Some(ErrorCode::InvalidArg));
        assert!(a.mk_bool_sort().is_ok());
    }

    #[test]
    fn solver_translation() {
        let Some(library) = native_library() else {
            return;
        };
        let config = z3_shim::config::Config::default();
        let a = Context::with_library(library.clone(), &config).unwrap();
        let b = Context::with_library(library, &config).unwrap();
        assert!(a.id() < b.id());

        let f = Retained::new(&a, a.mk_false().unwrap()).unwrap();
        let solver = Retained::new(&a, a.mk_solver().unwrap()).unwrap();
        a.solver_assert(*solver, *f).unwrap();

        let forward = Retained::new(&b, a.solver_translate(*solver, &b).unwrap()).unwrap();
        assert_eq!(forward.origin(), b.id());
        assert_eq!(b.solver_check(*forward), Ok(Lbool::False));

        let back = Retained::new(&a, b.solver_translate(*forward, &a).unwrap()).unwrap();
        assert_eq!(back.origin(), a.id());
        assert_eq!(a.solver_check(*back), Ok(Lbool::False));
    }

    #[test]
    fn simplification() {
        let Some(context) = native_context() else {
            return;
        };

        let int = Retained::new(&context, context.mk_int_sort().unwrap()).unwrap();
        let two = Retained::new(&context, context.mk_int(2, *int).unwrap()).unwrap();
        let three = Retained::new(&context, context.mk_numeral("3", *int).unwrap()).unwrap();
        let sum = Retained::new(&context, context.mk_add(&[*two, *three]).unwrap()).unwrap();
        let simple = Retained::new(&context, context.simplify(*sum).unwrap()).unwrap();
        assert_eq!(context.get_numeral_int64(*simple), Ok(Some(5)));
    }
}

mod parameters {
    use z3_shim::{config::Config, context::ParamValue, handles::Params};

    use super::*;

    fn with_params<'c>(context: &'c Context, key: &str, value: ParamValue) -> Retained<'c, Params> {
        let params = Retained::new(context, context.mk_params().unwrap()).unwrap();
        let key = context.mk_string_symbol(key).unwrap();
        context.params_set(*params, key, value).unwrap();
        params
    }

    #[test]
    fn unknown_context_param() {
        let Some(library) = native_library() else {
            return;
        };
        let mut config = Config::default();
        config.params.push(("definitely_not_a_param".to_string(), "1".to_string()));

        match Context::with_library(library, &config) {
            Err(ErrorKind::Native(err::NativeError { operation, .. })) => {
                assert_eq!(operation, "update_param_value")
            }
            otherwise => panic!("unexpected: {otherwise:?}"),
        }
    }

    #[test]
    fn known_context_param() {
        let Some(library) = native_library() else {
            return;
        };
        let mut config = Config::default();
        config.params.push(("timeout".to_string(), "60000".to_string()));
        let context = Context::with_library(library, &config).unwrap();

        assert!(context.update_param_value("timeout", "30000").is_ok());
        assert!(matches!(
            context.update_param_value("definitely_not_a_param", "1"),
            Err(ErrorKind::Native(_))
        ));
        assert!(context.mk_bool_sort().is_ok());
    }

    #[test]
    fn uint_param() {
        let Some(context) = native_context() else {
            return;
        };

        let params = Retained::new(&context, context.mk_params().unwrap()).unwrap();
        let key = context.mk_string_symbol("timeout").unwrap();
        context.params_set_uint(*params, key, 1000).unwrap();
        assert!(context
            .params_to_string(*params)
            .unwrap()
            .contains("timeout 1000"));

        let solver = Retained::new(&context, context.mk_solver().unwrap()).unwrap();
        assert!(context.solver_set_params(*solver, *params).is_ok());
    }

    #[test]
    fn bool_param() {
        let Some(context) = native_context() else {
            return;
        };

        let params = with_params(&context, "model", ParamValue::Bool(true));
        assert!(context
            .params_to_string(*params)
            .unwrap()
            .contains("model true"));
    }

    #[test]
    fn double_param() {
        let Some(context) = native_context() else {
            return;
        };

        let params = with_params(&context, "restart_factor", ParamValue::Double(1.5));
        assert!(context
            .params_to_string(*params)
            .unwrap()
            .contains("restart_factor"));
    }

    #[test]
    fn symbol_param() {
        let Some(context) = native_context() else {
            return;
        };

        let logic = context.mk_string_symbol("QF_BV").unwrap();
        let params = with_params(&context, "logic", ParamValue::Symbol(logic));
        assert!(context
            .params_to_string(*params)
            .unwrap()
            .contains("QF_BV"));
    }

    #[test]
    fn global_params() {
        let Some(library) = native_library() else {
            return;
        };

        library.global_param_set("timeout", "100000").unwrap();
        assert_eq!(
            library.global_param_get("timeout"),
            Ok(Some("100000".to_string()))
        );

        library.global_param_reset_all();
        assert_ne!(
            library.global_param_get("timeout"),
            Ok(Some("100000".to_string()))
        );

        assert_eq!(library.global_param_get("definitely_not_a_param"), Ok(None));
    }
}
