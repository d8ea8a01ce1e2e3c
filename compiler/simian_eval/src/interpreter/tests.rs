use pretty_assertions::assert_eq;
use simian_parse::parse_source;

use super::*;
use crate::print_handler::{buffer_handler, silent_handler};

fn parse_ok(source: &str) -> Program {
    let output = parse_source(source);
    assert!(
        !output.has_errors(),
        "parse errors in {source:?}: {:?}",
        output.errors
    );
    output.program
}

fn run(source: &str) -> Value {
    let program = parse_ok(source);
    Interpreter::with_print_handler(silent_handler()).eval_program(&program, &Environment::new())
}

fn assert_values(cases: &[(&str, Value)]) {
    for (source, expected) in cases {
        assert_eq!(&run(source), expected, "source: {source}");
    }
}

fn assert_error(source: &str, message: &str) {
    match run(source) {
        Value::Error(error) => assert_eq!(error.to_string(), message, "source: {source}"),
        other => panic!("expected an error from {source:?}, got {other:?}"),
    }
}

fn int(n: i64) -> Value {
    Value::Integer(n)
}

#[test]
fn integer_expressions() {
    assert_values(&[
        ("5", int(5)),
        ("-10", int(-10)),
        ("5 + 5 + 5 + 5 - 10", int(10)),
        ("2 * 2 * 2 * 2 * 2", int(32)),
        ("-50 + 100 + -50", int(0)),
        ("5 * 2 + 10", int(20)),
        ("5 + 2 * 10", int(25)),
        ("20 + 2 * -10", int(0)),
        ("50 / 2 * 2 + 10", int(60)),
        ("2 * (5 + 10)", int(30)),
        ("3 * (3 * 3) + 10", int(37)),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", int(50)),
        ("1 + 2 * 3", int(7)),
    ]);
}

#[test]
fn boolean_expressions() {
    assert_values(&[
        ("true", Value::TRUE),
        ("1 < 2", Value::TRUE),
        ("1 > 2", Value::FALSE),
        ("1 == 1", Value::TRUE),
        ("1 != 1", Value::FALSE),
        ("true == true", Value::TRUE),
        ("true != false", Value::TRUE),
        ("(1 < 2) == true", Value::TRUE),
        ("(1 > 2) == true", Value::FALSE),
        ("!true", Value::FALSE),
        ("!!5", Value::TRUE),
        ("!0", Value::FALSE),
    ]);
}

#[test]
fn conditionals() {
    assert_values(&[
        ("if (true) { 10 }", int(10)),
        ("if (false) { 10 }", Value::Null),
        ("if (1) { 10 }", int(10)),
        ("if (0) { 10 } else { 20 }", int(10)),
        ("if (1 > 2) { 10 } else { 20 }", int(20)),
        ("if (1 < 2) { 10 } else { 20 }", int(10)),
    ]);
}

#[test]
fn return_statements() {
    assert_values(&[
        ("return 10;", int(10)),
        ("return 10; 9;", int(10)),
        ("9; return 2 * 5; 9;", int(10)),
        (
            "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
            int(10),
        ),
        ("let f = fn(x) { return x; x + 10; }; f(10);", int(10)),
        (
            "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
            int(20),
        ),
        ("return;", Value::Null),
    ]);
}

#[test]
fn return_stops_at_the_function_boundary() {
    assert_values(&[(
        "let f = fn() { return 1; }; let g = fn() { f(); 2 }; g()",
        int(2),
    )]);
}

#[test]
fn runtime_errors() {
    let cases = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        (r#""Hello" - "World""#, "unknown operator: STRING - STRING"),
        (
            r#"{"name": "Simian"}[fn(x) { x }];"#,
            "unusable as hash key: FUNCTION",
        ),
        ("{[1]: 2}", "unusable as hash key: ARRAY"),
        ("5(1)", "not a function: INTEGER"),
        ("fn(x) { x }(1, 2)", "wrong number of arguments: expected 1, got 2"),
        ("1[0]", "index operator not supported: INTEGER"),
        ("10 / (5 - 5)", "division by zero"),
        ("len(1)", "argument to `len` must be STRING or ARRAY, got INTEGER"),
        ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
    ];
    for (source, message) in cases {
        assert_error(source, message);
    }
}

#[test]
fn error_stops_later_statements() {
    let print = buffer_handler();
    let interpreter = Interpreter::with_print_handler(print.clone());
    let program = parse_ok(r#"puts("before"); missing; puts("after");"#);
    let result = interpreter.eval_program(&program, &Environment::new());
    assert!(result.is_error());
    assert_eq!(print.output(), "before\n");
}

#[test]
fn arguments_evaluate_left_to_right_and_stop_at_errors() {
    let print = buffer_handler();
    let interpreter = Interpreter::with_print_handler(print.clone());
    let program = parse_ok(r#"let f = fn(a, b, c) { a }; f(puts("a"), nope, puts("c"));"#);
    let result = interpreter.eval_program(&program, &Environment::new());
    assert_eq!(result.to_string(), "ERROR: identifier not found: nope");
    assert_eq!(print.output(), "a\n");
}

#[test]
fn let_statements() {
    assert_values(&[
        ("let a = 5; a;", int(5)),
        ("let a = 5 * 5; a;", int(25)),
        ("let a = 5; let b = a; b;", int(5)),
        ("let a = 5; let b = a; let c = a + b + 5; c;", int(15)),
        ("let a = 5;", Value::Null),
    ]);
}

#[test]
fn function_object() {
    match run("fn(x) { x + 2; };") {
        Value::Function(function) => {
            assert_eq!(function.parameters.len(), 1);
            assert_eq!(function.parameters[0].name, "x");
            assert_eq!(function.body.to_string(), "(x + 2)");
        }
        other => panic!("expected a function, got {other:?}"),
    }
    assert_eq!(run("fn(x, y) { x }").to_string(), "fn(x, y) {\nx\n}");
}

#[test]
fn function_application() {
    assert_values(&[
        ("let identity = fn(x) { x; }; identity(5);", int(5)),
        ("let identity = fn(x) { return x; }; identity(5);", int(5)),
        ("let double = fn(x) { x * 2; }; double(5);", int(10)),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", int(10)),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", int(20)),
        ("fn(x) { x; }(5)", int(5)),
        ("fn() { }()", Value::Null),
    ]);
}

#[test]
fn closures() {
    assert_values(&[
        (
            "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
            int(4),
        ),
        (
            "let counter = fn(start) { fn() { start + 1 } }; let a = counter(1); let b = counter(10); a() + b()",
            int(13),
        ),
    ]);
}

#[test]
fn closures_share_their_defining_scope() {
    assert_values(&[("let x = 1; let f = fn() { x }; let x = 2; f()", int(2))]);
}

#[test]
fn parameters_shadow_outer_bindings() {
    assert_values(&[("let x = 10; let f = fn(x) { x * 2 }; f(3) + x", int(16))]);
}

#[test]
fn recursion() {
    let source = "
        let fib = fn(n) {
            if (n < 2) { return n; }
            fib(n - 1) + fib(n - 2)
        };
        fib(15);
    ";
    assert_values(&[(source, int(610))]);
}

#[test]
fn deep_recursion_does_not_overflow() {
    let source = "
        let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } };
        count(20000);
    ";
    assert_values(&[(source, int(20000))]);
}

#[test]
fn strings() {
    assert_values(&[
        (r#""Hello World!""#, Value::string("Hello World!")),
        (r#""Hello" + " " + "World!""#, Value::string("Hello World!")),
        (r#""a" == "a""#, Value::TRUE),
        (r#""a" != "b""#, Value::TRUE),
    ]);
}

#[test]
fn builtins() {
    assert_values(&[
        (r#"len("")"#, int(0)),
        (r#"len("hello world")"#, int(11)),
        ("len([1, 2, 3])", int(3)),
        ("first([1, 2, 3])", int(1)),
        ("last([1, 2, 3])", int(3)),
        ("rest([1, 2, 3])", Value::array(vec![int(2), int(3)])),
        ("push([], 1)", Value::array(vec![int(1)])),
        ("first([])", Value::Null),
    ]);
    assert_error(
        r#"len("one", "two")"#,
        "wrong number of arguments: expected 1, got 2",
    );
}

#[test]
fn builtins_can_be_shadowed() {
    assert_values(&[(r#"let len = fn(x) { 42 }; len("abc")"#, int(42))]);
    assert_eq!(run("len").to_string(), "builtin function");
}

#[test]
fn puts_prints_to_the_handler() {
    let print = buffer_handler();
    let interpreter = Interpreter::with_print_handler(print.clone());
    let program = parse_ok(r#"puts("hello", 1 + 2, [1, "two"]); puts();"#);
    let result = interpreter.eval_program(&program, &Environment::new());
    assert_eq!(result, Value::Null);
    assert_eq!(print.output(), "hello\n3\n[1, two]\n");
}

#[test]
fn higher_order_functions() {
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, acc) {
                if (len(arr) == 0) { acc } else { iter(rest(arr), push(acc, f(first(arr)))) }
            };
            iter(arr, []);
        };
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) { result } else { iter(rest(arr), f(result, first(arr))) }
            };
            iter(arr, initial);
        };
        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        reduce(doubled, 0, fn(acc, x) { acc + x });
    ";
    assert_values(&[(source, int(20))]);
}

#[test]
fn arrays() {
    assert_values(&[
        (
            "[1, 2 * 2, 3 + 3]",
            Value::array(vec![int(1), int(4), int(6)]),
        ),
        ("[1, 2, 3][0]", int(1)),
        ("[1, 2, 3][1 + 1];", int(3)),
        ("let i = 0; [1][i];", int(1)),
        ("let myArray = [1, 2, 3]; myArray[2];", int(3)),
        (
            "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
            int(6),
        ),
        ("[1, 2, 3][3]", Value::Null),
        ("[1, 2, 3][5]", Value::Null),
        ("[1, 2, 3][-1]", Value::Null),
    ]);
}

#[test]
fn hash_literals() {
    let source = r#"
        let two = "two";
        {
            "one": 10 - 9,
            two: 1 + 1,
            "thr" + "ee": 6 / 2,
            4: 4,
            true: 5,
            false: 6
        }
    "#;
    let Value::Hash(hash) = run(source) else {
        panic!("expected a hash");
    };
    let expected = [
        (Value::string("one"), 1),
        (Value::string("two"), 2),
        (Value::string("three"), 3),
        (int(4), 4),
        (Value::TRUE, 5),
        (Value::FALSE, 6),
    ];
    assert_eq!(hash.len(), expected.len());
    for (key, value) in expected {
        let Some(hash_key) = key.hash_key() else {
            panic!("{key:?} should be hashable");
        };
        let pair = hash.get(&hash_key).map(|pair| pair.value.clone());
        assert_eq!(pair, Some(int(value)), "key {key}");
    }
}

#[test]
fn hash_indexing() {
    assert_values(&[
        (r#"{"foo": 5}["foo"]"#, int(5)),
        (r#"{"foo": 5}["bar"]"#, Value::Null),
        (r#"let key = "foo"; {"foo": 5}[key]"#, int(5)),
        (r#"{}["foo"]"#, Value::Null),
        ("{5: 5}[5]", int(5)),
        ("{true: 5}[true]", int(5)),
        ("{false: 5}[false]", int(5)),
        (r#"{1: "a"}[1]"#, Value::string("a")),
        (r#"{1: "a"}[2]"#, Value::Null),
        (r#"{5: "five"}["5"]"#, Value::Null),
        (r#"{"a": 1, "a": 2}["a"]"#, int(2)),
    ]);
}

#[test]
fn duplicate_keys_keep_one_pair() {
    assert_eq!(run(r#"{"a": 1, "b": 2, "a": 3}"#).to_string(), "{a: 3, b: 2}");
}

#[test]
fn eval_node_exposes_return_value() {
    let program = parse_ok("return 1 + 1;");
    let interpreter = Interpreter::with_print_handler(silent_handler());
    let env = Environment::new();
    let value = interpreter.eval(&program.statements[0], &env);
    assert_eq!(value, Value::ReturnValue(Box::new(int(2))));
    assert_eq!(interpreter.eval(&program, &env), int(2));
}

#[test]
fn eval_node_on_expressions_and_blocks() {
    let program = parse_ok("if (true) { let y = 3; return y; }");
    let interpreter = Interpreter::with_print_handler(silent_handler());
    let env = Environment::new();
    let StmtKind::Expression(expr) = &program.statements[0].kind else {
        panic!("expected an expression statement");
    };
    assert_eq!(
        interpreter.eval(expr, &env),
        Value::ReturnValue(Box::new(int(3)))
    );
    assert_eq!(env.get("y"), Some(int(3)));
}

#[test]
fn environment_persists_between_programs() {
    let interpreter = Interpreter::with_print_handler(silent_handler());
    let env = Environment::new();
    interpreter.eval_program(&parse_ok("let a = 40;"), &env);
    assert_eq!(interpreter.eval_program(&parse_ok("a + 2"), &env), int(42));
}

#[test]
fn custom_builtin_table() {
    fn answer(_: &[Value], _: &crate::PrintHandler) -> Result<Value, EvalError> {
        Ok(Value::Integer(42))
    }
    let mut builtins = Builtins::empty();
    builtins.register("answer", answer);
    let interpreter = Interpreter::with_print_handler(silent_handler()).with_builtins(builtins);
    let env = Environment::new();
    assert_eq!(interpreter.eval_program(&parse_ok("answer()"), &env), int(42));
    assert!(interpreter.eval_program(&parse_ok("len([])"), &env).is_error());
}

#[test]
fn macro_literal_outside_definition_is_an_error() {
    assert_error(
        "macro(x) { x }",
        "macro literals are only allowed as the value of a top-level let",
    );
}

#[test]
fn empty_program_is_null() {
    assert_values(&[("", Value::Null)]);
}

#[test]
fn quote() {
    let cases = [
        ("quote(5)", "5"),
        ("quote(5 + 8)", "(5 + 8)"),
        ("quote(foobar)", "foobar"),
        ("quote(foobar + barfoo)", "(foobar + barfoo)"),
    ];
    for (source, expected) in cases {
        match run(source) {
            Value::Quote(node) => assert_eq!(node.to_string(), expected),
            other => panic!("expected a quote from {source:?}, got {other:?}"),
        }
    }
    assert_eq!(run("quote(5 + 8)").to_string(), "QUOTE((5 + 8))");
}

#[test]
fn unquote() {
    let cases = [
        ("quote(unquote(4))", "4"),
        ("quote(unquote(4 + 4))", "8"),
        ("quote(8 + unquote(4 + 4))", "(8 + 8)"),
        ("quote(unquote(4 + 4) + 8)", "(8 + 8)"),
        ("let foobar = 8; quote(foobar)", "foobar"),
        ("let foobar = 8; quote(unquote(foobar))", "8"),
        ("quote(unquote(true))", "true"),
        ("quote(unquote(true == false))", "false"),
        ("quote(unquote(quote(4 + 4)))", "(4 + 4)"),
        (
            "let quotedInfixExpression = quote(4 + 4); quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
            "(8 + (4 + 4))",
        ),
        (r#"quote(unquote("text"))"#, "text"),
        ("quote(unquote([1, 1 + 1]))", "[1, 2]"),
        (r#"quote(unquote({"k": 1}))"#, "{k:1}"),
        ("quote(fn(x) { x + unquote(1 + 1) })", "fn(x) (x + 2)"),
    ];
    for (source, expected) in cases {
        match run(source) {
            Value::Quote(node) => assert_eq!(node.to_string(), expected, "source: {source}"),
            other => panic!("expected a quote from {source:?}, got {other:?}"),
        }
    }
}

#[test]
fn unquote_results_keep_their_kind() {
    let Value::Quote(node) = run(r#"quote(unquote("a" + "b"))"#) else {
        panic!("expected a quote");
    };
    assert_eq!(node.kind, simian_ir::ExprKind::Str("ab".to_string()));
}

#[test]
fn quote_errors() {
    assert_error("quote(unquote(fn(x) { x }))", "cannot unquote FUNCTION");
    assert_error("quote(unquote(puts))", "cannot unquote BUILTIN");
    assert_error("quote(unquote(if (false) { 1 }))", "cannot unquote NULL");
    assert_error("quote(1, 2)", "quote takes exactly one argument, got 2");
    assert_error("quote(unquote(missing))", "identifier not found: missing");
}
