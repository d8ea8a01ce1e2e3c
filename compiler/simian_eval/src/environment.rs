//! Lexical environments.
//!
//! An [`Environment`] is a handle to one scope: a name to value map plus an
//! optional enclosing scope. Handles are reference counted, so a closure and
//! the call frame that created it share the same bindings. Lookup walks
//! outward through the enclosing scopes; binding always writes to the
//! innermost one.
//!
//! A closure stored in the scope it captured keeps that scope alive for as
//! long as the closure is reachable from it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

/// Bindings of a single scope.
#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Value>,
    outer: Option<Environment>,
}

/// Shared handle to a scope.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// A fresh outermost scope.
    pub fn new() -> Self {
        Environment::default()
    }

    /// A fresh scope whose lookups fall back to `outer`.
    pub fn enclosed(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            outer: Some(outer.clone()),
        })))
    }

    /// Resolve `name` in this scope or the nearest enclosing one that binds it.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut scope = self.clone();
        loop {
            let outer = {
                let current = scope.0.borrow();
                if let Some(value) = current.bindings.get(name) {
                    return Some(value.clone());
                }
                current.outer.clone()
            };
            scope = outer?;
        }
    }

    /// Bind `name` in this scope, replacing any previous binding here.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    pub fn outer(&self) -> Option<Environment> {
        self.0.borrow().outer.clone()
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Names bound directly in this scope, sorted.
    fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

/// Lists local names only; printing values could recurse through closures.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("has_outer", &self.outer().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{silent_handler, Interpreter};

    fn eval_in(env: &Environment, source: &str) -> Value {
        let output = simian_parse::parse_source(source);
        assert!(!output.has_errors(), "parse errors: {:?}", output.errors);
        Interpreter::with_print_handler(silent_handler()).eval_program(&output.program, env)
    }

    #[test]
    fn set_and_get() {
        let env = Environment::new();
        env.set("x", Value::Integer(42));
        assert_eq!(env.get("x"), Some(Value::Integer(42)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn last_write_wins() {
        let env = Environment::new();
        env.set("x", Value::Integer(1));
        env.set("x", Value::Integer(2));
        assert_eq!(env.get("x"), Some(Value::Integer(2)));
        assert_eq!(env.local_names(), vec!["x"]);
    }

    #[test]
    fn lookup_walks_outward() {
        let global = Environment::new();
        global.set("a", Value::Integer(1));
        let middle = Environment::enclosed(&global);
        middle.set("b", Value::Integer(2));
        let inner = Environment::enclosed(&middle);

        assert_eq!(inner.get("a"), Some(Value::Integer(1)));
        assert_eq!(inner.get("b"), Some(Value::Integer(2)));
        assert!(inner.local_names().is_empty());
        assert!(inner.outer().is_some_and(|outer| outer.ptr_eq(&middle)));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let global = Environment::new();
        global.set("x", Value::Integer(1));
        let inner = Environment::enclosed(&global);
        inner.set("x", Value::Integer(2));

        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn handles_share_bindings() {
        let env = Environment::new();
        let alias = env.clone();
        alias.set("shared", Value::TRUE);
        assert_eq!(env.get("shared"), Some(Value::TRUE));
        assert!(env.ptr_eq(&alias));
        assert!(!env.ptr_eq(&Environment::new()));
    }

    #[test]
    fn debug_lists_names_only() {
        let env = Environment::new();
        env.set("b", Value::Null);
        env.set("a", Value::Null);
        assert_eq!(
            format!("{env:?}"),
            r#"Environment { names: ["a", "b"], has_outer: false }"#
        );
    }

    #[test]
    fn closure_keeps_its_scope_only_while_reachable() {
        let env = Environment::new();
        let scope = Rc::downgrade(&env.0);
        let closure = eval_in(&env, "fn(x) { x }");
        drop(env);

        assert!(scope.upgrade().is_some());
        drop(closure);
        assert!(scope.upgrade().is_none());
    }

    #[test]
    fn closure_bound_in_its_own_scope_keeps_the_scope_alive() {
        let env = Environment::new();
        let scope = Rc::downgrade(&env.0);
        eval_in(
            &env,
            "let countdown = fn(n) { if (n == 0) { 0 } else { countdown(n - 1) } }; countdown(3);",
        );
        drop(env);

        // scope -> countdown -> captured scope
        assert!(scope.upgrade().is_some());

        // Rebinding the name breaks the cycle.
        if let Some(strong) = scope.upgrade() {
            Environment(strong).set("countdown", Value::Null);
        }
        assert!(scope.upgrade().is_none());
    }
}
