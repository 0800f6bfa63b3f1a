use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::{RuntimeError, RuntimeResult};
use crate::token::Token;
use crate::value::Value;

type Link = Option<Rc<Binding>>;

/// A named value cell. The name never changes, the value can be assigned.
#[derive(Debug)]
struct Binding {
    name: String,
    value: RefCell<Value>,
    next: Link,
}

/// A persistent scope.
///
/// `define` never touches the receiver: it returns a new environment whose
/// frame is the new binding prepended to the receiver's whole frame, with the
/// receiver as parent. A closure holding an environment therefore sees exactly
/// the bindings that existed when it was captured, while `assign` still
/// mutates the shared cells in place.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: Link,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: None,
            enclosing: None,
        }
    }

    pub fn new_with_enclosing(enclosing: Rc<Environment>) -> Self {
        Self {
            bindings: None,
            enclosing: Some(enclosing),
        }
    }

    pub fn define(self: &Rc<Self>, name: &str, value: Value) -> Rc<Environment> {
        trace!(name = name, "define");
        Rc::new(Self {
            bindings: Some(Rc::new(Binding {
                name: name.to_string(),
                value: RefCell::new(value),
                next: self.bindings.clone(),
            })),
            enclosing: Some(Rc::clone(self)),
        })
    }

    pub fn get(&self, name: &Token) -> RuntimeResult<Value> {
        self.lookup(&name.lexeme)
            .map(|binding| binding.value.borrow().clone())
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }

    pub fn assign(&self, name: &Token, value: Value) -> RuntimeResult<()> {
        let binding = self
            .lookup(&name.lexeme)
            .ok_or_else(|| RuntimeError::undefined_variable(name))?;
        trace!(name = %name.lexeme, "assign");
        binding.value.replace(value);
        Ok(())
    }

    /// Reads a binding by plain name, without producing an error.
    pub fn get_by_name(&self, name: &str) -> Option<Value> {
        self.lookup(name).map(|binding| binding.value.borrow().clone())
    }

    fn local(&self) -> impl Iterator<Item = &Binding> {
        std::iter::successors(self.bindings.as_deref(), |b| b.next.as_deref())
    }

    fn lookup(&self, name: &str) -> Option<&Binding> {
        self.local()
            .find(|binding| binding.name == name)
            .or_else(|| self.enclosing.as_deref().and_then(|e| e.lookup(name)))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.local().try_for_each(|binding| {
            writeln!(f, "> {} => {}", binding.name, binding.value.borrow())
        })?;
        if let Some(enc) = &self.enclosing {
            writeln!(f, ">  |")?;
            writeln!(f, ">  v")?;
            write!(f, "{}", enc)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use crate::environment::Environment;
    use crate::error::RuntimeErrorKind;
    use crate::token::Token;
    use crate::value::Value;

    fn token_lex(lexeme: &str) -> Token {
        Token::identifier(lexeme)
    }

    fn root() -> Rc<Environment> {
        Rc::new(Environment::new())
    }

    #[test]
    fn can_define() {
        let e = root().define("hello", Value::Number(9.0));

        assert_eq!(e.get(&token_lex("hello")).ok(), Some(Value::Number(9.0)));
    }

    #[test]
    fn define_does_not_touch_receiver() {
        let e = root();
        let f = e.define("hello", Value::Number(9.0));

        assert!(e.get_by_name("hello").is_none());
        assert_eq!(f.get_by_name("hello"), Some(Value::Number(9.0)));
        assert!(Rc::ptr_eq(f.enclosing.as_ref().expect("parent"), &e));
    }

    #[test]
    fn later_define_shadows_earlier() {
        let e = root()
            .define("x", Value::Number(1.0))
            .define("x", Value::Number(2.0));

        assert_eq!(e.get(&token_lex("x")).ok(), Some(Value::Number(2.0)));
    }

    #[test]
    fn snapshot_does_not_see_later_bindings() {
        let before = root().define("a", Value::Bool(true));
        let after = before.define("b", Value::Bool(false));

        assert!(before.get(&token_lex("b")).is_err());
        assert_eq!(after.get(&token_lex("a")).ok(), Some(Value::Bool(true)));
    }

    #[test]
    fn can_assign() {
        let e = root().define("hello", Value::Number(9.0));
        let tok = token_lex("hello");

        assert!(e.assign(&tok, Value::Number(7.0)).is_ok());
        assert_eq!(e.get(&tok).ok(), Some(Value::Number(7.0)));
    }

    #[test]
    fn assign_is_visible_to_every_holder() {
        let older = root().define("n", Value::Number(1.0));
        let newer = older.define("m", Value::Nil);

        newer
            .assign(&token_lex("n"), Value::Number(2.0))
            .expect("assign through derived env");

        assert_eq!(older.get_by_name("n"), Some(Value::Number(2.0)));
    }

    #[test]
    fn assign_targets_the_most_recent_binding() {
        let outer = root().define("x", Value::Number(1.0));
        let inner = outer.define("x", Value::Number(2.0));

        inner
            .assign(&token_lex("x"), Value::Number(3.0))
            .expect("assign");

        assert_eq!(outer.get_by_name("x"), Some(Value::Number(1.0)));
        assert_eq!(inner.get_by_name("x"), Some(Value::Number(3.0)));
    }

    #[test]
    fn fail_assign_to_undefined() {
        let e = root();
        let err = e.assign(&token_lex("nope"), Value::Number(7.0)).unwrap_err();

        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);
        assert!(e.get_by_name("nope").is_none());
    }

    #[test]
    fn get_when_undefined() {
        let e = root().define("other", Value::Nil);
        let err = e.get(&token_lex("nope")).unwrap_err();

        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);
        assert_eq!(err.message, "Undefined variable 'nope'.");
    }

    #[test]
    fn can_read_from_enclosing() {
        let e = root().define("hello", Value::Number(9.0));
        let f = Environment::new_with_enclosing(e);

        assert_eq!(f.get(&token_lex("hello")).ok(), Some(Value::Number(9.0)))
    }

    #[test]
    fn can_assign_to_enclosing() {
        let e = root().define("hello", Value::Number(9.0));
        let f = Rc::new(Environment::new_with_enclosing(Rc::clone(&e)))
            .define("local", Value::Nil);
        let tok = token_lex("hello");

        assert!(f.assign(&tok, Value::Number(7.0)).is_ok());
        assert_eq!(e.get(&tok).ok(), Some(Value::Number(7.0)));
    }

    #[test]
    fn display_lists_bindings() {
        let e = root().define("a", Value::Number(1.0));
        let text = e.to_string();

        assert!(text.starts_with("> a => 1\n"));
    }
}
