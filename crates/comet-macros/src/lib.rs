//! Developer-friendly macros for the Comet tokenizer.
//!
//! This crate provides ergonomic assertion macros used by the tokenizer's
//! test suites.
//!
//! # Macros Overview
//!
//! - [`assert_matches!`] - Assert an expression matches a pattern
//! - [`assert_ok!`] - Assert a `Result` is `Ok` and unwrap it
//! - [`assert_err!`] - Assert a `Result` is `Err`
//! - [`assert_some!`] - Assert an `Option` is `Some` and unwrap it
//! - [`assert_none!`] - Assert an `Option` is `None`
//!
//! # Examples
//!
//! ```
//! use comet_macros::*;
//!
//! #[derive(Debug)]
//! enum Shape { Circle(f64), Square(f64) }
//!
//! let shape = Shape::Circle(2.0);
//! assert_matches!(shape, Shape::Circle(r) if r > 0.0);
//!
//! let parsed: Result<i32, String> = "42".parse().map_err(|_| "bad".into());
//! let n = assert_ok!(parsed);
//! assert_eq!(n, 42);
//! ```

/// Assert that an expression matches a pattern.
///
/// # Example
///
/// ```
/// use comet_macros::assert_matches;
///
/// #[derive(Debug)]
/// enum MyResult { Ok(i32), Err(String) }
///
/// let result = MyResult::Ok(42);
/// assert_matches!(result, MyResult::Ok(n) if n > 0);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(,)?) => {
        match $expr {
            $pat => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                e
            ),
        }
    };
    ($expr:expr, $pat:pat if $guard:expr $(,)?) => {
        match $expr {
            $pat if $guard => {}
            ref e => panic!(
                "assertion failed: `{}` does not match pattern `{} if {}`\n  value: {:?}",
                stringify!($expr),
                stringify!($pat),
                stringify!($guard),
                e
            ),
        }
    };
}

/// Assert that a Result is Ok and extract the value.
///
/// # Example
///
/// ```
/// use comet_macros::assert_ok;
///
/// fn divide(a: i32, b: i32) -> Result<i32, String> {
///     if b == 0 { Err("division by zero".into()) } else { Ok(a / b) }
/// }
///
/// let value = assert_ok!(divide(10, 2));
/// assert_eq!(value, 5);
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!(
                "assertion failed: expected Ok, got Err\n  expression: `{}`\n  error: {:?}",
                stringify!($expr),
                e
            ),
        }
    };
}

/// Assert that a Result is Err.
///
/// # Example
///
/// ```
/// use comet_macros::assert_err;
///
/// fn divide(a: i32, b: i32) -> Result<i32, String> {
///     if b == 0 { Err("division by zero".into()) } else { Ok(a / b) }
/// }
///
/// assert_err!(divide(10, 0));
/// ```
#[macro_export]
macro_rules! assert_err {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(v) => panic!(
                "assertion failed: expected Err, got Ok\n  expression: `{}`\n  value: {:?}",
                stringify!($expr),
                v
            ),
            Err(_) => {}
        }
    };
}

/// Assert that an Option is Some and extract the value.
///
/// # Example
///
/// ```
/// use comet_macros::assert_some;
///
/// let opt = Some(42);
/// let value = assert_some!(opt);
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_some {
    ($expr:expr $(,)?) => {
        match $expr {
            Some(v) => v,
            None => panic!(
                "assertion failed: expected Some, got None\n  expression: `{}`",
                stringify!($expr)
            ),
        }
    };
}

/// Assert that an Option is None.
///
/// # Example
///
/// ```
/// use comet_macros::assert_none;
///
/// let opt: Option<i32> = None;
/// assert_none!(opt);
/// ```
#[macro_export]
macro_rules! assert_none {
    ($expr:expr $(,)?) => {
        match $expr {
            Some(v) => panic!(
                "assertion failed: expected None, got Some\n  expression: `{}`\n  value: {:?}",
                stringify!($expr),
                v
            ),
            None => {}
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_matches() {
        #[derive(Debug)]
        enum E { A(i32), B }
        let _ = E::B;
        assert_matches!(E::A(42), E::A(_));
        assert_matches!(E::A(42), E::A(n) if n > 0);
    }

    #[test]
    fn test_assert_ok() {
        let result: Result<i32, &str> = Ok(42);
        let value = assert_ok!(result);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_assert_err() {
        let result: Result<i32, &str> = Err("error");
        assert_err!(result);
    }

    #[test]
    fn test_assert_some() {
        let opt = Some(42);
        let value = assert_some!(opt);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_assert_none() {
        let opt: Option<i32> = None;
        assert_none!(opt);
    }
}
