use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use rill_core::StreamError;
use tracing::warn;

use crate::config::{FaultPolicy, OperatorConfig};

/// Run a user function under the operator's [`FaultPolicy`].
///
/// With `Propagate` the function is called directly and a panic unwinds.
/// With `Capture` a panic is converted into `StreamError::Panicked`.
pub(crate) fn invoke<R>(
    config: &OperatorConfig,
    operator: &'static str,
    f: impl FnOnce() -> R,
) -> Result<R, StreamError> {
    match config.fault_policy {
        FaultPolicy::Propagate => Ok(f()),
        FaultPolicy::Capture => panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            warn!(operator, label = config.label(), %message, "captured panic in user function");
            StreamError::Panicked { operator, message }
        }),
    }
}

/// Convert the `Err` of a fallible user function into a stream failure.
///
/// A `StreamError` is forwarded as is; any other error becomes
/// `StreamError::Operator` labelled with the operator that produced it.
pub(crate) fn operator_error<E>(operator: &'static str, error: E) -> StreamError
where
    E: fmt::Display + 'static,
{
    match (&error as &dyn Any).downcast_ref::<StreamError>() {
        Some(error) => error.clone(),
        None => StreamError::operator(operator, error.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_returns_value() {
        let out = invoke(&OperatorConfig::default(), "map", || 2 + 2);
        assert_eq!(out, Ok(4));
    }

    #[test]
    fn capture_converts_panic() {
        let out: Result<i32, _> =
            invoke(&OperatorConfig::capturing(), "map", || panic!("divide by zero"));
        assert_eq!(
            out,
            Err(StreamError::Panicked {
                operator: "map",
                message: "divide by zero".into(),
            })
        );
    }

    #[test]
    fn capture_formats_owned_messages() {
        let n = 7;
        let out: Result<(), _> =
            invoke(&OperatorConfig::capturing(), "filter", || panic!("bad value {n}"));
        assert_eq!(out.unwrap_err().to_string(), "operator 'filter' panicked: bad value 7");
    }

    #[test]
    fn plain_errors_are_labelled_with_the_operator() {
        assert_eq!(
            operator_error("try_map", "bad row"),
            StreamError::operator("try_map", "bad row")
        );
        let parse = "x1".parse::<i32>().unwrap_err();
        assert_eq!(
            operator_error("try_filter", parse),
            StreamError::operator("try_filter", "invalid digit found in string")
        );
    }

    #[test]
    fn stream_errors_pass_unchanged() {
        let original = StreamError::new("upstream said no");
        assert_eq!(operator_error("try_map", original.clone()), original);
    }

    #[test]
    #[should_panic(expected = "unguarded")]
    fn propagate_unwinds() {
        let _ = invoke(&OperatorConfig::default(), "map", || -> i32 { panic!("unguarded") });
    }
}
