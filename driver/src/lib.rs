use kernel::KernelError;

use crate::error::ConvertError;

pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .map_err(|report| report.attach_printable(format!("Failed to read env `{key}`")))
}

/// Reads an optional variable, falling back to `default` when it is unset.
pub(crate) fn env_or<T: std::str::FromStr>(
    key: &str,
    default: T,
) -> error_stack::Result<T, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => value.parse::<T>().map_err(|_| {
            error_stack::Report::new(KernelError::Internal)
                .attach_printable(format!("Env `{key}` has an unparsable value: {value}"))
        }),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(error) => Err(error).convert_error(),
    }
}
