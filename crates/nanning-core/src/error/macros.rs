//! Error macros for nanning

/// Macro for mapping database errors
#[macro_export]
macro_rules! map_db_err {
    ($op:expr) => {
        |e| $crate::error::NanningError::storage($op, e)
    };
}

/// Macro for returning invalid input errors
#[macro_export]
macro_rules! bail_invalid {
    ($field:expr, $reason:expr) => {
        return Err($crate::error::NanningError::invalid_input(
            $field, $reason,
        ))
    };
}
