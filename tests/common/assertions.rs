//! Custom assertion macros
//!
//! Provides enhanced assertion macros for better test output.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that the session holds no token and no user
#[macro_export]
macro_rules! assert_signed_out {
    ($session:expr) => {
        assert!(!$session.is_authenticated(), "session should be signed out");
        assert!($session.token().is_none(), "token should be cleared");
        assert!($session.current_user().is_none(), "user should be cleared");
    };
}
