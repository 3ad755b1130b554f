/// Logs the error of a `Result` that is otherwise ignored.
macro_rules! log_if_err {
    ($result:expr, $context:expr) => {
        if let Err(ref e) = $result {
            error!("{}: {}", $context, e);
        }
    };
}
