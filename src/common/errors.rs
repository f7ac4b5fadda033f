use lambda_http::{http, Error as LambdaError, Response};

/// Outcome of a failed request at the Lambda boundary.
///
/// `HttpError` carries a fully built response that goes back to the caller as a
/// normal result. `LambdaError` fails the invocation itself.
#[derive(Debug)]
pub enum Error {
    HttpError(Response<String>),
    LambdaError(LambdaError),
}

// Conversions are listed one by one so that handler errors, which become
// responses, never fall into `LambdaError` through a blanket impl.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

/// Folds a request result into what the runtime expects from a handler.
pub fn into_lambda_result(
    result: Result<Response<String>, Error>,
) -> Result<Response<String>, LambdaError> {
    match result {
        Ok(val) => Ok(val),
        Err(Error::HttpError(val)) => Ok(val),
        Err(Error::LambdaError(err)) => Err(err),
    }
}
