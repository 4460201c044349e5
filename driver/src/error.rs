use error_stack::Report;
use kernel::KernelError;
use sqlx::Error;

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::error::ConvertError;

    #[test]
    fn pool_timeout_maps_to_timeout() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let report = result.convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);

        let result: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let report = result.convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
