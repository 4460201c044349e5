use std::ops::Deref;
use std::sync::Arc;

use driver::database::SqliteDatabase;
use kernel::KernelError;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }

    #[cfg(test)]
    pub async fn in_memory() -> error_stack::Result<Self, KernelError> {
        let database = SqliteDatabase::in_memory().await?;
        Ok(Self(Arc::new(Handler { database })))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    database: SqliteDatabase,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = SqliteDatabase::new().await?;

        Ok(Self { database })
    }
}
