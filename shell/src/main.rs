use crate::console::Console;
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::session::Session;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod action;
mod console;
mod controller;
mod error;
mod handler;
mod menu;
mod request;
mod response;
mod session;
mod validate;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "library.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    // stdout belongs to the menu, so events only go to the log file
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,shell=info,sqlx=warn".into()
                    }),
                )),
        )
        .init();

    let app = AppModule::new().await?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(app, Console::new(stdin.lock(), stdout.lock()));
    session.run().await?;

    Ok(())
}
