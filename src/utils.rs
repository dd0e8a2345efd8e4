use std::future::Future;

use glib::MainContext;
use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Run `fut` on the shared tokio runtime and await its result from any
/// executor, including the GTK main loop.
pub async fn run_on_runtime<T, Fut>(fut: Fut) -> Result<T, tokio::task::JoinError>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    RUNTIME.spawn(fut).await
}

/// Drive a UI-side future on the default main context.
pub fn spawn_local<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    MainContext::default().spawn_local(fut);
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
