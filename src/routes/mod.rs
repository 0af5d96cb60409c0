mod admin;
mod airports;
mod health;
mod notifications;
mod submissions;

pub use admin::*;
pub use airports::*;
pub use health::*;
pub use notifications::*;
pub use submissions::*;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
