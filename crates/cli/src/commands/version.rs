use tracing::instrument;

#[instrument]
pub fn get_version_info() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let description = env!("CARGO_PKG_DESCRIPTION");

    tracing::debug!(package_version = version, "Gathering package information");

    format!(
        "artifetch {version} - {description}\nCorrelation ID: {}",
        crate::tracing::correlation_id()
    )
}
