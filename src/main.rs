mod app;
mod config;
mod domain;
mod error;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

#[cfg(feature = "desktop")]
fn main() {
    dioxus::logger::initialize_default();

    let mut cfg = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("FMSCA Viewer"));
    match default_webview_data_dir() {
        Ok(dir) => cfg = cfg.with_data_directory(dir),
        Err(err) => tracing::warn!("using the default webview data directory: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop().with_cfg(cfg).launch(app::App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app::App);
}

#[cfg(feature = "desktop")]
fn ensure_webview_data_dir(base_data_dir: &std::path::Path) -> anyhow::Result<std::path::PathBuf> {
    use anyhow::Context;

    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg(feature = "desktop")]
fn default_webview_data_dir() -> anyhow::Result<std::path::PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "fmsca", "viewer")
        .ok_or_else(|| anyhow::anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
