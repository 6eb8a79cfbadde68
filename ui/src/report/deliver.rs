//! Hands a rendered report to the user.

/// Where the report ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Written into a new browser window, ready to print.
    Opened,
    /// Saved as an HTML file at this path.
    Saved(String),
}

/// Opens the report in a print window (web) or saves it to disk (native).
pub fn deliver_report(html: &str) -> Result<Delivery, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlDocument;

        let window = web_sys::window().ok_or("window unavailable")?;
        let popup = window
            .open_with_url_and_target("", "_blank")
            .map_err(|_| "Unable to open a new window".to_string())?
            .ok_or("The report window was blocked by the browser")?;
        let document: HtmlDocument = popup
            .document()
            .ok_or("Report window has no document")?
            .dyn_into()
            .map_err(|_| "Document cast failed".to_string())?;

        document
            .open()
            .map_err(|_| "Unable to open the report document".to_string())?;
        document
            .write(&js_sys::Array::of1(&html.into()))
            .map_err(|_| "Unable to write the report".to_string())?;
        document
            .close()
            .map_err(|_| "Unable to finish the report".to_string())?;
        popup.focus().ok();
        Ok(Delivery::Opened)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let dir = report_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(format!("leafscan-report-{}.html", timestamp_slug()));
        fs::write(&path, html).map_err(|err| err.to_string())?;
        log::info!("Report written to {}", path.display());
        Ok(Delivery::Saved(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn report_dir() -> Result<std::path::PathBuf, String> {
    if let Some(downloads) = directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|dir| dir.to_path_buf()))
    {
        return Ok(downloads);
    }
    let dirs = directories::ProjectDirs::from("org", "Leafscan", "Leafscan")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("reports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}
