//! Versions command - list an image's resolved versions

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use charter_core::CascadePatterns;
use charter_remote::{Image, RemoteClient};

pub async fn run(image_name: &str) -> Result<()> {
    let client = RemoteClient::new().into_diagnostic()?;
    let patterns = CascadePatterns::new();

    let mut image = Image::new(image_name);
    let versions = image
        .versions(&client, &patterns)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed resolving versions for {image_name}"))?;

    if versions.is_empty() {
        eprintln!(
            "{} no usable versions for {}",
            style("WARN").yellow().bold(),
            image_name
        );
        return Ok(());
    }

    for version in &versions {
        println!("{} ({})", version.core_string(), version.raw);
    }

    Ok(())
}
