//! Generate command - render a chart for one image version

use std::fs;
use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr, miette};

use charter_core::CascadePatterns;
use charter_engine::{ChartContext, ChartOutput, Engine};
use charter_remote::{Image, RemoteClient};

pub async fn run(
    image_name: &str,
    template_dir: &Path,
    out: &Path,
    tag: Option<&str>,
) -> Result<()> {
    let client = RemoteClient::new().into_diagnostic()?;
    let patterns = CascadePatterns::new();

    let mut image = Image::new(image_name);
    let versions = image
        .versions(&client, &patterns)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed resolving versions for {image_name}"))?;

    // Empty resolution is not an error; the image is skipped.
    let Some(latest) = versions.last() else {
        eprintln!(
            "{} no usable versions for {}, skipping",
            style("WARN").yellow().bold(),
            image_name
        );
        return Ok(());
    };

    let chosen = match tag {
        Some(raw) => versions
            .iter()
            .find(|v| v.raw == raw)
            .ok_or_else(|| miette!("tag '{raw}' is not among the resolved versions of {image_name}"))?,
        None => latest,
    };

    let config = image
        .config(&client, &chosen.raw)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed loading config for {image_name}:{}", chosen.raw))?;

    let ports = image
        .ports(&client, &chosen.raw, &config)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed extracting ports for {image_name}:{}", chosen.raw))?;

    let context = ChartContext {
        config,
        version: chosen.core_string(),
        ports,
    };

    let files = Engine::new()
        .render_dir(template_dir, &context)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed rendering {}", template_dir.display()))?;

    let target = out.join(image_name);
    write_chart(&target, &files)?;

    println!(
        "{} wrote {} files to {}",
        style("✓").green().bold(),
        files.len(),
        target.display()
    );

    Ok(())
}

/// Persist the rendered map, creating directories as paths require
fn write_chart(target: &Path, files: &ChartOutput) -> Result<()> {
    for (name, content) in files {
        let path = target.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed creating {}", parent.display()))?;
        }
        fs::write(&path, content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed writing {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_chart_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = ChartOutput::new();
        files.insert("Chart.yaml".to_string(), b"name: radarr".to_vec());
        files.insert("templates/deployment.yaml".to_string(), b"kind: Deployment".to_vec());

        write_chart(&dir.path().join("radarr"), &files).unwrap();

        assert_eq!(
            fs::read(dir.path().join("radarr/Chart.yaml")).unwrap(),
            b"name: radarr"
        );
        assert_eq!(
            fs::read(dir.path().join("radarr/templates/deployment.yaml")).unwrap(),
            b"kind: Deployment"
        );
    }
}
