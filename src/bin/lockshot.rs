use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lockshot::{
    ExportConfig, ExportVariant, Exporter, FieldValues, HttpFetcher, MemeTemplate,
    PreviewSession, ResourceInliner, export_file_name, parse_templates,
};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "lockshot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the preview at screen resolution.
    Raw(ExportArgs),
    /// Export a square card with a blurred backdrop.
    Card(ExportArgs),
    /// Write the self-contained SVG document.
    Svg(ExportArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Template descriptor JSON (one template or a catalog array).
    #[arg(long)]
    template: PathBuf,

    /// Template id to pick from a catalog.
    #[arg(long)]
    id: Option<String>,

    /// Field values JSON object (`{"nome": "Ana", ...}`).
    #[arg(long)]
    values: Option<PathBuf>,

    /// Output file, or a directory to write a derived file name into.
    #[arg(long)]
    out: PathBuf,

    /// URL relative asset paths resolve against. Defaults to the template's directory.
    #[arg(long)]
    base_url: Option<Url>,

    /// Export configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort asset requests after this many seconds.
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
enum Output {
    Png(ExportVariant),
    Svg,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockshot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Raw(args) => cmd_export(args, Output::Png(ExportVariant::Raw)).await,
        Command::Card(args) => cmd_export(args, Output::Png(ExportVariant::Card)).await,
        Command::Svg(args) => cmd_export(args, Output::Svg).await,
    }
}

async fn cmd_export(args: ExportArgs, output: Output) -> anyhow::Result<()> {
    let template = load_template(&args.template, args.id.as_deref()).await?;
    let values = load_values(args.values.as_deref()).await?;
    let config = load_config(args.config.as_deref()).await?;

    let base = match args.base_url {
        Some(url) => url,
        None => template_base_url(&args.template)?,
    };
    let fetcher = HttpFetcher::with_timeout(args.fetch_timeout_secs.map(Duration::from_secs))?;
    let inliner = ResourceInliner::new(base, Arc::new(fetcher));

    let session = PreviewSession::new(&template, &template.field_values(&values), inliner)?;
    let exporter = Exporter::new(session.serializer(), config)?;

    let (bytes, variant, extension) = match output {
        Output::Png(variant) => {
            let artifact = exporter.export(Some(session.root()), variant).await?;
            (artifact.png, variant, None)
        }
        Output::Svg => {
            let doc = exporter.serialize(Some(session.root())).await?;
            (doc.xml.into_bytes(), ExportVariant::Raw, Some("svg"))
        }
    };

    let out = output_path(&args.out, &template.name, variant, extension).await;
    tokio::fs::write(&out, &bytes)
        .await
        .with_context(|| format!("write {}", out.display()))?;
    tracing::info!(path = %out.display(), bytes = bytes.len(), "wrote export");
    Ok(())
}

async fn load_template(path: &Path, id: Option<&str>) -> anyhow::Result<MemeTemplate> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read template {}", path.display()))?;
    let mut templates = parse_templates(&json)?;
    let index = match id {
        Some(id) => templates
            .iter()
            .position(|t| t.id == id)
            .with_context(|| format!("template `{id}` not found in {}", path.display()))?,
        None if templates.len() == 1 => 0,
        None => anyhow::bail!(
            "{} holds {} templates; pick one with --id",
            path.display(),
            templates.len()
        ),
    };
    Ok(templates.swap_remove(index))
}

async fn load_values(path: Option<&Path>) -> anyhow::Result<FieldValues> {
    let Some(path) = path else {
        return Ok(FieldValues::new());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read values {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse values {}", path.display()))
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<ExportConfig> {
    let Some(path) = path else {
        return Ok(ExportConfig::default());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse config {}", path.display()))
}

/// Template paths like `templates/x/bg.jpg` are relative to the site root, which is the
/// directory holding `templates/`. Without one, the descriptor's own directory is used.
fn template_base_url(template: &Path) -> anyhow::Result<Url> {
    let abs = std::fs::canonicalize(template)
        .with_context(|| format!("resolve {}", template.display()))?;
    let dir = abs.parent().unwrap_or(&abs);
    let root = dir
        .ancestors()
        .find(|a| a.file_name().is_some_and(|n| n == "templates"))
        .and_then(Path::parent)
        .unwrap_or(dir);
    Url::from_directory_path(root)
        .map_err(|()| anyhow::anyhow!("cannot express {} as a URL", root.display()))
}

async fn output_path(
    out: &Path,
    template_name: &str,
    variant: ExportVariant,
    extension: Option<&str>,
) -> PathBuf {
    let is_dir = tokio::fs::metadata(out)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return out.to_path_buf();
    }
    let name = PathBuf::from(export_file_name(template_name, variant));
    match extension {
        Some(ext) => out.join(name.with_extension(ext)),
        None => out.join(name),
    }
}
