//! CLI for Promptboard - generate images and browse the shared gallery.

use clap::{Args, Parser, Subcommand};
use promptboard::types::save_image_bytes;
use promptboard::{
    random_prompt, ClientConfig, CreationView, DraftField, GalleryRender, GalleryView,
    HttpStudioClient, Post, StudioApi,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "promptboard")]
#[command(about = "Generate images from prompts and publish them to a shared gallery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Backend origin (overrides PROMPTBOARD_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List published posts, newest first
    Gallery(GalleryArgs),

    /// Generate an image from a text prompt
    Generate(GenerateArgs),

    /// Generate an image and publish it to the gallery
    Post(PostArgs),

    /// Print a random prompt idea
    Surprise,

    /// Save a post's image to disk
    Download(DownloadArgs),
}

#[derive(Args)]
struct GalleryArgs {
    /// Only show posts whose author or prompt contains this text
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Args)]
struct PromptArgs {
    /// The text prompt describing the image
    prompt: Option<String>,

    /// Use a random prompt instead
    #[arg(long, conflicts_with = "prompt")]
    surprise: bool,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    /// Write the generated image to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PostArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    /// Author name shown on the card
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args)]
struct DownloadArgs {
    /// Post id
    id: String,

    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut builder = ClientConfig::builder();
    if let Some(url) = &cli.base_url {
        builder = builder.base_url(url);
    }
    if let Commands::Post(args) = &cli.command {
        if let Some(name) = &args.name {
            builder = builder.default_author(name);
        }
    }
    let config = builder.build()?;
    let api = Arc::new(HttpStudioClient::new(&config)?);

    match cli.command {
        Commands::Gallery(args) => show_gallery(api, &config, args, cli.json).await?,
        Commands::Generate(args) => generate(api, &config, args, cli.json).await?,
        Commands::Post(args) => publish(api, &config, args, cli.json).await?,
        Commands::Surprise => surprise(cli.json)?,
        Commands::Download(args) => download(api, args, cli.json).await?,
    }

    Ok(())
}

fn print_posts(posts: &[Post], json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(posts)?);
    } else {
        for post in posts {
            println!("{}  {}: {}", post.id, post.author_name, post.prompt);
        }
    }
    Ok(())
}

async fn show_gallery(
    api: Arc<HttpStudioClient>,
    config: &ClientConfig,
    args: GalleryArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let gallery = GalleryView::new(api, config);
    gallery.mount().await?;

    if let Some(text) = args.search {
        gallery.on_search_input(text);
        gallery.search().apply_now();
    }

    match gallery.render() {
        GalleryRender::Cards(posts) => print_posts(&posts, json_output)?,
        GalleryRender::Empty { title } => {
            if json_output {
                println!("[]");
            } else {
                println!("{title}");
            }
        }
        GalleryRender::Loading => println!("Loading..."),
    }
    Ok(())
}

/// Fills the form's prompt from the arguments.
fn apply_prompt(form: &CreationView, args: &PromptArgs) {
    if args.surprise {
        form.fill_random_prompt();
    } else if let Some(prompt) = &args.prompt {
        form.update_field(DraftField::Prompt, prompt.trim());
    }
}

async fn generate(
    api: Arc<HttpStudioClient>,
    config: &ClientConfig,
    args: GenerateArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let form = CreationView::new(api, config);
    apply_prompt(&form, &args.prompt);
    form.generate_image().await?;

    let draft = form.draft();
    let bytes = draft.image.decode()?;
    if let Some(path) = &args.output {
        std::fs::write(path, &bytes)?;
    }

    if json_output {
        let result = serde_json::json!({
            "type": "image",
            "success": true,
            "prompt": draft.prompt,
            "output": args.output.as_ref().map(|p| p.display().to_string()),
            "size_bytes": bytes.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Prompt: {}", draft.prompt);
        match &args.output {
            Some(path) => println!("Generated image: {} ({} bytes)", path.display(), bytes.len()),
            None => println!("Generated image: {} bytes (use --output to save)", bytes.len()),
        }
    }
    Ok(())
}

async fn publish(
    api: Arc<HttpStudioClient>,
    config: &ClientConfig,
    args: PostArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let gallery = GalleryView::new(api, config);
    let form = gallery.creation();
    apply_prompt(form, &args.prompt);
    form.generate_image().await?;

    let published = gallery.submit_post().await?;
    let total = gallery.posts().map(|p| p.len()).unwrap_or_default();

    if json_output {
        let result = serde_json::json!({
            "type": "post",
            "success": true,
            "name": published.author_name,
            "prompt": published.prompt,
            "gallery_size": total,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Published \"{}\" by {} ({} posts in gallery)",
            published.prompt, published.author_name, total
        );
    }
    Ok(())
}

fn surprise(json_output: bool) -> anyhow::Result<()> {
    let prompt = random_prompt("");
    if json_output {
        println!("{}", serde_json::json!({ "prompt": prompt }));
    } else {
        println!("{prompt}");
    }
    Ok(())
}

async fn download(
    api: Arc<HttpStudioClient>,
    args: DownloadArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let posts = api.fetch_posts().await?;
    let post = posts
        .iter()
        .find(|p| p.id == args.id)
        .ok_or_else(|| anyhow::anyhow!("no post with id {}", args.id))?;

    let bytes = api.image_bytes(post).await?;
    let path = save_image_bytes(&args.output, post, &bytes)?;

    if json_output {
        let result = serde_json::json!({
            "type": "download",
            "success": true,
            "output": path.display().to_string(),
            "size_bytes": bytes.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Saved {} ({} bytes)", path.display(), bytes.len());
    }
    Ok(())
}
