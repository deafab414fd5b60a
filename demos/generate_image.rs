//! Generate an image and save it next to the working directory.
//!
//! Run with: `cargo run --example generate_image`
//!
//! Honors `PROMPTBOARD_API_URL`.

use promptboard::{ClientConfig, CreationView, DraftField, HttpStudioClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> promptboard::Result<()> {
    let config = ClientConfig::builder().build()?;
    let api = Arc::new(HttpStudioClient::new(&config)?);
    let form = CreationView::new(api, &config);

    form.update_field(DraftField::Prompt, "fencing with a ghost in a haunted library");
    form.generate_image().await?;

    let bytes = form.draft().image.decode()?;
    std::fs::write("output.jpg", &bytes)?;
    println!("Generated image: {} bytes", bytes.len());

    Ok(())
}
