//! The creation form: a local draft, image generation and publishing.

use crate::api::StudioApi;
use crate::config::ClientConfig;
use crate::error::{Result, StudioError};
use crate::prompts::random_prompt;
use crate::types::{Draft, DraftField, ImageData};
use crate::views::inflight::InFlight;
use crate::views::lock;
use std::sync::{Arc, Mutex};

/// Keys the form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter generates instead of submitting.
    Enter,
    /// Any other key.
    Other,
}

/// What the preview frame shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No image yet.
    Placeholder,
    /// The generated image as a data URI.
    Image(String),
}

/// View model for the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRender {
    /// Author field value.
    pub author_name: String,
    /// Prompt field value.
    pub prompt: String,
    /// Preview frame contents.
    pub preview: Preview,
    /// Busy indicator over the preview while generating.
    pub busy: bool,
    /// Label of the generate button.
    pub generate_label: &'static str,
    /// Label of the save button.
    pub save_label: &'static str,
}

/// Holds the draft and drives generation and submission.
///
/// Every operation takes `&self`; generation and submission may overlap.
pub struct CreationView {
    api: Arc<dyn StudioApi>,
    default_author: String,
    draft: Mutex<Draft>,
    generating: InFlight,
    saving: InFlight,
}

impl CreationView {
    /// Creates a form with an empty draft signed by the configured author.
    pub fn new(api: Arc<dyn StudioApi>, config: &ClientConfig) -> Self {
        let default_author = config.default_author().to_string();
        Self {
            api,
            draft: Mutex::new(Draft::new(default_author.clone())),
            default_author,
            generating: InFlight::new(),
            saving: InFlight::new(),
        }
    }

    /// Returns a copy of the current draft.
    pub fn draft(&self) -> Draft {
        lock(&self.draft).clone()
    }

    /// True while an image generation request is outstanding.
    pub fn is_generating(&self) -> bool {
        self.generating.is_set()
    }

    /// True while a submission is outstanding.
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// Merges one field into the draft.
    pub fn update_field(&self, field: DraftField, value: impl Into<String>) {
        lock(&self.draft).set(field, value);
    }

    /// Replaces the prompt with a random one that differs from it.
    pub fn fill_random_prompt(&self) -> String {
        let mut draft = lock(&self.draft);
        let prompt = random_prompt(&draft.prompt);
        draft.prompt = prompt.clone();
        prompt
    }

    /// Generates an image for the current prompt and stores it in the draft.
    ///
    /// On failure the draft's image is left untouched.
    pub async fn generate_image(&self) -> Result<()> {
        let prompt = lock(&self.draft).prompt.clone();
        if prompt.is_empty() {
            return Err(StudioError::MissingPrompt);
        }

        let _generating = self.generating.acquire();
        let photo = self.api.generate_image(&prompt).await.map_err(|e| {
            tracing::warn!(error = %e, "image generation failed");
            e
        })?;

        // Only the image is written back; edits made meanwhile survive.
        lock(&self.draft).image = ImageData::from_base64(&photo);
        Ok(())
    }

    /// Publishes the draft and returns the published copy.
    ///
    /// On success the draft is reset, unless it was edited while the request
    /// was outstanding; those edits are kept.
    pub async fn submit_post(&self) -> Result<Draft> {
        let draft = self.draft();
        if !draft.can_submit() {
            return Err(StudioError::MissingImage);
        }

        let _saving = self.saving.acquire();
        self.api.create_post(&draft).await.map_err(|e| {
            tracing::warn!(error = %e, "publishing post failed");
            e
        })?;

        {
            let mut current = lock(&self.draft);
            if *current == draft {
                *current = Draft::new(self.default_author.clone());
            } else {
                tracing::debug!("draft edited during submit; keeping edits");
            }
        }
        tracing::info!(author = %draft.author_name, "post published");
        Ok(draft)
    }

    /// Enter generates; other keys do nothing.
    pub async fn handle_key(&self, key: Key) -> Result<()> {
        match key {
            Key::Enter => self.generate_image().await,
            Key::Other => Ok(()),
        }
    }

    /// Builds the form's view model.
    pub fn render(&self) -> CreationRender {
        let draft = self.draft();
        let generating = self.is_generating();
        let preview = if draft.image.is_empty() {
            Preview::Placeholder
        } else {
            Preview::Image(draft.image.as_str().to_string())
        };

        CreationRender {
            author_name: draft.author_name,
            prompt: draft.prompt,
            preview,
            busy: generating,
            generate_label: if generating { "Creating..." } else { "Create" },
            save_label: if self.is_saving() { "Saving..." } else { "Save" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::FakeStudio;
    use std::sync::atomic::Ordering;

    fn view(fake: &Arc<FakeStudio>) -> CreationView {
        CreationView::new(fake.clone(), &ClientConfig::default())
    }

    #[test]
    fn test_new_draft_uses_default_author() {
        let fake = Arc::new(FakeStudio::default());
        let view = view(&fake);
        assert_eq!(view.draft(), Draft::new("AdamAi"));
    }

    #[test]
    fn test_update_field_merges() {
        let fake = Arc::new(FakeStudio::default());
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "zombie attack");
        view.update_field(DraftField::Name, "Sam");

        let draft = view.draft();
        assert_eq!(draft.prompt, "zombie attack");
        assert_eq!(draft.author_name, "Sam");
        assert!(draft.image.is_empty());
    }

    #[test]
    fn test_fill_random_prompt_changes_prompt() {
        let fake = Arc::new(FakeStudio::default());
        let view = view(&fake);
        let first = view.fill_random_prompt();
        assert_eq!(view.draft().prompt, first);
        let second = view.fill_random_prompt();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_generate_without_prompt_makes_no_call() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);

        let err = view.generate_image().await.unwrap_err();
        assert!(matches!(err, StudioError::MissingPrompt));
        assert_eq!(fake.generate_calls(), 0);
        assert!(!view.is_generating());
    }

    #[tokio::test]
    async fn test_generate_stores_data_uri() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "dragon ride");

        assert!(!view.is_generating());
        view.generate_image().await.unwrap();
        assert!(!view.is_generating());
        assert_eq!(view.draft().image.as_str(), "data:image/jpeg;base64,abc");
        assert_eq!(fake.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_failure_keeps_image_and_clears_flag() {
        let fake = Arc::new(FakeStudio::with_photo("first"));
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "dragon ride");
        view.generate_image().await.unwrap();

        fake.fail_generate.store(true, Ordering::SeqCst);
        assert!(view.generate_image().await.is_err());
        assert!(!view.is_generating());
        assert_eq!(view.draft().image.as_str(), "data:image/jpeg;base64,first");
    }

    #[tokio::test]
    async fn test_generating_flag_set_while_in_flight() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "dragon ride");

        let held = fake.gate.lock().await;
        let observer = &view;
        let (result, seen) = tokio::join!(view.generate_image(), async move {
            tokio::task::yield_now().await;
            let render = observer.render();
            drop(held);
            render
        });

        result.unwrap();
        assert!(seen.busy);
        assert_eq!(seen.generate_label, "Creating...");
        assert!(!view.is_generating());
        assert_eq!(view.render().generate_label, "Create");
    }

    #[tokio::test]
    async fn test_submit_without_image_makes_no_call() {
        let fake = Arc::new(FakeStudio::default());
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "zombie attack");

        let err = view.submit_post().await.unwrap_err();
        assert!(matches!(err, StudioError::MissingImage));
        assert_eq!(fake.create_calls(), 0);
        assert!(!view.is_saving());
    }

    #[tokio::test]
    async fn test_submit_publishes_and_resets_draft() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);
        view.update_field(DraftField::Name, "Sam");
        view.update_field(DraftField::Prompt, "zombie attack");
        view.generate_image().await.unwrap();

        let published = view.submit_post().await.unwrap();
        assert_eq!(published.author_name, "Sam");
        assert_eq!(published.image.as_str(), "data:image/jpeg;base64,abc");
        assert_eq!(fake.published.lock().unwrap().as_slice(), &[published]);

        assert_eq!(view.draft(), Draft::new("AdamAi"));
        assert!(!view.is_saving());
    }

    #[tokio::test]
    async fn test_edits_during_submit_survive_reset() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "zombie attack");
        view.generate_image().await.unwrap();

        let held = fake.gate.lock().await;
        let editor = &view;
        let (result, ()) = tokio::join!(view.submit_post(), async move {
            tokio::task::yield_now().await;
            assert!(editor.is_saving());
            editor.update_field(DraftField::Prompt, "edited");
            drop(held);
        });

        let published = result.unwrap();
        assert_eq!(published.prompt, "zombie attack");
        let draft = view.draft();
        assert_eq!(draft.prompt, "edited");
        assert_eq!(draft.image.as_str(), "data:image/jpeg;base64,abc");
        assert!(!view.is_saving());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        fake.fail_create.store(true, Ordering::SeqCst);
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "zombie attack");
        view.generate_image().await.unwrap();
        let before = view.draft();

        let err = view.submit_post().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(view.draft(), before);
        assert!(!view.is_saving());
        assert_eq!(view.render().save_label, "Save");
    }

    #[tokio::test]
    async fn test_enter_key_generates() {
        let fake = Arc::new(FakeStudio::with_photo("abc"));
        let view = view(&fake);
        view.update_field(DraftField::Prompt, "ghost duel");

        view.handle_key(Key::Other).await.unwrap();
        assert_eq!(fake.generate_calls(), 0);

        view.handle_key(Key::Enter).await.unwrap();
        assert_eq!(fake.generate_calls(), 1);
    }

    #[test]
    fn test_render_placeholder_until_generated() {
        let fake = Arc::new(FakeStudio::default());
        let render = view(&fake).render();
        assert_eq!(render.preview, Preview::Placeholder);
        assert!(!render.busy);
        assert_eq!(render.save_label, "Save");
    }
}
