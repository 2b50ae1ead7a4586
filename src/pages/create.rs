use crate::api::{Record, Transport};
use crate::forms::EntityForm;

/// Create view: a blank form and one POST on submit. On failure the form
/// state survives untouched so the user can fix and resubmit.
pub struct CreatePage<F: EntityForm> {
    pub form: F,
    pub error: Option<String>,
}

impl<F: EntityForm> CreatePage<F> {
    pub fn new() -> CreatePage<F> {
        CreatePage {
            form: F::default(),
            error: None,
        }
    }

    /// True means created: the caller navigates to the list view.
    pub async fn submit(&mut self, transport: &dyn Transport) -> bool {
        let draft = match self.form.payload() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(err.to_string());
                return false;
            }
        };

        match F::Record::create(transport, &draft).await {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err.user_message(&format!(
                    "Failed to create {}.",
                    <F::Record as Record>::NOUN
                )));
                false
            }
        }
    }
}

impl<F: EntityForm> Default for CreatePage<F> {
    fn default() -> Self {
        CreatePage::new()
    }
}
