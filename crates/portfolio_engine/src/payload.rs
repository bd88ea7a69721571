use portfolio_core::ContactForm;

use crate::RelaySettings;

/// Ordered text fields of one relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPayload {
    fields: Vec<(&'static str, String)>,
}

impl RelayPayload {
    pub fn build(settings: &RelaySettings, form: &ContactForm) -> Self {
        let fields = vec![
            ("access_key", settings.access_key.clone()),
            ("name", form.name.clone()),
            ("email", form.email.clone()),
            ("subject", format!("{}{}", settings.subject_prefix, form.subject)),
            ("message", form.message.clone()),
            ("from_name", form.name.clone()),
            ("replyto", form.email.clone()),
            ("redirect", "false".to_string()),
            ("form_name", settings.form_name.clone()),
        ];
        Self { fields }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_multipart(self) -> reqwest::multipart::Form {
        self.fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (key, value)| {
                form.text(key, value)
            })
    }
}
