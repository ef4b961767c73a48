use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, Result};
use vitrine_common::models::{Faq, FaqPayload};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct FaqForm {
    #[validate(custom(function = "not_blank", message = "Question is required"))]
    pub question: String,
    #[validate(custom(function = "not_blank", message = "Answer is required"))]
    pub answer: String,
    pub order: i32,
    pub is_active: bool,
}

impl Default for FaqForm {
    fn default() -> Self {
        Self { question: String::new(), answer: String::new(), order: 0, is_active: true }
    }
}

impl FaqForm {
    fn payload(&self) -> FaqPayload {
        FaqPayload {
            question: self.question.trim().to_owned(),
            answer: self.answer.trim().to_owned(),
            order: self.order,
            is_active: self.is_active,
        }
    }
}

impl Resource for Faq {
    type Form = FaqForm;

    fn card(&self, _media: &MediaResolver) -> Card {
        Card::new(self.id, &self.question)
            .detail(Some(self.answer.as_str()))
            .order(self.order)
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for Faq {
    fn to_form(&self, _media: &MediaResolver) -> FaqForm {
        FaqForm {
            question: self.question.clone(),
            answer: self.answer.clone(),
            order: self.order,
            is_active: self.is_active,
        }
    }

    async fn create(api: &ApiClient, form: &FaqForm) -> Result<Self> {
        api.create_json(&form.payload()).await
    }

    async fn update(api: &ApiClient, id: i64, form: &FaqForm) -> Result<Self> {
        api.update(id, &form.payload()).await
    }
}
