use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, Result};
use vitrine_common::models::{Statistic, StatisticPayload};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{non_blank, or_empty, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct StatisticForm {
    #[validate(custom(function = "not_blank", message = "Label is required"))]
    pub label: String,
    #[validate(range(min = 0, message = "Value cannot be negative"))]
    pub value: i64,
    pub icon: String,
    pub order: i32,
    pub is_active: bool,
}

impl Default for StatisticForm {
    fn default() -> Self {
        Self { label: String::new(), value: 0, icon: String::new(), order: 0, is_active: true }
    }
}

impl StatisticForm {
    fn payload(&self) -> StatisticPayload {
        StatisticPayload {
            label: self.label.trim().to_owned(),
            value: self.value,
            icon: non_blank(&self.icon),
            order: self.order,
            is_active: self.is_active,
        }
    }
}

impl Resource for Statistic {
    type Form = StatisticForm;

    fn card(&self, _media: &MediaResolver) -> Card {
        Card::new(self.id, format!("{} {}", self.value, self.label))
            .detail(self.icon.as_deref())
            .order(self.order)
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for Statistic {
    fn to_form(&self, _media: &MediaResolver) -> StatisticForm {
        StatisticForm {
            label: self.label.clone(),
            value: self.value,
            icon: or_empty(self.icon.as_ref()),
            order: self.order,
            is_active: self.is_active,
        }
    }

    async fn create(api: &ApiClient, form: &StatisticForm) -> Result<Self> {
        api.create_json(&form.payload()).await
    }

    async fn update(api: &ApiClient, id: i64, form: &StatisticForm) -> Result<Self> {
        api.update(id, &form.payload()).await
    }
}
