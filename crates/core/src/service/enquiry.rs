//! Enquiry intake with contact-based deduplication. Repeat submissions
//! from the same contact merge into the existing active record: the
//! counter grows and the attribution fields track the latest submission,
//! while `created_at` keeps the first contact time.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::ident::TokenSource;
use crate::lifecycle::{DeleteStatus, DisplayStatus};
use crate::model::{Enquiry, EnquiryInput, EnquiryView, RequestOrigin};
use crate::store::{EnquiryStore, UserDirectory};
use crate::validate;

#[derive(Clone)]
pub struct EnquiryService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl<S> EnquiryService<S>
where
    S: EnquiryStore + UserDirectory,
{
    pub fn new(store: S, clock: Arc<dyn Clock>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { store, clock, tokens }
    }

    /// Accept a public enquiry submission. An email match takes strict
    /// precedence over a mobile match; the mobile lookup only runs when no
    /// active record carries the submitted email.
    pub async fn submit(&self, input: EnquiryInput, origin: RequestOrigin) -> CoreResult<EnquiryView> {
        let name = validate::required_text(input.name.as_deref(), "Name")?;
        let email = validate::optional_text(input.email.as_deref()).map(|e| e.to_lowercase());
        let mobile = validate::optional_text(input.mobile.as_deref());
        if email.is_none() && mobile.is_none() {
            return Err(CoreError::invalid(
                "Please provide either email or mobile number",
            ));
        }

        let existing = match &email {
            Some(email) => self.store.find_active_enquiry_by_email(email).await?,
            None => None,
        };
        let existing = match existing {
            Some(found) => Some(found),
            None => match &mobile {
                Some(mobile) => self.store.find_active_enquiry_by_mobile(mobile).await?,
                None => None,
            },
        };

        if let Some(mut enquiry) = existing {
            enquiry.count += 1;
            enquiry.name = name;
            if email.is_some() {
                enquiry.email = email;
            }
            if mobile.is_some() {
                enquiry.mobile = mobile;
            }
            if let Some(city) = validate::optional_text(input.city.as_deref()) {
                enquiry.city = Some(city);
            }
            enquiry.kind = validate::optional_text(input.kind.as_deref());
            enquiry.message = validate::optional_text(input.message.as_deref());
            enquiry.category_id = input.category_id;
            enquiry.service_id = input.service_id;
            enquiry.utm_source = validate::optional_text(input.utm_source.as_deref());
            enquiry.utm_medium = validate::optional_text(input.utm_medium.as_deref());
            enquiry.utm_campaign = validate::optional_text(input.utm_campaign.as_deref());
            enquiry.utm_term = validate::optional_text(input.utm_term.as_deref());
            enquiry.utm_content = validate::optional_text(input.utm_content.as_deref());
            enquiry.ip_address = origin.ip_address;
            enquiry.url = origin.url;
            self.store.update_enquiry(&enquiry).await?;
            tracing::info!(id = enquiry.id, count = enquiry.count, "enquiry merged");
            return Ok(enquiry.into());
        }

        let record = Enquiry {
            id: 0,
            public_id: self.tokens.mint(),
            name,
            email,
            mobile,
            city: validate::optional_text(input.city.as_deref()),
            kind: validate::optional_text(input.kind.as_deref()),
            message: validate::optional_text(input.message.as_deref()),
            category_id: input.category_id,
            service_id: input.service_id,
            ip_address: origin.ip_address,
            url: origin.url,
            utm_source: validate::optional_text(input.utm_source.as_deref()),
            utm_medium: validate::optional_text(input.utm_medium.as_deref()),
            utm_campaign: validate::optional_text(input.utm_campaign.as_deref()),
            utm_term: validate::optional_text(input.utm_term.as_deref()),
            utm_content: validate::optional_text(input.utm_content.as_deref()),
            count: 1,
            display_status: DisplayStatus::Visible,
            delete_status: DeleteStatus::Active,
            created_at: self.clock.now_utc(),
        };
        let saved = self.store.insert_enquiry(record).await?;
        tracing::info!(id = saved.id, "enquiry created");
        Ok(saved.into())
    }

    pub async fn find_by_id(&self, id: i64) -> CoreResult<EnquiryView> {
        self.store
            .find_active_enquiry(id)
            .await?
            .map(EnquiryView::from)
            .ok_or_else(|| CoreError::not_found("Enquiry"))
    }

    pub async fn list(&self) -> CoreResult<Vec<EnquiryView>> {
        let rows = self.store.list_active_enquiries().await?;
        Ok(rows.into_iter().map(EnquiryView::from).collect())
    }

    pub async fn soft_delete(&self, id: i64, acting_user_id: i64) -> CoreResult<()> {
        validate::acting_user(&self.store, acting_user_id).await?;
        let mut enquiry = self
            .store
            .find_active_enquiry(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Enquiry"))?;

        enquiry.delete_status = DeleteStatus::Deleted;
        self.store.update_enquiry(&enquiry).await?;
        tracing::info!(id, user = acting_user_id, "enquiry soft deleted");
        Ok(())
    }
}
