//! Payment method endpoints.

use course_shop_core::{FormMode, PaymentMethod, PaymentMethodForm, PaymentMethodId};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use secrecy::SecretString;
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::instrument;

use super::BackendClient;
use crate::error::BackendError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodsPayload {
    payment_methods: Vec<PaymentMethod>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodPayload {
    payment_method: PaymentMethod,
}

/// Build the multipart body for create (`image` required) or update
/// (`isActive` included, `image` only when replaced).
fn multipart_body(form: &PaymentMethodForm, mode: FormMode) -> Result<Form, BackendError> {
    let mut body = Form::new()
        .text("name", form.name.trim().to_string())
        .text("number", form.number.trim().to_string())
        .text("instructions", form.instructions.trim().to_string());

    if mode == FormMode::Edit {
        body = body.text("isActive", form.is_active.to_string());
    }

    if let Some(image) = &form.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|_| {
                BackendError::InvalidInput(format!(
                    "unsupported image type {:?}",
                    image.content_type
                ))
            })?;
        body = body.part("image", part);
    }

    Ok(body)
}

impl BackendClient {
    /// Active payment methods, for the public order form.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn active_payment_methods(&self) -> Result<Vec<PaymentMethod>, BackendError> {
        let request = self.request(Method::GET, &["payment-methods", "active"], None)?;
        let payload: PaymentMethodsPayload = self.execute(request).await?;
        Ok(payload.payment_methods)
    }

    /// Every payment method, active or not.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn all_payment_methods(
        &self,
        token: &SecretString,
    ) -> Result<Vec<PaymentMethod>, BackendError> {
        let request = self.request(
            Method::GET,
            &["payment-methods", "admin", "all"],
            Some(token),
        )?;
        let payload: PaymentMethodsPayload = self.execute(request).await?;
        Ok(payload.payment_methods)
    }

    /// Create a payment method. The form's logo is sent as the `image` part.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the form.
    #[instrument(skip_all, fields(name = %form.name))]
    pub async fn create_payment_method(
        &self,
        token: &SecretString,
        form: &PaymentMethodForm,
    ) -> Result<PaymentMethod, BackendError> {
        let request = self
            .request(
                Method::POST,
                &["payment-methods", "admin", "create"],
                Some(token),
            )?
            .multipart(multipart_body(form, FormMode::Create)?);
        let payload: PaymentMethodPayload = self.execute(request).await?;
        Ok(payload.payment_method)
    }

    /// Update a payment method. The logo is replaced only if the form has one.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the form.
    #[instrument(skip(self, token, form), fields(id = %id))]
    pub async fn update_payment_method(
        &self,
        token: &SecretString,
        id: &PaymentMethodId,
        form: &PaymentMethodForm,
    ) -> Result<PaymentMethod, BackendError> {
        let request = self
            .request(
                Method::PUT,
                &["payment-methods", "admin", "update", id.as_str()],
                Some(token),
            )?
            .multipart(multipart_body(form, FormMode::Edit)?);
        let payload: PaymentMethodPayload = self.execute(request).await?;
        Ok(payload.payment_method)
    }

    /// Delete a payment method.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record does not exist.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete_payment_method(
        &self,
        token: &SecretString,
        id: &PaymentMethodId,
    ) -> Result<(), BackendError> {
        let request = self.request(
            Method::DELETE,
            &["payment-methods", "admin", "delete", id.as_str()],
            Some(token),
        )?;
        let _: IgnoredAny = self.execute(request).await?;
        Ok(())
    }

    /// Flip a payment method between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record does not exist.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn toggle_payment_method(
        &self,
        token: &SecretString,
        id: &PaymentMethodId,
    ) -> Result<PaymentMethod, BackendError> {
        let request = self.request(
            Method::PATCH,
            &["payment-methods", "admin", "toggle-status", id.as_str()],
            Some(token),
        )?;
        let payload: PaymentMethodPayload = self.execute(request).await?;
        Ok(payload.payment_method)
    }
}

#[cfg(test)]
mod tests {
    use course_shop_core::ImageUpload;

    use super::*;

    fn form_with_image(content_type: &str) -> PaymentMethodForm {
        PaymentMethodForm {
            name: "bKash".to_string(),
            number: "01712345678".to_string(),
            instructions: "Send money".to_string(),
            is_active: true,
            image: Some(ImageUpload {
                file_name: "bkash.png".to_string(),
                content_type: content_type.to_string(),
                bytes: vec![0; 16],
            }),
        }
    }

    #[test]
    fn test_unparseable_image_type_is_invalid_input() {
        let Err(err) = multipart_body(&form_with_image("not a mime"), FormMode::Create) else {
            panic!("expected the image part to be rejected");
        };
        assert!(matches!(err, BackendError::InvalidInput(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_image_part_accepts_real_type() {
        assert!(multipart_body(&form_with_image("image/png"), FormMode::Edit).is_ok());
    }
}
