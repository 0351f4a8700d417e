//! The gate-slide flow: validate, fetch, decode, then hand the record to the
//! context and move past the gate.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::carousel::GATE_INDEX;
use super::context::{AppContext, UiAction, UiEffect};
use super::dom::{find_by_id_mut, find_first_by_class_mut};
use super::markup::Element;
use super::ports::{AnnualDataSource, FetchError};
use super::record::FetchedRecord;
use super::schedule::Deferred;
use super::widgets::poster::{export_poster, ExportRequest};

pub const ADVANCE_DELAY: Duration = Duration::from_millis(300);
pub const NO_RECORD_MESSAGE: &str = "未查询到档案";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("请填写完整的姓名和RUC学号")]
    Validation,
    #[error("{0}")]
    RequestFailed(String),
    #[error("网络请求失败，请重试")]
    Network,
    #[error("生成失败，请稍后重试")]
    ExportFailed,
    #[error("暂无可选的活动照片")]
    MissingGalleryData,
}

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn set_display(gate: &mut Element, id: &str, display: &str) {
    if let Some(node) = find_by_id_mut(gate, id) {
        node.set_style_prop("display", display);
    }
}

fn show_error(gate: &mut Element, message: &str) {
    if let Some(errors) = find_by_id_mut(gate, "error-box") {
        errors.set_text(message);
        errors.set_style_prop("display", "block");
    }
}

fn clear_error(gate: &mut Element) {
    if let Some(errors) = find_by_id_mut(gate, "error-box") {
        errors.set_text("");
        errors.set_style_prop("display", "none");
    }
}

/// Presses the seal and disables the button while the request runs.
fn press_seal(gate: &mut Element) {
    if let Some(wrapper) = find_by_id_mut(gate, "btn-fetch") {
        wrapper.remove_attr("data-action");
    }
    if let Some(seal) = find_first_by_class_mut(gate, "btn-seal") {
        seal.add_class("seal-active");
    }
    if let Some(ink) = find_first_by_class_mut(gate, "seal-ink") {
        ink.add_class("ink-visible");
    }
    if let Some(text) = find_first_by_class_mut(gate, "btn-text") {
        text.set_style_prop("opacity", "0");
    }
}

fn reset_seal(gate: &mut Element) {
    if let Some(wrapper) = find_by_id_mut(gate, "btn-fetch") {
        wrapper.set_attr("data-action", "fetch");
    }
    if let Some(seal) = find_first_by_class_mut(gate, "btn-seal") {
        seal.remove_class("seal-active");
    }
    if let Some(ink) = find_first_by_class_mut(gate, "seal-ink") {
        ink.remove_class("ink-visible");
    }
    if let Some(text) = find_first_by_class_mut(gate, "btn-text") {
        text.set_style_prop("opacity", "1");
    }
}

pub struct ReportSession<S: AnnualDataSource> {
    source: S,
    context: AppContext,
}

impl<S: AnnualDataSource> ReportSession<S> {
    pub fn new(source: S, context: AppContext) -> Self {
        Self { source, context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    fn with_gate(&mut self, f: impl FnOnce(&mut Element)) {
        if let Some(gate) = self.context.carousel_mut().slide_mut(GATE_INDEX) {
            f(gate);
        }
    }

    fn fail(&mut self, error: ReportError) -> Result<(), ReportError> {
        let message = error.to_string();
        self.with_gate(|gate| {
            set_display(gate, "loading", "none");
            show_error(gate, &message);
            reset_seal(gate);
        });
        Err(error)
    }

    /// Looks up `name`/`phone`. Every failure is shown in the gate's error
    /// box and leaves the user on the gate, free to retry.
    pub async fn submit(&mut self, name: &str, phone: &str) -> Result<(), ReportError> {
        let (name, phone) = (name.trim(), phone.trim());
        self.with_gate(clear_error);

        if name.is_empty() || phone.is_empty() {
            let message = ReportError::Validation.to_string();
            self.with_gate(|gate| show_error(gate, &message));
            return Err(ReportError::Validation);
        }

        self.with_gate(|gate| {
            press_seal(gate);
            set_display(gate, "loading", "block");
        });

        let response = match self.source.fetch_annual_data(name, phone).await {
            Ok(response) => response,
            Err(FetchError::Network(e)) => {
                warn!(error = %e, "annual data fetch failed");
                return self.fail(ReportError::Network);
            }
            Err(FetchError::RequestFailed(message)) => {
                return self.fail(ReportError::RequestFailed(message));
            }
        };

        let succeeded = response.get("success").is_some_and(is_truthy);
        let data = response.get("data").filter(|d| is_truthy(d));
        let Some(data) = data.filter(|_| succeeded) else {
            let message = response
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(NO_RECORD_MESSAGE)
                .to_string();
            return self.fail(ReportError::RequestFailed(message));
        };

        let record = match FetchedRecord::from_data(data) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "annual data payload could not be decoded");
                return self.fail(ReportError::RequestFailed(NO_RECORD_MESSAGE.to_string()));
            }
        };

        info!(volunteer = record.is_volunteer(), "annual record loaded");
        self.with_gate(|gate| set_display(gate, "loading", "none"));
        self.context.set_record(record);
        self.context.carousel_mut().unlock();
        self.context
            .tasks_mut()
            .schedule(ADVANCE_DELAY, Deferred::AdvancePastGate);
        Ok(())
    }

    /// Routes a page action to the context. A photo picker with nothing to
    /// pick from quietly becomes an upload request.
    pub fn dispatch(&mut self, action: UiAction) -> Result<UiEffect, ReportError> {
        match self.context.handle(action) {
            Err(ReportError::MissingGalleryData) => Ok(UiEffect::RequestUpload),
            other => other,
        }
    }

    pub async fn save_poster(&mut self, request: ExportRequest) -> Result<(), ReportError> {
        let capabilities = self.context.capabilities().clone();
        export_poster(self.context.overlays_mut(), &capabilities, request)
            .await
            .map_err(ReportError::from)
    }
}
