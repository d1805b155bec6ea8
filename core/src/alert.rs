//! Presentation collaborators the store reports to.
//!
//! Both routers are fire-and-forget: the store never reads anything back.

use crate::error::ApiError;

/// How a success message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowType {
    #[default]
    Toast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub show_type: ShowType,
    pub title: String,
    pub text: String,
}

impl AlertMessage {
    /// Untitled toast, the shape every store notification uses.
    pub fn toast(text: &str) -> Self {
        Self {
            show_type: ShowType::Toast,
            title: String::new(),
            text: text.to_string(),
        }
    }
}

pub trait AlertRouter: Send + Sync {
    /// Dismiss whatever alert is currently shown.
    fn clear(&self);

    fn success(&self, message: AlertMessage);
}

/// Turns service failures into user feedback.
///
/// `Context` is whatever the UI needs to navigate in response (current
/// route, a router handle...). The store forwards it untouched.
pub trait ErrorRouter: Send + Sync {
    type Context: Send + Sync;

    fn handle_service_exception(&self, error: ApiError, routing_context: &Self::Context);
}
